use crate::calendar::DayKind;
use crate::model::{DutyType, Person, PersonId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Nombre de personnes par créneau.
pub const SLOT_CAPACITY: usize = 1;

/// Créneau resté vide après attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub date: NaiveDate,
    pub duty: DutyType,
}

/// Gardes d'une journée, indexées par type (ordre d'attribution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub kind: DayKind,
    slots: BTreeMap<DutyType, Vec<PersonId>>,
}

impl DaySchedule {
    pub(crate) fn new(kind: DayKind) -> Self {
        let slots = kind.duties().iter().map(|d| (*d, Vec::new())).collect();
        Self { kind, slots }
    }

    pub fn assigned(&self, duty: DutyType) -> &[PersonId] {
        self.slots.get(&duty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn slots(&self) -> impl Iterator<Item = (DutyType, &[PersonId])> + '_ {
        self.slots.iter().map(|(d, p)| (*d, p.as_slice()))
    }

    pub fn contains(&self, person: &PersonId) -> bool {
        self.slots.values().any(|p| p.contains(person))
    }

    /// La personne tient-elle un autre type de garde ce jour-là ?
    pub fn holds_other_than(&self, person: &PersonId, duty: DutyType) -> bool {
        self.slots
            .iter()
            .any(|(d, p)| *d != duty && p.contains(person))
    }

    pub(crate) fn set(&mut self, duty: DutyType, people: Vec<PersonId>) {
        self.slots.insert(duty, people);
    }
}

/// Planning construit jour par jour par le moteur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, DaySchedule>,
    shortfalls: Vec<Shortfall>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &DaySchedule)> + '_ {
        self.days.iter().map(|(d, s)| (*d, s))
    }

    pub fn assigned(&self, date: NaiveDate, duty: DutyType) -> &[PersonId] {
        self.days
            .get(&date)
            .map(|day| day.assigned(duty))
            .unwrap_or(&[])
    }

    pub fn shortfalls(&self) -> &[Shortfall] {
        &self.shortfalls
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Liste des créneaux `(date, type)` tenus par `person`.
    pub fn duties_of(&self, person: &PersonId) -> Vec<(NaiveDate, DutyType)> {
        self.days
            .iter()
            .flat_map(|(date, day)| {
                day.slots()
                    .filter(move |(_, p)| p.contains(person))
                    .map(move |(duty, _)| (*date, duty))
            })
            .collect()
    }

    pub(crate) fn open_day(&mut self, date: NaiveDate, kind: DayKind) {
        self.days.insert(date, DaySchedule::new(kind));
    }

    pub(crate) fn commit(&mut self, date: NaiveDate, duty: DutyType, people: Vec<PersonId>) {
        if let Some(day) = self.days.get_mut(&date) {
            day.set(duty, people);
        }
    }

    pub(crate) fn record_shortfall(&mut self, date: NaiveDate, duty: DutyType) {
        self.shortfalls.push(Shortfall { date, duty });
    }

    /// Rendu texte : une entête par date puis une ligne par type de garde.
    pub fn to_text(&self, people: &[Person]) -> String {
        let mut out = String::new();
        for (date, day) in &self.days {
            out.push_str(&format!("{} ({})\n", date.format("%Y-%m-%d"), day.kind.label()));
            for (duty, ids) in day.slots() {
                let names: Vec<&str> = ids.iter().map(|id| person_name(people, id)).collect();
                out.push_str(&format!("  {duty}: {}\n", names.join(", ")));
            }
        }
        out
    }
}

pub(crate) fn person_name<'a>(people: &'a [Person], id: &PersonId) -> &'a str {
    people
        .iter()
        .find(|p| &p.id == id)
        .map_or("?", |p| p.name.as_str())
}
