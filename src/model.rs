use crate::rng::TieBreakRng;
use crate::scheduler::SchedError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Person (les noms ne sont pas uniques).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(Uuid);

impl PersonId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Type de garde. L'ordre de déclaration est l'ordre d'attribution dans la journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DutyType {
    #[serde(rename = "평일A")]
    WeekdayA,
    #[serde(rename = "평일B")]
    WeekdayB,
    #[serde(rename = "휴일A")]
    HolidayA,
    #[serde(rename = "휴일B")]
    HolidayB,
    #[serde(rename = "휴일C")]
    HolidayC,
}

impl DutyType {
    pub const ALL: [DutyType; 5] = [
        DutyType::WeekdayA,
        DutyType::WeekdayB,
        DutyType::HolidayA,
        DutyType::HolidayB,
        DutyType::HolidayC,
    ];

    /// Types soumis au plafond de charge (`AssignOptions::high_load_cap`).
    pub const HIGH_LOAD: [DutyType; 2] = [DutyType::WeekdayA, DutyType::HolidayC];

    pub fn label(self) -> &'static str {
        match self {
            DutyType::WeekdayA => "평일A",
            DutyType::WeekdayB => "평일B",
            DutyType::HolidayA => "휴일A",
            DutyType::HolidayB => "휴일B",
            DutyType::HolidayC => "휴일C",
        }
    }

    pub fn is_high_load(self) -> bool {
        Self::HIGH_LOAD.contains(&self)
    }

    pub fn is_holiday(self) -> bool {
        matches!(
            self,
            DutyType::HolidayA | DutyType::HolidayB | DutyType::HolidayC
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DutyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DutyType {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let duty = match raw.to_ascii_lowercase().as_str() {
            "weekday-a" | "weekday_a" => DutyType::WeekdayA,
            "weekday-b" | "weekday_b" => DutyType::WeekdayB,
            "holiday-a" | "holiday_a" => DutyType::HolidayA,
            "holiday-b" | "holiday_b" => DutyType::HolidayB,
            "holiday-c" | "holiday_c" => DutyType::HolidayC,
            _ => DutyType::ALL
                .into_iter()
                .find(|d| d.label() == raw)
                .ok_or_else(|| SchedError::UnknownDutyType(raw.to_string()))?,
        };
        Ok(duty)
    }
}

/// Créneau (date, type de garde). Forme texte : `2024-01-01 평일A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DutySlot {
    pub date: NaiveDate,
    pub duty: DutyType,
}

impl DutySlot {
    pub fn new(date: NaiveDate, duty: DutyType) -> Self {
        Self { date, duty }
    }
}

impl fmt::Display for DutySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.duty)
    }
}

impl FromStr for DutySlot {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date_raw, duty_raw) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| SchedError::InvalidSlot(s.to_string()))?;
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|_| SchedError::InvalidDate(date_raw.to_string()))?;
        Ok(Self::new(date, duty_raw.parse()?))
    }
}

/// Compteur de gardes par type pour une exécution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutyTally {
    counts: [u32; 5],
}

impl DutyTally {
    pub fn get(&self, duty: DutyType) -> u32 {
        self.counts[duty.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn high_load(&self) -> u32 {
        DutyType::HIGH_LOAD.iter().map(|d| self.get(*d)).sum()
    }

    pub(crate) fn increment(&mut self, duty: DutyType) {
        self.counts[duty.index()] += 1;
    }
}

/// Personne soumise aux gardes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Plus la valeur est basse, plus la priorité est haute.
    pub seniority: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub fixed_duties: BTreeSet<DutySlot>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unavailable: BTreeSet<DutySlot>,
    #[serde(default)]
    pub can_work_consecutive: bool,
    #[serde(skip)]
    tally: DutyTally,
    #[serde(skip)]
    tie_break: f64,
}

impl Person {
    pub fn new<N: Into<String>>(name: N, seniority: u32) -> Self {
        Self {
            id: PersonId::random(),
            name: name.into(),
            seniority,
            fixed_duties: BTreeSet::new(),
            unavailable: BTreeSet::new(),
            can_work_consecutive: false,
            tally: DutyTally::default(),
            tie_break: 0.0,
        }
    }

    pub fn with_fixed(mut self, date: NaiveDate, duty: DutyType) -> Self {
        self.fixed_duties.insert(DutySlot::new(date, duty));
        self
    }

    pub fn with_unavailable(mut self, date: NaiveDate, duty: DutyType) -> Self {
        self.unavailable.insert(DutySlot::new(date, duty));
        self
    }

    pub fn consecutive(mut self, allowed: bool) -> Self {
        self.can_work_consecutive = allowed;
        self
    }

    /// Remet les compteurs à zéro et tire une nouvelle valeur de départage.
    /// À appeler avant chaque exécution : le moteur ne le fait pas.
    pub fn reset_duty_count(&mut self, rng: &mut TieBreakRng) {
        self.tally = DutyTally::default();
        self.tie_break = rng.next_tie_break();
    }

    pub fn tally(&self) -> &DutyTally {
        &self.tally
    }

    pub fn count(&self, duty: DutyType) -> u32 {
        self.tally.get(duty)
    }

    pub fn total_duty_count(&self) -> u32 {
        self.tally.total()
    }

    pub fn high_load_count(&self) -> u32 {
        self.tally.high_load()
    }

    pub fn tie_break(&self) -> f64 {
        self.tie_break
    }

    pub fn is_fixed_to(&self, date: NaiveDate, duty: DutyType) -> bool {
        self.fixed_duties.contains(&DutySlot::new(date, duty))
    }

    /// Vrai si un créneau fixe de ce jour porte sur l'un des types ouverts ce jour-là.
    pub fn has_fixed_among(&self, date: NaiveDate, duties: &[DutyType]) -> bool {
        self.fixed_duties
            .iter()
            .any(|s| s.date == date && duties.contains(&s.duty))
    }

    pub fn fixed_duties_as_strings(&self) -> Vec<String> {
        self.fixed_duties.iter().map(ToString::to_string).collect()
    }

    pub fn unavailable_as_strings(&self) -> Vec<String> {
        self.unavailable.iter().map(ToString::to_string).collect()
    }

    pub(crate) fn record_duty(&mut self, duty: DutyType) {
        self.tally.increment(duty);
    }
}

/// Liste des personnes, conservée d'une exécution à l'autre par l'appelant.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn find_person_by_name<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name == name)
    }
    pub fn find_person_by_id<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_person_mut_by_name(&mut self, name: &str) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.name == name)
    }

    /// Retire toutes les personnes portant ce nom ; renvoie le nombre retiré.
    pub fn remove_person_by_name(&mut self, name: &str) -> usize {
        let before = self.people.len();
        self.people.retain(|p| p.name != name);
        before - self.people.len()
    }

    pub fn reset_tallies(&mut self, rng: &mut TieBreakRng) {
        for person in &mut self.people {
            person.reset_duty_count(rng);
        }
    }
}
