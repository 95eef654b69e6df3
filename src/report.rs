//! Tableaux de sortie : vue calendrier par semaine et récapitulatif par personne.

use crate::calendar::weekday_label;
use crate::model::{DutyType, Person};
use crate::schedule::{person_name, Schedule};
use chrono::{Datelike, Weekday};

pub const WEEK_COLUMNS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const NAME_COLUMN: &str = "이름";
pub const TOTAL_COLUMN: &str = "총 당직 횟수";

/// Une semaine : ligne des dates et ligne des gardes, une colonne par jour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarWeek {
    pub dates: [String; 7],
    pub duties: [String; 7],
}

impl CalendarWeek {
    fn is_empty(&self) -> bool {
        self.dates.iter().all(String::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarView {
    pub weeks: Vec<CalendarWeek>,
}

impl CalendarView {
    pub fn columns() -> [&'static str; 7] {
        WEEK_COLUMNS.map(weekday_label)
    }

    /// Lignes à plat : dates puis gardes, semaine après semaine.
    pub fn rows(&self) -> Vec<[String; 7]> {
        self.weeks
            .iter()
            .flat_map(|w| [w.dates.clone(), w.duties.clone()])
            .collect()
    }
}

pub fn build_calendar_view(schedule: &Schedule, people: &[Person]) -> CalendarView {
    let mut view = CalendarView::default();
    let mut week = CalendarWeek::default();

    for (date, day) in schedule.days() {
        if date.weekday() == Weekday::Mon && !week.is_empty() {
            view.weeks.push(std::mem::take(&mut week));
        }
        let col = date.weekday().num_days_from_monday() as usize;
        week.dates[col] = date.format("%Y-%m-%d").to_string();
        week.duties[col] = day
            .slots()
            .map(|(duty, ids)| {
                let name = ids.first().map_or("-", |id| person_name(people, id));
                format!("{duty}: {name}")
            })
            .collect::<Vec<_>>()
            .join("\n");
    }
    if !week.is_empty() {
        view.weeks.push(week);
    }

    view
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub name: String,
    /// Dans l'ordre de `DutyType::ALL`.
    pub counts: [u32; 5],
    pub total: u32,
}

impl SummaryRow {
    pub fn cells(&self) -> Vec<String> {
        let mut buf = itoa::Buffer::new();
        let mut out = Vec::with_capacity(7);
        out.push(self.name.clone());
        for count in self.counts {
            out.push(buf.format(count).to_owned());
        }
        out.push(buf.format(self.total).to_owned());
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonSummary {
    pub rows: Vec<SummaryRow>,
}

impl PersonSummary {
    pub fn columns() -> Vec<&'static str> {
        let mut cols = vec![NAME_COLUMN];
        cols.extend(DutyType::ALL.iter().map(|d| d.label()));
        cols.push(TOTAL_COLUMN);
        cols
    }
}

pub fn build_person_summary(people: &[Person]) -> PersonSummary {
    let mut sorted: Vec<&Person> = people.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let rows = sorted
        .into_iter()
        .map(|p| SummaryRow {
            name: p.name.clone(),
            counts: DutyType::ALL.map(|d| p.count(d)),
            total: p.total_duty_count(),
        })
        .collect();

    PersonSummary { rows }
}
