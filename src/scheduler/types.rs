use crate::model::{DutyType, PersonId};
use chrono::NaiveDate;
use thiserror::Error;

/// Façon d'interpréter une indisponibilité.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnavailabilityMatch {
    /// Bloque seulement le couple (date, type) déclaré.
    #[default]
    Slot,
    /// Toute indisponibilité ce jour-là bloque tous les types.
    WholeDay,
}

/// Options d'attribution
#[derive(Debug, Clone, Copy)]
pub struct AssignOptions {
    /// Plafond cumulé sur les types `DutyType::HIGH_LOAD`.
    pub high_load_cap: u32,
    pub unavailability: UnavailabilityMatch,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            high_load_cap: 4,
            unavailability: UnavailabilityMatch::Slot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,
    ConsecutiveDays,
    HighLoadExceeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub person: PersonId,
    pub date: NaiveDate,
    pub kind: ConflictKind,
}

/// Événements émis pendant une exécution.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEvent {
    DayStarted {
        date: NaiveDate,
        duties: Vec<DutyType>,
    },
    SlotStarted {
        date: NaiveDate,
        duty: DutyType,
    },
    Candidates {
        date: NaiveDate,
        duty: DutyType,
        names: Vec<String>,
    },
    Assigned {
        date: NaiveDate,
        duty: DutyType,
        person: PersonId,
        name: String,
        fixed: bool,
    },
    Shortfall {
        date: NaiveDate,
        duty: DutyType,
    },
}

/// Point d'observation du moteur (remplace la narration console).
pub trait EventSink {
    fn on_event(&mut self, event: ScheduleEvent);
}

/// Ignore tous les événements.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: ScheduleEvent) {}
}

impl EventSink for Vec<ScheduleEvent> {
    fn on_event(&mut self, event: ScheduleEvent) {
        self.push(event);
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("unknown duty type: {0}")]
    UnknownDutyType(String),
    #[error("invalid duty slot: {0} (expected \"YYYY-MM-DD <duty>\")")]
    InvalidSlot(String),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
