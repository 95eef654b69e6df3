#![forbid(unsafe_code)]
//! Dangjik — répartition de gardes (당직) en semaine et jours fériés.
//!
//! - Calendrier : 평일A/평일B en semaine, 휴일A/휴일B/휴일C le week-end et les fériés.
//! - Attribution gloutonne jour par jour : gardes fixes d'abord, puis le
//!   candidat disponible le moins chargé (ancienneté, puis tirage du run).
//! - Vue calendrier + récapitulatif par personne, export CSV/JSON.
//! - Dates naïves (`NaiveDate`), aucune notion de fuseau.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod rng;
pub mod schedule;
pub mod scheduler;
pub mod storage;

pub use calendar::{all_duty_slots, duty_types_for, is_holiday, DateRange, DayKind, HolidaySet};
pub use model::{DutySlot, DutyTally, DutyType, Person, PersonId, Roster};
pub use report::{CalendarView, CalendarWeek, PersonSummary, SummaryRow};
pub use rng::TieBreakRng;
pub use schedule::{DaySchedule, Schedule, Shortfall, SLOT_CAPACITY};
pub use scheduler::{
    is_available, AssignOptions, Conflict, ConflictKind, EventSink, NullSink, SchedError,
    ScheduleEvent, Scheduler, UnavailabilityMatch,
};
pub use storage::{check_roster, JsonStorage, Storage};
