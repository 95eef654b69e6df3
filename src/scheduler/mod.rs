mod assignment;
mod availability;
mod conflicts;
mod types;

pub use availability::is_available;
pub use types::{
    AssignOptions, Conflict, ConflictKind, EventSink, NullSink, SchedError, ScheduleEvent,
    UnavailabilityMatch,
};

use crate::calendar::{DateRange, HolidaySet};
use crate::model::Person;
use crate::report::{self, CalendarView, PersonSummary};
use crate::schedule::Schedule;

/// Moteur d'attribution : une exécution sur une période et une liste de personnes.
///
/// Les compteurs des personnes doivent avoir été remis à zéro par l'appelant
/// (`Person::reset_duty_count`) ; le moteur les incrémente au fil de l'exécution.
#[derive(Debug)]
pub struct Scheduler<'p> {
    people: &'p mut [Person],
    range: DateRange,
    holidays: HolidaySet,
    schedule: Schedule,
}

impl<'p> Scheduler<'p> {
    pub fn new(people: &'p mut [Person], range: DateRange, holidays: HolidaySet) -> Self {
        Self {
            people,
            range,
            holidays,
            schedule: Schedule::new(),
        }
    }

    pub fn people(&self) -> &[Person] {
        self.people
    }
    pub fn range(&self) -> DateRange {
        self.range
    }
    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    /// Attribue toutes les gardes de la période, jour par jour.
    pub fn schedule_duty(&mut self, opts: AssignOptions) {
        self.schedule_duty_with(opts, &mut NullSink);
    }

    pub fn schedule_duty_with(&mut self, opts: AssignOptions, sink: &mut dyn EventSink) {
        assignment::schedule_duty(self, opts, sink);
    }

    pub fn detect_conflicts(&self, opts: AssignOptions) -> Vec<Conflict> {
        conflicts::detect_conflicts(&self.schedule, self.people, opts)
    }

    pub fn calendar_view(&self) -> CalendarView {
        report::build_calendar_view(&self.schedule, self.people)
    }

    pub fn person_summary(&self) -> PersonSummary {
        report::build_person_summary(self.people)
    }
}
