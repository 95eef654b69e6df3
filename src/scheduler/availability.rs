use super::{AssignOptions, UnavailabilityMatch};
use crate::model::{DutySlot, DutyType, Person};
use crate::schedule::Schedule;
use chrono::NaiveDate;

/// Une personne peut-elle prendre `duty` le `date`, vu le planning déjà construit ?
///
/// Ne regarde que les jours déjà engagés : la veille doit avoir été attribuée
/// avant d'interroger le jour courant.
pub fn is_available(
    person: &Person,
    date: NaiveDate,
    duty: DutyType,
    schedule: &Schedule,
    opts: AssignOptions,
) -> bool {
    if is_marked_unavailable(person, date, duty, opts.unavailability) {
        return false;
    }

    if !person.can_work_consecutive {
        let worked_yesterday = date
            .pred_opt()
            .and_then(|prev| schedule.day(prev))
            .is_some_and(|day| day.contains(&person.id));
        if worked_yesterday {
            return false;
        }
    }

    if duty.is_high_load() && person.high_load_count() >= opts.high_load_cap {
        return false;
    }

    if schedule
        .day(date)
        .is_some_and(|day| day.holds_other_than(&person.id, duty))
    {
        return false;
    }

    true
}

fn is_marked_unavailable(
    person: &Person,
    date: NaiveDate,
    duty: DutyType,
    mode: UnavailabilityMatch,
) -> bool {
    match mode {
        UnavailabilityMatch::Slot => person.unavailable.contains(&DutySlot::new(date, duty)),
        UnavailabilityMatch::WholeDay => person.unavailable.iter().any(|s| s.date == date),
    }
}
