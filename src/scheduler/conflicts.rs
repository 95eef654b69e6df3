use super::{AssignOptions, Conflict, ConflictKind};
use crate::model::Person;
use crate::schedule::Schedule;

/// Relit un planning terminé. Les gardes fixes passent outre les contraintes,
/// on signale donc sans rien corriger.
pub(super) fn detect_conflicts(
    schedule: &Schedule,
    people: &[Person],
    opts: AssignOptions,
) -> Vec<Conflict> {
    let mut out = Vec::new();

    for person in people {
        let duties = schedule.duties_of(&person.id);
        let mut high_load = 0u32;

        for (idx, (date, duty)) in duties.iter().enumerate() {
            if let Some((prev_date, _)) = idx.checked_sub(1).map(|i| duties[i]) {
                if prev_date == *date {
                    out.push(Conflict {
                        person: person.id.clone(),
                        date: *date,
                        kind: ConflictKind::DoubleBooking,
                    });
                } else if !person.can_work_consecutive && prev_date.succ_opt() == Some(*date) {
                    out.push(Conflict {
                        person: person.id.clone(),
                        date: *date,
                        kind: ConflictKind::ConsecutiveDays,
                    });
                }
            }

            if duty.is_high_load() {
                high_load += 1;
                if high_load == opts.high_load_cap + 1 {
                    out.push(Conflict {
                        person: person.id.clone(),
                        date: *date,
                        kind: ConflictKind::HighLoadExceeded,
                    });
                }
            }
        }
    }

    out
}
