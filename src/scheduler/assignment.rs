use super::{availability::is_available, AssignOptions, EventSink, ScheduleEvent, Scheduler};
use crate::calendar::day_kind;
use crate::model::{DutyType, Person, PersonId};
use crate::schedule::SLOT_CAPACITY;
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

pub(super) fn schedule_duty(
    scheduler: &mut Scheduler<'_>,
    opts: AssignOptions,
    sink: &mut dyn EventSink,
) {
    for date in scheduler.range.days() {
        let kind = day_kind(date, &scheduler.holidays);
        let duties = kind.duties();
        debug!(%date, kind = kind.label(), "scheduling day");
        sink.on_event(ScheduleEvent::DayStarted {
            date,
            duties: duties.to_vec(),
        });
        scheduler.schedule.open_day(date, kind);

        for duty in duties {
            assign_slot(scheduler, date, duties, *duty, opts, sink);
        }
    }
}

fn assign_slot(
    scheduler: &mut Scheduler<'_>,
    date: NaiveDate,
    day_duties: &[DutyType],
    duty: DutyType,
    opts: AssignOptions,
    sink: &mut dyn EventSink,
) {
    debug!(%date, %duty, "scheduling slot");
    sink.on_event(ScheduleEvent::SlotStarted { date, duty });

    let people: &[Person] = scheduler.people;

    let fixed: Vec<usize> = people
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_fixed_to(date, duty))
        .map(|(idx, _)| idx)
        .collect();

    // Une personne fixée sur un autre créneau ouvert du jour lui reste réservée.
    let mut candidates: Vec<usize> = people
        .iter()
        .enumerate()
        .filter(|(idx, p)| {
            !fixed.contains(idx)
                && !p.has_fixed_among(date, day_duties)
                && is_available(p, date, duty, &scheduler.schedule, opts)
        })
        .map(|(idx, _)| idx)
        .collect();
    candidates.sort_by(|a, b| rank(&people[*a], &people[*b]));

    let names: Vec<String> = candidates.iter().map(|i| people[*i].name.clone()).collect();
    debug!(%date, %duty, candidates = ?names, "ranked candidates");
    sink.on_event(ScheduleEvent::Candidates { date, duty, names });

    let mut committed: Vec<(usize, bool)> = fixed.iter().map(|idx| (*idx, true)).collect();
    let open = SLOT_CAPACITY.saturating_sub(committed.len());
    committed.extend(candidates.into_iter().take(open).map(|idx| (idx, false)));

    let ids: Vec<PersonId> = committed
        .iter()
        .map(|(idx, _)| people[*idx].id.clone())
        .collect();

    for (idx, fixed) in &committed {
        let person = &mut scheduler.people[*idx];
        person.record_duty(duty);
        info!(%date, %duty, person = %person.name, fixed, "duty assigned");
        sink.on_event(ScheduleEvent::Assigned {
            date,
            duty,
            person: person.id.clone(),
            name: person.name.clone(),
            fixed: *fixed,
        });
    }

    if committed.len() < SLOT_CAPACITY {
        warn!(%date, %duty, "not enough people available");
        scheduler.schedule.record_shortfall(date, duty);
        sink.on_event(ScheduleEvent::Shortfall { date, duty });
    }

    scheduler.schedule.commit(date, duty, ids);
}

/// Moins de gardes d'abord, puis ancienneté la plus basse, puis tirage du run.
fn rank(a: &Person, b: &Person) -> Ordering {
    a.total_duty_count()
        .cmp(&b.total_duty_count())
        .then(a.seniority.cmp(&b.seniority))
        .then(a.tie_break().total_cmp(&b.tie_break()))
}
