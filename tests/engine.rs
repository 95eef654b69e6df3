#![forbid(unsafe_code)]
use chrono::NaiveDate;
use dangjik::{
    duty_types_for, AssignOptions, ConflictKind, DateRange, DutyType, HolidaySet, Person,
    Schedule, ScheduleEvent, Scheduler, TieBreakRng, UnavailabilityMatch,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn reset(people: &mut [Person], seed: u64) {
    let mut rng = TieBreakRng::seeded(seed);
    for p in people.iter_mut() {
        p.reset_duty_count(&mut rng);
    }
}

fn run(people: &mut [Person], start: NaiveDate, end: NaiveDate, holidays: HolidaySet) -> Schedule {
    run_with(people, start, end, holidays, AssignOptions::default())
}

fn run_with(
    people: &mut [Person],
    start: NaiveDate,
    end: NaiveDate,
    holidays: HolidaySet,
    opts: AssignOptions,
) -> Schedule {
    reset(people, 2024);
    let range = DateRange::new(start, end).unwrap();
    let mut scheduler = Scheduler::new(people, range, holidays);
    scheduler.schedule_duty(opts);
    scheduler.into_schedule()
}

fn team(n: usize) -> Vec<Person> {
    (0..n)
        .map(|i| Person::new(format!("p{i}"), (i % 3) as u32 + 1))
        .collect()
}

#[test]
fn duty_types_follow_day_kind() {
    let mut people = team(8);
    let holidays = HolidaySet::parse(["2024-01-03"]).unwrap();
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 14), holidays.clone());

    assert_eq!(schedule.len(), 14);
    for (date, day) in schedule.days() {
        let duties: Vec<DutyType> = day.slots().map(|(duty, _)| duty).collect();
        assert_eq!(duties.as_slice(), duty_types_for(date, &holidays), "{date}");
    }
    let wednesday: Vec<DutyType> = schedule
        .day(d(2024, 1, 3))
        .unwrap()
        .slots()
        .map(|(duty, _)| duty)
        .collect();
    assert_eq!(
        wednesday,
        vec![DutyType::HolidayA, DutyType::HolidayB, DutyType::HolidayC]
    );
}

#[test]
fn greedy_run_respects_constraints() {
    let mut people = team(8);
    reset(&mut people, 99);
    let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 14)).unwrap();
    let mut scheduler = Scheduler::new(&mut people, range, HolidaySet::new());
    scheduler.schedule_duty(AssignOptions::default());

    assert!(scheduler.schedule().shortfalls().is_empty());
    assert!(scheduler.detect_conflicts(AssignOptions::default()).is_empty());

    let schedule = scheduler.schedule();
    for person in scheduler.people() {
        let duties = schedule.duties_of(&person.id);
        for pair in duties.windows(2) {
            let (a, _) = pair[0];
            let (b, _) = pair[1];
            assert_ne!(a, b, "{} booked twice on {a}", person.name);
            assert_ne!(a.succ_opt(), Some(b), "{} on consecutive days", person.name);
        }
        assert!(person.high_load_count() <= 4);
    }

    for (_, day) in schedule.days() {
        for (_, ids) in day.slots() {
            assert_eq!(ids.len(), 1);
        }
    }
}

#[test]
fn two_people_two_weekdays() {
    let mut people = vec![
        Person::new("A", 1).consecutive(true),
        Person::new("B", 2).consecutive(true),
    ];
    // 2024-01-01 lundi, 2024-01-02 mardi
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 2), HolidaySet::new());
    let (a, b) = (people[0].id.clone(), people[1].id.clone());

    assert_eq!(schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA), &[a.clone()]);
    assert_eq!(schedule.assigned(d(2024, 1, 1), DutyType::WeekdayB), &[b.clone()]);
    // à égalité de charge, l'ancienneté la plus basse passe devant
    assert_eq!(schedule.assigned(d(2024, 1, 2), DutyType::WeekdayA), &[a]);
    assert_eq!(schedule.assigned(d(2024, 1, 2), DutyType::WeekdayB), &[b]);
    assert!(schedule.shortfalls().is_empty());
    assert_eq!(people[0].total_duty_count(), 2);
    assert_eq!(people[1].total_duty_count(), 2);
}

#[test]
fn equal_candidates_split_by_tie_break() {
    let mut people = vec![Person::new("A", 1), Person::new("B", 1)];
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 1), HolidaySet::new());

    let first = if people[0].tie_break() < people[1].tie_break() { 0 } else { 1 };
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA),
        &[people[first].id.clone()]
    );
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayB),
        &[people[1 - first].id.clone()]
    );
}

#[test]
fn unavailable_slot_stays_empty_with_single_person() {
    let mut people = vec![Person::new("solo", 1).with_unavailable(d(2024, 1, 1), DutyType::WeekdayA)];
    reset(&mut people, 5);
    let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
    let mut events: Vec<ScheduleEvent> = Vec::new();
    let mut scheduler = Scheduler::new(&mut people, range, HolidaySet::new());
    scheduler.schedule_duty_with(AssignOptions::default(), &mut events);

    let schedule = scheduler.schedule();
    assert!(schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA).is_empty());
    assert_eq!(schedule.shortfalls().len(), 1);
    assert_eq!(schedule.shortfalls()[0].duty, DutyType::WeekdayA);
    // l'indisponibilité vise le couple (date, type) : 평일B reste possible
    assert_eq!(schedule.assigned(d(2024, 1, 1), DutyType::WeekdayB).len(), 1);

    assert!(events.contains(&ScheduleEvent::Shortfall {
        date: d(2024, 1, 1),
        duty: DutyType::WeekdayA,
    }));
}

#[test]
fn unavailable_slot_goes_to_someone_else() {
    let mut people = vec![
        Person::new("busy", 1).with_unavailable(d(2024, 1, 1), DutyType::WeekdayA),
        Person::new("free", 5),
    ];
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 1), HolidaySet::new());
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA),
        &[people[1].id.clone()]
    );
}

#[test]
fn fixed_duty_beats_unavailability() {
    let mut people = vec![Person::new("stuck", 1)
        .with_fixed(d(2024, 1, 1), DutyType::WeekdayA)
        .with_unavailable(d(2024, 1, 1), DutyType::WeekdayA)];
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 1), HolidaySet::new());
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA),
        &[people[0].id.clone()]
    );
    assert_eq!(people[0].count(DutyType::WeekdayA), 1);
}

#[test]
fn fixed_duty_beats_consecutive_rule() {
    let mut people = vec![Person::new("fixed", 1)
        .with_fixed(d(2024, 1, 1), DutyType::WeekdayA)
        .with_fixed(d(2024, 1, 2), DutyType::WeekdayA)];
    reset(&mut people, 8);
    let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 2)).unwrap();
    let mut scheduler = Scheduler::new(&mut people, range, HolidaySet::new());
    scheduler.schedule_duty(AssignOptions::default());

    let id = scheduler.people()[0].id.clone();
    assert_eq!(scheduler.schedule().assigned(d(2024, 1, 2), DutyType::WeekdayA), &[id]);
    let conflicts = scheduler.detect_conflicts(AssignOptions::default());
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::ConsecutiveDays);
    assert_eq!(conflicts[0].date, d(2024, 1, 2));
}

#[test]
fn fixed_elsewhere_same_day_is_reserved() {
    let mut people = vec![
        Person::new("A", 1).with_fixed(d(2024, 1, 1), DutyType::WeekdayB),
        Person::new("B", 9),
    ];
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 1), HolidaySet::new());
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA),
        &[people[1].id.clone()]
    );
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayB),
        &[people[0].id.clone()]
    );
}

#[test]
fn fixed_slot_absent_that_day_does_not_reserve() {
    // 평일A n'existe pas un samedi : la personne reste candidate
    let mut people = vec![Person::new("solo", 1).with_fixed(d(2024, 1, 6), DutyType::WeekdayA)];
    let schedule = run(&mut people, d(2024, 1, 6), d(2024, 1, 6), HolidaySet::new());

    assert_eq!(
        schedule.assigned(d(2024, 1, 6), DutyType::HolidayA),
        &[people[0].id.clone()]
    );
    assert_eq!(schedule.shortfalls().len(), 2);
    assert_eq!(people[0].total_duty_count(), 1);
}

#[test]
fn whole_day_unavailability_blocks_every_slot() {
    let mut people = vec![
        Person::new("busy", 1).with_unavailable(d(2024, 1, 1), DutyType::WeekdayB),
        Person::new("free", 5),
    ];

    // par défaut seul 평일B est bloqué : busy prend 평일A
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 1), HolidaySet::new());
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA),
        &[people[0].id.clone()]
    );
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayB),
        &[people[1].id.clone()]
    );
    assert!(schedule.shortfalls().is_empty());

    let opts = AssignOptions {
        unavailability: UnavailabilityMatch::WholeDay,
        ..AssignOptions::default()
    };
    let schedule = run_with(&mut people, d(2024, 1, 1), d(2024, 1, 1), HolidaySet::new(), opts);
    assert_eq!(
        schedule.assigned(d(2024, 1, 1), DutyType::WeekdayA),
        &[people[1].id.clone()]
    );
    assert!(schedule.assigned(d(2024, 1, 1), DutyType::WeekdayB).is_empty());
    assert_eq!(schedule.shortfalls().len(), 1);
    assert_eq!(schedule.shortfalls()[0].duty, DutyType::WeekdayB);
    assert_eq!(people[0].total_duty_count(), 0);
}

#[test]
fn holiday_c_counts_toward_high_load_cap() {
    let mut people: Vec<Person> = team(3).into_iter().map(|p| p.consecutive(true)).collect();
    // samedi 6 -> jeudi 11, tous fériés
    let holidays: HolidaySet = (8..=11).map(|day| d(2024, 1, day)).collect();
    let opts = AssignOptions {
        high_load_cap: 1,
        ..AssignOptions::default()
    };
    let range = DateRange::new(d(2024, 1, 6), d(2024, 1, 11)).unwrap();
    reset(&mut people, 2024);
    let mut scheduler = Scheduler::new(&mut people, range, holidays);
    scheduler.schedule_duty(opts);

    for p in scheduler.people() {
        assert!(p.count(DutyType::HolidayC) <= 1, "{}", p.name);
        assert!(p.high_load_count() <= 1, "{}", p.name);
        assert_eq!(p.count(DutyType::WeekdayA), 0);
    }
    let empty_c = scheduler
        .schedule()
        .shortfalls()
        .iter()
        .filter(|s| s.duty == DutyType::HolidayC)
        .count();
    assert!(empty_c >= 3, "only {empty_c} 휴일C slot(s) left empty");
    assert!(scheduler.detect_conflicts(opts).is_empty());
}

#[test]
fn high_load_cap_leaves_slots_empty() {
    let mut people = vec![Person::new("solo", 1).consecutive(true)];
    // lundi -> vendredi
    let schedule = run(&mut people, d(2024, 1, 1), d(2024, 1, 5), HolidaySet::new());

    let solo = &people[0];
    assert_eq!(solo.count(DutyType::WeekdayA), 4);
    assert_eq!(solo.count(DutyType::WeekdayB), 1);
    assert_eq!(solo.high_load_count(), 4);
    assert!(schedule.assigned(d(2024, 1, 5), DutyType::WeekdayA).is_empty());
    assert_eq!(schedule.shortfalls().len(), 5);
}

#[test]
fn tally_matches_schedule() {
    let mut people = team(5);
    let schedule = run(&mut people, d(2024, 2, 1), d(2024, 2, 29), HolidaySet::new());
    for p in &people {
        let per_type: u32 = DutyType::ALL.iter().map(|t| p.count(*t)).sum();
        assert_eq!(per_type, p.total_duty_count());
        assert_eq!(schedule.duties_of(&p.id).len() as u32, p.total_duty_count());
    }
}

#[test]
fn reset_clears_previous_run() {
    let mut people = team(3);
    run(&mut people, d(2024, 1, 1), d(2024, 1, 7), HolidaySet::new());
    assert!(people.iter().any(|p| p.total_duty_count() > 0));

    reset(&mut people, 1);
    for p in &people {
        assert_eq!(p.total_duty_count(), 0);
        assert_eq!(p.high_load_count(), 0);
    }
}

#[test]
fn empty_roster_is_a_noop() {
    let mut people: Vec<Person> = Vec::new();
    let schedule = run(&mut people, d(2024, 1, 5), d(2024, 1, 6), HolidaySet::new());
    assert_eq!(schedule.len(), 2);
    // vendredi 2 + samedi 3
    assert_eq!(schedule.shortfalls().len(), 5);
}

#[test]
fn events_narrate_the_run() {
    let mut people = team(4);
    reset(&mut people, 3);
    let range = DateRange::new(d(2024, 1, 6), d(2024, 1, 8)).unwrap();
    let mut events: Vec<ScheduleEvent> = Vec::new();
    let mut scheduler = Scheduler::new(&mut people, range, HolidaySet::new());
    scheduler.schedule_duty_with(AssignOptions::default(), &mut events);

    let days = events
        .iter()
        .filter(|e| matches!(e, ScheduleEvent::DayStarted { .. }))
        .count();
    let slots = events
        .iter()
        .filter(|e| matches!(e, ScheduleEvent::SlotStarted { .. }))
        .count();
    let assigned = events
        .iter()
        .filter(|e| matches!(e, ScheduleEvent::Assigned { fixed: false, .. }))
        .count();
    assert_eq!(days, 3);
    assert_eq!(slots, 8);
    assert!(matches!(
        events[1],
        ScheduleEvent::SlotStarted {
            duty: DutyType::HolidayA,
            ..
        }
    ));
    // sam 3 + dim 3 + lun 2, moins les créneaux restés vides
    assert_eq!(assigned + scheduler.schedule().shortfalls().len(), 8);
}
