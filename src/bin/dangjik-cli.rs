#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use dangjik::{
    all_duty_slots, io,
    model::{DutySlot, Person},
    scheduler::{AssignOptions, ConflictKind, Scheduler, UnavailabilityMatch},
    storage::{JsonStorage, Storage},
    DateRange, HolidaySet, TieBreakRng,
};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des personnes
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter une personne
    AddPerson {
        #[arg(long)]
        name: String,
        /// Plus bas = plus prioritaire
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        seniority: u32,
        /// Autorise deux jours de garde d'affilée
        #[arg(long)]
        consecutive: bool,
        /// Garde fixe "YYYY-MM-DD 평일A" (répétable)
        #[arg(long)]
        fixed: Vec<String>,
        /// Créneau impossible "YYYY-MM-DD 휴일B" (répétable)
        #[arg(long)]
        unavailable: Vec<String>,
    },

    /// Importer des personnes depuis un CSV
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Retirer une personne par son nom
    RemovePerson {
        #[arg(long)]
        name: String,
    },

    /// Lister les personnes et leurs contraintes
    List,

    /// Générer le planning d'une période
    Generate {
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        end: String,
        /// Jour férié en plus des week-ends (répétable)
        #[arg(long)]
        holiday: Vec<String>,
        /// Graine du tirage de départage (reproductible)
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 4)]
        high_load_cap: u32,
        /// Une indisponibilité bloque toute la journée
        #[arg(long)]
        whole_day_unavailability: bool,
        #[arg(long)]
        out_calendar: Option<String>,
        #[arg(long)]
        out_summary: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster);
    let mut roster = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::AddPerson {
            name,
            seniority,
            consecutive,
            fixed,
            unavailable,
        } => {
            let mut person = Person::new(name, seniority).consecutive(consecutive);
            person.fixed_duties = parse_slot_args(&fixed)?;
            person.unavailable = parse_slot_args(&unavailable)?;
            roster.people.push(person);
            storage.save(&roster)?;
            0
        }
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            println!("{} person(s) imported", people.len());
            roster.people.extend(people);
            storage.save(&roster)?;
            0
        }
        Commands::RemovePerson { name } => {
            if roster.remove_person_by_name(&name) == 0 {
                bail!("unknown person: {name}");
            }
            storage.save(&roster)?;
            0
        }
        Commands::List => {
            for p in &roster.people {
                println!(
                    "{} | 연차 {} | 연속 {} | 고정 [{}] | 불가 [{}]",
                    p.name,
                    p.seniority,
                    if p.can_work_consecutive { "O" } else { "X" },
                    p.fixed_duties_as_strings().join(", "),
                    p.unavailable_as_strings().join(", ")
                );
            }
            0
        }
        Commands::Generate {
            start,
            end,
            holiday,
            seed,
            high_load_cap,
            whole_day_unavailability,
            out_calendar,
            out_summary,
            out_json,
        } => {
            let range = DateRange::new(parse_date(&start)?, parse_date(&end)?)?;
            let holidays = HolidaySet::parse(&holiday)?;
            if roster.people.is_empty() {
                bail!("aucune personne dans le roster : ajoutez-en avant de générer");
            }
            warn_unknown_slots(&roster.people, &range, &holidays);

            let opts = AssignOptions {
                high_load_cap,
                unavailability: if whole_day_unavailability {
                    UnavailabilityMatch::WholeDay
                } else {
                    UnavailabilityMatch::Slot
                },
            };
            let mut rng = seed.map_or_else(TieBreakRng::from_entropy, TieBreakRng::seeded);
            roster.reset_tallies(&mut rng);

            let mut scheduler = Scheduler::new(&mut roster.people, range, holidays);
            scheduler.schedule_duty(opts);

            print!("{}", scheduler.schedule().to_text(scheduler.people()));

            if let Some(path) = out_calendar {
                io::export_calendar_csv(path, &scheduler.calendar_view())?;
            }
            if let Some(path) = out_summary {
                io::export_summary_csv(path, &scheduler.person_summary())?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, scheduler.schedule(), scheduler.people())?;
            }

            for c in scheduler.detect_conflicts(opts) {
                let name = scheduler
                    .people()
                    .iter()
                    .find(|p| p.id == c.person)
                    .map_or("?", |p| p.name.as_str());
                let kind = match c.kind {
                    ConflictKind::DoubleBooking => "double",
                    ConflictKind::ConsecutiveDays => "consecutive",
                    ConflictKind::HighLoadExceeded => "high-load",
                };
                eprintln!("conflict: {name} {} ({kind})", c.date);
            }

            let shortfalls = scheduler.schedule().shortfalls();
            if shortfalls.is_empty() {
                0
            } else {
                eprintln!("Warning: {} slot(s) left empty", shortfalls.len());
                for s in shortfalls {
                    eprintln!("  {}", DutySlot::new(s.date, s.duty));
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw} (expected YYYY-MM-DD)"))
}

fn parse_slot_args(raw: &[String]) -> Result<BTreeSet<DutySlot>> {
    raw.iter()
        .map(|s| s.parse::<DutySlot>().map_err(anyhow::Error::from))
        .collect()
}

/// Signale les créneaux saisis qui n'existent pas sur la période (ex. 평일A un samedi).
fn warn_unknown_slots(people: &[Person], range: &DateRange, holidays: &HolidaySet) {
    let valid: BTreeSet<DutySlot> = all_duty_slots(range, holidays).into_iter().collect();
    for p in people {
        for slot in p.fixed_duties.iter().chain(p.unavailable.iter()) {
            if range.contains(slot.date) && !valid.contains(slot) {
                eprintln!("Warning: {} has {} which is not a duty of that day", p.name, slot);
            }
        }
    }
}
