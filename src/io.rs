use crate::model::{DutySlot, Person};
use crate::report::{CalendarView, PersonSummary};
use crate::schedule::{person_name, Schedule};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Import de personnes depuis CSV:
/// header `name,seniority[,can_work_consecutive][,fixed][,unavailable]`.
/// Les créneaux sont séparés par `;` : `2024-01-01 평일A;2024-01-06 휴일B`.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid people row (empty name)");
        }
        let seniority: u32 = rec
            .get(1)
            .context("missing seniority")?
            .trim()
            .parse()
            .with_context(|| format!("invalid seniority for {name}"))?;
        if seniority == 0 {
            bail!("seniority must be >= 1 for {name}");
        }
        let mut person = Person::new(name, seniority);
        if let Some(flag) = rec.get(2).map(str::trim).filter(|f| !f.is_empty()) {
            person.can_work_consecutive = parse_bool(flag)
                .with_context(|| format!("invalid can_work_consecutive value for {name}"))?;
        }
        if let Some(raw) = rec.get(3) {
            person.fixed_duties = parse_slots(raw)
                .with_context(|| format!("invalid fixed duties for {name}"))?;
        }
        if let Some(raw) = rec.get(4) {
            person.unavailable = parse_slots(raw)
                .with_context(|| format!("invalid unavailable slots for {name}"))?;
        }
        out.push(person);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

pub fn parse_slots(raw: &str) -> anyhow::Result<BTreeSet<DutySlot>> {
    raw.split(';')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.parse::<DutySlot>().map_err(anyhow::Error::from))
        .collect()
}

/// Export CSV de la vue calendrier (colonnes 월요일..일요일).
pub fn export_calendar_csv<P: AsRef<Path>>(path: P, view: &CalendarView) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(CalendarView::columns())?;
    for row in view.rows() {
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV du récapitulatif par personne.
pub fn export_summary_csv<P: AsRef<Path>>(path: P, summary: &PersonSummary) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(PersonSummary::columns())?;
    for row in &summary.rows {
        w.write_record(row.cells())?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ScheduleExport<'a> {
    days: BTreeMap<String, BTreeMap<&'static str, Vec<&'a str>>>,
    shortfalls: Vec<String>,
}

/// Export JSON du planning (noms plutôt qu'identifiants).
pub fn export_schedule_json<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    people: &[Person],
) -> anyhow::Result<()> {
    let days = schedule
        .days()
        .map(|(date, day)| {
            let slots: BTreeMap<&'static str, Vec<&str>> = day
                .slots()
                .map(|(duty, ids)| {
                    let names: Vec<&str> = ids.iter().map(|id| person_name(people, id)).collect();
                    (duty.label(), names)
                })
                .collect();
            (date.format("%Y-%m-%d").to_string(), slots)
        })
        .collect();
    let shortfalls = schedule
        .shortfalls()
        .iter()
        .map(|s| DutySlot::new(s.date, s.duty).to_string())
        .collect();
    let s = serde_json::to_string_pretty(&ScheduleExport { days, shortfalls })?;
    fs::write(path, s)?;
    Ok(())
}
