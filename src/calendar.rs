use crate::model::{DutySlot, DutyType};
use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

pub const WEEKDAY_DUTIES: [DutyType; 2] = [DutyType::WeekdayA, DutyType::WeekdayB];
pub const HOLIDAY_DUTIES: [DutyType; 3] = [DutyType::HolidayA, DutyType::HolidayB, DutyType::HolidayC];

/// Nature d'une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Weekday,
    Holiday,
}

impl DayKind {
    pub fn label(self) -> &'static str {
        match self {
            DayKind::Weekday => "평일",
            DayKind::Holiday => "휴일",
        }
    }

    pub fn duties(self) -> &'static [DutyType] {
        match self {
            DayKind::Weekday => &WEEKDAY_DUTIES,
            DayKind::Holiday => &HOLIDAY_DUTIES,
        }
    }
}

/// Jours fériés en plus des week-ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse des dates `YYYY-MM-DD`.
    pub fn parse<I, S>(raw: I) -> Result<Self, SchedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|s| {
                let s = s.as_ref().trim();
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| SchedError::InvalidDate(s.to_string()))
            })
            .collect()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Intervalle fermé [start, end].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SchedError> {
        if end < start {
            return Err(SchedError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Jours de l'intervalle, dans l'ordre croissant.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

pub fn is_holiday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || holidays.contains(date)
}

pub fn day_kind(date: NaiveDate, holidays: &HolidaySet) -> DayKind {
    if is_holiday(date, holidays) {
        DayKind::Holiday
    } else {
        DayKind::Weekday
    }
}

/// Types de garde applicables à `date`, dans l'ordre d'attribution.
pub fn duty_types_for(date: NaiveDate, holidays: &HolidaySet) -> &'static [DutyType] {
    day_kind(date, holidays).duties()
}

/// Tous les créneaux de la période (choix possibles pour gardes fixes / indisponibilités).
pub fn all_duty_slots(range: &DateRange, holidays: &HolidaySet) -> Vec<DutySlot> {
    range
        .days()
        .flat_map(|date| {
            duty_types_for(date, holidays)
                .iter()
                .map(move |duty| DutySlot::new(date, *duty))
        })
        .collect()
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}
