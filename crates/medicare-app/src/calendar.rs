// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Date arithmetic for the appointments page.
//!
//! Month steps clamp to the last day of the target month: Jan 31 plus one
//! month is Feb 29 in a leap year and Feb 28 otherwise. Steps that leave the
//! representable calendar return `None` and callers keep the old date.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, Month, Time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

impl NavDirection {
    const fn sign(self) -> i32 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

pub fn navigate(date: Date, granularity: Granularity, direction: NavDirection) -> Option<Date> {
    let sign = direction.sign();
    match granularity {
        Granularity::Day => shift_date_by_days(date, i64::from(sign)),
        Granularity::Week => shift_date_by_days(date, i64::from(sign) * 7),
        Granularity::Month => shift_date_by_months(date, sign),
    }
}

pub fn shift_date_by_days(date: Date, days: i64) -> Option<Date> {
    date.checked_add(Duration::days(days))
}

pub fn shift_date_by_months(date: Date, months: i32) -> Option<Date> {
    let base_month = i32::from(date.month() as u8);
    let total_month = base_month - 1 + months;
    let year = date.year() + total_month.div_euclid(12);
    let month_number = (total_month.rem_euclid(12) + 1) as u8;
    let month = Month::try_from(month_number).ok()?;
    let clamped_day = date.day().min(last_day_of_month(year, month)?);
    Date::from_calendar_date(year, month, clamped_day).ok()
}

pub fn last_day_of_month(year: i32, month: Month) -> Option<u8> {
    let (next_year, next_month) = if month == Month::December {
        (year.checked_add(1)?, Month::January)
    } else {
        (year, month.next())
    };
    let first_next_month = Date::from_calendar_date(next_year, next_month, 1).ok()?;
    first_next_month.previous_day().map(|last| last.day())
}

/// Inclusive date range shown for one granularity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The day itself, its Monday-to-Sunday week, or its calendar month.
pub fn window(date: Date, granularity: Granularity) -> DateWindow {
    match granularity {
        Granularity::Day => DateWindow {
            start: date,
            end: date,
        },
        Granularity::Week => {
            let offset = i64::from(date.weekday().number_days_from_monday());
            let start = shift_date_by_days(date, -offset).unwrap_or(date);
            let end = shift_date_by_days(start, 6).unwrap_or(date);
            DateWindow { start, end }
        }
        Granularity::Month => {
            let start = date.replace_day(1).unwrap_or(date);
            let end = last_day_of_month(date.year(), date.month())
                .and_then(|day| date.replace_day(day).ok())
                .unwrap_or(date);
            DateWindow { start, end }
        }
    }
}

/// "Thursday, January 25, 2024".
pub fn format_long_date(date: Date) -> Result<String> {
    let format = format_description!("[weekday], [month repr:long] [day padding:none], [year]");
    date.format(&format)
        .with_context(|| format!("format date {date}"))
}

/// Heading for the schedule: the long date for a day, the range otherwise.
pub fn window_heading(date: Date, granularity: Granularity) -> Result<String> {
    let range = window(date, granularity);
    match granularity {
        Granularity::Day => format_long_date(date),
        Granularity::Week => {
            let format = format_description!("[month repr:short] [day padding:none], [year]");
            let start = range.start.format(&format).context("format week start")?;
            let end = range.end.format(&format).context("format week end")?;
            Ok(format!("Week of {start} - {end}"))
        }
        Granularity::Month => {
            let format = format_description!("[month repr:long] [year]");
            range.start.format(&format).context("format month heading")
        }
    }
}

pub fn format_clock(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

pub const FIRST_SLOT_HOUR: u8 = 8;
pub const LAST_SLOT_HOUR: u8 = 17;

/// Half-hour booking slots, 08:00 through 17:30.
pub fn time_slots() -> Vec<Time> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .flat_map(|hour| [0, 30].map(|minute| Time::from_hms(hour, minute, 0)))
        .filter_map(|slot| slot.ok())
        .collect()
}
