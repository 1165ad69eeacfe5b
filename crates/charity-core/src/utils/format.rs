use std::fmt::Display;

use chrono::{DateTime, Locale, TimeZone, Utc};

/// Fallback for missing or non-numeric VND amounts
pub const VND_ZERO: &str = "0 ₫";

/// Backend amounts are stored in thousands of VND
const VND_SCALE: f64 = 1000.0;

/// Relative-time units, largest first, in seconds
const RELATIVE_UNITS: [(&str, i64); 7] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    Long,
    Short,
    Numeric,
}

/// Which fields an absolute date shows, and in which locale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateFormat {
    pub month: Option<MonthStyle>,
    pub day: bool,
    pub year: bool,
    pub time: bool,
    pub locale: Locale,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            month: Some(MonthStyle::Long),
            day: true,
            year: true,
            time: false,
            locale: Locale::en_US,
        }
    }
}

impl DateFormat {
    pub fn short_date() -> Self {
        Self {
            month: Some(MonthStyle::Short),
            ..Self::default()
        }
    }

    pub fn date_time() -> Self {
        Self {
            month: Some(MonthStyle::Short),
            time: true,
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    fn pattern(&self) -> String {
        let mut pattern = match self.month {
            Some(MonthStyle::Numeric) => {
                let mut parts = vec!["%-m"];
                if self.day {
                    parts.push("%-d");
                }
                if self.year {
                    parts.push("%Y");
                }
                parts.join("/")
            }
            Some(style) => {
                let mut p = String::from(if style == MonthStyle::Long { "%B" } else { "%b" });
                if self.day {
                    p.push_str(" %-d");
                }
                if self.year {
                    p.push_str(if self.day { ", %Y" } else { " %Y" });
                }
                p
            }
            None => {
                let mut parts = Vec::new();
                if self.day {
                    parts.push("%-d");
                }
                if self.year {
                    parts.push("%Y");
                }
                parts.join(" ")
            }
        };

        if self.time {
            if !pattern.is_empty() {
                pattern.push_str(", ");
            }
            pattern.push_str("%-I:%M %p");
        }
        pattern
    }
}

/// Format a date with the given field set
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &DateFormat) -> String
where
    Tz::Offset: Display,
{
    date.format_localized(&format.pattern(), format.locale).to_string()
}

/// "Oct 14, 2026"
pub fn format_short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format_date(date, &DateFormat::short_date())
}

/// "Oct 14, 2026, 3:05 PM"
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format_date(date, &DateFormat::date_time())
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// "3 hours ago". Future dates are shown as an absolute date-time.
pub fn relative_time_at<Tz: TimeZone>(date: &DateTime<Tz>, now: DateTime<Utc>) -> String
where
    Tz::Offset: Display,
{
    let delta = now - date.with_timezone(&Utc);
    if delta.num_milliseconds() < 0 {
        return format_date_time(date);
    }

    let seconds = delta.num_seconds();
    for (unit, unit_seconds) in RELATIVE_UNITS {
        let count = seconds / unit_seconds;
        if count >= 1 {
            return format!("{} ago", plural(count, unit));
        }
    }
    "just now".to_string()
}

pub fn relative_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    relative_time_at(date, Utc::now())
}

pub fn is_past_date_at<Tz: TimeZone>(date: &DateTime<Tz>, now: DateTime<Utc>) -> bool {
    date.with_timezone(&Utc) < now
}

pub fn is_past_date<Tz: TimeZone>(date: &DateTime<Tz>) -> bool {
    is_past_date_at(date, Utc::now())
}

/// Countdown to `end`: days, else hours, else minutes. "Ended" once passed.
pub fn time_remaining_at<Tz: TimeZone>(end: DateTime<Tz>, now: DateTime<Utc>) -> String {
    let remaining = end.with_timezone(&Utc) - now;
    if remaining.num_milliseconds() <= 0 {
        return "Ended".to_string();
    }

    let days = remaining.num_days();
    if days > 0 {
        return format!("{} left", plural(days, "day"));
    }
    let hours = remaining.num_hours();
    if hours > 0 {
        return format!("{} left", plural(hours, "hour"));
    }
    let minutes = remaining.num_minutes();
    if minutes > 0 {
        return format!("{} left", plural(minutes, "minute"));
    }
    "Less than a minute left".to_string()
}

pub fn time_remaining<Tz: TimeZone>(end: DateTime<Tz>) -> String {
    time_remaining_at(end, Utc::now())
}

/// Group an integer's digits in threes
fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Round to a whole number and split sign from magnitude
fn whole_parts(amount: f64) -> (bool, u64) {
    let rounded = amount.round();
    (rounded < 0.0, rounded.abs() as u64)
}

/// US dollars with no fractional digits: "$1,235". Non-finite input shows "$0".
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let (negative, whole) = whole_parts(amount);
    let sign = if negative && whole > 0 { "-" } else { "" };
    format!("{}${}", sign, group_digits(whole, ','))
}

/// VND display for an amount stored in thousands: `Some(5.0)` is "5.000 ₫".
pub fn format_vnd(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(a) if a.is_finite() => a,
        _ => return VND_ZERO.to_string(),
    };
    let (negative, whole) = whole_parts(amount * VND_SCALE);
    let sign = if negative && whole > 0 { "-" } else { "" };
    format!("{}{} ₫", sign, group_digits(whole, '.'))
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        s.chars().take(max_chars).collect()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
