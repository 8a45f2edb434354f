//! Normalization of the date phrases shown on site pages.
//!
//! Pages render publication dates in three forms: the literal "today",
//! relative phrases like "3 days ago", and absolute dates like
//! "Jan 2, 2006". All of them normalize to YYYY-MM-DD.

use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate};

/// A date phrase that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Relative phrase with a time unit other than hour, day, or week.
    UnknownUnit { unit: String, input: String },
    /// Relative phrase whose quantity is not a usable integer.
    BadQuantity { quantity: String, input: String },
    /// Text matching none of the supported date forms.
    Unparseable { input: String },
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::UnknownUnit { unit, input } => {
                write!(f, "unknown unit '{}' when parsing '{}'", unit, input)
            }
            DateError::BadQuantity { quantity, input } => {
                write!(f, "parsing quantity '{}' of time '{}'", quantity, input)
            }
            DateError::Unparseable { input } => {
                write!(f, "parsing date '{}'", input)
            }
        }
    }
}

impl std::error::Error for DateError {}

/// Normalizes a date phrase to YYYY-MM-DD, evaluated against the current
/// local time. Atomic: returns either a fully normalized date or an error,
/// never a partial value.
pub fn normalize(s: &str) -> Result<String, DateError> {
    normalize_at(Local::now(), s)
}

/// Normalizes a date phrase against an explicit "now", so relative
/// arithmetic is deterministic under test.
pub fn normalize_at(now: DateTime<Local>, s: &str) -> Result<String, DateError> {
    let date = if s == "today" {
        now.date_naive()
    } else if s.contains("ago") {
        relative_date(now, s)?
    } else {
        NaiveDate::parse_from_str(s, "%b %d, %Y").map_err(|_| DateError::Unparseable {
            input: s.to_string(),
        })?
    };
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Resolves a "<N> <unit>(s) ago" phrase. Hours subtract wall-clock hours,
/// so a large enough count crosses a date boundary; days and weeks subtract
/// calendar days.
fn relative_date(now: DateTime<Local>, s: &str) -> Result<NaiveDate, DateError> {
    let mut parts = s.split_whitespace();
    let quantity_str = parts.next().unwrap_or_default();
    let quantity: i64 = quantity_str
        .parse()
        .map_err(|_| DateError::BadQuantity {
            quantity: quantity_str.to_string(),
            input: s.to_string(),
        })?;
    let unit = parts.next().unwrap_or_default().trim_end_matches('s');

    let date = match unit {
        "hour" => Duration::try_hours(quantity)
            .and_then(|d| now.checked_sub_signed(d))
            .map(|t| t.date_naive()),
        "day" => Duration::try_days(quantity)
            .and_then(|d| now.date_naive().checked_sub_signed(d)),
        "week" => quantity
            .checked_mul(7)
            .and_then(Duration::try_days)
            .and_then(|d| now.date_naive().checked_sub_signed(d)),
        _ => {
            return Err(DateError::UnknownUnit {
                unit: unit.to_string(),
                input: s.to_string(),
            });
        }
    };

    date.ok_or_else(|| DateError::BadQuantity {
        quantity: quantity_str.to_string(),
        input: s.to_string(),
    })
}
