//! Calendar date parsing and request-window validation.
//!
//! User-facing dates are textual day/month/year; the coin listing page
//! carries `Mon D, YYYY` dates and its URL wants compact `YYYYMMDD` stamps.

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

/// Parse a `day/month/year` date ("28/04/2013").
pub fn parse_dmy(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), format_description!("[day]/[month]/[year]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: input.to_owned(),
        }
    })
}

/// Format a date back to `day/month/year`, as used in coverage notices.
pub fn format_dmy(date: Date) -> String {
    date.format(format_description!("[day]/[month]/[year]"))
        .expect("d/m/Y must be formattable")
}

/// Parse a listing-page date cell ("Apr 28, 2013").
pub fn parse_page_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(
        input.trim(),
        format_description!("[month repr:short] [day padding:none], [year]"),
    )
    .map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Compact `YYYYMMDD` stamp for the listing-page query string.
pub fn format_compact(date: Date) -> String {
    date.format(format_description!("[year][month][day]"))
        .expect("compact date must be formattable")
}

/// Midnight UTC for a calendar date.
pub fn midnight_utc(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

/// Reject windows where the end precedes the start or either endpoint lies
/// in the future relative to `now`.
pub fn validate_window(
    start: OffsetDateTime,
    end: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), ValidationError> {
    if end.unix_timestamp() < start.unix_timestamp() {
        return Err(ValidationError::EndBeforeStart {
            start: start.date().to_string(),
            end: end.date().to_string(),
        });
    }
    if start > now {
        return Err(ValidationError::FutureDate {
            value: start.date().to_string(),
        });
    }
    if end > now {
        return Err(ValidationError::FutureDate {
            value: end.date().to_string(),
        });
    }
    Ok(())
}
