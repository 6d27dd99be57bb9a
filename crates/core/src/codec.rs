//! Date codec: archive date ⇄ identifier prefix, and the expiry rule.
//!
//! Archive dates are plain calendar dates ([`NaiveDate`]) from the input
//! boundary onward. There is no time-of-day or offset component, so no
//! conversion can move a date across a day boundary.

use chrono::{Datelike, Days, NaiveDate};

use crate::LabelError;

/// Calendar days between the archive date and the expiry date.
pub const EXPIRY_OFFSET_DAYS: u64 = 5;

/// `strftime` pattern of every human-facing date on a label (`dd/mm/yyyy`).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Width of the identifier prefix produced by [`to_identifier_prefix`].
pub const PREFIX_LEN: usize = 6;

/// Encode `date` as the six-character `YYMMDD` identifier prefix.
///
/// The year collapses to its last two digits, so prefixes repeat every
/// 100 years. The label's identifier field has no room for a wider year.
pub fn to_identifier_prefix(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.year().rem_euclid(100),
        date.month(),
        date.day()
    )
}

/// Archive date plus [`EXPIRY_OFFSET_DAYS`] calendar days.
pub fn expiry_date(date: NaiveDate) -> Result<NaiveDate, LabelError> {
    date.checked_add_days(Days::new(EXPIRY_OFFSET_DAYS))
        .ok_or(LabelError::DateOutOfRange(date))
}

/// Expiry date for `date`, formatted as `dd/mm/yyyy`.
pub fn compute_expiry(date: NaiveDate) -> Result<String, LabelError> {
    expiry_date(date).map(format_display_date)
}

/// Format a date the way labels print it (`dd/mm/yyyy`).
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parse a `dd/mm/yyyy` label date. Returns `None` for anything else.
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DISPLAY_DATE_FORMAT).ok()
}
