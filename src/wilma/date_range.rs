use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Day-first textual date format used by the Wilma API and the output files.
const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parses a `DD.MM.YYYY` date string into a calendar date.
///
/// Non-padded components (`1.1.2023`) are accepted; impossible calendar
/// dates (`32.01.2023`, `29.02.2023`) and malformed input are rejected.
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| AppError::InvalidDate {
        input: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Renders a calendar date back into zero-padded `DD.MM.YYYY` form.
fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Expands an inclusive start/end date pair into the ordered day sequence.
///
/// Both bounds are `DD.MM.YYYY` strings and each produced date is re-rendered
/// in the same form, zero-padded. A start after the end yields an empty
/// sequence rather than an error.
pub fn expand_date_range(start: &str, end: &str) -> AppResult<Vec<String>> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    if end < start {
        return Ok(Vec::new());
    }

    Ok(start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(format_date)
        .collect())
}
