use chrono::{DateTime, Local, NaiveDate, Utc};

/// Date format used for execution dates entered by the user.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for dates shown to the user (Swiss style).
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Today's date in the local timezone. Default execution date of a draft
/// and the earliest date a transfer may be scheduled for.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parses a `YYYY-MM-DD` date as typed in the transfer form.
pub fn parse_input_date(value: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT)
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
