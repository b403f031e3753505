//! Spanish date formatting for day headings and spreadsheet names.
//!
//! The names are fixed rather than taken from the operating system's locale,
//! so output does not depend on which locales the host has installed.

use time::{Date, Month, Weekday};

/// The heading used for transactions that have no date.
pub const UNDATED_DAY_HEADING: &str = "Sin fecha";

/// The sheet name used for transactions that have no date.
pub const UNDATED_SHEET_NAME: &str = "Undated";

pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "lun",
        Weekday::Tuesday => "mar",
        Weekday::Wednesday => "mié",
        Weekday::Thursday => "jue",
        Weekday::Friday => "vie",
        Weekday::Saturday => "sáb",
        Weekday::Sunday => "dom",
    }
}

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "enero",
        Month::February => "febrero",
        Month::March => "marzo",
        Month::April => "abril",
        Month::May => "mayo",
        Month::June => "junio",
        Month::July => "julio",
        Month::August => "agosto",
        Month::September => "septiembre",
        Month::October => "octubre",
        Month::November => "noviembre",
        Month::December => "diciembre",
    }
}

/// Format a date as a day heading, e.g. "Lun, 05 de enero de 2025".
///
/// Returns [UNDATED_DAY_HEADING] when there is no date.
pub fn day_heading(date: Option<Date>) -> String {
    let Some(date) = date else {
        return UNDATED_DAY_HEADING.to_owned();
    };

    let heading = format!(
        "{}, {:02} de {} de {}",
        weekday_abbreviation(date.weekday()),
        date.day(),
        month_name(date.month()),
        date.year()
    );

    capitalize_first(&heading)
}

/// Format the month of a date as a sheet name, e.g. "enero 2025".
///
/// Returns [UNDATED_SHEET_NAME] when there is no date.
pub fn month_sheet_name(date: Option<Date>) -> String {
    match date {
        Some(date) => format!("{} {}", month_name(date.month()), date.year()),
        None => UNDATED_SHEET_NAME.to_owned(),
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
