//! Grouping transactions into days for display.

use time::Date;

use crate::locale::day_heading;

/// Consecutive items that share the same day.
#[derive(Debug, PartialEq)]
pub(crate) struct DayGroup<'a, T> {
    pub(crate) date: Option<Date>,
    /// The Spanish heading for the day, e.g. "Lun, 06 de enero de 2025".
    pub(crate) heading: String,
    pub(crate) items: Vec<&'a T>,
}

/// Group runs of consecutive `items` with the same date.
///
/// Items are expected to already be sorted by date. Items without a date
/// form their own groups with the heading "Sin fecha".
pub(crate) fn group_by_day<'a, T>(
    items: &'a [T],
    date_of: impl Fn(&T) -> Option<Date>,
) -> Vec<DayGroup<'a, T>> {
    let mut days: Vec<DayGroup<'a, T>> = Vec::new();

    for item in items {
        let date = date_of(item);

        match days.last_mut() {
            Some(current) if current.date == date => current.items.push(item),
            _ => days.push(DayGroup {
                date,
                heading: day_heading(date),
                items: vec![item],
            }),
        }
    }

    days
}
