//! Projection of the task store onto the cells of a month view

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::store::TaskStore;
use crate::task::Task;

/// How many cells a month view contains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridLayout {
    /// Just enough whole weeks to cover the month (4, 5 or 6 weeks)
    FitMonth,
    /// Always six weeks (42 cells), so that the view does not change height from one month to the next
    SixWeeks,
}

impl Default for GridLayout {
    fn default() -> Self {
        GridLayout::FitMonth
    }
}

/// One day of the month view
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    /// The tasks of this day, in display order
    pub tasks: Vec<&'a Task>,
    /// Whether this day belongs to the displayed month (rather than being a padding day)
    pub is_current_month: bool,
}

/// Returns the number of days of a month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (NaiveDate::from_ymd_opt(next_year, next_month, 1), NaiveDate::from_ymd_opt(year, month, 1)) {
        (Some(next), Some(this)) => next.signed_duration_since(this).num_days() as u32,
        _ => 0,
    }
}

/// Returns the first and last days of the month of `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = date.with_day(days_in_month(date.year(), date.month())).unwrap_or(date);
    (first, last)
}

/// Move `date` by a number of months, clamping the day to the length of the target month
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.month0() as i32 + months;
    let year = date.year() + total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Returns the first and last days displayed in the month view of `reference` (weeks start on Sunday)
pub fn visible_range(reference: NaiveDate, layout: GridLayout) -> (NaiveDate, NaiveDate) {
    let (first, last) = month_bounds(reference);
    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let mut end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

    if layout == GridLayout::SixWeeks {
        while end.signed_duration_since(start).num_days() + 1 < 42 {
            end = end + Duration::weeks(1);
        }
    }
    (start, end)
}

/// Build the cells of the month view of `reference`.
///
/// This is a pure function of its inputs: it can be called again on every change.
pub fn project<'a>(reference: NaiveDate, store: &'a TaskStore, layout: GridLayout) -> Vec<CalendarCell<'a>> {
    let (start, end) = visible_range(reference, layout);

    start.iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarCell {
            date,
            tasks: store.tasks_on(date),
            is_current_month: date.month() == reference.month() && date.year() == reference.year(),
        })
        .collect()
}
