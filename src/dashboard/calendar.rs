use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::Serialize;

use crate::error::{CrmError, Result};
use crate::model::Task;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub tasks: Vec<&'a Task>,
    pub is_today: bool,
    pub has_overdue: bool,
}

/// A month laid out Monday-first. Cells before the 1st are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth<'a> {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<CalendarDay<'a>>>,
}

impl<'a> CalendarMonth<'a> {
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<CalendarDay<'a>>]> {
        self.cells.chunks(7)
    }

    pub fn day(&self, day: u32) -> Option<&CalendarDay<'a>> {
        self.cells
            .iter()
            .flatten()
            .find(|cell| cell.date.day() == day)
    }
}

/// Tasks whose due instant falls on `date` in the calendar's time zone.
pub fn tasks_due_on<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| {
            t.due_date
                .is_some_and(|due| due.with_timezone(tz).date_naive() == date)
        })
        .collect()
}

pub fn month_grid<'a, Tz: TimeZone>(
    year: i32,
    month: u32,
    tasks: &'a [Task],
    now: &DateTime<Tz>,
) -> Result<CalendarMonth<'a>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CrmError::InvalidMonth(format!("{year}-{month:02}")))?;

    let tz = now.timezone();
    let today = now.date_naive();
    let leading = first.weekday().num_days_from_monday() as usize;

    let mut cells: Vec<Option<CalendarDay<'a>>> = (0..leading).map(|_| None).collect();

    for date in first.iter_days().take_while(|d| d.month() == month) {
        let day_tasks = tasks_due_on(tasks, date, &tz);
        let has_overdue = day_tasks.iter().any(|t| t.is_overdue_at(now));
        cells.push(Some(CalendarDay {
            date,
            tasks: day_tasks,
            is_today: date == today,
            has_overdue,
        }));
    }

    Ok(CalendarMonth { year, month, cells })
}
