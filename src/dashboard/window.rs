use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::model::{Task, TaskStatus};

/// First instant of `date` in `tz`. When a DST jump skips local midnight the
/// first local time that exists that day is used.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let mut local = date.and_time(NaiveTime::MIN);
    for _ in 0..48 {
        if let Some(dt) = tz.from_local_datetime(&local).earliest() {
            return dt;
        }
        local += Duration::minutes(30);
    }
    tz.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Closed interval from today's local midnight to tomorrow's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpcomingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl UpcomingWindow {
    pub fn around<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let start = start_of_day(&tz, today);
        let end = match today.succ_opt() {
            Some(tomorrow) => start_of_day(&tz, tomorrow),
            None => start.clone() + Duration::days(1),
        };

        Self {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Open tasks due inside the window, in input order.
    pub fn select<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
            .filter(|t| t.due_date.is_some_and(|due| self.contains(due)))
            .collect()
    }
}
