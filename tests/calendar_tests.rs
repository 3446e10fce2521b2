use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crm::dashboard::{month_grid, tasks_due_on};
use crm::model::{timestamp::parse_timestamp, EntityId, Task, TaskPriority, TaskStatus};
use crm::CrmError;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn task(id: u64, status: TaskStatus, due: &str) -> Task {
    Task {
        id: EntityId::from(id),
        title: format!("Task {id}"),
        project_name: None,
        status,
        priority: TaskPriority::High,
        due_date: parse_timestamp(due),
        created_at: None,
    }
}

#[test]
fn test_month_starts_on_monday_grid() {
    // 1 January 2026 is a Thursday
    let grid = month_grid(2026, 1, &[], &now()).unwrap();

    assert_eq!(grid.cells.len(), 3 + 31);
    assert!(grid.cells[..3].iter().all(Option::is_none));
    let first = grid.cells[3].as_ref().unwrap();
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    assert_eq!(grid.weeks().count(), 5);
}

#[test]
fn test_days_carry_tasks_and_flags() {
    let tasks = vec![
        task(1, TaskStatus::InProgress, "2026-01-14T10:00:00Z"),
        task(2, TaskStatus::Completed, "2026-01-13T10:00:00Z"),
        task(3, TaskStatus::New, "2026-01-16T09:00:00Z"),
        task(4, TaskStatus::New, "2026-01-16T17:00:00Z"),
        task(5, TaskStatus::New, "2026-02-01T09:00:00Z"),
    ];

    let grid = month_grid(2026, 1, &tasks, &now()).unwrap();

    let day14 = grid.day(14).unwrap();
    assert_eq!(day14.tasks.len(), 1);
    assert!(day14.has_overdue);

    let day13 = grid.day(13).unwrap();
    assert_eq!(day13.tasks.len(), 1);
    assert!(!day13.has_overdue);

    let day16 = grid.day(16).unwrap();
    assert_eq!(day16.tasks.len(), 2);
    assert!(!day16.has_overdue);

    assert!(grid.day(15).unwrap().is_today);
    assert!(!grid.day(16).unwrap().is_today);

    let in_month: usize = grid.cells.iter().flatten().map(|d| d.tasks.len()).sum();
    assert_eq!(in_month, 4);
}

#[test]
fn test_tasks_due_on_uses_calendar_time_zone() {
    let tasks = vec![task(1, TaskStatus::New, "2026-01-15T22:30:00Z")];
    let utc_day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let local_day = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
    let moscow = chrono::FixedOffset::east_opt(3 * 3600).unwrap();

    assert_eq!(tasks_due_on(&tasks, utc_day, &Utc).len(), 1);
    assert_eq!(tasks_due_on(&tasks, utc_day, &moscow).len(), 0);
    assert_eq!(tasks_due_on(&tasks, local_day, &moscow).len(), 1);
}

#[test]
fn test_invalid_month() {
    assert!(matches!(
        month_grid(2026, 13, &[], &now()),
        Err(CrmError::InvalidMonth(_))
    ));
}
