use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;

use crm::dashboard::{
    compute_dashboard, newest_first, recent, start_of_day, summarize_invoices, total_profit,
    total_revenue, UpcomingWindow,
};
use crm::model::{
    timestamp::parse_timestamp, Client, ClientStatus, EntityId, Invoice, InvoiceStatus, Project,
    ProjectStatus, Task, TaskPriority, TaskStatus,
};

fn at(raw: &str) -> DateTime<Utc> {
    parse_timestamp(raw).unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn client(id: u64, status: ClientStatus, created: Option<&str>) -> Client {
    Client {
        id: EntityId::from(id),
        name: format!("Client {id}"),
        contact_person: None,
        status,
        created_at: created.map(at),
    }
}

fn project(id: u64, our: Option<f64>, ads: Option<f64>) -> Project {
    Project {
        id: EntityId::from(id),
        name: format!("Project {id}"),
        client_name: None,
        status: ProjectStatus::Active,
        our_budget: our,
        ad_budget: ads,
        created_at: None,
    }
}

fn task(id: u64, status: TaskStatus, due: Option<&str>) -> Task {
    Task {
        id: EntityId::from(id),
        title: format!("Task {id}"),
        project_name: None,
        status,
        priority: TaskPriority::Medium,
        due_date: due.map(at),
        created_at: None,
    }
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.to_string()).collect()
}

#[test]
fn test_empty_collections() {
    let metrics = compute_dashboard(&[], &[], &[], &now(), 5);

    assert_eq!(metrics.clients.total, 0);
    assert_eq!(metrics.projects.total, 0);
    assert_eq!(metrics.tasks.total, 0);
    assert!(metrics.overdue_tasks.is_empty());
    assert!(metrics.upcoming_tasks.is_empty());
    assert!(metrics.recent_clients.is_empty());
    assert!(metrics.recent_projects.is_empty());
    assert_eq!(metrics.total_revenue, 0.0);
    assert_eq!(metrics.total_profit, 0.0);
}

#[test]
fn test_status_counts() {
    let clients = vec![
        client(1, ClientStatus::Active, None),
        client(2, ClientStatus::Active, None),
        client(3, ClientStatus::Lead, None),
        client(4, ClientStatus::Archive, None),
    ];
    let mut projects = vec![project(1, None, None), project(2, None, None), project(3, None, None)];
    projects[1].status = ProjectStatus::Completed;
    projects[2].status = ProjectStatus::Paused;
    let mut tasks = vec![
        task(1, TaskStatus::New, None),
        task(2, TaskStatus::InProgress, None),
        task(3, TaskStatus::Completed, None),
        task(4, TaskStatus::Cancelled, None),
    ];
    tasks[0].priority = TaskPriority::Critical;
    tasks[3].priority = TaskPriority::Low;

    let metrics = compute_dashboard(&clients, &projects, &tasks, &now(), 5);

    assert_eq!(metrics.clients.active, 2);
    assert_eq!(metrics.clients.lead, 1);
    assert_eq!(metrics.clients.archive, 1);
    assert_eq!(metrics.projects.active, 1);
    assert_eq!(metrics.projects.completed, 1);
    assert_eq!(metrics.projects.paused, 1);
    assert_eq!(metrics.tasks.active, 2);
    assert_eq!(metrics.tasks.new, 1);
    assert_eq!(metrics.tasks.in_progress, 1);
    assert_eq!(metrics.tasks.completed, 1);
    assert_eq!(metrics.tasks.cancelled, 1);
    assert_eq!(metrics.tasks.critical, 1);
    assert_eq!(metrics.tasks.medium, 2);
    assert_eq!(metrics.tasks.low, 1);
}

#[test]
fn test_overdue_detection() {
    let tasks = vec![
        task(1, TaskStatus::InProgress, Some("2026-01-14T12:00:00Z")),
        task(2, TaskStatus::Completed, Some("2026-01-14T12:00:00Z")),
        task(3, TaskStatus::New, None),
        task(4, TaskStatus::New, Some("2026-01-16T12:00:00Z")),
        // due earlier today: the due instant has passed
        task(5, TaskStatus::New, Some("2026-01-15T09:00:00Z")),
        task(6, TaskStatus::Cancelled, Some("2026-01-01")),
    ];

    let metrics = compute_dashboard(&[], &[], &tasks, &now(), 5);

    assert_eq!(ids(&metrics.overdue_tasks), vec!["1", "5", "6"]);
    assert_eq!(metrics.tasks.overdue, 3);
    assert!(tasks[0].is_overdue_at(&now()));
    assert!(!tasks[1].is_overdue_at(&now()));
}

#[test]
fn test_due_exactly_now_is_not_overdue() {
    let tasks = vec![task(1, TaskStatus::New, Some("2026-01-15T12:00:00Z"))];
    let metrics = compute_dashboard(&[], &[], &tasks, &now(), 5);
    assert!(metrics.overdue_tasks.is_empty());
}

#[test]
fn test_upcoming_window_bounds() {
    let tomorrow_midnight = at("2026-01-16T00:00:00Z");
    let tasks = vec![
        task(1, TaskStatus::New, Some("2026-01-15T00:00:00Z")),
        task(2, TaskStatus::New, Some("2026-01-16T00:00:00Z")),
        task(3, TaskStatus::New, None),
        task(4, TaskStatus::Completed, Some("2026-01-15T18:00:00Z")),
        task(5, TaskStatus::InProgress, Some("2026-01-14T23:59:59Z")),
        task(6, TaskStatus::New, Some("2026-01-15T18:00:00Z")),
    ];
    let mut just_after = task(7, TaskStatus::New, None);
    just_after.due_date = Some(tomorrow_midnight + Duration::milliseconds(1));
    let mut tasks = tasks;
    tasks.push(just_after);

    let metrics = compute_dashboard(&[], &[], &tasks, &now(), 5);

    assert_eq!(ids(&metrics.upcoming_tasks), vec!["1", "2", "6"]);
}

#[test]
fn test_upcoming_window_follows_time_zone_of_now() {
    let moscow = FixedOffset::east_opt(3 * 3600).unwrap();
    // 01:00 local on the 15th is still the 14th in UTC
    let now = moscow.with_ymd_and_hms(2026, 1, 15, 1, 0, 0).unwrap();
    let window = UpcomingWindow::around(&now);

    assert_eq!(window.start, at("2026-01-14T21:00:00Z"));
    assert_eq!(window.end, at("2026-01-15T21:00:00Z"));
    assert!(window.contains(at("2026-01-14T22:00:00Z")));
    assert!(!window.contains(at("2026-01-14T20:59:59Z")));
}

#[test]
fn test_revenue_and_profit() {
    let projects = vec![
        project(1, Some(100000.0), None),
        project(2, Some(50000.0), Some(20000.0)),
        project(3, None, Some(5000.0)),
        project(4, None, None),
    ];

    assert_eq!(total_revenue(&projects), 150000.0);
    assert_eq!(total_profit(&projects), 30000.0);
}

#[test]
fn test_budget_only_project_adds_no_profit() {
    let projects = vec![project(1, Some(100000.0), None)];
    let metrics = compute_dashboard(&[], &projects, &[], &now(), 5);

    assert_eq!(metrics.total_revenue, 100000.0);
    assert_eq!(metrics.total_profit, 0.0);
}

#[test]
fn test_recent_clients_newest_first() {
    let clients: Vec<Client> = (1..=7)
        .map(|day| {
            let created = format!("2026-01-{:02}T10:00:00Z", day);
            client(day, ClientStatus::Lead, Some(&created))
        })
        .collect();

    let metrics = compute_dashboard(&clients, &[], &[], &now(), 5);
    let got: Vec<String> = metrics.recent_clients.iter().map(|c| c.id.to_string()).collect();

    assert_eq!(got, vec!["7", "6", "5", "4", "3"]);
}

#[test]
fn test_recent_ties_keep_input_order_and_skip_undated() {
    let clients = vec![
        client(1, ClientStatus::Lead, Some("2026-01-10")),
        client(2, ClientStatus::Lead, None),
        client(3, ClientStatus::Lead, Some("2026-01-12")),
        client(4, ClientStatus::Lead, Some("2026-01-10")),
    ];

    let got: Vec<String> = recent(&clients, 10).iter().map(|c| c.id.to_string()).collect();
    assert_eq!(got, vec!["3", "1", "4"]);

    assert!(recent(&clients, 0).is_empty());
}

#[test]
fn test_newest_first_keeps_undated_at_the_end() {
    let clients = vec![
        client(1, ClientStatus::Lead, None),
        client(2, ClientStatus::Lead, Some("2026-01-10")),
        client(3, ClientStatus::Lead, None),
        client(4, ClientStatus::Lead, Some("2026-01-12")),
        client(5, ClientStatus::Lead, Some("2026-01-10")),
    ];

    let got: Vec<String> = newest_first(&clients).iter().map(|c| c.id.to_string()).collect();
    assert_eq!(got, vec!["4", "2", "5", "1", "3"]);
}

#[test]
fn test_dashboard_is_idempotent() {
    let clients = vec![client(1, ClientStatus::Active, Some("2026-01-02"))];
    let projects = vec![project(1, Some(0.1), Some(0.3)), project(2, Some(0.7), None)];
    let tasks = vec![
        task(1, TaskStatus::New, Some("2026-01-14")),
        task(2, TaskStatus::New, Some("2026-01-15T20:00:00Z")),
    ];

    let first = compute_dashboard(&clients, &projects, &tasks, &now(), 5);
    let second = compute_dashboard(&clients, &projects, &tasks, &now(), 5);

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_malformed_dates_are_absent() {
    let task: Task = toml::from_str(
        r#"
id = 9
title = "Broken"
status = "new"
priority = "high"
due_date = "tomorrow-ish"
created_at = "2026-01-10T08:00:00"
"#,
    )
    .unwrap();

    assert_eq!(task.due_date, None);
    assert_eq!(task.created_at, Some(at("2026-01-10T08:00:00Z")));
    assert!(!task.is_overdue_at(&now()));
}

#[test]
fn test_native_toml_datetimes() {
    let task: Task = toml::from_str(
        r#"
id = 10
title = "Unquoted dates"
status = "in_progress"
priority = "low"
due_date = 2026-01-15T10:00:00Z
created_at = 2026-01-10
"#,
    )
    .unwrap();

    assert_eq!(task.due_date, Some(at("2026-01-15T10:00:00Z")));
    assert_eq!(task.created_at, Some(at("2026-01-10T00:00:00Z")));
    assert!(task.is_overdue_at(&now()));
}

#[test]
fn test_start_of_day_skips_missing_midnight() {
    // Sao Paulo moved clocks from 00:00 to 01:00 on 2018-11-04
    let date = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap();
    let start = start_of_day(&Sao_Paulo, date);

    assert_eq!(start.with_timezone(&Utc), at("2018-11-04T03:00:00Z"));
    assert_eq!(start.date_naive(), date);
}

#[test]
fn test_upcoming_window_across_dst_gap() {
    let now = Sao_Paulo.with_ymd_and_hms(2018, 11, 4, 12, 0, 0).unwrap();
    let window = UpcomingWindow::around(&now);

    // 01:00 -02:00 on the gap day to 00:00 -02:00 the next day
    assert_eq!(window.start, at("2018-11-04T03:00:00Z"));
    assert_eq!(window.end, at("2018-11-05T02:00:00Z"));
}

#[test]
fn test_invoice_summary() {
    let invoice = |id: u64, status: InvoiceStatus, total: f64| Invoice {
        id: EntityId::from(id),
        invoice_number: format!("INV-{id}"),
        title: String::new(),
        status,
        total,
        created_at: None,
    };
    let invoices = vec![
        invoice(1, InvoiceStatus::Paid, 1000.0),
        invoice(2, InvoiceStatus::Sent, 500.0),
        invoice(3, InvoiceStatus::Overdue, 250.0),
        invoice(4, InvoiceStatus::Draft, 100.0),
        invoice(5, InvoiceStatus::Cancelled, 50.0),
    ];

    let summary = summarize_invoices(&invoices);

    assert_eq!(summary.count, 5);
    assert_eq!(summary.total, 1900.0);
    assert_eq!(summary.paid, 1000.0);
    assert_eq!(summary.pending, 500.0);
    assert_eq!(summary.overdue, 250.0);
}
