//! Dashboard metrics derived from client, project and task snapshots.

mod calendar;
mod invoices;
mod window;

pub use calendar::{month_grid, tasks_due_on, CalendarDay, CalendarMonth};
pub use invoices::{summarize_invoices, InvoiceSummary};
pub use window::{start_of_day, UpcomingWindow};

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::model::{
    Client, ClientStatus, Created, Project, ProjectStatus, Task, TaskPriority, TaskStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClientCounts {
    pub total: usize,
    pub lead: usize,
    pub active: usize,
    pub archive: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub paused: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// new + in_progress
    pub active: usize,
    pub overdue: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

/// Everything the dashboard view renders, borrowing from the input slices.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics<'a> {
    pub clients: ClientCounts,
    pub projects: ProjectCounts,
    pub tasks: TaskCounts,
    pub overdue_tasks: Vec<&'a Task>,
    pub upcoming_tasks: Vec<&'a Task>,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub recent_clients: Vec<&'a Client>,
    pub recent_projects: Vec<&'a Project>,
}

pub fn count_clients(clients: &[Client]) -> ClientCounts {
    clients.iter().fold(
        ClientCounts {
            total: clients.len(),
            ..Default::default()
        },
        |mut acc, c| {
            match c.status {
                ClientStatus::Lead => acc.lead += 1,
                ClientStatus::Active => acc.active += 1,
                ClientStatus::Archive => acc.archive += 1,
            }
            acc
        },
    )
}

pub fn count_projects(projects: &[Project]) -> ProjectCounts {
    projects.iter().fold(
        ProjectCounts {
            total: projects.len(),
            ..Default::default()
        },
        |mut acc, p| {
            match p.status {
                ProjectStatus::Active => acc.active += 1,
                ProjectStatus::Completed => acc.completed += 1,
                ProjectStatus::Paused => acc.paused += 1,
            }
            acc
        },
    )
}

pub fn count_tasks<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> TaskCounts {
    let mut counts = TaskCounts {
        total: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::New => counts.new += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
            TaskStatus::Cancelled => counts.cancelled += 1,
        }
        match task.priority {
            TaskPriority::Low => counts.low += 1,
            TaskPriority::Medium => counts.medium += 1,
            TaskPriority::High => counts.high += 1,
            TaskPriority::Critical => counts.critical += 1,
        }
        if task.status.is_active() {
            counts.active += 1;
        }
        if task.is_overdue_at(now) {
            counts.overdue += 1;
        }
    }

    counts
}

/// Open tasks whose due instant is already behind `now`, in input order.
pub fn overdue_tasks<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.is_overdue_at(now)).collect()
}

/// Sum of `our_budget`, missing budgets count as zero.
pub fn total_revenue(projects: &[Project]) -> f64 {
    projects.iter().map(|p| p.our_budget.unwrap_or(0.0)).sum()
}

/// Sum of `our_budget - ad_budget` over projects that have both.
pub fn total_profit(projects: &[Project]) -> f64 {
    projects.iter().filter_map(Project::profit).sum()
}

/// The `n` most recently created entries, newest first. Ties keep input
/// order; entries without a creation time are left out.
pub fn recent<T: Created>(items: &[T], n: usize) -> Vec<&T> {
    let mut dated: Vec<(DateTime<Utc>, &T)> = items
        .iter()
        .filter_map(|item| item.created_at().map(|at| (at, item)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.into_iter().take(n).map(|(_, item)| item).collect()
}

/// Every entry ordered newest first, undated entries last in input order.
pub fn newest_first<T: Created>(items: &[T]) -> Vec<&T> {
    let mut ordered: Vec<&T> = items.iter().collect();
    // `None` sorts below any `Some`, so reversing the comparison sinks undated entries.
    ordered.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    ordered
}

pub fn compute_dashboard<'a, Tz: TimeZone>(
    clients: &'a [Client],
    projects: &'a [Project],
    tasks: &'a [Task],
    now: &DateTime<Tz>,
    recent_limit: usize,
) -> DashboardMetrics<'a> {
    let window = UpcomingWindow::around(now);

    let metrics = DashboardMetrics {
        clients: count_clients(clients),
        projects: count_projects(projects),
        tasks: count_tasks(tasks, now),
        overdue_tasks: overdue_tasks(tasks, now),
        upcoming_tasks: window.select(tasks),
        total_revenue: total_revenue(projects),
        total_profit: total_profit(projects),
        recent_clients: recent(clients, recent_limit),
        recent_projects: recent(projects, recent_limit),
    };

    debug!(
        overdue = metrics.overdue_tasks.len(),
        upcoming = metrics.upcoming_tasks.len(),
        window_start = %window.start,
        window_end = %window.end,
        "computed dashboard"
    );

    metrics
}
