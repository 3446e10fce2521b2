use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{timestamp, Created, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Counted as "in work" on the dashboard
    pub fn is_active(self) -> bool {
        matches!(self, TaskStatus::New | TaskStatus::InProgress)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::New => write!(f, "NEW"),
            TaskStatus::InProgress => write!(f, "IN PROGRESS"),
            TaskStatus::Completed => write!(f, "COMPLETED"),
            TaskStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Task {
    pub id: EntityId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub project_name: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// A task is overdue once `now` has passed its due instant and it is not
    /// completed. Tasks without a due date are never overdue.
    pub fn is_overdue_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        match self.due_date {
            Some(due) if self.status != TaskStatus::Completed => due < now.with_timezone(&Utc),
            _ => false,
        }
    }
}

impl Created for Task {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
