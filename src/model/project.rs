use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{timestamp, Created, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Paused,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "ACTIVE"),
            ProjectStatus::Completed => write!(f, "COMPLETED"),
            ProjectStatus::Paused => write!(f, "PAUSED"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Project {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_name: Option<String>,
    pub status: ProjectStatus,
    /// What the client pays us
    #[serde(default)]
    pub our_budget: Option<f64>,
    /// Ad spend passed through to platforms
    #[serde(default)]
    pub ad_budget: Option<f64>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Margin on the project, only when both budgets are known.
    pub fn profit(&self) -> Option<f64> {
        match (self.our_budget, self.ad_budget) {
            (Some(ours), Some(ads)) => Some(ours - ads),
            _ => None,
        }
    }
}

impl Created for Project {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
