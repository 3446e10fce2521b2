mod client;
mod invoice;
mod project;
mod task;
pub mod timestamp;

pub use client::{Client, ClientStatus};
pub use invoice::{Invoice, InvoiceStatus, Proposal, ProposalStatus};
pub use project::{Project, ProjectStatus};
pub use task::{Task, TaskPriority, TaskStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifiers arrive as either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{n}"),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        EntityId::Number(value)
    }
}

/// Anything carrying a creation timestamp, used for Recent-N ordering.
pub trait Created {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}
