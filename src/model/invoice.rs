use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{timestamp, Created, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Draft => write!(f, "DRAFT"),
            InvoiceStatus::Sent => write!(f, "SENT"),
            InvoiceStatus::Paid => write!(f, "PAID"),
            InvoiceStatus::Overdue => write!(f, "OVERDUE"),
            InvoiceStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Stored invoice header as listed by the backend. Totals were computed
/// when the invoice was saved.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Invoice {
    pub id: EntityId,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub title: String,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub total: f64,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Created for Invoice {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalStatus::Draft => write!(f, "DRAFT"),
            ProposalStatus::Sent => write!(f, "SENT"),
            ProposalStatus::Accepted => write!(f, "ACCEPTED"),
            ProposalStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Proposal {
    pub id: EntityId,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub title: String,
    pub status: ProposalStatus,
    #[serde(default)]
    pub total: f64,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Created for Proposal {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
