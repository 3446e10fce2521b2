use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{timestamp, Created, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Lead,
    Active,
    Archive,
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientStatus::Lead => write!(f, "LEAD"),
            ClientStatus::Active => write!(f, "ACTIVE"),
            ClientStatus::Archive => write!(f, "ARCHIVE"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Client {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    pub status: ClientStatus,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Created for Client {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}
