use serde::{Deserialize, Serialize};

use crate::model::{Client, Invoice, Project, Proposal, Task};

/// Entity lists exported from the backend, one TOML file per resource.
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub invoices: Vec<Invoice>,
    pub proposals: Vec<Proposal>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub(crate) struct ClientsFile {
    #[serde(default)]
    pub clients: Vec<Client>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub(crate) struct ProjectsFile {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub(crate) struct TasksFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub(crate) struct InvoicesFile {
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub(crate) struct ProposalsFile {
    #[serde(default)]
    pub proposals: Vec<Proposal>,
}
