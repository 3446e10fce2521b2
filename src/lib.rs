pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod ledger;
pub mod logging;
pub mod model;

pub use config::{Config, Item, Snapshot};
pub use dashboard::{compute_dashboard, DashboardMetrics};
pub use error::{CrmError, Result};
pub use ledger::{compute_ledger, InvoiceDraft, LedgerInput, LedgerResult, LineItem, ProposalDraft};
pub use model::{Client, Invoice, Project, Proposal, Task};
