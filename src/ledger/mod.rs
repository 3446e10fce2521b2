//! Line-item ledger shared by the invoice and proposal builders.

mod calculator;
mod draft;
mod line_item;

pub use calculator::{compute_ledger, LedgerInput, LedgerResult};
pub use draft::{InvoiceDraft, ProposalDraft};
pub use line_item::{line_items_from_catalog, parse_item_input, LineItem};
