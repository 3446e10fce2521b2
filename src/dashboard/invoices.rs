use serde::Serialize;

use crate::model::{Invoice, InvoiceStatus};

/// Money totals shown above the invoice list
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InvoiceSummary {
    pub count: usize,
    pub total: f64,
    pub paid: f64,
    /// Sent and awaiting payment
    pub pending: f64,
    pub overdue: f64,
}

pub fn summarize_invoices(invoices: &[Invoice]) -> InvoiceSummary {
    invoices.iter().fold(
        InvoiceSummary {
            count: invoices.len(),
            ..Default::default()
        },
        |mut acc, inv| {
            acc.total += inv.total;
            match inv.status {
                InvoiceStatus::Paid => acc.paid += inv.total,
                InvoiceStatus::Sent => acc.pending += inv.total,
                InvoiceStatus::Overdue => acc.overdue += inv.total,
                InvoiceStatus::Draft | InvoiceStatus::Cancelled => {}
            }
            acc
        },
    )
}
