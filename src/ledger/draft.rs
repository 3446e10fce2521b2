use serde::{Deserialize, Serialize};

use super::calculator::{check_percent, ledger_for};
use super::{LedgerResult, LineItem};
use crate::error::{CrmError, Result};

/// An invoice being composed: discount first, then tax on the remainder.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InvoiceDraft {
    pub items: Vec<LineItem>,
    pub discount_percent: f64,
    pub tax_percent: f64,
}

impl InvoiceDraft {
    pub fn new(items: Vec<LineItem>, discount_percent: f64, tax_percent: f64) -> Self {
        Self {
            items,
            discount_percent,
            tax_percent,
        }
    }

    /// Checks required before the invoice can be submitted.
    pub fn validate(&self) -> Result<()> {
        validate_items(&self.items, false)?;
        check_percent("discount", self.discount_percent)?;
        check_percent("tax", self.tax_percent)
    }

    pub fn ledger(&self) -> LedgerResult {
        ledger_for(&self.items, self.discount_percent, self.tax_percent)
    }
}

/// A commercial proposal. Proposals are quoted without tax.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProposalDraft {
    pub items: Vec<LineItem>,
    pub discount_percent: f64,
}

impl ProposalDraft {
    pub fn new(items: Vec<LineItem>, discount_percent: f64) -> Self {
        Self {
            items,
            discount_percent,
        }
    }

    /// Every proposal row needs a name and a positive price.
    pub fn validate(&self) -> Result<()> {
        validate_items(&self.items, true)?;
        check_percent("discount", self.discount_percent)
    }

    pub fn ledger(&self) -> LedgerResult {
        ledger_for(&self.items, self.discount_percent, 0.0)
    }
}

fn validate_items(items: &[LineItem], require_price: bool) -> Result<()> {
    if items.is_empty() {
        return Err(CrmError::NoItems);
    }

    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(CrmError::BlankItemName(idx + 1));
        }
        if !item.quantity.is_finite() || item.quantity <= 0.0 {
            return Err(CrmError::InvalidQuantity {
                item: item.name.clone(),
                qty: item.quantity.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        let price_ok = if require_price {
            item.unit_price > 0.0
        } else {
            item.unit_price >= 0.0
        };
        if !item.unit_price.is_finite() || !price_ok {
            return Err(CrmError::InvalidPrice {
                item: item.name.clone(),
                price: item.unit_price,
                reason: if require_price {
                    "must be greater than 0".to_string()
                } else {
                    "must be zero or greater".to_string()
                },
            });
        }
    }

    Ok(())
}
