use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::error::{CrmError, Result};

/// Items plus the two percentage scalars of a document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LedgerInput {
    pub items: Vec<LineItem>,
    pub discount_percent: f64,
    pub tax_percent: f64,
}

impl LedgerInput {
    /// Build an input with both percentages checked against `[0, 100]`.
    pub fn new(items: Vec<LineItem>, discount_percent: f64, tax_percent: f64) -> Result<Self> {
        check_percent("discount", discount_percent)?;
        check_percent("tax", tax_percent)?;
        Ok(Self {
            items,
            discount_percent,
            tax_percent,
        })
    }
}

pub(crate) fn check_percent(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(CrmError::InvalidPercent { field, value })
    }
}

/// Financial breakdown of a set of line items. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LedgerResult {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub taxable_base: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl LedgerResult {
    pub fn has_discount(&self) -> bool {
        self.discount_amount != 0.0
    }

    pub fn has_tax(&self) -> bool {
        self.tax_amount != 0.0
    }
}

/// Compute subtotal, discount, taxable base, tax and total.
///
/// The discount applies to the subtotal and tax applies to what is left
/// after the discount. Nothing is rounded or clamped here: inputs outside
/// the documented domain flow straight through the arithmetic.
pub fn compute_ledger(input: &LedgerInput) -> LedgerResult {
    ledger_for(&input.items, input.discount_percent, input.tax_percent)
}

pub(crate) fn ledger_for(
    items: &[LineItem],
    discount_percent: f64,
    tax_percent: f64,
) -> LedgerResult {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
    let discount_amount = subtotal * (discount_percent / 100.0);
    let taxable_base = subtotal - discount_amount;
    let tax_amount = taxable_base * (tax_percent / 100.0);
    let total = taxable_base + tax_amount;

    LedgerResult {
        subtotal,
        discount_amount,
        taxable_base,
        tax_amount,
        total,
    }
}
