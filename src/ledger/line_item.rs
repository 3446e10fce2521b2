use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::Item;
use crate::error::{CrmError, Result};

/// A single billable row on an invoice or proposal
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LineItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
}

impl LineItem {
    /// Build a validated line item. Quantity must be positive and the unit
    /// price non-negative; both must be finite.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: f64,
    ) -> Result<Self> {
        let name = name.into();

        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(CrmError::InvalidQuantity {
                item: name,
                qty: quantity.to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(CrmError::InvalidPrice {
                item: name,
                price: unit_price,
                reason: "must be zero or greater".to_string(),
            });
        }

        Ok(Self {
            name,
            description: None,
            quantity,
            unit: unit.into(),
            unit_price,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Parse item input like "consulting:8" into (item_id, quantity)
pub fn parse_item_input(input: &str) -> Result<(&str, f64)> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(CrmError::InvalidItemFormat(input.to_string()));
    }

    let item_id = parts[0];
    let qty_str = parts[1];

    let quantity: f64 = qty_str.parse().map_err(|_| CrmError::InvalidQuantity {
        item: item_id.to_string(),
        qty: qty_str.to_string(),
        reason: "must be a number".to_string(),
    })?;

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(CrmError::InvalidQuantity {
            item: item_id.to_string(),
            qty: qty_str.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok((item_id, quantity))
}

/// Resolve "item:quantity" inputs against the catalog, keeping input order.
pub fn line_items_from_catalog(
    inputs: &[String],
    catalog: &HashMap<String, Item>,
) -> Result<Vec<LineItem>> {
    let mut line_items = Vec::with_capacity(inputs.len());

    for input in inputs {
        let (item_id, quantity) = parse_item_input(input)?;

        let item = catalog
            .get(item_id)
            .ok_or_else(|| CrmError::ItemNotFound(item_id.to_string()))?;

        let mut line = LineItem::new(item_id, quantity, item.unit.clone(), item.rate)?;
        line.description = Some(item.description.clone());
        line_items.push(line);
    }

    Ok(line_items)
}
