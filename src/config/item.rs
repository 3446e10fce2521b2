use serde::{Deserialize, Serialize};

/// Catalog entry used to price line items by identifier
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Item {
    pub description: String,
    pub rate: f64,
    pub unit: String,
}
