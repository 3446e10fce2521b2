use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Config directory not found at {0}. Run 'crm init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Item '{0}' not found in items.toml")]
    ItemNotFound(String),

    #[error("Invalid item format '{0}'. Expected 'item:quantity' (e.g., 'consulting:8')")]
    InvalidItemFormat(String),

    #[error("Invalid quantity '{qty}' for item '{item}': {reason}")]
    InvalidQuantity {
        item: String,
        qty: String,
        reason: String,
    },

    #[error("Invalid price {price} for item '{item}': {reason}")]
    InvalidPrice {
        item: String,
        price: f64,
        reason: String,
    },

    #[error("Invalid {field} percentage {value}: must be between 0 and 100")]
    InvalidPercent { field: &'static str, value: f64 },

    #[error("No items specified. Use --item <name>:<quantity> to add line items.")]
    NoItems,

    #[error("Line item #{0} has no name")]
    BlankItemName(usize),

    #[error("Invalid date '{0}'. Use RFC 3339 (e.g., 2026-01-15T09:30:00+03:00)")]
    InvalidDate(String),

    #[error("Invalid month '{0}'. Use YYYY-MM (e.g., 2026-01)")]
    InvalidMonth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrmError>;
