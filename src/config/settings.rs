use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub ledger: LedgerSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub thousands_separator: String,
    pub decimals: usize,
    /// Put the symbol after the amount ("100 ₽") instead of before ("$100")
    pub symbol_suffix: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₽".to_string(),
            thousands_separator: " ".to_string(),
            decimals: 2,
            symbol_suffix: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LedgerSettings {
    pub default_discount_percent: f64,
    pub default_tax_percent: f64,
    pub default_unit: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_discount_percent: 0.0,
            default_tax_percent: 20.0,
            default_unit: "pcs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DashboardSettings {
    /// How many clients/projects the "recent" lists show
    pub recent_limit: usize,
    pub upcoming_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            upcoming_limit: 5,
        }
    }
}
