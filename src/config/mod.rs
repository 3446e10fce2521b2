mod item;
mod settings;
mod snapshot;

pub use item::Item;
pub use settings::{Config, DashboardSettings, DisplaySettings, LedgerSettings};
pub use snapshot::Snapshot;

use crate::error::{CrmError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use snapshot::{ClientsFile, InvoicesFile, ProjectsFile, ProposalsFile, TasksFile};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the config directory path (XDG config dir, or ~/.crm/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "crm") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        CrmError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".crm"))
}

fn read_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    let content = fs::read_to_string(&path)?;
    debug!(path = %path.display(), bytes = content.len(), "parsing toml");
    toml::from_str(&content).map_err(|e| CrmError::ConfigParse { path, source: e })
}

fn read_required<T: DeserializeOwned>(config_dir: &Path, name: &str) -> Result<T> {
    let path = config_dir.join(name);
    if !path.exists() {
        return Err(CrmError::ConfigFileNotFound(path));
    }
    read_toml(path)
}

/// Missing snapshot files are treated as empty collections.
fn read_optional<T: DeserializeOwned + Default>(config_dir: &Path, name: &str) -> Result<T> {
    let path = config_dir.join(name);
    if !path.exists() {
        debug!(path = %path.display(), "snapshot file missing, using empty list");
        return Ok(T::default());
    }
    read_toml(path)
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    read_required(config_dir, "config.toml")
}

/// Load items.toml as a HashMap
pub fn load_items(config_dir: &Path) -> Result<HashMap<String, Item>> {
    read_required(config_dir, "items.toml")
}

/// Load every snapshot file in the config directory
pub fn load_snapshot(config_dir: &Path) -> Result<Snapshot> {
    let clients: ClientsFile = read_optional(config_dir, "clients.toml")?;
    let projects: ProjectsFile = read_optional(config_dir, "projects.toml")?;
    let tasks: TasksFile = read_optional(config_dir, "tasks.toml")?;
    let invoices: InvoicesFile = read_optional(config_dir, "invoices.toml")?;
    let proposals: ProposalsFile = read_optional(config_dir, "proposals.toml")?;

    debug!(
        clients = clients.clients.len(),
        projects = projects.projects.len(),
        tasks = tasks.tasks.len(),
        invoices = invoices.invoices.len(),
        proposals = proposals.proposals.len(),
        "loaded snapshot"
    );

    Ok(Snapshot {
        clients: clients.clients,
        projects: projects.projects,
        tasks: tasks.tasks,
        invoices: invoices.invoices,
        proposals: proposals.proposals,
    })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[display]
currency_symbol = "₽"
thousands_separator = " "
decimals = 2
symbol_suffix = true   # "100 ₽" rather than "₽100"

[ledger]
default_discount_percent = 0.0
default_tax_percent = 20.0   # VAT, applied after the discount
default_unit = "pcs"

[dashboard]
recent_limit = 5     # newest clients/projects shown
upcoming_limit = 5   # tasks due today or tomorrow shown
"#;

/// Template content for items.toml
pub const ITEMS_TEMPLATE: &str = r#"# Define your priced services here. The table name (e.g., [setup]) is used
# as the item identifier in the ledger command.
#
# Example:
#   crm ledger --item setup:1 --item targeting:3 --discount 10

[setup]
description = "Ad account setup"
rate = 15000.00
unit = "pcs"

[targeting]
description = "Targeted advertising management"
rate = 30000.00
unit = "month"

[design]
description = "Creative design"
rate = 2500.00
unit = "hour"
"#;

/// Snapshot files written empty by `crm init`, with a one-line header each
pub const SNAPSHOT_FILES: [(&str, &str); 5] = [
    ("clients.toml", "# [[clients]] exported from the backend\n"),
    ("projects.toml", "# [[projects]] exported from the backend\n"),
    ("tasks.toml", "# [[tasks]] exported from the backend\n"),
    ("invoices.toml", "# [[invoices]] exported from the backend\n"),
    ("proposals.toml", "# [[proposals]] exported from the backend\n"),
];
