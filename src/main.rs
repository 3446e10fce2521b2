use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::{debug, warn};

use crm::config::{
    config_dir, load_config, load_items, load_snapshot, Config, CONFIG_TEMPLATE, ITEMS_TEMPLATE,
    SNAPSHOT_FILES,
};
use crm::dashboard::{compute_dashboard, month_grid, newest_first, summarize_invoices};
use crm::error::{CrmError, Result};
use crm::format::{format_money, format_percent};
use crm::ledger::{line_items_from_catalog, InvoiceDraft, LedgerResult, LineItem, ProposalDraft};
use crm::logging::init_tracing;
use crm::model::Task;

#[derive(Parser)]
#[command(name = "crm")]
#[command(version, about = "Small business CRM: ledgers and dashboard metrics", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.crm)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List priced catalog items
    Items,

    /// Compute the financial breakdown of an invoice or proposal
    Ledger {
        /// Line items in format "item:quantity" (can be repeated)
        #[arg(short, long, value_name = "ITEM:QTY")]
        item: Vec<String>,

        /// Discount percentage (default from config.toml)
        #[arg(short, long)]
        discount: Option<f64>,

        /// Tax percentage applied after the discount (default from config.toml)
        #[arg(short, long)]
        tax: Option<f64>,

        /// Price as a commercial proposal (no tax)
        #[arg(long)]
        proposal: bool,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show dashboard metrics from the exported snapshots
    Dashboard {
        /// Reference time in RFC 3339 (default: now, local time zone)
        #[arg(long)]
        now: Option<String>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show a month of task due dates
    Calendar {
        /// Month to show as YYYY-MM (default: the month of --now)
        #[arg(short, long)]
        month: Option<String>,

        /// Reference time in RFC 3339 (default: now, local time zone)
        #[arg(long)]
        now: Option<String>,
    },

    /// Show invoice totals by payment status
    Invoices {
        /// Number of recent invoices to list (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List commercial proposals, newest first
    Proposals {
        /// Number of proposals to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    debug!(config_dir = %cfg_dir.display(), "resolved config directory");

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Items => cmd_items(&cfg_dir),
        Commands::Ledger {
            item,
            discount,
            tax,
            proposal,
            json,
        } => cmd_ledger(&cfg_dir, &item, discount, tax, proposal, json),
        Commands::Dashboard { now, json } => match now {
            Some(raw) => cmd_dashboard(&cfg_dir, &parse_now(&raw)?, json),
            None => cmd_dashboard(&cfg_dir, &Local::now(), json),
        },
        Commands::Calendar { month, now } => match now {
            Some(raw) => cmd_calendar(&cfg_dir, month.as_deref(), &parse_now(&raw)?),
            None => cmd_calendar(&cfg_dir, month.as_deref(), &Local::now()),
        },
        Commands::Invoices { limit } => cmd_invoices(&cfg_dir, limit),
        Commands::Proposals { limit } => cmd_proposals(&cfg_dir, limit),
    }
}

fn parse_now(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).map_err(|_| CrmError::InvalidDate(raw.to_string()))
}

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| CrmError::InvalidMonth(raw.to_string()))?;
    Ok((first.year(), first.month()))
}

fn ensure_initialized(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(CrmError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    load_config(cfg_dir)
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(CrmError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("items.toml"), ITEMS_TEMPLATE)?;
    for (name, content) in SNAPSHOT_FILES {
        fs::write(cfg_dir.join(name), content)?;
    }

    println!("Initialized crm config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Set currency and tax defaults:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Describe your services:         $EDITOR {}/items.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Drop backend exports into:      {}/{{clients,projects,tasks,invoices,proposals}}.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then price a document:");
    println!("  crm ledger --item <item>:<quantity> --discount 10");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "RATE")]
    rate: String,
    #[tabled(rename = "UNIT")]
    unit: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ITEM")]
    name: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "PRICE")]
    price: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "METRIC")]
    metric: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "TASK")]
    title: String,
    #[tabled(rename = "PROJECT")]
    project: String,
    #[tabled(rename = "DUE")]
    due: String,
    #[tabled(rename = "PRIORITY")]
    priority: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct RecentRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

#[derive(Tabled)]
struct ProposalRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

/// List catalog items
fn cmd_items(cfg_dir: &Path) -> Result<()> {
    let config = ensure_initialized(cfg_dir)?;
    let items = load_items(cfg_dir)?;

    if items.is_empty() {
        println!("No items configured.");
        println!("Add items to: {}/items.toml", cfg_dir.display());
        return Ok(());
    }

    let mut sorted: Vec<_> = items.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<ItemRow> = sorted
        .iter()
        .map(|(id, item)| ItemRow {
            id: id.to_string(),
            description: item.description.clone(),
            rate: format_money(item.rate, &config.display),
            unit: item.unit.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

#[derive(Serialize)]
struct LedgerReport<'a> {
    kind: &'static str,
    items: &'a [LineItem],
    discount_percent: f64,
    tax_percent: f64,
    ledger: LedgerResult,
}

/// Price a set of catalog items as an invoice or a proposal
fn cmd_ledger(
    cfg_dir: &Path,
    item_inputs: &[String],
    discount: Option<f64>,
    tax: Option<f64>,
    proposal: bool,
    json: bool,
) -> Result<()> {
    let config = ensure_initialized(cfg_dir)?;

    if item_inputs.is_empty() {
        return Err(CrmError::NoItems);
    }

    let catalog = load_items(cfg_dir)?;
    let items = line_items_from_catalog(item_inputs, &catalog)?;
    let discount_percent = discount.unwrap_or(config.ledger.default_discount_percent);

    let (kind, tax_percent, items, ledger) = if proposal {
        if tax.is_some() {
            warn!("--tax is ignored for proposals");
        }
        let draft = ProposalDraft::new(items, discount_percent);
        draft.validate()?;
        let ledger = draft.ledger();
        ("proposal", 0.0, draft.items, ledger)
    } else {
        let tax_percent = tax.unwrap_or(config.ledger.default_tax_percent);
        let draft = InvoiceDraft::new(items, discount_percent, tax_percent);
        draft.validate()?;
        let ledger = draft.ledger();
        ("invoice", tax_percent, draft.items, ledger)
    };

    debug!(kind, subtotal = ledger.subtotal, total = ledger.total, "computed ledger");

    if json {
        let report = LedgerReport {
            kind,
            items: &items,
            discount_percent,
            tax_percent,
            ledger,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let display = &config.display;
    let rows: Vec<LineRow> = items
        .iter()
        .enumerate()
        .map(|(idx, line)| LineRow {
            index: idx + 1,
            name: line.name.clone(),
            description: line.description.clone().unwrap_or_default(),
            quantity: format!("{} {}", line.quantity, line.unit),
            price: format_money(line.unit_price, display),
            amount: format_money(line.line_total(), display),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let mut summary = vec![MetricRow {
        metric: "Subtotal".to_string(),
        value: format_money(ledger.subtotal, display),
    }];
    if ledger.has_discount() {
        summary.push(MetricRow {
            metric: format!("Discount ({})", format_percent(discount_percent)),
            value: format!("-{}", format_money(ledger.discount_amount, display)),
        });
    }
    if ledger.has_tax() {
        summary.push(MetricRow {
            metric: format!("Tax ({})", format_percent(tax_percent)),
            value: format_money(ledger.tax_amount, display),
        });
    }
    summary.push(MetricRow {
        metric: "Total".to_string(),
        value: format_money(ledger.total, display),
    });

    let table = Table::new(summary).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn format_instant<Tz: TimeZone>(instant: Option<DateTime<Utc>>, tz: &Tz, fmt: &str) -> String
where
    Tz::Offset: Display,
{
    instant
        .map(|at| at.with_timezone(tz).format(fmt).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn task_rows<Tz: TimeZone>(tasks: &[&Task], tz: &Tz) -> Vec<TaskRow>
where
    Tz::Offset: Display,
{
    tasks
        .iter()
        .map(|task| TaskRow {
            title: task.title.clone(),
            project: task.project_name.clone().unwrap_or_default(),
            due: format_instant(task.due_date, tz, "%Y-%m-%d %H:%M"),
            priority: task.priority.to_string(),
            status: task.status.to_string(),
        })
        .collect()
}

/// Show dashboard metrics
fn cmd_dashboard<Tz: TimeZone>(cfg_dir: &Path, now: &DateTime<Tz>, json: bool) -> Result<()>
where
    Tz::Offset: Display,
{
    let config = ensure_initialized(cfg_dir)?;
    let snapshot = load_snapshot(cfg_dir)?;

    let metrics = compute_dashboard(
        &snapshot.clients,
        &snapshot.projects,
        &snapshot.tasks,
        now,
        config.dashboard.recent_limit,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    let display = &config.display;
    let tz = now.timezone();

    println!("Dashboard as of {}", now.format("%Y-%m-%d %H:%M"));

    let rows = vec![
        MetricRow {
            metric: "Active clients".to_string(),
            value: format!("{} / {}", metrics.clients.active, metrics.clients.total),
        },
        MetricRow {
            metric: "Active projects".to_string(),
            value: format!("{} / {}", metrics.projects.active, metrics.projects.total),
        },
        MetricRow {
            metric: "Tasks in work".to_string(),
            value: format!("{} / {}", metrics.tasks.active, metrics.tasks.total),
        },
        MetricRow {
            metric: "Overdue tasks".to_string(),
            value: metrics.tasks.overdue.to_string(),
        },
        MetricRow {
            metric: "Revenue".to_string(),
            value: format_money(metrics.total_revenue, display),
        },
        MetricRow {
            metric: "Profit".to_string(),
            value: format_money(metrics.total_profit, display),
        },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));

    if !metrics.overdue_tasks.is_empty() {
        println!();
        println!("Warning: {} overdue task(s)", metrics.overdue_tasks.len());
        let table = Table::new(task_rows(&metrics.overdue_tasks, &tz))
            .with(Style::rounded())
            .to_string();
        println!("{table}");
    }

    println!();
    println!("Upcoming tasks (today and tomorrow)");
    if metrics.upcoming_tasks.is_empty() {
        println!("  No tasks due soon.");
    } else {
        let shown: Vec<&Task> = metrics
            .upcoming_tasks
            .iter()
            .take(config.dashboard.upcoming_limit)
            .copied()
            .collect();
        let table = Table::new(task_rows(&shown, &tz))
            .with(Style::rounded())
            .to_string();
        println!("{table}");
    }

    println!();
    println!("Recent clients");
    if metrics.recent_clients.is_empty() {
        println!("  No clients.");
    } else {
        let rows: Vec<RecentRow> = metrics
            .recent_clients
            .iter()
            .map(|c| RecentRow {
                name: c.name.clone(),
                detail: c.contact_person.clone().unwrap_or_default(),
                status: c.status.to_string(),
                created: format_instant(c.created_at, &tz, "%Y-%m-%d"),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    println!();
    println!("Recent projects");
    if metrics.recent_projects.is_empty() {
        println!("  No projects.");
    } else {
        let rows: Vec<RecentRow> = metrics
            .recent_projects
            .iter()
            .map(|p| RecentRow {
                name: p.name.clone(),
                detail: match (&p.client_name, p.our_budget) {
                    (Some(client), Some(budget)) => {
                        format!("{client} • {}", format_money(budget, display))
                    }
                    (Some(client), None) => client.clone(),
                    (None, Some(budget)) => format_money(budget, display),
                    (None, None) => "No client".to_string(),
                },
                status: p.status.to_string(),
                created: format_instant(p.created_at, &tz, "%Y-%m-%d"),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    Ok(())
}

/// Show a month grid of task due dates
fn cmd_calendar<Tz: TimeZone>(
    cfg_dir: &Path,
    month: Option<&str>,
    now: &DateTime<Tz>,
) -> Result<()>
where
    Tz::Offset: Display,
{
    ensure_initialized(cfg_dir)?;
    let snapshot = load_snapshot(cfg_dir)?;

    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => (now.year(), now.month()),
    };

    let grid = month_grid(year, month, &snapshot.tasks, now)?;

    let mut builder = Builder::default();
    builder.push_record(["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]);
    for week in grid.weeks() {
        let mut record: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => String::new(),
                Some(day) => {
                    let mut label = if day.is_today {
                        format!("[{}]", day.date.day())
                    } else {
                        day.date.day().to_string()
                    };
                    if !day.tasks.is_empty() {
                        label.push_str(&format!(" •{}", day.tasks.len()));
                    }
                    if day.has_overdue {
                        label.push('!');
                    }
                    label
                }
            })
            .collect();
        record.resize(7, String::new());
        builder.push_record(record);
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CrmError::InvalidMonth(format!("{year}-{month:02}")))?;
    println!("{}", first.format("%B %Y"));
    println!("{}", builder.build().with(Style::rounded()));
    println!("[d] today   •n tasks due   ! overdue");

    Ok(())
}

/// Show invoice totals and the most recent invoices
fn cmd_invoices(cfg_dir: &Path, limit: Option<usize>) -> Result<()> {
    let config = ensure_initialized(cfg_dir)?;
    let snapshot = load_snapshot(cfg_dir)?;
    let display = &config.display;

    if snapshot.invoices.is_empty() {
        println!("No invoices exported yet.");
        return Ok(());
    }

    let rows: Vec<InvoiceRow> = newest_first(&snapshot.invoices)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|inv| InvoiceRow {
            number: inv.invoice_number.clone(),
            title: inv.title.clone(),
            total: format_money(inv.total, display),
            status: inv.status.to_string(),
            created: format_instant(inv.created_at, &Local, "%Y-%m-%d"),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    let summary = summarize_invoices(&snapshot.invoices);
    let rows = vec![
        MetricRow {
            metric: "Total".to_string(),
            value: format_money(summary.total, display),
        },
        MetricRow {
            metric: "Paid".to_string(),
            value: format_money(summary.paid, display),
        },
        MetricRow {
            metric: "Pending".to_string(),
            value: format_money(summary.pending, display),
        },
        MetricRow {
            metric: "Overdue".to_string(),
            value: format_money(summary.overdue, display),
        },
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

/// List proposals, newest first
fn cmd_proposals(cfg_dir: &Path, limit: Option<usize>) -> Result<()> {
    let config = ensure_initialized(cfg_dir)?;
    let snapshot = load_snapshot(cfg_dir)?;

    if snapshot.proposals.is_empty() {
        println!("No proposals exported yet.");
        return Ok(());
    }

    let rows: Vec<ProposalRow> = newest_first(&snapshot.proposals)
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|p| ProposalRow {
            number: p.number.clone().unwrap_or_else(|| "-".to_string()),
            title: p.title.clone(),
            total: format_money(p.total, &config.display),
            status: p.status.to_string(),
            created: format_instant(p.created_at, &Local, "%Y-%m-%d"),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}
