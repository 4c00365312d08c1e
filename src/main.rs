use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use finance_dashboard::{
    get_presenter, parse_day, parse_month_label, Dashboard, DashboardConfig, PresenterKind,
    SeriesKind, SessionEvent, SessionState, StatsWindow,
};

/// Personal finance dashboard over net worth and expense exports
#[derive(Parser, Debug)]
#[command(name = "finance-dashboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Net worth CSV export
    #[arg(long, global = true, env = "DASHBOARD_NET_WORTH")]
    net_worth: Option<PathBuf>,

    /// Monthly expenses CSV export
    #[arg(long, global = true, env = "DASHBOARD_EXPENSES")]
    expenses: Option<PathBuf>,

    /// JSON config file with paths and tunables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every panel once as plain text
    Report {
        /// Month for the category breakdown, e.g. "Aug 2022"
        #[arg(long)]
        month: Option<String>,

        /// Statistics window: 6 or 12 months
        #[arg(long)]
        window: Option<String>,

        /// Show the net worth record for a day instead, e.g. "Jan 31, 2024" or 2024-01-31
        #[arg(long, conflicts_with = "detail_month")]
        detail_date: Option<String>,

        /// Show the expense record for a month instead, e.g. "Aug 2022"
        #[arg(long)]
        detail_month: Option<String>,
    },
    /// Interactive terminal dashboard (default)
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library logs go to stderr so the report stays clean on stdout
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::resolve(cli.config.as_deref(), cli.net_worth, cli.expenses)
        .context("Failed to resolve dashboard configuration")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Report {
            month,
            window,
            detail_date,
            detail_month,
        } => run_report(&config, month, window, detail_date, detail_month),
        Command::Tui => run_ui_mode(&config),
    }
}

fn run_report(
    config: &DashboardConfig,
    month: Option<String>,
    window: Option<String>,
    detail_date: Option<String>,
    detail_month: Option<String>,
) -> Result<()> {
    let dashboard = Dashboard::load(config).context("Failed to load dashboard data")?;
    let mut session = SessionState::new(&dashboard);

    let mut events = Vec::new();
    if let Some(month) = month {
        events.push(SessionEvent::MonthSelected {
            month: parse_month_label(&month)?,
        });
    }
    if let Some(window) = window {
        events.push(SessionEvent::WindowSelected {
            window: StatsWindow::from_str(&window)?,
        });
    }
    if let Some(date) = detail_date {
        events.push(SessionEvent::PointSelected {
            series: SeriesKind::NetWorth,
            date: parse_cli_day(&date)?,
        });
    }
    if let Some(month) = detail_month {
        events.push(SessionEvent::PointSelected {
            series: SeriesKind::Expenses,
            date: parse_month_label(&month)?,
        });
    }

    for event in &events {
        session = session.apply(event);
    }

    let mut presenter = get_presenter(PresenterKind::Static)
        .context("Static report presenter unavailable")?;
    presenter.present(&dashboard, &mut session)
}

/// Accept the export's own "Jan 31, 2024" form or ISO dates
fn parse_cli_day(raw: &str) -> Result<NaiveDate> {
    parse_day(raw)
        .or_else(|| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
        .with_context(|| format!("Invalid date '{}', expected \"Jan 31, 2024\" or 2024-01-31", raw))
}

fn run_ui_mode(config: &DashboardConfig) -> Result<()> {
    let Some(mut presenter) = get_presenter(PresenterKind::Interactive) else {
        eprintln!("❌ TUI mode not available!");
        eprintln!("   Rebuild with: cargo build --features tui");
        eprintln!("   Or print a report: finance-dashboard report");
        std::process::exit(1);
    };

    println!("🖥️  Loading Finance Dashboard...\n");

    println!("📂 Loading {}", config.net_worth_path.display());
    println!("📂 Loading {}", config.expenses_path.display());
    let dashboard = Dashboard::load(config).context("Failed to load dashboard data")?;
    println!(
        "✓ Loaded {} net worth records and {} expense months\n",
        dashboard.net_worth().len(),
        dashboard.expenses().len()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut session = SessionState::new(&dashboard);
    presenter.present(&dashboard, &mut session)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}
