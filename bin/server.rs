// Finance Dashboard - Web Server
// JSON API for chart frontends, one independent dashboard per session

use anyhow::{Context, Result};
use clap::Parser;
use finance_dashboard::server::{router, AppState};
use finance_dashboard::DashboardConfig;
use std::path::PathBuf;
use tracing::info;

/// Personal finance dashboard JSON API server
#[derive(Parser, Debug)]
#[command(name = "finance-dashboard-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Net worth CSV export
    #[arg(long, env = "DASHBOARD_NET_WORTH")]
    net_worth: Option<PathBuf>,

    /// Monthly expenses CSV export
    #[arg(long, env = "DASHBOARD_EXPENSES")]
    expenses: Option<PathBuf>,

    /// JSON config file with paths and tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info"
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = DashboardConfig::resolve(args.config.as_deref(), args.net_worth, args.expenses)
        .context("Failed to resolve dashboard configuration")?;
    info!(
        net_worth = %config.net_worth_path.display(),
        expenses = %config.expenses_path.display(),
        "inputs configured, loaded per session"
    );

    let app = router(AppState::new(config));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    println!("🌐 Finance Dashboard - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("\n🚀 Server running on http://{}", addr);
    println!("   Health:   http://{}/api/health", addr);
    println!("   Sessions: POST http://{}/api/sessions", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
