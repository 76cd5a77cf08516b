//! folio-server: the contact intake endpoint.
//!
//! Usage:
//!   folio-server serve --config folio.toml
//!   folio-server serve --bind 0.0.0.0:8080 --store /var/lib/folio/messages.txt
//!   folio-server serve --dry-run
//!   folio-server check-config --config folio.toml

use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use folio_config::FolioConfig;
use folio_core::{IntakeHandler, MessageStore};
use folio_store::{FileMessageStore, InMemoryMessageStore};

// ── CLI definition ────────────────────────────────────────────────────────────

/// folio: contact form intake server.
#[derive(Parser)]
#[command(
    name = "folio-server",
    about = "Contact form intake server",
    long_about = "Accepts contact form submissions over HTTP, validates them,\n\
                  and appends accepted messages to a plain-text log."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP intake endpoint.
    Serve {
        /// TOML config file.  Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override `server.bind`.
        #[arg(long)]
        bind: Option<String>,
        /// Override `store.path`.
        #[arg(long)]
        store: Option<PathBuf>,
        /// Keep accepted messages in memory instead of the log file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Load, validate, and print the resolved configuration.
    CheckConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for per-field validation detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Serve {
            config,
            bind,
            store,
            dry_run,
        } => run_serve(config, bind, store, dry_run).await,
        Command::CheckConfig { config } => check_config(config),
    };

    if let Err(e) = result {
        eprintln!("folio-server error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_serve(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    store_path: Option<PathBuf>,
    dry_run: bool,
) -> Result<(), Box<dyn Error>> {
    let mut config = FolioConfig::load(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if let Some(path) = store_path {
        config.store.path = path;
    }
    config.validate()?;

    let store: Box<dyn MessageStore> = if dry_run {
        warn!("dry run: accepted messages are kept in memory only");
        Box::new(InMemoryMessageStore::new())
    } else {
        Box::new(FileMessageStore::new(&config.store.path))
    };

    let addr = config.bind_addr()?;
    let router = folio_server::build_router(IntakeHandler::new(store), &config.server);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        intake_path = %config.server.intake_path,
        store = %config.store.path.display(),
        dry_run,
        "folio-server listening"
    );

    folio_server::serve(listener, router, shutdown_signal()).await?;
    info!("folio-server stopped");
    Ok(())
}

fn check_config(config_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let config = FolioConfig::load(config_path.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
