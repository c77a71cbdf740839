//! # remind
//!
//! Task reminder server binary — wires the store, HTTP server, and the
//! daily notification scheduler, or runs the digest once via `remind
//! notify`.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use remind_cron::DailySchedule;
use remind_notify::{Mailer, MailerConfig, Notifier, NotifyError};
use remind_server::{AppState, ServerConfig, TaskServer};
use remind_settings::Settings;
use remind_store::{ConnectionConfig, ConnectionPool, new_file, run_migrations};

/// Task reminder server.
#[derive(Parser, Debug)]
#[command(name = "remind", about = "Task reminder server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Path to the `SQLite` database (overrides settings).
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Run only the HTTP server, without the notification scheduler.
    #[arg(long)]
    no_notify: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send the digest of incomplete tasks once and exit.
    Notify,
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn init_logging(settings: &Settings) {
    // Development mode bumps the default level; RUST_LOG always wins
    let level = if settings.server.is_development() && settings.logging.level == "info" {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn open_pool(args_db_path: Option<PathBuf>, settings: &Settings) -> Result<ConnectionPool> {
    let db_path = args_db_path.unwrap_or_else(|| settings.database.resolved_path());
    ensure_parent_dir(&db_path)?;
    let config = ConnectionConfig {
        pool_size: settings.database.pool_size,
        busy_timeout_ms: settings.database.busy_timeout_ms,
        ..Default::default()
    };
    let pool = new_file(&db_path, &config)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    {
        let conn = pool.get().context("Failed to get DB connection")?;
        run_migrations(&conn).context("Failed to run migrations")?;
    }
    info!(db_path = %db_path.display(), "database initialized");
    Ok(pool)
}

fn build_notifier(pool: ConnectionPool, settings: &Settings) -> Result<Notifier, NotifyError> {
    let config = MailerConfig::from_settings(&settings.mail)?;
    let mailer = Mailer::new(config)?;
    Ok(Notifier::new(pool, mailer, settings.mail.recipients.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let settings = remind_settings::load_settings().unwrap_or_default();
    init_logging(&settings);

    let pool = open_pool(args.db_path, &settings)?;

    if let Some(Command::Notify) = args.command {
        let notifier = build_notifier(pool, &settings)
            .context("Mail configuration incomplete — cannot send digest")?;
        let outcome = notifier.run().await?;
        println!("{outcome}");
        return Ok(());
    }

    let server_config = ServerConfig {
        host: args.host.unwrap_or_else(|| settings.server.host.clone()),
        port: args.port.unwrap_or(settings.server.port),
    };
    let server = TaskServer::new(server_config, AppState::new(pool.clone()));
    let shutdown = server.shutdown().clone();

    let mut handles = Vec::new();
    if args.no_notify {
        info!("started without notification scheduler (--no-notify)");
    } else {
        match build_notifier(pool, &settings) {
            Ok(notifier) => {
                let schedule = DailySchedule::new(settings.notify.hour, settings.notify.minute);
                let poll = Duration::from_secs(settings.notify.poll_interval_secs);
                let token = shutdown.token();
                let notifier = Arc::new(notifier);
                handles.push(tokio::spawn(async move {
                    remind_cron::run_daily(schedule, poll, token, move || {
                        let notifier = Arc::clone(&notifier);
                        async move {
                            match notifier.run().await {
                                Ok(outcome) => info!(result = %outcome, "digest finished"),
                                Err(e) => error!(error = %e, "digest failed"),
                            }
                        }
                    })
                    .await;
                }));
            }
            Err(e) => {
                warn!(error = %e, "notification scheduler disabled");
            }
        }
    }

    // Ctrl-C initiates graceful shutdown
    {
        let shutdown = shutdown.clone();
        drop(tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                shutdown.shutdown();
            }
        }));
    }

    server.serve().await?;
    shutdown
        .graceful_shutdown(handles, remind_server::shutdown::DEFAULT_SHUTDOWN_TIMEOUT)
        .await;
    info!("shutdown complete");
    Ok(())
}
