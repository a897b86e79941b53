//! StoreDeck CLI - store dashboard from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (token is kept in STOREDECK_SESSION_FILE)
//! storedeck login -u mor_2314 -p '83r5^_'
//!
//! # Browse the catalog
//! storedeck products list
//! storedeck products get 3
//!
//! # Carts for a user
//! storedeck carts user 2
//!
//! # Collection sizes, fetched concurrently
//! storedeck overview
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` - Manage the stored session
//! - `products`, `carts`, `users` - Resource operations
//! - `overview` - Dashboard summary

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use storedeck_admin::config::SentryConfig;
use storedeck_admin::{ApiClient, DashboardConfig, SessionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::carts::CartAction;
use commands::products::ProductAction;
use commands::session::LoginArgs;
use commands::users::UserAction;
use commands::{CliError, Context};

#[derive(Parser)]
#[command(name = "storedeck")]
#[command(author, version, about = "StoreDeck store dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the token
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show who is signed in
    Whoami,
    /// Product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Shopping carts
    Carts {
        #[command(subcommand)]
        action: CartAction,
    },
    /// User accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Product, cart and user counts
    Overview,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &SentryConfig) -> sentry::ClientInitGuard {
    sentry::init((
        config.dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ))
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = DashboardConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = config
        .as_ref()
        .ok()
        .and_then(|c| c.sentry.as_ref())
        .map(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storedeck=info,storedeck_admin=info".into());

    let json_logs = std::env::var_os("STOREDECK_LOG_JSON").is_some();
    // Logs go to stderr; stdout carries command output
    let json_layer = json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    let code = exit_status(&result);

    // Flush queued Sentry events before the process ends
    drop(sentry_guard);
    ExitCode::from(code)
}

/// Log a failed command and map the outcome to a process exit status.
fn exit_status(result: &Result<(), CliError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            1
        }
    }
}

async fn run(cli: Cli, config: DashboardConfig) -> Result<(), CliError> {
    let store = Arc::new(SessionStore::open(&config.session_file).await?);
    let client = ApiClient::new(&config.api, store.clone())?;
    let ctx = Context { client, store };

    match cli.command {
        Commands::Login(args) => commands::session::login(&ctx, args).await?,
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx)?,
        Commands::Products { action } => commands::products::run(&ctx, action).await?,
        Commands::Carts { action } => commands::carts::run(&ctx, action).await?,
        Commands::Users { action } => commands::users::run(&ctx, action).await?,
        Commands::Overview => commands::overview::run(&ctx).await?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), 0);

        let failed = Err(CliError::InvalidData("expected an object".to_owned()));
        assert_eq!(exit_status(&failed), 1);
    }

    #[test]
    fn test_cli_parses_commands() {
        let cli = Cli::try_parse_from(["storedeck", "carts", "user", "2"]).unwrap();
        assert!(matches!(cli.command, Commands::Carts { .. }));

        assert!(Cli::try_parse_from(["storedeck", "products", "get", "seven"]).is_err());
        assert!(Cli::try_parse_from(["storedeck", "login"]).is_err());
        assert!(Cli::try_parse_from(["storedeck", "login", "--demo"]).is_ok());
    }
}
