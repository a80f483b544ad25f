//! Track & Trace command-line client
//!
//! Drives the gateway the way the web frontend does: one sub-command per user
//! action. Results go to stdout as JSON, logs go to stderr.

mod cli;
mod config;
mod output;
mod session_store;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command, SessionAction};
use session_store::SessionStore;
use track_and_trace_gateway::{GatewayError, RemoteGateway, TrackingGateway};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match config::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!("Using user service {}", config.user_endpoint);
    tracing::debug!("Using scraper {}", config.scraper_endpoint);

    let gateway = match RemoteGateway::with_session_authenticator(config) {
        Ok(gateway) => gateway,
        Err(e) => {
            tracing::error!("Failed to create gateway: {e}");
            return ExitCode::from(2);
        }
    };

    let store = SessionStore::resolve(cli.session_file.as_deref());
    let user_endpoint = gateway.config().user_endpoint.to_string();
    if let Some(store) = &store {
        match store.load_into(gateway.session(), &user_endpoint).await {
            Ok(true) => tracing::debug!("Restored session from {}", store.path().display()),
            Ok(false) => {}
            Err(e) => tracing::warn!("Ignoring saved session: {e:#}"),
        }
    }

    let action = cli.command.session_action();
    let outcome = run(&gateway, cli.command).await;
    if let Some(store) = &store {
        persist_session(store, action, &gateway, &user_endpoint, outcome.is_ok()).await;
    }

    match outcome {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            output::log_error(&e);
            println!("{}", output::json(&e));
            ExitCode::FAILURE
        }
    }
}

/// Session file errors are logged and never change the exit code.
async fn persist_session(
    store: &SessionStore,
    action: SessionAction,
    gateway: &RemoteGateway,
    user_endpoint: &str,
    succeeded: bool,
) {
    let result = match action {
        SessionAction::Keep => return,
        SessionAction::Save => store.save(gateway.session(), user_endpoint).await,
        SessionAction::Clear if succeeded => store.clear().await,
        SessionAction::Clear => return,
    };
    if let Err(e) = result {
        tracing::warn!("Failed to update saved session: {e:#}");
    }
}

/// Logs go to stderr so stdout stays machine readable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

async fn run(gateway: &dyn TrackingGateway, command: Command) -> Result<String, GatewayError> {
    match command {
        Command::Signin(args) => {
            let msg = gateway.sign_in(&args.into()).await?;
            Ok(output::json(&msg))
        }
        Command::Signout => {
            let msg = gateway.sign_out().await?;
            Ok(output::json(&msg))
        }
        Command::Signup(args) => {
            let msg = gateway.sign_up(&args.into()).await?;
            Ok(output::json(&msg))
        }
        Command::Status(args) => {
            if let Some(credentials) = args.credentials() {
                let msg = gateway.sign_in(&credentials).await?;
                tracing::info!(
                    "Signed in as '{}': {}",
                    credentials.username,
                    msg.message.as_deref().unwrap_or("ok")
                );
            }
            let result = gateway.bl_status(&args.query()).await?;
            if args.timeline {
                Ok(output::timeline(&result))
            } else {
                Ok(output::json(&result))
            }
        }
    }
}
