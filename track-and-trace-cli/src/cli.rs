//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use track_and_trace_gateway::{
    Credentials, Direction, SCRAPER_ENDPOINT_ENV, SignupRequest, TrackingQuery, USER_ENDPOINT_ENV,
};

#[derive(Debug, Parser)]
#[command(name = "track-and-trace", version, about = "Track & Trace shipment tracking client")]
pub struct Cli {
    /// TOML file providing `user_endpoint`, `scraper_endpoint` and timeouts.
    #[arg(long, global = true, env = "TRACK_AND_TRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the user service.
    #[arg(long, global = true, env = USER_ENDPOINT_ENV)]
    pub user_endpoint: Option<String>,

    /// Base URL of the complex scraper service.
    #[arg(long, global = true, env = SCRAPER_ENDPOINT_ENV)]
    pub scraper_endpoint: Option<String>,

    /// File keeping the session cookies between runs. Defaults to
    /// `track-and-trace/session.json` in the platform data directory.
    #[arg(long, global = true, env = "TRACK_AND_TRACE_SESSION")]
    pub session_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open a session with the user service and save it for later commands.
    Signin(CredentialArgs),
    /// Close the saved session.
    Signout,
    /// Register a new account.
    Signup(SignupArgs),
    /// Look up the tracking status of a shipment.
    Status(StatusArgs),
}

/// What a command does to the saved session once it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Keep,
    /// Write the cookies held after the command.
    Save,
    /// Delete the saved session if the command succeeded.
    Clear,
}

impl Command {
    pub fn session_action(&self) -> SessionAction {
        match self {
            Self::Signin(_) => SessionAction::Save,
            Self::Signout => SessionAction::Clear,
            Self::Status(args) if args.credentials().is_some() => SessionAction::Save,
            Self::Signup(_) | Self::Status(_) => SessionAction::Keep,
        }
    }
}

#[derive(Debug, Args)]
pub struct CredentialArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "TRACK_AND_TRACE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Self::new(args.username, args.password)
    }
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Collected for parity with the sign-up form; not sent to the service.
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TRACK_AND_TRACE_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub phone: u64,
    #[arg(long)]
    pub company: String,
}

impl From<SignupArgs> for SignupRequest {
    fn from(args: SignupArgs) -> Self {
        Self {
            username: args.username,
            email: args.email,
            password: args.password,
            phone: args.phone,
            company: args.company,
        }
    }
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Carrier to query, e.g. MAERSK.
    #[arg(long)]
    pub shipping_line: String,
    /// B/L, container or booking number.
    #[arg(long)]
    pub identifier: String,
    /// Kind of identifier, forwarded to the scraper as-is.
    #[arg(long, default_value = "bl")]
    pub identifier_type: String,
    /// import or export.
    #[arg(long, default_value = "import")]
    pub direction: Direction,
    /// Sign in with this account before the lookup.
    #[arg(long, requires = "password")]
    pub username: Option<String>,
    #[arg(long, requires = "username")]
    pub password: Option<String>,
    /// Print the status page progress list instead of raw JSON.
    #[arg(long)]
    pub timeline: bool,
}

impl StatusArgs {
    pub fn query(&self) -> TrackingQuery {
        TrackingQuery {
            shipping_line: self.shipping_line.clone(),
            identifier: self.identifier.clone(),
            identifier_type: self.identifier_type.clone(),
            direction: self.direction,
        }
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        }
    }
}
