mod application;
mod domain;
mod infrastructure;
mod presentation;

use clap::Parser;
use colored::Colorize;
use crate::presentation::cli::Cli;
use tracing_subscriber::EnvFilter;

/// iam-onboard: guided IAM user onboarding
///
/// Reads the profiles from the local AWS config, lets the operator pick one,
/// then creates the user, attaches the MFA self-management policy, adds group
/// memberships and writes console and CLI access details to local files.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli.run().await {
        eprintln!("{}", format!("{:#}", err).red());
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default level
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
