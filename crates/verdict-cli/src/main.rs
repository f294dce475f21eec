//! # verdict CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Verdict Protocol CLI — juror and operator tooling.
///
/// Generates vote salts, computes commitments offline, prepares unsigned
/// payloads for an external signer, and validates parameter files.
#[derive(Parser, Debug)]
#[command(name = "verdict", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Generate a fresh vote salt.
    Salt(verdict_cli::salt::SaltArgs),
    /// Compute a vote commitment and its unsigned payload.
    Commit(verdict_cli::commit::CommitArgs),
    /// Prepare the unsigned reveal payload for a committed vote.
    Reveal(verdict_cli::reveal::RevealArgs),
    /// Validate a protocol parameter file.
    Params(verdict_cli::params::ParamsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Salt(args) => verdict_cli::salt::run(args),
        Commands::Commit(args) => verdict_cli::commit::run(args),
        Commands::Reveal(args) => verdict_cli::reveal::run(args),
        Commands::Params(args) => verdict_cli::params::run(args),
    }
}
