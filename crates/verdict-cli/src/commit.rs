//! # Commit Subcommand
//!
//! Computes a vote commitment offline and prints the unsigned
//! commit-vote payload for the external signer. Nothing leaves this
//! machine; the salt is read, hashed, and forgotten.

use anyhow::Context;
use clap::Args;
use uuid::Uuid;

use verdict_core::{AccountId, DisputeId, VoteChoice};
use verdict_crypto::VoteSalt;
use verdict_protocol::prepare_commit_payload;

/// Arguments for the commit subcommand.
#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Dispute identifier (UUID).
    #[arg(long)]
    pub dispute_id: Uuid,

    /// Juror account identity.
    #[arg(long)]
    pub juror: String,

    /// Ballot: `refund_plaintiff` or `release_to_defendant`.
    #[arg(long)]
    pub choice: String,

    /// Vote salt as hex; generate one with `verdict salt`.
    #[arg(long)]
    pub salt: String,
}

/// Compute the commitment and print the unsigned payload as JSON.
pub fn run(args: CommitArgs) -> anyhow::Result<()> {
    let dispute_id = DisputeId(args.dispute_id);
    let juror = AccountId::new(args.juror).context("invalid juror identity")?;
    let choice: VoteChoice = args.choice.parse().context("invalid ballot")?;
    let salt = VoteSalt::from_hex(&args.salt).context("invalid salt")?;

    let payload = prepare_commit_payload(dispute_id, juror, choice, &salt);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    eprintln!("keep your ballot and salt: both are required for the reveal phase");
    Ok(())
}
