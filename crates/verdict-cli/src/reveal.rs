//! # Reveal Subcommand
//!
//! Prepares the unsigned reveal payload disclosing a committed ballot
//! and its salt.

use anyhow::Context;
use clap::Args;
use uuid::Uuid;

use verdict_core::{AccountId, DisputeId, VoteChoice};
use verdict_crypto::VoteSalt;
use verdict_protocol::prepare_reveal_payload;

/// Arguments for the reveal subcommand.
#[derive(Args, Debug)]
pub struct RevealArgs {
    /// Dispute identifier (UUID).
    #[arg(long)]
    pub dispute_id: Uuid,

    /// Juror account identity.
    #[arg(long)]
    pub juror: String,

    /// The ballot committed earlier.
    #[arg(long)]
    pub choice: String,

    /// The salt used in the commit step, as hex.
    #[arg(long)]
    pub salt: String,
}

/// Print the unsigned reveal payload as JSON.
pub fn run(args: RevealArgs) -> anyhow::Result<()> {
    let dispute_id = DisputeId(args.dispute_id);
    let juror = AccountId::new(args.juror).context("invalid juror identity")?;
    let choice: VoteChoice = args.choice.parse().context("invalid ballot")?;
    let salt = VoteSalt::from_hex(&args.salt).context("invalid salt")?;

    let payload = prepare_reveal_payload(dispute_id, juror, choice, &salt);
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
