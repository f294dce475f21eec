//! # Salt Subcommand
//!
//! Generates a fresh vote salt. The salt is the juror's secret: it must
//! be saved until the reveal phase, and anyone who learns it before then
//! can recover the ballot from the commitment digest.

use clap::Args;

use verdict_crypto::VoteSalt;

/// Arguments for the salt subcommand.
#[derive(Args, Debug)]
pub struct SaltArgs {}

/// Generate and print a fresh salt as lowercase hex.
pub fn run(_args: SaltArgs) -> anyhow::Result<()> {
    let salt = VoteSalt::generate();
    println!("{}", salt.to_hex());
    eprintln!("save this salt: it is required to reveal your vote");
    Ok(())
}
