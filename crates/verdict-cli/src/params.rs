//! # Params Subcommand
//!
//! Validates a protocol parameter file before it is deployed to a
//! tribunal.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use verdict_core::ProtocolParams;

/// Arguments for the params subcommand.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Parameter file (YAML). Omit to print the defaults.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Load, validate, and echo the effective parameters as YAML.
pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let params = match &args.file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str::<ProtocolParams>(&raw)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ProtocolParams::default(),
    };
    params.validate().context("invalid protocol parameters")?;
    print!("{}", serde_yaml::to_string(&params)?);
    Ok(())
}
