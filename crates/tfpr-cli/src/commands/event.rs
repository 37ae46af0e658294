//! Queue event handling
//!
//! Handles: tfpr handle-event [--file <PATH>]

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tfpr_core::{handle_event, Provisioner};

/// Arguments for `tfpr handle-event`
#[derive(Args)]
pub struct HandleEventArgs {
    /// Read the event from this file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

pub async fn execute(args: &HandleEventArgs) -> Result<()> {
    let event = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };

    let (settings, client) = super::connect()?;
    let provisioner = Provisioner::from_settings(&client, &settings);

    let responses = handle_event(&provisioner, &event).await;
    println!("{}", serde_json::to_string_pretty(&responses)?);

    let failed = responses.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        bail!("{failed} of {} record(s) failed", responses.len());
    }
    Ok(())
}
