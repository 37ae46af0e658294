//! Local file patching
//!
//! Handles: tfpr patch <FILE> --list <NAME> --value <VALUE>

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;
use tfpr_core::diff::{unified_diff, DiffSummary};
use tfpr_core::tfpr_hcl;

/// Arguments for `tfpr patch`
#[derive(Args)]
pub struct PatchArgs {
    /// Terraform file to patch in place
    pub file: PathBuf,

    /// List to add the value to (e.g. `mysql_list`)
    #[arg(long)]
    pub list: String,

    /// Value to add
    #[arg(long)]
    pub value: String,

    /// Preview changes without applying
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: &PatchArgs) -> Result<()> {
    let display = args.file.display().to_string();
    let original = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {display}"))?;

    let result = tfpr_hcl::patch(&original, &args.list, &args.value)?;

    if result.changed && !args.dry_run {
        fs::write(&args.file, &result.text)
            .with_context(|| format!("Failed to write {display}"))?;
    }

    if args.json {
        let summary = DiffSummary::between(&original, &result.text);
        let output = json!({
            "file": display,
            "list": args.list,
            "value": args.value,
            "changed": result.changed,
            "dry_run": args.dry_run,
            "insertions": summary.insertions,
            "deletions": summary.deletions,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !result.changed {
        println!("'{}' is already present in {} ({display})", args.value, args.list);
    } else if args.dry_run {
        print!("{}", unified_diff(&display, &original, &result.text));
        let summary = DiffSummary::between(&original, &result.text);
        println!("Summary: {}", summary.one_line());
        println!("\nDry run - no changes made.");
    } else {
        println!("Added '{}' to {} in {display}", args.value, args.list);
    }

    Ok(())
}
