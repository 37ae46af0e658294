//! Remote provisioning
//!
//! Handles: tfpr provision --db-name <N> --engine <E> --env <ENV>

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tfpr_core::{ProvisionOutcome, Provisioner, RawRequest};

/// Arguments for `tfpr provision`
#[derive(Args)]
pub struct ProvisionArgs {
    /// Database name to add
    #[arg(long)]
    pub db_name: String,

    /// Database engine (mysql, postgresql)
    #[arg(long)]
    pub engine: String,

    /// Target environment (e.g. dev, prod)
    #[arg(long)]
    pub env: String,

    /// Show the planned change without creating a branch or pull request
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: &ProvisionArgs) -> Result<()> {
    let (settings, client) = super::connect()?;

    let request = RawRequest {
        db_name: Some(args.db_name.clone()),
        env: Some(args.env.clone()),
        engine: Some(args.engine.clone()),
    }
    .validate(&settings.allowed_environments)?;

    let provisioner = Provisioner::from_settings(&client, &settings);
    let plan = provisioner.plan(&request).await?;

    if args.dry_run {
        if args.json {
            let output = json!({
                "db_name": request.db_name,
                "path": plan.path,
                "list_name": plan.list_name,
                "changed": !plan.is_noop(),
                "diff": plan.diff(),
                "dry_run": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else if plan.is_noop() {
            println!(
                "No change: {} already in {} ({})",
                request.db_name, plan.list_name, plan.path
            );
        } else {
            print!("{}", plan.diff());
            println!("\nDry run - no changes made.");
        }
        return Ok(());
    }

    let outcome = provisioner.apply(plan).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        ProvisionOutcome::Proposed {
            branch,
            pull_request,
            ..
        } => {
            println!("PR created: {}", pull_request.url);
            println!("  Branch: {branch}");
        }
        ProvisionOutcome::AlreadyPresent {
            db_name,
            list_name,
            ..
        } => {
            println!("No change: {db_name} already in {list_name}");
        }
    }

    Ok(())
}
