//! tfpr CLI - Terraform pull-request provisioner
//!
//! Provides `tfpr patch`, `tfpr provision` and `tfpr handle-event`.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::event::HandleEventArgs;
use commands::patch::PatchArgs;
use commands::provision::ProvisionArgs;

#[derive(Parser)]
#[command(name = "tfpr")]
#[command(about = "tfpr - Terraform pull-request provisioner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a value to a list in a local Terraform file
    Patch(PatchArgs),
    /// Open a pull request that provisions a database
    Provision(ProvisionArgs),
    /// Handle a queue event read from a file or stdin
    HandleEvent(HandleEventArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Patch(args) => commands::patch::execute(&args),
        Commands::Provision(args) => commands::provision::execute(&args).await,
        Commands::HandleEvent(args) => commands::event::execute(&args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
