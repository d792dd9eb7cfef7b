//! Cleave CLI — partition a dynamic program into trusted and untrusted
//! executable units with generated boundary glue.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "cleave", version, about = "Trust-partitioning glue generator")]
struct Cli {
    /// Log filter (overridden by RUST_LOG when set)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both partitions and their boundary glue
    Partition {
        /// Classification manifest (.toml)
        manifest: String,
        /// Output directory for generated artifacts
        #[arg(long, default_value = "generated")]
        out: String,
    },
    /// Print a program's isolated main source (everything outside
    /// function definitions)
    Extract {
        /// Guest program source file
        source: String,
        /// Guest language (js, python)
        #[arg(long)]
        language: String,
    },
    /// Generate a single unpartitioned baseline unit
    BuildFull {
        /// Classification manifest (.toml)
        manifest: String,
        /// Output directory for generated artifacts
        #[arg(long, default_value = "generated")]
        out: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("cleave={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Partition { manifest, out } => commands::partition::run(&manifest, &out),
        Commands::Extract { source, language } => commands::extract::run(&source, &language),
        Commands::BuildFull { manifest, out } => commands::build_full::run(&manifest, &out),
    }
}
