mod cli_main;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use asmstats::pipeline::{rename_bins, run_assembly_stats, StatsConfig};
use cli_main::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Stats { fasta_dir, gap, output, threads, json } => {
            info!("Calculating assembly statistics for: {}", fasta_dir.display());
            let config = StatsConfig {
                fasta_dir,
                min_gap: gap,
                output_prefix: output,
                threads,
                json,
            };

            let summary = run_assembly_stats(&config).context("assembly statistics failed")?;

            println!("Wrote {} assemblies to {}", summary.written, summary.output.display());
            if !summary.skipped.is_empty() {
                warn!("{} files skipped:", summary.skipped.len());
                for skipped in &summary.skipped {
                    warn!("  {}: {}", skipped.path.display(), skipped.reason);
                }
            }
        }

        Commands::Rename { input_dir, prefix } => {
            let renamed = rename_bins(&input_dir, &prefix)
                .with_context(|| format!("renaming bins in {}", input_dir.display()))?;
            println!("Renamed {} FASTA files", renamed.len());
        }
    }
    Ok(())
}
