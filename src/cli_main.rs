use clap::{Parser, Subcommand};
use std::path::PathBuf;

use asmstats::pipeline::assembly_stats::DEFAULT_OUTPUT_PREFIX;
use asmstats::stats::DEFAULT_MIN_GAP;

#[derive(Parser, Debug)]
#[command(name = "asmstats", version, about = "Assembly statistics for genome bins", long_about = None)]
pub struct Cli {
    /// Log per-file progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate scaffold and contig statistics for every FASTA file in a directory
    Stats {
        /// Directory containing FASTA files (.fasta, .fa, optionally gzipped)
        #[arg(short, long, alias = "fasta_dir")]
        fasta_dir: PathBuf,

        /// Minimum run of Ns that splits a scaffold into contigs
        #[arg(short, long, default_value_t = DEFAULT_MIN_GAP)]
        gap: usize,

        /// Output file prefix; writes <prefix>.assembly_stats.csv
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PREFIX)]
        output: String,

        /// Number of threads
        #[arg(long, default_value_t = num_cpus::get())]
        threads: usize,

        /// Optional path to also write the statistics as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Rename bin FASTA files and their contig headers to <prefix>.bin_NNNNNN
    Rename {
        /// Directory containing the bin FASTA files
        #[arg(short, long, alias = "input_dir")]
        input_dir: PathBuf,

        /// Prefix for file names and contig headers
        #[arg(short, long)]
        prefix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_defaults() {
        let cli = Cli::try_parse_from(["asmstats", "stats", "--fasta-dir", "bins"]).unwrap();
        match cli.command {
            Commands::Stats { fasta_dir, gap, output, json, .. } => {
                assert_eq!(fasta_dir, PathBuf::from("bins"));
                assert_eq!(gap, 2);
                assert_eq!(output, "sample");
                assert!(json.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_underscore_alias_accepted() {
        let cli = Cli::try_parse_from([
            "asmstats", "stats", "--fasta_dir", "bins", "--gap", "5", "--output", "S1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Stats { gap: 5, .. }));
    }

    #[test]
    fn test_negative_gap_rejected() {
        assert!(Cli::try_parse_from(["asmstats", "stats", "--fasta-dir", "bins", "--gap", "-1"]).is_err());
    }

    #[test]
    fn test_fasta_dir_required() {
        assert!(Cli::try_parse_from(["asmstats", "stats"]).is_err());
    }
}
