use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

use crate::error::{Result, StatsError};
use crate::io::export::{write_stats_json, StatsWriter};
use crate::io::fasta::is_fasta_file_name;
use crate::stats::{calculate_stats, AssemblyStats, DEFAULT_MIN_GAP};

pub const DEFAULT_OUTPUT_PREFIX: &str = "sample";

/// Settings for one directory scan
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub fasta_dir: PathBuf,
    pub min_gap: usize,
    pub output_prefix: String,
    /// Worker threads; 0 lets rayon pick
    pub threads: usize,
    pub json: Option<PathBuf>,
}

impl StatsConfig {
    pub fn new(fasta_dir: impl Into<PathBuf>) -> Self {
        StatsConfig {
            fasta_dir: fasta_dir.into(),
            min_gap: DEFAULT_MIN_GAP,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            threads: 0,
            json: None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.assembly_stats.csv", self.output_prefix))
    }

    /// Reject misconfiguration before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.min_gap == 0 {
            return Err(StatsError::Config(
                "minimum gap length must be a positive integer".to_string(),
            ));
        }
        if self.output_prefix.is_empty() {
            return Err(StatsError::Config("output prefix is empty".to_string()));
        }
        for output in std::iter::once(self.output_path()).chain(self.json.clone()) {
            check_parent_dir(&output)?;
        }
        Ok(())
    }
}

fn check_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(StatsError::Config(format!(
                "output directory {} does not exist",
                parent.display()
            )))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a directory scan
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub output: PathBuf,
    pub written: usize,
    pub skipped: Vec<SkippedFile>,
}

/// List FASTA files in `dir`, sorted by file name
pub fn discover_fasta_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| StatsError::InputNotFound {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_fasta = path
            .file_name()
            .map_or(false, |name| is_fasta_file_name(&name.to_string_lossy()));
        if is_fasta && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Compute statistics for every FASTA file in the configured directory and
/// write one CSV row per assembly.
///
/// Files with bad data are logged and skipped; configuration and I/O errors
/// on the output abort the run.
pub fn run_assembly_stats(config: &StatsConfig) -> Result<BatchSummary> {
    config.validate()?;
    let start = Instant::now();

    let files = discover_fasta_files(&config.fasta_dir)?;
    info!(
        "Found {} FASTA files in {}",
        files.len(),
        config.fasta_dir.display()
    );

    let output = config.output_path();
    let mut writer = StatsWriter::create(&output).map_err(|e| {
        StatsError::Config(format!("cannot create {}: {}", output.display(), e))
    })?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| StatsError::Config(format!("failed to build thread pool: {}", e)))?;

    let min_gap = config.min_gap;
    let results: Vec<Result<AssemblyStats>> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                debug!("Processing {}", path.display());
                calculate_stats(path, min_gap)
            })
            .collect()
    });

    let mut summary = BatchSummary {
        output: output.clone(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(results.len());

    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(stats) => {
                writer.write_row(&stats)?;
                rows.push(stats);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                summary.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }
    summary.written = writer.rows();
    writer.finish()?;

    if let Some(json_path) = &config.json {
        write_stats_json(&rows, json_path)?;
        info!("Wrote JSON statistics to {}", json_path.display());
    }

    info!(
        "Wrote {} rows to {} in {:.2}s ({} skipped)",
        summary.written,
        output.display(),
        start.elapsed().as_secs_f32(),
        summary.skipped.len()
    );
    Ok(summary)
}
