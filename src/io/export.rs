use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::stats::AssemblyStats;

pub const STATS_HEADER: [&str; 13] = [
    "sampleid",
    "bin",
    "assembly_length_bp",
    "scaffold_count",
    "scaffold_N50_bp",
    "scaffold_N90_bp",
    "contig_count",
    "contig_N50_bp",
    "contig_N90_bp",
    "GC_perc",
    "gaps_count",
    "gaps_sum_bp",
    "gaps_perc",
];

fn optional(value: Option<usize>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Shortest decimal form that keeps a fractional digit: `50.0`, `43.17`
fn percent(value: f64) -> String {
    format!("{:?}", value)
}

/// Appends assembly statistics rows to a CSV table
pub struct StatsWriter<W: Write> {
    writer: W,
    rows: usize,
}

impl StatsWriter<BufWriter<File>> {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        StatsWriter::new(BufWriter::new(file))
    }
}

impl<W: Write> StatsWriter<W> {
    /// Wrap a writer and emit the header row
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", STATS_HEADER.join(","))?;
        Ok(StatsWriter { writer, rows: 0 })
    }

    pub fn write_row(&mut self, stats: &AssemblyStats) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            stats.sample_id,
            stats.bin,
            stats.assembly_length_bp,
            stats.scaffold_count,
            optional(stats.scaffold_n50_bp),
            optional(stats.scaffold_n90_bp),
            stats.contig_count,
            optional(stats.contig_n50_bp),
            optional(stats.contig_n90_bp),
            percent(stats.gc_perc),
            stats.gaps_count,
            stats.gaps_sum_bp,
            percent(stats.gaps_perc),
        )?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write all statistics rows to a JSON file
pub fn write_stats_json<P: AsRef<Path>>(stats: &[AssemblyStats], output: P) -> crate::error::Result<()> {
    let mut writer = BufWriter::new(File::create(output)?);
    serde_json::to_writer_pretty(&mut writer, stats)?;
    writer.flush()?;
    Ok(())
}
