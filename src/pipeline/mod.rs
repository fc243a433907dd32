//! Pipeline module - directory-level processing steps

pub mod assembly_stats;
pub mod rename;

pub use assembly_stats::{run_assembly_stats, BatchSummary, SkippedFile, StatsConfig};
pub use rename::{rename_bins, RenamedBin};
