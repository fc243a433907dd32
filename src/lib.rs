//! Assembly statistics for FASTA genome bins: scaffold and contig counts,
//! N50/N90, GC content and gap summaries, one CSV row per assembly.

pub mod error;
pub mod io;
pub mod pipeline;
pub mod stats;

pub use error::{Result, StatsError};
