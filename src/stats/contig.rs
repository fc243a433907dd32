use crate::error::{Result, StatsError};
use crate::io::fasta::SequenceRecord;
use crate::stats::{is_gap, nx, sorted_desc};

pub const DEFAULT_MIN_GAP: usize = 2;

/// Length statistics over contigs re-derived from the scaffolds
#[derive(Debug, Clone, PartialEq)]
pub struct ContigStats {
    pub count: usize,
    pub n50: Option<usize>,
    /// Contig count minus scaffold count. Negative when whole scaffolds
    /// consist of gap.
    pub gap_count: i64,
    pub n90: Option<usize>,
    pub total_length: usize,
}

/// Split a scaffold on every gap run of at least `min_gap` bases.
///
/// Shorter runs stay inside the contig. Empty fragments from leading,
/// trailing or adjacent gaps are dropped.
pub fn split_contigs(seq: &[u8], min_gap: usize) -> Vec<&[u8]> {
    let mut contigs = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < seq.len() {
        if !is_gap(seq[i]) {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < seq.len() && is_gap(seq[i]) {
            i += 1;
        }
        if i - run_start >= min_gap {
            if run_start > start {
                contigs.push(&seq[start..run_start]);
            }
            start = i;
        }
    }
    if start < seq.len() {
        contigs.push(&seq[start..]);
    }

    contigs
}

pub fn contig_stats(records: &[SequenceRecord], min_gap: usize) -> Result<ContigStats> {
    if min_gap == 0 {
        return Err(StatsError::Config(
            "minimum gap length must be a positive integer".to_string(),
        ));
    }

    let lengths = sorted_desc(
        records
            .iter()
            .flat_map(|r| split_contigs(&r.seq, min_gap))
            .map(<[u8]>::len),
    );
    let total_length: usize = lengths.iter().sum();

    Ok(ContigStats {
        count: lengths.len(),
        n50: nx(&lengths, total_length, 50),
        gap_count: lengths.len() as i64 - records.len() as i64,
        n90: nx(&lengths, total_length, 90),
        total_length,
    })
}
