use std::path::Path;

use crate::error::{Result, StatsError};
use crate::io::fasta::SequenceRecord;
use crate::stats::{is_gap, nx, round2, sorted_desc};

/// Length, composition and gap statistics over the raw FASTA records
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldStats {
    pub count: usize,
    pub n50: Option<usize>,
    pub gap_sum: usize,
    pub total_length: usize,
    pub n90: Option<usize>,
    pub gc_percent: f64,
    pub gap_percent: f64,
}

#[derive(Default)]
struct BaseCounts {
    gc: usize,
    acgt: usize,
    gap: usize,
}

impl BaseCounts {
    fn add(&mut self, seq: &[u8]) {
        for &b in seq {
            match b.to_ascii_uppercase() {
                b'G' | b'C' => {
                    self.gc += 1;
                    self.acgt += 1;
                }
                b'A' | b'T' => self.acgt += 1,
                _ if is_gap(b) => self.gap += 1,
                _ => {}
            }
        }
    }
}

/// Compute scaffold statistics, treating every record as one scaffold.
///
/// Assemblies without records, without sequence, or without any A/C/G/T
/// base have no defined percentages and are rejected as data errors.
pub fn scaffold_stats(records: &[SequenceRecord], source: &Path) -> Result<ScaffoldStats> {
    if records.is_empty() {
        return Err(StatsError::data(source, "no sequence records"));
    }

    let lengths = sorted_desc(records.iter().map(SequenceRecord::len));
    let total_length: usize = lengths.iter().sum();
    if total_length == 0 {
        return Err(StatsError::data(source, "assembly has zero total length"));
    }

    let mut counts = BaseCounts::default();
    for record in records {
        counts.add(&record.seq);
    }
    if counts.acgt == 0 {
        return Err(StatsError::data(source, "no unambiguous A/C/G/T bases"));
    }

    Ok(ScaffoldStats {
        count: records.len(),
        n50: nx(&lengths, total_length, 50),
        gap_sum: counts.gap,
        total_length,
        n90: nx(&lengths, total_length, 90),
        gc_percent: round2(100.0 * counts.gc as f64 / counts.acgt as f64),
        gap_percent: round2(100.0 * counts.gap as f64 / total_length as f64),
    })
}
