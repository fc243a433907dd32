pub mod contig;
pub mod scaffold;

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::io::fasta::{read_assembly, SequenceRecord};

pub use contig::{contig_stats, split_contigs, ContigStats, DEFAULT_MIN_GAP};
pub use scaffold::{scaffold_stats, ScaffoldStats};

/// One summary row per assembly file
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AssemblyStats {
    #[serde(rename = "sampleid")]
    pub sample_id: String,
    pub bin: String,
    pub assembly_length_bp: usize,
    pub scaffold_count: usize,
    #[serde(rename = "scaffold_N50_bp")]
    pub scaffold_n50_bp: Option<usize>,
    #[serde(rename = "scaffold_N90_bp")]
    pub scaffold_n90_bp: Option<usize>,
    pub contig_count: usize,
    #[serde(rename = "contig_N50_bp")]
    pub contig_n50_bp: Option<usize>,
    #[serde(rename = "contig_N90_bp")]
    pub contig_n90_bp: Option<usize>,
    #[serde(rename = "GC_perc")]
    pub gc_perc: f64,
    pub gaps_count: i64,
    pub gaps_sum_bp: usize,
    pub gaps_perc: f64,
}

impl AssemblyStats {
    pub fn new(file_name: &str, scaffolds: ScaffoldStats, contigs: ContigStats) -> Self {
        let (sample_id, bin) = sample_and_bin(file_name);
        AssemblyStats {
            sample_id,
            bin,
            assembly_length_bp: scaffolds.total_length,
            scaffold_count: scaffolds.count,
            scaffold_n50_bp: scaffolds.n50,
            scaffold_n90_bp: scaffolds.n90,
            contig_count: contigs.count,
            contig_n50_bp: contigs.n50,
            contig_n90_bp: contigs.n90,
            gc_perc: scaffolds.gc_percent,
            gaps_count: contigs.gap_count,
            gaps_sum_bp: scaffolds.gap_sum,
            gaps_perc: scaffolds.gap_percent,
        }
    }
}

/// Sample and bin identifiers are the first two `.`-separated fields of
/// the file name, e.g. `S1.bin_000001.fasta`.
pub fn sample_and_bin(file_name: &str) -> (String, String) {
    let mut fields = file_name.split('.');
    let sample = fields.next().unwrap_or_default().to_string();
    let bin = fields.next().unwrap_or_default().to_string();
    (sample, bin)
}

pub(crate) fn is_gap(base: u8) -> bool {
    base == b'N' || base == b'n'
}

/// Round to two decimals on the exact binary value, ties to even
pub(crate) fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Collect lengths longest first. The sort is stable, so equal lengths
/// keep their input order.
pub(crate) fn sorted_desc<I: IntoIterator<Item = usize>>(lengths: I) -> Vec<usize> {
    let mut lengths: Vec<usize> = lengths.into_iter().collect();
    lengths.sort_by(|a, b| b.cmp(a));
    lengths
}

/// Nx over lengths sorted longest first: the length at which the running
/// sum first reaches `percent`% of `total`. `None` for an empty set.
pub fn nx(sorted_desc: &[usize], total: usize, percent: u64) -> Option<usize> {
    let target = total as u64 * percent;
    let mut acc = 0u64;
    sorted_desc
        .iter()
        .find(|&&len| {
            acc += len as u64;
            acc * 100 >= target
        })
        .copied()
}

/// Scaffold and contig statistics for records already in memory
pub fn assembly_stats(
    file_name: &str,
    records: &[SequenceRecord],
    min_gap: usize,
    source: &Path,
) -> Result<AssemblyStats> {
    let contigs = contig_stats(records, min_gap)?;
    let scaffolds = scaffold_stats(records, source)?;
    Ok(AssemblyStats::new(file_name, scaffolds, contigs))
}

/// Read one FASTA assembly and compute its statistics row
pub fn calculate_stats(path: &Path, min_gap: usize) -> Result<AssemblyStats> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let records = read_assembly(path)?;
    assembly_stats(&file_name, &records, min_gap, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_nx_counts_duplicate_lengths() {
        // Equal lengths each contribute to the running sum
        assert_eq!(nx(&[4, 4], 8, 50), Some(4));
        assert_eq!(nx(&[4, 4], 8, 90), Some(4));
        assert_eq!(nx(&[5, 3, 3, 3, 1], 15, 90), Some(3));
        assert_eq!(nx(&[5, 3, 3, 3, 1], 15, 100), Some(1));
    }

    #[test]
    fn test_nx_empty_is_undefined() {
        assert_eq!(nx(&[], 0, 50), None);
    }

    #[test]
    fn test_nx_threshold_reached_exactly() {
        // 6 of 12 is exactly half
        assert_eq!(nx(&[6, 4, 2], 12, 50), Some(6));
    }

    #[test]
    fn test_sorted_desc() {
        assert_eq!(sorted_desc(vec![3, 10, 1, 10]), vec![10, 10, 3, 1]);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(20.0), 20.0);
        assert_eq!(round2(0.004), 0.0);
    }

    #[test]
    fn test_round2_ties_go_to_even() {
        // 0.125 and 0.375 are exact in binary
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        // 1.115 is stored just below the tie
        assert_eq!(round2(1.115), 1.11);
    }

    #[test]
    fn test_sample_and_bin() {
        assert_eq!(
            sample_and_bin("S1.bin_000001.fasta"),
            ("S1".to_string(), "bin_000001".to_string())
        );
        assert_eq!(
            sample_and_bin("S1.unbinned.fa"),
            ("S1".to_string(), "unbinned".to_string())
        );
        assert_eq!(sample_and_bin("S1"), ("S1".to_string(), String::new()));
    }

    #[test]
    fn test_calculate_stats() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">scaffold_1").unwrap();
        writeln!(file, "ACGTNNACGT").unwrap();
        writeln!(file, ">scaffold_2").unwrap();
        writeln!(file, "GGCC").unwrap();

        let stats = calculate_stats(file.path(), DEFAULT_MIN_GAP).unwrap();

        assert_eq!(stats.assembly_length_bp, 14);
        assert_eq!(stats.scaffold_count, 2);
        assert_eq!(stats.scaffold_n50_bp, Some(10));
        assert_eq!(stats.scaffold_n90_bp, Some(4));
        assert_eq!(stats.contig_count, 3);
        assert_eq!(stats.contig_n50_bp, Some(4));
        assert_eq!(stats.contig_n90_bp, Some(4));
        // 8 G/C out of 12 unambiguous bases
        assert_eq!(stats.gc_perc, 66.67);
        assert_eq!(stats.gaps_count, 1);
        assert_eq!(stats.gaps_sum_bp, 2);
        assert_eq!(stats.gaps_perc, 14.29);
    }

    #[test]
    fn test_stats_are_deterministic() {
        let records = vec![
            SequenceRecord::new("a", &b"ACGTNNNNACGTACGT"[..]),
            SequenceRecord::new("b", &b"GGGNCCC"[..]),
        ];
        let first = assembly_stats("S.b.fa", &records, 2, Path::new("S.b.fa")).unwrap();
        let second = assembly_stats("S.b.fa", &records, 2, Path::new("S.b.fa")).unwrap();
        assert_eq!(first, second);
    }
}
