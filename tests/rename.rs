use std::fs;

use asmstats::io::fasta::read_assembly;
use asmstats::pipeline::{rename_bins, run_assembly_stats, StatsConfig};
use tempfile::tempdir;

#[test]
fn test_rename_bins_and_headers() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bin.1.fa"), ">k141_1 flag=1\nACGT\n>k141_9\nGGCC\n").unwrap();
    fs::write(dir.path().join("bin.2.fa"), ">k141_3\nAAAA\n").unwrap();
    fs::write(dir.path().join("bin.unbinned.fa"), ">k141_5\nTTTT\n").unwrap();

    let renamed = rename_bins(dir.path(), "S1").unwrap();
    assert_eq!(renamed.len(), 3);

    let mut names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec!["S1.bin_000001.fasta", "S1.bin_000002.fasta", "S1.unbinned.fasta"]
    );

    let bin1 = read_assembly(dir.path().join("S1.bin_000001.fasta")).unwrap();
    assert_eq!(bin1[0].id, "S1.bin_000001.contig_000001");
    assert_eq!(bin1[1].id, "S1.bin_000001.contig_000002");
    assert_eq!(bin1[1].seq, b"GGCC");

    let unbinned = read_assembly(dir.path().join("S1.unbinned.fasta")).unwrap();
    assert_eq!(unbinned[0].id, "S1.unbinned.contig_000001");
    assert_eq!(renamed[2].contigs, 1);
}

#[test]
fn test_rename_is_safe_when_targets_already_exist() {
    let dir = tempdir().unwrap();
    // A.fa sorts first and takes the name the second input already has
    fs::write(dir.path().join("A.fa"), ">a\nCCCC\n").unwrap();
    fs::write(dir.path().join("S1.bin_000001.fasta"), ">b\nAAAA\n").unwrap();

    rename_bins(dir.path(), "S1").unwrap();

    let first = read_assembly(dir.path().join("S1.bin_000001.fasta")).unwrap();
    let second = read_assembly(dir.path().join("S1.bin_000002.fasta")).unwrap();
    assert_eq!(first[0].seq, b"CCCC");
    assert_eq!(second[0].seq, b"AAAA");
    assert!(!dir.path().join("A.fa").exists());
}

#[test]
fn test_renamed_bins_feed_stats_table() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(dir.path().join("maxbin.001.fasta"), ">c\nACGTNNACGT\n").unwrap();

    rename_bins(dir.path(), "S9").unwrap();

    let mut config = StatsConfig::new(dir.path());
    config.output_prefix = out.path().join("S9").to_string_lossy().into_owned();
    let summary = run_assembly_stats(&config).unwrap();

    let csv = fs::read_to_string(summary.output).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with("S9,bin_000001,10,"));
}
