use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, StatsError};
use crate::io::fasta::{read_assembly, FastaWriter};
use crate::pipeline::assembly_stats::discover_fasta_files;

/// A bin file that was given its pipeline name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedBin {
    pub from: PathBuf,
    pub to: PathBuf,
    pub contigs: usize,
}

fn is_unbinned(file_name: &str) -> bool {
    let name = file_name.strip_suffix(".gz").unwrap_or(file_name);
    name.ends_with("unbinned.fa") || name.ends_with("unbinned.fasta")
}

/// Target stem for each input, in input order: `<prefix>.bin_NNNNNN` for
/// binned assemblies, numbered from 1, and `<prefix>.unbinned` otherwise.
fn target_stems(files: &[PathBuf], prefix: &str) -> Result<Vec<String>> {
    let mut bin_count = 0;
    let mut unbinned_seen = false;
    let mut stems = Vec::with_capacity(files.len());

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if is_unbinned(&name) {
            if unbinned_seen {
                return Err(StatsError::Config(format!(
                    "more than one unbinned assembly would be renamed to {}.unbinned.fasta",
                    prefix
                )));
            }
            unbinned_seen = true;
            stems.push(format!("{}.unbinned", prefix));
        } else {
            bin_count += 1;
            stems.push(format!("{}.bin_{:06}", prefix, bin_count));
        }
    }
    Ok(stems)
}

/// Rename every FASTA file in `input_dir` to the `<prefix>.<bin>.fasta`
/// scheme and number its contig headers `<prefix>.<bin>.contig_NNNNNN`.
///
/// All outputs are staged to temporary files first, so an input is never
/// overwritten before it has been read.
pub fn rename_bins(input_dir: &Path, prefix: &str) -> Result<Vec<RenamedBin>> {
    if prefix.is_empty() || prefix.contains('/') {
        return Err(StatsError::Config(format!("invalid bin prefix '{}'", prefix)));
    }

    let files = discover_fasta_files(input_dir)?;
    let stems = target_stems(&files, prefix)?;

    let mut staged: Vec<(PathBuf, RenamedBin)> = Vec::with_capacity(files.len());
    for (i, (path, stem)) in files.iter().zip(&stems).enumerate() {
        let tmp = input_dir.join(format!(".asmstats-rename-{}.tmp", i));
        match stage_bin(path, &tmp, stem) {
            Ok(contigs) => staged.push((
                tmp,
                RenamedBin {
                    from: path.clone(),
                    to: input_dir.join(format!("{}.fasta", stem)),
                    contigs,
                },
            )),
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                for (tmp, _) in &staged {
                    let _ = fs::remove_file(tmp);
                }
                return Err(e);
            }
        }
    }

    for (_, bin) in &staged {
        fs::remove_file(&bin.from)?;
    }
    let mut renamed = Vec::with_capacity(staged.len());
    for (tmp, bin) in staged {
        fs::rename(&tmp, &bin.to)?;
        info!(
            "Renamed {} -> {} ({} contigs)",
            bin.from.display(),
            bin.to.display(),
            bin.contigs
        );
        renamed.push(bin);
    }
    Ok(renamed)
}

fn stage_bin(input: &Path, tmp: &Path, stem: &str) -> Result<usize> {
    let records = read_assembly(input)?;
    let mut writer = FastaWriter::new(tmp)?;
    for (i, record) in records.iter().enumerate() {
        writer.write_record(&format!("{}.contig_{:06}", stem, i + 1), &record.seq)?;
    }
    writer.finish()?;
    Ok(records.len())
}
