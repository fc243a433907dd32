// src/io/fasta.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{Result, StatsError};

const LINE_WIDTH: usize = 80;

/// File name suffixes recognised as FASTA assemblies
pub const FASTA_SUFFIXES: [&str; 4] = [".fasta", ".fa", ".fasta.gz", ".fa.gz"];

/// A single FASTA record; one scaffold of an assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        SequenceRecord {
            id: id.into(),
            seq: seq.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

pub fn is_fasta_file_name(name: &str) -> bool {
    FASTA_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse every record from a FASTA stream.
///
/// Failures are reported against `source`, which only labels the error.
pub fn parse_records<R: BufRead>(reader: R, source: &Path) -> Result<Vec<SequenceRecord>> {
    let mut records = Vec::new();
    for result in fasta::Reader::from_bufread(reader).records() {
        let record = result.map_err(|e| StatsError::data(source, e.to_string()))?;
        if !record.seq().is_ascii() {
            return Err(StatsError::data(
                source,
                format!("record {}: non-ASCII sequence", records.len() + 1),
            ));
        }
        records.push(SequenceRecord::new(record.id(), record.seq()));
    }
    Ok(records)
}

/// Read a whole assembly. Any failure to open or parse the file is a data
/// error local to that file.
pub fn read_assembly<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let reader = open_fasta(path).map_err(|e| StatsError::data(path, e.to_string()))?;
    parse_records(reader, path)
}

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

impl FastaWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        if path.extension().map_or(false, |ext| ext == "gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    fn inner(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer,
            FastaWriter::Compressed(writer) => writer,
        }
    }

    /// Write one record, wrapping the sequence at 80 columns
    pub fn write_record(&mut self, header: &str, sequence: &[u8]) -> io::Result<()> {
        let writer = self.inner();
        writeln!(writer, ">{}", header)?;
        for chunk in sequence.chunks(LINE_WIDTH) {
            writer.write_all(chunk)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flush buffered output and, for gzip, write the trailer
    pub fn finish(self) -> io::Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush(),
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}
