pub mod export;
pub mod fasta;
