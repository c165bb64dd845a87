//! Fill GFA `S` lines with the sequences of their segments.
//!
//! Assemblers commonly emit graphs whose segment lines carry `*` in place of
//! the sequence. This command rewrites every `S` line with the sequence of
//! the same name taken from a FASTA file; every other line is copied through
//! untouched.

use std::io::{self, BufRead, Write};

use log::info;
use rustc_hash::FxHashMap;

use crate::gfa;
use crate::io::{create_plain_writer, open_reader};

pub fn run_add_sequence(gfa_path: &str, reads_path: &str, output_path: &str) -> io::Result<()> {
    let (reads_reader, _) = open_reader(reads_path)?;
    let mut sequences: FxHashMap<String, Vec<u8>> = FxHashMap::default();
    for record in bio::io::fasta::Reader::new(reads_reader).records() {
        let record = record.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to parse FASTA record in '{}': {}", reads_path, e),
            )
        })?;
        sequences.insert(record.id().to_string(), record.seq().to_vec());
    }
    info!("Loaded {} sequences from '{}'", sequences.len(), reads_path);

    let (gfa_reader, _) = open_reader(gfa_path)?;
    let mut out = create_plain_writer(output_path)?;
    for line in gfa_reader.lines() {
        let line = line?;
        if gfa::is_segment(&line) {
            let segment = gfa::SegmentLine::parse(&line).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Failed to parse GFA segment in '{}': {}", gfa_path, e),
                )
            })?;
            let sequence = sequences.get(segment.name).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Segment '{}' has no sequence in '{}'",
                        segment.name, reads_path
                    ),
                )
            })?;
            writeln!(
                out,
                "{}",
                gfa::segment_line(segment.name, &String::from_utf8_lossy(sequence))
            )?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()
}
