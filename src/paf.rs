//! PAF (Pairwise Alignment Format) parsing
//!
//! Line-oriented parsing of the tab-separated records produced by read
//! overlappers and mappers. Only the nine leading fields the toolkit consumes
//! are kept; columns 10-12 and trailing tags are accepted and ignored, but a
//! line with fewer than the 12 mandatory columns is rejected.

use std::io::{BufRead, Error as IoError};
use std::num::ParseIntError;

#[derive(Debug)]
pub enum ParseErr {
    NotEnoughFields,
    IoError(IoError),
    InvalidField(ParseIntError),
    InvalidStrand(String),
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErr::NotEnoughFields => write!(f, "Not enough fields in PAF record"),
            ParseErr::IoError(e) => write!(f, "IO error: {}", e),
            ParseErr::InvalidField(e) => write!(f, "Invalid field: {}", e),
            ParseErr::InvalidStrand(s) => write!(f, "Invalid strand: '{}'", s),
        }
    }
}

impl std::error::Error for ParseErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

/// A single PAF alignment/overlap record.
///
/// Coordinates are 0-based as in the format itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PafRecord {
    pub query_name: String,
    pub query_len: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub strand: Strand,
    pub target_name: String,
    pub target_len: u64,
    pub target_start: u64,
    pub target_end: u64,
}

impl PafRecord {
    /// Parse a single PAF line.
    pub fn parse(line: &str) -> Result<Self, ParseErr> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 12 {
            return Err(ParseErr::NotEnoughFields);
        }

        let parse_u64 = |s: &str| s.parse::<u64>().map_err(ParseErr::InvalidField);
        let strand = match fields[4] {
            "+" => Strand::Forward,
            "-" => Strand::Reverse,
            other => return Err(ParseErr::InvalidStrand(other.to_string())),
        };

        Ok(PafRecord {
            query_name: fields[0].to_string(),
            query_len: parse_u64(fields[1])?,
            query_start: parse_u64(fields[2])?,
            query_end: parse_u64(fields[3])?,
            strand,
            target_name: fields[5].to_string(),
            target_len: parse_u64(fields[6])?,
            target_start: parse_u64(fields[7])?,
            target_end: parse_u64(fields[8])?,
        })
    }

    /// Aligned length on the read.
    pub fn query_span(&self) -> u64 {
        self.query_end - self.query_start
    }

    /// Whether the alignment covers more than `frac` of the read.
    pub fn spans_query(&self, frac: f64) -> bool {
        self.query_span() as f64 > frac * self.query_len as f64
    }

    /// Aligned length on the target, tolerant of swapped coordinates.
    pub fn target_span(&self) -> u64 {
        self.target_start.max(self.target_end) - self.target_start.min(self.target_end)
    }

    /// Distance from the alignment to the closest target extremity.
    pub fn target_extremity_distance(&self) -> u64 {
        let begin = self.target_start.min(self.target_end);
        let end = self.target_start.max(self.target_end);
        begin.min(self.target_len.saturating_sub(end))
    }

    /// Whether the alignment reaches within `threshold` bases of either end
    /// of the target sequence.
    pub fn near_target_extremity(&self, threshold: f64) -> bool {
        !(self.target_start as f64 > threshold
            && (self.target_end as f64) < self.target_len as f64 - threshold)
    }
}

/// Parse a whole PAF stream into records. Blank lines are skipped.
pub fn parse_paf<R: BufRead>(reader: R) -> Result<Vec<PafRecord>, ParseErr> {
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(ParseErr::IoError)?;
        if line.is_empty() {
            continue;
        }
        records.push(PafRecord::parse(&line)?);
    }
    Ok(records)
}
