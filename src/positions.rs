//! Genomic position lists and regions.
//!
//! Position files are whitespace-separated tables with one header line, then
//! one row per position of interest: `chrom begin end`, extra columns
//! ignored.

use std::io::{BufRead, Error as IoError};
use std::num::ParseIntError;

#[derive(Debug)]
pub enum ParseErr {
    IoError(IoError),
    MissingField { line: usize },
    InvalidCoordinate { line: usize, source: ParseIntError },
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErr::IoError(e) => write!(f, "IO error: {}", e),
            ParseErr::MissingField { line } => {
                write!(f, "Not enough fields in position record at line {}", line)
            }
            ParseErr::InvalidCoordinate { line, source } => {
                write!(f, "Invalid coordinate at line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for ParseErr {}

/// A genomic interval on a reference chromosome, displayed `chrom:begin-end`
/// as region-taking tools expect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    pub begin: u64,
    pub end: u64,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.begin, self.end)
    }
}

impl Region {
    /// Widen the region by `correction` on both sides, clamping the left
    /// edge at zero.
    pub fn padded(&self, correction: u64) -> Region {
        Region {
            chrom: self.chrom.clone(),
            begin: self.begin.saturating_sub(correction),
            end: self.end + correction,
        }
    }
}

/// Parse a position list. The first line is a header and is skipped; blank
/// lines are ignored; short or non-numeric rows are errors naming the line.
pub fn parse_positions<R: BufRead>(reader: R) -> Result<Vec<Region>, ParseErr> {
    let mut regions = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(ParseErr::IoError)?;
        let line_number = idx + 1;
        if idx == 0 || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let chrom = fields
            .next()
            .ok_or(ParseErr::MissingField { line: line_number })?;
        let begin = fields
            .next()
            .ok_or(ParseErr::MissingField { line: line_number })?
            .parse::<u64>()
            .map_err(|source| ParseErr::InvalidCoordinate {
                line: line_number,
                source,
            })?;
        let end = fields
            .next()
            .ok_or(ParseErr::MissingField { line: line_number })?
            .parse::<u64>()
            .map_err(|source| ParseErr::InvalidCoordinate {
                line: line_number,
                source,
            })?;

        regions.push(Region {
            chrom: chrom.to_string(),
            begin,
            end,
        });
    }
    Ok(regions)
}
