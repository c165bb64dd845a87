//! Line-oriented GFA handling.
//!
//! Assembly graphs are edited as streams of tab-separated lines: operations
//! rewrite or append `S` and `L` lines and copy everything else through
//! untouched. Only the fields the toolkit consumes are modeled; no graph
//! structure is ever built in memory.

use std::io::{BufRead, Error as IoError};

use rustc_hash::FxHashSet;

#[derive(Debug)]
pub enum ParseErr {
    NotEnoughFields,
    IoError(IoError),
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErr::NotEnoughFields => write!(f, "Not enough fields in GFA segment line"),
            ParseErr::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ParseErr {}

/// Borrowed view of a GFA `S` line.
///
/// Field 2 is the segment name, field 3 the sequence (`*` when absent).
/// Trailing tag fields are ignored.
#[derive(Debug, PartialEq, Eq)]
pub struct SegmentLine<'a> {
    pub name: &'a str,
    pub sequence: &'a str,
}

impl<'a> SegmentLine<'a> {
    /// Parse an `S` line.
    pub fn parse(line: &'a str) -> Result<Self, ParseErr> {
        let mut fields = line.split('\t');
        let _record_type = fields.next();
        let name = fields.next().ok_or(ParseErr::NotEnoughFields)?;
        let sequence = fields.next().ok_or(ParseErr::NotEnoughFields)?;
        Ok(SegmentLine { name, sequence })
    }
}

/// Whether a GFA line is a segment record.
pub fn is_segment(line: &str) -> bool {
    line.starts_with("S\t")
}

/// Collect the names of all segments in a GFA stream.
pub fn segment_names<R: BufRead>(reader: R) -> Result<FxHashSet<String>, ParseErr> {
    let mut names = FxHashSet::default();
    for line in reader.lines() {
        let line = line.map_err(ParseErr::IoError)?;
        if is_segment(&line) {
            names.insert(SegmentLine::parse(&line)?.name.to_string());
        }
    }
    Ok(names)
}

/// Format a segment line carrying its sequence.
pub fn segment_line(name: &str, sequence: &str) -> String {
    format!("S\t{}\t{}", name, sequence)
}

/// Format a sequence-less segment line carrying only a length tag.
pub fn segment_stub(name: &str, length: u64) -> String {
    format!("S\t{}\t*\tLN:i:{}", name, length)
}

/// Format a link line.
pub fn link_line(
    from: &str,
    from_orient: char,
    to: &str,
    to_orient: char,
    overlap: &str,
) -> String {
    format!(
        "L\t{}\t{}\t{}\t{}\t{}",
        from, from_orient, to, to_orient, overlap
    )
}
