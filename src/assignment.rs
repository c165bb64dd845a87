//! Read/tig assignment tables.
//!
//! Small CSV files tie selected reads to the contigs they support. Files are
//! header-keyed, so column order is free on input.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One contig with the read selected for it (header `tig,read`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TigRead {
    pub tig: String,
    pub read: String,
}

/// One read assigned to a contig, with the contig's length
/// (header `read,tig,tig_len`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadTigLen {
    pub read: String,
    pub tig: String,
    pub tig_len: u64,
}

/// CSV reader over an assignment table. The header row is required.
pub fn reader<R: Read>(inner: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().has_headers(true).from_reader(inner)
}

/// CSV writer for an assignment table. The header row comes from the record
/// type on the first `serialize` call.
pub fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(true).from_writer(inner)
}

/// CSV writer that emits `header` up front, so an empty table still carries
/// its header row. Serialized records must match the header's column order.
pub fn writer_with_header<W: Write>(inner: W, header: &[&str]) -> csv::Result<csv::Writer<W>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(inner);
    writer.write_record(header)?;
    Ok(writer)
}
