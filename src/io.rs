//! Compression-aware file IO.
//!
//! Every flat-text input the toolkit reads may be plain or gzip/bzip2/xz
//! compressed; readers sniff the format from the magic bytes. `-` stands for
//! stdin or stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};

use niffler::compression::Format;

/// Open a possibly compressed input, returning a buffered reader and the
/// detected compression format.
pub fn open_reader(path: &str) -> io::Result<(Box<dyn BufRead>, Format)> {
    let raw: Box<dyn Read> = match path {
        "-" => Box::new(io::stdin()),
        _ => Box::new(File::open(path).map_err(|e| {
            io::Error::new(e.kind(), format!("Failed to open '{}': {}", path, e))
        })?),
    };
    let (reader, format) = niffler::get_reader(raw)
        .map_err(|e| io::Error::other(format!("Failed to open reader for '{}': {}", path, e)))?;
    Ok((Box::new(BufReader::new(reader)), format))
}

/// Create an output compressed with `format`.
pub fn create_writer(path: &str, format: Format) -> io::Result<Box<dyn Write>> {
    let raw: Box<dyn Write> = match path {
        "-" => Box::new(BufWriter::new(io::stdout())),
        _ => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            io::Error::new(e.kind(), format!("Failed to create '{}': {}", path, e))
        })?)),
    };
    niffler::get_writer(raw, format, niffler::Level::Nine)
        .map_err(|e| io::Error::other(format!("Failed to open writer for '{}': {}", path, e)))
}

/// Create a plain-text output.
pub fn create_plain_writer(path: &str) -> io::Result<Box<dyn Write>> {
    create_writer(path, Format::No)
}
