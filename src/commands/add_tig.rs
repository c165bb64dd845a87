//! Append read/tig assignments to a GFA as link edges.
//!
//! The graph is copied through unchanged; one `L` line is appended per
//! assignment row, then one sequence-less `S` stub per distinct tig so the
//! new edges resolve. Tigs keep the order of their first assignment row; a
//! repeated tig keeps the last length seen.

use std::io::{self, BufRead, Write};

use log::info;
use rustc_hash::FxHashMap;

use crate::assignment::{self, ReadTigLen};
use crate::gfa;
use crate::io::{create_plain_writer, open_reader};

pub fn run_add_tig(
    gfa_path: &str,
    assignment_path: &str,
    output_path: &str,
    overlap: &str,
) -> io::Result<()> {
    let mut out = create_plain_writer(output_path)?;

    let (gfa_reader, _) = open_reader(gfa_path)?;
    for line in gfa_reader.lines() {
        writeln!(out, "{}", line?)?;
    }

    let (assignment_reader, _) = open_reader(assignment_path)?;
    let mut tig_lens: FxHashMap<String, u64> = FxHashMap::default();
    let mut tig_order: Vec<String> = Vec::new();
    let mut rows = 0u64;
    for result in assignment::reader(assignment_reader).deserialize() {
        let row: ReadTigLen = result.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Failed to parse assignment record in '{}': {}",
                    assignment_path, e
                ),
            )
        })?;
        if !tig_lens.contains_key(&row.tig) {
            tig_order.push(row.tig.clone());
        }
        tig_lens.insert(row.tig.clone(), row.tig_len);
        writeln!(out, "{}", gfa::link_line(&row.tig, '+', &row.read, '+', overlap))?;
        rows += 1;
    }

    for tig in &tig_order {
        writeln!(out, "{}", gfa::segment_stub(tig, tig_lens[tig]))?;
    }

    info!("Appended {} links over {} tigs", rows, tig_order.len());
    out.flush()
}
