//! Select reads overlapping contig extremities.
//!
//! From a reads-to-contigs PAF, keep the alignments that cover most of their
//! read, then pick out the ones landing near either end of their contig.
//! Selected read names go to a plain list (one per line, repeats allowed);
//! one `tig,read` assignment row is written per contig that had at least one
//! extremity read, keyed to the last such read.

use std::io::{self, Write};

use log::info;
use rustc_hash::FxHashMap;

use crate::assignment::{self, TigRead};
use crate::io::{create_plain_writer, open_reader};
use crate::paf::{self, PafRecord};

/// An alignment must cover more than this fraction of its read to count.
const MIN_QUERY_FRACTION: f64 = 0.7;
/// Extremity threshold floor, as a fraction of the contig length.
const EXTREMITY_FRACTION: f64 = 0.05;

pub fn run_filter_reads(
    paf_path: &str,
    output_path: &str,
    assignment_path: &str,
    distance: f64,
) -> io::Result<()> {
    let (paf_reader, _) = open_reader(paf_path)?;
    let records = paf::parse_paf(paf_reader).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse PAF record in '{}': {}", paf_path, e),
        )
    })?;

    // Group spanning alignments per contig, keeping first-seen group order
    // and in-group record order.
    let mut groups: FxHashMap<(String, u64), Vec<PafRecord>> = FxHashMap::default();
    let mut group_order: Vec<(String, u64)> = Vec::new();
    for record in records {
        if !record.spans_query(MIN_QUERY_FRACTION) {
            continue;
        }
        let key = (record.target_name.clone(), record.target_len);
        if !groups.contains_key(&key) {
            group_order.push(key.clone());
        }
        groups.entry(key).or_default().push(record);
    }

    let mut out = create_plain_writer(output_path)?;
    let mut assignment_out =
        assignment::writer_with_header(create_plain_writer(assignment_path)?, &["tig", "read"])
            .map_err(|e| {
                io::Error::other(format!("Failed to write header to '{}': {}", assignment_path, e))
            })?;
    let mut selected = 0u64;
    let mut assigned = 0u64;
    for key in &group_order {
        let threshold = (EXTREMITY_FRACTION * key.1 as f64).max(distance);
        let mut tig_read: Option<&str> = None;
        for record in &groups[key] {
            if record.near_target_extremity(threshold) {
                writeln!(out, "{}", record.query_name)?;
                tig_read = Some(&record.query_name);
                selected += 1;
            }
        }
        if let Some(read) = tig_read {
            assignment_out
                .serialize(TigRead {
                    tig: key.0.clone(),
                    read: read.to_string(),
                })
                .map_err(|e| {
                    io::Error::other(format!(
                        "Failed to write assignment record to '{}': {}",
                        assignment_path, e
                    ))
                })?;
            assigned += 1;
        }
    }

    info!(
        "Selected {} extremity reads over {} of {} tigs",
        selected,
        assigned,
        group_order.len()
    );
    assignment_out
        .flush()
        .map_err(|e| io::Error::other(format!("Failed to flush '{}': {}", assignment_path, e)))?;
    out.flush()
}
