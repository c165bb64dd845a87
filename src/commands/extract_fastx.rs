//! Pull out the reads supporting contig extremities, with their assemblies.
//!
//! Two PAF passes drive the selection: reads whose best assembly hit lands
//! within `distance` of a contig end seed the set, then one round through
//! the read-to-read overlaps pulls in their direct partners. The output
//! FASTA starts with every assembly record and continues with the selected
//! reads that have an assignment, qualities dropped; the assignment CSV gets
//! one `read,tig,tig_len` row per emitted read. The sequence output mirrors
//! the compression of the reads input.

use std::collections::hash_map::Entry;
use std::io::{self, BufRead};

use log::info;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::assignment::{self, ReadTigLen};
use crate::io::{create_plain_writer, create_writer, open_reader};
use crate::paf::PafRecord;

/// An alignment must cover this fraction of its read (measured on the
/// target) to assign the read to a tig.
const MIN_TARGET_FRACTION: f64 = 0.7;

struct BestHit {
    tig: String,
    extremity_distance: u64,
    target_span: u64,
}

fn parse_record(line: &str, path: &str) -> io::Result<PafRecord> {
    PafRecord::parse(line).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse PAF record in '{}': {}", path, e),
        )
    })
}

/// Best assembly hit per read, plus each tig's length (first occurrence
/// wins). "Best" is the hit with the largest target span.
fn best_hits(
    map2asm: Box<dyn BufRead>,
    path: &str,
) -> io::Result<(FxHashMap<String, BestHit>, FxHashMap<String, u64>)> {
    let mut best: FxHashMap<String, BestHit> = FxHashMap::default();
    let mut tig_lens: FxHashMap<String, u64> = FxHashMap::default();

    for line in map2asm.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record = parse_record(&line, path)?;
        tig_lens
            .entry(record.target_name.clone())
            .or_insert(record.target_len);

        if record.target_span() as f64 <= MIN_TARGET_FRACTION * record.query_len as f64 {
            continue;
        }
        let hit = BestHit {
            extremity_distance: record.target_extremity_distance(),
            target_span: record.target_span(),
            tig: record.target_name,
        };
        match best.entry(record.query_name) {
            Entry::Occupied(mut e) => {
                if e.get().target_span < hit.target_span {
                    e.insert(hit);
                }
            }
            Entry::Vacant(e) => {
                e.insert(hit);
            }
        }
    }
    Ok((best, tig_lens))
}

/// One expansion round: any read overlapping a selected read joins the set.
fn expand_by_overlaps(
    selected: &mut FxHashSet<String>,
    read2read: Box<dyn BufRead>,
    path: &str,
) -> io::Result<()> {
    let mut partners: FxHashSet<String> = FxHashSet::default();
    for line in read2read.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record = parse_record(&line, path)?;
        if selected.contains(&record.query_name) {
            partners.insert(record.target_name.clone());
        }
        if selected.contains(&record.target_name) {
            partners.insert(record.query_name);
        }
    }
    selected.extend(partners);
    Ok(())
}

pub fn run_extract_fastx(
    map2asm_path: &str,
    read2read_path: &str,
    input_path: &str,
    assemblies_path: &str,
    output_path: &str,
    assignment_path: &str,
    distance: u64,
) -> io::Result<()> {
    let (map2asm, _) = open_reader(map2asm_path)?;
    let (best, tig_lens) = best_hits(map2asm, map2asm_path)?;

    let mut selected: FxHashSet<String> = best
        .iter()
        .filter(|(_, hit)| hit.extremity_distance <= distance)
        .map(|(read, _)| read.clone())
        .collect();
    let seeds = selected.len();

    let (read2read, _) = open_reader(read2read_path)?;
    expand_by_overlaps(&mut selected, read2read, read2read_path)?;
    info!(
        "Selected {} reads ({} at extremities, {} by overlap)",
        selected.len(),
        seeds,
        selected.len() - seeds
    );

    let (reads_reader, compression) = open_reader(input_path)?;
    let mut fasta_out = bio::io::fasta::Writer::new(create_writer(output_path, compression)?);
    let mut assignment_out = assignment::writer_with_header(
        create_plain_writer(assignment_path)?,
        &["read", "tig", "tig_len"],
    )
    .map_err(|e| {
        io::Error::other(format!("Failed to write header to '{}': {}", assignment_path, e))
    })?;

    let (assemblies_reader, _) = open_reader(assemblies_path)?;
    for record in bio::io::fasta::Reader::new(assemblies_reader).records() {
        let record = record.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to parse FASTA record in '{}': {}", assemblies_path, e),
            )
        })?;
        fasta_out.write_record(&record)?;
    }

    let mut emitted = 0u64;
    for record in bio::io::fastq::Reader::new(reads_reader).records() {
        let record = record.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to parse FASTQ record in '{}': {}", input_path, e),
            )
        })?;
        if !selected.contains(record.id()) {
            continue;
        }
        if let Some(hit) = best.get(record.id()) {
            assignment_out
                .serialize(ReadTigLen {
                    read: record.id().to_string(),
                    tig: hit.tig.clone(),
                    tig_len: tig_lens[&hit.tig],
                })
                .map_err(|e| {
                    io::Error::other(format!(
                        "Failed to write assignment record to '{}': {}",
                        assignment_path, e
                    ))
                })?;
            fasta_out.write(record.id(), None, record.seq())?;
            emitted += 1;
        }
    }
    info!("Wrote {} selected reads to '{}'", emitted, output_path);

    assignment_out
        .flush()
        .map_err(|e| io::Error::other(format!("Failed to flush '{}': {}", assignment_path, e)))?;
    fasta_out.flush()
}
