//! Extract and render graph neighborhoods around genomic positions.
//!
//! For each position, the contigs mapped over the (padded) region are looked
//! up with `samtools view`, intersected with the segments actually present
//! in the per-chromosome graph, and the neighborhood of the surviving tigs
//! is rendered (`Bandage image`) and extracted (`Bandage reduce`). Failures
//! on one position are logged and the loop moves on.

use std::io;
use std::path::Path;

use log::{debug, error, info};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::external;
use crate::gfa;
use crate::io::open_reader;
use crate::positions;

pub fn run_subgraph(
    positions_path: &str,
    mapping_path: &str,
    graph_template: &str,
    depth: u32,
    correction: u64,
    out_prefix: &str,
) -> io::Result<()> {
    let (positions_reader, _) = open_reader(positions_path)?;
    let regions = positions::parse_positions(positions_reader).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to parse position file '{}': {}", positions_path, e),
        )
    })?;
    info!("Parsed {} positions from '{}'", regions.len(), positions_path);

    // Segment sets are read once per graph file per run.
    let mut segment_sets: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();

    for region in regions {
        let graph_path = graph_template.replace("{chrom}", &region.chrom);
        if !Path::new(&graph_path).exists() {
            debug!("No graph file '{}' for region '{}'", graph_path, region);
            continue;
        }

        if !segment_sets.contains_key(&graph_path) {
            let (graph_reader, _) = open_reader(&graph_path)?;
            let names = gfa::segment_names(graph_reader).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Failed to read segments of '{}': {}", graph_path, e),
                )
            })?;
            debug!("Collected {} segments from '{}'", names.len(), graph_path);
            segment_sets.insert(graph_path.clone(), names);
        }
        let available = &segment_sets[&graph_path];

        let mapped = external::tigs_on_region(mapping_path, &region.padded(correction))?;
        let mut tigs: Vec<String> = mapped
            .into_iter()
            .filter(|tig| available.contains(tig))
            .collect();
        if tigs.is_empty() {
            error!(
                "No tigs around region '{}' are present in graph file '{}'",
                region, graph_path
            );
            continue;
        }
        tigs.sort_by(|a, b| natord::compare(a, b));

        let suffix = format!("{}_{}", region, tigs.join(","));
        external::bandage_image(&graph_path, out_prefix, &suffix, &tigs, depth)?;
        external::bandage_reduce(&graph_path, out_prefix, &suffix, &tigs, depth)?;
    }

    Ok(())
}
