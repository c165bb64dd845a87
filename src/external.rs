//! Subprocess bridges to samtools and Bandage.
//!
//! Region membership lookup and subgraph extraction/rendering are delegated
//! to external tools. A tool that runs and exits non-zero is logged and
//! treated as an empty result or a missing output, so one bad region never
//! aborts a whole run; a tool that cannot be spawned at all is a hard error.

use std::io;
use std::process::Command;

use log::{debug, error};
use rustc_hash::FxHashSet;

use crate::positions::Region;

/// Names of the contigs mapped within `region`, from `samtools view` over an
/// indexed BAM/CRAM. A non-zero exit is logged and yields an empty set.
pub fn tigs_on_region(mapping_path: &str, region: &Region) -> io::Result<FxHashSet<String>> {
    debug!("Running samtools view '{}' '{}'", mapping_path, region);
    let output = Command::new("samtools")
        .args(["view", mapping_path, &region.to_string()])
        .output()
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to run samtools: {}", e)))?;

    if !output.status.success() {
        error!(
            "Error during extraction of tig around region '{}' with samtools on file '{}', status {}",
            region, mapping_path, output.status
        );
        error!("{}", String::from_utf8_lossy(&output.stderr));
        return Ok(FxHashSet::default());
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.split('\t').next())
        .map(|name| name.to_string())
        .collect())
}

fn bandage_args(
    mode: &str,
    graph_path: &str,
    out_path: &str,
    tigs: &[String],
    depth: u32,
) -> Vec<String> {
    vec![
        mode.to_string(),
        graph_path.to_string(),
        out_path.to_string(),
        "--scope".to_string(),
        "aroundnodes".to_string(),
        "--nodes".to_string(),
        tigs.join(","),
        "--distance".to_string(),
        depth.to_string(),
        "--colour".to_string(),
        "uniform".to_string(),
        "--edgelen".to_string(),
        "50".to_string(),
    ]
}

fn run_bandage(
    mode: &str,
    extension: &str,
    what: &str,
    graph_path: &str,
    prefix: &str,
    suffix: &str,
    tigs: &[String],
    depth: u32,
) -> io::Result<()> {
    let out_path = format!("{}_{}.{}", prefix, suffix, extension);
    debug!("Running Bandage {} '{}' -> '{}'", mode, graph_path, out_path);
    let output = Command::new("Bandage")
        .args(bandage_args(mode, graph_path, &out_path, tigs, depth))
        .output()
        .map_err(|e| io::Error::new(e.kind(), format!("Failed to run Bandage: {}", e)))?;

    if !output.status.success() {
        error!(
            "Error during generation of {} around region '{}' with Bandage and tigs '{}', status {}",
            what,
            suffix,
            tigs.join(","),
            output.status
        );
        error!("{}", String::from_utf8_lossy(&output.stderr));
    }
    Ok(())
}

/// Render an SVG image of the graph neighborhood of `tigs`.
pub fn bandage_image(
    graph_path: &str,
    prefix: &str,
    suffix: &str,
    tigs: &[String],
    depth: u32,
) -> io::Result<()> {
    run_bandage("image", "svg", "image", graph_path, prefix, suffix, tigs, depth)
}

/// Reduce the graph to the neighborhood of `tigs`, written as GFA.
pub fn bandage_reduce(
    graph_path: &str,
    prefix: &str,
    suffix: &str,
    tigs: &[String],
    depth: u32,
) -> io::Result<()> {
    run_bandage(
        "reduce", "gfa", "subgraph", graph_path, prefix, suffix, tigs, depth,
    )
}
