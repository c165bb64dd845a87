//! Split an assembly FASTA into one file per cluster.
//!
//! The cluster key is the record id's prefix before the first `_` (the whole
//! id if none). Output files are created on demand as `{prefix}{cluster}.fasta`.

use std::fs::File;
use std::io;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::io::open_reader;

pub fn run_split_asm(assembly_path: &str, prefix: &str) -> io::Result<()> {
    let (assembly_reader, _) = open_reader(assembly_path)?;

    let mut writers: FxHashMap<String, bio::io::fasta::Writer<File>> = FxHashMap::default();
    let mut counts: FxHashMap<String, u64> = FxHashMap::default();
    let mut cluster_order: Vec<String> = Vec::new();

    for result in bio::io::fasta::Reader::new(assembly_reader).records() {
        let record = result.map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to parse FASTA record in '{}': {}", assembly_path, e),
            )
        })?;

        let cluster = record.id().split('_').next().unwrap_or("").to_string();
        if !writers.contains_key(&cluster) {
            let path = format!("{}{}.fasta", prefix, cluster);
            debug!("Creating '{}'", path);
            let file = File::create(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("Failed to create '{}': {}", path, e))
            })?;
            writers.insert(cluster.clone(), bio::io::fasta::Writer::new(file));
            cluster_order.push(cluster.clone());
        }
        if let Some(writer) = writers.get_mut(&cluster) {
            writer.write_record(&record)?;
        }
        *counts.entry(cluster).or_insert(0) += 1;
    }

    for writer in writers.values_mut() {
        writer.flush()?;
    }
    for cluster in &cluster_order {
        info!("{}: {} records", cluster, counts[cluster]);
    }
    Ok(())
}
