//! Integration tests for the GFA editing commands (add-sequence, add-tig).
//! Drives the compiled binary over small graphs in a temp directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn get_tigknit_binary() -> PathBuf {
    // CARGO_BIN_EXE_tigknit is set by cargo test for the binary crate
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_tigknit") {
        return PathBuf::from(path);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        manifest_dir.join("target/release/tigknit"),
        manifest_dir.join("target/debug/tigknit"),
    ];
    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    PathBuf::from("tigknit")
}

fn run_tigknit(args: &[&str]) -> std::process::Output {
    Command::new(get_tigknit_binary())
        .args(args)
        .output()
        .expect("failed to run tigknit")
}

fn write_gzip(path: &Path, content: &str) {
    let file = fs::File::create(path).unwrap();
    let mut writer = niffler::get_writer(
        Box::new(file),
        niffler::compression::Format::Gzip,
        niffler::Level::Nine,
    )
    .unwrap();
    writer.write_all(content.as_bytes()).unwrap();
}

#[test]
fn test_add_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();

    write_gzip(
        &work.join("reads.fasta.gz"),
        ">utg1 first unitig\nACGTACGT\n>utg2\nTTTT\n",
    );
    fs::write(
        work.join("graph.gfa"),
        "H\tVN:Z:1.0\nS\tutg1\t*\nL\tutg1\t+\tutg2\t-\t0M\nS\tutg2\t*\tLN:i:4\n",
    )
    .unwrap();

    let output = run_tigknit(&[
        "add-sequence",
        "-g",
        work.join("graph.gfa").to_str().unwrap(),
        "-r",
        work.join("reads.fasta.gz").to_str().unwrap(),
        "-o",
        work.join("out.gfa").to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "add-sequence failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // S lines carry the sequences, everything else is untouched, and the
    // trailing tags of rewritten S lines are dropped.
    let result = fs::read_to_string(work.join("out.gfa")).unwrap();
    assert_eq!(
        result,
        "H\tVN:Z:1.0\nS\tutg1\tACGTACGT\nL\tutg1\t+\tutg2\t-\t0M\nS\tutg2\tTTTT\n"
    );
}

#[test]
fn test_add_sequence_missing_segment_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();

    write_gzip(&work.join("reads.fasta.gz"), ">utg1\nACGT\n");
    fs::write(work.join("graph.gfa"), "S\tutg3\t*\n").unwrap();

    let output = run_tigknit(&[
        "add-sequence",
        "-g",
        work.join("graph.gfa").to_str().unwrap(),
        "-r",
        work.join("reads.fasta.gz").to_str().unwrap(),
        "-o",
        work.join("out.gfa").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("utg3"), "stderr was: {}", stderr);
}

#[test]
fn test_add_tig() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();

    fs::write(work.join("graph.gfa"), "S\tread1\tACGT\n").unwrap();
    // Header-keyed CSV: column order differs from the emitted one.
    fs::write(
        work.join("assignment.csv"),
        "tig_len,read,tig\n1200,read1,tig1\n1200,read2,tig1\n900,read3,tig2\n",
    )
    .unwrap();

    let output = run_tigknit(&[
        "add-tig",
        "-g",
        work.join("graph.gfa").to_str().unwrap(),
        "-a",
        work.join("assignment.csv").to_str().unwrap(),
        "-o",
        work.join("out.gfa").to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "add-tig failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // One L line per row, one S stub per tig in first-seen order.
    let result = fs::read_to_string(work.join("out.gfa")).unwrap();
    assert_eq!(
        result,
        "S\tread1\tACGT\n\
         L\ttig1\t+\tread1\t+\t10M\n\
         L\ttig1\t+\tread2\t+\t10M\n\
         L\ttig2\t+\tread3\t+\t10M\n\
         S\ttig1\t*\tLN:i:1200\n\
         S\ttig2\t*\tLN:i:900\n"
    );
}

#[test]
fn test_add_tig_custom_overlap() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();

    fs::write(work.join("graph.gfa"), "S\tread1\tACGT\n").unwrap();
    fs::write(work.join("assignment.csv"), "read,tig,tig_len\nread1,tig1,100\n").unwrap();

    let output = run_tigknit(&[
        "add-tig",
        "-g",
        work.join("graph.gfa").to_str().unwrap(),
        "-a",
        work.join("assignment.csv").to_str().unwrap(),
        "-o",
        work.join("out.gfa").to_str().unwrap(),
        "-O",
        "5M",
    ]);
    assert!(output.status.success());

    let result = fs::read_to_string(work.join("out.gfa")).unwrap();
    assert!(result.contains("L\ttig1\t+\tread1\t+\t5M\n"));
}

#[test]
fn test_add_tig_empty_assignment_copies_graph() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();

    let graph = "H\tVN:Z:1.0\nS\tread1\tACGT\n";
    fs::write(work.join("graph.gfa"), graph).unwrap();
    fs::write(work.join("assignment.csv"), "read,tig,tig_len\n").unwrap();

    let output = run_tigknit(&[
        "add-tig",
        "-g",
        work.join("graph.gfa").to_str().unwrap(),
        "-a",
        work.join("assignment.csv").to_str().unwrap(),
        "-o",
        work.join("out.gfa").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(work.join("out.gfa")).unwrap(), graph);
}
