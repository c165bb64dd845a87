//! Integration test for the subgraph command.
//! samtools and Bandage are replaced by stub scripts on PATH that record
//! their arguments, so the orchestration is checked end to end without the
//! real tools installed.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn get_tigknit_binary() -> PathBuf {
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

fn write_stub(path: &Path, script: &str) {
    fs::write(path, script).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_subgraph_orchestration() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();
    let bin = work.join("bin");
    fs::create_dir(&bin).unwrap();

    // Stub samtools: log the invocation, report two mapped contigs.
    write_stub(
        &bin.join("samtools"),
        &format!(
            "#!/bin/sh\necho \"$@\" >> {log}\nprintf 'tig1\\t0\\tchr1\\n'\nprintf 'tig9\\t0\\tchr1\\n'\n",
            log = work.join("samtools.log").display()
        ),
    );
    // Stub Bandage: log the invocation, create the output file it was given.
    write_stub(
        &bin.join("Bandage"),
        &format!(
            "#!/bin/sh\necho \"$@\" >> {log}\n: > \"$3\"\n",
            log = work.join("bandage.log").display()
        ),
    );
    let path_env = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    // Only chr1 has a graph; tig9 is mapped but absent from it.
    fs::write(work.join("graph_chr1.gfa"), "S\ttig1\tACGT\nS\ttig2\tAAAA\n").unwrap();
    fs::write(
        work.join("positions.tsv"),
        "chrom\tbegin\tend\nchr1\t5000\t6000\nchr1\t500\t600\nchr2\t1\t2\n",
    )
    .unwrap();

    let graph_template = work.join("graph_{chrom}.gfa");
    let out_prefix = work.join("sub");
    let output = Command::new(get_tigknit_binary())
        .env("PATH", &path_env)
        .args([
            "subgraph",
            "-p",
            work.join("positions.tsv").to_str().unwrap(),
            "-m",
            "map.bam",
            "-g",
            graph_template.to_str().unwrap(),
            "-o",
            out_prefix.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run tigknit");
    assert!(
        output.status.success(),
        "subgraph failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // samtools was queried with padded regions (default correction 1000),
    // clamped at zero on the left; the chr2 row was skipped before any
    // lookup because its graph file does not exist.
    let samtools_log = fs::read_to_string(work.join("samtools.log")).unwrap();
    assert_eq!(
        samtools_log,
        "view map.bam chr1:4000-7000\nview map.bam chr1:0-1600\n"
    );

    // Bandage rendered then reduced each region's neighborhood, restricted
    // to the tigs actually present in the graph, named by the unpadded
    // region.
    let graph_path = work.join("graph_chr1.gfa");
    let bandage_log = fs::read_to_string(work.join("bandage.log")).unwrap();
    let expected_tail = "--scope aroundnodes --nodes tig1 --distance 5 --colour uniform --edgelen 50";
    let expected: Vec<String> = [
        ("image", "chr1:5000-6000_tig1.svg"),
        ("reduce", "chr1:5000-6000_tig1.gfa"),
        ("image", "chr1:500-600_tig1.svg"),
        ("reduce", "chr1:500-600_tig1.gfa"),
    ]
    .iter()
    .map(|(mode, name)| {
        format!(
            "{} {} {}_{} {}",
            mode,
            graph_path.display(),
            out_prefix.display(),
            name,
            expected_tail
        )
    })
    .collect();
    assert_eq!(bandage_log.lines().collect::<Vec<_>>(), expected);

    for name in [
        "sub_chr1:5000-6000_tig1.svg",
        "sub_chr1:5000-6000_tig1.gfa",
        "sub_chr1:500-600_tig1.svg",
        "sub_chr1:500-600_tig1.gfa",
    ] {
        assert!(work.join(name).exists(), "missing output: {}", name);
    }
}

#[test]
fn test_subgraph_tool_failure_does_not_abort() {
    let temp_dir = TempDir::new().unwrap();
    let work = temp_dir.path();
    let bin = work.join("bin");
    fs::create_dir(&bin).unwrap();

    // samtools fails outright; every region yields no tigs and the run
    // still finishes cleanly without invoking Bandage.
    write_stub(
        &bin.join("samtools"),
        "#!/bin/sh\necho 'boom' >&2\nexit 1\n",
    );
    write_stub(
        &bin.join("Bandage"),
        &format!(
            "#!/bin/sh\necho \"$@\" >> {log}\n",
            log = work.join("bandage.log").display()
        ),
    );
    let path_env = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    fs::write(work.join("graph_chr1.gfa"), "S\ttig1\tACGT\n").unwrap();
    fs::write(work.join("positions.tsv"), "chrom begin end\nchr1 5000 6000\n").unwrap();

    let output = Command::new(get_tigknit_binary())
        .env("PATH", &path_env)
        .args([
            "subgraph",
            "-p",
            work.join("positions.tsv").to_str().unwrap(),
            "-m",
            "map.bam",
            "-g",
            work.join("graph_{chrom}.gfa").to_str().unwrap(),
            "-o",
            work.join("sub").to_str().unwrap(),
        ])
        .output()
        .expect("failed to run tigknit");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chr1:5000-6000"), "stderr was: {}", stderr);
    assert!(!work.join("bandage.log").exists());
}
