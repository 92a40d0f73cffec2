use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn run_gsd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gsd"))
        .args(args)
        .output()
        .expect("Failed to execute gsd")
}

fn stdout_of(output: &Output) -> String {
    if !output.status.success() {
        panic!(
            "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_synth_two_nodes() {
    let output = run_gsd(&["synth", "--graph", "[[0,1],[1,0]]"]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("layer 0: H(0) H(1)"));
    assert!(stdout.contains("layer 1: CZ(1, 0)"));
    assert!(stdout.contains("Depth: 1"));
    assert!(stdout.contains("Total operations: 3"));
    assert!(stdout.contains("Solver calls: 1"));
}

#[test]
fn test_synth_scheduling_linear_with_symmetry_breaking() {
    let output = run_gsd(&[
        "synth",
        "--graph",
        "0 1 1 0; 1 0 1 1; 1 1 0 1; 0 1 1 0",
        "--strategy",
        "scheduling",
        "--search-mode",
        "linear",
        "--symmetry-breaking",
    ]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("Depth: 3"));
    assert!(stdout.contains("Total operations: 9"));
    assert!(stdout.contains("Solver calls: 4"));
}

#[test]
fn test_synth_from_file_with_corrections_and_deadline() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("triangle.txt");
    fs::write(&path, "[[0, 1, 1],\n [1, 0, 1],\n [1, 1, 0]]\n").unwrap();

    let output = run_gsd(&[
        "synth",
        "--file",
        path.to_str().unwrap(),
        "--corrections",
        "0:H,2:S",
        "--deadline",
        "60",
    ]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("Depth: 3"));
    assert!(stdout.contains("corrections: H(0) S(2)"));
    // corrections are not part of the reported counts
    assert!(stdout.contains("Total operations: 6"));
}

#[test]
fn test_synth_rejects_asymmetric_matrix() {
    let output = run_gsd(&["synth", "--graph", "[[0,1],[0,0]]"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not symmetric"), "stderr: {}", stderr);
}

#[test]
fn test_synth_rejects_unknown_gate() {
    let output = run_gsd(&["synth", "--graph", "[[0,1],[1,0]]", "--corrections", "0:T"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown gate"), "stderr: {}", stderr);
}

#[test]
fn test_bench_prints_one_row_per_node_count() {
    let output = run_gsd(&[
        "bench",
        "--min-nodes",
        "2",
        "--max-nodes",
        "4",
        "--runs",
        "2",
        "--seed",
        "3",
    ]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("avg depth"));
    let rows = stdout
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .count();
    assert_eq!(rows, 3);
}
