use std::fs;
use std::process::Command;

fn bin() -> String {
    // Cargo sets this for bin targets in integration tests
    env!("CARGO_BIN_EXE_grover").to_string()
}

/// Config file in a fresh temp dir, so the user's ~/.grover is never read.
fn config(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grover.toml");
    fs::write(&path, body).unwrap();
    (dir, path)
}

#[test]
fn run_json_reports_exact_two_qubit_search() {
    let (_dir, cfg) = config("");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["run", "-n", "2", "-t", "11", "--shots", "1000", "--seed", "7", "--json"])
        .output()
        .expect("run");

    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let val: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(val["counts"]["11"].as_u64(), Some(1000));
    assert_eq!(val["iterations"].as_u64(), Some(1));
    let p = val["target_probability"].as_f64().unwrap();
    assert!((p - 1.0).abs() < 1e-9);
    assert_eq!(val["reduced"].as_array().map(|a| a.len()), Some(2));
}

#[test]
fn config_file_supplies_defaults() {
    let (_dir, cfg) = config("qubits = 3\ntarget = \"101\"\nshots = 64\nseed = 11\n");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["run", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr:\n{}", String::from_utf8_lossy(&output.stderr));

    let val: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(val["qubits"].as_u64(), Some(3));
    assert_eq!(val["target"].as_str(), Some("101"));
    assert_eq!(val["shots"].as_u64(), Some(64));
    let total: u64 = val["counts"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 64);
}

#[test]
fn mismatched_target_fails_with_message() {
    let (_dir, cfg) = config("");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["run", "-n", "7", "-t", "101"])
        .output()
        .expect("run");

    assert!(!output.status.success(), "unexpected success");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("target bitstring has length 3, expected 7"), "{stderr}");
}

#[test]
fn zero_shots_rejected() {
    let (_dir, cfg) = config("");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["run", "--shots", "0"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("shot count must be positive"), "{stderr}");
}

#[test]
fn optimal_on_oversized_register_reports_dimension() {
    let (_dir, cfg) = config("");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["run", "-n", "64", "-t", "1", "--optimal"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid dimension: 64 qubits"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}

#[test]
fn circuit_listing_ends_with_measure() {
    let (_dir, cfg) = config("");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["circuit", "-n", "3", "-t", "110", "--optimal"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("circuit 3 qubits"));
    assert_eq!(stdout.lines().last().map(str::trim), Some("measure [q0, q1, q2]"));
    // two rounds, each closed by a barrier after oracle and diffuser
    assert_eq!(stdout.lines().filter(|l| l.trim() == "barrier").count(), 4);
}

#[test]
fn malformed_config_is_an_error() {
    let (_dir, cfg) = config("qubits = \"many\"");
    let output = Command::new(bin())
        .arg("--config")
        .arg(&cfg)
        .args(["state"])
        .output()
        .expect("run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parsing"), "{stderr}");
}
