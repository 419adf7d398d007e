//! tests/circuit_snapshots.rs
//! Snapshot tests for the plain-text circuit listing.

use grover_sim::core::quantum::{diffuser, grover_circuit, GroverBuilder};

#[test]
fn two_qubit_reference_circuit() {
    let circuit = grover_circuit(2, "01", 1).unwrap();
    insta::assert_snapshot!(circuit.to_string().trim_end(), @r"
    circuit 2 qubits
      h q0
      h q1
      x q0
      h q1
      mcx [q0] -> q1
      h q1
      x q0
      barrier
      h q0
      h q1
      x q0
      x q1
      h q1
      mcx [q0] -> q1
      h q1
      x q0
      x q1
      h q0
      h q1
      barrier
      measure [q0, q1]
    ");
}

#[test]
fn three_qubit_oracle_without_barriers() {
    let circuit = GroverBuilder::new(3, "110")
        .iterations(1)
        .barriers(false)
        .measure(false)
        .build()
        .unwrap();
    let oracle: Vec<String> = circuit
        .gates()
        .skip(3)
        .take(5)
        .map(|g| g.to_string())
        .collect();
    insta::assert_snapshot!(oracle.join("\n"), @r"
    x q2
    h q2
    mcx [q0, q1] -> q2
    h q2
    x q2
    ");
}

#[test]
fn single_qubit_diffuser() {
    let listing: Vec<String> = diffuser(1).unwrap().iter().map(|g| g.to_string()).collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    h q0
    x q0
    h q0
    mcx [] -> q0
    h q0
    x q0
    h q0
    ");
}
