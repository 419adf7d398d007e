//! Dense reference operators: Kronecker lifts and controlled flips as full
//! `2^n × 2^n` matrices. Only sensible on small registers.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use super::gates::qubit_mask;

/// Largest register for which dense operators are built.
pub const MAX_DENSE_QUBITS: usize = 10;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Promote a 1-qubit gate `u` onto `n_qubits`, acting on `target`.
/// Qubit 0 is the leftmost Kronecker factor, i.e. the most significant bit.
pub fn lift_1q(u: &DMatrix<C64>, n_qubits: usize, target: usize) -> DMatrix<C64> {
    assert_eq!(u.nrows(), 2);
    assert_eq!(u.ncols(), 2);
    assert!(target < n_qubits && n_qubits <= MAX_DENSE_QUBITS);

    let i2 = DMatrix::<C64>::identity(2, 2);
    (0..n_qubits).fold(
        DMatrix::from_element(1, 1, c(1.0, 0.0)),
        |acc, q| acc.kronecker(if q == target { u } else { &i2 }),
    )
}

/// Permutation matrix flipping `target` on every basis state whose
/// `controls` all read 1.
pub fn mcx_n(n_qubits: usize, controls: &[usize], target: usize) -> DMatrix<C64> {
    assert!(target < n_qubits && n_qubits <= MAX_DENSE_QUBITS);
    assert!(controls.iter().all(|&q| q < n_qubits && q != target));
    let ctl = controls
        .iter()
        .fold(0usize, |acc, &q| acc | qubit_mask(n_qubits, q));
    let bit = qubit_mask(n_qubits, target);
    let dim = 1usize << n_qubits;
    let mut m = DMatrix::<C64>::from_element(dim, dim, c(0.0, 0.0));
    for basis in 0..dim {
        let out = if basis & ctl == ctl { basis ^ bit } else { basis };
        m[(out, basis)] = c(1.0, 0.0);
    }
    m
}

/// Largest entry of `|UᴴU − I|`; zero for an exact unitary.
pub fn unitarity_defect(m: &DMatrix<C64>) -> f64 {
    let u_dag_u = m.adjoint() * m;
    let i = DMatrix::<C64>::identity(m.nrows(), m.ncols());
    (u_dag_u - i)
        .iter()
        .map(|z| z.norm())
        .fold(0.0_f64, f64::max)
}
