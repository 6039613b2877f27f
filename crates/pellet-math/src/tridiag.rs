// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Tridiag
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for tridiagonal systems.
//!
//! Both finite-difference solvers rebuild their coefficient rows every
//! timestep (the coefficients follow the temperature-dependent
//! properties), so the solver exposes a row-wise equation interface
//! instead of whole-diagonal slices.

/// Tridiagonal system e·x[i-1] + f·x[i] + g·x[i+1] = b, solved by LU-style
/// forward elimination and backward substitution.
///
/// Every row must be set before solving; the first and last rows are
/// two-term. Row indices outside the system and unset rows are contract
/// violations and panic. No pivoting: the conduction/diffusion
/// discretizations feeding this solver are diagonally dominant, and a
/// vanishing pivot indicates a configuration error upstream.
#[derive(Debug, Clone)]
pub struct TridiagonalSolver {
    n: usize,
    sub: Vec<f64>,  // e, sub[0] unused
    diag: Vec<f64>, // f
    sup: Vec<f64>,  // g, sup[n-1] unused
    rhs: Vec<f64>,  // b
    row_set: Vec<bool>,
}

impl TridiagonalSolver {
    /// Create a solver for a fixed system size n ≥ 2. All rows start
    /// unset.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "Tridiagonal system size must be >= 2, got {n}");
        TridiagonalSolver {
            n,
            sub: vec![0.0; n],
            diag: vec![0.0; n],
            sup: vec![0.0; n],
            rhs: vec![0.0; n],
            row_set: vec![false; n],
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Set interior row i ∈ [1, n-2]: e·x[i-1] + f·x[i] + g·x[i+1] = b.
    pub fn set_equation(&mut self, i: usize, e: f64, f: f64, g: f64, b: f64) {
        assert!(
            i >= 1 && i + 1 < self.n,
            "interior row index {i} outside 1..{}",
            self.n - 1
        );
        self.sub[i] = e;
        self.diag[i] = f;
        self.sup[i] = g;
        self.rhs[i] = b;
        self.row_set[i] = true;
    }

    /// Set the first row: f·x[0] + g·x[1] = b.
    pub fn set_first_row(&mut self, f: f64, g: f64, b: f64) {
        self.sub[0] = 0.0;
        self.diag[0] = f;
        self.sup[0] = g;
        self.rhs[0] = b;
        self.row_set[0] = true;
    }

    /// Set the last row: e·x[n-2] + f·x[n-1] = b.
    pub fn set_last_row(&mut self, e: f64, f: f64, b: f64) {
        let i = self.n - 1;
        self.sub[i] = e;
        self.diag[i] = f;
        self.sup[i] = 0.0;
        self.rhs[i] = b;
        self.row_set[i] = true;
    }

    /// Solve into caller storage of length n. The stored coefficients are
    /// not mutated, so repeated calls return the same solution.
    ///
    /// Panics if any row was never set or a pivot vanishes.
    pub fn solve_into(&self, x: &mut [f64]) {
        let n = self.n;
        assert_eq!(x.len(), n, "solution storage length {} != {n}", x.len());
        if let Some(i) = self.row_set.iter().position(|set| !set) {
            panic!("tridiagonal row {i} was never set before solving");
        }

        // Forward sweep into scratch storage.
        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];

        let pivot = self.diag[0];
        assert!(
            pivot.is_finite() && pivot != 0.0,
            "zero pivot in tridiagonal row 0: system is singular"
        );
        c_prime[0] = self.sup[0] / pivot;
        d_prime[0] = self.rhs[0] / pivot;

        for i in 1..n {
            let den = self.diag[i] - self.sub[i] * c_prime[i - 1];
            assert!(
                den.is_finite() && den != 0.0,
                "zero pivot in tridiagonal row {i}: system is singular or not diagonally dominant"
            );
            if i < n - 1 {
                c_prime[i] = self.sup[i] / den;
            }
            d_prime[i] = (self.rhs[i] - self.sub[i] * d_prime[i - 1]) / den;
        }

        // Back substitution.
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }
    }
}
