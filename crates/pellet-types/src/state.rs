// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;

/// 1D computational grid with uniform node spacing.
/// Used for both the particle radius (N nodes, 0..R) and the pellet
/// length (M nodes, 0..L).
#[derive(Debug, Clone)]
pub struct Grid1D {
    pub n: usize,
    pub x: Array1<f64>, // node coordinates [n] - linspace(lo, hi, n)
    pub dx: f64,        // node spacing
}

impl Grid1D {
    pub fn new(n: usize, lo: f64, hi: f64) -> Self {
        assert!(n >= 2, "Grid1D requires at least 2 nodes, got {n}");
        let x = Array1::linspace(lo, hi, n);
        let dx = x[1] - x[0];
        Grid1D { n, x, dx }
    }

    /// Total span of the grid.
    pub fn length(&self) -> f64 {
        self.x[self.n - 1] - self.x[0]
    }
}

/// Reaction progress of a core-shell particle. Transitions are
/// irreversible: Unreacted → Reacting → FullyConverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleState {
    Unreacted,
    Reacting,
    FullyConverted,
}

/// Per-timestep summary emitted by the pellet solver.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// Simulation time after the step (s).
    pub time: f64,
    /// Hottest pellet node (K).
    pub max_temperature: f64,
    /// Temperature of the ignited face, x = 0 (K).
    pub face_temperature: f64,
    /// Reaction extent averaged over all particles.
    pub mean_extent: f64,
    /// Combustion-front location (m), when a front exists.
    pub front_position_m: Option<f64>,
}

/// Least-squares estimate of combustion-front propagation speed.
#[derive(Debug, Clone, Copy)]
pub struct FrontEstimate {
    /// Fitted front speed (m/s).
    pub speed_m_per_s: f64,
    /// Fitted front position at t = 0 (m).
    pub intercept_m: f64,
    /// Number of samples used in the fit.
    pub samples: usize,
}

/// Bulk pellet properties at ambient conditions.
#[derive(Debug, Clone, Copy)]
pub struct PelletProperties {
    /// Bulk density of the packed bed (kg/m³).
    pub density: f64,
    /// Mass fraction of particle material in the bed.
    pub particle_mass_fraction: f64,
    /// Mixture heat capacity (J/(kg·K)).
    pub heat_capacity: f64,
    /// Bruggeman effective conductivity (W/(m·K)).
    pub thermal_conductivity: f64,
}
