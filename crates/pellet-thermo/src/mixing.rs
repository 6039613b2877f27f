// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Mixing
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Effective-conductivity mixing laws for a two-phase medium: dispersed
//! particles (volume fraction φ, conductivity k_p) in a continuous fluid
//! (conductivity k_f).
//!
//! The pellet solver uses the Bruggeman form operationally; the other
//! models feed the comparison scan table.

use pellet_types::error::{PelletError, PelletResult};

/// Fixed-point iteration cap for the self-consistent EMT solve.
const EMT_MAX_ITERATIONS: usize = 200;

/// Relative convergence tolerance for the EMT fixed point.
const EMT_TOLERANCE: f64 = 1e-12;

/// Closed set of mixing models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixingModel {
    /// Maxwell-Eucken with the fluid as matrix.
    MaxwellEucken1,
    /// Maxwell-Eucken with the particle material as matrix.
    MaxwellEucken2,
    /// Self-consistent effective-medium theory (Landauer relation,
    /// solved as a fixed point).
    EffectiveMediumTheory,
    /// Co-continuous arithmetic/harmonic blend.
    CoContinuous,
    /// Symmetric effective-medium quadratic, closed-form positive root
    /// for spherical inclusions.
    Bruggeman,
}

/// Effective conductivity k_eff = f(φ, k_f, k_p) under the chosen model.
///
/// φ must lie in [0, 1] and both conductivities must be positive. The
/// degenerate endpoints return k_f at φ = 0 and k_p at φ = 1 exactly,
/// for every model.
pub fn effective_conductivity(
    model: MixingModel,
    phi: f64,
    k_f: f64,
    k_p: f64,
) -> PelletResult<f64> {
    if !phi.is_finite() || !(0.0..=1.0).contains(&phi) {
        return Err(PelletError::ConfigError(format!(
            "volume fraction must lie in [0, 1], got {phi}"
        )));
    }
    if !k_f.is_finite() || k_f <= 0.0 || !k_p.is_finite() || k_p <= 0.0 {
        return Err(PelletError::PhysicsViolation(format!(
            "conductivities must be finite and > 0, got k_f = {k_f}, k_p = {k_p}"
        )));
    }
    if phi == 0.0 {
        return Ok(k_f);
    }
    if phi == 1.0 {
        return Ok(k_p);
    }
    Ok(match model {
        MixingModel::MaxwellEucken1 => maxwell_eucken(k_f, k_p, phi),
        MixingModel::MaxwellEucken2 => maxwell_eucken(k_p, k_f, 1.0 - phi),
        MixingModel::EffectiveMediumTheory => effective_medium(phi, k_f, k_p),
        MixingModel::CoContinuous => co_continuous(phi, k_f, k_p),
        MixingModel::Bruggeman => bruggeman(phi, k_f, k_p),
    })
}

/// Maxwell-Eucken: matrix conductivity k_m, dispersed conductivity k_d
/// at volume fraction v_d.
fn maxwell_eucken(k_m: f64, k_d: f64, v_d: f64) -> f64 {
    k_m * (2.0 * k_m + k_d - 2.0 * (k_m - k_d) * v_d)
        / (2.0 * k_m + k_d + (k_m - k_d) * v_d)
}

/// Landauer self-consistent relation, iterated to a fixed point:
/// k = Σ vᵢ kᵢ/(kᵢ + 2k) / Σ vᵢ/(kᵢ + 2k), with mild damping.
fn effective_medium(phi: f64, k_f: f64, k_p: f64) -> f64 {
    let mut k = (1.0 - phi) * k_f + phi * k_p;
    for _ in 0..EMT_MAX_ITERATIONS {
        let wf = (1.0 - phi) / (k_f + 2.0 * k);
        let wp = phi / (k_p + 2.0 * k);
        let next = (wf * k_f + wp * k_p) / (wf + wp);
        let updated = 0.5 * (k + next);
        if ((updated - k) / k).abs() < EMT_TOLERANCE {
            return updated;
        }
        k = updated;
    }
    k
}

/// Co-continuous blend of the parallel (arithmetic) and series
/// (harmonic) bounds.
fn co_continuous(phi: f64, k_f: f64, k_p: f64) -> f64 {
    let k_parallel = (1.0 - phi) * k_f + phi * k_p;
    let k_series = k_f * k_p / ((1.0 - phi) * k_p + phi * k_f);
    0.5 * ((k_parallel * k_parallel + 8.0 * k_parallel * k_series).sqrt() - k_parallel)
}

/// Positive root of the symmetric effective-medium quadratic:
/// k = [b + sqrt(b² + 8·k_f·k_p)]/4 with b = (3φ−1)k_p + (2−3φ)k_f.
fn bruggeman(phi: f64, k_f: f64, k_p: f64) -> f64 {
    let b = (3.0 * phi - 1.0) * k_p + (2.0 - 3.0 * phi) * k_f;
    0.25 * (b + (b * b + 8.0 * k_f * k_p).sqrt())
}

/// One row of the model-comparison scan, column order matching the
/// reference CSV: volume fraction, ME1, CC, EMT, ME2.
#[derive(Debug, Clone, Copy)]
pub struct ConductivityScanRow {
    pub volume_fraction: f64,
    pub me1: f64,
    pub cc: f64,
    pub emt: f64,
    pub me2: f64,
}

/// Sweep φ over [0, 1] in `steps` intervals and evaluate every
/// comparison model.
pub fn conductivity_scan(
    k_f: f64,
    k_p: f64,
    steps: usize,
) -> PelletResult<Vec<ConductivityScanRow>> {
    if steps == 0 {
        return Err(PelletError::ConfigError(
            "conductivity scan needs at least 1 step".to_string(),
        ));
    }
    let mut rows = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let phi = i as f64 / steps as f64;
        rows.push(ConductivityScanRow {
            volume_fraction: phi,
            me1: effective_conductivity(MixingModel::MaxwellEucken1, phi, k_f, k_p)?,
            cc: effective_conductivity(MixingModel::CoContinuous, phi, k_f, k_p)?,
            emt: effective_conductivity(MixingModel::EffectiveMediumTheory, phi, k_f, k_p)?,
            me2: effective_conductivity(MixingModel::MaxwellEucken2, phi, k_f, k_p)?,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: [MixingModel; 5] = [
        MixingModel::MaxwellEucken1,
        MixingModel::MaxwellEucken2,
        MixingModel::EffectiveMediumTheory,
        MixingModel::CoContinuous,
        MixingModel::Bruggeman,
    ];

    #[test]
    fn test_endpoints_exact_for_all_models() {
        let (k_f, k_p) = (0.0177, 90.7);
        for model in MODELS {
            let at0 = effective_conductivity(model, 0.0, k_f, k_p).unwrap();
            let at1 = effective_conductivity(model, 1.0, k_f, k_p).unwrap();
            assert_eq!(at0, k_f, "{model:?} at φ=0");
            assert_eq!(at1, k_p, "{model:?} at φ=1");
        }
    }

    #[test]
    fn test_monotone_in_phi_for_conductive_particles() {
        let (k_f, k_p) = (1.0, 50.0);
        for model in MODELS {
            let mut prev = effective_conductivity(model, 0.0, k_f, k_p).unwrap();
            for i in 1..=100 {
                let phi = i as f64 / 100.0;
                let k = effective_conductivity(model, phi, k_f, k_p).unwrap();
                assert!(
                    k >= prev,
                    "{model:?} not monotone at φ = {phi}: {k} < {prev}"
                );
                prev = k;
            }
        }
    }

    #[test]
    fn test_bruggeman_documented_root() {
        // φ=0.5, k_f=1, k_p=9: b = 0.5·9 + 0.5·1 = 5,
        // k = (5 + sqrt(25 + 72))/4 = (5 + sqrt(97))/4
        let k = effective_conductivity(MixingModel::Bruggeman, 0.5, 1.0, 9.0).unwrap();
        let expected = (5.0 + 97.0_f64.sqrt()) / 4.0;
        assert!(
            (k - expected).abs() < 1e-12,
            "Bruggeman root {k}, expected {expected}"
        );
    }

    #[test]
    fn test_emt_agrees_with_bruggeman_closed_form() {
        // Both evaluate the same symmetric effective-medium relation
        for phi in [0.05, 0.3, 0.5, 0.7, 0.95] {
            let emt =
                effective_conductivity(MixingModel::EffectiveMediumTheory, phi, 1.0, 9.0).unwrap();
            let brug = effective_conductivity(MixingModel::Bruggeman, phi, 1.0, 9.0).unwrap();
            assert!(
                ((emt - brug) / brug).abs() < 1e-9,
                "φ={phi}: EMT {emt} vs Bruggeman {brug}"
            );
        }
    }

    #[test]
    fn test_bounds_ordering() {
        // ME1 (fluid matrix) is the lower Maxwell bound, ME2 the upper
        let (k_f, k_p) = (1.0, 100.0);
        for phi in [0.2, 0.5, 0.8] {
            let me1 = effective_conductivity(MixingModel::MaxwellEucken1, phi, k_f, k_p).unwrap();
            let me2 = effective_conductivity(MixingModel::MaxwellEucken2, phi, k_f, k_p).unwrap();
            let brug = effective_conductivity(MixingModel::Bruggeman, phi, k_f, k_p).unwrap();
            assert!(me1 < me2, "φ={phi}: ME1 {me1} should be below ME2 {me2}");
            assert!(
                me1 <= brug && brug <= me2,
                "φ={phi}: Bruggeman {brug} outside [{me1}, {me2}]"
            );
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(effective_conductivity(MixingModel::Bruggeman, -0.1, 1.0, 9.0).is_err());
        assert!(effective_conductivity(MixingModel::Bruggeman, 1.1, 1.0, 9.0).is_err());
        assert!(effective_conductivity(MixingModel::Bruggeman, 0.5, -1.0, 9.0).is_err());
        assert!(effective_conductivity(MixingModel::Bruggeman, 0.5, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_scan_covers_unit_interval() {
        let rows = conductivity_scan(0.0177, 90.7, 1000).unwrap();
        assert_eq!(rows.len(), 1001);
        assert_eq!(rows[0].volume_fraction, 0.0);
        assert_eq!(rows[1000].volume_fraction, 1.0);
        assert_eq!(rows[0].me1, 0.0177);
        assert_eq!(rows[1000].me2, 90.7);
    }
}
