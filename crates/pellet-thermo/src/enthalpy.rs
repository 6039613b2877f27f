// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Enthalpy
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bidirectional temperature ↔ specific-enthalpy mapping.
//!
//! The forward map sums component enthalpy curves; the inverse walks the
//! monotone curve by bisection, which stays well-defined across
//! latent-heat plateaus (any enthalpy inside a plateau maps to the
//! transition temperature). No closed form exists because of those
//! plateaus.

use pellet_types::constants::{
    TEMPERATURE_TOLERANCE, T_BRACKET_HIGH, T_BRACKET_LOW,
};
use pellet_types::error::{PelletError, PelletResult};

use crate::substance::Substance;

/// Enthalpy–temperature state for a pure substance or a
/// mass-fraction-weighted blend (particle node compositions of
/// Al/Ni/NiAl, pellet node compositions of particle material + argon).
#[derive(Debug, Clone)]
pub struct EnthalpyState {
    components: Vec<(&'static Substance, f64)>,
}

impl EnthalpyState {
    /// State over a single substance.
    pub fn pure(substance: &'static Substance) -> Self {
        EnthalpyState {
            components: vec![(substance, 1.0)],
        }
    }

    /// State over a mass-fraction-weighted blend. Fractions must be
    /// non-negative and sum to 1 within tolerance; components with zero
    /// weight are dropped.
    pub fn mixture(parts: &[(&'static Substance, f64)]) -> PelletResult<Self> {
        let mut total = 0.0;
        for &(s, w) in parts {
            if !w.is_finite() || w < 0.0 {
                return Err(PelletError::ConfigError(format!(
                    "mass fraction of {} must be finite and >= 0, got {w}",
                    s.name
                )));
            }
            total += w;
        }
        if (total - 1.0).abs() > 1e-9 {
            return Err(PelletError::ConfigError(format!(
                "mass fractions must sum to 1, got {total}"
            )));
        }
        Ok(EnthalpyState {
            components: parts.iter().filter(|&&(_, w)| w > 0.0).copied().collect(),
        })
    }

    /// Mixture specific enthalpy at temperature t (J/kg).
    pub fn enthalpy_of(&self, t: f64) -> f64 {
        self.components
            .iter()
            .map(|(s, w)| w * s.enthalpy(t))
            .sum()
    }

    /// Mass-weighted mixture heat capacity (J/(kg·K)).
    pub fn heat_capacity(&self, t: f64) -> f64 {
        self.components
            .iter()
            .map(|(s, w)| w * s.heat_capacity(t))
            .sum()
    }

    /// Mixture density (kg/m³), from volume additivity:
    /// 1/ρ = Σ wᵢ/ρᵢ.
    pub fn density(&self, t: f64) -> f64 {
        let specific_volume: f64 = self
            .components
            .iter()
            .map(|(s, w)| w / s.density(t))
            .sum();
        1.0 / specific_volume
    }

    /// Volume-fraction-weighted mixture conductivity (W/(m·K)).
    pub fn thermal_conductivity(&self, t: f64) -> f64 {
        let rho = self.density(t);
        self.components
            .iter()
            .map(|(s, w)| w * rho / s.density(t) * s.thermal_conductivity(t))
            .sum()
    }

    /// Invert specific enthalpy to temperature by bisection over the
    /// monotone enthalpy curve. Enthalpies inside a latent plateau
    /// resolve to the transition temperature. An enthalpy outside the
    /// bracketed range is a fatal input-contract violation.
    pub fn temperature_of(&self, h: f64) -> PelletResult<f64> {
        let mut lo = T_BRACKET_LOW;
        let mut hi = T_BRACKET_HIGH;
        let h_lo = self.enthalpy_of(lo);
        let h_hi = self.enthalpy_of(hi);
        if !h.is_finite() || h < h_lo || h > h_hi {
            return Err(PelletError::PhysicsViolation(format!(
                "enthalpy {h} J/kg outside invertible range [{h_lo}, {h_hi}]"
            )));
        }
        while hi - lo > TEMPERATURE_TOLERANCE {
            let mid = 0.5 * (lo + hi);
            if self.enthalpy_of(mid) <= h {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(0.5 * (lo + hi))
    }
}
