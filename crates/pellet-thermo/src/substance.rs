// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Substance
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pure-substance property model.
//!
//! A substance is a read-only table of one or more phases separated by
//! latent-heat transitions. Property tables are plain consts (see
//! `materials`) shared by reference across every solver instance.

use pellet_types::constants::T_REFERENCE;

/// One phase of a substance. Heat capacity and conductivity are linear
/// in temperature; density is taken constant within the phase.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    pub name: &'static str,
    /// Density (kg/m³).
    pub density: f64,
    /// Heat capacity c_p(T) = cp_a + cp_b·T (J/(kg·K)).
    pub cp_a: f64,
    pub cp_b: f64,
    /// Thermal conductivity k(T) = k_a + k_b·T (W/(m·K)).
    pub k_a: f64,
    pub k_b: f64,
}

/// Latent-heat transition between two consecutive phases.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTransition {
    /// Transition temperature (K).
    pub temperature: f64,
    /// Latent heat absorbed at the transition (J/kg).
    pub latent_heat: f64,
}

/// Immutable material identity. `transitions.len()` is always
/// `phases.len() - 1`, ordered by increasing temperature.
#[derive(Debug, Clone, Copy)]
pub struct Substance {
    pub name: &'static str,
    /// Molar mass (kg/mol).
    pub molar_mass: f64,
    /// Standard enthalpy of formation at 298.15 K (J/mol); zero for
    /// elements.
    pub enthalpy_of_formation: f64,
    pub phases: &'static [Phase],
    pub transitions: &'static [PhaseTransition],
}

impl Substance {
    /// Index of the stable phase at temperature t. At exactly a
    /// transition temperature the higher phase is reported.
    fn phase_index(&self, t: f64) -> usize {
        self.transitions
            .iter()
            .take_while(|tr| t >= tr.temperature)
            .count()
    }

    fn phase_at(&self, t: f64) -> &Phase {
        &self.phases[self.phase_index(t)]
    }

    /// Density at temperature t (kg/m³).
    pub fn density(&self, t: f64) -> f64 {
        self.phase_at(t).density
    }

    /// Heat capacity at temperature t (J/(kg·K)).
    pub fn heat_capacity(&self, t: f64) -> f64 {
        let p = self.phase_at(t);
        p.cp_a + p.cp_b * t
    }

    /// Thermal conductivity at temperature t (W/(m·K)).
    pub fn thermal_conductivity(&self, t: f64) -> f64 {
        let p = self.phase_at(t);
        p.k_a + p.k_b * t
    }

    /// Specific enthalpy at temperature t, relative to the reference
    /// temperature (J/kg). Continuous and increasing in t except for
    /// jumps of exactly the latent heat at each transition: the value at
    /// the transition temperature itself is the bottom of the plateau.
    pub fn enthalpy(&self, t: f64) -> f64 {
        if t >= T_REFERENCE {
            self.enthalpy_between(T_REFERENCE, t)
        } else {
            -self.enthalpy_between(t, T_REFERENCE)
        }
    }

    /// Integral of c_p from lo to hi (lo <= hi) plus latent heats of the
    /// transitions crossed.
    fn enthalpy_between(&self, lo: f64, hi: f64) -> f64 {
        let mut h = 0.0;
        let mut t_lo = lo;
        let mut idx = self.phase_index(lo);
        loop {
            let seg_hi = if idx < self.transitions.len() {
                self.transitions[idx].temperature.min(hi)
            } else {
                hi
            };
            let p = &self.phases[idx];
            h += p.cp_a * (seg_hi - t_lo) + 0.5 * p.cp_b * (seg_hi * seg_hi - t_lo * t_lo);
            if seg_hi >= hi {
                break;
            }
            h += self.transitions[idx].latent_heat;
            t_lo = seg_hi;
            idx += 1;
        }
        h
    }

    /// Molar density at temperature t (mol/m³).
    pub fn molar_density(&self, t: f64) -> f64 {
        self.density(t) / self.molar_mass
    }
}
