// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Diffusivity
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Arrhenius interdiffusion coefficient for the Ni-Al core-shell
//! interface: D(T) = D₀·exp(−Eₐ/(R·T)).

use pellet_types::config::DiffusivityConfig;
use pellet_types::constants::R_GAS;
use pellet_types::error::{PelletError, PelletResult};

/// Du et al. interdiffusion fit: D₀ = 9.54e-8 m²/s, Eₐ = 26 kJ/mol.
pub const DU: ArrheniusDiffusivity = ArrheniusDiffusivity {
    pre_exponential: 9.54e-8,
    activation_energy: 26.0e3,
};

/// Alawieh et al. interdiffusion fit: D₀ = 2.56e-6 m²/s,
/// Eₐ = 102.191 kJ/mol.
pub const ALAWIEH: ArrheniusDiffusivity = ArrheniusDiffusivity {
    pre_exponential: 2.56e-6,
    activation_energy: 102.191e3,
};

/// Stateless Arrhenius model. Pure function of temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrheniusDiffusivity {
    /// Pre-exponential factor D₀ (m²/s).
    pub pre_exponential: f64,
    /// Activation energy Eₐ (J/mol).
    pub activation_energy: f64,
}

impl ArrheniusDiffusivity {
    pub const fn new(pre_exponential: f64, activation_energy: f64) -> Self {
        ArrheniusDiffusivity {
            pre_exponential,
            activation_energy,
        }
    }

    /// Resolve a configuration preset to its model parameters.
    pub fn from_config(config: &DiffusivityConfig) -> Self {
        match *config {
            DiffusivityConfig::Du => DU,
            DiffusivityConfig::Alawieh => ALAWIEH,
            DiffusivityConfig::Custom {
                pre_exponential,
                activation_energy,
            } => ArrheniusDiffusivity::new(pre_exponential, activation_energy),
        }
    }

    /// Interdiffusion coefficient D(T) (m²/s). Evaluation at T ≤ 0 is
    /// physically meaningless and fatal.
    pub fn coefficient(&self, t: f64) -> PelletResult<f64> {
        if !t.is_finite() || t <= 0.0 {
            return Err(PelletError::PhysicsViolation(format!(
                "diffusivity evaluated at non-positive temperature {t} K"
            )));
        }
        Ok(self.pre_exponential * (-self.activation_energy / (R_GAS * t)).exp())
    }

    /// dD/dT = D·Eₐ/(R·T²), used to linearize the reaction source in
    /// the implicit assembly.
    pub fn temperature_derivative(&self, t: f64) -> PelletResult<f64> {
        let d = self.coefficient(t)?;
        Ok(d * self.activation_energy / (R_GAS * t * t))
    }
}
