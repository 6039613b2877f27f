// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::error::{PelletError, PelletResult};

/// Top-level simulation configuration.
/// Maps 1:1 to the pellet_config.json schema. Constructed once at
/// startup, validated eagerly, and shared read-only by every solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub simulation_name: String,
    pub pellet: PelletConfig,
    pub particle: ParticleConfig,
    pub ambient: AmbientConfig,
    pub solver: SolverConfig,
    /// Optional ignition hot zone imposed at the x = 0 face.
    #[serde(default)]
    pub initiation: InitiationConfig,
    pub diffusivity: DiffusivityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PelletConfig {
    /// Pellet length (m).
    pub length_m: f64,
    /// Pellet diameter (m).
    pub diameter_m: f64,
    /// Particle packing volume fraction φ ∈ [0, 1].
    pub particle_volume_fraction: f64,
    /// Number of axial grid nodes M.
    pub grid_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Radius of the Al core (m).
    pub core_radius_m: f64,
    /// Overall particle radius, core + Ni shell (m).
    pub overall_radius_m: f64,
    /// Number of radial grid nodes N.
    pub grid_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbientConfig {
    /// Convective heat transfer coefficient (W/(m²·K)).
    pub convective_coefficient: f64,
    /// Radiative emissivity ∈ [0, 1].
    pub emissivity: f64,
    /// Ambient temperature (K).
    pub temperature_k: f64,
    /// Temperature below which the interdiffusion reaction is frozen (K).
    pub ignition_temperature_k: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Timestep Δt (s).
    pub time_step_s: f64,
    /// Diffusion-term implicitness κ ∈ [0, 1] (0.5 = Crank-Nicolson).
    #[serde(default = "default_implicitness")]
    pub implicitness_diffusion: f64,
    /// Reaction-source implicitness γ ∈ [0, 1].
    #[serde(default = "default_implicitness")]
    pub implicitness_source: f64,
    /// Core-shell interface smoothing width as a fraction of the
    /// particle radius.
    #[serde(default = "default_sharpness")]
    pub sharpness_coefficient: f64,
    /// Hard cap on the number of timesteps in a run.
    pub max_steps: usize,
}

/// Ignition hot-zone parameters (optional in JSON config).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiationConfig {
    /// Fraction of the pellet length held hot at t = 0.
    #[serde(default = "default_hot_zone_fraction")]
    pub hot_zone_fraction: f64,
    /// Hot-zone temperature (K).
    #[serde(default = "default_hot_zone_temperature")]
    pub hot_zone_temperature_k: f64,
}

fn default_implicitness() -> f64 {
    0.5
}
fn default_sharpness() -> f64 {
    0.1
}
fn default_hot_zone_fraction() -> f64 {
    0.1
}
fn default_hot_zone_temperature() -> f64 {
    1900.0
}

impl Default for InitiationConfig {
    fn default() -> Self {
        InitiationConfig {
            hot_zone_fraction: default_hot_zone_fraction(),
            hot_zone_temperature_k: default_hot_zone_temperature(),
        }
    }
}

/// Interdiffusion coefficient selection: two literature presets plus an
/// explicit Arrhenius override. The set of models is closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "lowercase")]
pub enum DiffusivityConfig {
    /// Du et al. low-temperature Ni-Al interdiffusion fit.
    Du,
    /// Alawieh et al. interdiffusion fit.
    Alawieh,
    /// Explicit (D₀, Eₐ) pair: D(T) = D₀·exp(−Eₐ/(R·T)).
    Custom {
        /// Pre-exponential factor D₀ (m²/s).
        pre_exponential: f64,
        /// Activation energy Eₐ (J/mol).
        activation_energy: f64,
    },
}

impl SimulationConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> PelletResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Eager validation of every configuration contract. Called once at
    /// solver construction; any violation aborts the run before any
    /// timestep executes.
    pub fn validate(&self) -> PelletResult<()> {
        let p = &self.pellet;
        if !p.length_m.is_finite() || p.length_m <= 0.0 {
            return Err(PelletError::ConfigError(format!(
                "pellet length must be finite and > 0, got {}",
                p.length_m
            )));
        }
        if !p.diameter_m.is_finite() || p.diameter_m <= 0.0 {
            return Err(PelletError::ConfigError(format!(
                "pellet diameter must be finite and > 0, got {}",
                p.diameter_m
            )));
        }
        if !(0.0..=1.0).contains(&p.particle_volume_fraction)
            || !p.particle_volume_fraction.is_finite()
        {
            return Err(PelletError::ConfigError(format!(
                "particle volume fraction must lie in [0, 1], got {}",
                p.particle_volume_fraction
            )));
        }
        if p.grid_points < 2 {
            return Err(PelletError::ConfigError(format!(
                "pellet grid needs at least 2 nodes, got {}",
                p.grid_points
            )));
        }

        let q = &self.particle;
        if !q.core_radius_m.is_finite() || q.core_radius_m <= 0.0 {
            return Err(PelletError::ConfigError(format!(
                "particle core radius must be finite and > 0, got {}",
                q.core_radius_m
            )));
        }
        if !q.overall_radius_m.is_finite() || q.overall_radius_m <= q.core_radius_m {
            return Err(PelletError::ConfigError(format!(
                "particle overall radius must exceed the core radius, got core {} overall {}",
                q.core_radius_m, q.overall_radius_m
            )));
        }
        if q.grid_points < 2 {
            return Err(PelletError::ConfigError(format!(
                "particle grid needs at least 2 nodes, got {}",
                q.grid_points
            )));
        }

        let a = &self.ambient;
        if !a.convective_coefficient.is_finite() || a.convective_coefficient < 0.0 {
            return Err(PelletError::ConfigError(format!(
                "convective coefficient must be finite and >= 0, got {}",
                a.convective_coefficient
            )));
        }
        if !(0.0..=1.0).contains(&a.emissivity) || !a.emissivity.is_finite() {
            return Err(PelletError::ConfigError(format!(
                "emissivity must lie in [0, 1], got {}",
                a.emissivity
            )));
        }
        if !a.temperature_k.is_finite() || a.temperature_k <= 0.0 {
            return Err(PelletError::PhysicsViolation(format!(
                "ambient temperature must be finite and > 0, got {}",
                a.temperature_k
            )));
        }
        if !a.ignition_temperature_k.is_finite() || a.ignition_temperature_k <= 0.0 {
            return Err(PelletError::PhysicsViolation(format!(
                "ignition temperature must be finite and > 0, got {}",
                a.ignition_temperature_k
            )));
        }

        let s = &self.solver;
        if !s.time_step_s.is_finite() || s.time_step_s <= 0.0 {
            return Err(PelletError::ConfigError(format!(
                "timestep must be finite and > 0, got {}",
                s.time_step_s
            )));
        }
        if !(0.0..=1.0).contains(&s.implicitness_diffusion) {
            return Err(PelletError::ConfigError(format!(
                "diffusion implicitness κ must lie in [0, 1], got {}",
                s.implicitness_diffusion
            )));
        }
        if !(0.0..=1.0).contains(&s.implicitness_source) {
            return Err(PelletError::ConfigError(format!(
                "source implicitness γ must lie in [0, 1], got {}",
                s.implicitness_source
            )));
        }
        if !s.sharpness_coefficient.is_finite() || s.sharpness_coefficient <= 0.0 {
            return Err(PelletError::ConfigError(format!(
                "sharpness coefficient must be finite and > 0, got {}",
                s.sharpness_coefficient
            )));
        }
        if s.max_steps == 0 {
            return Err(PelletError::ConfigError(
                "max_steps must be at least 1".to_string(),
            ));
        }

        let i = &self.initiation;
        if !(0.0..=1.0).contains(&i.hot_zone_fraction) || !i.hot_zone_fraction.is_finite() {
            return Err(PelletError::ConfigError(format!(
                "hot zone fraction must lie in [0, 1], got {}",
                i.hot_zone_fraction
            )));
        }
        if !i.hot_zone_temperature_k.is_finite() || i.hot_zone_temperature_k <= 0.0 {
            return Err(PelletError::PhysicsViolation(format!(
                "hot zone temperature must be finite and > 0, got {}",
                i.hot_zone_temperature_k
            )));
        }

        if let DiffusivityConfig::Custom {
            pre_exponential,
            activation_energy,
        } = self.diffusivity
        {
            if !pre_exponential.is_finite() || pre_exponential <= 0.0 {
                return Err(PelletError::ConfigError(format!(
                    "diffusivity pre-exponential must be finite and > 0, got {pre_exponential}"
                )));
            }
            if !activation_energy.is_finite() || activation_energy < 0.0 {
                return Err(PelletError::ConfigError(format!(
                    "activation energy must be finite and >= 0, got {activation_energy}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/pellet-types/ at compile time,
    /// so we go up 2 levels to reach the repository root.
    fn config_path() -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("pellet_config.json")
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_load_reference_config() {
        let cfg = SimulationConfig::from_file(&config_path()).unwrap();
        assert_eq!(cfg.simulation_name, "Ni-clad-Al-SHS-pellet");
        assert_eq!(cfg.pellet.grid_points, 101);
        assert_eq!(cfg.particle.grid_points, 32);
        assert!((cfg.particle.core_radius_m - 32.5e-6).abs() < 1e-12);
        assert!((cfg.particle.overall_radius_m - 39.5e-6).abs() < 1e-12);
        assert!((cfg.ambient.temperature_k - 298.15).abs() < 1e-10);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = SimulationConfig::from_file(&config_path()).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.simulation_name, cfg2.simulation_name);
        assert_eq!(cfg.pellet.grid_points, cfg2.pellet.grid_points);
        assert!(
            (cfg.solver.implicitness_diffusion - cfg2.solver.implicitness_diffusion).abs() < 1e-15
        );
    }

    #[test]
    fn test_defaults_applied() {
        let json = r#"{
            "simulation_name": "minimal",
            "pellet": {"length_m": 6.35e-3, "diameter_m": 6.35e-3,
                       "particle_volume_fraction": 0.7, "grid_points": 11},
            "particle": {"core_radius_m": 32.5e-6, "overall_radius_m": 39.5e-6,
                         "grid_points": 8},
            "ambient": {"convective_coefficient": 19.68, "emissivity": 0.25,
                        "temperature_k": 298.15, "ignition_temperature_k": 933.15},
            "solver": {"time_step_s": 1e-4, "max_steps": 100},
            "diffusivity": {"preset": "du"}
        }"#;
        let cfg: SimulationConfig = serde_json::from_str(json).unwrap();
        assert!((cfg.solver.implicitness_diffusion - 0.5).abs() < 1e-15);
        assert!((cfg.solver.implicitness_source - 0.5).abs() < 1e-15);
        assert!((cfg.solver.sharpness_coefficient - 0.1).abs() < 1e-15);
        assert!((cfg.initiation.hot_zone_fraction - 0.1).abs() < 1e-15);
        cfg.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_bad_radii() {
        let mut cfg = SimulationConfig::from_file(&config_path()).unwrap();
        cfg.particle.core_radius_m = cfg.particle.overall_radius_m;
        assert!(cfg.validate().is_err(), "core radius >= overall must fail");
    }

    #[test]
    fn test_validation_rejects_implicitness_out_of_range() {
        let mut cfg = SimulationConfig::from_file(&config_path()).unwrap();
        cfg.solver.implicitness_diffusion = 1.5;
        assert!(cfg.validate().is_err(), "κ > 1 must fail");
    }

    #[test]
    fn test_validation_rejects_volume_fraction_out_of_range() {
        let mut cfg = SimulationConfig::from_file(&config_path()).unwrap();
        cfg.pellet.particle_volume_fraction = -0.1;
        assert!(cfg.validate().is_err(), "φ < 0 must fail");
    }

    #[test]
    fn test_validation_rejects_tiny_grid() {
        let mut cfg = SimulationConfig::from_file(&config_path()).unwrap();
        cfg.pellet.grid_points = 1;
        assert!(cfg.validate().is_err(), "1-node pellet grid must fail");
    }
}
