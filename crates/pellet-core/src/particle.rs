// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Particle
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Radial reaction–diffusion solver for one Ni-clad Al particle.
//!
//! Solves the nodal specific-enthalpy field on a spherical grid with a
//! κ-blended implicit/explicit conduction term and a γ-blended
//! interdiffusion source, then inverts enthalpies to temperatures and
//! advances the per-node reaction extent. The outer surface is pinned to
//! the local pellet-bed temperature.

use std::sync::Arc;

use ndarray::Array1;
use pellet_math::tridiag::TridiagonalSolver;
use pellet_thermo::diffusivity::ArrheniusDiffusivity;
use pellet_thermo::enthalpy::EnthalpyState;
use pellet_thermo::materials::{
    reaction_heat_per_kg, ALUMINIUM, NICKEL, NICKEL_ALUMINIDE,
};
use pellet_types::config::SimulationConfig;
use pellet_types::constants::T_REFERENCE;
use pellet_types::error::{PelletError, PelletResult};
use pellet_types::state::{Grid1D, ParticleState};

/// Extent at which a particle counts as ignited.
const IGNITION_EXTENT: f64 = 1e-4;

/// Extent at which a node counts as fully converted. First-order
/// kinetics approach 1 only asymptotically.
const FULL_CONVERSION_EXTENT: f64 = 0.999;

pub struct ParticleSolver {
    config: Arc<SimulationConfig>,
    grid: Grid1D,
    diffusivity: ArrheniusDiffusivity,
    /// Shell-thickness diffusion length scale (m).
    diffusion_length: f64,
    /// Heat release per unit mass converted (J/kg).
    q_reaction: f64,
    /// Nodal specific enthalpy (J/kg).
    enthalpy: Array1<f64>,
    /// Nodal temperature (K), inverted from enthalpy.
    temperature: Array1<f64>,
    /// Nodal reaction extent ξ ∈ [0, 1], monotone non-decreasing.
    extent: Array1<f64>,
    /// Initial core (Al) mass fraction per node, smoothed across the
    /// core-shell interface by the sharpness coefficient.
    core_fraction: Array1<f64>,
    /// Shell-volume weight of each node (4π factored out).
    volume: Array1<f64>,
    state: ParticleState,
}

impl ParticleSolver {
    /// Create a particle at a uniform initial temperature, unreacted.
    pub fn new(config: Arc<SimulationConfig>, initial_temperature: f64) -> PelletResult<Self> {
        if !initial_temperature.is_finite() || initial_temperature <= 0.0 {
            return Err(PelletError::PhysicsViolation(format!(
                "particle initial temperature must be finite and > 0, got {initial_temperature}"
            )));
        }
        let n = config.particle.grid_points;
        let r_core = config.particle.core_radius_m;
        let r_overall = config.particle.overall_radius_m;
        let grid = Grid1D::new(n, 0.0, r_overall);
        let dr = grid.dx;

        // Logistic smoothing of the core/shell split; width scales with
        // the sharpness coefficient.
        let width = config.solver.sharpness_coefficient * r_overall;
        let rho_core = ALUMINIUM.density(T_REFERENCE);
        let rho_shell = NICKEL.density(T_REFERENCE);
        let core_fraction = Array1::from_shape_fn(n, |i| {
            let r = grid.x[i];
            let core_volume_weight = 1.0 / (1.0 + ((r - r_core) / width).exp());
            core_volume_weight * rho_core
                / (core_volume_weight * rho_core + (1.0 - core_volume_weight) * rho_shell)
        });

        // Shell-volume control weight of node i: (r_hi³ - r_lo³)/3,
        // clipped to the particle.
        let volume = Array1::from_shape_fn(n, |i| {
            let r_lo = (grid.x[i] - 0.5 * dr).max(0.0);
            let r_hi = (grid.x[i] + 0.5 * dr).min(r_overall);
            (r_hi.powi(3) - r_lo.powi(3)) / 3.0
        });

        let extent = Array1::zeros(n);
        let temperature = Array1::from_elem(n, initial_temperature);
        let mut enthalpy = Array1::zeros(n);
        for i in 0..n {
            let state = Self::composition(core_fraction[i], extent[i])?;
            enthalpy[i] = state.enthalpy_of(initial_temperature);
        }

        Ok(ParticleSolver {
            diffusivity: ArrheniusDiffusivity::from_config(&config.diffusivity),
            diffusion_length: r_overall - r_core,
            q_reaction: reaction_heat_per_kg(),
            config,
            grid,
            enthalpy,
            temperature,
            extent,
            core_fraction,
            volume,
            state: ParticleState::Unreacted,
        })
    }

    /// Enthalpy state of a node given its initial core fraction and
    /// current extent. Unconverted material keeps the local Al/Ni split;
    /// converted material is NiAl.
    fn composition(core_fraction: f64, extent: f64) -> PelletResult<EnthalpyState> {
        let w_al = (1.0 - extent) * core_fraction;
        let w_ni = (1.0 - extent) - w_al;
        let w_nial = 1.0 - w_al - w_ni;
        EnthalpyState::mixture(&[
            (&ALUMINIUM, w_al),
            (&NICKEL, w_ni),
            (&NICKEL_ALUMINIDE, w_nial),
        ])
    }

    fn node_state(&self, i: usize) -> PelletResult<EnthalpyState> {
        Self::composition(self.core_fraction[i], self.extent[i])
    }

    /// First-order diffusion-limited rate factor A(T) = D(T)/δ² (1/s),
    /// frozen below the ignition temperature.
    fn rate_factor(&self, t: f64) -> PelletResult<f64> {
        if t < self.config.ambient.ignition_temperature_k {
            return Ok(0.0);
        }
        let d = self.diffusivity.coefficient(t)?;
        Ok(d / (self.diffusion_length * self.diffusion_length))
    }

    /// Advance one timestep with the particle surface held at the local
    /// bed temperature.
    pub fn step(&mut self, surface_temperature: f64) -> PelletResult<()> {
        if !surface_temperature.is_finite() || surface_temperature <= 0.0 {
            return Err(PelletError::PhysicsViolation(format!(
                "particle surface temperature must be finite and > 0, got {surface_temperature}"
            )));
        }
        let n = self.grid.n;
        let dr = self.grid.dx;
        let dt = self.config.solver.time_step_s;
        let kappa = self.config.solver.implicitness_diffusion;
        let gamma = self.config.solver.implicitness_source;
        let t_ign = self.config.ambient.ignition_temperature_k;

        // Current nodal properties.
        let mut states = Vec::with_capacity(n);
        let mut rho = vec![0.0; n];
        let mut cp = vec![0.0; n];
        let mut cond = vec![0.0; n];
        let mut a_rate = vec![0.0; n];
        let mut a_deriv = vec![0.0; n];
        for i in 0..n {
            let state = self.node_state(i)?;
            let t = self.temperature[i];
            rho[i] = state.density(t);
            cp[i] = state.heat_capacity(t);
            cond[i] = state.thermal_conductivity(t);
            if t >= t_ign {
                a_rate[i] = self.rate_factor(t)?;
                a_deriv[i] = self.diffusivity.temperature_derivative(t)?
                    / (self.diffusion_length * self.diffusion_length);
            }
            states.push(state);
        }

        // Interface conductances r²·k between nodes i and i+1 (the
        // spherical geometry weighting).
        let mut c_int = vec![0.0; n - 1];
        for i in 0..n - 1 {
            let r_half = self.grid.x[i] + 0.5 * dr;
            c_int[i] = r_half * r_half * 0.5 * (cond[i] + cond[i + 1]);
        }

        let mut system = TridiagonalSolver::new(n);

        // Symmetry row at the particle center.
        {
            let cap = rho[0] * self.volume[0] / dt;
            let source = self.q_reaction * a_rate[0] * (1.0 - self.extent[0]);
            let f_src = rho[0] * self.volume[0] * gamma * self.q_reaction * a_deriv[0]
                * (1.0 - self.extent[0])
                / cp[0];
            let g = -kappa * c_int[0] / (dr * cp[1]);
            let f = cap + kappa * c_int[0] / (dr * cp[0]) - f_src;
            let flux = c_int[0] * (self.temperature[1] - self.temperature[0]) / dr;
            let b = cap * self.enthalpy[0]
                + flux
                + rho[0] * self.volume[0] * source
                + (f - cap) * self.enthalpy[0]
                + g * self.enthalpy[1];
            system.set_first_row(f, g, b);
        }

        for i in 1..n - 1 {
            let cap = rho[i] * self.volume[i] / dt;
            let source = self.q_reaction * a_rate[i] * (1.0 - self.extent[i]);
            let f_src = rho[i] * self.volume[i] * gamma * self.q_reaction * a_deriv[i]
                * (1.0 - self.extent[i])
                / cp[i];
            let e = -kappa * c_int[i - 1] / (dr * cp[i - 1]);
            let g = -kappa * c_int[i] / (dr * cp[i + 1]);
            let f = cap + kappa * (c_int[i] + c_int[i - 1]) / (dr * cp[i]) - f_src;
            let flux = (c_int[i] * (self.temperature[i + 1] - self.temperature[i])
                - c_int[i - 1] * (self.temperature[i] - self.temperature[i - 1]))
                / dr;
            let b = cap * self.enthalpy[i]
                + flux
                + rho[i] * self.volume[i] * source
                + e * self.enthalpy[i - 1]
                + (f - cap) * self.enthalpy[i]
                + g * self.enthalpy[i + 1];
            system.set_equation(i, e, f, g, b);
        }

        // Surface row: Dirichlet at the bed temperature.
        let h_surface = states[n - 1].enthalpy_of(surface_temperature);
        system.set_last_row(0.0, 1.0, h_surface);

        let mut solution = vec![0.0; n];
        system.solve_into(&mut solution);

        // Invert enthalpies, then advance the extent with the γ-blended
        // rate. The extent never decreases.
        for i in 0..n {
            self.enthalpy[i] = solution[i];
            self.temperature[i] = states[i].temperature_of(solution[i])?;

            let a_new = self.rate_factor(self.temperature[i])?;
            let xi = self.extent[i];
            let numerator =
                xi + dt * ((1.0 - gamma) * a_rate[i] * (1.0 - xi) + gamma * a_new);
            let denominator = 1.0 + gamma * dt * a_new;
            self.extent[i] = (numerator / denominator).clamp(xi, 1.0);
        }

        if self.state == ParticleState::Unreacted
            && self.extent.iter().any(|&xi| xi > IGNITION_EXTENT)
        {
            self.state = ParticleState::Reacting;
        }
        if self.state == ParticleState::Reacting
            && self.extent.iter().all(|&xi| xi >= FULL_CONVERSION_EXTENT)
        {
            self.state = ParticleState::FullyConverted;
        }

        Ok(())
    }

    pub fn state(&self) -> ParticleState {
        self.state
    }

    pub fn temperature(&self) -> &Array1<f64> {
        &self.temperature
    }

    pub fn extent(&self) -> &Array1<f64> {
        &self.extent
    }

    /// Volume-weighted mean reaction extent.
    pub fn mean_extent(&self) -> f64 {
        let weighted: f64 = self
            .volume
            .iter()
            .zip(self.extent.iter())
            .map(|(v, xi)| v * xi)
            .sum();
        weighted / self.volume.sum()
    }

    /// Volume-weighted particle density (kg/m³).
    pub fn averaged_density(&self) -> PelletResult<f64> {
        let mut mass = 0.0;
        for i in 0..self.grid.n {
            mass += self.volume[i] * self.node_state(i)?.density(self.temperature[i]);
        }
        Ok(mass / self.volume.sum())
    }

    /// Mass-weighted particle heat capacity (J/(kg·K)).
    pub fn averaged_heat_capacity(&self) -> PelletResult<f64> {
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..self.grid.n {
            let state = self.node_state(i)?;
            let m = self.volume[i] * state.density(self.temperature[i]);
            num += m * state.heat_capacity(self.temperature[i]);
            den += m;
        }
        Ok(num / den)
    }

    /// Volume-weighted particle conductivity (W/(m·K)).
    pub fn averaged_thermal_conductivity(&self) -> PelletResult<f64> {
        let mut num = 0.0;
        for i in 0..self.grid.n {
            num += self.volume[i]
                * self
                    .node_state(i)?
                    .thermal_conductivity(self.temperature[i]);
        }
        Ok(num / self.volume.sum())
    }

    /// Mass-weighted current specific enthalpy (J/kg).
    pub fn averaged_enthalpy(&self) -> PelletResult<f64> {
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..self.grid.n {
            let state = self.node_state(i)?;
            let m = self.volume[i] * state.density(self.temperature[i]);
            num += m * self.enthalpy[i];
            den += m;
        }
        Ok(num / den)
    }

    /// Mass-weighted specific enthalpy the particle would hold at a
    /// uniform queried temperature (J/kg).
    pub fn enthalpy_at(&self, temperature: f64) -> PelletResult<f64> {
        let mut num = 0.0;
        let mut den = 0.0;
        for i in 0..self.grid.n {
            let state = self.node_state(i)?;
            let m = self.volume[i] * state.density(self.temperature[i]);
            num += m * state.enthalpy_of(temperature);
            den += m;
        }
        Ok(num / den)
    }

    /// Mass fractions (Al, Ni, NiAl) averaged over the particle.
    pub fn averaged_mass_fractions(&self) -> PelletResult<(f64, f64, f64)> {
        let mut al = 0.0;
        let mut ni = 0.0;
        let mut nial = 0.0;
        let mut den = 0.0;
        for i in 0..self.grid.n {
            let state = self.node_state(i)?;
            let m = self.volume[i] * state.density(self.temperature[i]);
            let w_al = (1.0 - self.extent[i]) * self.core_fraction[i];
            let w_ni = (1.0 - self.extent[i]) - w_al;
            al += m * w_al;
            ni += m * w_ni;
            nial += m * (1.0 - w_al - w_ni);
            den += m;
        }
        Ok((al / den, ni / den, nial / den))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pellet_types::config::SimulationConfig;

    fn test_config() -> Arc<SimulationConfig> {
        let json = r#"{
            "simulation_name": "particle-test",
            "pellet": {"length_m": 6.35e-3, "diameter_m": 6.35e-3,
                       "particle_volume_fraction": 0.7, "grid_points": 11},
            "particle": {"core_radius_m": 32.5e-6, "overall_radius_m": 39.5e-6,
                         "grid_points": 16},
            "ambient": {"convective_coefficient": 19.68, "emissivity": 0.25,
                        "temperature_k": 298.15, "ignition_temperature_k": 933.15},
            "solver": {"time_step_s": 1e-4, "implicitness_diffusion": 1.0,
                       "implicitness_source": 0.5, "max_steps": 1000},
            "diffusivity": {"preset": "alawieh"}
        }"#;
        let cfg: SimulationConfig = serde_json::from_str(json).unwrap();
        cfg.validate().unwrap();
        Arc::new(cfg)
    }

    #[test]
    fn test_initial_state() {
        let particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        assert_eq!(particle.state(), ParticleState::Unreacted);
        assert_eq!(particle.mean_extent(), 0.0);
        for &t in particle.temperature().iter() {
            assert!((t - 298.15).abs() < 1e-12);
        }
    }

    #[test]
    fn test_core_fraction_profile() {
        let particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        // Al-rich at the center, Ni-rich at the surface
        assert!(particle.core_fraction[0] > 0.9, "center should be Al");
        let n = particle.grid.n;
        assert!(
            particle.core_fraction[n - 1] < 0.2,
            "surface should be Ni-rich, got {}",
            particle.core_fraction[n - 1]
        );
        // Monotone decrease outward
        for i in 1..n {
            assert!(particle.core_fraction[i] <= particle.core_fraction[i - 1]);
        }
    }

    #[test]
    fn test_cold_particle_stays_unreacted() {
        let mut particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        for _ in 0..50 {
            particle.step(298.15).unwrap();
        }
        assert_eq!(particle.state(), ParticleState::Unreacted);
        assert_eq!(particle.mean_extent(), 0.0);
        // No spurious self-heating of an isothermal cold particle
        // (drift bounded by the enthalpy-inversion tolerance)
        for &t in particle.temperature().iter() {
            assert!((t - 298.15).abs() < 1e-3, "T drifted to {t}");
        }
    }

    #[test]
    fn test_hot_surface_heats_interior() {
        let mut particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        for _ in 0..200 {
            particle.step(600.0).unwrap();
        }
        // Interior approaches the surface temperature well within the
        // particle conduction timescale
        let t_center = particle.temperature()[0];
        assert!(
            t_center > 550.0,
            "center should approach surface: {t_center}"
        );
    }

    #[test]
    fn test_ignited_particle_reacts_and_converts() {
        let mut particle = ParticleSolver::new(test_config(), 1400.0).unwrap();
        let mut prev_extent = 0.0;
        for _ in 0..100 {
            particle.step(1400.0).unwrap();
            let xi = particle.mean_extent();
            assert!(xi >= prev_extent, "extent decreased: {xi} < {prev_extent}");
            prev_extent = xi;
        }
        assert!(particle.state() != ParticleState::Unreacted);
        assert!(prev_extent > 0.0, "hot particle must react");
    }

    #[test]
    fn test_full_conversion_is_terminal() {
        // Coarser grid and longer timestep: this test only cares about
        // the terminal state, not profile resolution.
        let mut cfg = (*test_config()).clone();
        cfg.particle.grid_points = 8;
        cfg.solver.time_step_s = 5e-4;
        let mut particle = ParticleSolver::new(Arc::new(cfg), 1800.0).unwrap();
        // Alawieh kinetics at 1800 K convert within ~0.2 s
        for _ in 0..800 {
            particle.step(1800.0).unwrap();
            if particle.state() == ParticleState::FullyConverted {
                break;
            }
        }
        assert_eq!(particle.state(), ParticleState::FullyConverted);
        let (al, ni, nial) = particle.averaged_mass_fractions().unwrap();
        assert!(nial > 0.99, "product fraction = {nial}");
        assert!(al < 0.01 && ni < 0.01);
        // Terminal state survives further cold steps
        particle.step(400.0).unwrap();
        assert_eq!(particle.state(), ParticleState::FullyConverted);
    }

    #[test]
    fn test_reaction_heats_particle_above_surface() {
        let mut particle = ParticleSolver::new(test_config(), 1000.0).unwrap();
        for _ in 0..50 {
            particle.step(1000.0).unwrap();
        }
        // Exothermic source must push the interior above the pinned
        // surface temperature
        let t_max = particle
            .temperature()
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(t_max > 1000.0, "interior T = {t_max}");
    }

    #[test]
    fn test_averaged_density_between_constituents() {
        let particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        let rho = particle.averaged_density().unwrap();
        assert!(
            rho > 2700.0 && rho < 8902.0,
            "particle density {rho} outside [Al, Ni]"
        );
    }

    #[test]
    fn test_enthalpy_at_queried_temperature() {
        let particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        let h_ref = particle.enthalpy_at(T_REFERENCE).unwrap();
        let h_350 = particle.enthalpy_at(350.0).unwrap();
        assert!(h_ref.abs() < 1.0, "h(T_ref) = {h_ref}");
        assert!(h_350 > h_ref, "enthalpy must increase with temperature");
    }

    #[test]
    fn test_invalid_surface_temperature_is_fatal() {
        let mut particle = ParticleSolver::new(test_config(), 298.15).unwrap();
        assert!(particle.step(-10.0).is_err());
        assert!(particle.step(f64::NAN).is_err());
    }
}
