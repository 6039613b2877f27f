// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Pellet
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Axial heat-conduction solver for the packed pellet.
//!
//! Owns the outer time loop. Each pellet node carries one particle
//! instance; per step the particles advance first (surface pinned to the
//! node temperature), then the pellet enthalpy field is solved with
//! Bruggeman effective conductivity, the particle reaction heat as a
//! volumetric source, and linearized convective + radiative ambient
//! loss at the end faces and the curved side surface.

use std::sync::Arc;

use ndarray::Array1;
use pellet_math::tridiag::TridiagonalSolver;
use pellet_thermo::enthalpy::EnthalpyState;
use pellet_thermo::materials::{reaction_heat_per_kg, ALUMINIUM, ARGON, NICKEL, NICKEL_ALUMINIDE};
use pellet_thermo::mixing::{effective_conductivity, MixingModel};
use pellet_types::config::SimulationConfig;
use pellet_types::constants::SIGMA_SB;
use pellet_types::error::PelletResult;
use pellet_types::state::{Grid1D, ParticleState, PelletProperties, StepReport};

use crate::particle::ParticleSolver;
use crate::report::{front_position, FRONT_TEMPERATURE};

pub struct PelletSolver {
    config: Arc<SimulationConfig>,
    grid: Grid1D,
    /// One particle per axial node.
    particles: Vec<ParticleSolver>,
    /// Nodal mixture specific enthalpy (J/kg).
    enthalpy: Array1<f64>,
    /// Nodal temperature (K).
    temperature: Array1<f64>,
    /// Bulk bed density, fixed at packing (kg/m³).
    density: f64,
    /// Mass fraction of particle material in the bed.
    particle_mass_fraction: f64,
    /// Particle density at packing, mass basis for the reaction source
    /// (kg/m³).
    particle_density_initial: f64,
    time: f64,
    steps_taken: usize,
}

impl PelletSolver {
    pub fn new(config: SimulationConfig) -> PelletResult<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let m = config.pellet.grid_points;
        let grid = Grid1D::new(m, 0.0, config.pellet.length_m);

        let t_ambient = config.ambient.temperature_k;
        let hot_length = config.initiation.hot_zone_fraction * config.pellet.length_m;
        let hot_temperature = config.initiation.hot_zone_temperature_k;

        let mut particles = Vec::with_capacity(m);
        let mut temperature = Array1::zeros(m);
        for i in 0..m {
            let t0 = if grid.x[i] < hot_length {
                hot_temperature
            } else {
                t_ambient
            };
            temperature[i] = t0;
            particles.push(ParticleSolver::new(Arc::clone(&config), t0)?);
        }

        // Bed density and mass split from the packing-time densities of
        // an unreacted particle at ambient temperature.
        let phi = config.pellet.particle_volume_fraction;
        let particle_density_initial =
            ParticleSolver::new(Arc::clone(&config), t_ambient)?.averaged_density()?;
        let fluid_density = ARGON.density(t_ambient);
        let density = phi * particle_density_initial + (1.0 - phi) * fluid_density;
        let particle_mass_fraction = phi * particle_density_initial / density;

        let mut solver = PelletSolver {
            config,
            grid,
            particles,
            enthalpy: Array1::zeros(m),
            temperature,
            density,
            particle_mass_fraction,
            particle_density_initial,
            time: 0.0,
            steps_taken: 0,
        };
        for i in 0..m {
            solver.enthalpy[i] = solver.node_mixture(i)?.enthalpy_of(solver.temperature[i]);
        }
        Ok(solver)
    }

    /// Load the configuration from a JSON file and build the solver.
    pub fn from_file(path: &str) -> PelletResult<Self> {
        let config = SimulationConfig::from_file(path)?;
        Self::new(config)
    }

    /// Mixture enthalpy state of a pellet node: the node's particle
    /// composition plus the degassing fluid, mass-weighted.
    fn node_mixture(&self, i: usize) -> PelletResult<EnthalpyState> {
        let (w_al, w_ni, w_nial) = self.particles[i].averaged_mass_fractions()?;
        let wp = self.particle_mass_fraction;
        EnthalpyState::mixture(&[
            (&ALUMINIUM, wp * w_al),
            (&NICKEL, wp * w_ni),
            (&NICKEL_ALUMINIDE, wp * w_nial),
            (&ARGON, 1.0 - wp * (w_al + w_ni + w_nial)),
        ])
    }

    /// Ambient heat flux per unit surface area at temperature t (W/m²),
    /// convective plus radiative.
    fn surface_loss(&self, t: f64) -> f64 {
        let a = &self.config.ambient;
        a.convective_coefficient * (t - a.temperature_k)
            + a.emissivity * SIGMA_SB * (t.powi(4) - a.temperature_k.powi(4))
    }

    /// d(surface loss)/dT, used for the per-timestep linearization.
    fn surface_loss_derivative(&self, t: f64) -> f64 {
        let a = &self.config.ambient;
        a.convective_coefficient + 4.0 * a.emissivity * SIGMA_SB * t.powi(3)
    }

    /// Advance the coupled system one timestep.
    pub fn step(&mut self) -> PelletResult<StepReport> {
        let m = self.grid.n;
        let dx = self.grid.dx;
        let dt = self.config.solver.time_step_s;
        let kappa = self.config.solver.implicitness_diffusion;
        let phi = self.config.pellet.particle_volume_fraction;
        let q_rxn = reaction_heat_per_kg();
        let lateral = 4.0 / self.config.pellet.diameter_m;

        // Particle step first: the pellet step consumes same-level
        // particle results (averaged properties and extent increments).
        let mut source = vec![0.0; m]; // W/m³
        for i in 0..m {
            let before = self.particles[i].mean_extent();
            self.particles[i].step(self.temperature[i])?;
            let after = self.particles[i].mean_extent();
            source[i] = phi * self.particle_density_initial * q_rxn * (after - before) / dt;
        }

        // Post-step mixture properties per node.
        let mut states = Vec::with_capacity(m);
        let mut cp = vec![0.0; m];
        let mut k_eff = vec![0.0; m];
        for i in 0..m {
            let state = self.node_mixture(i)?;
            let t = self.temperature[i];
            cp[i] = state.heat_capacity(t);
            let k_particle = self.particles[i].averaged_thermal_conductivity()?;
            let k_fluid = ARGON.thermal_conductivity(t);
            k_eff[i] = effective_conductivity(MixingModel::Bruggeman, phi, k_fluid, k_particle)?;
            states.push(state);
        }

        // Shared interface conductances so the flux between neighbours
        // telescopes exactly (closed-system conservation).
        let mut k_int = vec![0.0; m - 1];
        for i in 0..m - 1 {
            k_int[i] = 0.5 * (k_eff[i] + k_eff[i + 1]);
        }

        let mut system = TridiagonalSolver::new(m);
        let t_old = &self.temperature;

        // Face row at x = 0: half control volume, Robin loss on the face
        // plus lateral loss, both linearized about the current
        // temperature.
        {
            let volume = 0.5 * dx;
            let cap = self.density * volume / dt;
            let loss = self.surface_loss(t_old[0]);
            let loss_deriv = self.surface_loss_derivative(t_old[0]);
            let g = -kappa * k_int[0] / (dx * cp[1]);
            let f = cap
                + kappa * k_int[0] / (dx * cp[0])
                + kappa * (1.0 + volume * lateral) * loss_deriv / cp[0];
            let flux = k_int[0] * (t_old[1] - t_old[0]) / dx;
            let b = cap * self.enthalpy[0]
                + flux
                - (1.0 + volume * lateral) * loss
                + volume * source[0]
                + (f - cap) * self.enthalpy[0]
                + g * self.enthalpy[1];
            system.set_first_row(f, g, b);
        }

        for i in 1..m - 1 {
            let volume = dx;
            let cap = self.density * volume / dt;
            let loss = self.surface_loss(t_old[i]);
            let loss_deriv = self.surface_loss_derivative(t_old[i]);
            let e = -kappa * k_int[i - 1] / (dx * cp[i - 1]);
            let g = -kappa * k_int[i] / (dx * cp[i + 1]);
            let f = cap
                + kappa * (k_int[i] + k_int[i - 1]) / (dx * cp[i])
                + kappa * volume * lateral * loss_deriv / cp[i];
            let flux =
                (k_int[i] * (t_old[i + 1] - t_old[i]) - k_int[i - 1] * (t_old[i] - t_old[i - 1]))
                    / dx;
            let b = cap * self.enthalpy[i]
                + flux
                - volume * lateral * loss
                + volume * source[i]
                + e * self.enthalpy[i - 1]
                + (f - cap) * self.enthalpy[i]
                + g * self.enthalpy[i + 1];
            system.set_equation(i, e, f, g, b);
        }

        // Face row at x = L.
        {
            let i = m - 1;
            let volume = 0.5 * dx;
            let cap = self.density * volume / dt;
            let loss = self.surface_loss(t_old[i]);
            let loss_deriv = self.surface_loss_derivative(t_old[i]);
            let e = -kappa * k_int[i - 1] / (dx * cp[i - 1]);
            let f = cap
                + kappa * k_int[i - 1] / (dx * cp[i])
                + kappa * (1.0 + volume * lateral) * loss_deriv / cp[i];
            let flux = -k_int[i - 1] * (t_old[i] - t_old[i - 1]) / dx;
            let b = cap * self.enthalpy[i]
                + flux
                - (1.0 + volume * lateral) * loss
                + volume * source[i]
                + e * self.enthalpy[i - 1]
                + (f - cap) * self.enthalpy[i];
            system.set_last_row(e, f, b);
        }

        let mut solution = vec![0.0; m];
        system.solve_into(&mut solution);

        for i in 0..m {
            self.enthalpy[i] = solution[i];
            self.temperature[i] = states[i].temperature_of(solution[i])?;
        }
        self.time += dt;
        self.steps_taken += 1;

        let max_temperature = self
            .temperature
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let mean_extent = self
            .particles
            .iter()
            .map(|p| p.mean_extent())
            .sum::<f64>()
            / m as f64;
        Ok(StepReport {
            time: self.time,
            max_temperature,
            face_temperature: self.temperature[0],
            mean_extent,
            front_position_m: front_position(&self.grid.x, &self.temperature, FRONT_TEMPERATURE),
        })
    }

    /// Run up to `steps` timesteps, bounded by the configured max_steps,
    /// stopping early on full conversion.
    pub fn run(&mut self, steps: usize) -> PelletResult<Vec<StepReport>> {
        let mut reports = Vec::with_capacity(steps);
        while reports.len() < steps && self.steps_taken < self.config.solver.max_steps {
            reports.push(self.step()?);
            if self.is_complete() {
                break;
            }
        }
        Ok(reports)
    }

    /// All particles reached their terminal state.
    pub fn is_complete(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.state() == ParticleState::FullyConverted)
    }

    /// Total bed enthalpy per unit cross-section (J/m²): conserved in a
    /// closed system (no ambient loss, reaction frozen).
    pub fn total_enthalpy(&self) -> f64 {
        let dx = self.grid.dx;
        let m = self.grid.n;
        let mut total = 0.5 * dx * (self.enthalpy[0] + self.enthalpy[m - 1]);
        for i in 1..m - 1 {
            total += dx * self.enthalpy[i];
        }
        total * self.density
    }

    /// Bulk bed properties at ambient conditions.
    pub fn properties(&self) -> PelletResult<PelletProperties> {
        let t = self.config.ambient.temperature_k;
        let phi = self.config.pellet.particle_volume_fraction;
        let state = self.node_mixture(self.grid.n - 1)?;
        let k_particle = self.particles[self.grid.n - 1].averaged_thermal_conductivity()?;
        Ok(PelletProperties {
            density: self.density,
            particle_mass_fraction: self.particle_mass_fraction,
            heat_capacity: state.heat_capacity(t),
            thermal_conductivity: effective_conductivity(
                MixingModel::Bruggeman,
                phi,
                ARGON.thermal_conductivity(t),
                k_particle,
            )?,
        })
    }

    pub fn grid(&self) -> &Grid1D {
        &self.grid
    }

    pub fn temperature(&self) -> &Array1<f64> {
        &self.temperature
    }

    pub fn enthalpy(&self) -> &Array1<f64> {
        &self.enthalpy
    }

    pub fn particles(&self) -> &[ParticleSolver] {
        &self.particles
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}
