// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Materials
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Built-in material data for the Ni-clad Al system: aluminium core,
//! nickel shell, nickel-aluminide product, and argon as the degassing
//! fluid filling pellet voids.

use crate::substance::{Phase, PhaseTransition, Substance};

/// Aluminium (particle core). Melts at 933.47 K.
pub const ALUMINIUM: Substance = Substance {
    name: "Al",
    molar_mass: 26.98e-3,
    enthalpy_of_formation: 0.0,
    phases: &[
        Phase {
            name: "solid",
            density: 2700.0,
            cp_a: 897.0,
            cp_b: 0.0,
            k_a: 239.0,
            k_b: 0.0,
        },
        Phase {
            name: "liquid",
            density: 2375.0,
            cp_a: 1177.0,
            cp_b: 0.0,
            k_a: 91.0,
            k_b: 0.0,
        },
    ],
    transitions: &[PhaseTransition {
        temperature: 933.47,
        latent_heat: 397.0e3,
    }],
};

/// Nickel (particle shell). Melts at 1728 K.
pub const NICKEL: Substance = Substance {
    name: "Ni",
    molar_mass: 58.69e-3,
    enthalpy_of_formation: 0.0,
    phases: &[
        Phase {
            name: "solid",
            density: 8902.0,
            cp_a: 440.0,
            cp_b: 0.0,
            k_a: 90.7,
            k_b: 0.0,
        },
        Phase {
            name: "liquid",
            density: 7810.0,
            cp_a: 620.0,
            cp_b: 0.0,
            k_a: 60.0,
            k_b: 0.0,
        },
    ],
    transitions: &[PhaseTransition {
        temperature: 1728.0,
        latent_heat: 298.0e3,
    }],
};

/// Nickel aluminide NiAl (intermetallic product). Melts at 1912 K.
/// Formation enthalpy −118.4 kJ/mol drives the SHS reaction.
pub const NICKEL_ALUMINIDE: Substance = Substance {
    name: "NiAl",
    molar_mass: 85.675e-3,
    enthalpy_of_formation: -118.4e3,
    phases: &[
        Phase {
            name: "solid",
            density: 5900.0,
            cp_a: 717.0,
            cp_b: 0.0,
            k_a: 115.0,
            k_b: 0.0,
        },
        Phase {
            name: "liquid",
            density: 5650.0,
            cp_a: 831.0,
            cp_b: 0.0,
            k_a: 80.0,
            k_b: 0.0,
        },
    ],
    transitions: &[PhaseTransition {
        temperature: 1912.0,
        latent_heat: 822.0e3,
    }],
};

/// Argon, the degassing fluid between packed particles. Single gas
/// phase over the whole simulated range.
pub const ARGON: Substance = Substance {
    name: "Ar",
    molar_mass: 39.948e-3,
    enthalpy_of_formation: 0.0,
    phases: &[Phase {
        name: "gas",
        density: 1.633,
        cp_a: 520.3,
        cp_b: 0.0,
        k_a: 1.49e-3,
        k_b: 5.46e-5,
    }],
    transitions: &[],
};

/// Specific heat release per unit mass of NiAl formed (J/kg).
/// Positive for the exothermic Al + Ni → NiAl reaction.
pub fn reaction_heat_per_kg() -> f64 {
    -NICKEL_ALUMINIDE.enthalpy_of_formation / NICKEL_ALUMINIDE.molar_mass
}
