// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Universal gas constant (J/(mol·K))
pub const R_GAS: f64 = 8.314462618;

/// Stefan-Boltzmann constant (W/(m²·K⁴))
pub const SIGMA_SB: f64 = 5.670374419e-8;

/// Reference temperature for specific enthalpy (K).
/// Enthalpy of every substance is zero here.
pub const T_REFERENCE: f64 = 298.15;

/// Lower bracket for enthalpy → temperature inversion (K).
pub const T_BRACKET_LOW: f64 = 200.0;

/// Upper bracket for enthalpy → temperature inversion (K).
/// Above the NiAl melting point with margin; enthalpies mapping outside
/// [T_BRACKET_LOW, T_BRACKET_HIGH] are treated as contract violations.
pub const T_BRACKET_HIGH: f64 = 4000.0;

/// Bisection tolerance for the enthalpy inversion (K).
pub const TEMPERATURE_TOLERANCE: f64 = 1e-6;
