// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Pellet Thermo
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thermo-physical property layer: substances with phase transitions,
//! enthalpy–temperature state, Arrhenius interdiffusion, and
//! effective-conductivity mixing laws.

pub mod diffusivity;
pub mod enthalpy;
pub mod materials;
pub mod mixing;
pub mod substance;
