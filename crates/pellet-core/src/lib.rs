// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Pellet Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Two-scale SHS solver: radial reaction–diffusion inside core-shell
//! particles coupled to axial heat conduction across the packed pellet.

pub mod particle;
pub mod pellet;
pub mod report;
