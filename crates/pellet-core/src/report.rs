// ─────────────────────────────────────────────────────────────────────
// SHS Pellet Core — Report
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CSV emission and combustion-front measurement.
//!
//! The temperature history is a matrix: the first row holds node
//! positions (leading 0 placeholder), every following row holds the
//! sample time and the nodal temperatures. Downstream measurement
//! scripts fit a line to the front trajectory to extract flame speed.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ndarray::Array1;
use pellet_types::error::{PelletError, PelletResult};
use pellet_types::state::{FrontEstimate, Grid1D};

use pellet_thermo::mixing::ConductivityScanRow;

/// Temperature marking the combustion front (K).
pub const FRONT_TEMPERATURE: f64 = 1000.0;

/// Front location: the farthest node (largest x) at or above the front
/// temperature. None when no node qualifies.
pub fn front_position(x: &Array1<f64>, temperature: &Array1<f64>, threshold: f64) -> Option<f64> {
    let mut front = None;
    for (xi, t) in x.iter().zip(temperature.iter()) {
        if *t >= threshold {
            front = Some(*xi);
        }
    }
    front
}

/// Recorded temperature profiles over a run.
#[derive(Debug, Clone)]
pub struct TemperatureHistory {
    positions: Vec<f64>,
    times: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl TemperatureHistory {
    pub fn new(grid: &Grid1D) -> Self {
        TemperatureHistory {
            positions: grid.x.to_vec(),
            times: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Record one sample.
    pub fn record(&mut self, time: f64, temperature: &Array1<f64>) {
        debug_assert_eq!(temperature.len(), self.positions.len());
        self.times.push(time);
        self.rows.push(temperature.to_vec());
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Write the history matrix as CSV: `0, x…` then `t, T…` per sample.
    pub fn write_csv(&self, path: &Path) -> PelletResult<()> {
        let mut file = File::create(path)?;
        write!(file, "0")?;
        for x in &self.positions {
            write!(file, ",{x}")?;
        }
        writeln!(file)?;
        for (t, row) in self.times.iter().zip(self.rows.iter()) {
            write!(file, "{t}")?;
            for v in row {
                write!(file, ",{v}")?;
            }
            writeln!(file)?;
        }
        Ok(())
    }

    /// Front trajectory (t, x) across the recorded samples.
    pub fn front_trajectory(&self, threshold: f64) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .zip(self.rows.iter())
            .filter_map(|(&t, row)| {
                let mut front = None;
                for (x, temp) in self.positions.iter().zip(row.iter()) {
                    if *temp >= threshold {
                        front = Some((t, *x));
                    }
                }
                front
            })
            .collect()
    }

    /// Least-squares linear fit of the front trajectory; the slope is
    /// the flame speed. None when fewer than two samples carry a front
    /// or the samples are simultaneous.
    pub fn front_speed(&self, threshold: f64) -> Option<FrontEstimate> {
        let samples = self.front_trajectory(threshold);
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let mean_t = samples.iter().map(|(t, _)| t).sum::<f64>() / nf;
        let mean_x = samples.iter().map(|(_, x)| x).sum::<f64>() / nf;
        let var_t: f64 = samples.iter().map(|(t, _)| (t - mean_t).powi(2)).sum();
        if var_t == 0.0 {
            return None;
        }
        let cov: f64 = samples
            .iter()
            .map(|(t, x)| (t - mean_t) * (x - mean_x))
            .sum();
        let speed = cov / var_t;
        Some(FrontEstimate {
            speed_m_per_s: speed,
            intercept_m: mean_x - speed * mean_t,
            samples: n,
        })
    }
}

/// Write the mixing-law comparison table: one row per volume fraction,
/// column order matching the reference measurement scripts.
pub fn write_conductivity_scan_csv(path: &Path, rows: &[ConductivityScanRow]) -> PelletResult<()> {
    if rows.is_empty() {
        return Err(PelletError::ConfigError(
            "conductivity scan table is empty".to_string(),
        ));
    }
    let mut file = File::create(path)?;
    writeln!(file, "Particle Volume Fraction,ME1,CC,EMT,ME2")?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{},{}",
            row.volume_fraction, row.me1, row.cc, row.emt, row.me2
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_history() -> TemperatureHistory {
        // Front advancing one node (1 mm) per 10 ms across a 5-node grid
        let grid = Grid1D::new(5, 0.0, 4.0e-3);
        let mut history = TemperatureHistory::new(&grid);
        for step in 0..4 {
            let t = step as f64 * 0.01;
            let profile = Array1::from_shape_fn(5, |i| {
                if i <= step {
                    1500.0
                } else {
                    300.0
                }
            });
            history.record(t, &profile);
        }
        history
    }

    #[test]
    fn test_front_position_picks_farthest_hot_node() {
        let x = Array1::linspace(0.0, 4.0, 5);
        let t = Array1::from_vec(vec![1500.0, 1200.0, 900.0, 1100.0, 300.0]);
        // Node 3 is re-heated past the threshold; the front is there
        assert_eq!(front_position(&x, &t, 1000.0), Some(3.0));
    }

    #[test]
    fn test_front_position_none_when_cold() {
        let x = Array1::linspace(0.0, 4.0, 5);
        let t = Array1::from_elem(5, 300.0);
        assert_eq!(front_position(&x, &t, 1000.0), None);
    }

    #[test]
    fn test_front_speed_linear_trajectory() {
        let history = synthetic_history();
        let fit = history.front_speed(1000.0).unwrap();
        // 1 mm per 10 ms = 0.1 m/s
        assert!(
            (fit.speed_m_per_s - 0.1).abs() < 1e-9,
            "speed = {}",
            fit.speed_m_per_s
        );
        assert_eq!(fit.samples, 4);
    }

    #[test]
    fn test_front_speed_requires_moving_front() {
        let grid = Grid1D::new(3, 0.0, 2.0);
        let mut history = TemperatureHistory::new(&grid);
        history.record(0.0, &Array1::from_elem(3, 300.0));
        history.record(0.01, &Array1::from_elem(3, 300.0));
        assert!(history.front_speed(1000.0).is_none());
    }

    #[test]
    fn test_history_csv_layout() {
        let history = synthetic_history();
        let path = std::env::temp_dir().join("shs_pellet_history_test.csv");
        history.write_csv(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5, "header row plus 4 samples");
        assert!(lines[0].starts_with("0,0,0.001"), "header: {}", lines[0]);
        assert!(lines[1].starts_with("0,1500"), "first sample: {}", lines[1]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_scan_csv_layout() {
        use pellet_thermo::mixing::conductivity_scan;
        let rows = conductivity_scan(1.0, 9.0, 10).unwrap();
        let path = std::env::temp_dir().join("shs_pellet_scan_test.csv");
        write_conductivity_scan_csv(&path, &rows).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Particle Volume Fraction,ME1,CC,EMT,ME2");
        assert_eq!(lines.len(), 12, "header plus 11 rows");
        assert!(lines[1].starts_with("0,1"), "φ=0 row: {}", lines[1]);
        std::fs::remove_file(&path).ok();
    }
}
