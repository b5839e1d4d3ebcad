//! Run configuration: model parameters, sweep grid and output path.

use crate::error::{AahError, Result};
use crate::hamiltonian::AahParams;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// Default number of φx samples.
pub const DEFAULT_SAMPLES: usize = 301;

/// Default location of the rendered spectrum.
pub const DEFAULT_OUTPUT: &str = "figures/spectrum.png";

/// φy = -π(lx + 1), the reference sweep's fixed y phase.
pub fn reference_phi_y(lx: usize) -> f64 {
    -PI * (lx as f64 + 1.0)
}

/// The φx grid of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of phases.
    pub samples: usize,
    /// Include φx = 2π as the last sample.
    pub endpoint: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            endpoint: true,
        }
    }
}

impl ScanConfig {
    pub fn phases(&self) -> Vec<f64> {
        crate::scan::phase_grid(self.samples, self.endpoint)
    }
}

/// Everything a spectrum run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub model: AahParams,
    pub scan: ScanConfig,
    pub output: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        let model = AahParams::default();
        Self {
            model: AahParams {
                phi_y: reference_phi_y(model.lx),
                ..model
            },
            scan: ScanConfig::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl RunConfig {
    /// Reject configurations that cannot produce a spectrum.
    pub fn validate(&self) -> Result<()> {
        self.model.lattice()?;
        if self.scan.samples == 0 {
            return Err(AahError::InvalidParameter(
                "scan.samples must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a run configuration from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<RunConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: RunConfig = serde_json::from_str(&json)?;
    config.validate()?;
    Ok(config)
}

/// Save a run configuration as pretty-printed JSON.
pub fn save_config(path: impl AsRef<Path>, config: &RunConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_sweep() {
        let cfg = RunConfig::default();
        assert_eq!((cfg.model.lx, cfg.model.ly), (8, 8));
        assert_eq!(cfg.model.lam_x, 3.5);
        assert_eq!(cfg.model.alpha_y, 0.125);
        assert!((cfg.model.phi_y + 9.0 * PI).abs() < 1e-12);
        assert_eq!(cfg.scan.samples, 301);
        assert!(cfg.scan.endpoint);
        assert_eq!(cfg.output, PathBuf::from("figures/spectrum.png"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let cfg = RunConfig {
            model: AahParams {
                periodic_x: true,
                t_y: Some(0.5),
                ..AahParams::new(5, 4)
            },
            scan: ScanConfig {
                samples: 11,
                endpoint: false,
            },
            output: PathBuf::from("out/s.png"),
        };

        save_config(&path, &cfg).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: RunConfig = serde_json::from_str(r#"{"model": {"Lx": 3}, "scan": {"samples": 7}}"#).unwrap();
        assert_eq!(cfg.model.lx, 3);
        assert_eq!(cfg.model.ly, 8);
        assert_eq!(cfg.scan.samples, 7);
        assert!(cfg.scan.endpoint);
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"model": {"lx": 0}}"#).unwrap();
        assert!(matches!(
            load_config(&path),
            Err(AahError::InvalidDimension { lx: 0, ly: 8 })
        ));

        std::fs::write(&path, r#"{"scan": {"samples": 0}}"#).unwrap();
        assert!(matches!(load_config(&path), Err(AahError::InvalidParameter(_))));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(load_config(&path), Err(AahError::JsonError(_))));

        assert!(matches!(
            load_config(dir.path().join("missing.json")),
            Err(AahError::IoError(_))
        ));
    }
}
