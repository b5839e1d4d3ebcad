//! Command-line interface definition.

use aah_core::config::{RunConfig, load_config, reference_phi_y};
use aah_core::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Sweep φx for the 2D Aubry-André-Harper model and plot the spectrum.
///
/// With no arguments, runs the reference sweep: 8×8 lattice, t = 1,
/// λx = λy = 3.5, αx = αy = 1/8, φy = -π(lx+1), open boundaries, 301
/// phases over [0, 2π], written to figures/spectrum.png.
#[derive(Parser, Debug)]
#[command(name = "aah-spectrum", version, about, long_about = None)]
pub struct Cli {
    /// JSON run configuration; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sites along x
    #[arg(long)]
    pub lx: Option<usize>,

    /// Sites along y
    #[arg(long)]
    pub ly: Option<usize>,

    /// Hopping amplitude
    #[arg(short = 't', long = "hopping", allow_negative_numbers = true)]
    pub t: Option<f64>,

    /// Hopping along x (defaults to --hopping)
    #[arg(long, allow_negative_numbers = true)]
    pub t_x: Option<f64>,

    /// Hopping along y (defaults to --hopping)
    #[arg(long, allow_negative_numbers = true)]
    pub t_y: Option<f64>,

    /// Modulation amplitude along x
    #[arg(long, allow_negative_numbers = true)]
    pub lam_x: Option<f64>,

    /// Modulation amplitude along y
    #[arg(long, allow_negative_numbers = true)]
    pub lam_y: Option<f64>,

    /// Modulation frequency along x
    #[arg(long, allow_negative_numbers = true)]
    pub alpha_x: Option<f64>,

    /// Modulation frequency along y
    #[arg(long, allow_negative_numbers = true)]
    pub alpha_y: Option<f64>,

    /// Fixed y phase (defaults to -π(lx+1) without a config file)
    #[arg(long, allow_negative_numbers = true)]
    pub phi_y: Option<f64>,

    /// Periodic boundary along x
    #[arg(long)]
    pub periodic_x: bool,

    /// Periodic boundary along y
    #[arg(long)]
    pub periodic_y: bool,

    /// Number of φx samples
    #[arg(short = 'n', long)]
    pub samples: Option<usize>,

    /// Sample [0, 2π) instead of [0, 2π]
    #[arg(long)]
    pub no_endpoint: bool,

    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Evaluate samples on the current thread only
    #[arg(long)]
    pub serial: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        use tracing_subscriber::{EnvFilter, fmt};

        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
    }

    /// Effective run configuration: config file (or defaults), then flags.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RunConfig::default(),
        };

        let model = &mut config.model;
        if let Some(lx) = self.lx {
            model.lx = lx;
        }
        if let Some(ly) = self.ly {
            model.ly = ly;
        }
        if let Some(t) = self.t {
            model.t = t;
        }
        if self.t_x.is_some() {
            model.t_x = self.t_x;
        }
        if self.t_y.is_some() {
            model.t_y = self.t_y;
        }
        if let Some(v) = self.lam_x {
            model.lam_x = v;
        }
        if let Some(v) = self.lam_y {
            model.lam_y = v;
        }
        if let Some(v) = self.alpha_x {
            model.alpha_x = v;
        }
        if let Some(v) = self.alpha_y {
            model.alpha_y = v;
        }
        match (self.phi_y, &self.config) {
            (Some(v), _) => model.phi_y = v,
            (None, None) => model.phi_y = reference_phi_y(model.lx),
            (None, Some(_)) => {}
        }
        model.periodic_x |= self.periodic_x;
        model.periodic_y |= self.periodic_y;

        if let Some(n) = self.samples {
            config.scan.samples = n;
        }
        if self.no_endpoint {
            config.scan.endpoint = false;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aah_core::config::{DEFAULT_OUTPUT, ScanConfig, save_config};
    use aah_core::error::AahError;
    use aah_core::hamiltonian::AahParams;
    use std::f64::consts::PI;

    #[test]
    fn test_cli_defaults_reproduce_reference_sweep() {
        let cli = Cli::parse_from(["aah-spectrum"]);
        let cfg = cli.resolve().unwrap();

        assert_eq!(cfg, RunConfig::default());
        assert_eq!(cfg.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!cli.serial);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "aah-spectrum",
            "--lx",
            "4",
            "--ly",
            "3",
            "-t",
            "0.5",
            "--lam-x",
            "-0.7",
            "--periodic-y",
            "-n",
            "3",
            "--no-endpoint",
            "-o",
            "out/plot.png",
            "-vv",
        ]);
        let cfg = cli.resolve().unwrap();

        assert_eq!((cfg.model.lx, cfg.model.ly), (4, 3));
        assert_eq!(cfg.model.t, 0.5);
        assert_eq!(cfg.model.lam_x, -0.7);
        assert!(cfg.model.periodic_y);
        assert!(!cfg.model.periodic_x);
        // φy follows the overridden lx.
        assert!((cfg.model.phi_y + 5.0 * PI).abs() < 1e-12);
        assert_eq!(
            cfg.scan,
            ScanConfig {
                samples: 3,
                endpoint: false
            }
        );
        assert_eq!(cfg.output, PathBuf::from("out/plot.png"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_negative_phase_flag() {
        let cli = Cli::parse_from(["aah-spectrum", "--phi-y", "-3.5"]);
        assert_eq!(cli.resolve().unwrap().model.phi_y, -3.5);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let file_cfg = RunConfig {
            model: AahParams {
                phi_y: 0.25,
                ..AahParams::new(5, 5)
            },
            ..RunConfig::default()
        };
        save_config(&path, &file_cfg).unwrap();

        let cli = Cli::parse_from(["aah-spectrum", "-c", path.to_str().unwrap(), "--ly", "2"]);
        let cfg = cli.resolve().unwrap();
        assert_eq!(cfg.model.lx, 5);
        assert_eq!(cfg.model.ly, 2);
        // Config file phase is kept.
        assert_eq!(cfg.model.phi_y, 0.25);
    }

    #[test]
    fn test_invalid_dimension_rejected() {
        let cli = Cli::parse_from(["aah-spectrum", "--lx", "0"]);
        assert!(matches!(cli.resolve(), Err(AahError::InvalidDimension { .. })));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["aah-spectrum", "-q", "-v"]).is_err());
    }
}
