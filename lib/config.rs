//! Run configuration, loadable from TOML.
//!
//! ```
//! use xyspace::config::{ Envelope, PotentialKind, PropagatorConfig };
//!
//! let config = PropagatorConfig::from_toml_str(r#"
//!     nx = 48
//!     ny = 32
//!     xmin = -8.0
//!     xmax = 8.0
//!     ymin = -6.0
//!     ymax = 6.0
//!     x_mode = 2.0
//!     dt = 0.002
//!
//!     [envelope]
//!     type = "Gaussian"
//!     width = 1.5
//!
//!     [potential]
//!     type = "Free"
//! "#).unwrap();
//! assert_eq!(config.envelope, Envelope::Gaussian { width: 1.5 });
//! assert_eq!(config.potential, PotentialKind::Free);
//! assert_eq!(config.y_mode, 0.0);
//! let prop = config.build().unwrap();
//! assert_eq!(prop.psi().shape(), (48, 32));
//! ```

use std::{ f64::consts::PI, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    DEF_DT,
    error::ConfigError,
    grid::Domain,
    timedep::{ Packet, Potential, SplitStep, TimeStep, TResult, harmonic },
};

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Radial envelope of the initial wave packet, as a function of the squared
/// distance `r²` from its center.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum Envelope {
    /// `exp(-r² / (2 width²))`
    Gaussian { width: f64 },
    /// Constant 1, i.e. a bare plane wave.
    Flat,
}

impl Envelope {
    /// Evaluate at squared radius `r2`.
    pub fn eval(&self, r2: f64) -> f64 {
        match self {
            Self::Gaussian { width } => (-r2 / (2.0 * width * width)).exp(),
            Self::Flat => 1.0,
        }
    }
}

/// Static potential to propagate in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum PotentialKind {
    /// `x² + y²`
    Harmonic,
    /// Zero everywhere.
    Free,
    /// Square plateaus of height `height` and half-width `half_width`,
    /// centered at each of `centers`; zero elsewhere.
    Blocks {
        height: f64,
        half_width: f64,
        centers: Vec<[f64; 2]>,
    },
}

impl Potential for PotentialKind {
    fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Harmonic => harmonic(x, y),
            Self::Free => 0.0,
            Self::Blocks { height, half_width, centers } => {
                let inside
                    = centers.iter()
                    .any(|[cx, cy]| {
                        (x - cx).abs() < *half_width
                            && (y - cy).abs() < *half_width
                    });
                if inside { *height } else { 0.0 }
            },
        }
    }
}

/// Length of a driver run.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of recorded frames after the initial one.
    pub frames: usize,
    /// Number of time steps between recorded frames.
    pub steps_per_frame: usize,
}

impl Default for RunConfig {
    fn default() -> Self { Self { frames: 100, steps_per_frame: 20 } }
}

/// Full description of a propagator and how long to run it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PropagatorConfig {
    /// Number of grid points along x
    pub nx: usize,
    /// Number of grid points along y
    pub ny: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    /// Carrier wavenumber along x
    #[serde(default)]
    pub x_mode: f64,
    /// Carrier wavenumber along y
    #[serde(default)]
    pub y_mode: f64,
    /// Packet offset along x; the packet is centered at `x = x_init`
    #[serde(default)]
    pub x_init: f64,
    /// Packet offset along y; the packet is centered at `y = -y_init`
    #[serde(default)]
    pub y_init: f64,
    /// Time step; if absent, the grid's sampling bound is used
    pub dt: Option<f64>,
    pub envelope: Envelope,
    pub potential: PotentialKind,
    #[serde(default)]
    pub run: RunConfig,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            nx: 64,
            ny: 64,
            xmin: -4.0 * PI,
            xmax: 4.0 * PI,
            ymin: -4.0 * PI,
            ymax: 4.0 * PI,
            x_mode: 2.0,
            y_mode: 5.0,
            x_init: -5.0,
            y_init: -3.0,
            dt: Some(DEF_DT),
            envelope: Envelope::Gaussian { width: 1.0 },
            potential: PotentialKind::Harmonic,
            run: RunConfig::default(),
        }
    }
}

impl PropagatorConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Grid and physical extent.
    pub fn domain(&self) -> Domain {
        Domain {
            nx: self.nx,
            ny: self.ny,
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: self.ymin,
            ymax: self.ymax,
        }
    }

    /// Initial packet parameters.
    pub fn packet(&self) -> Packet {
        Packet {
            x_mode: self.x_mode,
            y_mode: self.y_mode,
            x_init: self.x_init,
            y_init: self.y_init,
        }
    }

    /// Time step choice.
    pub fn time_step(&self) -> TimeStep {
        self.dt.map(TimeStep::Fixed).unwrap_or(TimeStep::Nyquist)
    }

    /// Construct the described propagator.
    pub fn build(&self) -> TResult<SplitStep> {
        let envelope = self.envelope.clone();
        SplitStep::new(
            self.domain(),
            move |r2| envelope.eval(r2),
            self.packet(),
            self.potential.clone(),
            self.time_step(),
        )
    }
}

/// Read a [`PropagatorConfig`] from a TOML file.
pub fn read_toml<P>(path: P) -> ConfigResult<PropagatorConfig>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let contents
        = std::fs::read_to_string(path)
        .map_err(|source| {
            ConfigError::Read { path: path.to_path_buf(), source }
        })?;
    PropagatorConfig::from_toml_str(&contents)
}
