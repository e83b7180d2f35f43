//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::path::PathBuf;
use thiserror::Error;

/// Returned when a grid is requested with zero points along either axis.
#[derive(Debug, Error)]
#[error("grid dimensions must be at least 1×1; got {0}×{1}")]
pub struct SizeError(pub usize, pub usize);

impl SizeError {
    pub(crate) fn check(nx: usize, ny: usize) -> Result<(), Self> {
        (nx > 0 && ny > 0).then_some(()).ok_or(Self(nx, ny))
    }
}

/// Returned when an operation requiring equal-shape grids encounters grids
/// with unequal shapes, given as `(nx, ny)`.
#[derive(Debug, Error)]
#[error("encountered grids with incompatible shapes; got {0:?} and {1:?}")]
pub struct ShapeError(pub (usize, usize), pub (usize, usize));

impl ShapeError {
    pub(crate) fn check(a: (usize, usize), b: (usize, usize))
        -> Result<(), Self>
    {
        (a == b).then_some(()).ok_or(Self(a, b))
    }
}

/// Returned when an interleaved real/imaginary buffer does not hold exactly
/// `2 * nx * ny` values.
#[derive(Debug, Error)]
#[error("interleaved buffer must hold {0} values; got {1}")]
pub struct BufferError(pub usize, pub usize);

impl BufferError {
    pub(crate) fn check(expected: usize, got: usize) -> Result<(), Self> {
        (expected == got).then_some(()).ok_or(Self(expected, got))
    }
}

/// Returned when domain bounds along an axis are not finite or do not satisfy
/// `min < max`.
#[derive(Debug, Error)]
#[error("domain bounds must be finite with min < max; got [{0}, {1}]")]
pub struct BoundsError(pub f64, pub f64);

impl BoundsError {
    pub(crate) fn check(min: f64, max: f64) -> Result<(), Self> {
        (min.is_finite() && max.is_finite() && min < max)
            .then_some(())
            .ok_or(Self(min, max))
    }
}

/// Returned from grid construction and spectral transforms.
#[derive(Debug, Error)]
pub enum GridError {
    /// [`SizeError`]
    #[error("size error: {0}")]
    Size(#[from] SizeError),

    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    /// [`BufferError`]
    #[error("buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// [`BoundsError`]
    #[error("bounds error: {0}")]
    Bounds(#[from] BoundsError),
}

/// Returned from time-dependent wavefunction solver functions.
#[derive(Debug, Error)]
pub enum TError {
    /// Returned when a non-positive or non-finite time step is encountered.
    #[error("time step must be finite and greater than 0; got {0}")]
    BadTimestep(f64),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

impl TError {
    pub(crate) fn check_timestep(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0)
            .then_some(())
            .ok_or(Self::BadTimestep(dt))
    }
}

/// Returned when loading a [`PropagatorConfig`][crate::config::PropagatorConfig].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a config file cannot be read.
    #[error("unable to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Returned when a config file is not valid TOML for the expected schema.
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Returned when a config cannot be serialized.
    #[error("unable to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
