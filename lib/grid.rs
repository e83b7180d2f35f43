//! Storage for complex-valued fields sampled over a uniform, two-dimensional
//! grid, along with the physical domain the grid covers.
//!
//! Grids are stored in row-major order: the element at `(ix, iy)` lives at
//! flat index `iy * nx + ix`, so that each row of constant `y` is contiguous.
//! When exported as a flat array of `f64`s, real and imaginary parts are
//! interleaved, placing the real part of `(ix, iy)` at offset
//! `2 * (iy * nx + ix)` and the imaginary part immediately after.
//!
//! ```
//! use num_complex::Complex64 as C64;
//! use xyspace::grid::ComplexGrid;
//!
//! let mut g = ComplexGrid::zeros(3, 2).unwrap();
//! g.set(2, 1, C64::new(1.0, -1.0));
//! let buf = g.to_interleaved();
//! assert_eq!(buf.len(), 12);
//! assert_eq!(&buf[10..], &[1.0, -1.0]);
//! ```

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::error::{
    BoundsError,
    BufferError,
    GridError,
    ShapeError,
    SizeError,
};

pub type GridResult<T> = Result<T, GridError>;

/// A fixed-size `nx`×`ny` array of complex numbers in row-major order.
///
/// The shape is set at construction and never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexGrid {
    nx: usize,
    ny: usize,
    data: Vec<C64>,
}

impl ComplexGrid {
    /// Create a new grid of zeros.
    pub fn zeros(nx: usize, ny: usize) -> GridResult<Self> {
        SizeError::check(nx, ny)?;
        Ok(Self { nx, ny, data: vec![C64::zero(); nx * ny] })
    }

    /// Create a new grid by evaluating `f(ix, iy)` at every index.
    pub fn from_fn<F>(nx: usize, ny: usize, mut f: F) -> GridResult<Self>
    where F: FnMut(usize, usize) -> C64
    {
        SizeError::check(nx, ny)?;
        let data: Vec<C64>
            = (0..ny)
            .flat_map(|iy| (0..nx).map(move |ix| (ix, iy)))
            .map(|(ix, iy)| f(ix, iy))
            .collect();
        Ok(Self { nx, ny, data })
    }

    /// Create a new grid from a flat buffer of interleaved real and imaginary
    /// parts.
    ///
    /// The buffer must hold exactly `2 * nx * ny` values.
    pub fn from_interleaved(nx: usize, ny: usize, buf: &[f64])
        -> GridResult<Self>
    {
        SizeError::check(nx, ny)?;
        BufferError::check(2 * nx * ny, buf.len())?;
        let data: Vec<C64>
            = buf.chunks_exact(2)
            .map(|reim| C64::new(reim[0], reim[1]))
            .collect();
        Ok(Self { nx, ny, data })
    }

    /// Number of points along x.
    pub fn nx(&self) -> usize { self.nx }

    /// Number of points along y.
    pub fn ny(&self) -> usize { self.ny }

    /// `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) { (self.nx, self.ny) }

    /// Total number of points, `nx * ny`.
    pub fn len(&self) -> usize { self.data.len() }

    /// Always `false`; grids hold at least one point.
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Flat index of `(ix, iy)`.
    pub fn index(&self, ix: usize, iy: usize) -> usize { iy * self.nx + ix }

    /// Return the value at `(ix, iy)`.
    ///
    /// *Panics if either index is out of bounds*.
    pub fn get(&self, ix: usize, iy: usize) -> C64 {
        assert!(ix < self.nx && iy < self.ny, "grid index out of bounds");
        self.data[self.index(ix, iy)]
    }

    /// Set the value at `(ix, iy)`.
    ///
    /// *Panics if either index is out of bounds*.
    pub fn set(&mut self, ix: usize, iy: usize, val: C64) {
        assert!(ix < self.nx && iy < self.ny, "grid index out of bounds");
        let k = self.index(ix, iy);
        self.data[k] = val;
    }

    /// View the row-major storage.
    pub fn as_slice(&self) -> &[C64] { &self.data }

    /// Mutably view the row-major storage.
    pub fn as_mut_slice(&mut self) -> &mut [C64] { &mut self.data }

    /// Copy into a new array of shape `(ny, nx)`, indexed as `[[iy, ix]]`.
    pub fn to_array(&self) -> nd::Array2<C64> {
        nd::Array2::from_shape_fn(
            (self.ny, self.nx), |(iy, ix)| self.data[iy * self.nx + ix])
    }

    /// Return the contents as interleaved real and imaginary parts.
    pub fn to_interleaved(&self) -> Vec<f64> {
        self.data.iter().flat_map(|z| [z.re, z.im]).collect()
    }

    /// Write the contents into a caller-supplied buffer as interleaved real
    /// and imaginary parts.
    pub fn write_interleaved(&self, out: &mut [f64]) -> GridResult<()> {
        BufferError::check(2 * self.len(), out.len())?;
        out.chunks_exact_mut(2).zip(&self.data)
            .for_each(|(reim, z)| { reim[0] = z.re; reim[1] = z.im; });
        Ok(())
    }

    /// Replace the contents with those of `other`.
    pub fn assign(&mut self, other: &Self) -> GridResult<()> {
        ShapeError::check(self.shape(), other.shape())?;
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Multiply in place, element-wise, by the operator grid `op`.
    ///
    /// With `op = a + ib` and `self = c + id`, each element becomes
    /// `(ac - bd) + i(ad + bc)`.
    pub(crate) fn mul_pointwise(&mut self, op: &Self) {
        debug_assert_eq!(self.shape(), op.shape());
        self.data.iter_mut().zip(&op.data)
            .for_each(|(q, a)| { *q = a * *q; });
    }

    /// Like [`Self::mul_pointwise`], but also divide each result by `scale`
    /// in the same pass.
    pub(crate) fn mul_pointwise_scaled(&mut self, op: &Self, scale: f64) {
        debug_assert_eq!(self.shape(), op.shape());
        self.data.iter_mut().zip(&op.data)
            .for_each(|(q, a)| { *q = (a * *q) / scale; });
    }

    /// Compute `|ψ|²` at every point, as an array of shape `(ny, nx)`.
    pub fn density(&self) -> nd::Array2<f64> {
        nd::Array2::from_shape_fn(
            (self.ny, self.nx), |(iy, ix)| self.data[iy * self.nx + ix].norm_sqr())
    }

    /// Compute the sum of `|ψ|²` over all points.
    pub fn total_density(&self) -> f64 {
        self.data.iter().map(|z| z.norm_sqr()).sum()
    }
}

/// Physical extent and resolution of a grid.
///
/// Real-space coordinates are sampled with both endpoints included, i.e.
/// `x[ix] = xmin + ix * dx` with `dx = (xmax - xmin) / (nx - 1)`, while
/// frequency axes treat `xmax - xmin` as the period of the transform. A grid
/// with a single point along an axis has zero spacing along it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Domain {
    pub nx: usize,
    pub ny: usize,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Domain {
    /// Create a new domain, checking grid size and bounds.
    pub fn new(
        nx: usize,
        ny: usize,
        (xmin, xmax): (f64, f64),
        (ymin, ymax): (f64, f64),
    ) -> GridResult<Self>
    {
        SizeError::check(nx, ny)?;
        BoundsError::check(xmin, xmax)?;
        BoundsError::check(ymin, ymax)?;
        Ok(Self { nx, ny, xmin, xmax, ymin, ymax })
    }

    /// Domain of side `[min, max]` along both axes with `n`×`n` points.
    pub fn square(n: usize, (min, max): (f64, f64)) -> GridResult<Self> {
        Self::new(n, n, (min, max), (min, max))
    }

    pub(crate) fn validate(&self) -> GridResult<()> {
        SizeError::check(self.nx, self.ny)?;
        BoundsError::check(self.xmin, self.xmax)?;
        BoundsError::check(self.ymin, self.ymax)?;
        Ok(())
    }

    /// `(nx, ny)`.
    pub fn shape(&self) -> (usize, usize) { (self.nx, self.ny) }

    /// Total number of points, `nx * ny`.
    pub fn size(&self) -> usize { self.nx * self.ny }

    /// Grid spacing along x.
    pub fn dx(&self) -> f64 { spacing(self.xmin, self.xmax, self.nx) }

    /// Grid spacing along y.
    pub fn dy(&self) -> f64 { spacing(self.ymin, self.ymax, self.ny) }

    /// x-coordinate of column `ix`.
    pub fn x(&self, ix: usize) -> f64 { self.xmin + ix as f64 * self.dx() }

    /// y-coordinate of row `iy`.
    pub fn y(&self, iy: usize) -> f64 { self.ymin + iy as f64 * self.dy() }

    /// All x-coordinates.
    pub fn x_coords(&self) -> nd::Array1<f64> {
        (0..self.nx).map(|ix| self.x(ix)).collect()
    }

    /// All y-coordinates.
    pub fn y_coords(&self) -> nd::Array1<f64> {
        (0..self.ny).map(|iy| self.y(iy)).collect()
    }
}

fn spacing(min: f64, max: f64, n: usize) -> f64 {
    if n > 1 { (max - min) / (n - 1) as f64 } else { 0.0 }
}
