//! Split-operator propagation of the 2+1-dimensional (time-dependent)
//! Schrödinger equation for a particle in a static, conservative potential.
//!
//! Units are such that ħ = m = 1, i.e. the Hamiltonian is
//! ```text
//! H = (p_x² + p_y²) / 2 + U(x, y)
//! ```
//! See [`docs`][crate::docs#split-operator-propagation] for background.
//!
//! ```
//! use xyspace::{ grid::Domain, timedep::{ self, Packet, SplitStep, TimeStep } };
//!
//! let domain = Domain::square(32, (-5.0, 5.0)).unwrap();
//! let packet = Packet { x_mode: 1.0, ..Packet::default() };
//! let mut prop = SplitStep::new(
//!     domain,
//!     |r2: f64| (-r2).exp(),
//!     packet,
//!     timedep::harmonic,
//!     TimeStep::Fixed(0.01),
//! ).unwrap();
//! let n0 = prop.psi().total_density();
//! for _ in 0..10 { prop.step(); }
//! assert!((prop.time() - 0.1).abs() < 1e-12);
//! assert!((prop.psi().total_density() - n0).abs() < 1e-9 * n0);
//! ```

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    DEF_DT,
    error::{ ShapeError, TError },
    grid::{ ComplexGrid, Domain, GridResult },
    spectral::SpectralGrid2D,
    utils,
};

pub type TResult<T> = Result<T, TError>;

/// A static potential energy landscape `U(x, y)`.
///
/// Implemented for all `Fn(f64, f64) -> f64`.
pub trait Potential {
    /// Evaluate the potential at `(x, y)`.
    fn eval(&self, x: f64, y: f64) -> f64;
}

impl<F> Potential for F
where F: Fn(f64, f64) -> f64
{
    fn eval(&self, x: f64, y: f64) -> f64 { self(x, y) }
}

/// The isotropic harmonic potential `x² + y²`.
pub fn harmonic(x: f64, y: f64) -> f64 { x * x + y * y }

/// Zero potential.
pub fn free(_x: f64, _y: f64) -> f64 { 0.0 }

/// Parameters of the initial wave packet, other than its envelope.
///
/// The packet is centered at `(x_init, -y_init)` with carrier wave
/// `exp(i (x_mode (x - x_init) - y_mode (y + y_init)))`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Packet {
    pub x_mode: f64,
    pub y_mode: f64,
    pub x_init: f64,
    pub y_init: f64,
}

/// Choice of time step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimeStep {
    /// Use the given value.
    Fixed(f64),
    /// Use the sampling-limited bound returned by [`nyquist_dt`].
    Nyquist,
}

impl Default for TimeStep {
    fn default() -> Self { Self::Fixed(DEF_DT) }
}

/// Upper bound on the time step set by the highest frequency representable on
/// `domain`, `1 / max(f_x, f_y)` with `f` the Nyquist frequency along each
/// axis.
pub fn nyquist_dt(domain: &Domain) -> f64 {
    let fx = utils::freq_max(domain.xmin, domain.xmax, domain.nx);
    let fy = utils::freq_max(domain.ymin, domain.ymax, domain.ny);
    fy.max(fx).recip()
}

/// Propagator state for symmetric (Strang) split-operator integration.
///
/// Each [`step`][Self::step] applies
/// ```text
/// ψ → V · F⁻¹[ T · F[ V · ψ ] ] / (nx ny)
/// ```
/// with `V = exp(-i U dt / 2)` sampled in real space and `T = exp(-i p² dt / 2)`
/// sampled over the transform's wrapped frequency bins.
#[derive(Debug)]
pub struct SplitStep {
    domain: Domain,
    fft: SpectralGrid2D,
    psi: ComplexGrid,
    T: ComplexGrid,
    V: ComplexGrid,
    U: nd::Array2<f64>,
    px: nd::Array1<f64>,
    py: nd::Array1<f64>,
    work: ComplexGrid,
    dt: f64,
    t: f64,
    A: f64,
}

impl SplitStep {
    /// Initialize a wave packet with radial envelope `envelope(r²)` and
    /// carrier given by `packet`, to evolve under `potential`.
    pub fn new<F, P>(
        domain: Domain,
        envelope: F,
        packet: Packet,
        potential: P,
        dt: TimeStep,
    ) -> TResult<Self>
    where
        F: Fn(f64) -> f64,
        P: Potential,
    {
        domain.validate()?;
        let bound = nyquist_dt(&domain);
        let dt
            = match dt {
                TimeStep::Fixed(dt) => {
                    TError::check_timestep(dt)?;
                    if dt > bound {
                        log::warn!(
                            "split_step: dt = {dt:.3e} exceeds the sampling \
                            bound {bound:.3e}"
                        );
                    }
                    dt
                },
                TimeStep::Nyquist => bound,
            };
        let Domain { nx, ny, xmin, xmax, ymin, ymax } = domain;
        log::debug!(
            "split_step: {nx}×{ny} grid over [{xmin}, {xmax}]×[{ymin}, {ymax}]; \
            dt = {dt:.3e} (bound {bound:.3e})"
        );

        let fft = SpectralGrid2D::new(nx, ny)?;
        let px = fft.wrapped_omega_x(xmin, xmax);
        let py = fft.wrapped_omega_y(ymin, ymax);
        let U: nd::Array2<f64>
            = nd::Array2::from_shape_fn(
                (ny, nx), |(iy, ix)| potential.eval(domain.x(ix), domain.y(iy)));

        let psi = ComplexGrid::from_fn(nx, ny, |ix, iy| {
            let xq = domain.x(ix) - packet.x_init;
            let yq = domain.y(iy) + packet.y_init;
            let a = envelope(xq * xq + yq * yq);
            let (sx, cx) = (packet.x_mode * xq).sin_cos();
            let (sy, cy) = (-packet.y_mode * yq).sin_cos();
            C64::new(a * (cx * cy - sx * sy), a * (sx * cy + cx * sy))
        })?;
        let T = ComplexGrid::from_fn(nx, ny, |ix, iy| {
            let phase = (px[ix] * px[ix] + py[iy] * py[iy]) * dt / 2.0;
            C64::new(phase.cos(), -phase.sin())
        })?;
        let V = ComplexGrid::from_fn(nx, ny, |ix, iy| {
            let phase = U[[iy, ix]] * dt / 2.0;
            C64::new(phase.cos(), -phase.sin())
        })?;
        let work = ComplexGrid::zeros(nx, ny)?;

        Ok(Self {
            domain,
            fft,
            psi,
            T,
            V,
            U,
            px,
            py,
            work,
            dt,
            t: 0.0,
            A: domain.size() as f64,
        })
    }

    /// Like [`Self::new`], using the [`harmonic`] potential.
    pub fn new_harmonic<F>(
        domain: Domain,
        envelope: F,
        packet: Packet,
        dt: TimeStep,
    ) -> TResult<Self>
    where F: Fn(f64) -> f64
    {
        Self::new(domain, envelope, packet, harmonic, dt)
    }

    /// Advance the state by one time step, returning the step size.
    pub fn step(&mut self) -> f64 {
        self.psi.mul_pointwise(&self.V);
        self.fft.forward_unchecked(&mut self.psi);
        self.psi.mul_pointwise(&self.T);
        self.fft.inverse_unchecked(&mut self.psi);
        self.psi.mul_pointwise_scaled(&self.V, self.A);
        self.t += self.dt;
        log::trace!("split_step: t = {:.6e}", self.t);
        self.dt
    }

    /// Run `frames` rounds of `steps_per_frame` steps each, recording the
    /// state before the first round and after each one.
    ///
    /// Returns the times of the recorded frames and the frames themselves,
    /// the latter with shape `(frames + 1, ny, nx)`.
    pub fn evolve(&mut self, frames: usize, steps_per_frame: usize)
        -> (nd::Array1<f64>, nd::Array3<C64>)
    {
        let (nx, ny) = self.domain.shape();
        let mut t: nd::Array1<f64> = nd::Array1::zeros(frames + 1);
        let mut q: nd::Array3<C64> = nd::Array3::zeros((frames + 1, ny, nx));
        let iter = t.iter_mut().zip(q.axis_iter_mut(nd::Axis(0))).enumerate();
        for (k, (tk, mut qk)) in iter {
            if k > 0 {
                (0..steps_per_frame).for_each(|_| { self.step(); });
                log::debug!("split_step: frame {k}/{frames} at t = {:.3e}", self.t);
            }
            *tk = self.t;
            qk.iter_mut().zip(self.psi.as_slice())
                .for_each(|(qkj, psij)| { *qkj = *psij; });
        }
        (t, q)
    }

    /// Current wavefunction.
    pub fn psi(&self) -> &ComplexGrid { &self.psi }

    /// Replace the current wavefunction.
    pub fn set_psi(&mut self, psi: &ComplexGrid) -> GridResult<()> {
        ShapeError::check(self.psi.shape(), psi.shape())?;
        self.psi.assign(psi)
    }

    /// Kinetic propagator `exp(-i p² dt / 2)` in wrapped frequency order.
    pub fn kinetic_operator(&self) -> &ComplexGrid { &self.T }

    /// Potential half-step propagator `exp(-i U dt / 2)`.
    pub fn potential_operator(&self) -> &ComplexGrid { &self.V }

    /// Potential sampled over the grid, with shape `(ny, nx)`.
    pub fn potential(&self) -> &nd::Array2<f64> { &self.U }

    /// Grid and physical extent.
    pub fn domain(&self) -> &Domain { &self.domain }

    /// Time step.
    pub fn dt(&self) -> f64 { self.dt }

    /// Elapsed time.
    pub fn time(&self) -> f64 { self.t }

    /// Sampling-limited time step bound for this grid; see [`nyquist_dt`].
    pub fn stable_dt(&self) -> f64 { nyquist_dt(&self.domain) }

    /// Total probability `Σ |ψ|² dx dy`.
    pub fn norm(&self) -> f64 {
        self.psi.total_density() * self.domain.dx() * self.domain.dy()
    }

    /// Expectation values `(⟨x⟩, ⟨y⟩)`.
    pub fn center(&self) -> (f64, f64) {
        let nx = self.domain.nx;
        let (mut w, mut sx, mut sy) = (0.0, 0.0, 0.0);
        self.psi.as_slice().chunks_exact(nx).enumerate()
            .for_each(|(iy, row)| {
                let y = self.domain.y(iy);
                row.iter().enumerate()
                    .for_each(|(ix, z)| {
                        let d = z.norm_sqr();
                        w += d;
                        sx += d * self.domain.x(ix);
                        sy += d * y;
                    });
            });
        (sx / w, sy / w)
    }

    /// Expectation value of the Hamiltonian.
    pub fn energy(&mut self) -> f64 {
        let nx = self.domain.nx;
        let w = self.psi.total_density();
        let pot: f64
            = self.psi.as_slice().iter().zip(self.U.iter())
            .map(|(z, u)| u * z.norm_sqr())
            .sum();
        self.work.as_mut_slice().copy_from_slice(self.psi.as_slice());
        self.fft.forward_unchecked(&mut self.work);
        let wk = self.work.total_density();
        let (px, py) = (&self.px, &self.py);
        let kin: f64
            = self.work.as_slice().chunks_exact(nx).enumerate()
            .flat_map(|(iy, row)| {
                let py2 = py[iy] * py[iy];
                row.iter().enumerate()
                    .map(move |(ix, z)| (px[ix] * px[ix] + py2) * z.norm_sqr())
            })
            .sum();
        kin / (2.0 * wk) + pot / w
    }

    /// Momentum-space probability density `|ψ̃|²`, shifted to natural
    /// frequency order so that zero momentum sits at `(⌊nx/2⌋, ⌊ny/2⌋)`.
    ///
    /// Returned with shape `(ny, nx)`; pair with
    /// [`SpectralGrid2D::natural_omega_x`] and
    /// [`SpectralGrid2D::natural_omega_y`] for axes.
    pub fn momentum_density(&mut self) -> nd::Array2<f64> {
        self.work.as_mut_slice().copy_from_slice(self.psi.as_slice());
        self.fft.forward_unchecked(&mut self.work);
        utils::fft_shift2(&self.work).density()
    }

    /// Natural-order angular frequency axes `(p_x, p_y)` matching
    /// [`Self::momentum_density`].
    pub fn momentum_axes(&self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        let Domain { xmin, xmax, ymin, ymax, .. } = self.domain;
        (
            self.fft.natural_omega_x(xmin, xmax),
            self.fft.natural_omega_y(ymin, ymax),
        )
    }
}
