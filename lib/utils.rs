//! Frequency-axis tools and index reordering.

use std::f64::consts::TAU;
use ndarray::{ self as nd, Ix1, concatenate };
use crate::grid::ComplexGrid;

// number of non-negative frequency bins in an `n`-point FFT; this is also the
// shift between wrapped and natural orderings
fn n_nonneg(n: usize) -> usize { n - n / 2 }

/// Generate the angular frequencies accompanying an `n`-point FFT over a
/// period `max - min`, in natural (ascending) order.
///
/// The integer frequency index runs over `-⌊n/2⌋, ..., n - ⌊n/2⌋ - 1`.
pub fn omega_natural(n: usize, min: f64, max: f64) -> nd::Array1<f64> {
    let dw = TAU / (max - min);
    let h = (n / 2) as isize;
    (-h..n as isize - h)
        .map(|k| k as f64 * dw)
        .collect()
}

/// Generate the angular frequencies accompanying an `n`-point FFT over a
/// period `max - min`, in the order FFT bins are produced: zero, then the
/// positive frequencies in ascending order, then the negative frequencies in
/// ascending order.
pub fn omega_wrapped(n: usize, min: f64, max: f64) -> nd::Array1<f64> {
    let dw = TAU / (max - min);
    let h = n / 2;
    let wp: nd::Array1<f64>
        = (0..n_nonneg(n))
        .map(|k| k as f64 * dw)
        .collect();
    let wm: nd::Array1<f64>
        = (1..h + 1).rev()
        .map(|k| -(k as f64) * dw)
        .collect();
    concatenate!(nd::Axis(0), wp, wm)
}

/// Highest frequency (cycles per unit length) representable by `n` samples
/// over `[min, max]`, i.e. the Nyquist frequency `1 / (2 δ)` with
/// `δ = (max - min) / n`.
pub fn freq_max(min: f64, max: f64, n: usize) -> f64 {
    let delta = (max - min) / n as f64;
    0.5 / delta
}

/// Lowest non-zero frequency (cycles per unit length) representable over
/// `[min, max]`.
pub fn freq_min(min: f64, max: f64, _n: usize) -> f64 {
    (max - min).recip()
}

/// Return a copy of `x` with indices shifted to map wrapped-order FFT bins to
/// natural order.
pub fn fft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (p, m) = x.view().split_at(nd::Axis(0), n_nonneg(n));
    concatenate!(nd::Axis(0), m.into_owned(), p.into_owned())
}

/// Inverse of [`fft_shift`].
pub fn ifft_shift<S, A>(x: &nd::ArrayBase<S, Ix1>) -> nd::Array1<A>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = x.len();
    let (m, p) = x.view().split_at(nd::Axis(0), n / 2);
    concatenate!(nd::Axis(0), p.into_owned(), m.into_owned())
}

/// Return a copy of a grid with both axes shifted from wrapped to natural
/// order, so that zero frequency sits at `(⌊nx/2⌋, ⌊ny/2⌋)`.
pub fn fft_shift2(q: &ComplexGrid) -> ComplexGrid {
    let (nx, ny) = q.shape();
    let (sx, sy) = (n_nonneg(nx), n_nonneg(ny));
    let mut shifted = q.clone();
    let src = q.as_slice();
    shifted.as_mut_slice().chunks_exact_mut(nx).enumerate()
        .for_each(|(iy, row)| {
            let jy = (iy + sy) % ny;
            row.iter_mut().enumerate()
                .for_each(|(ix, z)| { *z = src[jy * nx + (ix + sx) % nx]; });
        });
    shifted
}
