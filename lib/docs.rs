//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Split-operator propagation](#split-operator-propagation)
//! - [Frequency ordering](#frequency-ordering)
//! - [Choice of time step](#choice-of-time-step)
//!
//! # Background
//! In units where ħ = *m* = 1, the time-dependent Schrödinger equation for a
//! particle moving in two dimensions under a static potential *U*(*x*, *y*)
//! reads
//! ```text
//!   ∂ψ
//! i -- = H ψ,   H = T + U,   T = (p_x² + p_y²) / 2
//!   ∂t
//! ```
//! with formal solution *ψ*(*t* + *δt*) = exp(-*i* *H* *δt*) *ψ*(*t*). The
//! kinetic operator *T* is diagonal in momentum space while *U* is diagonal in
//! position space, but since the two do not commute, the exponential of their
//! sum cannot be applied in either representation alone.
//!
//! # Split-operator propagation
//! The symmetric (Strang) splitting
//! ```text
//! exp(-i H δt) = exp(-i U δt/2) exp(-i T δt) exp(-i U δt/2) + O(δt³)
//! ```
//! approximates the full propagator using only factors that are diagonal in
//! one of the two representations, with a local error of third order (and
//! hence a global error of second order) in *δt*. Each factor is a pure phase,
//! so the scheme is exactly unitary regardless of the size of the time step.
//!
//! On an *N*<sub>x</sub>×*N*<sub>y</sub> grid with discrete Fourier transform
//! *F*, a single step is then
//! ```text
//! ψ → V · F⁻¹[ K · F[ V · ψ ] ]
//!
//! V[ix, iy] = exp(-i U(x[ix], y[iy]) δt / 2)
//! K[kx, ky] = exp(-i (p_x[kx]² + p_y[ky]²) δt / 2)
//! ```
//! where `·` denotes element-wise multiplication. Here *F* and *F*⁻¹ are taken
//! to be unnormalized, so that *F*⁻¹ *F* = *N*<sub>x</sub>*N*<sub>y</sub>; this
//! factor is divided out during the last multiplication by *V*.
//!
//! Two steps in succession apply exp(-*i* *U* *δt*/2) twice between kinetic
//! factors. These could be fused into a single exp(-*i* *U* *δt*), but doing so
//! means the state between steps is no longer the true wavefunction at a
//! whole-step time, so every step is kept symmetric here.
//!
//! # Frequency ordering
//! For a transform over *N* points spanning a period *L*, the output bins
//! correspond to angular frequencies *ω*<sub>*k*</sub> = 2π*k*/*L* with
//! integer *k*. FFT routines produce these bins in *wrapped* order,
//! ```text
//! k = 0, 1, ..., N - ⌊N/2⌋ - 1, -⌊N/2⌋, ..., -1
//! ```
//! rather than in the ascending *natural* order
//! ```text
//! k = -⌊N/2⌋, ..., -1, 0, 1, ..., N - ⌊N/2⌋ - 1
//! ```
//! that is convenient for display. The two are related by a cyclic rotation by
//! ⌈*N*/2⌉ places. Operators that multiply transformed data (i.e. *K* above)
//! must be laid out in wrapped order; see
//! [`utils::fft_shift`][crate::utils::fft_shift] to convert for display.
//!
//! Note that real-space coordinates are sampled with both endpoints of the
//! domain included, with spacing *L*/(*N* - 1), while the frequency axes treat
//! *L* itself as the transform period.
//!
//! # Choice of time step
//! Although the scheme is unconditionally stable, the kinetic phase
//! *p*<sup>2</sup>*δt*/2 wraps around many times per step at the highest
//! frequencies on the grid if *δt* is large, in which case the high-momentum
//! components of the state are propagated with meaningless phases. A natural
//! upper bound is set by the Nyquist frequency *f*<sub>max</sub> =
//! *N*/(2*L*) along each axis,
//! ```text
//! δt ≤ 1 / max(f_max,x, f_max,y)
//! ```
//! which is available as [`nyquist_dt`][crate::timedep::nyquist_dt].
//! Fixed time steps larger than this bound are accepted, but logged as a
//! warning.
