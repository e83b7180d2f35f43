#![allow(non_snake_case)]

//! Provides functions and higher-level constructs for the solution of the
//! two-dimensional, time-dependent Schrödinger equation via the
//! pseudo-spectral split-step operator method on a uniform, periodic grid.
//!
//! Provides implementations for the following:
//! - Two-dimensional complex FFTs with precomputed plans and wrapped/natural
//!   frequency axes ([`spectral`])
//! - Symmetric (Strang) split-operator time stepping for wave packets in
//!   arbitrary static potentials ([`timedep`])
//! - TOML-backed configuration of propagator runs ([`config`])
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod grid;
pub mod utils;
pub mod spectral;
pub mod timedep;
pub mod config;

pub mod docs;

/// Default time step.
pub const DEF_DT: f64 = 1e-3;
