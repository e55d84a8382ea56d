//! A 2D Fast Fourier Transform engine for square power-of-two grids.
//!
//! The transform is the iterative decimation-in-time Cooley-Tukey algorithm,
//! run separably: `N` 1D transforms along the rows, then `N` along the
//! columns, in place over one flattened row-major buffer of `N*N` complex
//! samples. The bit-reversal permutation and the per-stage twiddle factors
//! are precomputed once per [`Fft2d`] engine and shared read-only across
//! every transform that engine runs, which amortizes construction across
//! repeated, fixed-size use.
//!
//! A transform can run synchronously with [`Fft2d::transform`] or be
//! scheduled with [`Fft2d::submit`], which returns a [`TransformHandle`] to
//! wait on. The output is unnormalized, with a positive exponent in the
//! twiddle factors; scaling and direction bookkeeping belong to the caller.

mod engine;
mod error;
mod tables;
mod transform;

pub use engine::{Fft2d, TransformHandle};
pub use error::FftError;
pub use tables::FftSize;
