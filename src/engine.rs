//! The transform engine: table lifecycle plus the submit/wait facade.
//!
//! An engine is constructed for one fixed size, builds its tables once, and
//! amortizes them across every transform it runs. Submissions each get their
//! own worker thread and a clone of the table [`Arc`], so releasing the
//! engine never pulls the tables out from under an in-flight transform; the
//! storage goes away when the last worker drops its clone.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use num_complex::Complex64;
use tracing::{debug, trace};

use crate::error::FftError;
use crate::tables::{FftSize, Tables};
use crate::transform::transform_grid;

/// A 2D FFT engine for one fixed side length.
///
/// The transform is unnormalized with a positive-exponent convention; apply
/// any scaling in the caller.
///
/// ```
/// use gridfft::{Fft2d, FftSize};
/// use num_complex::Complex64;
///
/// let engine = Fft2d::new(FftSize::N16);
/// let mut grid = vec![Complex64::default(); FftSize::N16.samples()];
/// grid[0] = Complex64::new(1.0, 0.0);
///
/// let handle = engine.submit(grid).unwrap();
/// let spectrum = handle.wait();
/// assert!((spectrum[5].norm() - 1.0).abs() < 1e-9);
/// ```
pub struct Fft2d {
    size: FftSize,
    tables: Option<Arc<Tables>>,
}

impl Fft2d {
    /// Build an engine for `size`, precomputing both tables.
    #[must_use]
    pub fn new(size: FftSize) -> Self {
        Self {
            size,
            tables: Some(Arc::new(Tables::build(size))),
        }
    }

    /// Build an engine for a side length given as a plain integer.
    ///
    /// # Errors
    ///
    /// [`FftError::UnsupportedSize`] unless `n` is a power of two in
    /// `16..=512`. Nothing is allocated on failure.
    pub fn with_size(n: usize) -> Result<Self, FftError> {
        Ok(Self::new(FftSize::try_from(n)?))
    }

    /// The side length this engine transforms.
    #[must_use]
    pub fn size(&self) -> FftSize {
        self.size
    }

    /// Whether [`release`](Self::release) has already run.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.tables.is_none()
    }

    /// Transform `grid` in place on the calling thread.
    ///
    /// # Errors
    ///
    /// [`FftError::GridSizeMismatch`] if `grid.len() != N*N` (the grid is
    /// untouched), or [`FftError::Released`] after [`release`](Self::release).
    pub fn transform(&self, grid: &mut [Complex64]) -> Result<(), FftError> {
        let tables = self.tables()?;
        self.check_grid(grid.len())?;
        transform_grid(tables, grid);
        Ok(())
    }

    /// Schedule one full 2D transform of `grid` on a worker thread.
    ///
    /// Takes the grid by value: the buffer belongs to the in-flight
    /// transform until [`TransformHandle::wait`] hands it back, which is
    /// what makes concurrent submissions on distinct buffers safe to run
    /// against one shared engine.
    ///
    /// # Errors
    ///
    /// [`FftError::GridSizeMismatch`], [`FftError::Released`], or
    /// [`FftError::Spawn`] if the worker thread cannot be created. All are
    /// reported here, synchronously; the scheduled work itself cannot fail.
    pub fn submit(&self, mut grid: Vec<Complex64>) -> Result<TransformHandle, FftError> {
        let tables = Arc::clone(self.tables()?);
        self.check_grid(grid.len())?;

        trace!(n = self.size.n(), "submitting 2d transform");
        let worker = thread::Builder::new()
            .name("gridfft-worker".into())
            .spawn(move || {
                transform_grid(&tables, &mut grid);
                grid
            })
            .map_err(FftError::Spawn)?;

        Ok(TransformHandle { worker })
    }

    /// Drop the engine's reference to its tables. Idempotent: the second and
    /// later calls are no-ops. In-flight submissions keep the storage alive
    /// until they finish; new calls fail with [`FftError::Released`].
    pub fn release(&mut self) {
        if self.tables.take().is_some() {
            debug!(n = self.size.n(), "released FFT tables");
        }
    }

    fn tables(&self) -> Result<&Arc<Tables>, FftError> {
        self.tables.as_ref().ok_or(FftError::Released)
    }

    fn check_grid(&self, len: usize) -> Result<(), FftError> {
        let expected = self.size.samples();
        if len == expected {
            Ok(())
        } else {
            Err(FftError::GridSizeMismatch {
                n: self.size.n(),
                expected,
                actual: len,
            })
        }
    }
}

impl Drop for Fft2d {
    fn drop(&mut self) {
        self.release();
    }
}

/// Completion handle for one submitted transform.
#[derive(Debug)]
pub struct TransformHandle {
    worker: JoinHandle<Vec<Complex64>>,
}

impl TransformHandle {
    /// Block until the transform completes and take back the grid, which now
    /// holds the spectrum.
    ///
    /// A panic on the worker thread (impossible for a well-formed
    /// submission) is resumed on the calling thread.
    #[must_use]
    pub fn wait(self) -> Vec<Complex64> {
        match self.worker.join() {
            Ok(grid) => grid,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }

    /// Whether the transform has already completed. `wait` will not block
    /// once this returns `true`.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}
