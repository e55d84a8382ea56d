//! Error types for engine construction and submission.

use thiserror::Error;

/// Failures detected synchronously at construction or submission time.
///
/// The transform itself is a deterministic pure computation over a fixed
/// buffer, so nothing here is transient and no failure is ever deferred into
/// a scheduled unit of work.
#[derive(Debug, Error)]
pub enum FftError {
    /// Construction was requested with a size outside the supported set of
    /// powers of two.
    #[error("unsupported FFT size {0}: expected a power of two in 16..=512")]
    UnsupportedSize(usize),

    /// The grid buffer does not hold exactly N*N complex samples.
    #[error("grid holds {actual} samples but a {n}x{n} transform needs {expected}")]
    GridSizeMismatch {
        /// Side length of the transform.
        n: usize,
        /// `n * n`.
        expected: usize,
        /// Length of the buffer that was handed in.
        actual: usize,
    },

    /// The engine's tables were already released; submitting is a
    /// programming error and fails fast rather than touching freed storage.
    #[error("engine tables already released")]
    Released,

    /// The OS refused to create the worker thread for a submission.
    #[error("failed to spawn transform worker")]
    Spawn(#[source] std::io::Error),
}
