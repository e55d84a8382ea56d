//! Precomputed lookup tables for the iterative decimation-in-time FFT.
//!
//! One [`Tables`] value holds everything the butterfly kernel reads: the
//! bit-reversal permutation applied before the first stage, and one row of
//! twiddle factors per stage. Both are computed once at engine construction
//! and are immutable afterwards, so any number of concurrently running
//! transforms of the same size may share them.

use std::f64::consts::TAU;

use num_complex::Complex64;
use tracing::debug;

use crate::error::FftError;

/// The supported transform side lengths: powers of two from 16 to 512.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum FftSize {
    /// 16×16 grid
    N16 = 16,
    /// 32×32 grid
    N32 = 32,
    /// 64×64 grid
    N64 = 64,
    /// 128×128 grid
    N128 = 128,
    /// 256×256 grid
    N256 = 256,
    /// 512×512 grid
    N512 = 512,
}

impl FftSize {
    /// Every supported size, smallest first.
    pub const ALL: [FftSize; 6] = [
        FftSize::N16,
        FftSize::N32,
        FftSize::N64,
        FftSize::N128,
        FftSize::N256,
        FftSize::N512,
    ];

    /// Side length of the grid.
    #[must_use]
    pub const fn n(self) -> usize {
        self as usize
    }

    /// Number of butterfly stages, `log2(N)`.
    #[must_use]
    pub const fn log2n(self) -> u32 {
        (self as usize).trailing_zeros()
    }

    /// Number of complex samples in one grid, `N * N`.
    #[must_use]
    pub const fn samples(self) -> usize {
        self.n() * self.n()
    }
}

impl TryFrom<usize> for FftSize {
    type Error = FftError;

    fn try_from(n: usize) -> Result<Self, FftError> {
        match n {
            16 => Ok(FftSize::N16),
            32 => Ok(FftSize::N32),
            64 => Ok(FftSize::N64),
            128 => Ok(FftSize::N128),
            256 => Ok(FftSize::N256),
            512 => Ok(FftSize::N512),
            other => Err(FftError::UnsupportedSize(other)),
        }
    }
}

/// The shared read-only table set for one transform size.
///
/// The twiddle rows use a compact jagged layout: stage `s` (zero-based) holds
/// exactly `2^s` entries `exp(i·2π·j / 2^(s+1))`, which is every entry the
/// stage can address. Stage 0 is the trivial row `[1]`.
pub(crate) struct Tables {
    /// Side length `N`.
    pub n: usize,
    /// `reversed[i]` is `i` with its low `log2(N)` bits reversed.
    pub reversed: Vec<u32>,
    /// One row per stage; row `s` has `2^s` entries.
    pub stage_twiddles: Vec<Vec<Complex64>>,
}

impl Tables {
    /// Build both tables for `size`. Deterministic; a pure function of the
    /// size, with no side effects beyond the two allocations.
    pub fn build(size: FftSize) -> Self {
        let n = size.n();
        let log2n = size.log2n();

        let reversed = (0..n as u32).map(|i| reverse_bits(i, log2n)).collect();

        let mut stage_twiddles = Vec::with_capacity(log2n as usize);
        for stage in 0..log2n {
            let half = 1usize << stage;
            let chunk = half << 1;
            let angle_mult = TAU / chunk as f64;

            let row = (0..half)
                .map(|j| Complex64::cis(angle_mult * j as f64))
                .collect();
            stage_twiddles.push(row);
        }

        debug!(n, stages = log2n, "precomputed FFT tables");

        Self {
            n,
            reversed,
            stage_twiddles,
        }
    }
}

/// Reverse the low `bits` bits of `i`, shifting them in one at a time.
fn reverse_bits(mut i: u32, bits: u32) -> u32 {
    let mut ri = 0;
    for _ in 0..bits {
        ri = (ri << 1) | (i & 1);
        i >>= 1;
    }
    ri
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_1_SQRT_2;

    use super::*;
    use crate::test_helpers::assert_float_closeness;

    #[test]
    fn reversal_is_a_self_inverse_permutation() {
        for size in FftSize::ALL {
            let tables = Tables::build(size);
            let n = size.n();

            let mut seen = vec![false; n];
            for &r in &tables.reversed {
                assert!((r as usize) < n);
                assert!(!seen[r as usize], "index {r} appears twice");
                seen[r as usize] = true;
            }

            for i in 0..n {
                let r = tables.reversed[i] as usize;
                assert_eq!(tables.reversed[r] as usize, i);
            }
        }
    }

    #[test]
    fn twiddles_have_unit_modulus() {
        for size in FftSize::ALL {
            let tables = Tables::build(size);
            assert_eq!(tables.stage_twiddles.len(), size.log2n() as usize);

            for (stage, row) in tables.stage_twiddles.iter().enumerate() {
                assert_eq!(row.len(), 1 << stage);
                for w in row {
                    assert_float_closeness(w.norm(), 1.0, 1e-12);
                }
            }
        }
    }

    #[test]
    fn small_stage_twiddle_values() {
        let tables = Tables::build(FftSize::N16);

        // Stage 0: the trivial root.
        assert_float_closeness(tables.stage_twiddles[0][0].re, 1.0, 1e-12);
        assert_float_closeness(tables.stage_twiddles[0][0].im, 0.0, 1e-12);

        // Stage 1: exp(i*pi*j/2) for j in 0..2.
        assert_float_closeness(tables.stage_twiddles[1][1].re, 0.0, 1e-12);
        assert_float_closeness(tables.stage_twiddles[1][1].im, 1.0, 1e-12);

        // Stage 2: exp(i*pi/4) at j = 1.
        assert_float_closeness(tables.stage_twiddles[2][1].re, FRAC_1_SQRT_2, 1e-12);
        assert_float_closeness(tables.stage_twiddles[2][1].im, FRAC_1_SQRT_2, 1e-12);
    }

    #[test]
    fn rejects_unsupported_sizes() {
        for n in [0, 1, 8, 17, 100, 1024] {
            assert!(FftSize::try_from(n).is_err(), "size {n} should be rejected");
        }
        for size in FftSize::ALL {
            assert_eq!(FftSize::try_from(size.n()).unwrap(), size);
        }
    }
}
