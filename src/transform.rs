//! The 1D butterfly kernel and the separable 2D driver.
//!
//! One lane is the `N` samples at `offset, offset + stride, ...,
//! offset + (N-1)·stride` inside the flattened grid. A lane transform gathers
//! those samples into scratch in bit-reversed order, runs `log2(N)` radix-2
//! butterfly stages, and scatters the result back to the same positions. The
//! 2D driver runs one lane per row (`stride = 1`) and then one lane per
//! column (`stride = N`), in place.
//!
//! Each stage reads both halves of every butterfly pair before writing
//! either, so the stages ping-pong between two scratch buffers instead of
//! updating in place.

use std::mem;

use num_complex::Complex64;

use crate::tables::Tables;

/// Ping-pong scratch for one lane, allocated once per 2D transform and
/// reused across all `2N` lane invocations.
struct Scratch {
    prev: Vec<Complex64>,
    cur: Vec<Complex64>,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            prev: vec![Complex64::default(); n],
            cur: vec![Complex64::default(); n],
        }
    }
}

/// Apply one complete iterative FFT to the lane at `stride`/`offset`.
///
/// Bounds are the 2D driver's responsibility; only debug builds re-check
/// that the last addressed sample is inside the grid.
fn transform_lane(
    tables: &Tables,
    grid: &mut [Complex64],
    stride: usize,
    offset: usize,
    scratch: &mut Scratch,
) {
    let n = tables.n;
    debug_assert!(offset + (n - 1) * stride < grid.len());

    // Gather in bit-reversed order so the stages produce natural order.
    for (slot, &r) in scratch.prev.iter_mut().zip(&tables.reversed) {
        *slot = grid[r as usize * stride + offset];
    }

    for row in &tables.stage_twiddles {
        let half = row.len();
        let size = half << 1;

        for group in (0..n).step_by(size) {
            for (k, &w) in row.iter().enumerate() {
                let even = scratch.prev[group + k];
                let odd = scratch.prev[group + half + k] * w;
                scratch.cur[group + k] = even + odd;
                scratch.cur[group + half + k] = even - odd;
            }
        }

        mem::swap(&mut scratch.prev, &mut scratch.cur);
    }

    // The last swap leaves the final stage's output in `prev`.
    for (i, z) in scratch.prev.iter().enumerate() {
        grid[i * stride + offset] = *z;
    }
}

/// Full separable 2D FFT: every row, then every column, in place.
///
/// Row-then-column order is fixed. The two passes touch disjoint lanes
/// within themselves, and the column pass consumes the row pass's output.
#[multiversion::multiversion(targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2",   // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
))]
pub(crate) fn transform_grid(tables: &Tables, grid: &mut [Complex64]) {
    let n = tables.n;
    debug_assert_eq!(grid.len(), n * n);

    let mut scratch = Scratch::new(n);

    for r in 0..n {
        transform_lane(tables, grid, 1, r * n, &mut scratch);
    }
    for c in 0..n {
        transform_lane(tables, grid, n, c, &mut scratch);
    }
}
