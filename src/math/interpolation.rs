//! Interpolation steps and grid-cell blending for frame synthesis
//!
//! Frame `k` of `count` sits at `t = k / (count - 1)`. Cells are blended in exact
//! integer arithmetic so that a block whose two endpoints coincide never drifts.

/// Blend two grid coordinates at frame `step` of `count`: `floor(a * t + b * (1 - t))`
///
/// With `t = step / (count - 1)` this is `(a * step + b * (count - 1 - step)) / (count - 1)`.
/// A single frame sits at `t = 0` and yields `b`.
pub const fn blend_cell(a: usize, b: usize, step: usize, count: usize) -> usize {
    let last = count.saturating_sub(1);
    if last == 0 {
        return b;
    }
    let step = if step < last { step } else { last };
    (a * step + b * (last - step)) / last
}

/// Move `current` one unit toward `target`
pub const fn step_toward(current: usize, target: usize) -> usize {
    if current > target {
        current - 1
    } else if current < target {
        current + 1
    } else {
        current
    }
}
