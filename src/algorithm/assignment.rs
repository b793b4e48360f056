//! Minimum-cost perfect matching between filler blocks and skeleton positions
//!
//! Solves the linear sum assignment problem with the shortest augmenting path
//! formulation of the Hungarian method (Jonker-Volgenant style dual potentials).
//! Each filler row is inserted in turn and a Dijkstra-like sweep over the columns
//! finds the cheapest augmenting path under the reduced costs, giving O(n^3) overall.
//!
//! The block count `n` grows as `(height * width) / block_size^2`, so this solve is
//! the dominant cost of the whole pipeline for fine block sizes.

use crate::analysis::cost::CostMatrix;
use crate::io::error::{Result, computation_error};

/// Bijection between filler blocks and skeleton positions
///
/// Stores both directions: `targets[src]` is the skeleton position chosen for filler
/// block `src`, and `sources[dst]` is the filler block placed at skeleton position `dst`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    targets: Vec<usize>,
    sources: Vec<usize>,
}

impl Assignment {
    /// Build an assignment from `targets[src] = dst`
    ///
    /// # Errors
    ///
    /// Returns an error if `targets` is not a permutation of `0..targets.len()`
    pub fn from_targets(targets: Vec<usize>) -> Result<Self> {
        let n = targets.len();
        let mut sources = vec![usize::MAX; n];

        for (src, &dst) in targets.iter().enumerate() {
            match sources.get_mut(dst) {
                Some(slot) if *slot == usize::MAX => *slot = src,
                Some(_) => {
                    return Err(computation_error(
                        "assignment",
                        &format!("skeleton position {dst} assigned twice"),
                    ));
                }
                None => {
                    return Err(computation_error(
                        "assignment",
                        &format!("skeleton position {dst} out of range for {n} blocks"),
                    ));
                }
            }
        }

        Ok(Self { targets, sources })
    }

    /// Every filler block stays where it is
    pub fn identity(n: usize) -> Self {
        Self {
            targets: (0..n).collect(),
            sources: (0..n).collect(),
        }
    }

    /// Number of matched pairs
    pub const fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the assignment is empty
    pub const fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Skeleton positions indexed by filler block
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Filler blocks indexed by skeleton position
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Total placement cost under `matrix`
    pub fn total_cost(&self, matrix: &CostMatrix) -> Option<f64> {
        matrix.total_cost(&self.targets)
    }
}

/// Find the globally cheapest assignment of filler blocks to skeleton positions
///
/// # Errors
///
/// Returns an error if no augmenting path can be found, which only happens when
/// the matrix holds values the potentials cannot order
#[tracing::instrument(skip_all, fields(n = matrix.size()))]
pub fn solve(matrix: &CostMatrix) -> Result<Assignment> {
    let targets = shortest_augmenting_paths(matrix)?;
    let assignment = Assignment::from_targets(targets)?;
    tracing::debug!(
        total_cost = assignment.total_cost(matrix).unwrap_or(f64::NAN),
        "assignment solved"
    );
    Ok(assignment)
}

// Working vectors are sized n + 1 with slot 0 as the virtual root column, and every
// index stored in them is at most n
#[allow(clippy::indexing_slicing)]
fn shortest_augmenting_paths(matrix: &CostMatrix) -> Result<Vec<usize>> {
    let n = matrix.size();
    let costs = matrix.as_array();

    // Dual potentials for rows (u) and columns (v)
    let mut u = vec![0.0_f64; n + 1];
    let mut v = vec![0.0_f64; n + 1];
    // row_of[j]: row currently matched to column j (0 = unmatched)
    let mut row_of = vec![0_usize; n + 1];
    let mut way = vec![0_usize; n + 1];

    for row in 1..=n {
        row_of[0] = row;
        let mut column = 0;
        let mut min_slack = vec![f64::INFINITY; n + 1];
        let mut visited = vec![false; n + 1];

        loop {
            visited[column] = true;
            let current_row = row_of[column];
            let mut delta = f64::INFINITY;
            let mut next_column = 0;

            for j in 1..=n {
                if visited[j] {
                    continue;
                }
                let reduced = costs[(current_row - 1, j - 1)] - u[current_row] - v[j];
                if reduced < min_slack[j] {
                    min_slack[j] = reduced;
                    way[j] = column;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    next_column = j;
                }
            }

            if next_column == 0 {
                return Err(computation_error(
                    "assignment",
                    &format!("no augmenting path for filler block {}", row - 1),
                ));
            }

            for j in 0..=n {
                if visited[j] {
                    u[row_of[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }

            column = next_column;
            if row_of[column] == 0 {
                break;
            }
        }

        // Flip the matching along the augmenting path back to the root
        while column != 0 {
            let previous = way[column];
            row_of[column] = row_of[previous];
            column = previous;
        }
    }

    let mut targets = vec![0; n];
    for j in 1..=n {
        targets[row_of[j] - 1] = j - 1;
    }
    Ok(targets)
}
