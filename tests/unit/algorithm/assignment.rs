//! Tests for assignment validity and optimality against brute force

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use pixelshuffle::algorithm::assignment::{Assignment, solve};
    use pixelshuffle::analysis::cost::CostMatrix;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_matrix(rng: &mut StdRng, n: usize) -> CostMatrix {
        let costs = Array2::from_shape_fn((n, n), |_| rng.random_range(0.0..100.0));
        let Ok(matrix) = CostMatrix::from_array(costs) else {
            unreachable!("random costs are nonnegative and finite");
        };
        matrix
    }

    fn is_permutation(targets: &[usize]) -> bool {
        let mut seen = vec![false; targets.len()];
        targets.iter().all(|&t| {
            seen.get_mut(t)
                .is_some_and(|slot| !std::mem::replace(slot, true))
        })
    }

    // Heap's algorithm over all permutations of 0..n
    fn brute_force_minimum(matrix: &CostMatrix) -> f64 {
        let n = matrix.size();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut counters = vec![0usize; n];
        let mut best = matrix.total_cost(&perm).unwrap_or(f64::INFINITY);

        let mut i = 0;
        while i < n {
            let counter = counters.get(i).copied().unwrap_or(0);
            if counter < i {
                if i % 2 == 0 {
                    perm.swap(0, i);
                } else {
                    perm.swap(counter, i);
                }
                best = best.min(matrix.total_cost(&perm).unwrap_or(f64::INFINITY));
                if let Some(c) = counters.get_mut(i) {
                    *c += 1;
                }
                i = 0;
            } else {
                if let Some(c) = counters.get_mut(i) {
                    *c = 0;
                }
                i += 1;
            }
        }
        best
    }

    // Tests solver output is a permutation matching brute force for every n up to 6
    // Verified by returning a greedy row-minimum assignment
    #[test]
    fn test_solve_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=6 {
            for _ in 0..20 {
                let matrix = random_matrix(&mut rng, n);
                let Ok(assignment) = solve(&matrix) else {
                    unreachable!("well-formed matrices always solve");
                };

                assert_eq!(assignment.len(), n);
                assert!(is_permutation(assignment.targets()));

                let solved = assignment.total_cost(&matrix).unwrap_or(f64::INFINITY);
                let best = brute_force_minimum(&matrix);
                assert!(
                    (solved - best).abs() < 1e-9,
                    "n={n}: solver cost {solved} but optimum is {best}"
                );
            }
        }
    }

    // Tests greedy choices are not taken when they block a cheaper global matching
    // Verified by accepting the first row's minimum unconditionally
    #[test]
    fn test_solve_beats_greedy() {
        let Ok(matrix) = CostMatrix::from_array(array![[1.0, 2.0], [1.0, 100.0]]) else {
            unreachable!("square matrix");
        };
        let Ok(assignment) = solve(&matrix) else {
            unreachable!("well-formed matrix");
        };
        assert_eq!(assignment.targets(), &[1, 0]);
        assert_eq!(assignment.total_cost(&matrix), Some(3.0));
    }

    // Tests a zero-diagonal matrix yields a zero-cost optimum
    // Verified by offsetting the potentials initialization
    #[test]
    fn test_zero_diagonal_has_zero_cost() {
        let costs = Array2::from_shape_fn((5, 5), |(i, j)| i.abs_diff(j) as f64);
        let Ok(matrix) = CostMatrix::from_array(costs) else {
            unreachable!("square matrix");
        };
        let Ok(assignment) = solve(&matrix) else {
            unreachable!("well-formed matrix");
        };
        assert_eq!(assignment, Assignment::identity(5));
        assert_eq!(assignment.total_cost(&matrix), Some(0.0));
    }

    // Tests an empty matrix solves to an empty assignment
    // Verified by starting the row loop at zero
    #[test]
    fn test_empty_matrix() {
        let Ok(matrix) = CostMatrix::from_array(Array2::zeros((0, 0))) else {
            unreachable!("empty square matrix");
        };
        let result = solve(&matrix);
        assert!(result.is_ok_and(|a| a.is_empty()));
    }

    // Tests the inverse view maps skeleton positions back to filler blocks
    // Verified by copying targets into sources
    #[test]
    fn test_inverse_mapping() {
        let Ok(assignment) = Assignment::from_targets(vec![2, 0, 1]) else {
            unreachable!("valid permutation");
        };
        assert_eq!(assignment.targets(), &[2, 0, 1]);
        assert_eq!(assignment.sources(), &[1, 2, 0]);
        for (src, &dst) in assignment.targets().iter().enumerate() {
            assert_eq!(assignment.sources().get(dst), Some(&src));
        }
    }

    // Tests non-permutations are rejected as computation errors
    // Verified by removing the duplicate check
    #[test]
    fn test_from_targets_rejects_non_permutations() {
        let duplicate = Assignment::from_targets(vec![0, 0, 1]);
        assert!(duplicate.is_err_and(|e| !e.is_configuration()));

        let out_of_range = Assignment::from_targets(vec![0, 3, 1]);
        assert!(out_of_range.is_err());
    }
}
