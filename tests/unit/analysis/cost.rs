//! Tests for block means and cost matrix construction

#[cfg(test)]
mod tests {
    use ndarray::array;
    use pixelshuffle::analysis::cost::{CostMatrix, block_means, color_distance};
    use pixelshuffle::spatial::buffer::PixelBuffer;
    use pixelshuffle::spatial::grid::BlockGrid;

    fn quadrants(colors: [[u8; 3]; 4]) -> PixelBuffer {
        PixelBuffer::from_fn(4, 4, |row, col| {
            let quadrant = (row / 2) * 2 + col / 2;
            colors.get(quadrant).copied().unwrap_or([0, 0, 0])
        })
    }

    fn grid_2x2() -> BlockGrid {
        let Ok(grid) = BlockGrid::new(4, 4, 2) else {
            unreachable!("2 pixel blocks fit a 4x4 image");
        };
        grid
    }

    // Tests block means average every pixel of the block
    // Verified by averaging only the first pixel row
    #[test]
    fn test_block_means_average_pixels() {
        let buffer = PixelBuffer::from_fn(2, 2, |row, col| [(row * 2 + col) as u8 * 10, 0, 100]);
        let Ok(grid) = BlockGrid::new(2, 2, 2) else {
            unreachable!("2 pixel block fits a 2x2 image");
        };

        let Ok(means) = block_means(&grid, &buffer) else {
            unreachable!("grid fits the buffer");
        };
        assert_eq!(means.len(), 1);
        assert!(means.first().is_some_and(|m| (m[0] - 15.0).abs() < 1e-9));
        assert!(means.first().is_some_and(|m| (m[2] - 100.0).abs() < 1e-9));
    }

    // Tests color distance is the Euclidean norm in RGB space
    // Verified by using Manhattan distance
    #[test]
    fn test_color_distance_is_euclidean() {
        let d = color_distance(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    // Tests identical images produce a zero diagonal
    // Verified by offsetting skeleton means
    #[test]
    fn test_identical_images_zero_diagonal() {
        let image = quadrants([[255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]]);
        let Ok(matrix) = CostMatrix::build(&grid_2x2(), &image, &image) else {
            unreachable!("identical buffers are compatible");
        };

        assert_eq!(matrix.size(), 4);
        for i in 0..4 {
            assert_eq!(matrix.cost(i, i), Some(0.0));
        }
        assert!(matrix.cost(0, 1).is_some_and(|c| c > 0.0));
    }

    // Tests rows index filler blocks and columns index skeleton positions
    // Verified by transposing the matrix fill
    #[test]
    fn test_matrix_orientation() {
        let filler = quadrants([[0, 0, 0], [0, 0, 0], [0, 0, 0], [30, 40, 0]]);
        let skeleton = quadrants([[0, 0, 0], [255, 255, 255], [255, 255, 255], [255, 255, 255]]);
        let Ok(matrix) = CostMatrix::build(&grid_2x2(), &filler, &skeleton) else {
            unreachable!("equal buffers are compatible");
        };

        // filler block 3 (30, 40, 0) against skeleton position 0 (black)
        assert!(matrix.cost(3, 0).is_some_and(|c| (c - 50.0).abs() < 1e-9));
        // filler block 0 (black) against skeleton position 0 (black)
        assert_eq!(matrix.cost(0, 0), Some(0.0));
    }

    // Tests mismatched buffer sizes raise a configuration error
    // Verified by removing the dimension check in build
    #[test]
    fn test_dimension_mismatch_rejected() {
        let filler = PixelBuffer::blank(4, 6);
        let skeleton = PixelBuffer::blank(4, 4);
        let result = CostMatrix::build(&grid_2x2(), &filler, &skeleton);
        assert!(result.is_err_and(|e| e.is_configuration()));
    }

    // Tests arbitrary matrices must be square, finite and nonnegative
    // Verified by skipping validation in from_array
    #[test]
    fn test_from_array_validation() {
        assert!(CostMatrix::from_array(array![[1.0, 2.0], [3.0, 4.0]]).is_ok());
        assert!(CostMatrix::from_array(array![[1.0, 2.0, 3.0], [3.0, 4.0, 5.0]]).is_err());
        assert!(CostMatrix::from_array(array![[1.0, f64::NAN], [3.0, 4.0]]).is_err());
        assert!(CostMatrix::from_array(array![[1.0, -2.0], [3.0, 4.0]]).is_err());
    }

    // Tests total cost sums the selected cells
    // Verified by summing the diagonal regardless of targets
    #[test]
    fn test_total_cost() {
        let Ok(matrix) = CostMatrix::from_array(array![[1.0, 2.0], [3.0, 4.0]]) else {
            unreachable!("square matrix");
        };
        assert_eq!(matrix.total_cost(&[1, 0]), Some(5.0));
        assert_eq!(matrix.total_cost(&[0, 1]), Some(5.0));
        assert_eq!(matrix.total_cost(&[0, 2]), None);
    }
}
