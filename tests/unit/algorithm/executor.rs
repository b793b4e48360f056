//! Tests for pipeline configuration validation and stage orchestration

#[cfg(test)]
mod tests {
    use pixelshuffle::ShuffleError;
    use pixelshuffle::algorithm::executor::{Pipeline, ShuffleConfig};
    use pixelshuffle::algorithm::synthesis::MotionPolicy;
    use pixelshuffle::io::configuration::{DEFAULT_INTERPOLATION_STEPS, DEFAULT_PRECISION};
    use pixelshuffle::spatial::buffer::PixelBuffer;

    fn config(precision: usize, policy: MotionPolicy, steps: usize) -> ShuffleConfig {
        ShuffleConfig {
            precision,
            policy,
            interpolation_steps: steps,
        }
    }

    // Four 4x4 quadrants in distinct colors
    fn quadrants(order: [usize; 4]) -> PixelBuffer {
        const COLORS: [[u8; 3]; 4] = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [0, 0, 0]];
        PixelBuffer::from_fn(8, 8, |row, col| {
            let quadrant = (row / 4) * 2 + col / 4;
            order
                .get(quadrant)
                .and_then(|&c| COLORS.get(c))
                .copied()
                .unwrap_or([128, 128, 128])
        })
    }

    // Tests defaults match the documented command-line defaults
    // Verified by changing the default policy
    #[test]
    fn test_default_config() {
        let config = ShuffleConfig::default();
        assert_eq!(config.precision, DEFAULT_PRECISION);
        assert_eq!(config.policy, MotionPolicy::Fixed);
        assert_eq!(config.interpolation_steps, DEFAULT_INTERPOLATION_STEPS);
        assert!(config.validate().is_ok());
    }

    // Tests invalid parameters are rejected before any image work
    // Verified by removing the precision check
    #[test]
    fn test_config_validation() {
        assert!(config(0, MotionPolicy::Fixed, 50).validate().is_err());
        assert!(config(4, MotionPolicy::Dissolve, 0).validate().is_err());
        assert!(config(4, MotionPolicy::Proportional, 0).validate().is_err());
        // Steps are only meaningful for the interpolating policies
        assert!(config(4, MotionPolicy::Fixed, 0).validate().is_ok());
        assert!(config(4, MotionPolicy::Still, 0).validate().is_ok());
    }

    // Tests the precision selects the block edge from the pixel count
    // Verified by dividing by the channel-inclusive element count
    #[test]
    fn test_pipeline_partitions_by_precision() {
        let image = quadrants([0, 1, 2, 3]);
        let Ok(pipeline) = Pipeline::new(image.clone(), image, config(4, MotionPolicy::Still, 1))
        else {
            unreachable!("8x8 images split into four blocks");
        };

        assert_eq!(pipeline.grid().block_size(), 4);
        assert_eq!(pipeline.grid().block_count(), 4);
        assert_eq!(pipeline.config().precision, 4);
    }

    // Tests buffers of different sizes raise a dimension mismatch
    // Verified by resizing silently inside the pipeline
    #[test]
    fn test_dimension_mismatch() {
        let filler = PixelBuffer::blank(8, 8);
        let skeleton = PixelBuffer::blank(8, 9);
        let result = Pipeline::new(filler, skeleton, ShuffleConfig::default());
        assert!(matches!(result, Err(ShuffleError::DimensionMismatch { .. })));
    }

    // Tests precision beyond the pixel count is a configuration error
    // Verified by clamping the block edge to one pixel
    #[test]
    fn test_precision_too_large() {
        let image = PixelBuffer::blank(8, 8);
        let result = Pipeline::new(image.clone(), image, config(65, MotionPolicy::Still, 1));
        assert!(result.is_err_and(|e| e.is_configuration()));
    }

    // Tests a permuted filler is rearranged back into the skeleton layout
    // Verified by assigning blocks in row-major order without solving
    #[test]
    fn test_run_recovers_permuted_layout() {
        let skeleton = quadrants([0, 1, 2, 3]);
        let filler = quadrants([3, 2, 0, 1]);
        let Ok(pipeline) = Pipeline::new(filler, skeleton.clone(), config(4, MotionPolicy::Still, 1))
        else {
            unreachable!("8x8 images split into four blocks");
        };

        let Ok(output) = pipeline.run() else {
            unreachable!("valid pipeline runs");
        };
        assert_eq!(output.final_frame, skeleton);
        assert!(output.frames.is_empty());
        assert_eq!(output.assignment.targets(), &[3, 2, 0, 1]);
    }

    // Tests the pipeline forwards the configured policy and step count to synthesis
    // Verified by ignoring the configured step count
    #[test]
    fn test_run_produces_configured_frames() {
        let skeleton = quadrants([0, 1, 2, 3]);
        let filler = quadrants([3, 2, 1, 0]);

        let Ok(dissolve) = Pipeline::new(
            filler.clone(),
            skeleton.clone(),
            config(4, MotionPolicy::Dissolve, 7),
        ) else {
            unreachable!("8x8 images split into four blocks");
        };
        assert!(dissolve.run().is_ok_and(|o| o.frames.len() == 7));

        let Ok(fixed) = Pipeline::new(filler, skeleton, config(4, MotionPolicy::Fixed, 7)) else {
            unreachable!("8x8 images split into four blocks");
        };
        // Every block crosses the 2x2 grid diagonally in a single step
        let Ok(output) = fixed.run() else {
            unreachable!("valid pipeline runs");
        };
        assert_eq!(output.frames.len(), 1);
        assert_eq!(output.frames.last(), Some(&output.final_frame));
    }

    // Tests the cost matrix is built over filler rows and skeleton columns
    // Verified by building against the filler twice
    #[test]
    fn test_cost_matrix_stage() {
        let skeleton = quadrants([0, 1, 2, 3]);
        let filler = quadrants([1, 0, 2, 3]);
        let Ok(pipeline) = Pipeline::new(filler, skeleton, config(4, MotionPolicy::Still, 1)) else {
            unreachable!("8x8 images split into four blocks");
        };
        let Ok(matrix) = pipeline.cost_matrix() else {
            unreachable!("grid fits both buffers");
        };

        assert_eq!(matrix.size(), 4);
        assert_eq!(matrix.cost(0, 1), Some(0.0));
        assert_eq!(matrix.cost(1, 0), Some(0.0));
        assert!(matrix.cost(0, 0).is_some_and(|c| c > 0.0));
    }
}
