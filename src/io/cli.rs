//! Command-line interface and end-to-end run orchestration

use crate::algorithm::executor::{Pipeline, ShuffleConfig};
use crate::algorithm::synthesis::MotionPolicy;
use crate::io::animation::AnimationAssembler;
use crate::io::configuration::{
    ANIMATION_EXTENSION, DEFAULT_INTERPOLATION_STEPS, DEFAULT_PRECISION, OUTPUT_JOINER,
    STILL_EXTENSION,
};
use crate::io::error::Result;
use crate::io::image::{export_frame_as_png, load_pair};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "pixelshuffle")]
#[command(
    author,
    version,
    about = "Rearrange the blocks of one image to form another"
)]
/// Command-line arguments for the block shuffling tool
pub struct Cli {
    /// Image whose blocks are rearranged
    #[arg(value_name = "FILLER")]
    pub filler: PathBuf,

    /// Image whose layout the blocks are arranged into
    #[arg(value_name = "SKELETON")]
    pub skeleton: PathBuf,

    /// Approximate number of blocks (higher means finer pixelation and a slower solve)
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    /// Interpolation style: fixed, prop or dissolve
    #[arg(short, long, default_value = "fixed")]
    pub interpolation: String,

    /// Save only the final frame as a PNG
    #[arg(short = 'f', long = "final", conflicts_with = "interpolation")]
    pub final_only: bool,

    /// Frames generated by the prop and dissolve styles
    #[arg(short, long, default_value_t = DEFAULT_INTERPOLATION_STEPS)]
    pub steps: usize,

    /// Directory the output file is written to
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every pipeline stage
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most detailed log level to emit
    pub const fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::ERROR
        } else {
            tracing::Level::WARN
        }
    }

    /// Motion policy selected by `--final` and `--interpolation`
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolation style is not recognized
    pub fn policy(&self) -> Result<MotionPolicy> {
        if self.final_only {
            Ok(MotionPolicy::Still)
        } else {
            self.interpolation.parse()
        }
    }

    /// Pipeline configuration described by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolation style is unknown or a parameter is invalid
    pub fn config(&self) -> Result<ShuffleConfig> {
        let config = ShuffleConfig {
            precision: self.precision,
            policy: self.policy()?,
            interpolation_steps: self.steps,
        };
        config.validate()?;
        Ok(config)
    }

    /// Where the result of this run is written
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolation style is not recognized
    pub fn output_path(&self) -> Result<PathBuf> {
        let extension = if self.policy()?.is_animated() {
            ANIMATION_EXTENSION
        } else {
            STILL_EXTENSION
        };
        let name = format!(
            "{}{OUTPUT_JOINER}{}.{extension}",
            file_stem(&self.filler),
            file_stem(&self.skeleton)
        );
        Ok(self.output.join(name))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Runs the pipeline for one filler and skeleton pair with progress tracking
pub struct ShuffleProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ShuffleProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load both images, run every stage and write the result
    ///
    /// Returns the path of the written PNG or GIF.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation, image loading, any pipeline
    /// stage, or the final export fails
    pub fn process(&mut self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let config = self.cli.config()?;
        let output_path = self.cli.output_path()?;

        let (filler, skeleton) = load_pair(&self.cli.filler, &self.cli.skeleton)?;
        let pipeline = Pipeline::new(filler, skeleton, config)?;

        self.start_spinner("costs");
        let matrix = pipeline.cost_matrix()?;

        self.start_spinner("matching");
        if let Some(ref pm) = self.progress_manager {
            pm.set_message(&format!("{} blocks", matrix.size()));
        }
        let assignment = pipeline.solve(&matrix)?;

        let synthesizer = pipeline.synthesizer(&assignment)?;
        let final_frame = synthesizer.composite();

        if config.policy.is_animated() {
            let total = synthesizer.frame_count(config.policy, config.interpolation_steps)?;
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_stage("frames", total);
            }
            let progress = self.progress_manager.as_ref();
            let frames =
                synthesizer.frames_with(config.policy, config.interpolation_steps, |_| {
                    if let Some(pm) = progress {
                        pm.advance(1);
                    }
                })?;

            self.start_spinner("encoding");
            let assembler = AnimationAssembler::default();
            assembler.export_gif(pipeline.filler(), &frames, &final_frame, &output_path)?;
            tracing::debug!(
                frames = frames.len(),
                playback_ms = assembler.duration_ms(frames.len()),
                "animation written"
            );
        } else {
            self.start_spinner("saving");
            export_frame_as_png(&final_frame, &output_path)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        tracing::info!(
            path = %output_path.display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "done"
        );
        Ok(output_path)
    }

    fn start_spinner(&mut self, stage: &str) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_spinner(stage);
        }
    }
}
