//! Animation assembly and GIF export
//!
//! The animation opens on the resized filler, plays the synthesized frames, and
//! rests on the final composite. Padding runs of an identical image are written as
//! one GIF frame held for the whole run.

use crate::io::configuration::{FRAME_DELAY_MS, LEAD_IN_FRAMES, LEAD_OUT_FRAMES};
use crate::io::error::{Result, ShuffleError};
use crate::io::image::ensure_parent_dir;
use crate::spatial::buffer::FrameBuffer;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Playback timing for assembled animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationAssembler {
    /// Frame periods the opening image is held for
    pub lead_in: u32,
    /// Frame periods the closing image is held for
    pub lead_out: u32,
    /// Display duration of one frame period
    pub frame_delay_ms: u32,
}

impl Default for AnimationAssembler {
    fn default() -> Self {
        Self {
            lead_in: LEAD_IN_FRAMES,
            lead_out: LEAD_OUT_FRAMES,
            frame_delay_ms: FRAME_DELAY_MS,
        }
    }
}

impl AnimationAssembler {
    /// Stack opening image, core frames and closing image into timed GIF frames
    ///
    /// A zero-length lead-in or lead-out omits that padding frame.
    pub fn assemble(
        &self,
        opening: &FrameBuffer,
        frames: &[FrameBuffer],
        closing: &FrameBuffer,
    ) -> Vec<Frame> {
        let mut assembled = Vec::with_capacity(frames.len() + 2);

        if self.lead_in > 0 {
            assembled.push(self.timed(opening, self.lead_in));
        }
        assembled.extend(frames.iter().map(|frame| self.timed(frame, 1)));
        if self.lead_out > 0 {
            assembled.push(self.timed(closing, self.lead_out));
        }

        assembled
    }

    /// Total playback time of an assembled animation
    pub const fn duration_ms(&self, core_frames: usize) -> u64 {
        (self.lead_in as u64 + core_frames as u64 + self.lead_out as u64)
            * self.frame_delay_ms as u64
    }

    fn timed(&self, frame: &FrameBuffer, periods: u32) -> Frame {
        let rgba = RgbaImage::from_fn(frame.width() as u32, frame.height() as u32, |x, y| {
            let [r, g, b] = frame
                .pixel(y as usize, x as usize)
                .unwrap_or([0, 0, 0]);
            image::Rgba([r, g, b, 255])
        });
        Frame::from_parts(
            rgba,
            0,
            0,
            Delay::from_numer_denom_ms(self.frame_delay_ms.saturating_mul(periods), 1),
        )
    }

    /// Assemble the animation and write it as a looping GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory or output file cannot be created
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        opening: &FrameBuffer,
        frames: &[FrameBuffer],
        closing: &FrameBuffer,
        output_path: &Path,
    ) -> Result<()> {
        ensure_parent_dir(output_path)?;

        let file = std::fs::File::create(output_path).map_err(|e| ShuffleError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let export_error = |e| ShuffleError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        };

        let mut encoder = GifEncoder::new(file);
        encoder.set_repeat(Repeat::Infinite).map_err(export_error)?;
        encoder
            .encode_frames(self.assemble(opening, frames, closing))
            .map_err(export_error)?;

        tracing::debug!(
            frames = frames.len(),
            path = %output_path.display(),
            "animation written"
        );
        Ok(())
    }
}
