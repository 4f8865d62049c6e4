//! Resumable rendering.
//!
//! A renderer does a bounded amount of work per [`ProgressiveRender::step`]
//! and reports whether more remains. The host decides when (and whether) to
//! call it again; between steps the framebuffer always holds a complete,
//! presentable image.

use std::fmt;

use crate::framebuffer::FrameBuffer;

/// Outcome of one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// More work remains; call `step` again to continue.
    Continue,
    /// The renderer has reached its final resolution or pass count.
    Done,
}

/// Snapshot of how far a renderer has come.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Current stage (refinement level or pass), 1-based
    pub stage: u32,
    /// Number of stages in the full render
    pub stages: u32,
    /// Completion of the current stage, 0-100
    pub percent: f32,
    /// Camera samples per pixel accumulated so far (0 for photon mapping)
    pub samples_per_pixel: u32,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pass : {}/{} Percent : {:.0}", self.stage, self.stages, self.percent)?;
        if self.samples_per_pixel > 0 {
            write!(f, " rays per pixel : {}", self.samples_per_pixel)?;
        }
        Ok(())
    }
}

/// A renderer that refines its framebuffer one bounded step at a time.
pub trait ProgressiveRender {
    /// Do one unit of work.
    fn step(&mut self) -> StepStatus;

    /// The current image.
    fn framebuffer(&self) -> &FrameBuffer;

    /// How far the render has come.
    fn progress(&self) -> Progress;

    /// Step until done, returning the number of steps taken.
    fn run_to_completion(&mut self) -> usize {
        let mut steps = 1;
        while self.step() == StepStatus::Continue {
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_display() {
        let photon = Progress {
            stage: 3,
            stages: 9,
            percent: 50.0,
            samples_per_pixel: 0,
        };
        assert_eq!(photon.to_string(), "Pass : 3/9 Percent : 50");

        let path = Progress {
            stage: 2,
            stages: 64,
            percent: 12.4,
            samples_per_pixel: 64,
        };
        assert_eq!(path.to_string(), "Pass : 2/64 Percent : 12 rays per pixel : 64");
    }
}
