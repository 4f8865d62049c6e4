//! Multi-pass path-traced rendering.
//!
//! Each pass traces `rays_per_pixel` camera rays through every pixel, one
//! row per step. Sample sums accumulate across passes, and the displayed
//! value is the running mean.

use std::time::Instant;

use lux_core::Color;
use rand::RngCore;

use crate::camera::Camera;
use crate::context::SceneContext;
use crate::error::RenderResult;
use crate::framebuffer::FrameBuffer;
use crate::integrator::{PathIntegrator, PRIMARY_DEPTH};
use crate::progressive::{Progress, ProgressiveRender, StepStatus};
use crate::settings::RenderSettings;

/// Running per-pixel sample sums and the averaged image derived from them.
#[derive(Debug, Clone)]
pub struct ProgressiveAccumulator {
    sums: Vec<Color>,
    width: u32,
    rays_per_pixel: u32,
    passes_completed: u32,
    framebuffer: FrameBuffer,
}

impl ProgressiveAccumulator {
    /// Create an accumulator for a square image.
    pub fn new(image_size: u32, rays_per_pixel: u32) -> Self {
        Self {
            sums: vec![Color::ZERO; (image_size as usize) * (image_size as usize)],
            width: image_size,
            rays_per_pixel,
            passes_completed: 0,
            framebuffer: FrameBuffer::square(image_size),
        }
    }

    /// Add the sum of one pass's samples for pixel (x, y) and refresh its
    /// displayed mean as of `pass` (1-based).
    pub fn add_sample(&mut self, x: u32, y: u32, sample_sum: Color, pass: u32) {
        let i = y as usize * self.width as usize + x as usize;
        self.sums[i] += sample_sum;

        let samples = self.rays_per_pixel.saturating_mul(pass);
        let displayed = if samples == 0 {
            Color::ZERO
        } else {
            self.sums[i] / samples as f32
        };
        self.framebuffer.set(x, y, displayed);
    }

    /// Mark a pass as finished.
    pub fn complete_pass(&mut self) {
        self.passes_completed += 1;
    }

    pub fn passes_completed(&self) -> u32 {
        self.passes_completed
    }

    /// Raw accumulated sum for pixel (x, y).
    pub fn sum_at(&self, x: u32, y: u32) -> Color {
        self.sums[y as usize * self.width as usize + x as usize]
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }
}

/// Path-traced renderer, one image row per step.
pub struct PathRenderer<'a, R: RngCore> {
    integrator: PathIntegrator<'a>,
    camera: Camera,
    accumulator: ProgressiveAccumulator,
    settings: RenderSettings,
    rng: R,
    /// Current pass, 1-based
    pass: u32,
    row: u32,
    started: Instant,
    finished: bool,
}

impl<'a, R: RngCore> PathRenderer<'a, R> {
    /// Validate `settings` and prepare the first pass.
    pub fn new(ctx: &'a SceneContext<'a>, settings: RenderSettings, rng: R) -> RenderResult<Self> {
        settings.validate()?;
        let size = settings.image_size;
        Ok(Self {
            integrator: PathIntegrator::new(ctx, &settings),
            camera: Camera::new(ctx.camera(), size),
            accumulator: ProgressiveAccumulator::new(size, settings.rays_per_pixel),
            settings,
            rng,
            pass: 1,
            row: 0,
            started: Instant::now(),
            finished: false,
        })
    }

    pub fn accumulator(&self) -> &ProgressiveAccumulator {
        &self.accumulator
    }

    /// Check if every pass has been rendered.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn render_row(&mut self, y: u32) {
        for x in 0..self.settings.image_size {
            let ray = self.camera.get_ray(x, y);
            let mut sum = Color::ZERO;
            for _ in 0..self.settings.rays_per_pixel {
                sum += self.integrator.trace(&ray, PRIMARY_DEPTH, &mut self.rng);
            }
            self.accumulator.add_sample(x, y, sum, self.pass);
        }
    }
}

impl<R: RngCore> ProgressiveRender for PathRenderer<'_, R> {
    fn step(&mut self) -> StepStatus {
        if self.finished {
            return StepStatus::Done;
        }

        self.render_row(self.row);
        self.row += 1;

        if self.row < self.settings.image_size {
            return StepStatus::Continue;
        }

        self.row = 0;
        self.accumulator.complete_pass();
        log::info!(
            "Path tracing: pass {}/{} complete, {} rays per pixel",
            self.pass,
            self.settings.max_passes,
            self.pass * self.settings.rays_per_pixel
        );

        if self.pass >= self.settings.max_passes {
            self.finished = true;
            log::info!(
                "Path tracing: {} passes complete in {:.1?}",
                self.settings.max_passes,
                self.started.elapsed()
            );
            return StepStatus::Done;
        }

        self.pass += 1;
        StepStatus::Continue
    }

    fn framebuffer(&self) -> &FrameBuffer {
        self.accumulator.framebuffer()
    }

    fn progress(&self) -> Progress {
        let percent = if self.finished {
            100.0
        } else {
            100.0 * self.row as f32 / self.settings.image_size as f32
        };
        Progress {
            stage: self.pass,
            stages: self.settings.max_passes,
            percent,
            samples_per_pixel: self.accumulator.passes_completed() * self.settings.rays_per_pixel,
        }
    }
}
