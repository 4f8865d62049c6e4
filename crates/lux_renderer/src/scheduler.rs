//! Coarse-to-fine photon-map rendering.
//!
//! Pixels are visited on grids of doubling resolution (2x2, 4x4, ... up to
//! the image size). Each grid only visits the cells that no coarser grid
//! has already drawn, so a blocky preview appears almost at once and every
//! pixel is evaluated exactly once by the time the full resolution is done.

use std::time::Instant;

use lux_core::Color;
use rand::RngCore;

use crate::camera::Camera;
use crate::context::SceneContext;
use crate::emitter::PhotonEmitter;
use crate::error::RenderResult;
use crate::framebuffer::FrameBuffer;
use crate::gather::DensityEstimator;
use crate::photon::PhotonMap;
use crate::progressive::{Progress, ProgressiveRender, StepStatus};
use crate::settings::RenderSettings;

/// A pixel visited during refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefinementPixel {
    pub x: u32,
    pub y: u32,
    /// Side length of the grid this pixel belongs to
    pub grid: u32,
}

/// Iterator over pixels in coarse-to-fine refinement order.
#[derive(Debug, Clone)]
pub struct RefinementOrder {
    image_size: u32,
    grid: u32,
    row: u32,
    col: u32,
}

impl RefinementOrder {
    /// Start at the 2x2 grid of a square power-of-two image.
    pub fn new(image_size: u32) -> Self {
        Self {
            image_size,
            grid: 2,
            row: 0,
            col: 0,
        }
    }

    /// Side length of the grid currently being visited.
    pub fn grid_size(&self) -> u32 {
        self.grid
    }

    /// Check if every pixel has been visited.
    pub fn is_finished(&self) -> bool {
        self.clone().next().is_none()
    }

    /// Fraction of the current grid's rows already visited, 0-1.
    pub fn grid_fraction(&self) -> f32 {
        if self.grid > self.image_size {
            1.0
        } else {
            self.row as f32 / self.grid as f32
        }
    }

    /// Whether cell (col, row) of `grid` still needs drawing.
    ///
    /// Cells with an even row and an even column coincide with a cell of
    /// the next coarser grid.
    fn needs_drawing(grid: u32, row: u32, col: u32) -> bool {
        grid == 2 || row % 2 != 0 || col % 2 != 0
    }
}

impl Iterator for RefinementOrder {
    type Item = RefinementPixel;

    fn next(&mut self) -> Option<RefinementPixel> {
        loop {
            if self.grid > self.image_size {
                return None;
            }
            if self.row >= self.grid {
                self.row = 0;
                self.grid = self.grid.saturating_mul(2);
                continue;
            }
            if self.col >= self.grid {
                self.col = 0;
                self.row += 1;
                continue;
            }

            let (row, col) = (self.row, self.col);
            self.col += 1;

            if Self::needs_drawing(self.grid, row, col) {
                let cell = self.image_size / self.grid;
                return Some(RefinementPixel {
                    x: col * cell,
                    y: row * cell,
                    grid: self.grid,
                });
            }
        }
    }
}

/// Photon-map renderer: emits photons once, then refines the image by
/// density estimation in bounded steps.
pub struct PhotonRenderer<'a> {
    ctx: &'a SceneContext<'a>,
    settings: RenderSettings,
    photons: PhotonMap,
    camera: Camera,
    order: RefinementOrder,
    framebuffer: FrameBuffer,
    started: Instant,
    finished: bool,
}

impl<'a> PhotonRenderer<'a> {
    /// Validate `settings`, emit photons and prepare for refinement.
    ///
    /// Refuses to start if the scene has no point lights.
    pub fn new(
        ctx: &'a SceneContext<'a>,
        settings: RenderSettings,
        rng: &mut dyn RngCore,
    ) -> RenderResult<Self> {
        settings.validate()?;
        let photons = PhotonEmitter::new(ctx, &settings).emit(rng)?;
        Self::with_photons(ctx, settings, photons)
    }

    /// Prepare for refinement over an already populated photon map.
    pub fn with_photons(
        ctx: &'a SceneContext<'a>,
        settings: RenderSettings,
        photons: PhotonMap,
    ) -> RenderResult<Self> {
        settings.validate()?;
        let size = settings.image_size;
        Ok(Self {
            ctx,
            camera: Camera::new(ctx.camera(), size),
            order: RefinementOrder::new(size),
            framebuffer: FrameBuffer::square(size),
            photons,
            settings,
            started: Instant::now(),
            finished: false,
        })
    }

    /// The photon map being gathered from.
    pub fn photon_map(&self) -> &PhotonMap {
        &self.photons
    }

    /// Check if refinement has reached full resolution.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Radiance estimate for pixel (x, y).
    fn shade(&self, estimator: &DensityEstimator, x: u32, y: u32) -> Color {
        let ray = self.camera.get_ray(x, y);
        match self.ctx.raycast(ray.origin, ray.direction, self.settings.max_ray_length) {
            Some(hit) => estimator.gather_hit(&hit),
            None => self.settings.background_color(),
        }
    }

    fn levels(&self) -> u32 {
        self.settings.image_size.trailing_zeros()
    }
}

impl ProgressiveRender for PhotonRenderer<'_> {
    fn step(&mut self) -> StepStatus {
        if self.finished {
            return StepStatus::Done;
        }

        let budget = self.order.grid_size().max(self.settings.pixels_per_step);
        let estimator = DensityEstimator::new(&self.photons, &self.settings);
        let mut drawn = 0;

        while drawn < budget {
            let level = self.order.grid_size();
            let Some(pixel) = self.order.next() else {
                break;
            };
            if pixel.grid != level {
                log::debug!("Refinement level {0}x{0} complete", level);
            }
            let color = self.shade(&estimator, pixel.x, pixel.y);
            self.framebuffer.set(pixel.x, pixel.y, color);
            drawn += 1;
        }

        if self.order.is_finished() {
            self.finished = true;
            log::info!(
                "Photon rendering: {0}x{0} complete in {1:.1?}",
                self.settings.image_size,
                self.started.elapsed()
            );
            return StepStatus::Done;
        }

        StepStatus::Continue
    }

    fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    fn progress(&self) -> Progress {
        let grid = self.order.grid_size().min(self.settings.image_size);
        Progress {
            stage: grid.trailing_zeros(),
            stages: self.levels(),
            percent: 100.0 * self.order.grid_fraction(),
            samples_per_pixel: 0,
        }
    }
}
