//! Lux Renderer - progressive light transport.
//!
//! Two independent pipelines estimate pixel radiance for a scene that is
//! only reachable through [`lux_core::SceneQuery`]:
//!
//! - **Photon mapping**: photons are emitted once from every point light,
//!   then a coarse-to-fine scheduler gathers them per pixel
//!   ([`PhotonRenderer`]).
//! - **Path tracing**: a recursive stochastic integrator whose per-pass
//!   samples are accumulated into a converging image ([`PathRenderer`]).
//!
//! Both are resumable step sequences driven by the host through
//! [`ProgressiveRender::step`].

mod accumulator;
mod camera;
mod context;
mod emitter;
mod error;
mod framebuffer;
mod gather;
mod integrator;
mod photon;
mod progressive;
mod sampling;
mod scheduler;
mod settings;

pub use accumulator::{PathRenderer, ProgressiveAccumulator};
pub use camera::Camera;
pub use context::SceneContext;
pub use emitter::PhotonEmitter;
pub use error::{RenderError, RenderResult};
pub use framebuffer::{color_to_rgba, FrameBuffer, FrameSink};
pub use gather::{gated_sq_dist, DensityEstimator};
pub use integrator::{HitColorCache, PathIntegrator, PRIMARY_DEPTH};
pub use photon::{filter_color, Photon, PhotonMap};
pub use progressive::{Progress, ProgressiveRender, StepStatus};
pub use scheduler::{PhotonRenderer, RefinementOrder, RefinementPixel};
pub use settings::{ConfigError, RenderSettings, MAX_IMAGE_SIZE};

/// Re-export the scene-side types the renderers speak in
pub use lux_core::{Color, Hit, PointLight, SceneQuery, SurfaceId, SurfaceKind};
pub use lux_math::{Ray, Vec3};
