//! Lux Core - the scene side of the lux renderers.
//!
//! The transport code in `lux_renderer` only ever sees a scene through the
//! [`SceneQuery`] contract: closest-hit ray casts and the list of point
//! lights. This crate defines that contract and ships a small reference
//! implementation built from analytic shapes:
//!
//! - **Query contract**: `SceneQuery`, `Hit`, `SurfaceId`, `SurfaceKind`, `PointLight`
//! - **Surfaces**: `Material`, `Texture`, `Shape`
//! - **Reference scene**: `Scene`
//!
//! # Example
//!
//! ```ignore
//! use lux_core::{Material, Scene, SceneQuery, Shape, SurfaceKind};
//! use lux_math::Vec3;
//!
//! let mut scene = Scene::new("floor");
//! scene.add_surface(
//!     Shape::plane(Vec3::ZERO, Vec3::Y),
//!     Material::new("white", SurfaceKind::Diffuse, Vec3::ONE),
//! );
//! scene.add_point_light(Vec3::new(0.0, 1.0, 0.0));
//!
//! let hit = scene.raycast(Vec3::Y, -Vec3::Y, 10.0);
//! assert!(hit.is_some());
//! ```

pub mod material;
pub mod query;
pub mod scene;
pub mod shape;
pub mod texture;

// Re-export commonly used types
pub use material::{Color, Material};
pub use query::{Hit, PointLight, SceneQuery, SurfaceId, SurfaceKind};
pub use scene::{Scene, Surface};
pub use shape::Shape;
pub use texture::{load_texture, Texture, TextureError, TextureResult};
