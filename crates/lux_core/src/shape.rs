//! Analytic shapes for the reference scene.
//!
//! Each shape reports its outward normal; flipping toward the viewer is left
//! to the transport code, which needs to know which side it is on.

use lux_math::{Interval, Ray, Vec2, Vec3};
use std::f32::consts::PI;

/// Intersection data produced by a shape, before material lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    pub t: f32,
    pub point: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A primitive surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Sphere with outward-facing normals.
    Sphere { center: Vec3, radius: f32 },
    /// Infinite plane, hit from either side; `normal` is unit length.
    Plane { point: Vec3, normal: Vec3 },
    /// Triangle; the normal follows `(v1 - v0) × (v2 - v0)`.
    Triangle { v0: Vec3, v1: Vec3, v2: Vec3 },
    /// Parallelogram spanned by `u` and `v` from `corner`.
    /// The normal follows `u × v`.
    Quad { corner: Vec3, u: Vec3, v: Vec3 },
}

impl Shape {
    /// Create a sphere.
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Shape::Sphere {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Create a plane through `point` facing `normal`.
    pub fn plane(point: Vec3, normal: Vec3) -> Self {
        Shape::Plane {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    /// Create a triangle from three vertices.
    pub fn triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Shape::Triangle { v0, v1, v2 }
    }

    /// Create a parallelogram.
    pub fn quad(corner: Vec3, u: Vec3, v: Vec3) -> Self {
        Shape::Quad { corner, u, v }
    }

    /// Intersect a ray with a unit-length direction.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
        match *self {
            Shape::Sphere { center, radius } => hit_sphere(center, radius, ray, ray_t),
            Shape::Plane { point, normal } => hit_plane(point, normal, ray, ray_t),
            Shape::Triangle { v0, v1, v2 } => hit_triangle(v0, v1, v2, ray, ray_t),
            Shape::Quad { corner, u, v } => hit_quad(corner, u, v, ray, ray_t),
        }
    }
}

fn hit_sphere(center: Vec3, radius: f32, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 || radius <= 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let point = ray.at(root);
    let normal = (point - center) / radius;
    Some(ShapeHit {
        t: root,
        point,
        normal,
        uv: sphere_uv(normal),
    })
}

/// UV coordinates for a point on the unit sphere.
fn sphere_uv(p: Vec3) -> Vec2 {
    // theta: angle down from +Y
    // phi: angle around Y axis from +X
    let theta = (-p.y).clamp(-1.0, 1.0).acos();
    let phi = (-p.z).atan2(p.x) + PI;
    Vec2::new(phi / (2.0 * PI), theta / PI)
}

fn hit_plane(point: Vec3, normal: Vec3, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
    let denom = normal.dot(ray.direction());
    if denom.abs() < 1e-8 {
        return None;
    }

    let t = normal.dot(point - ray.origin()) / denom;
    if !ray_t.surrounds(t) {
        return None;
    }

    let hit_point = ray.at(t);
    let tangent = normal.any_orthonormal_vector();
    let bitangent = normal.cross(tangent);
    let local = hit_point - point;
    Some(ShapeHit {
        t,
        point: hit_point,
        normal,
        uv: Vec2::new(local.dot(tangent), local.dot(bitangent)),
    })
}

/// Möller-Trumbore ray-triangle intersection.
fn hit_triangle(v0: Vec3, v1: Vec3, v2: Vec3, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Parallel to the triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.surrounds(t) {
        return None;
    }

    let normal = edge1.cross(edge2).normalize_or_zero();
    Some(ShapeHit {
        t,
        point: ray.at(t),
        normal,
        uv: Vec2::new(u, v),
    })
}

fn hit_quad(corner: Vec3, u: Vec3, v: Vec3, ray: &Ray, ray_t: Interval) -> Option<ShapeHit> {
    let n = u.cross(v);
    let n_len_sq = n.length_squared();
    if n_len_sq < 1e-12 {
        return None;
    }
    let normal = n / n_len_sq.sqrt();

    let denom = normal.dot(ray.direction());
    if denom.abs() < 1e-8 {
        return None;
    }

    let t = normal.dot(corner - ray.origin()) / denom;
    if !ray_t.surrounds(t) {
        return None;
    }

    // Planar coordinates of the hit in the (u, v) frame
    let hit_point = ray.at(t);
    let w = n / n_len_sq;
    let planar = hit_point - corner;
    let alpha = w.dot(planar.cross(v));
    let beta = w.dot(u.cross(planar));

    if !Interval::UNIT.contains(alpha) || !Interval::UNIT.contains(beta) {
        return None;
    }

    Some(ShapeHit {
        t,
        point: hit_point,
        normal,
        uv: Vec2::new(alpha, beta),
    })
}
