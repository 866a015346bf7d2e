//! Analytic primitives and their ray intersection routines.
//!
//! Each primitive carries a pose (position + rotation) and a flat color.
//! Intersection always happens in the primitive's local frame: the shape
//! equations below assume an axis-aligned, origin-centered shape, and
//! [`Primitive::intersect`] undoes the pose before dispatching to them.

use glam::{Quat, Vec3A};

use crate::ray::Ray;
use crate::roots::{least_positive_from_two, least_positive_root_of_square_equation};

/// Tolerance for near-zero denominators in intersection math.
pub const EPS: f32 = 1e-12;

/// Shape of a primitive, expressed in its local frame.
///
/// A closed set of analytic surfaces; dispatch is a plain `match`.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Infinite plane through the local origin.
    Plane {
        /// Unit normal of the plane. Always stored normalized.
        normal: Vec3A,
    },
    /// Axis-aligned ellipsoid centered at the local origin.
    Ellipsoid {
        /// Semi-axis lengths along x, y, z.
        radii: Vec3A,
    },
    /// Axis-aligned box centered at the local origin.
    Box {
        /// Half-extents along x, y, z. The box is defined by their
        /// magnitudes, so sign conventions don't matter.
        semi_axes: Vec3A,
    },
}

impl Shape {
    /// Plane through the origin; the normal is normalized here so the
    /// stored value is always a unit vector.
    pub fn plane(normal: Vec3A) -> Self {
        Shape::Plane {
            normal: normal.normalize(),
        }
    }

    /// Axis-aligned ellipsoid with the given semi-axis lengths.
    pub fn ellipsoid(radii: Vec3A) -> Self {
        Shape::Ellipsoid { radii }
    }

    /// Axis-aligned box with the given half-extents.
    pub fn cuboid(semi_axes: Vec3A) -> Self {
        Shape::Box { semi_axes }
    }

    /// Smallest strictly positive hit parameter for a ray already in the
    /// local frame, or `None` on a miss.
    fn intersection_t(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Shape::Plane { normal } => {
                let d_normal = ray.direction.dot(normal);
                if d_normal.abs() < EPS {
                    // Ray runs parallel to the plane.
                    return None;
                }

                let t = -ray.origin.dot(normal) / d_normal;
                if t <= 0.0 {
                    return None;
                }

                Some(t)
            }
            Shape::Ellipsoid { radii } => {
                // Scaling by the semi-axes reduces the ellipsoid to the
                // unit sphere |o' + t*d'| = 1.
                let o = ray.origin / radii;
                let d = ray.direction / radii;

                let a = d.length_squared();
                let b = 2.0 * o.dot(d);
                let c = o.length_squared() - 1.0;

                least_positive_root_of_square_equation(a, b, c)
            }
            Shape::Box { semi_axes } => {
                // Slab test: per-axis crossing parameters, then intersect
                // the three [t1, t2] intervals.
                let ts1 = (semi_axes - ray.origin) / ray.direction;
                let ts2 = (-semi_axes - ray.origin) / ray.direction;

                let t1 = ts1.min(ts2).max_element();
                let t2 = ts1.max(ts2).min_element();

                if t1 > t2 {
                    return None;
                }

                least_positive_from_two(t1, t2)
            }
        }
    }
}

/// A renderable shape with pose and color.
#[derive(Debug, Clone)]
pub struct Primitive {
    /// World-space translation of the local frame.
    pub position: Vec3A,
    /// World-space orientation of the local frame (unit quaternion).
    pub rotation: Quat,
    /// Flat RGB color in [0, 1]^3 reported on every hit.
    pub color: Vec3A,
    /// Local-frame shape equation.
    pub shape: Shape,
}

impl Primitive {
    /// Create a primitive with the given shape and pose.
    pub fn new(shape: Shape, position: Vec3A, rotation: Quat, color: Vec3A) -> Self {
        Self {
            position,
            rotation,
            color,
            shape,
        }
    }

    /// Intersect a world-space ray with this primitive.
    ///
    /// The ray is moved into the local frame (translate by `-position`,
    /// rotate by the conjugate rotation), then the shape equation runs.
    /// Translation and rotation are rigid and don't rescale the
    /// direction, so the returned `t` is valid in the original ray's
    /// parametrization. On a hit, the primitive's color rides along.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, Vec3A)> {
        let local_ray = ray
            .translated(-self.position)
            .rotated(self.rotation.conjugate());

        let t = self.shape.intersection_t(&local_ray)?;
        Some((t, self.color))
    }
}
