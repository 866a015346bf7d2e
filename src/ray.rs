//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use glam::{Quat, Vec3A};

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. All intersection formulas are
    /// homogeneous in t relative to the direction's magnitude, so a hit
    /// parameter is always expressed in units of this direction.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// Return a copy of this ray with its origin shifted by `offset`.
    ///
    /// The direction is unchanged, so the parametrization along the ray
    /// is preserved.
    pub fn translated(&self, offset: Vec3A) -> Self {
        Self {
            origin: self.origin + offset,
            direction: self.direction,
        }
    }

    /// Return a copy of this ray with origin and direction both rotated
    /// by the unit quaternion `rotation`.
    ///
    /// Rotation is rigid, so the parametrization along the ray is
    /// preserved here as well.
    pub fn rotated(&self, rotation: Quat) -> Self {
        Self {
            origin: rotation * self.origin,
            direction: rotation * self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_at_walks_along_direction() {
        let r = Ray::new(Vec3A::new(1.0, 0.0, 0.0), Vec3A::new(0.0, 2.0, 0.0));
        let p = r.at(1.5);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 3.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_translated_keeps_direction() {
        let r = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, 1.0));
        let moved = r.translated(Vec3A::new(-1.0, -2.0, -3.0));
        assert_relative_eq!(moved.origin.length(), 0.0);
        assert_eq!(moved.direction, r.direction);
    }

    #[test]
    fn test_rotated_rotates_both_components() {
        // Quarter turn around z maps +x to +y.
        let r = Ray::new(Vec3A::new(1.0, 0.0, 0.0), Vec3A::new(1.0, 0.0, 0.0));
        let turned = r.rotated(Quat::from_rotation_z(FRAC_PI_2));
        assert_relative_eq!(turned.origin.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(turned.direction.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(turned.origin.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(turned.direction.x, 0.0, epsilon = 1e-6);
    }
}
