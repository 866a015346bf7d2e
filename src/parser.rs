//! Scene description decoder.
//!
//! The format is a whitespace-delimited, line-agnostic token stream: a
//! keyword followed by a fixed number of numeric fields. Keywords either
//! set scene-global state or feed the primitive accumulator.
//!
//! The accumulator holds pose/color defaults plus at most one in-progress
//! primitive. POSITION, ROTATION and COLOR update the defaults, and, once
//! a shape keyword has been seen, also live-edit the in-progress
//! primitive. Scene files rely on both orders ("set pose, then name the
//! shape" and the reverse), so both paths are kept.

use glam::{Quat, Vec3A};
use log::warn;
use std::path::Path;

use crate::error::{Result, SceneError};
use crate::primitive::{Primitive, Shape};
use crate::scene::Scene;

/// Cursor over the numeric fields of the token stream.
struct Fields<'a> {
    tokens: std::str::SplitAsciiWhitespace<'a>,
}

impl Fields<'_> {
    fn next_f32(&mut self, keyword: &'static str) -> Result<f32> {
        let token = self
            .tokens
            .next()
            .ok_or(SceneError::UnexpectedEof(keyword))?;
        token.parse().map_err(|_| SceneError::InvalidNumber {
            keyword,
            token: token.to_string(),
        })
    }

    fn next_u32(&mut self, keyword: &'static str) -> Result<u32> {
        let token = self
            .tokens
            .next()
            .ok_or(SceneError::UnexpectedEof(keyword))?;
        token.parse().map_err(|_| SceneError::InvalidNumber {
            keyword,
            token: token.to_string(),
        })
    }

    fn next_vec3(&mut self, keyword: &'static str) -> Result<Vec3A> {
        Ok(Vec3A::new(
            self.next_f32(keyword)?,
            self.next_f32(keyword)?,
            self.next_f32(keyword)?,
        ))
    }

    /// Quaternion fields come in x, y, z, w order.
    fn next_quat(&mut self, keyword: &'static str) -> Result<Quat> {
        Ok(Quat::from_xyzw(
            self.next_f32(keyword)?,
            self.next_f32(keyword)?,
            self.next_f32(keyword)?,
            self.next_f32(keyword)?,
        ))
    }
}

/// Read and decode a scene file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let text = std::fs::read_to_string(path)?;
    parse_scene(&text)
}

/// Decode a scene from its textual description.
///
/// Stops at FIN or end of input, flushing any in-progress primitive.
/// Unknown keywords produce a warning and consume no further tokens.
pub fn parse_scene(text: &str) -> Result<Scene> {
    let mut fields = Fields {
        tokens: text.split_ascii_whitespace(),
    };

    let mut scene = Scene::default();

    // Primitive accumulator: defaults applied at instantiation, plus the
    // primitive currently being described, if any.
    let mut pending: Option<Primitive> = None;
    let mut position = Vec3A::ZERO;
    let mut rotation = Quat::IDENTITY;
    let mut color = Vec3A::ZERO;

    while let Some(keyword) = fields.tokens.next() {
        match keyword {
            "FIN" => break,

            "DIMENSIONS" => {
                scene.width = fields.next_u32("DIMENSIONS")?;
                scene.height = fields.next_u32("DIMENSIONS")?;
            }
            "BG_COLOR" => scene.bg_color = fields.next_vec3("BG_COLOR")?,
            "CAMERA_POSITION" => scene.camera_position = fields.next_vec3("CAMERA_POSITION")?,
            "CAMERA_RIGHT" => scene.camera_right = fields.next_vec3("CAMERA_RIGHT")?,
            "CAMERA_UP" => scene.camera_up = fields.next_vec3("CAMERA_UP")?,
            "CAMERA_FORWARD" => scene.camera_forward = fields.next_vec3("CAMERA_FORWARD")?,
            "CAMERA_FOV_X" => {
                let fov_x = fields.next_f32("CAMERA_FOV_X")?;
                if scene.width == 0 || scene.height == 0 {
                    return Err(SceneError::FovBeforeDimensions);
                }
                scene.tan_fov.x = (fov_x / 2.0).tan();
                scene.tan_fov.y = scene.tan_fov.x * scene.height as f32 / scene.width as f32;
            }

            "NEW_PRIMITIVE" => {
                if let Some(primitive) = pending.take() {
                    scene.primitives.push(primitive);
                }
                position = Vec3A::ZERO;
                rotation = Quat::IDENTITY;
                color = Vec3A::ZERO;
            }
            "POSITION" => {
                position = fields.next_vec3("POSITION")?;
                if let Some(primitive) = &mut pending {
                    primitive.position = position;
                }
            }
            "ROTATION" => {
                rotation = fields.next_quat("ROTATION")?;
                if let Some(primitive) = &mut pending {
                    primitive.rotation = rotation;
                }
            }
            "COLOR" => {
                color = fields.next_vec3("COLOR")?;
                if let Some(primitive) = &mut pending {
                    primitive.color = color;
                }
            }

            "PLANE" => {
                let normal = fields.next_vec3("PLANE")?;
                pending = Some(Primitive::new(Shape::plane(normal), position, rotation, color));
            }
            "ELLIPSOID" => {
                let radii = fields.next_vec3("ELLIPSOID")?;
                pending = Some(Primitive::new(
                    Shape::ellipsoid(radii),
                    position,
                    rotation,
                    color,
                ));
            }
            "BOX" => {
                let semi_axes = fields.next_vec3("BOX")?;
                pending = Some(Primitive::new(
                    Shape::cuboid(semi_axes),
                    position,
                    rotation,
                    color,
                ));
            }

            unknown => warn!("unknown command {}", unknown),
        }
    }

    if let Some(primitive) = pending.take() {
        scene.primitives.push(primitive);
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_full_scene() {
        let scene = parse_scene(
            "DIMENSIONS 2 2\n\
             BG_COLOR 0 0 0\n\
             CAMERA_POSITION 0 0 0\n\
             CAMERA_RIGHT 0 0 -1\n\
             CAMERA_UP 0 1 0\n\
             CAMERA_FORWARD 1 0 0\n\
             CAMERA_FOV_X 0.1\n\
             NEW_PRIMITIVE\n\
             POSITION 5 0 0\n\
             COLOR 1 0 0\n\
             PLANE 1 0 0\n",
        )
        .unwrap();

        assert_eq!(scene.width, 2);
        assert_eq!(scene.height, 2);
        assert_eq!(scene.primitives.len(), 1);
        assert_eq!(scene.primitives[0].position, Vec3A::new(5.0, 0.0, 0.0));
        assert_eq!(scene.primitives[0].color, Vec3A::new(1.0, 0.0, 0.0));

        // Every pixel of the 2x2 render resolves to the plane color.
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(scene.get_pixel_color(x, y), Vec3A::new(1.0, 0.0, 0.0));
            }
        }
    }

    #[test]
    fn test_line_breaks_are_not_significant() {
        let scene =
            parse_scene("DIMENSIONS\n16\t9 NEW_PRIMITIVE COLOR 0.5 0.5 0.5 BOX 1 2 3").unwrap();
        assert_eq!(scene.width, 16);
        assert_eq!(scene.height, 9);
        assert_eq!(scene.primitives.len(), 1);
    }

    #[test]
    fn test_pose_fields_edit_instantiated_primitive() {
        // COLOR after the shape keyword retroactively edits the primitive.
        let scene = parse_scene("NEW_PRIMITIVE ELLIPSOID 1 1 1 COLOR 0 1 0 POSITION 2 0 0").unwrap();
        assert_eq!(scene.primitives.len(), 1);
        assert_eq!(scene.primitives[0].color, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(scene.primitives[0].position, Vec3A::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_new_primitive_resets_defaults() {
        let scene = parse_scene(
            "NEW_PRIMITIVE POSITION 1 2 3 COLOR 1 1 1 BOX 1 1 1 \
             NEW_PRIMITIVE BOX 2 2 2",
        )
        .unwrap();
        assert_eq!(scene.primitives.len(), 2);
        assert_eq!(scene.primitives[0].position, Vec3A::new(1.0, 2.0, 3.0));
        // Defaults went back to origin/black for the second primitive.
        assert_eq!(scene.primitives[1].position, Vec3A::ZERO);
        assert_eq!(scene.primitives[1].color, Vec3A::ZERO);
    }

    #[test]
    fn test_rotation_field_order_is_xyzw() {
        let scene =
            parse_scene("NEW_PRIMITIVE ROTATION 0 0 0.7071068 0.7071068 BOX 1 1 1").unwrap();
        // A quarter turn around z is (x, y, z, w) = (0, 0, sin(pi/4), cos(pi/4)).
        let q = scene.primitives[0].rotation;
        assert_relative_eq!(q.x, 0.0);
        assert_relative_eq!(q.y, 0.0);
        assert_relative_eq!(q.z, (FRAC_PI_2 / 2.0).sin(), epsilon = 1e-6);
        assert_relative_eq!(q.w, (FRAC_PI_2 / 2.0).cos(), epsilon = 1e-6);
    }

    #[test]
    fn test_plane_normal_normalized_at_decode() {
        let scene = parse_scene("NEW_PRIMITIVE PLANE 0 0 10").unwrap();
        match scene.primitives[0].shape {
            Shape::Plane { normal } => {
                assert_relative_eq!(normal.length(), 1.0, epsilon = 1e-6);
                assert_relative_eq!(normal.z, 1.0, epsilon = 1e-6);
            }
            _ => panic!("expected a plane"),
        }
    }

    #[test]
    fn test_fin_stops_reading() {
        let scene = parse_scene("NEW_PRIMITIVE BOX 1 1 1 FIN NEW_PRIMITIVE BOX 2 2 2").unwrap();
        assert_eq!(scene.primitives.len(), 1);
    }

    #[test]
    fn test_end_of_input_flushes_pending_primitive() {
        let scene = parse_scene("NEW_PRIMITIVE BOX 1 1 1").unwrap();
        assert_eq!(scene.primitives.len(), 1);
    }

    #[test]
    fn test_unknown_keyword_consumes_nothing() {
        // The bogus keyword warns; the following token is read as the next
        // keyword as if nothing happened.
        let scene = parse_scene("METRICS DIMENSIONS 4 3").unwrap();
        assert_eq!(scene.width, 4);
        assert_eq!(scene.height, 3);
    }

    #[test]
    fn test_fov_tangents() {
        let scene = parse_scene("DIMENSIONS 4 2 CAMERA_FOV_X 1.5707963").unwrap();
        assert_relative_eq!(scene.tan_fov.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(scene.tan_fov.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_fov_before_dimensions_is_an_error() {
        let err = parse_scene("CAMERA_FOV_X 1.0 DIMENSIONS 4 2").unwrap_err();
        assert!(matches!(err, SceneError::FovBeforeDimensions));
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let err = parse_scene("BG_COLOR 0 zero 0").unwrap_err();
        assert!(matches!(err, SceneError::InvalidNumber { keyword: "BG_COLOR", .. }));
    }

    #[test]
    fn test_premature_end_of_input_is_an_error() {
        let err = parse_scene("NEW_PRIMITIVE BOX 1 1").unwrap_err();
        assert!(matches!(err, SceneError::UnexpectedEof("BOX")));
    }
}
