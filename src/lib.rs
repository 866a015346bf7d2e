//! PrismRay raytracer
//!
//! Decodes a textual scene description (camera frame, background color,
//! analytic primitives with pose and color), casts one ray per pixel and
//! keeps the nearest hit. No shading beyond the hit primitive's color.
//! Outputs binary PPM, PNG, or EXR.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod output;
pub mod parser;
pub mod primitive;
pub mod ray;
pub mod roots;
pub mod scene;
