//! Coordinate and transform types shared by the camera, draw ops and passes.
//!
//! Conventions:
//! - origin top-left, +X right, +Y down
//! - world space is relative to a [`crate::Camera`]; canvas space is screen pixels
//! - [`Affine`] operations post-compose: `t.translate(..)` applies `t` first

mod affine;
mod vec2;

pub use affine::Affine;
pub use vec2::Vec2;
