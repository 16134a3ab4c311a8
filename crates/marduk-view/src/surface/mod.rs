//! Drawing-surface boundary.
//!
//! The compositor never rasterizes on its own: it hands images and transforms to a
//! [`Surface`]. Hosts with a GPU backend implement the trait over their textures;
//! [`ImageSurface`] is the CPU implementation used by the demo and the tests.

mod error;
mod image_surface;

pub use error::LoadError;
pub use image_surface::ImageSurface;

use crate::coords::Affine;

/// Texture sampling used when an image is composited.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Filter {
    /// Point sampling. Keeps pixel art crisp.
    #[default]
    Nearest,
    /// Bilinear sampling.
    Linear,
}

/// An image that can be drawn and drawn onto.
///
/// Images and render targets share one type, so a pass surface can be composited
/// onto the screen exactly like a sprite.
pub trait Surface: Sized {
    /// Allocates a cleared surface of `width` x `height` pixels.
    fn with_size(width: u32, height: u32) -> Self;

    /// Size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Resets every pixel to transparent.
    fn clear(&mut self);

    /// Composites `src` onto `self`, mapping source pixel coordinates through
    /// `transform`.
    fn draw_image(&mut self, src: &Self, transform: Affine, filter: Filter);
}
