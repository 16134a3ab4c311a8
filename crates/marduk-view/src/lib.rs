//! Marduk view crate.
//!
//! A thin 2D rendering layer for games: a [`Camera`], a fluent sprite [`DrawOp`],
//! render [`Pass`]es for world and screen-space content, a layered
//! [`RenderQueue`], and [`draw_passes`] to composite everything in a fixed order.
//!
//! Rasterization stays behind the [`Surface`] trait; [`ImageSurface`] is the CPU
//! implementation.
//!
//! Frame outline:
//!
//! ```ignore
//! let mut render = |passes: &mut [Pass<ImageSurface>], _screen: &mut ImageSurface| {
//!     DrawOp::new(&tree).position(40.0, 12.0).render(&mut passes[0]);
//!     DrawOp::new(&heart).position(8.0, 8.0).render(&mut passes[1]);
//! };
//! draw_passes(&mut screen, &mut passes, &mut render);
//! ```
//!
//! Everything is single-threaded and frame-driven; cameras are shared through
//! [`SharedCamera`] (`Rc<RefCell<Camera>>`).

pub mod camera;
pub mod compositor;
pub mod coords;
pub mod draw;
pub mod logging;
pub mod pass;
pub mod queue;
pub mod surface;

#[cfg(test)]
mod testing;

pub use camera::{Camera, SharedCamera, MAX_BUFFER_DIMENSION, MIN_ZOOM};
pub use compositor::{draw_passes, LayerRenderable};
pub use coords::{Affine, Vec2};
pub use draw::{DrawOp, DrawOptions, Space};
pub use pass::Pass;
pub use queue::{Layer, QueuedRender, RenderCallback, RenderQueue};
pub use surface::{Filter, ImageSurface, LoadError, Surface};
