//! Virtual 2D camera.
//!
//! World → screen mapping:
//!
//! ```text
//! screen = (world - position) * zoom + viewport / 2
//! ```
//!
//! The camera is shared by passes through [`SharedCamera`]; passes only read it,
//! and they read it live at draw time.

use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::{Affine, Vec2};

/// Lowest zoom the camera accepts. Anything at or below is clamped here.
pub const MIN_ZOOM: f32 = 0.01;

/// Largest off-screen buffer edge (texture size limit on common GPUs).
pub const MAX_BUFFER_DIMENSION: u32 = 16384;

/// Shared, single-threaded camera handle. Passes hold one and never mutate through it.
pub type SharedCamera = Rc<RefCell<Camera>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec2,
    zoom: f32,
    width: u32,
    height: u32,
    /// Size of the camera's off-screen buffer in world units (`viewport / zoom`).
    buffer_size: (u32, u32),
}

impl Camera {
    /// Creates a camera with a `width` x `height` viewport looking at `(x, y)`.
    pub fn new(width: u32, height: u32, x: f32, y: f32, zoom: f32) -> Self {
        let mut camera = Self {
            position: Vec2::new(x, y),
            zoom: clamp_zoom(zoom),
            width,
            height,
            buffer_size: (width, height),
        };
        camera.resize(width, height);
        camera
    }

    /// Wraps the camera in a [`SharedCamera`] handle.
    pub fn shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Viewport size as `(width, height)`.
    #[inline]
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn buffer_size(&self) -> (u32, u32) {
        self.buffer_size
    }

    /// Looks at `(x, y)`.
    pub fn set_position(&mut self, x: f32, y: f32) -> &mut Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Moves by `(dx, dy)` relative to the current position.
    pub fn move_by(&mut self, dx: f32, dy: f32) -> &mut Self {
        self.position = self.position + Vec2::new(dx, dy);
        self
    }

    pub fn set_zoom(&mut self, zoom: f32) -> &mut Self {
        self.zoom = clamp_zoom(zoom);
        self.resize(self.width, self.height)
    }

    /// Multiplies the current zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f32) -> &mut Self {
        self.zoom = clamp_zoom(self.zoom * factor);
        self.resize(self.width, self.height)
    }

    /// Sets the viewport and recomputes the off-screen buffer size.
    ///
    /// When the buffer would exceed [`MAX_BUFFER_DIMENSION`] on either axis, the
    /// previous buffer size is kept.
    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.width = width;
        self.height = height;

        let buffer_w = (width as f32 / self.zoom) as u32;
        let buffer_h = (height as f32 / self.zoom) as u32;
        if buffer_w <= MAX_BUFFER_DIMENSION && buffer_h <= MAX_BUFFER_DIMENSION {
            self.buffer_size = (buffer_w, buffer_h);
        } else {
            log::debug!(
                "camera buffer resize to {buffer_w}x{buffer_h} skipped (limit {MAX_BUFFER_DIMENSION})"
            );
        }
        self
    }

    /// Half the viewport size.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom + self.center()
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.center()) / self.zoom + self.position
    }

    /// World-to-view transform: scale by zoom, move to the viewport center, then
    /// offset by the zoomed camera position.
    pub fn transform(&self) -> Affine {
        let center = self.center();
        Affine::identity()
            .scale(self.zoom, self.zoom)
            .translate(center.x, center.y)
            .translate(-self.position.x * self.zoom, -self.position.y * self.zoom)
    }

    /// Translation placing world point `at` relative to the center of the camera's
    /// off-screen buffer (unzoomed; the buffer is already `viewport / zoom` large).
    pub fn buffer_translation(&self, at: Vec2) -> Affine {
        let (w, h) = self.buffer_size;
        Affine::translation(w as f32 / 2.0, h as f32 / 2.0).translate_by(at - self.position)
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    // Written as a negated comparison so NaN also clamps.
    if !(zoom > MIN_ZOOM) { MIN_ZOOM } else { zoom }
}
