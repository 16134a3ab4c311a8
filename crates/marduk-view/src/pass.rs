//! Render passes: one drawing surface per visual layer ("world", "ui", ...).

use std::cell::Ref;
use std::rc::Rc;

use crate::camera::{Camera, SharedCamera};
use crate::coords::Affine;
use crate::queue::RenderQueue;
use crate::surface::{Filter, Surface};

/// A drawing surface bound to a camera.
///
/// World passes apply the camera's transform at draw time, reading the camera as it
/// is *then*; canvas passes draw in screen pixels and ignore the camera.
#[derive(Debug)]
pub struct Pass<S> {
    surface: Option<S>,
    camera: SharedCamera,
    canvas: bool,
}

impl<S: Surface> Pass<S> {
    /// Camera-relative pass with a surface sized to the camera viewport.
    pub fn world(camera: &SharedCamera) -> Self {
        Self::with_mode(camera, false)
    }

    /// Screen-space pass with a surface sized to the camera viewport.
    pub fn canvas(camera: &SharedCamera) -> Self {
        Self::with_mode(camera, true)
    }

    fn with_mode(camera: &SharedCamera, canvas: bool) -> Self {
        let (w, h) = camera.borrow().viewport();
        Self {
            surface: Some(S::with_size(w, h)),
            camera: Rc::clone(camera),
            canvas,
        }
    }

    #[inline]
    pub fn is_canvas(&self) -> bool {
        self.canvas
    }

    /// Borrow of the bound camera.
    ///
    /// # Panics
    /// Panics if the camera is mutably borrowed elsewhere.
    pub fn camera(&self) -> Ref<'_, Camera> {
        self.camera.borrow()
    }

    #[inline]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    #[inline]
    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    #[inline]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Detaches the surface; the pass draws nothing until one is bound again.
    pub fn take_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Binds `surface` as this frame's drawing target and returns the previous one.
    ///
    /// Call before any draw of the frame, e.g. to draw straight onto the screen.
    pub fn prepare(&mut self, surface: S) -> Option<S> {
        self.surface.replace(surface)
    }

    /// Rebinds the camera and reallocates the surface at its viewport size.
    pub fn update_camera(&mut self, camera: &SharedCamera) {
        let (w, h) = camera.borrow().viewport();
        self.camera = Rc::clone(camera);
        self.surface = Some(S::with_size(w, h));
    }

    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    /// Composites `image` with `transform`; world passes append the camera transform.
    pub fn draw(&mut self, image: &S, transform: Affine, filter: Filter) {
        let Some(surface) = self.surface.as_mut() else {
            log::trace!("draw on a pass without a surface ignored");
            return;
        };

        let transform = if self.canvas {
            transform
        } else {
            transform.then(self.camera.borrow().transform())
        };
        surface.draw_image(image, transform, filter);
    }

    /// Flushes `queue` onto this pass's surface using this pass's camera.
    ///
    /// On a canvas pass every draw op lands in screen space, whatever its own
    /// [`Space`](crate::Space). Returns the number of committed entries. Without a
    /// surface the queue is still drained so nothing leaks into the next frame.
    pub fn flush(&mut self, queue: &mut RenderQueue<'_, S>) -> usize {
        match self.surface.as_mut() {
            Some(surface) if self.canvas => queue.flush_canvas(surface, &self.camera.borrow()),
            Some(surface) => queue.flush(surface, &self.camera.borrow()),
            None => {
                queue.clear();
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::draw::DrawOp;
    use crate::testing::RecordingSurface;

    fn camera() -> SharedCamera {
        Camera::new(200, 100, 0.0, 0.0, 1.0).shared()
    }

    fn screen_pos(pass: &Pass<RecordingSurface>) -> Vec2 {
        pass.surface().unwrap().last_transform().apply(Vec2::zero())
    }

    #[test]
    fn new_passes_allocate_viewport_surfaces() {
        let cam = camera();
        let world: Pass<RecordingSurface> = Pass::world(&cam);
        let canvas: Pass<RecordingSurface> = Pass::canvas(&cam);

        assert!(!world.is_canvas());
        assert!(canvas.is_canvas());
        assert_eq!(world.surface().unwrap().size(), (200, 100));
        assert_eq!(canvas.surface().unwrap().size(), (200, 100));
    }

    // ── canvas vs world ───────────────────────────────────────────────────

    #[test]
    fn canvas_pass_ignores_camera_state() {
        let cam = camera();
        let sprite = RecordingSurface::sprite(1, 8, 8);
        let mut pass = Pass::canvas(&cam);

        DrawOp::new(&sprite).position(10.0, 10.0).render(&mut pass);
        let before = screen_pos(&pass);

        cam.borrow_mut().move_by(50.0, -30.0).set_zoom(3.0);
        DrawOp::new(&sprite).position(10.0, 10.0).render(&mut pass);

        assert_eq!(before, Vec2::new(10.0, 10.0));
        assert_eq!(screen_pos(&pass), before);
    }

    #[test]
    fn world_pass_shifts_opposite_to_camera_motion() {
        let cam = camera();
        cam.borrow_mut().set_zoom(2.0);
        let sprite = RecordingSurface::sprite(1, 8, 8);
        let mut pass = Pass::world(&cam);

        DrawOp::new(&sprite).position(10.0, 10.0).render(&mut pass);
        let before = screen_pos(&pass);

        let (dx, dy) = (6.0, -4.0);
        cam.borrow_mut().move_by(dx, dy);
        DrawOp::new(&sprite).position(10.0, 10.0).render(&mut pass);
        let after = screen_pos(&pass);

        assert_eq!(after - before, Vec2::new(-dx * 2.0, -dy * 2.0));
    }

    #[test]
    fn world_pass_reads_camera_live() {
        let cam = camera();
        let sprite = RecordingSurface::sprite(1, 8, 8);
        let mut pass = Pass::world(&cam);

        // Camera changes after the pass was created are visible at draw time.
        cam.borrow_mut().set_position(100.0, 50.0);
        DrawOp::new(&sprite).position(100.0, 50.0).render(&mut pass);

        assert_eq!(screen_pos(&pass), cam.borrow().center());
    }

    // ── surface lifecycle ─────────────────────────────────────────────────

    #[test]
    fn prepare_swaps_target() {
        let cam = camera();
        let mut pass: Pass<RecordingSurface> = Pass::canvas(&cam);
        let previous = pass.prepare(RecordingSurface::sprite(9, 50, 50));

        assert_eq!(previous.map(|s| s.size), Some((200, 100)));
        assert_eq!(pass.surface().map(|s| s.id), Some(9));
    }

    #[test]
    fn update_camera_reallocates_at_new_viewport() {
        let cam = camera();
        let mut pass: Pass<RecordingSurface> = Pass::world(&cam);
        let bigger = Camera::new(640, 480, 0.0, 0.0, 1.0).shared();

        pass.update_camera(&bigger);

        assert_eq!(pass.surface().unwrap().size(), (640, 480));
        assert_eq!(pass.camera().viewport(), (640, 480));
    }

    #[test]
    fn draw_without_surface_is_a_no_op() {
        let cam = camera();
        let sprite = RecordingSurface::sprite(1, 8, 8);
        let mut pass = Pass::world(&cam);
        assert!(pass.take_surface().is_some());

        DrawOp::new(&sprite).render(&mut pass);
        pass.clear();

        assert!(!pass.has_surface());
    }

    #[test]
    fn world_flush_uses_pass_camera() {
        let cam = Camera::new(100, 100, 20.0, 0.0, 1.0).shared();
        let sprite = RecordingSurface::sprite(4, 8, 8);
        let mut pass = Pass::world(&cam);
        let mut queue = RenderQueue::new();

        queue.enqueue_draw(DrawOp::new(&sprite).position(20.0, 0.0), 0);
        assert_eq!(pass.flush(&mut queue), 1);

        assert!(queue.is_empty());
        assert_eq!(screen_pos(&pass), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn canvas_flush_ignores_pass_camera() {
        let cam = Camera::new(100, 100, 20.0, 0.0, 3.0).shared();
        let sprite = RecordingSurface::sprite(4, 8, 8);
        let mut pass = Pass::canvas(&cam);
        let mut queue = RenderQueue::new();

        queue.enqueue_draw(DrawOp::new(&sprite).position(10.0, 10.0), 0);
        assert_eq!(pass.flush(&mut queue), 1);

        assert!(queue.is_empty());
        assert_eq!(screen_pos(&pass), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn flush_without_surface_still_drains() {
        let cam = camera();
        let sprite = RecordingSurface::sprite(4, 8, 8);
        let mut pass: Pass<RecordingSurface> = Pass::world(&cam);
        let _ = pass.take_surface();
        let mut queue = RenderQueue::new();
        queue.enqueue_draw(DrawOp::new(&sprite), 0);

        assert_eq!(pass.flush(&mut queue), 0);
        assert!(queue.is_empty());
    }
}
