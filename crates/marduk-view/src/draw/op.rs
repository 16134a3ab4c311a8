use crate::camera::Camera;
use crate::coords::{Affine, Vec2};
use crate::pass::Pass;
use crate::surface::{Filter, Surface};

use super::{DrawOptions, Space};

/// One sprite draw: a borrowed image plus its placement.
///
/// Built with chained setters and consumed by exactly one of [`render`](Self::render),
/// [`commit`](Self::commit), or [`RenderQueue::enqueue_draw`](crate::RenderQueue::enqueue_draw).
///
/// ```ignore
/// DrawOp::new(&ship)
///     .center_origin()
///     .position(player.x, player.y)
///     .rotation(player.heading)
///     .render(&mut world_pass);
/// ```
#[derive(Debug)]
#[must_use = "a DrawOp does nothing until it is rendered, committed or queued"]
pub struct DrawOp<'a, S> {
    image: &'a S,
    options: DrawOptions,
}

impl<'a, S: Surface> DrawOp<'a, S> {
    pub fn new(image: &'a S) -> Self {
        Self::with_options(image, DrawOptions::default())
    }

    pub fn with_options(image: &'a S, options: DrawOptions) -> Self {
        Self { image, options }
    }

    #[inline]
    pub fn image(&self) -> &'a S {
        self.image
    }

    #[inline]
    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.options.position = Vec2::new(x, y);
        self
    }

    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.options.origin = Vec2::new(x, y);
        self
    }

    /// Sets the origin to the image center (integer half of its size).
    pub fn center_origin(mut self) -> Self {
        let (w, h) = self.image.size();
        self.options.origin = Vec2::new((w / 2) as f32, (h / 2) as f32);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.options.scale = scale;
        self
    }

    pub fn rotation(mut self, radians: f32) -> Self {
        self.options.rotation = radians;
        self
    }

    pub fn skew(mut self, skew_x: f32, skew_y: f32) -> Self {
        self.options.skew = Vec2::new(skew_x, skew_y);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.options.filter = filter;
        self
    }

    /// Space used when the op is committed directly or through a queue.
    pub fn space(mut self, space: Space) -> Self {
        self.options.space = space;
        self
    }

    /// The sprite's own transform, before any camera.
    #[inline]
    pub fn transform(&self) -> Affine {
        self.options.transform()
    }

    /// Draws into `pass`; the pass decides whether its camera applies.
    pub fn render(self, pass: &mut Pass<S>) {
        pass.draw(self.image, self.transform(), self.options.filter);
    }

    /// Draws onto `target`, applying `camera` for world-space ops.
    pub fn commit(self, target: &mut S, camera: &Camera) {
        let local = self.transform();
        let transform = match self.options.space {
            Space::Canvas => local,
            Space::World => local.then(camera.transform()),
        };
        target.draw_image(self.image, transform, self.options.filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ImageSurface;
    use crate::testing::{Event, RecordingSurface};

    #[test]
    fn setters_fill_options() {
        let img = RecordingSurface::sprite(1, 16, 8);
        let op = DrawOp::new(&img)
            .position(3.0, 4.0)
            .origin(1.0, 2.0)
            .scale(0.5)
            .rotation(0.25)
            .skew(0.1, 0.2)
            .filter(Filter::Linear)
            .space(Space::Canvas);

        let o = op.options();
        assert_eq!(o.position, Vec2::new(3.0, 4.0));
        assert_eq!(o.origin, Vec2::new(1.0, 2.0));
        assert_eq!(o.scale, 0.5);
        assert_eq!(o.rotation, 0.25);
        assert_eq!(o.skew, Vec2::new(0.1, 0.2));
        assert_eq!(o.filter, Filter::Linear);
        assert_eq!(o.space, Space::Canvas);
    }

    #[test]
    fn center_origin_uses_integer_half_size() {
        let img = RecordingSurface::sprite(1, 15, 8);
        let op = DrawOp::new(&img).center_origin();
        assert_eq!(op.options().origin, Vec2::new(7.0, 4.0));
    }

    // ── commit ────────────────────────────────────────────────────────────

    #[test]
    fn canvas_commit_ignores_camera() {
        let img = RecordingSurface::sprite(7, 4, 4);
        let mut target = RecordingSurface::with_size(100, 100);
        let camera = Camera::new(100, 100, 40.0, -12.0, 3.0);

        DrawOp::new(&img).position(10.0, 20.0).space(Space::Canvas).commit(&mut target, &camera);

        assert_eq!(target.last_transform(), Affine::translation(10.0, 20.0));
        assert_eq!(target.blit_ids(), vec![7]);
    }

    #[test]
    fn world_commit_applies_camera() {
        let img = RecordingSurface::sprite(7, 4, 4);
        let mut target = RecordingSurface::with_size(100, 100);
        let camera = Camera::new(100, 100, 40.0, -12.0, 2.0);

        DrawOp::new(&img).position(10.0, 20.0).commit(&mut target, &camera);

        let at = target.last_transform().apply(Vec2::zero());
        assert_eq!(at, camera.world_to_screen(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn commit_forwards_filter() {
        let img = RecordingSurface::sprite(2, 1, 1);
        let mut target = RecordingSurface::with_size(10, 10);
        let camera = Camera::new(10, 10, 0.0, 0.0, 1.0);

        DrawOp::new(&img).filter(Filter::Linear).commit(&mut target, &camera);

        assert!(matches!(target.events[0], Event::Blit { filter: Filter::Linear, .. }));
    }

    #[test]
    fn world_commit_rasterizes_at_screen_position() {
        let sprite = ImageSurface::filled(1, 1, [0, 255, 0, 255]);
        let mut screen = ImageSurface::new(20, 20);
        let camera = Camera::new(20, 20, 5.0, 5.0, 1.0);

        // World (7, 8) is 2 right and 3 below the camera: screen (12, 13).
        DrawOp::new(&sprite).position(7.0, 8.0).commit(&mut screen, &camera);

        assert_eq!(screen.pixel(12, 13), Some([0, 255, 0, 255]));
        assert_eq!(screen.pixel(11, 13), Some([0, 0, 0, 0]));
    }
}
