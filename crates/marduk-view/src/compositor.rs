//! Multi-pass compositing onto the final screen.

use crate::coords::Affine;
use crate::pass::Pass;
use crate::surface::{Filter, Surface};

/// Application hook invoked once per composite, between clearing the passes and
/// compositing them. Issue this frame's draws (or queue flushes) here.
pub trait LayerRenderable<S> {
    fn layer_render(&mut self, passes: &mut [Pass<S>], screen: &mut S);
}

impl<S, F> LayerRenderable<S> for F
where
    F: FnMut(&mut [Pass<S>], &mut S),
{
    fn layer_render(&mut self, passes: &mut [Pass<S>], screen: &mut S) {
        self(passes, screen);
    }
}

/// Clears every pass, lets `renderable` draw, then composites the pass surfaces onto
/// `screen` in slice order (first pass at the bottom).
///
/// If any pass has no surface the whole frame is skipped: nothing is cleared, the
/// renderable is not called, and `false` is returned.
pub fn draw_passes<S, R>(screen: &mut S, passes: &mut [Pass<S>], renderable: &mut R) -> bool
where
    S: Surface,
    R: LayerRenderable<S> + ?Sized,
{
    if let Some(index) = passes.iter().position(|p| !p.has_surface()) {
        log::debug!("pass {index} has no surface; skipping composite");
        return false;
    }

    for pass in passes.iter_mut() {
        pass.clear();
    }

    renderable.layer_render(passes, screen);

    for pass in passes.iter() {
        if let Some(surface) = pass.surface() {
            screen.draw_image(surface, Affine::identity(), Filter::Nearest);
        }
    }

    true
}
