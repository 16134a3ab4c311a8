use core::fmt;

use crate::camera::Camera;
use crate::draw::{DrawOp, Space};
use crate::surface::Surface;

use super::Layer;

/// Deferred screen-mutating function, run with the flush target and camera.
pub type RenderCallback<'a, S> = Box<dyn FnOnce(&mut S, &Camera) + 'a>;

/// What a queue entry does when committed.
pub enum QueuedRender<'a, S> {
    Draw(DrawOp<'a, S>),
    Callback(RenderCallback<'a, S>),
}

struct Entry<'a, S> {
    layer: Layer,
    render: QueuedRender<'a, S>,
}

/// Ordered list of pending renders for one frame.
///
/// Entries are kept sorted on insertion: ascending [`Layer`], and insertion order
/// among equal layers. [`flush`](Self::flush) commits them in that order and leaves
/// the queue empty.
///
/// The queue borrows sprite images for `'a`; build one per frame or keep the images
/// alive for as long as the queue.
pub struct RenderQueue<'a, S> {
    entries: Vec<Entry<'a, S>>,
}

impl<S> Default for RenderQueue<'_, S> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<S> fmt::Debug for RenderQueue<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderQueue")
            .field("layers", &self.entries.iter().map(|e| e.layer.0).collect::<Vec<_>>())
            .finish()
    }
}

impl<'a, S: Surface> RenderQueue<'a, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layers of the pending entries, in commit order.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.entries.iter().map(|e| e.layer)
    }

    /// Drops every pending entry without committing it.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Queues a draw op. Its [`Space`](crate::Space) decides whether the camera applies.
    pub fn enqueue_draw(&mut self, op: DrawOp<'a, S>, layer: impl Into<Layer>) {
        self.insert(layer.into(), QueuedRender::Draw(op));
    }

    /// Queues an arbitrary callback in the same ordering stream as draw ops.
    pub fn enqueue_callback<F>(&mut self, callback: F, layer: impl Into<Layer>)
    where
        F: FnOnce(&mut S, &Camera) + 'a,
    {
        self.insert(layer.into(), QueuedRender::Callback(Box::new(callback)));
    }

    fn insert(&mut self, layer: Layer, render: QueuedRender<'a, S>) {
        // After the last entry with an equal or lower layer: keeps ties in insertion order.
        let at = self.entries.partition_point(|e| e.layer <= layer);
        self.entries.insert(at, Entry { layer, render });
    }

    /// Clears `target`, commits every entry in order, and empties the queue.
    ///
    /// Returns the number of committed entries.
    pub fn flush(&mut self, target: &mut S, camera: &Camera) -> usize {
        self.commit_all(target, camera, None)
    }

    /// Like [`flush`](Self::flush), but every draw op commits in screen space
    /// regardless of its own [`Space`]. Callbacks still receive `camera`.
    pub fn flush_canvas(&mut self, target: &mut S, camera: &Camera) -> usize {
        self.commit_all(target, camera, Some(Space::Canvas))
    }

    fn commit_all(&mut self, target: &mut S, camera: &Camera, space: Option<Space>) -> usize {
        target.clear();

        let committed = self.entries.len();
        for entry in self.entries.drain(..) {
            match entry.render {
                QueuedRender::Draw(op) => match space {
                    Some(space) => op.space(space).commit(target, camera),
                    None => op.commit(target, camera),
                },
                QueuedRender::Callback(callback) => callback(target, camera),
            }
        }

        log::trace!("render queue flushed {committed} entries");
        committed
    }
}
