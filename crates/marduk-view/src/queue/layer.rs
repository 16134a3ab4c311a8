/// Position of an entry in a [`RenderQueue`](super::RenderQueue) flush.
///
/// A flush commits ascending layers, so later (higher) layers paint over earlier
/// ones on the same target. Entries sharing a layer commit in the order they were
/// enqueued. Layers only order entries inside one queue; pass order decides what
/// ends up on top across passes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Layer(pub i32);

impl From<i32> for Layer {
    #[inline]
    fn from(layer: i32) -> Self {
        Layer(layer)
    }
}
