//! Per-frame render queue.
//!
//! Responsibilities:
//! - collect draw ops and callbacks tagged with a [`Layer`]
//! - keep them in commit order (ascending layer, insertion order within a layer)
//! - commit everything exactly once per flush, then start empty

mod layer;
mod render_queue;

pub use layer::Layer;
pub use render_queue::{QueuedRender, RenderCallback, RenderQueue};
