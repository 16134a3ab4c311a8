//! Sprite draw operations.
//!
//! A [`DrawOp`] pairs a borrowed image with [`DrawOptions`]. The options are a
//! plain value; turning them into a transform is a pure function
//! ([`DrawOptions::transform`]), so an op can be inspected, copied or queued
//! without aliasing anything.

mod op;
mod options;

pub use op::DrawOp;
pub use options::{DrawOptions, Space};
