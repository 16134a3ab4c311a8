//! Test doubles shared by the unit tests.

use crate::coords::Affine;
use crate::surface::{Filter, Surface};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    Clear,
    Blit { src: u32, transform: Affine, filter: Filter },
}

/// Surface that records what was done to it instead of rasterizing.
///
/// `id` identifies the surface when it is used as a blit source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordingSurface {
    pub id: u32,
    pub size: (u32, u32),
    pub events: Vec<Event>,
}

impl RecordingSurface {
    pub fn sprite(id: u32, width: u32, height: u32) -> Self {
        Self { id, size: (width, height), events: Vec::new() }
    }

    /// Blits as `(source id, transform)` in the order they happened.
    pub fn blits(&self) -> Vec<(u32, Affine)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Blit { src, transform, .. } => Some((*src, *transform)),
                Event::Clear => None,
            })
            .collect()
    }

    pub fn blit_ids(&self) -> Vec<u32> {
        self.blits().into_iter().map(|(id, _)| id).collect()
    }

    /// Last blit transform; panics when nothing was drawn.
    pub fn last_transform(&self) -> Affine {
        self.blits().last().map(|(_, t)| *t).unwrap()
    }

    pub fn clears(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Event::Clear)).count()
    }
}

impl Surface for RecordingSurface {
    fn with_size(width: u32, height: u32) -> Self {
        Self::sprite(0, width, height)
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self) {
        self.events.push(Event::Clear);
    }

    fn draw_image(&mut self, src: &Self, transform: Affine, filter: Filter) {
        self.events.push(Event::Blit { src: src.id, transform, filter });
    }
}
