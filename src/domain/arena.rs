//! Index arena for one nesting level of a mixed-operator expression
//!
//! The parser parses each parenthesized group on its own, then splices the
//! resulting node into the level in place of the segments it covers.

use std::ops::Range;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::node::GenreNode;
use crate::domain::segment::Segment;

/// Occupant of one position at a nesting level.
#[derive(Debug)]
pub enum Slot {
    /// Raw tokenizer output, not yet turned into a node
    Segment(Segment),
    /// A parenthesized group that has already been parsed
    Group(GenreNode),
}

/// Arena-backed list of the positions at one nesting level.
///
/// Parsed groups are spliced in by index: the slots a group replaces are
/// removed from the arena and the group takes their place in `order`.
#[derive(Debug)]
pub struct LevelArena {
    /// Arena storage for all slots of the level
    arena: Arena<Slot>,
    /// Left-to-right order of live slots
    order: Vec<Index>,
}

impl LevelArena {
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let mut arena = Arena::with_capacity(segments.len());
        let order = segments
            .into_iter()
            .map(|segment| arena.insert(Slot::Segment(segment)))
            .collect();
        Self { arena, order }
    }

    /// Replace the slots at `span` with a single parsed group.
    ///
    /// Positions after the span shift left; splice spans right to left to
    /// keep earlier positions valid.
    #[instrument(level = "trace", skip(self, group))]
    pub fn splice(&mut self, span: Range<usize>, group: GenreNode) {
        for &idx in &self.order[span.clone()] {
            self.arena.remove(idx);
        }
        let group_idx = self.arena.insert(Slot::Group(group));
        self.order.splice(span, [group_idx]);
    }

    /// Take the slots out in left-to-right order.
    pub fn into_slots(mut self) -> Vec<Slot> {
        self.order
            .iter()
            .filter_map(|&idx| self.arena.remove(idx))
            .collect()
    }
}
