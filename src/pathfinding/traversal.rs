use super::ReachabilityEngine;
use crate::grid::TileId;

/// Committed path for one movement, stored as a stack
///
/// The destination is pushed first and the origin last, so the top of the
/// stack is the tile nearest the unit. Waypoints are peeked while the unit
/// travels toward them and popped once reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalSequence {
    stack: Vec<TileId>,
}

impl TraversalSequence {
    /// Walk parent pointers from `destination` back to the search origin
    ///
    /// Returns `None` if the destination is not part of the engine's current
    /// selectable set.
    pub fn build(engine: &ReachabilityEngine, destination: TileId) -> Option<Self> {
        if !engine.is_selectable(destination) {
            return None;
        }

        let mut stack = Vec::new();
        let mut next = Some(destination);
        while let Some(id) = next {
            stack.push(id);
            next = engine.parent(id);
        }

        Some(Self { stack })
    }

    /// Waypoint currently being approached
    pub fn peek(&self) -> Option<TileId> {
        self.stack.last().copied()
    }

    pub fn pop(&mut self) -> Option<TileId> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Final tile of the path, if any remain
    pub fn destination(&self) -> Option<TileId> {
        self.stack.first().copied()
    }

    /// Remaining waypoints in the order the unit will visit them
    pub fn waypoints(&self) -> impl Iterator<Item = TileId> + '_ {
        self.stack.iter().rev().copied()
    }
}

impl FromIterator<TileId> for TraversalSequence {
    /// Collect waypoints given in travel order
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        let mut stack: Vec<TileId> = iter.into_iter().collect();
        stack.reverse();
        Self { stack }
    }
}
