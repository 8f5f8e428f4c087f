//! Per-coordinate occupancy cells.
//!
//! A cell is a bounded, insertion-ordered list of occupant handles. Both
//! layering policies append on insert; the policy only decides which end
//! is read as "top" when peeking.

use serde::{Deserialize, Serialize};

use crate::element::OccupantId;

/// Which end of the insertion-ordered occupant list counts as "top".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayerOrder {
    /// The earliest-inserted occupant is on top.
    FirstOnTop,
    /// The latest-inserted occupant is on top.
    #[default]
    LastOnTop,
}

/// Bounded, ordered occupant list for one grid coordinate.
///
/// Invariant: `count() <= capacity()` at all times. An absent cell and an
/// empty cell are equivalent from a caller's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyCell {
    occupants: Vec<OccupantId>,
    capacity: usize,
    order: LayerOrder,
}

impl OccupancyCell {
    /// Create an empty cell with the given capacity and layering policy.
    #[must_use]
    pub fn new(capacity: usize, order: LayerOrder) -> Self {
        Self {
            occupants: Vec::with_capacity(capacity.min(4)),
            capacity,
            order,
        }
    }

    /// Append an occupant.
    ///
    /// Returns `false` without any side effect when the cell is at
    /// capacity. The occupancy map's all-or-nothing registration relies
    /// on failure here being observation-free.
    pub fn add(&mut self, occupant: OccupantId) -> bool {
        if self.is_full() {
            return false;
        }
        self.occupants.push(occupant);
        true
    }

    /// Remove the first matching occupant entry; no-op when absent.
    pub fn remove(&mut self, occupant: OccupantId) {
        if let Some(index) = self.occupants.iter().position(|o| *o == occupant) {
            self.occupants.remove(index);
        }
    }

    /// Whether the cell holds the given occupant.
    #[must_use]
    pub fn contains(&self, occupant: OccupantId) -> bool {
        self.occupants.contains(&occupant)
    }

    /// Number of occupants currently in the cell.
    #[must_use]
    pub fn count(&self) -> usize {
        self.occupants.len()
    }

    /// Maximum number of occupants the cell may hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the cell has reached its capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity
    }

    /// Whether the cell holds no occupants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// The occupant considered "top" under this cell's layering policy.
    #[must_use]
    pub fn peek_top(&self) -> Option<OccupantId> {
        match self.order {
            LayerOrder::FirstOnTop => self.occupants.first().copied(),
            LayerOrder::LastOnTop => self.occupants.last().copied(),
        }
    }

    /// All occupants in insertion order.
    #[must_use]
    pub fn occupants(&self) -> &[OccupantId] {
        &self.occupants
    }
}
