//! Element footprints: the set of cells an element occupies.
//!
//! A footprint is an immutable list of cell offsets relative to the
//! element's anchor. Offset order is deterministic and preserved from
//! construction because the occupancy map's pre-flight check walks the
//! cells in exactly this order.

use serde::{Deserialize, Serialize};

use crate::grid::GridCoordinate;

/// Immutable set of cell offsets relative to an anchor at `(0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    offsets: Vec<GridCoordinate>,
}

impl Footprint {
    /// Footprint covering only the anchor cell.
    #[must_use]
    pub fn single() -> Self {
        Self {
            offsets: vec![GridCoordinate::ZERO],
        }
    }

    /// Rectangular footprint of `width x height` cells, anchored at the
    /// bottom-left corner, offsets in row-major order.
    #[must_use]
    pub fn rect(width: u32, height: u32) -> Self {
        let mut offsets = Vec::with_capacity((width as usize) * (height as usize));
        for dy in 0..height {
            for dx in 0..width {
                offsets.push(GridCoordinate::new(dx as i32, dy as i32));
            }
        }
        Self { offsets }
    }

    /// Footprint from an explicit offset list, preserving order.
    ///
    /// Duplicate offsets are dropped (keeping the first occurrence) so a
    /// cell is never counted twice against its capacity.
    #[must_use]
    pub fn from_offsets(offsets: impl IntoIterator<Item = GridCoordinate>) -> Self {
        let mut unique = Vec::new();
        for offset in offsets {
            if !unique.contains(&offset) {
                unique.push(offset);
            }
        }
        Self { offsets: unique }
    }

    /// The offsets in definition order.
    #[must_use]
    pub fn offsets(&self) -> &[GridCoordinate] {
        &self.offsets
    }

    /// Number of cells this footprint covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the footprint covers no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Absolute cells covered when anchored at `anchor`, in definition
    /// order.
    pub fn cells_for(&self, anchor: GridCoordinate) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.offsets.iter().map(move |offset| anchor.offset_by(*offset))
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::single()
    }
}
