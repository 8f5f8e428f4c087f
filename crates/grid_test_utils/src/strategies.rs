//! Property-based testing strategies.

use proptest::prelude::*;

use grid_core::footprint::Footprint;
use grid_core::grid::GridCoordinate;

/// Strategy for grid coordinates within `[-range, range]` on both axes.
pub fn arb_coord(range: i32) -> impl Strategy<Value = GridCoordinate> {
    (-range..=range, -range..=range).prop_map(|(x, y)| GridCoordinate::new(x, y))
}

/// Strategy for footprints of 1 to 6 cells.
///
/// The anchor offset `(0, 0)` always comes first; the remaining offsets
/// are drawn from a small neighbourhood and deduplicated, preserving
/// generation order.
pub fn arb_footprint() -> impl Strategy<Value = Footprint> {
    proptest::collection::vec(arb_coord(2), 0..5).prop_map(|extra| {
        let mut offsets = vec![GridCoordinate::ZERO];
        offsets.extend(extra);
        Footprint::from_offsets(offsets)
    })
}

/// One step of a randomized register/unregister sequence.
#[derive(Debug, Clone)]
pub enum MapOp {
    /// Attempt to register the occupant (failure is a legal outcome).
    Register {
        /// Occupant id, drawn from a small pool so collisions happen.
        occupant: u64,
        /// Anchor to register at.
        anchor: GridCoordinate,
        /// Footprint to register with.
        footprint: Footprint,
    },
    /// Unregister the occupant (possibly never registered).
    Unregister {
        /// Occupant id.
        occupant: u64,
    },
}

/// Strategy for sequences of map operations.
///
/// Occupant ids are drawn from `0..occupants` so re-registration and
/// double-unregistration paths get exercised.
pub fn arb_op_sequence(occupants: u64, max_len: usize) -> impl Strategy<Value = Vec<MapOp>> {
    let op = prop_oneof![
        (0..occupants, arb_coord(5), arb_footprint()).prop_map(|(occupant, anchor, footprint)| {
            MapOp::Register {
                occupant,
                anchor,
                footprint,
            }
        }),
        (0..occupants).prop_map(|occupant| MapOp::Unregister { occupant }),
    ];
    proptest::collection::vec(op, 1..=max_len)
}
