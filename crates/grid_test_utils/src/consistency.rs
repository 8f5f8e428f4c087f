//! Occupancy-map consistency harness.
//!
//! Checks the cross-structure invariant: the reverse index and the cell
//! contents must agree bidirectionally, and no cell may exceed its
//! capacity. Tests call this after every mutation sequence.

use grid_core::occupancy::OccupancyMap;

/// Assert the bidirectional reverse-index/cell invariant.
///
/// - Every coordinate listed for an occupant holds that occupant.
/// - Every cell entry belongs to an occupant whose reverse-index set
///   lists that coordinate.
/// - No cell exceeds its capacity.
///
/// # Panics
///
/// Panics with a description of the first violation found.
pub fn assert_map_consistent(map: &OccupancyMap) {
    // Forward direction: reverse index -> cells.
    for (coord, cell) in map.all_cells() {
        assert!(
            cell.count() <= cell.capacity(),
            "cell {coord:?} exceeds capacity: {} > {}",
            cell.count(),
            cell.capacity(),
        );
        for occupant in cell.occupants() {
            let cells = map
                .cells_of(*occupant)
                .unwrap_or_else(|| panic!("cell {coord:?} holds unindexed occupant {occupant:?}"));
            assert!(
                cells.contains(coord),
                "cell {coord:?} holds {occupant:?} but its index set omits the coordinate",
            );
        }
    }

    // Reverse direction: every recorded coordinate actually holds the
    // occupant.
    for occupant in map.registered_occupants() {
        let cells = map.cells_of(occupant).expect("registration disappeared");
        for coord in cells {
            let cell = map.all_cells().get(coord).unwrap_or_else(|| {
                panic!("index for {occupant:?} lists {coord:?} but the cell is absent")
            });
            assert!(
                cell.contains(occupant),
                "index for {occupant:?} lists {coord:?} but the cell does not hold it",
            );
        }
    }
}
