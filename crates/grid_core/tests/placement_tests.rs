//! Occupancy map scenario and property tests.

use grid_core::prelude::*;
use grid_test_utils::consistency::assert_map_consistent;
use grid_test_utils::fixtures::{test_config, vec2};
use grid_test_utils::proptest::prelude::*;
use grid_test_utils::strategies::{arb_op_sequence, MapOp};

fn map_with_capacity(capacity: usize) -> OccupancyMap {
    OccupancyMap::new(test_config(1, 100), capacity, LayerOrder::LastOnTop)
}

#[test]
fn simple_success_scenario() {
    // Capacity 1, single-cell footprint at (2, 3).
    let mut map = map_with_capacity(1);
    let footprint = Footprint::single();
    let anchor = GridCoordinate::new(2, 3);

    map.register(OccupantId(1), &footprint, anchor)
        .expect("free cell accepts the occupant");
    assert!(map.has_any_occupants(map.config().grid_to_world(anchor)));

    let second = map.register(OccupantId(2), &footprint, anchor);
    assert_eq!(second, Err(GridError::CellOccupied { coord: anchor }));

    // Map still shows only the first occupant at (2, 3).
    let pos = map.config().grid_to_world(anchor);
    assert_eq!(map.occupants_at(pos), &[OccupantId(1)]);
    assert_map_consistent(&map);
}

#[test]
fn multi_cell_atomic_failure_scenario() {
    // Footprint {(0,0), (1,0)}: (5,5) free, (6,5) occupied.
    let mut map = map_with_capacity(1);
    let blocker = GridCoordinate::new(6, 5);
    map.register(OccupantId(9), &Footprint::single(), blocker)
        .unwrap();

    let footprint = Footprint::from_offsets([GridCoordinate::ZERO, GridCoordinate::new(1, 0)]);
    let result = map.register(OccupantId(1), &footprint, GridCoordinate::new(5, 5));
    assert_eq!(result, Err(GridError::CellOccupied { coord: blocker }));

    // No partial commit: (5, 5) stayed empty and the occupant has no
    // reverse-index entry.
    assert!(!map.has_any_occupants(map.config().grid_to_world(GridCoordinate::new(5, 5))));
    assert_eq!(map.cells_of(OccupantId(1)), None);
    assert_map_consistent(&map);
}

#[test]
fn atomicity_with_larger_footprints() {
    let mut map = map_with_capacity(1);
    let footprint = Footprint::rect(3, 3);

    // Block one cell in the middle of the target area.
    map.register(OccupantId(9), &Footprint::single(), GridCoordinate::new(1, 1))
        .unwrap();

    assert!(map
        .register(OccupantId(1), &footprint, GridCoordinate::ZERO)
        .is_err());

    // All eight other target cells report unchanged (empty) lists.
    for coord in footprint.cells_for(GridCoordinate::ZERO) {
        let pos = map.config().grid_to_world(coord);
        if coord == GridCoordinate::new(1, 1) {
            assert_eq!(map.occupants_at(pos), &[OccupantId(9)]);
        } else {
            assert!(map.occupants_at(pos).is_empty());
        }
    }
    assert_map_consistent(&map);
}

#[test]
fn unregister_twice_has_no_second_effect() {
    let mut map = map_with_capacity(2);
    let footprint = Footprint::rect(2, 1);
    map.register(OccupantId(1), &footprint, GridCoordinate::ZERO)
        .unwrap();
    map.register(OccupantId(2), &footprint, GridCoordinate::ZERO)
        .unwrap();

    assert_eq!(map.unregister(OccupantId(1)), 2);
    let counts_after_first: Vec<_> = footprint
        .cells_for(GridCoordinate::ZERO)
        .map(|c| map.count_at(map.config().grid_to_world(c)))
        .collect();

    // Second unregister: no error, no double-decrement.
    assert_eq!(map.unregister(OccupantId(1)), 0);
    let counts_after_second: Vec<_> = footprint
        .cells_for(GridCoordinate::ZERO)
        .map(|c| map.count_at(map.config().grid_to_world(c)))
        .collect();
    assert_eq!(counts_after_first, counts_after_second);
    assert_map_consistent(&map);
}

#[test]
fn world_queries_treat_absent_cells_as_free() {
    let map = map_with_capacity(1);
    let pos = vec2(42, -17);
    assert!(!map.has_any_occupants(pos));
    assert!(!map.has_reached_max_occupancy(pos));
    assert_eq!(map.count_at(pos), 0);
    assert_eq!(map.peek_top_at(pos), None);
}

#[test]
fn overlapping_footprints_share_cells_up_to_capacity() {
    let mut map = map_with_capacity(2);
    let horizontal = Footprint::rect(2, 1);
    let vertical = Footprint::from_offsets([GridCoordinate::ZERO, GridCoordinate::new(0, 1)]);

    map.register(OccupantId(1), &horizontal, GridCoordinate::ZERO)
        .unwrap();
    map.register(OccupantId(2), &vertical, GridCoordinate::ZERO)
        .unwrap();

    let shared = map.config().grid_to_world(GridCoordinate::ZERO);
    assert_eq!(map.occupants_at(shared), &[OccupantId(1), OccupantId(2)]);
    assert!(map.has_reached_max_occupancy(shared));

    // The shared cell is now full, so a third overlap fails atomically.
    assert!(map
        .register(OccupantId(3), &Footprint::single(), GridCoordinate::ZERO)
        .is_err());
    assert_map_consistent(&map);
}

proptest! {
    /// Randomized register/unregister sequences never violate the
    /// per-cell capacity bound or the bidirectional index invariant.
    #[test]
    fn random_sequences_preserve_invariants(
        ops in arb_op_sequence(8, 40),
        capacity in 1_usize..=3,
    ) {
        let mut map = map_with_capacity(capacity);
        for op in ops {
            match op {
                MapOp::Register { occupant, anchor, footprint } => {
                    // Failure (occupied or already registered) is a
                    // legal outcome; the invariants must hold either way.
                    let _ = map.register(OccupantId(occupant), &footprint, anchor);
                }
                MapOp::Unregister { occupant } => {
                    map.unregister(OccupantId(occupant));
                }
            }
            assert_map_consistent(&map);
        }
    }

    /// A failed registration is never partially observable.
    #[test]
    fn failed_register_changes_nothing(
        anchor in grid_test_utils::strategies::arb_coord(5),
        footprint in grid_test_utils::strategies::arb_footprint(),
    ) {
        let mut map = map_with_capacity(1);
        // Fill the anchor cell so the footprint (which always covers its
        // anchor) must fail.
        map.register(OccupantId(99), &Footprint::single(), anchor).unwrap();

        let before: Vec<_> = footprint
            .cells_for(anchor)
            .map(|c| map.occupants_at(map.config().grid_to_world(c)).to_vec())
            .collect();

        prop_assert!(map.register(OccupantId(1), &footprint, anchor).is_err());

        let after: Vec<_> = footprint
            .cells_for(anchor)
            .map(|c| map.occupants_at(map.config().grid_to_world(c)).to_vec())
            .collect();
        prop_assert_eq!(before, after);
        prop_assert!(!map.contains_occupant(OccupantId(1)));
    }

    /// Register followed by unregister restores the empty map.
    #[test]
    fn register_unregister_roundtrip(
        anchor in grid_test_utils::strategies::arb_coord(5),
        footprint in grid_test_utils::strategies::arb_footprint(),
    ) {
        let mut map = map_with_capacity(3);
        map.register(OccupantId(1), &footprint, anchor).unwrap();
        prop_assert_eq!(map.unregister(OccupantId(1)), footprint.len());
        prop_assert!(map.all_cells().is_empty());
        prop_assert_eq!(map.occupant_count(), 0);
    }
}
