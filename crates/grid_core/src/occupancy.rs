//! The occupancy map: which occupant holds which cells.
//!
//! Cells are created lazily on first occupancy and dropped when they
//! empty, so an absent cell and an empty cell are interchangeable. A
//! reverse index records, per occupant, the anchor and the exact cell
//! list attributed to it; the index is authoritative for unregistration.
//!
//! Registration is all-or-nothing: a pre-flight pass checks every
//! footprint cell for capacity before any cell is mutated, so a partial
//! placement is never observable. The pre-flight commit split is safe
//! because all map mutations happen synchronously on one control thread;
//! that precondition must be preserved (e.g. behind a single mutex) if
//! the host ever goes concurrent.

use std::collections::HashMap;

use crate::cell::{LayerOrder, OccupancyCell};
use crate::element::OccupantId;
use crate::error::{GridError, Result};
use crate::footprint::Footprint;
use crate::grid::{GridConfig, GridCoordinate};
use crate::math::Vec2Fixed;

/// Reverse-index entry: where an occupant is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Registration {
    /// Anchor cell the occupant was registered at.
    anchor: GridCoordinate,
    /// Cells attributed to the occupant, in footprint order.
    cells: Vec<GridCoordinate>,
}

/// Registry of occupancy cells plus the occupant reverse index.
///
/// Owns the grid geometry so world-position queries can convert and
/// delegate in one step.
#[derive(Debug, Clone)]
pub struct OccupancyMap {
    config: GridConfig,
    cell_capacity: usize,
    layer_order: LayerOrder,
    cells: HashMap<GridCoordinate, OccupancyCell>,
    registrations: HashMap<OccupantId, Registration>,
}

impl OccupancyMap {
    /// Create an empty map.
    ///
    /// `cell_capacity` and `layer_order` apply to every lazily-created
    /// cell; production configurations use small capacities (1-3).
    #[must_use]
    pub fn new(config: GridConfig, cell_capacity: usize, layer_order: LayerOrder) -> Self {
        Self {
            config,
            cell_capacity,
            layer_order,
            cells: HashMap::new(),
            registrations: HashMap::new(),
        }
    }

    /// Grid geometry this map addresses cells with.
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Capacity applied to every cell.
    #[must_use]
    pub const fn cell_capacity(&self) -> usize {
        self.cell_capacity
    }

    /// Layering policy applied to every cell.
    #[must_use]
    pub const fn layer_order(&self) -> LayerOrder {
        self.layer_order
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register an occupant's footprint at `anchor`, all-or-nothing.
    ///
    /// On failure the map is left exactly as it was: the pre-flight pass
    /// checks every target cell before any cell is mutated.
    pub fn register(
        &mut self,
        occupant: OccupantId,
        footprint: &Footprint,
        anchor: GridCoordinate,
    ) -> Result<()> {
        if self.registrations.contains_key(&occupant) {
            return Err(GridError::AlreadyRegistered { occupant });
        }

        // Pre-flight: every footprint cell must be below capacity.
        let mut targets = Vec::with_capacity(footprint.len());
        for coord in footprint.cells_for(anchor) {
            if self.cells.get(&coord).is_some_and(OccupancyCell::is_full) {
                return Err(GridError::CellOccupied { coord });
            }
            targets.push(coord);
        }

        // Commit: cannot fail, every target was just verified and no
        // mutation can interleave on the single control thread.
        for coord in &targets {
            let cell = self
                .cells
                .entry(*coord)
                .or_insert_with(|| OccupancyCell::new(self.cell_capacity, self.layer_order));
            let added = cell.add(occupant);
            debug_assert!(added, "pre-flighted cell refused occupant");
        }

        self.registrations.insert(
            occupant,
            Registration {
                anchor,
                cells: targets,
            },
        );
        Ok(())
    }

    /// Remove an occupant from every cell attributed to it.
    ///
    /// The reverse index is authoritative (the occupant may have moved
    /// since registration, so the footprint is not recomputed). Returns
    /// the number of cells actually cleared; unknown occupants are a
    /// no-op returning 0, making repeated unregistration harmless.
    pub fn unregister(&mut self, occupant: OccupantId) -> usize {
        let Some(registration) = self.registrations.remove(&occupant) else {
            return 0;
        };

        let mut cleared = 0;
        for coord in &registration.cells {
            match self.cells.get_mut(coord) {
                Some(cell) if cell.contains(occupant) => {
                    cell.remove(occupant);
                    cleared += 1;
                    if cell.is_empty() {
                        self.cells.remove(coord);
                    }
                }
                _ => {
                    tracing::warn!(
                        ?occupant,
                        ?coord,
                        "reverse index listed a cell that did not hold the occupant"
                    );
                }
            }
        }
        cleared
    }

    /// Check whether a footprint fits at `anchor` without committing.
    ///
    /// Identical to `register`'s pre-flight pass; never mutates.
    #[must_use]
    pub fn can_place(&self, footprint: &Footprint, anchor: GridCoordinate) -> bool {
        footprint
            .cells_for(anchor)
            .all(|coord| !self.cells.get(&coord).is_some_and(OccupancyCell::is_full))
    }

    /// Validate a candidate drop position without committing.
    ///
    /// Bounds first, then the capacity pre-flight at the cell under
    /// `position`. Both failures are ordinary recoverable values; the
    /// drag controller decides the recovery.
    pub fn validate_placement(&self, footprint: &Footprint, position: Vec2Fixed) -> Result<()> {
        if !self.config.is_inside_bounds(position) {
            return Err(GridError::OutOfBounds { position });
        }
        let anchor = self.config.world_to_grid(position);
        for coord in footprint.cells_for(anchor) {
            if self.cells.get(&coord).is_some_and(OccupancyCell::is_full) {
                return Err(GridError::CellOccupied { coord });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Occupant queries
    // ------------------------------------------------------------------------

    /// Whether the occupant has a live registration.
    #[must_use]
    pub fn contains_occupant(&self, occupant: OccupantId) -> bool {
        self.registrations.contains_key(&occupant)
    }

    /// Anchor the occupant was registered at, if registered.
    #[must_use]
    pub fn anchor_of(&self, occupant: OccupantId) -> Option<GridCoordinate> {
        self.registrations.get(&occupant).map(|r| r.anchor)
    }

    /// Cells attributed to the occupant, in footprint order.
    #[must_use]
    pub fn cells_of(&self, occupant: OccupantId) -> Option<&[GridCoordinate]> {
        self.registrations.get(&occupant).map(|r| r.cells.as_slice())
    }

    /// Number of occupants with a live registration.
    #[must_use]
    pub fn occupant_count(&self) -> usize {
        self.registrations.len()
    }

    // ------------------------------------------------------------------------
    // World-position queries
    // ------------------------------------------------------------------------

    /// Whether the cell under a world position holds any occupant.
    #[must_use]
    pub fn has_any_occupants(&self, position: Vec2Fixed) -> bool {
        self.cell_at(position).is_some_and(|c| !c.is_empty())
    }

    /// Whether the cell under a world position is at capacity.
    #[must_use]
    pub fn has_reached_max_occupancy(&self, position: Vec2Fixed) -> bool {
        self.cell_at(position).is_some_and(OccupancyCell::is_full)
    }

    /// Occupants in the cell under a world position, insertion order.
    #[must_use]
    pub fn occupants_at(&self, position: Vec2Fixed) -> &[OccupantId] {
        self.cell_at(position).map_or(&[], OccupancyCell::occupants)
    }

    /// Top occupant (per layering policy) under a world position.
    #[must_use]
    pub fn peek_top_at(&self, position: Vec2Fixed) -> Option<OccupantId> {
        self.cell_at(position).and_then(OccupancyCell::peek_top)
    }

    /// Occupant count in the cell under a world position.
    #[must_use]
    pub fn count_at(&self, position: Vec2Fixed) -> usize {
        self.cell_at(position).map_or(0, OccupancyCell::count)
    }

    fn cell_at(&self, position: Vec2Fixed) -> Option<&OccupancyCell> {
        self.cells.get(&self.config.world_to_grid(position))
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    /// Read-only view of every live cell, for occupancy overlays.
    ///
    /// Empty cells may be absent; treat absence as empty.
    #[must_use]
    pub fn all_cells(&self) -> &HashMap<GridCoordinate, OccupancyCell> {
        &self.cells
    }

    /// Every occupant with a live registration, in no particular order.
    pub fn registered_occupants(&self) -> impl Iterator<Item = OccupantId> + '_ {
        self.registrations.keys().copied()
    }
}
