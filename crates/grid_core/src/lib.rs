//! # Grid Core
//!
//! Grid occupancy and drag placement core.
//!
//! Places discrete multi-cell elements onto a bounded 2D grid, tracks
//! which cells each element occupies, enforces per-cell capacity and
//! layering order, and drives the drag/select/drop cycle so the grid is
//! left consistent even when a placement fails partway through.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering
//! - No IO
//! - No floating-point math (uses fixed-point)
//!
//! Rendering, input-device polling, and inventory systems are external
//! collaborators: the core consumes [`drag::InputSignal`] streams, works
//! against the [`element::GridElement`] capability trait, and reports
//! outcomes as returned [`drag::PlacementEvent`] vectors.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Coordinates, world/grid conversion, playable bounds
//! - [`footprint`] - Multi-cell element footprints
//! - [`cell`] - Per-coordinate bounded occupant lists
//! - [`occupancy`] - The occupancy map with atomic registration
//! - [`drag`] - The drag/placement state machine
//! - [`math`] - Fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod cell;
pub mod drag;
pub mod element;
pub mod error;
pub mod footprint;
pub mod grid;
pub mod math;
pub mod occupancy;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cell::{LayerOrder, OccupancyCell};
    pub use crate::drag::{
        DragController, DropRejection, InputSignal, PlacementEvent, PlacementSession,
    };
    pub use crate::element::{GridElement, OccupantId};
    pub use crate::error::{GridError, Result};
    pub use crate::footprint::Footprint;
    pub use crate::grid::{GridBounds, GridConfig, GridCoordinate};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::occupancy::OccupancyMap;
}
