//! Test fixtures and helpers.
//!
//! Pre-built grid configurations and a minimal element implementation
//! for consistent testing.

use fixed::types::I32F32;

use grid_core::element::{GridElement, OccupantId};
use grid_core::footprint::Footprint;
use grid_core::grid::{GridBounds, GridConfig};
use grid_core::math::Vec2Fixed;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: In real placement code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point vector from integer components.
#[must_use]
pub fn vec2(x: i32, y: i32) -> Vec2Fixed {
    Vec2Fixed::new(fixed(x), fixed(y))
}

/// A grid config centered at the origin.
///
/// The playable area spans `[-half_extent, half_extent]` on both axes.
///
/// # Panics
///
/// Panics on degenerate arguments; fixtures are for tests only.
#[must_use]
pub fn test_config(cell_size: i32, half_extent: i32) -> GridConfig {
    let bounds = GridBounds::new(
        fixed(-half_extent),
        fixed(half_extent),
        fixed(-half_extent),
        fixed(half_extent),
    )
    .expect("fixture bounds are valid");
    GridConfig::new(Vec2Fixed::ZERO, fixed(cell_size), bounds)
        .expect("fixture cell size is valid")
}

/// Minimal [`GridElement`] implementation for tests.
#[derive(Debug, Clone)]
pub struct TestElement {
    /// Identity handle.
    pub id: OccupantId,
    /// Cells the element occupies.
    pub footprint: Footprint,
    /// Current world position.
    pub position: Vec2Fixed,
    /// Whether the drag controller may track it.
    pub draggable: bool,
}

impl TestElement {
    /// A draggable single-cell element at the world origin.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id: OccupantId(id),
            footprint: Footprint::single(),
            position: Vec2Fixed::ZERO,
            draggable: true,
        }
    }

    /// Replace the footprint.
    #[must_use]
    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// Replace the position.
    #[must_use]
    pub fn at(mut self, position: Vec2Fixed) -> Self {
        self.position = position;
        self
    }

    /// Mark the element as not draggable.
    #[must_use]
    pub fn undraggable(mut self) -> Self {
        self.draggable = false;
        self
    }
}

impl GridElement for TestElement {
    fn id(&self) -> OccupantId {
        self.id
    }

    fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    fn world_position(&self) -> Vec2Fixed {
        self.position
    }

    fn set_world_position(&mut self, position: Vec2Fixed) {
        self.position = position;
    }

    fn is_draggable(&self) -> bool {
        self.draggable
    }
}
