//! Grid coordinates, world/grid conversion, and playable bounds.
//!
//! The converter is stateless: a [`GridConfig`] carries the origin and
//! cell size, and every conversion is a pure function of its inputs.
//! Validation happens once at construction; queries never fail.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::math::{fixed_serde, Fixed, Vec2Fixed};

// ============================================================================
// Grid Coordinate
// ============================================================================

/// A discrete grid cell address.
///
/// Value type: equality and hashing are by value, and it is the key type
/// of the occupancy map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoordinate {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl GridCoordinate {
    /// Create a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin cell `(0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Translate this coordinate by an offset.
    #[must_use]
    pub const fn offset_by(self, offset: Self) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

// ============================================================================
// Playable Bounds
// ============================================================================

/// Axis-aligned playable area in world space.
///
/// Independent of occupancy: a position can be inside bounds but over a
/// full cell, or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Minimum world X (inclusive).
    #[serde(with = "fixed_serde")]
    left: Fixed,
    /// Maximum world X (inclusive).
    #[serde(with = "fixed_serde")]
    right: Fixed,
    /// Minimum world Y (inclusive).
    #[serde(with = "fixed_serde")]
    bottom: Fixed,
    /// Maximum world Y (inclusive).
    #[serde(with = "fixed_serde")]
    top: Fixed,
}

impl GridBounds {
    /// Create playable bounds from the four boundary values.
    ///
    /// Returns [`GridError::InvalidBounds`] unless `left < right` and
    /// `bottom < top`.
    pub fn new(left: Fixed, right: Fixed, bottom: Fixed, top: Fixed) -> Result<Self> {
        if left >= right || bottom >= top {
            return Err(GridError::InvalidBounds);
        }
        Ok(Self {
            left,
            right,
            bottom,
            top,
        })
    }

    /// Check whether a world position lies inside the playable area.
    #[must_use]
    pub fn contains(&self, position: Vec2Fixed) -> bool {
        position.x >= self.left
            && position.x <= self.right
            && position.y >= self.bottom
            && position.y <= self.top
    }

    /// Minimum world X.
    #[must_use]
    pub const fn left(&self) -> Fixed {
        self.left
    }

    /// Maximum world X.
    #[must_use]
    pub const fn right(&self) -> Fixed {
        self.right
    }

    /// Minimum world Y.
    #[must_use]
    pub const fn bottom(&self) -> Fixed {
        self.bottom
    }

    /// Maximum world Y.
    #[must_use]
    pub const fn top(&self) -> Fixed {
        self.top
    }
}

// ============================================================================
// Grid Configuration / Coordinate Converter
// ============================================================================

/// Grid geometry: origin, cell size, and playable bounds.
///
/// Constructed once per grid instance. `cell_size` is validated here so
/// the per-call conversions carry no error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// World position of cell `(0, 0)`.
    origin: Vec2Fixed,
    /// Edge length of one cell in world units.
    #[serde(with = "fixed_serde")]
    cell_size: Fixed,
    /// Playable area.
    bounds: GridBounds,
}

impl GridConfig {
    /// Create a grid configuration.
    ///
    /// Returns [`GridError::InvalidCellSize`] if `cell_size` is not
    /// positive.
    pub fn new(origin: Vec2Fixed, cell_size: Fixed, bounds: GridBounds) -> Result<Self> {
        if cell_size <= Fixed::ZERO {
            return Err(GridError::InvalidCellSize);
        }
        Ok(Self {
            origin,
            cell_size,
            bounds,
        })
    }

    /// World position of cell `(0, 0)`.
    #[must_use]
    pub const fn origin(&self) -> Vec2Fixed {
        self.origin
    }

    /// Edge length of one cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> Fixed {
        self.cell_size
    }

    /// Playable bounds.
    #[must_use]
    pub const fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Convert a world position to the grid cell containing it.
    ///
    /// Rounds `(position - origin) / cell_size` component-wise to the
    /// nearest integer, ties away from zero.
    #[must_use]
    pub fn world_to_grid(&self, position: Vec2Fixed) -> GridCoordinate {
        let local = position - self.origin;
        GridCoordinate::new(
            (local.x / self.cell_size).round().to_num::<i32>(),
            (local.y / self.cell_size).round().to_num::<i32>(),
        )
    }

    /// Convert a grid coordinate to its world position.
    ///
    /// Exact inverse of [`Self::world_to_grid`] for grid-aligned
    /// positions; used to snap elements visually.
    #[must_use]
    pub fn grid_to_world(&self, coord: GridCoordinate) -> Vec2Fixed {
        Vec2Fixed::new(
            Fixed::from_num(coord.x) * self.cell_size + self.origin.x,
            Fixed::from_num(coord.y) * self.cell_size + self.origin.y,
        )
    }

    /// Check whether a world position lies inside the playable area.
    #[must_use]
    pub fn is_inside_bounds(&self, position: Vec2Fixed) -> bool {
        self.bounds.contains(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(n: i32) -> Fixed {
        Fixed::from_num(n)
    }

    fn vec2(x: i32, y: i32) -> Vec2Fixed {
        Vec2Fixed::new(fixed(x), fixed(y))
    }

    fn config() -> GridConfig {
        let bounds = GridBounds::new(fixed(-100), fixed(100), fixed(-100), fixed(100)).unwrap();
        GridConfig::new(Vec2Fixed::ZERO, fixed(2), bounds).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_cell_size() {
        let bounds = GridBounds::new(fixed(0), fixed(10), fixed(0), fixed(10)).unwrap();
        assert_eq!(
            GridConfig::new(Vec2Fixed::ZERO, fixed(0), bounds),
            Err(GridError::InvalidCellSize)
        );
        assert_eq!(
            GridConfig::new(Vec2Fixed::ZERO, fixed(-1), bounds),
            Err(GridError::InvalidCellSize)
        );
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        assert_eq!(
            GridBounds::new(fixed(10), fixed(-10), fixed(0), fixed(10)),
            Err(GridError::InvalidBounds)
        );
        assert_eq!(
            GridBounds::new(fixed(0), fixed(10), fixed(5), fixed(5)),
            Err(GridError::InvalidBounds)
        );
    }

    #[test]
    fn test_grid_coord_roundtrip() {
        let config = config();
        for x in [-7, -1, 0, 1, 13] {
            for y in [-4, 0, 2, 9] {
                let coord = GridCoordinate::new(x, y);
                assert_eq!(config.world_to_grid(config.grid_to_world(coord)), coord);
            }
        }
    }

    #[test]
    fn test_snapping_is_idempotent() {
        let config = config();
        for x in [-5, 0, 3] {
            for y in [-2, 0, 7] {
                let coord = GridCoordinate::new(x, y);
                let snapped = config.grid_to_world(coord);
                let resnapped = config.grid_to_world(config.world_to_grid(snapped));
                assert_eq!(snapped, resnapped);
            }
        }
    }

    #[test]
    fn test_world_to_grid_rounds_to_nearest() {
        let config = config();
        // Cell size 2: positions within 1 unit of a cell center map to it.
        assert_eq!(
            config.world_to_grid(Vec2Fixed::new(
                Fixed::from_num(0.9),
                Fixed::from_num(-0.9)
            )),
            GridCoordinate::ZERO
        );
        assert_eq!(
            config.world_to_grid(vec2(3, 5)),
            // 3/2 = 1.5 rounds away from zero to 2; 5/2 = 2.5 rounds to 3.
            GridCoordinate::new(2, 3)
        );
        assert_eq!(
            config.world_to_grid(vec2(-3, -5)),
            GridCoordinate::new(-2, -3)
        );
    }

    #[test]
    fn test_world_to_grid_respects_origin() {
        let bounds = GridBounds::new(fixed(-100), fixed(100), fixed(-100), fixed(100)).unwrap();
        let config = GridConfig::new(vec2(10, 10), fixed(2), bounds).unwrap();

        assert_eq!(config.world_to_grid(vec2(10, 10)), GridCoordinate::ZERO);
        assert_eq!(config.world_to_grid(vec2(14, 12)), GridCoordinate::new(2, 1));
        assert_eq!(config.grid_to_world(GridCoordinate::new(2, 1)), vec2(14, 12));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = GridBounds::new(fixed(-10), fixed(10), fixed(0), fixed(5)).unwrap();
        assert!(bounds.contains(vec2(0, 3)));
        assert!(bounds.contains(vec2(-10, 0)));
        assert!(bounds.contains(vec2(10, 5)));
        assert!(!bounds.contains(vec2(11, 3)));
        assert!(!bounds.contains(vec2(0, -1)));
        assert!(!bounds.contains(vec2(0, 6)));
    }

    #[test]
    fn test_offset_by() {
        let anchor = GridCoordinate::new(5, 5);
        assert_eq!(
            anchor.offset_by(GridCoordinate::new(1, -2)),
            GridCoordinate::new(6, 3)
        );
        assert_eq!(anchor.offset_by(GridCoordinate::ZERO), anchor);
    }
}
