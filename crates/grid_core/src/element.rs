//! Occupant handles and the capability surface of placeable elements.

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;
use crate::math::Vec2Fixed;

/// Opaque identity handle for a placed element.
///
/// The occupancy map compares occupants by identity only; it never
/// inspects element internals beyond this handle and the footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupantId(pub u64);

/// Minimal capability surface the placement core needs from an element.
///
/// Everything else about an element (rendering, audio, UI state) is
/// irrelevant here and stays with the host application.
pub trait GridElement {
    /// Identity handle used by the occupancy map and input signals.
    fn id(&self) -> OccupantId;

    /// Cells this element occupies relative to its anchor.
    fn footprint(&self) -> &Footprint;

    /// Current world position.
    fn world_position(&self) -> Vec2Fixed;

    /// Move the element; used to snap onto the grid after a drop.
    fn set_world_position(&mut self, position: Vec2Fixed);

    /// Whether the drag controller may begin tracking this element.
    fn is_draggable(&self) -> bool;
}
