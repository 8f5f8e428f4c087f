//! Drag/select/drop interaction cycle over the occupancy map.
//!
//! The controller consumes input signals (selected, dragging, dropped),
//! pulls the tracked element out of the map for the duration of the
//! drag, validates the candidate placement every frame, and resolves the
//! drop to one of three outcomes: commit at the candidate, revert to the
//! origin, or hand the element off to an external inventory. Whatever
//! happens, the map is back in a consistent state when the session ends.
//!
//! Placement results are returned as event vectors from each call; there
//! is no broadcast bus, so the core runs and tests without any engine
//! bootstrap.

use serde::{Deserialize, Serialize};

use crate::element::{GridElement, OccupantId};
use crate::error::GridError;
use crate::grid::GridCoordinate;
use crate::math::Vec2Fixed;
use crate::occupancy::OccupancyMap;

// ============================================================================
// Signals and Events
// ============================================================================

/// Discrete signals from the input collaborator.
///
/// Ordering within one gesture is `Selected`, zero or more `Dragging`,
/// exactly one `Dropped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSignal {
    /// An element was picked up.
    Selected {
        /// The element's identity handle.
        occupant: OccupantId,
        /// Its world position at selection time.
        position: Vec2Fixed,
    },
    /// The element moved while held.
    Dragging {
        /// The element's identity handle.
        occupant: OccupantId,
        /// Its current world position.
        position: Vec2Fixed,
    },
    /// The element was released.
    Dropped {
        /// The element's identity handle.
        occupant: OccupantId,
        /// Its world position at release time.
        position: Vec2Fixed,
    },
}

impl InputSignal {
    /// The occupant this signal refers to.
    #[must_use]
    pub const fn occupant(&self) -> OccupantId {
        match self {
            Self::Selected { occupant, .. }
            | Self::Dragging { occupant, .. }
            | Self::Dropped { occupant, .. } => *occupant,
        }
    }
}

/// Why an invalid drop could not be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropRejection {
    /// The drop position was outside the playable bounds.
    OutOfBounds,
    /// At least one candidate cell was at capacity.
    CellOccupied,
    /// The gesture ended without an explicit drop.
    Cancelled,
}

/// Placement notifications emitted by the drag controller.
///
/// Returned from each call rather than broadcast; the host forwards
/// them to whichever systems care (inventory, feedback, scoring).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementEvent {
    /// An element was committed to the grid.
    Placed {
        /// The placed element.
        occupant: OccupantId,
        /// The anchor it was registered at.
        anchor: GridCoordinate,
    },
    /// An element left the grid (drag start or move away).
    Removed {
        /// The removed element.
        occupant: OccupantId,
        /// The anchor it was registered at.
        anchor: GridCoordinate,
    },
    /// A never-registered element was dropped invalidly and must be
    /// re-homed outside the grid by the inventory collaborator.
    RemovedFromGrid {
        /// The element to re-home.
        occupant: OccupantId,
        /// Why the drop was rejected.
        rejection: DropRejection,
    },
}

// ============================================================================
// Placement Session
// ============================================================================

/// Transient state for one in-flight drag gesture.
///
/// Created on selection, destroyed when the drop resolves. Owned
/// exclusively by the [`DragController`]; consumers read it through
/// [`DragController::session`] for visual feedback only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSession {
    occupant: OccupantId,
    origin: Option<GridCoordinate>,
    origin_position: Vec2Fixed,
    candidate: GridCoordinate,
    candidate_cells: Vec<GridCoordinate>,
    verdict: Result<(), GridError>,
}

impl PlacementSession {
    /// The occupant being dragged.
    #[must_use]
    pub const fn occupant(&self) -> OccupantId {
        self.occupant
    }

    /// Anchor the occupant held before the drag, if it was registered.
    #[must_use]
    pub const fn origin(&self) -> Option<GridCoordinate> {
        self.origin
    }

    /// Whether the occupant was registered when the drag began.
    #[must_use]
    pub const fn was_registered(&self) -> bool {
        self.origin.is_some()
    }

    /// Current candidate anchor under the pointer.
    #[must_use]
    pub const fn candidate(&self) -> GridCoordinate {
        self.candidate
    }

    /// Cells the footprint would cover at the candidate anchor.
    #[must_use]
    pub fn candidate_cells(&self) -> &[GridCoordinate] {
        &self.candidate_cells
    }

    /// Whether the candidate position is inside the playable bounds.
    #[must_use]
    pub fn is_in_bounds(&self) -> bool {
        !matches!(self.verdict, Err(GridError::OutOfBounds { .. }))
    }

    /// Whether a drop here would commit, recomputed every frame.
    #[must_use]
    pub fn can_place(&self) -> bool {
        self.verdict.is_ok()
    }

    /// Why a drop here would fail, if it would.
    #[must_use]
    pub fn placement_error(&self) -> Option<&GridError> {
        self.verdict.as_ref().err()
    }
}

// ============================================================================
// Drag Controller
// ============================================================================

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Tracking(PlacementSession),
}

/// The drag/placement state machine.
///
/// States are Idle and Tracking; the placing step on drop is transient
/// and never observable across a frame boundary. At most one session
/// exists at a time, and the controller is the only map writer while it
/// is live.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag session is in flight.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, DragState::Tracking(_))
    }

    /// The live session, for read-only feedback consumers.
    #[must_use]
    pub fn session(&self) -> Option<&PlacementSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Tracking(session) => Some(session),
        }
    }

    /// Advance the state machine with one input signal.
    ///
    /// `element` must be the element the signal refers to; a mismatched
    /// id is a host wiring bug and the signal is dropped with a warning.
    pub fn handle_signal(
        &mut self,
        map: &mut OccupancyMap,
        element: &mut dyn GridElement,
        signal: InputSignal,
    ) -> Vec<PlacementEvent> {
        if signal.occupant() != element.id() {
            tracing::warn!(
                signal_occupant = ?signal.occupant(),
                element = ?element.id(),
                "input signal does not match the supplied element"
            );
            return Vec::new();
        }

        match signal {
            InputSignal::Selected { occupant, position }
            | InputSignal::Dragging { occupant, position } => {
                if let DragState::Tracking(session) = &mut self.state {
                    if session.occupant == occupant {
                        Self::update_candidate(map, element, session, position);
                    } else {
                        // One session at a time; a second gesture cannot
                        // start until the first resolves.
                        tracing::warn!(
                            tracked = ?session.occupant,
                            ignored = ?occupant,
                            "ignoring signal for a second element during a drag"
                        );
                    }
                    return Vec::new();
                }
                self.begin_tracking(map, element, position)
            }
            InputSignal::Dropped { occupant, position } => match std::mem::take(&mut self.state) {
                DragState::Idle => {
                    tracing::warn!(?occupant, "drop signal with no session in flight");
                    Vec::new()
                }
                DragState::Tracking(mut session) if session.occupant == occupant => {
                    Self::update_candidate(map, element, &mut session, position);
                    Self::resolve_drop(map, element, session, false)
                }
                DragState::Tracking(session) => {
                    tracing::warn!(
                        tracked = ?session.occupant,
                        dropped = ?occupant,
                        "drop signal for an element that is not being tracked"
                    );
                    self.state = DragState::Tracking(session);
                    Vec::new()
                }
            },
        }
    }

    /// End the session without a drop signal.
    ///
    /// Resolved identically to an invalid drop: revert to the origin, or
    /// hand off to the inventory if the element was never registered.
    /// The map is always left in a known state before returning to Idle.
    pub fn cancel(
        &mut self,
        map: &mut OccupancyMap,
        element: &mut dyn GridElement,
    ) -> Vec<PlacementEvent> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Vec::new(),
            DragState::Tracking(session) => {
                if session.occupant != element.id() {
                    tracing::warn!(
                        tracked = ?session.occupant,
                        element = ?element.id(),
                        "cancel called with the wrong element; session kept"
                    );
                    self.state = DragState::Tracking(session);
                    return Vec::new();
                }
                Self::resolve_drop(map, element, session, true)
            }
        }
    }

    /// Idle -> Tracking: capture the origin and free the dragged cells.
    fn begin_tracking(
        &mut self,
        map: &mut OccupancyMap,
        element: &mut dyn GridElement,
        position: Vec2Fixed,
    ) -> Vec<PlacementEvent> {
        if !element.is_draggable() {
            return Vec::new();
        }

        let occupant = element.id();
        let mut events = Vec::new();

        // Unregister up front so the element does not block its own
        // candidate positions while dragging.
        let origin = map.anchor_of(occupant);
        let origin_position = element.world_position();
        if let Some(anchor) = origin {
            let cleared = map.unregister(occupant);
            if cleared != element.footprint().len() {
                tracing::warn!(
                    ?occupant,
                    cleared,
                    footprint = element.footprint().len(),
                    "unregistered cell count does not match the footprint"
                );
            }
            events.push(PlacementEvent::Removed { occupant, anchor });
        }

        let mut session = PlacementSession {
            occupant,
            origin,
            origin_position,
            candidate: GridCoordinate::ZERO,
            candidate_cells: Vec::new(),
            verdict: Ok(()),
        };
        Self::update_candidate(map, element, &mut session, position);
        self.state = DragState::Tracking(session);
        events
    }

    /// Tracking -> Tracking: recompute the candidate placement.
    fn update_candidate(
        map: &OccupancyMap,
        element: &dyn GridElement,
        session: &mut PlacementSession,
        position: Vec2Fixed,
    ) {
        let candidate = map.config().world_to_grid(position);
        session.candidate = candidate;
        session.candidate_cells = element.footprint().cells_for(candidate).collect();
        session.verdict = map.validate_placement(element.footprint(), position);
    }

    /// Tracking -> Placing -> Idle: commit, revert, or hand off.
    fn resolve_drop(
        map: &mut OccupancyMap,
        element: &mut dyn GridElement,
        session: PlacementSession,
        cancelled: bool,
    ) -> Vec<PlacementEvent> {
        let occupant = session.occupant;
        let mut events = Vec::new();

        let rejection = if cancelled {
            Some(DropRejection::Cancelled)
        } else {
            match &session.verdict {
                Ok(()) => None,
                Err(GridError::OutOfBounds { .. }) => Some(DropRejection::OutOfBounds),
                Err(_) => Some(DropRejection::CellOccupied),
            }
        };

        if rejection.is_none() {
            match map.register(occupant, element.footprint(), session.candidate) {
                Ok(()) => {
                    element.set_world_position(map.config().grid_to_world(session.candidate));
                    events.push(PlacementEvent::Placed {
                        occupant,
                        anchor: session.candidate,
                    });
                    return events;
                }
                Err(err) => {
                    // can_place was positive this frame with no possible
                    // intervening mutation; a failing commit means the
                    // single-writer discipline was broken.
                    debug_assert!(false, "register failed after positive can_place: {err}");
                    tracing::error!(?occupant, %err, "register failed after positive can_place");
                }
            }
        }

        if let Some(anchor) = session.origin {
            // The origin cells were vacated by this same occupant at drag
            // start and nothing else writes during the session, so the
            // revert is not re-validated.
            match map.register(occupant, element.footprint(), anchor) {
                Ok(()) => {
                    element.set_world_position(session.origin_position);
                    events.push(PlacementEvent::Placed { occupant, anchor });
                }
                Err(err) => {
                    debug_assert!(false, "revert to origin failed: {err}");
                    tracing::error!(?occupant, %err, "revert to vacated origin failed");
                    events.push(PlacementEvent::RemovedFromGrid {
                        occupant,
                        rejection: rejection.unwrap_or(DropRejection::CellOccupied),
                    });
                }
            }
        } else {
            events.push(PlacementEvent::RemovedFromGrid {
                occupant,
                rejection: rejection.unwrap_or(DropRejection::CellOccupied),
            });
        }

        events
    }
}
