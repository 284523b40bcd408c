//! Per-object placement controller: the select/drag state machine.
//!
//! Each placed object on the surface gets one `PlacementController`. It owns
//! the object's transient, non-authoritative position and its selection
//! state. The state is a single tagged variant so that live drag
//! coordinates only exist while a drag is in progress:
//!
//! ```text
//!   Idle ──click──▶ Active ──click──▶ Idle
//!    │                │
//!    └──drag-start────┴──▶ Dragging { resume, offset, live }
//!                               │ drag-move: live = clamp(pointer - offset)
//!                               └─drag-end──▶ resume (Idle | Active), commit live
//! ```
//!
//! No transition talks to the backend; the controller reports what should be
//! committed and the editor turns that into actions.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use crate::consts::{Z_INDEX_DRAGGING, Z_INDEX_IDLE, Z_INDEX_SELECTED};
use crate::doc::{ItemId, PlacedId, PlacedObject};
use crate::surface::{Point, SurfaceRect};

/// Selection toggle remembered across a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Rendered, unselected.
    #[default]
    Idle,
    /// Selected; the removal control is visible.
    Active,
}

impl Selection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Idle => Self::Active,
            Self::Active => Self::Idle,
        }
    }
}

/// State of one placed object's interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlacementState {
    /// Rendered, unselected.
    #[default]
    Idle,
    /// Selected; the removal control is visible.
    Active,
    /// A drag gesture is in progress.
    Dragging {
        /// Toggle state to return to when the drag ends.
        resume: Selection,
        /// Pointer position minus the object's rendered origin at drag start, in client pixels.
        offset: Point,
        /// Current clamped position in surface percentages.
        live: Point,
    },
}

impl PlacementState {
    fn from_selection(selection: Selection) -> Self {
        match selection {
            Selection::Idle => Self::Idle,
            Selection::Active => Self::Active,
        }
    }
}

/// Whether an event handled by a controller should continue to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// Drag/select state machine for a single placed object.
#[derive(Debug, Clone)]
pub struct PlacementController {
    object: PlacedObject,
    resting: Point,
    state: PlacementState,
}

impl PlacementController {
    /// Wrap a server-confirmed placed object, starting idle at its position.
    #[must_use]
    pub fn new(object: PlacedObject) -> Self {
        let resting = object.position();
        Self { object, resting, state: PlacementState::Idle }
    }

    #[must_use]
    pub fn placed_id(&self) -> PlacedId {
        self.object.placed_id
    }

    #[must_use]
    pub fn item_id(&self) -> &ItemId {
        &self.object.item_id
    }

    /// Last server-confirmed copy of the object.
    #[must_use]
    pub fn object(&self) -> &PlacedObject {
        &self.object
    }

    #[must_use]
    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Where the object is drawn right now, in surface percentages.
    ///
    /// During a drag this is the live position; otherwise it is the resting
    /// position, which may hold an uncommitted coordinate until the next
    /// resynchronization overwrites it.
    #[must_use]
    pub fn position(&self) -> Point {
        match self.state {
            PlacementState::Dragging { live, .. } => live,
            PlacementState::Idle | PlacementState::Active => self.resting,
        }
    }

    /// The toggle state, looking through an active drag.
    #[must_use]
    pub fn selection(&self) -> Selection {
        match self.state {
            PlacementState::Idle => Selection::Idle,
            PlacementState::Active => Selection::Active,
            PlacementState::Dragging { resume, .. } => resume,
        }
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selection() == Selection::Active
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PlacementState::Dragging { .. })
    }

    /// The removal control is only shown for a selected object at rest.
    #[must_use]
    pub fn shows_remove_control(&self) -> bool {
        self.state == PlacementState::Active
    }

    /// Stacking order: dragging above selected above idle.
    #[must_use]
    pub fn z_index(&self) -> i32 {
        match self.state {
            PlacementState::Dragging { .. } => Z_INDEX_DRAGGING,
            PlacementState::Active => Z_INDEX_SELECTED,
            PlacementState::Idle => Z_INDEX_IDLE,
        }
    }

    // --- Transitions ---

    /// Click on the object body: `Idle ⇄ Active`.
    ///
    /// Always stops propagation so the surface does not also see the click.
    /// A click during a drag flips the state the drag will resume into.
    pub fn toggle(&mut self) -> Propagation {
        self.state = match self.state {
            PlacementState::Idle => PlacementState::Active,
            PlacementState::Active => PlacementState::Idle,
            PlacementState::Dragging { resume, offset, live } => {
                PlacementState::Dragging { resume: resume.toggled(), offset, live }
            }
        };
        Propagation::Stop
    }

    /// Clear the selection (surface click). Dragging is left alone.
    pub fn deselect(&mut self) {
        if self.state == PlacementState::Active {
            self.state = PlacementState::Idle;
        }
    }

    /// Begin a drag. `rendered_origin` is the object's drawn top-left corner
    /// in client pixels; the grab offset is measured from it.
    ///
    /// Restarting while already dragging keeps the original resume state.
    pub fn begin_drag(&mut self, pointer: Point, rendered_origin: Point) {
        let resume = self.selection();
        let live = self.position();
        self.state = PlacementState::Dragging { resume, offset: pointer.offset_from(rendered_origin), live };
    }

    /// Track a drag-move. Returns `true` when the live position changed.
    ///
    /// The `(0, 0)` pointer reported by drag-end-adjacent synthetic events is
    /// ignored, as is any move on a surface without area.
    pub fn drag_to(&mut self, pointer: Point, surface: &SurfaceRect) -> bool {
        let PlacementState::Dragging { resume, offset, live } = self.state else {
            return false;
        };
        if pointer.is_origin() || !pointer.is_finite() {
            return false;
        }
        let Some(next) = surface.to_clamped_percent(pointer, offset) else {
            return false;
        };
        if next == live {
            return false;
        }
        self.state = PlacementState::Dragging { resume, offset, live: next };
        true
    }

    /// Finish a drag, returning the clamped position to commit.
    ///
    /// The object rests at that position until the next resynchronization,
    /// whether or not the commit later succeeds. Returns `None` when no drag
    /// was in progress.
    pub fn end_drag(&mut self) -> Option<Point> {
        let PlacementState::Dragging { resume, live, .. } = self.state else {
            return None;
        };
        let committed = live.clamped();
        self.resting = committed;
        self.state = PlacementState::from_selection(resume);
        Some(committed)
    }

    /// Click on the removal control. Only a selected object at rest can be removed.
    #[must_use]
    pub fn request_remove(&self) -> Option<PlacedId> {
        self.shows_remove_control().then_some(self.object.placed_id)
    }

    /// Adopt a resynchronized server copy of the object.
    ///
    /// The resting position is overwritten with server truth. An in-flight
    /// drag keeps its live position so the gesture is not interrupted.
    /// Returns `false` (and changes nothing) if the copy is for another
    /// object or item, since identity never changes.
    pub fn sync(&mut self, object: PlacedObject) -> bool {
        if object.placed_id != self.object.placed_id || object.item_id != self.object.item_id {
            return false;
        }
        self.resting = object.position();
        self.object = object;
        true
    }
}
