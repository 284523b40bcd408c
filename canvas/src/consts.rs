//! Shared numeric constants for the canvas crate.

// ── Coordinates ─────────────────────────────────────────────────

/// Lower bound of a canvas-relative coordinate, in percent.
pub const PERCENT_MIN: f64 = 0.0;

/// Upper bound of a canvas-relative coordinate, in percent.
pub const PERCENT_MAX: f64 = 100.0;

// ── Stacking ────────────────────────────────────────────────────

/// Z-index of an unselected placed object.
pub const Z_INDEX_IDLE: i32 = 1;

/// Z-index of a selected placed object; draws above idle objects.
pub const Z_INDEX_SELECTED: i32 = 2;

/// Z-index of the object under an active drag.
pub const Z_INDEX_DRAGGING: i32 = 1000;

// ── Drag transfer ───────────────────────────────────────────────

/// Data-transfer key carrying a catalog item id for a new placement.
pub const TRANSFER_KEY_ITEM: &str = "itemId";

/// Data-transfer key carrying a placed-object id for a reposition.
pub const TRANSFER_KEY_PLACED: &str = "placedId";

/// 1×1 transparent GIF used as the drag image so the browser draws no ghost.
pub const TRANSPARENT_DRAG_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";
