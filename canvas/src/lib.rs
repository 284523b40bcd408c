//! Placement and drag-and-drop engine for the garden editor.
//!
//! This crate turns raw drag, drop and click input into garden mutations. It
//! normalizes pointer positions into canvas-relative percentages, runs one
//! select/drag state machine per placed object, and reports backend commands
//! as [`editor::Action`]s. It never talks to the network: the host executes
//! those actions against the garden store and feeds the resynchronized
//! [`doc::GardenSnapshot`] back in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Drop surface: testable [`editor::EditorCore`] and the DOM-bound [`editor::Editor`] |
//! | [`placement`] | Per-object select/drag state machine |
//! | [`payload`] | Drag payload variants and their data-transfer encoding |
//! | [`doc`] | Catalog, inventory and placed-object types plus the garden snapshot |
//! | [`surface`] | Points, surface bounds and percentage conversion |
//! | [`consts`] | Shared constants (percentage bounds, stacking, transfer keys) |

pub mod consts;
pub mod doc;
pub mod editor;
pub mod payload;
pub mod placement;
pub mod surface;
