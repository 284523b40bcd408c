#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{CatalogEntry, PlacedObject};
use crate::placement::PlacementState;

fn catalog(id: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.to_owned(),
        name: id.to_uppercase(),
        description: String::new(),
        price: 10,
        icon: String::new(),
        image: format!("/assets/{id}.png"),
    }
}

fn inventory(id: &str, quantity: u32) -> InventoryEntry {
    InventoryEntry { item_id: id.to_owned(), quantity, catalog: catalog(id) }
}

fn placed(placed_id: PlacedId, item: &str, x: f64, y: f64) -> PlacedObject {
    PlacedObject { placed_id, item_id: item.to_owned(), x, y, catalog: catalog(item) }
}

/// Editor with a 400 × 200 px surface at client (100, 50).
fn editor_with(snapshot: &GardenSnapshot) -> EditorCore {
    let mut core = EditorCore::new();
    core.set_surface(SurfaceRect::new(100.0, 50.0, 400.0, 200.0));
    core.sync(snapshot);
    core
}

fn mutations(actions: &[Action]) -> Vec<&Action> {
    actions.iter().filter(|a| a.is_mutation()).collect()
}

// =============================================================
// Action
// =============================================================

#[test]
fn only_backend_commands_are_mutations() {
    assert!(Action::Place { item_id: "a".into(), x: 0.0, y: 0.0 }.is_mutation());
    assert!(Action::Move { placed_id: 1, x: 0.0, y: 0.0 }.is_mutation());
    assert!(Action::Remove { placed_id: 1 }.is_mutation());
    assert!(!Action::RenderNeeded.is_mutation());
    assert!(!Action::SuppressDragPreview.is_mutation());
    assert!(!Action::SetDragPayload(DragPayload::Reposition(1)).is_mutation());
}

// =============================================================
// Inventory source
// =============================================================

#[test]
fn inventory_hides_zero_quantity_entries() {
    let core = editor_with(&GardenSnapshot::new(vec![inventory("tree-1", 2), inventory("rock1", 0)], Vec::new()));
    let ids: Vec<&str> = core.inventory().map(|e| e.item_id.as_str()).collect();
    assert_eq!(ids, vec!["tree-1"]);
}

#[test]
fn inventory_drag_sets_new_placement_payload() {
    let core = editor_with(&GardenSnapshot::new(vec![inventory("tree-1", 2)], Vec::new()));
    assert_eq!(
        core.start_inventory_drag("tree-1"),
        vec![Action::SetDragPayload(DragPayload::NewPlacement("tree-1".into()))]
    );
}

#[test]
fn inventory_drag_of_hidden_entry_is_refused() {
    let core = editor_with(&GardenSnapshot::new(vec![inventory("rock1", 0)], Vec::new()));
    assert!(core.start_inventory_drag("rock1").is_empty());
    assert!(core.start_inventory_drag("missing").is_empty());
}

// =============================================================
// Drop
// =============================================================

#[test]
fn drag_over_accepts() {
    assert_eq!(EditorCore::new().on_drag_over(), DropEffect::Accept);
}

#[test]
fn drop_at_center_places_once_at_fifty_fifty() {
    let core = editor_with(&GardenSnapshot::new(vec![inventory("tree-1", 2)], Vec::new()));
    let actions = core.on_drop(Some(DragPayload::NewPlacement("tree-1".into())), Point::new(300.0, 150.0));
    assert_eq!(actions, vec![Action::Place { item_id: "tree-1".into(), x: 50.0, y: 50.0 }]);
    // The surface does not add the object speculatively.
    assert_eq!(core.placed_count(), 0);
}

#[test]
fn drop_without_payload_is_ignored() {
    let core = editor_with(&GardenSnapshot::default());
    assert!(core.on_drop(None, Point::new(300.0, 150.0)).is_empty());
}

#[test]
fn drop_of_reposition_payload_is_ignored() {
    let core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 10.0, 10.0)]));
    assert!(core.on_drop(Some(DragPayload::Reposition(7)), Point::new(300.0, 150.0)).is_empty());
}

#[test]
fn drop_beyond_boundary_is_clamped() {
    let core = editor_with(&GardenSnapshot::default());
    let actions = core.on_drop(Some(DragPayload::NewPlacement("bench".into())), Point::new(520.0, 40.0));
    assert_eq!(actions, vec![Action::Place { item_id: "bench".into(), x: 100.0, y: 0.0 }]);
}

#[test]
fn drop_on_unmeasured_surface_is_ignored() {
    let core = EditorCore::new();
    assert!(core.on_drop(Some(DragPayload::NewPlacement("bench".into())), Point::new(10.0, 10.0)).is_empty());
}

// =============================================================
// Click
// =============================================================

#[test]
fn toggling_twice_issues_no_backend_calls() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 10.0, 10.0)]));
    let before = core.render_list();
    let first = core.on_click(ClickTarget::Object(7));
    let second = core.on_click(ClickTarget::Object(7));
    assert!(mutations(&first).is_empty());
    assert!(mutations(&second).is_empty());
    assert_eq!(core.render_list(), before);
}

#[test]
fn object_click_does_not_clear_other_selections() {
    let mut core = editor_with(&GardenSnapshot::new(
        Vec::new(),
        vec![placed(1, "tree-1", 10.0, 10.0), placed(2, "rock1", 20.0, 20.0)],
    ));
    core.on_click(ClickTarget::Object(1));
    core.on_click(ClickTarget::Object(2));
    assert!(core.controller(1).is_some_and(PlacementController::is_selected));
    assert!(core.controller(2).is_some_and(PlacementController::is_selected));
}

#[test]
fn surface_click_clears_selection() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(1, "tree-1", 10.0, 10.0)]));
    core.on_click(ClickTarget::Object(1));
    let actions = core.on_click(ClickTarget::Surface);
    assert!(mutations(&actions).is_empty());
    assert_eq!(core.controller(1).map(PlacementController::state), Some(PlacementState::Idle));
}

#[test]
fn click_on_unknown_object_is_ignored() {
    let mut core = editor_with(&GardenSnapshot::default());
    assert!(core.on_click(ClickTarget::Object(99)).is_empty());
}

#[test]
fn remove_control_requires_selection() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 10.0, 10.0)]));
    assert!(core.on_click(ClickTarget::RemoveControl(7)).is_empty());
    core.on_click(ClickTarget::Object(7));
    assert_eq!(core.on_click(ClickTarget::RemoveControl(7)), vec![Action::Remove { placed_id: 7 }]);
    // Removal is not applied locally; the object stays until resync.
    assert_eq!(core.placed_count(), 1);
}

// =============================================================
// Reposition
// =============================================================

#[test]
fn drag_start_sets_payload_and_hides_preview() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 50.0, 50.0)]));
    let actions = core.on_object_drag_start(7, Point::new(305.0, 155.0), Point::new(300.0, 150.0));
    assert_eq!(
        actions,
        vec![
            Action::SetDragPayload(DragPayload::Reposition(7)),
            Action::SuppressDragPreview,
            Action::RenderNeeded,
        ]
    );
    assert!(core.controller(7).is_some_and(PlacementController::is_dragging));
}

#[test]
fn drag_moves_issue_no_backend_calls() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 50.0, 50.0)]));
    core.on_object_drag_start(7, Point::new(300.0, 150.0), Point::new(300.0, 150.0));
    for step in 0..10 {
        let actions = core.on_object_drag(7, Point::new(300.0 + f64::from(step) * 5.0, 150.0));
        assert!(mutations(&actions).is_empty());
    }
}

#[test]
fn drag_past_edge_commits_clamped_move() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 90.0, 50.0)]));
    core.on_object_drag_start(7, Point::new(460.0, 150.0), Point::new(460.0, 150.0));
    // Raw x = (520 - 100) / 400 * 100 = 105.
    core.on_object_drag(7, Point::new(520.0, 150.0));
    let actions = core.on_object_drag_end(7);
    assert_eq!(actions[0], Action::Move { placed_id: 7, x: 100.0, y: 50.0 });
    assert_eq!(mutations(&actions).len(), 1);
}

#[test]
fn drag_end_keeps_identity() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 10.0, 10.0)]));
    core.on_object_drag_start(7, Point::new(140.0, 70.0), Point::new(140.0, 70.0));
    core.on_object_drag(7, Point::new(300.0, 150.0));
    core.on_object_drag_end(7);
    let ctl = core.controller(7).unwrap();
    assert_eq!(ctl.placed_id(), 7);
    assert_eq!(ctl.item_id(), "tree-1");
    assert_eq!(ctl.position(), Point::new(50.0, 50.0));
}

#[test]
fn origin_pointer_does_not_snap_object() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 50.0, 50.0)]));
    core.on_object_drag_start(7, Point::new(300.0, 150.0), Point::new(300.0, 150.0));
    assert!(core.on_object_drag(7, Point::new(0.0, 0.0)).is_empty());
    assert_eq!(core.on_object_drag_end(7)[0], Action::Move { placed_id: 7, x: 50.0, y: 50.0 });
}

#[test]
fn drag_end_without_start_is_noop() {
    let mut core = editor_with(&GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 50.0, 50.0)]));
    assert!(core.on_object_drag_end(7).is_empty());
    assert!(core.on_object_drag_end(99).is_empty());
}

// =============================================================
// Sync and render
// =============================================================

#[test]
fn sync_adds_drops_and_refreshes_controllers() {
    let mut core = editor_with(&GardenSnapshot::new(
        Vec::new(),
        vec![placed(1, "tree-1", 10.0, 10.0), placed(2, "rock1", 20.0, 20.0)],
    ));
    core.on_click(ClickTarget::Object(1));

    core.sync(&GardenSnapshot::new(
        Vec::new(),
        vec![placed(1, "tree-1", 15.0, 15.0), placed(3, "bench", 30.0, 30.0)],
    ));

    assert_eq!(core.placed_count(), 2);
    assert!(core.controller(2).is_none());
    let first = core.controller(1).unwrap();
    assert!(first.is_selected());
    assert_eq!(first.position(), Point::new(15.0, 15.0));
    assert_eq!(core.controller(3).map(PlacementController::state), Some(PlacementState::Idle));
}

#[test]
fn sync_restores_server_position_after_uncommitted_move() {
    let snapshot = GardenSnapshot::new(Vec::new(), vec![placed(7, "tree-1", 10.0, 10.0)]);
    let mut core = editor_with(&snapshot);
    core.on_object_drag_start(7, Point::new(140.0, 70.0), Point::new(140.0, 70.0));
    core.on_object_drag(7, Point::new(420.0, 210.0));
    core.on_object_drag_end(7);
    assert_eq!(core.controller(7).map(PlacementController::position), Some(Point::new(80.0, 80.0)));

    core.sync(&snapshot);
    assert_eq!(core.controller(7).map(PlacementController::position), Some(Point::new(10.0, 10.0)));
}

#[test]
fn render_list_puts_selected_above_idle() {
    let mut core = editor_with(&GardenSnapshot::new(
        Vec::new(),
        vec![placed(1, "tree-1", 10.0, 10.0), placed(2, "rock1", 20.0, 20.0), placed(3, "bench", 30.0, 30.0)],
    ));
    core.on_click(ClickTarget::Object(1));
    let order: Vec<PlacedId> = core.render_list().iter().map(|item| item.placed_id).collect();
    assert_eq!(order, vec![2, 3, 1]);

    let top = core.render_list().pop().unwrap();
    assert!(top.selected);
    assert!(top.show_remove_control);
    assert_eq!(top.image, "/assets/tree-1.png");
}
