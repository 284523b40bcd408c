#![allow(clippy::float_cmp)]

use super::*;
use crate::api::memory::{MemoryGardenApi, Operation};

fn surface() -> SurfaceRect {
    SurfaceRect::new(100.0, 50.0, 400.0, 200.0)
}

/// Client-pixel point for a surface percentage.
fn client_at(x: f64, y: f64) -> Point {
    let s = surface();
    Point::new(s.left + s.width * x / 100.0, s.top + s.height * y / 100.0)
}

fn backend() -> Arc<MemoryGardenApi> {
    Arc::new(MemoryGardenApi::new().with_item("tree-1", "Oak", 20, 2).with_credits(100))
}

async fn view_over(api: &Arc<MemoryGardenApi>) -> GardenView {
    GardenView::mount(api.clone(), surface()).await
}

fn mutation_calls(api: &MemoryGardenApi) -> usize {
    api.calls(Operation::Place) + api.calls(Operation::UpdatePosition) + api.calls(Operation::Remove)
}

// =========================================================================
// drop
// =========================================================================

#[tokio::test]
async fn drop_at_center_places_once_and_renders_after_resync() {
    let api = backend();
    let mut view = view_over(&api).await;
    assert!(!view.loading());

    view.drop_payload(Some(DragPayload::NewPlacement("tree-1".into())), client_at(50.0, 50.0))
        .await
        .unwrap();

    assert_eq!(api.calls(Operation::Place), 1);
    let items = view.render_list();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_id, "tree-1");
    assert_eq!(items[0].position, Point::new(50.0, 50.0));
}

#[tokio::test]
async fn drop_without_payload_is_ignored() {
    let api = backend();
    let mut view = view_over(&api).await;
    view.drop_payload(None, client_at(50.0, 50.0)).await.unwrap();
    view.drop_payload(Some(DragPayload::Reposition(1)), client_at(50.0, 50.0)).await.unwrap();
    assert_eq!(mutation_calls(&api), 0);
}

#[tokio::test]
async fn rejected_drop_adds_nothing_locally() {
    let api = Arc::new(MemoryGardenApi::new().with_item("tree-1", "Oak", 20, 0));
    let mut view = view_over(&api).await;
    let err = view
        .drop_payload(Some(DragPayload::NewPlacement("tree-1".into())), client_at(10.0, 10.0))
        .await
        .unwrap_err();
    assert!(matches!(err, GardenError::Rejected { .. }));
    assert_eq!(view.editor().placed_count(), 0);
}

// =========================================================================
// reposition
// =========================================================================

#[tokio::test]
async fn drag_past_edge_commits_clamped_position() {
    let api = backend();
    let mut last = 0;
    for _ in 0..7 {
        last = api.insert_placed("tree-1", 20.0, 20.0).unwrap();
    }
    assert_eq!(last, 7);
    let mut view = view_over(&api).await;

    let origin = client_at(20.0, 20.0);
    let grab = Point::new(origin.x + 10.0, origin.y + 10.0);
    view.editor_mut().on_object_drag_start(7, grab, origin);
    // Raw x reaches 105%.
    let past = client_at(105.0, 50.0);
    view.editor_mut().on_object_drag(7, Point::new(past.x + 10.0, past.y + 10.0));
    view.finish_drag(7).await.unwrap();

    let moved = api.placed().into_iter().find(|o| o.placed_id == 7).unwrap();
    assert_eq!((moved.x, moved.y), (100.0, 50.0));
    assert_eq!(moved.item_id, "tree-1");
    let controller = view.editor().controller(7).unwrap();
    assert_eq!(controller.position(), Point::new(100.0, 50.0));
    assert!(!controller.is_dragging());
}

#[tokio::test]
async fn failed_move_keeps_local_position_until_refresh() {
    let api = backend();
    let id = api.insert_placed("tree-1", 20.0, 20.0).unwrap();
    let mut view = view_over(&api).await;

    let origin = client_at(20.0, 20.0);
    view.editor_mut().on_object_drag_start(id, origin, origin);
    view.editor_mut().on_object_drag(id, client_at(75.0, 75.0));
    api.fail_next(Operation::UpdatePosition, GardenError::Transport("connection reset".into()));

    let err = view.finish_drag(id).await.unwrap_err();
    assert!(err.retryable());
    assert_eq!(view.editor().controller(id).unwrap().position(), Point::new(75.0, 75.0));

    assert!(view.refresh().await);
    assert_eq!(view.editor().controller(id).unwrap().position(), Point::new(20.0, 20.0));
}

// =========================================================================
// click / remove
// =========================================================================

#[tokio::test]
async fn toggling_twice_issues_no_backend_calls() {
    let api = backend();
    let id = api.insert_placed("tree-1", 20.0, 20.0).unwrap();
    let mut view = view_over(&api).await;
    let before = view.render_list();

    view.click(ClickTarget::Object(id)).await.unwrap();
    assert!(view.editor().controller(id).unwrap().is_selected());
    view.click(ClickTarget::Object(id)).await.unwrap();

    assert_eq!(view.render_list(), before);
    assert_eq!(mutation_calls(&api), 0);
}

#[tokio::test]
async fn remove_control_deletes_selected_object() {
    let api = backend();
    let id = api.insert_placed("tree-1", 20.0, 20.0).unwrap();
    let mut view = view_over(&api).await;

    // Not selected yet: the control is not shown, so nothing happens.
    view.click(ClickTarget::RemoveControl(id)).await.unwrap();
    assert_eq!(api.calls(Operation::Remove), 0);

    view.click(ClickTarget::Object(id)).await.unwrap();
    view.click(ClickTarget::RemoveControl(id)).await.unwrap();
    assert_eq!(api.calls(Operation::Remove), 1);
    assert_eq!(view.editor().placed_count(), 0);
}

#[tokio::test]
async fn failed_remove_leaves_view_unchanged() {
    let api = backend();
    let id = api.insert_placed("tree-1", 20.0, 20.0).unwrap();
    let mut view = view_over(&api).await;
    view.click(ClickTarget::Object(id)).await.unwrap();
    api.fail_next(Operation::Remove, GardenError::rejected(404, "Placed object not found"));

    let err = view.click(ClickTarget::RemoveControl(id)).await.unwrap_err();
    assert_eq!(err.user_message(), "Placed object not found");
    assert_eq!(view.editor().placed_count(), 1);
    assert!(view.editor().controller(id).unwrap().is_selected());
}

// =========================================================================
// purchase / refresh
// =========================================================================

#[tokio::test]
async fn purchase_reveals_new_inventory() {
    let api = Arc::new(MemoryGardenApi::new().with_item("rock-1", "Boulder", 10, 0).with_credits(50));
    let mut view = view_over(&api).await;
    assert_eq!(view.editor().inventory().count(), 0);

    view.purchase("rock-1", 2).await.unwrap();
    let visible: Vec<_> = view.editor().inventory().map(|e| (e.item_id.clone(), e.quantity)).collect();
    assert_eq!(visible, vec![("rock-1".to_string(), 2)]);
}

#[tokio::test]
async fn refresh_failure_keeps_rendering_previous_state() {
    let api = backend();
    api.insert_placed("tree-1", 20.0, 20.0).unwrap();
    let mut view = view_over(&api).await;
    api.fail_next(Operation::FetchInventory, GardenError::Transport("offline".into()));
    assert!(!view.refresh().await);
    assert_eq!(view.render_list().len(), 1);
    assert!(!view.loading());
}
