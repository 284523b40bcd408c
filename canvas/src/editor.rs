use std::collections::BTreeMap;

use wasm_bindgen::JsValue;
use web_sys::{DataTransfer, DragEvent, Element, HtmlElement, HtmlImageElement, MouseEvent};

use crate::consts::TRANSPARENT_DRAG_IMAGE;
use crate::doc::{GardenSnapshot, InventoryEntry, ItemId, PlacedId};
use crate::payload::DragPayload;
use crate::placement::{PlacementController, Propagation};
use crate::surface::{Point, SurfaceRect};

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Actions returned from input handlers for the host to process.
///
/// `Place`, `Move` and `Remove` are backend commands; the rest only affect
/// the browser side of the gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Place { item_id: ItemId, x: f64, y: f64 },
    Move { placed_id: PlacedId, x: f64, y: f64 },
    Remove { placed_id: PlacedId },
    SetDragPayload(DragPayload),
    SuppressDragPreview,
    RenderNeeded,
}

impl Action {
    /// Whether the action requires a backend round trip.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Place { .. } | Self::Move { .. } | Self::Remove { .. })
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Empty surface area.
    Surface,
    /// The body of a placed object.
    Object(PlacedId),
    /// The removal control of a placed object.
    RemoveControl(PlacedId),
}

/// Answer to a dragover event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// Suppress default handling so the drop is permitted.
    Accept,
}

/// One placed object as the renderer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub placed_id: PlacedId,
    pub item_id: ItemId,
    pub image: String,
    pub name: String,
    pub position: Point,
    pub selected: bool,
    pub dragging: bool,
    pub show_remove_control: bool,
    pub z_index: i32,
}

/// Editor state and gesture logic with no DOM dependency.
///
/// Separated from `Editor` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EditorCore {
    pub surface: SurfaceRect,
    inventory: Vec<InventoryEntry>,
    controllers: BTreeMap<PlacedId, PlacementController>,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Update the surface's rendered bounds.
    pub fn set_surface(&mut self, surface: SurfaceRect) {
        self.surface = surface;
    }

    /// Adopt a resynchronized snapshot.
    ///
    /// Controllers for vanished objects are dropped, new objects start idle,
    /// and surviving controllers take the server position while keeping their
    /// selection.
    pub fn sync(&mut self, snapshot: &GardenSnapshot) {
        self.inventory = snapshot.inventory().to_vec();

        let mut next = BTreeMap::new();
        for object in snapshot.placed() {
            let controller = match self.controllers.remove(&object.placed_id) {
                Some(mut existing) => {
                    if existing.sync(object.clone()) {
                        existing
                    } else {
                        PlacementController::new(object.clone())
                    }
                }
                None => PlacementController::new(object.clone()),
            };
            next.insert(object.placed_id, controller);
        }
        self.controllers = next;
    }

    // --- Inventory source ---

    /// Inventory entries offered as drag sources (quantity > 0).
    pub fn inventory(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.inventory.iter().filter(|entry| entry.is_visible())
    }

    /// Start dragging an inventory entry onto the surface.
    ///
    /// Hidden or unknown entries produce no actions.
    #[must_use]
    pub fn start_inventory_drag(&self, item_id: &str) -> Vec<Action> {
        if !self.inventory().any(|entry| entry.item_id == item_id) {
            return Vec::new();
        }
        vec![Action::SetDragPayload(DragPayload::NewPlacement(item_id.to_owned()))]
    }

    // --- Surface ---

    /// Dragover carries no state change; the host must permit the drop.
    #[must_use]
    pub fn on_drag_over(&self) -> DropEffect {
        DropEffect::Accept
    }

    /// Handle a drop on the surface at `pointer` (client pixels).
    ///
    /// Only new placements are handled here; repositions commit on drag-end.
    /// The coordinate is clamped into `[0, 100]` before it leaves the editor.
    /// Nothing is added locally: the object appears after resynchronization.
    #[must_use]
    pub fn on_drop(&self, payload: Option<DragPayload>, pointer: Point) -> Vec<Action> {
        match payload {
            Some(DragPayload::NewPlacement(item_id)) => {
                let Some(percent) = self.surface.to_percent(pointer) else {
                    return Vec::new();
                };
                let Point { x, y } = percent.clamped();
                vec![Action::Place { item_id, x, y }]
            }
            Some(DragPayload::Reposition(_)) | None => Vec::new(),
        }
    }

    /// Handle a click. Object clicks stop propagation, so only clicks that
    /// reach the surface clear the selection.
    pub fn on_click(&mut self, target: ClickTarget) -> Vec<Action> {
        let propagation = match target {
            ClickTarget::Surface => Propagation::Continue,
            ClickTarget::Object(id) => match self.controllers.get_mut(&id) {
                Some(controller) => controller.toggle(),
                None => return Vec::new(),
            },
            ClickTarget::RemoveControl(id) => {
                return self
                    .controllers
                    .get(&id)
                    .and_then(PlacementController::request_remove)
                    .map(|placed_id| vec![Action::Remove { placed_id }])
                    .unwrap_or_default();
            }
        };
        if propagation == Propagation::Continue {
            for controller in self.controllers.values_mut() {
                controller.deselect();
            }
        }
        vec![Action::RenderNeeded]
    }

    // --- Placed-object drag ---

    /// Begin repositioning a placed object.
    pub fn on_object_drag_start(&mut self, id: PlacedId, pointer: Point, rendered_origin: Point) -> Vec<Action> {
        let Some(controller) = self.controllers.get_mut(&id) else {
            return Vec::new();
        };
        controller.begin_drag(pointer, rendered_origin);
        vec![
            Action::SetDragPayload(DragPayload::Reposition(id)),
            Action::SuppressDragPreview,
            Action::RenderNeeded,
        ]
    }

    /// Track a drag-move; no backend call is ever issued here.
    pub fn on_object_drag(&mut self, id: PlacedId, pointer: Point) -> Vec<Action> {
        let surface = self.surface;
        match self.controllers.get_mut(&id).map(|controller| controller.drag_to(pointer, &surface)) {
            Some(true) => vec![Action::RenderNeeded],
            _ => Vec::new(),
        }
    }

    /// Finish a drag and commit the clamped position.
    pub fn on_object_drag_end(&mut self, id: PlacedId) -> Vec<Action> {
        let committed = self.controllers.get_mut(&id).and_then(PlacementController::end_drag);
        match committed {
            Some(Point { x, y }) => vec![Action::Move { placed_id: id, x, y }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn controller(&self, id: PlacedId) -> Option<&PlacementController> {
        self.controllers.get(&id)
    }

    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.controllers.len()
    }

    /// Placed objects in draw order: stable by id within each stacking layer.
    #[must_use]
    pub fn render_list(&self) -> Vec<RenderItem> {
        let mut items: Vec<RenderItem> = self
            .controllers
            .values()
            .map(|controller| {
                let object = controller.object();
                RenderItem {
                    placed_id: object.placed_id,
                    item_id: object.item_id.clone(),
                    image: object.catalog.image.clone(),
                    name: object.catalog.name.clone(),
                    position: controller.position(),
                    selected: controller.is_selected(),
                    dragging: controller.is_dragging(),
                    show_remove_control: controller.shows_remove_control(),
                    z_index: controller.z_index(),
                }
            })
            .collect();
        items.sort_by_key(|item| item.z_index);
        items
    }
}

/// The browser-facing editor. Wraps `EditorCore` and owns the drop surface element.
///
/// Each handler reads what it needs from the DOM event, delegates to the
/// core, applies browser-only actions to the event's data transfer, and
/// returns the rest for the host.
pub struct Editor {
    surface: HtmlElement,
    pub core: EditorCore,
}

impl Editor {
    /// Create an editor bound to the given drop surface element.
    #[must_use]
    pub fn new(surface: HtmlElement) -> Self {
        Self { surface, core: EditorCore::new() }
    }

    /// Re-read the surface bounds; called at event time so layout changes are picked up.
    pub fn measure(&mut self) {
        self.core.set_surface(element_rect(&self.surface));
    }

    pub fn sync(&mut self, snapshot: &GardenSnapshot) {
        self.core.sync(snapshot);
    }

    /// Inventory `dragstart`.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if the data transfer rejects the payload.
    pub fn handle_inventory_drag_start(&self, event: &DragEvent, item_id: &str) -> Result<Vec<Action>, JsValue> {
        let actions = self.core.start_inventory_drag(item_id);
        apply_transfer_actions(event, actions)
    }

    /// Surface `dragover`: always permit the drop.
    pub fn handle_drag_over(&self, event: &DragEvent) {
        match self.core.on_drag_over() {
            DropEffect::Accept => event.prevent_default(),
        }
    }

    /// Surface `drop`.
    pub fn handle_drop(&mut self, event: &DragEvent) -> Vec<Action> {
        event.prevent_default();
        self.measure();
        let payload = event.data_transfer().and_then(|transfer| read_payload(&transfer));
        self.core.on_drop(payload, client_point(event))
    }

    /// Click on the surface, an object, or its removal control.
    pub fn handle_click(&mut self, event: &MouseEvent, target: ClickTarget) -> Vec<Action> {
        if matches!(target, ClickTarget::Object(_) | ClickTarget::RemoveControl(_)) {
            event.stop_propagation();
        }
        self.core.on_click(target)
    }

    /// Placed-object `dragstart`. `element` is the object's rendered element.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if the payload or drag image cannot be set.
    pub fn handle_object_drag_start(
        &mut self,
        event: &DragEvent,
        element: &Element,
        id: PlacedId,
    ) -> Result<Vec<Action>, JsValue> {
        self.measure();
        let rect = element_rect(element);
        let origin = Point::new(rect.left, rect.top);
        let actions = self.core.on_object_drag_start(id, client_point(event), origin);
        apply_transfer_actions(event, actions)
    }

    /// Placed-object `drag`.
    pub fn handle_object_drag(&mut self, event: &DragEvent, id: PlacedId) -> Vec<Action> {
        if self.core.controller(id).is_some_and(PlacementController::is_dragging) {
            event.prevent_default();
        }
        self.measure();
        self.core.on_object_drag(id, client_point(event))
    }

    /// Placed-object `dragend`.
    pub fn handle_object_drag_end(&mut self, id: PlacedId) -> Vec<Action> {
        self.core.on_object_drag_end(id)
    }

    #[must_use]
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.core.render_list()
    }
}

fn element_rect(element: &Element) -> SurfaceRect {
    let rect = element.get_bounding_client_rect();
    SurfaceRect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn read_payload(transfer: &DataTransfer) -> Option<DragPayload> {
    DragPayload::read_from(|key| match transfer.get_data(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    })
}

/// Apply payload and drag-image actions to the event's data transfer,
/// returning the actions the host still has to handle.
fn apply_transfer_actions(event: &DragEvent, actions: Vec<Action>) -> Result<Vec<Action>, JsValue> {
    let Some(transfer) = event.data_transfer() else {
        return Ok(actions);
    };
    let mut remaining = Vec::with_capacity(actions.len());
    for action in actions {
        match action {
            Action::SetDragPayload(payload) => {
                let (key, value) = payload.to_transfer();
                transfer.set_data(key, &value)?;
            }
            Action::SuppressDragPreview => {
                let image = HtmlImageElement::new()?;
                image.set_src(TRANSPARENT_DRAG_IMAGE);
                transfer.set_drag_image(&image, 0, 0);
            }
            other => remaining.push(other),
        }
    }
    Ok(remaining)
}
