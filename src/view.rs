//! Garden view: the editor engine wired to the store.
//!
//! The editor turns gestures into [`Action`]s without touching the network.
//! [`GardenView::dispatch`] executes the mutating ones against the
//! [`GardenStore`] in order and re-syncs the editor from every new snapshot.
//! A failed mutation stops the batch and is returned for the caller to show;
//! the editor keeps whatever it displayed until the next resynchronization.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::sync::Arc;

use canvas::doc::PlacedId;
use canvas::editor::{Action, ClickTarget, EditorCore, RenderItem};
use canvas::payload::DragPayload;
use canvas::surface::{Point, SurfaceRect};
use tracing::debug;

use crate::api::GardenApi;
use crate::error::GardenError;
use crate::store::GardenStore;

pub struct GardenView {
    store: GardenStore,
    editor: EditorCore,
    synced_revision: u64,
}

impl GardenView {
    /// Build the store, run the initial fetch, and sync the editor.
    pub async fn mount(api: Arc<dyn GardenApi>, surface: SurfaceRect) -> Self {
        let mut editor = EditorCore::new();
        editor.set_surface(surface);
        let mut view = Self { store: GardenStore::mount(api).await, editor, synced_revision: 0 };
        view.sync_editor().await;
        view
    }

    #[must_use]
    pub fn store(&self) -> &GardenStore {
        &self.store
    }

    #[must_use]
    pub fn editor(&self) -> &EditorCore {
        &self.editor
    }

    /// Direct access for gestures that never reach the backend (drag-start,
    /// drag-move, surface resize).
    pub fn editor_mut(&mut self) -> &mut EditorCore {
        &mut self.editor
    }

    /// Whether to show the loading indicator.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    #[must_use]
    pub fn render_list(&self) -> Vec<RenderItem> {
        self.editor.render_list()
    }

    /// Adopt the store's snapshot if it changed since the last sync.
    async fn sync_editor(&mut self) {
        let revision = self.store.revision();
        if revision == self.synced_revision {
            return;
        }
        let snapshot = self.store.snapshot().await;
        self.editor.sync(&snapshot);
        self.synced_revision = revision;
        debug!(revision, objects = self.editor.placed_count(), "view: editor synced");
    }

    /// Execute editor actions. Non-mutating actions are the host's concern
    /// and are skipped here.
    ///
    /// # Errors
    ///
    /// The first failed mutation; later actions in the batch are not run.
    pub async fn dispatch(&mut self, actions: Vec<Action>) -> Result<(), GardenError> {
        for action in actions {
            match action {
                Action::Place { item_id, x, y } => {
                    self.store.place(&item_id, x, y).await?;
                }
                Action::Move { placed_id, x, y } => self.store.move_object(placed_id, x, y).await?,
                Action::Remove { placed_id } => self.store.remove(placed_id).await?,
                Action::SetDragPayload(_) | Action::SuppressDragPreview | Action::RenderNeeded => continue,
            }
            self.sync_editor().await;
        }
        Ok(())
    }

    /// A drop on the surface.
    ///
    /// # Errors
    ///
    /// A rejected or failed placement.
    pub async fn drop_payload(&mut self, payload: Option<DragPayload>, pointer: Point) -> Result<(), GardenError> {
        let actions = self.editor.on_drop(payload, pointer);
        self.dispatch(actions).await
    }

    /// End of a reposition drag: commit the clamped position.
    ///
    /// # Errors
    ///
    /// A failed move. The object stays where it was dropped until the next
    /// resynchronization.
    pub async fn finish_drag(&mut self, placed_id: PlacedId) -> Result<(), GardenError> {
        let actions = self.editor.on_object_drag_end(placed_id);
        self.dispatch(actions).await
    }

    /// A click on the surface, an object, or an object's remove control.
    ///
    /// # Errors
    ///
    /// A failed removal.
    pub async fn click(&mut self, target: ClickTarget) -> Result<(), GardenError> {
        let actions = self.editor.on_click(target);
        self.dispatch(actions).await
    }

    /// Buy from the shop; the new stock shows up in the inventory source.
    ///
    /// # Errors
    ///
    /// Unknown item or insufficient credits.
    pub async fn purchase(&mut self, item_id: &str, quantity: u32) -> Result<(), GardenError> {
        self.store.purchase(item_id, quantity).await?;
        self.sync_editor().await;
        Ok(())
    }

    /// Resynchronize from the backend. Returns whether new data arrived.
    pub async fn refresh(&mut self) -> bool {
        let replaced = self.store.fetch_all().await;
        self.sync_editor().await;
        replaced
    }
}
