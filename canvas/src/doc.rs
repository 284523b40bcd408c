//! Garden document model: catalog entries, owned inventory, placed objects.
//!
//! These types are both the in-memory model and the wire format of the
//! garden REST surface, so serde attributes here follow the backend's field
//! names (`itemId`, `placed_id`, nested `object`). `GardenSnapshot` bundles
//! the two collections the client keeps in sync with the server.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::surface::Point;

/// Identifier of a catalog entry (e.g. `"tree1"`).
pub type ItemId = String;

/// Server-assigned identifier of a placed object.
pub type PlacedId = i64;

/// Static definition of something that can be owned and placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Catalog identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Short description shown in the shop.
    #[serde(default)]
    pub description: String,
    /// Unit price in credits.
    pub price: u32,
    /// Small icon reference.
    #[serde(default)]
    pub icon: String,
    /// Image reference used when rendering a placed object.
    pub image: String,
}

/// How many of a catalog entry the user owns.
///
/// Quantity is unsigned so a negative count can never be represented.
/// Entries with quantity 0 stay in the collection but are hidden from the
/// drag source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(rename = "itemId")]
    pub item_id: ItemId,
    pub quantity: u32,
    #[serde(rename = "object")]
    pub catalog: CatalogEntry,
}

impl InventoryEntry {
    /// Whether the entry should be offered as a drag source.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.quantity > 0
    }
}

/// A positioned instance of a catalog entry on the garden surface.
///
/// `placed_id` and `item_id` never change after creation; only `x`/`y` move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub placed_id: PlacedId,
    pub item_id: ItemId,
    /// Horizontal position as a percentage of the surface width.
    pub x: f64,
    /// Vertical position as a percentage of the surface height.
    pub y: f64,
    /// Denormalized catalog entry for rendering.
    #[serde(rename = "object")]
    pub catalog: CatalogEntry,
}

impl PlacedObject {
    /// Position as a percentage point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The client's full view of one garden: owned inventory plus placed objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GardenSnapshot {
    inventory: Vec<InventoryEntry>,
    placed: Vec<PlacedObject>,
}

impl GardenSnapshot {
    /// Build a snapshot from server collections.
    ///
    /// Placed objects are keyed by `placed_id`; if the server repeats an id
    /// the later entry wins. The result is ordered by id.
    #[must_use]
    pub fn new(inventory: Vec<InventoryEntry>, placed: Vec<PlacedObject>) -> Self {
        let by_id: BTreeMap<PlacedId, PlacedObject> = placed
            .into_iter()
            .map(|obj| (obj.placed_id, obj))
            .collect();
        Self { inventory, placed: by_id.into_values().collect() }
    }

    /// Every inventory entry, including those with quantity 0.
    #[must_use]
    pub fn inventory(&self) -> &[InventoryEntry] {
        &self.inventory
    }

    /// Inventory entries that may be dragged onto the surface.
    pub fn visible_inventory(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.inventory.iter().filter(|entry| entry.is_visible())
    }

    /// Look up an inventory entry by catalog id.
    #[must_use]
    pub fn inventory_entry(&self, item_id: &str) -> Option<&InventoryEntry> {
        self.inventory.iter().find(|entry| entry.item_id == item_id)
    }

    /// Placed objects ordered by id.
    #[must_use]
    pub fn placed(&self) -> &[PlacedObject] {
        &self.placed
    }

    /// Look up a placed object by id.
    #[must_use]
    pub fn placed_object(&self, placed_id: PlacedId) -> Option<&PlacedObject> {
        self.placed.iter().find(|obj| obj.placed_id == placed_id)
    }

    /// Number of placed objects.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Returns `true` when nothing is owned and nothing is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty() && self.placed.is_empty()
    }
}
