//! In-process garden backend.
//!
//! Holds the same state the REST backend does (catalog, owned counts, credit
//! balance, placed objects) behind a mutex and enforces the same rejections.
//! Tests and the integration harness use it as the server side; any
//! operation can be made to fail once via [`MemoryGardenApi::fail_next`].

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use canvas::doc::{CatalogEntry, InventoryEntry, ItemId, PlacedId, PlacedObject};

use super::{GardenApi, PlaceRequest, PositionUpdate, PurchaseRequest};
use crate::error::GardenError;

pub const NOT_IN_INVENTORY: &str = "Item not available in inventory";
pub const PLACED_NOT_FOUND: &str = "Placed object not found";
pub const ITEM_NOT_FOUND: &str = "Item not found";
pub const INSUFFICIENT_CREDITS: &str = "Insufficient credits";
pub const INVALID_QUANTITY: &str = "Quantity must be positive";

/// One backend call, used to target failure injection and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchInventory,
    FetchPlaced,
    Place,
    UpdatePosition,
    Remove,
    FetchCatalog,
    Purchase,
}

#[derive(Debug, Default)]
struct MemoryState {
    catalog: BTreeMap<ItemId, CatalogEntry>,
    owned: BTreeMap<ItemId, u32>,
    credits: u32,
    placed: BTreeMap<PlacedId, PlacedObject>,
    next_id: PlacedId,
    failures: HashMap<Operation, GardenError>,
    calls: HashMap<Operation, usize>,
}

impl MemoryState {
    /// Record the call and hand back an injected failure, if one is armed.
    fn enter(&mut self, op: Operation) -> Result<(), GardenError> {
        *self.calls.entry(op).or_insert(0) += 1;
        match self.failures.remove(&op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Garden backend kept entirely in memory.
#[derive(Debug)]
pub struct MemoryGardenApi {
    state: Mutex<MemoryState>,
}

impl Default for MemoryGardenApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGardenApi {
    #[must_use]
    pub fn new() -> Self {
        Self { state: Mutex::new(MemoryState { next_id: 1, ..MemoryState::default() }) }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a catalog entry priced at `price` and own `quantity` of it.
    ///
    /// The image reference is derived from the id.
    #[must_use]
    pub fn with_item(self, id: &str, name: &str, price: u32, quantity: u32) -> Self {
        let entry = CatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            icon: String::new(),
            image: format!("/images/{id}.png"),
        };
        {
            let mut state = self.state();
            state.catalog.insert(entry.id.clone(), entry);
            state.owned.insert(id.to_string(), quantity);
        }
        self
    }

    #[must_use]
    pub fn with_credits(self, credits: u32) -> Self {
        self.state().credits = credits;
        self
    }

    /// Seed a placed object directly, bypassing inventory checks.
    ///
    /// Returns `None` if `item_id` is not in the catalog.
    pub fn insert_placed(&self, item_id: &str, x: f64, y: f64) -> Option<PlacedId> {
        let mut state = self.state();
        let catalog = state.catalog.get(item_id)?.clone();
        let placed_id = state.next_id;
        state.next_id += 1;
        state.placed.insert(placed_id, PlacedObject { placed_id, item_id: item_id.to_string(), x, y, catalog });
        Some(placed_id)
    }

    /// Make the next call of `op` fail with `err`. Later calls succeed again.
    pub fn fail_next(&self, op: Operation, err: GardenError) {
        self.state().failures.insert(op, err);
    }

    /// How many times `op` has been called, failed calls included.
    #[must_use]
    pub fn calls(&self, op: Operation) -> usize {
        self.state().calls.get(&op).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn credits(&self) -> u32 {
        self.state().credits
    }

    #[must_use]
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.state().owned.get(item_id).copied().unwrap_or(0)
    }

    /// Current server-side placed objects, ordered by id.
    #[must_use]
    pub fn placed(&self) -> Vec<PlacedObject> {
        self.state().placed.values().cloned().collect()
    }
}

#[async_trait::async_trait]
impl GardenApi for MemoryGardenApi {
    async fn fetch_inventory(&self) -> Result<Vec<InventoryEntry>, GardenError> {
        let mut state = self.state();
        state.enter(Operation::FetchInventory)?;
        let entries = state
            .owned
            .iter()
            .filter_map(|(item_id, &quantity)| {
                let catalog = state.catalog.get(item_id)?.clone();
                Some(InventoryEntry { item_id: item_id.clone(), quantity, catalog })
            })
            .collect();
        Ok(entries)
    }

    async fn fetch_placed(&self) -> Result<Vec<PlacedObject>, GardenError> {
        let mut state = self.state();
        state.enter(Operation::FetchPlaced)?;
        Ok(state.placed.values().cloned().collect())
    }

    async fn place(&self, request: &PlaceRequest) -> Result<PlacedObject, GardenError> {
        let mut state = self.state();
        state.enter(Operation::Place)?;
        let owned = state.owned.get(&request.item_id).copied().unwrap_or(0);
        let Some(catalog) = state.catalog.get(&request.item_id).cloned() else {
            return Err(GardenError::rejected(400, NOT_IN_INVENTORY));
        };
        if owned == 0 {
            return Err(GardenError::rejected(400, NOT_IN_INVENTORY));
        }
        let placed_id = state.next_id;
        state.next_id += 1;
        let object = PlacedObject { placed_id, item_id: request.item_id.clone(), x: request.x, y: request.y, catalog };
        state.placed.insert(placed_id, object.clone());
        Ok(object)
    }

    async fn update_position(&self, update: &PositionUpdate) -> Result<(), GardenError> {
        let mut state = self.state();
        state.enter(Operation::UpdatePosition)?;
        let Some(object) = state.placed.get_mut(&update.placed_id) else {
            return Err(GardenError::rejected(404, PLACED_NOT_FOUND));
        };
        object.x = update.x;
        object.y = update.y;
        Ok(())
    }

    async fn remove(&self, placed_id: PlacedId) -> Result<(), GardenError> {
        let mut state = self.state();
        state.enter(Operation::Remove)?;
        match state.placed.remove(&placed_id) {
            Some(_) => Ok(()),
            None => Err(GardenError::rejected(404, PLACED_NOT_FOUND)),
        }
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, GardenError> {
        let mut state = self.state();
        state.enter(Operation::FetchCatalog)?;
        Ok(state.catalog.values().cloned().collect())
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<(), GardenError> {
        let mut state = self.state();
        state.enter(Operation::Purchase)?;
        let Some(price) = state.catalog.get(&request.item_id).map(|entry| entry.price) else {
            return Err(GardenError::rejected(404, ITEM_NOT_FOUND));
        };
        if request.quantity == 0 {
            return Err(GardenError::rejected(400, INVALID_QUANTITY));
        }
        let cost = price.saturating_mul(request.quantity);
        if cost > state.credits {
            return Err(GardenError::rejected(400, INSUFFICIENT_CREDITS));
        }
        state.credits -= cost;
        *state.owned.entry(request.item_id.clone()).or_insert(0) += request.quantity;
        Ok(())
    }
}
