//! Garden state store: the client's single owner of inventory and placed
//! objects.
//!
//! DESIGN
//! ======
//! Every successful mutation is followed by a full resynchronization
//! ([`GardenStore::fetch_all`]) that replaces both collections wholesale.
//! Mutations are not serialized against each other: when two are in flight,
//! whichever resynchronization finishes last decides the client state. Any
//! drift this causes heals on the next resynchronization.
//!
//! Mutation failures propagate to the caller untouched; fetch failures are
//! logged and swallowed so the view keeps rendering the last good snapshot.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use canvas::doc::{CatalogEntry, GardenSnapshot, PlacedId, PlacedObject};
use canvas::surface::Point;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::{GardenApi, PlaceRequest, PositionUpdate, PurchaseRequest};
use crate::error::GardenError;

/// Clamp a requested position, rejecting coordinates that cannot be clamped.
fn checked_position(x: f64, y: f64) -> Result<Point, GardenError> {
    let point = Point::new(x, y);
    if !point.is_finite() {
        return Err(GardenError::InvalidPosition { x, y });
    }
    Ok(point.clamped())
}

pub struct GardenStore {
    api: Arc<dyn GardenApi>,
    snapshot: RwLock<GardenSnapshot>,
    loading: AtomicBool,
    revision: AtomicU64,
}

impl GardenStore {
    /// A store with empty collections. It reports `loading` until the first
    /// [`fetch_all`](Self::fetch_all) completes.
    #[must_use]
    pub fn new(api: Arc<dyn GardenApi>) -> Self {
        Self {
            api,
            snapshot: RwLock::new(GardenSnapshot::default()),
            loading: AtomicBool::new(true),
            revision: AtomicU64::new(0),
        }
    }

    /// Build a store and run the initial fetch.
    pub async fn mount(api: Arc<dyn GardenApi>) -> Self {
        let store = Self::new(api);
        store.fetch_all().await;
        store
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Number of successful resynchronizations so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    /// Copy of the current collections.
    pub async fn snapshot(&self) -> GardenSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Fetch inventory and placed objects concurrently and replace both.
    ///
    /// Returns whether the snapshot was replaced. A failure of either fetch
    /// leaves the previous snapshot in place.
    pub async fn fetch_all(&self) -> bool {
        self.loading.store(true, Ordering::Release);
        let (inventory, placed) = tokio::join!(self.api.fetch_inventory(), self.api.fetch_placed());
        let replaced = match (inventory, placed) {
            (Ok(inventory), Ok(placed)) => {
                let next = GardenSnapshot::new(inventory, placed);
                let (items, objects) = (next.inventory().len(), next.placed_count());
                *self.snapshot.write().await = next;
                let revision = self.revision.fetch_add(1, Ordering::AcqRel) + 1;
                debug!(revision, items, objects, "garden: resynchronized");
                true
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, code = e.error_code(), "garden: fetch failed; keeping previous snapshot");
                false
            }
        };
        self.loading.store(false, Ordering::Release);
        replaced
    }

    /// Place a new object from inventory, then resynchronize.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` for non-finite coordinates; otherwise whatever the
    /// backend returned. Nothing local changes on failure.
    pub async fn place(&self, item_id: &str, x: f64, y: f64) -> Result<PlacedObject, GardenError> {
        let at = checked_position(x, y)?;
        let request = PlaceRequest { item_id: item_id.to_string(), x: at.x, y: at.y };
        match self.api.place(&request).await {
            Ok(created) => {
                info!(placed_id = created.placed_id, item_id, x = at.x, y = at.y, "garden: placed object");
                self.fetch_all().await;
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, item_id, "garden: place failed");
                Err(e)
            }
        }
    }

    /// Move a placed object, then resynchronize.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` for non-finite coordinates; otherwise whatever the
    /// backend returned.
    pub async fn move_object(&self, placed_id: PlacedId, x: f64, y: f64) -> Result<(), GardenError> {
        let at = checked_position(x, y)?;
        let update = PositionUpdate { placed_id, x: at.x, y: at.y };
        match self.api.update_position(&update).await {
            Ok(()) => {
                info!(placed_id, x = at.x, y = at.y, "garden: moved object");
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, placed_id, "garden: move failed");
                Err(e)
            }
        }
    }

    /// Remove a placed object, then resynchronize.
    ///
    /// # Errors
    ///
    /// Whatever the backend returned, including a rejection for unknown ids.
    pub async fn remove(&self, placed_id: PlacedId) -> Result<(), GardenError> {
        match self.api.remove(placed_id).await {
            Ok(()) => {
                info!(placed_id, "garden: removed object");
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, placed_id, "garden: remove failed");
                Err(e)
            }
        }
    }

    /// Buy `quantity` of a catalog item, then resynchronize.
    ///
    /// # Errors
    ///
    /// Whatever the backend returned (unknown item, insufficient credits).
    pub async fn purchase(&self, item_id: &str, quantity: u32) -> Result<(), GardenError> {
        let request = PurchaseRequest { item_id: item_id.to_string(), quantity };
        match self.api.purchase(&request).await {
            Ok(()) => {
                info!(item_id, quantity, "garden: purchased");
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, item_id, "garden: purchase failed");
                Err(e)
            }
        }
    }

    /// Shop catalog, fetched on every call.
    ///
    /// # Errors
    ///
    /// Transport or decode failures.
    pub async fn shop_items(&self) -> Result<Vec<CatalogEntry>, GardenError> {
        self.api.fetch_catalog().await
    }
}
