//! Backend seam: the garden REST surface as a trait.
//!
//! DESIGN
//! ======
//! The store talks to the backend only through [`GardenApi`], so the HTTP
//! client ([`http::HttpGardenApi`]) and the in-process backend
//! ([`memory::MemoryGardenApi`]) are interchangeable. The backend owns all
//! validation (ownership, credits, existence); the client never
//! second-guesses it beyond coordinate sanity.

pub mod http;
pub mod memory;

use canvas::doc::{CatalogEntry, InventoryEntry, ItemId, PlacedId, PlacedObject};
use serde::{Deserialize, Serialize};

use crate::error::GardenError;

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of a place command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRequest {
    pub item_id: ItemId,
    pub x: f64,
    pub y: f64,
}

/// Body of a position-update command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub placed_id: PlacedId,
    pub x: f64,
    pub y: f64,
}

/// Body of a purchase command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Error body returned by the backend on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

// =============================================================================
// TRAIT
// =============================================================================

/// The backend calls the garden client consumes.
#[async_trait::async_trait]
pub trait GardenApi: Send + Sync {
    /// Owned inventory counts with their catalog entries.
    ///
    /// # Errors
    ///
    /// Transport or decode failures.
    async fn fetch_inventory(&self) -> Result<Vec<InventoryEntry>, GardenError>;

    /// Every object placed in the garden.
    ///
    /// # Errors
    ///
    /// Transport or decode failures.
    async fn fetch_placed(&self) -> Result<Vec<PlacedObject>, GardenError>;

    /// Create a placed object.
    ///
    /// # Errors
    ///
    /// `Rejected` when the item is not owned; transport failures otherwise.
    async fn place(&self, request: &PlaceRequest) -> Result<PlacedObject, GardenError>;

    /// Move a placed object.
    ///
    /// # Errors
    ///
    /// `Rejected` when the object does not exist; transport failures otherwise.
    async fn update_position(&self, update: &PositionUpdate) -> Result<(), GardenError>;

    /// Delete a placed object.
    ///
    /// # Errors
    ///
    /// `Rejected` when the object does not exist; transport failures otherwise.
    async fn remove(&self, placed_id: PlacedId) -> Result<(), GardenError>;

    /// Everything the shop sells.
    ///
    /// # Errors
    ///
    /// Transport or decode failures.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, GardenError>;

    /// Buy `quantity` of a catalog item.
    ///
    /// # Errors
    ///
    /// `Rejected` for unknown items or insufficient credits.
    async fn purchase(&self, request: &PurchaseRequest) -> Result<(), GardenError>;
}
