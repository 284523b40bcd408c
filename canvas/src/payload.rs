//! Drag payload: what a drag gesture carries across the data-transfer channel.
//!
//! A gesture either introduces a new object from the inventory or repositions
//! one already on the surface. The browser channel is a string map, so the
//! payload is encoded as exactly one key (`itemId` or `placedId`) and decoded
//! back into an explicit variant before any handler looks at it.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use crate::consts::{TRANSFER_KEY_ITEM, TRANSFER_KEY_PLACED};
use crate::doc::{ItemId, PlacedId};

/// The subject of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// Place a new instance of an owned catalog item.
    NewPlacement(ItemId),
    /// Move an object already on the surface.
    Reposition(PlacedId),
}

impl DragPayload {
    /// The data-transfer key and value encoding this payload.
    #[must_use]
    pub fn to_transfer(&self) -> (&'static str, String) {
        match self {
            Self::NewPlacement(item_id) => (TRANSFER_KEY_ITEM, item_id.clone()),
            Self::Reposition(placed_id) => (TRANSFER_KEY_PLACED, placed_id.to_string()),
        }
    }

    /// Decode a payload from a single data-transfer entry.
    ///
    /// Unknown keys, empty values, and non-numeric placed ids yield `None`.
    #[must_use]
    pub fn from_transfer(key: &str, value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match key {
            TRANSFER_KEY_ITEM => Some(Self::NewPlacement(value.to_owned())),
            TRANSFER_KEY_PLACED => match value.parse::<PlacedId>() {
                Ok(id) => Some(Self::Reposition(id)),
                Err(_) => None,
            },
            _ => None,
        }
    }

    /// Decode from a lookup over the transfer store, preferring a new placement.
    ///
    /// `lookup` returns the stored value for a key, or `None` when absent.
    pub fn read_from<F>(mut lookup: F) -> Option<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        [TRANSFER_KEY_ITEM, TRANSFER_KEY_PLACED]
            .into_iter()
            .find_map(|key| lookup(key).and_then(|value| Self::from_transfer(key, &value)))
    }
}
