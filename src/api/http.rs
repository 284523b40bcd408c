//! HTTP implementation of [`GardenApi`] on `reqwest`.
//!
//! Non-success responses are read for a `{"detail": "..."}` body; when one is
//! present the failure is a user-displayable rejection, otherwise it is a bare
//! status failure.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use canvas::doc::{CatalogEntry, InventoryEntry, PlacedId, PlacedObject};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{ErrorBody, GardenApi, PlaceRequest, PositionUpdate, PurchaseRequest};
use crate::config::GardenConfig;
use crate::error::GardenError;

const INVENTORY_PATH: &str = "/api/garden/inventory";
const PLACED_PATH: &str = "/api/garden/objects";
const PLACE_PATH: &str = "/api/garden/place";
const UPDATE_POSITION_PATH: &str = "/api/garden/update_position";
const CATALOG_PATH: &str = "/api/shop/items";
const PURCHASE_PATH: &str = "/api/shop/buy";

fn remove_path(placed_id: PlacedId) -> String {
    format!("/api/garden/remove/{placed_id}")
}

/// Interpret an error body: the `detail` string if the body carries one.
fn rejection_detail(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.detail.trim().is_empty() => Some(parsed.detail),
        _ => None,
    }
}

fn status_error(status: u16, body: &str) -> GardenError {
    match rejection_detail(body) {
        Some(detail) => GardenError::rejected(status, detail),
        None => GardenError::Status { status },
    }
}

/// Garden backend reached over HTTP.
pub struct HttpGardenApi {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpGardenApi {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the underlying client cannot be built.
    pub fn new(config: &GardenConfig) -> Result<Self, GardenError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| GardenError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_url.clone(), auth_token: config.auth_token.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, GardenError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GardenError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| GardenError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<String, GardenError> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl GardenApi for HttpGardenApi {
    async fn fetch_inventory(&self) -> Result<Vec<InventoryEntry>, GardenError> {
        self.get_json(INVENTORY_PATH).await
    }

    async fn fetch_placed(&self) -> Result<Vec<PlacedObject>, GardenError> {
        self.get_json(PLACED_PATH).await
    }

    async fn place(&self, request: &PlaceRequest) -> Result<PlacedObject, GardenError> {
        let text = self.post_json(PLACE_PATH, request).await?;
        serde_json::from_str(&text).map_err(|e| GardenError::Decode(e.to_string()))
    }

    async fn update_position(&self, update: &PositionUpdate) -> Result<(), GardenError> {
        self.post_json(UPDATE_POSITION_PATH, update).await?;
        Ok(())
    }

    async fn remove(&self, placed_id: PlacedId) -> Result<(), GardenError> {
        self.send(self.request(Method::POST, &remove_path(placed_id))).await?;
        Ok(())
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, GardenError> {
        self.get_json(CATALOG_PATH).await
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<(), GardenError> {
        self.post_json(PURCHASE_PATH, request).await?;
        Ok(())
    }
}
