use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use pt_core::catalog::ItemRecord;
use pt_core::config::ApiConfig;
use pt_core::ids::ItemId;
use pt_core::order::{OrderReceipt, OrderRequest};
use pt_core::ports::{CatalogError, CatalogPort, OrderError, OrderPort};

use super::dto::{Envelope, ItemPayload, OrderPayload};
use super::mapper::{item_from_dto, order_body};

const ORDER_REJECTED: &str = "order rejected";
const ITEM_NOT_FOUND: &str = "item not found";

#[derive(Debug, Clone)]
pub struct HttpMarketApiConfig {
    pub base_url: String,
    pub item_path: String,
    pub order_path: String,
    pub request_timeout: Duration,
    pub bearer_token: Option<String>,
}

impl From<&ApiConfig> for HttpMarketApiConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            item_path: config.item_path.clone(),
            order_path: config.order_path.clone(),
            request_timeout: config.request_timeout(),
            bearer_token: config.bearer_token.clone(),
        }
    }
}

/// Client for the marketplace REST API, serving both the catalog and the
/// order endpoint.
pub struct HttpMarketApi {
    client: reqwest::Client,
    config: HttpMarketApiConfig,
}

/// Raw response: status plus body, read in full before decoding.
struct RawResponse {
    status: StatusCode,
    body: String,
}

impl HttpMarketApi {
    pub fn new(config: HttpMarketApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    fn item_url(&self, item_id: ItemId) -> String {
        let path = self.config.item_path.trim_end_matches('/');
        format!("{}/{}", self.url(path), item_id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.bearer_token {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<RawResponse, reqwest::Error> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>, serde_json::Error> {
    serde_json::from_str(body)
}

#[async_trait]
impl CatalogPort for HttpMarketApi {
    #[tracing::instrument(name = "infra.http.fetch_item", skip(self), fields(item_id = %item_id))]
    async fn fetch_item(&self, item_id: ItemId) -> Result<ItemRecord, CatalogError> {
        let url = self.item_url(item_id);
        debug!(url = %url, "Fetching item");

        let raw = self
            .send(self.client.get(&url))
            .await
            .map_err(|e| CatalogError::Transport(transport_message(&e)))?;

        if !raw.status.is_success() {
            // Some rejections come back as 4xx with a readable envelope.
            if let Ok(envelope) = decode::<serde_json::Value>(&raw.body) {
                if let Some(message) = envelope.message() {
                    return Err(CatalogError::Rejected {
                        message: message.to_string(),
                    });
                }
            }
            warn!(status = raw.status.as_u16(), "Item request failed");
            return Err(CatalogError::HttpStatus {
                status: raw.status.as_u16(),
            });
        }

        let envelope: Envelope<ItemPayload> =
            decode(&raw.body).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        if !envelope.status {
            return Err(CatalogError::Rejected {
                message: envelope.message().unwrap_or(ITEM_NOT_FOUND).to_string(),
            });
        }

        let dto = envelope
            .data
            .and_then(|payload| payload.data)
            .ok_or_else(|| CatalogError::Malformed("response has no item".to_string()))?;
        item_from_dto(dto)
    }
}

#[async_trait]
impl OrderPort for HttpMarketApi {
    #[tracing::instrument(
        name = "infra.http.submit_order",
        skip(self, order),
        fields(lines = order.line_items().len(), payment_method = %order.payment_method())
    )]
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, OrderError> {
        let url = self.url(&self.config.order_path);
        let body = order_body(order);
        debug!(url = %url, "Submitting order");

        let raw = self
            .send(self.client.post(&url).json(&body))
            .await
            .map_err(|e| OrderError::Transport(transport_message(&e)))?;

        let envelope = match decode::<OrderPayload>(&raw.body) {
            Ok(envelope) => envelope,
            Err(_) if !raw.status.is_success() => {
                return Err(OrderError::Transport(format!(
                    "unexpected HTTP status {}",
                    raw.status.as_u16()
                )));
            }
            Err(e) => return Err(OrderError::Malformed(e.to_string())),
        };

        let detail = envelope
            .data
            .as_ref()
            .and_then(|payload| payload.message.as_deref())
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string);

        if !raw.status.is_success() || !envelope.status {
            let message = detail
                .or_else(|| envelope.message().map(str::to_string))
                .unwrap_or_else(|| ORDER_REJECTED.to_string());
            warn!(status = raw.status.as_u16(), message = %message, "Order rejected");
            return Err(OrderError::Rejected { message });
        }

        let message = envelope
            .message()
            .map(str::to_string)
            .or(detail)
            .unwrap_or_default();
        Ok(OrderReceipt { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str, item_path: &str) -> HttpMarketApi {
        HttpMarketApi::new(HttpMarketApiConfig {
            base_url: base_url.into(),
            item_path: item_path.into(),
            order_path: "/order/new".into(),
            request_timeout: Duration::from_secs(1),
            bearer_token: None,
        })
        .unwrap()
    }

    #[test]
    fn item_url_joins_base_path_and_id() {
        let api = api("http://localhost:8000/", "/hewan/get/");
        assert_eq!(
            api.item_url(ItemId::new(7)),
            "http://localhost:8000/hewan/get/7"
        );
        assert_eq!(api.url("order/new"), "http://localhost:8000/order/new");
    }
}
