//! # POS HTTP Client
//!
//! [`PosApi`] is the seam between the bridge and the network; the bridge
//! never touches reqwest directly, so tests can swap in a fake.
//!
//! ## Request Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {base_url}{endpoint}                                                   │
//! │     Content-Type: application/json                                      │
//! │     Authorization: Bearer {api_key}                                     │
//! │     X-API-Key: {api_key}                                                │
//! │                                                                         │
//! │  connect timeout ──► ConnectionFailed / Timeout                         │
//! │  non-2xx         ──► Http { status, body }                              │
//! │  bad JSON        ──► Decode                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::PosConfig;
use crate::error::{PosError, PosResult};
use crate::protocol::{
    HealthStatus, PosProduct, PosSale, ProductSyncRequest, SaleAck, StockLevel, WebhookSetup,
};

// =============================================================================
// API Trait
// =============================================================================

/// Every call the bridge makes to the POS.
#[async_trait]
pub trait PosApi: Send + Sync {
    async fn health(&self) -> PosResult<HealthStatus>;

    async fn sync_products(&self, products: &[PosProduct]) -> PosResult<()>;

    async fn sync_product(&self, product: &PosProduct) -> PosResult<()>;

    /// Sales for `wholesaler_id`, optionally only those after `from_date`.
    async fn sales(&self, wholesaler_id: &str, from_date: Option<&str>) -> PosResult<Vec<PosSale>>;

    /// Marks sales as processed so the POS stops returning them.
    async fn acknowledge_sales(&self, sale_ids: &[String]) -> PosResult<()>;

    async fn stock_updates(&self, wholesaler_id: &str) -> PosResult<Vec<StockLevel>>;

    async fn setup_webhook(&self, url: &str, events: &[String]) -> PosResult<()>;
}

// =============================================================================
// reqwest Implementation
// =============================================================================

#[derive(Debug, Clone)]
pub struct HttpPosClient {
    client: Client,
    base_url: String,
}

impl HttpPosClient {
    pub fn new(config: &PosConfig) -> PosResult<Self> {
        Url::parse(config.base_url())?;

        let key = &config.api.api_key;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| PosError::InvalidConfig("api_key is not a valid header value".into()))?;
        bearer.set_sensitive(true);
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|_| PosError::InvalidConfig("api_key is not a valid header value".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(HeaderName::from_static("x-api-key"), api_key);

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.api.connect_timeout())
            .timeout(config.api.request_timeout())
            .build()
            .map_err(|e| PosError::InvalidConfig(e.to_string()))?;

        Ok(HttpPosClient {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> PosResult<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint))?)
    }

    fn url_with_params(&self, endpoint: &str, params: &[(&str, &str)]) -> PosResult<Url> {
        let mut url = self.url(endpoint)?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> PosResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "POS API error");
            return Err(PosError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> PosResult<T> {
        debug!(%url, "GET");
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PosApi for HttpPosClient {
    async fn health(&self) -> PosResult<HealthStatus> {
        self.get_json(self.url("/health")?).await
    }

    async fn sync_products(&self, products: &[PosProduct]) -> PosResult<()> {
        let body = ProductSyncRequest {
            products: products.to_vec(),
        };
        debug!(count = products.len(), "POST /products/sync");
        self.send(self.client.post(self.url("/products/sync")?).json(&body))
            .await?;
        Ok(())
    }

    async fn sync_product(&self, product: &PosProduct) -> PosResult<()> {
        let mut url = self.url("/products")?;
        url.path_segments_mut()
            .map_err(|_| PosError::InvalidUrl(self.base_url.clone()))?
            .push(&product.id)
            .push("sync");
        debug!(id = %product.id, "PUT /products/{{id}}/sync");
        self.send(self.client.put(url).json(product)).await?;
        Ok(())
    }

    async fn sales(&self, wholesaler_id: &str, from_date: Option<&str>) -> PosResult<Vec<PosSale>> {
        let mut params = vec![("wholesalerId", wholesaler_id)];
        if let Some(from) = from_date {
            params.push(("fromDate", from));
        }
        self.get_json(self.url_with_params("/sales", &params)?).await
    }

    async fn acknowledge_sales(&self, sale_ids: &[String]) -> PosResult<()> {
        let body = SaleAck {
            sale_ids: sale_ids.to_vec(),
        };
        self.send(self.client.post(self.url("/sales/acknowledge")?).json(&body))
            .await?;
        Ok(())
    }

    async fn stock_updates(&self, wholesaler_id: &str) -> PosResult<Vec<StockLevel>> {
        self.get_json(self.url_with_params("/stock/updates", &[("wholesalerId", wholesaler_id)])?)
            .await
    }

    async fn setup_webhook(&self, url: &str, events: &[String]) -> PosResult<()> {
        Url::parse(url)?;
        let body = WebhookSetup {
            url: url.to_string(),
            events: events.to_vec(),
        };
        self.send(self.client.post(self.url("/webhooks/setup")?).json(&body))
            .await?;
        Ok(())
    }
}
