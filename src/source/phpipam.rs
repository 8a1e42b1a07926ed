// Copyright (c) 2025 - Cowboy AI, Inc.

//! phpIPAM REST API Source
//!
//! Implements [`IpamSource`] against the phpIPAM REST API:
//!
//! ```text
//! POST {base}/{app}/user/                  basic auth → data.token
//! GET  {base}/{app}/addresses/             token header → [address]
//! GET  {base}/{app}/tools/locations/       token header → [location]
//! GET  {base}/{app}/addresses/{id}/ping/   token header → data.exit_code
//! ```
//!
//! Every response is wrapped in phpIPAM's `{"code", "success", "message",
//! "data"}` envelope. The token is requested once per client and reused.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::config::IpamConnection;
use crate::domain::{AddressRecord, LocationRecord};
use crate::errors::{InventoryError, InventoryResult};
use crate::source::IpamSource;

/// phpIPAM response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: Option<Value>,
    message: Option<String>,
    data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// phpIPAM reports success as `true` or `1`
    fn is_failure(&self) -> bool {
        match &self.success {
            Some(Value::Bool(ok)) => !ok,
            Some(Value::Number(n)) => n.as_i64() != Some(1),
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct PingData {
    exit_code: Value,
}

impl PingData {
    fn exit_code(&self) -> InventoryResult<i64> {
        match &self.exit_code {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            InventoryError::UpstreamFetch(format!("invalid ping exit code: {}", self.exit_code))
        })
    }
}

/// phpIPAM client
pub struct PhpIpamClient {
    connection: IpamConnection,
    client: Client,
    token: OnceCell<String>,
}

impl PhpIpamClient {
    /// Create a new phpIPAM client
    pub fn new(connection: IpamConnection) -> InventoryResult<Self> {
        info!("Using phpIPAM at {}", connection.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(connection.timeout_secs))
            .user_agent(concat!("phpipam-inventory/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                InventoryError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            connection,
            client,
            token: OnceCell::new(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.connection.base_url.trim_end_matches('/'),
            self.connection.app_id.trim_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn authenticate(&self) -> InventoryResult<String> {
        let request = self
            .client
            .post(self.endpoint("user/"))
            .basic_auth(&self.connection.username, Some(&self.connection.password));

        let token = send::<TokenData>(request, "authentication")
            .await?
            .ok_or_else(|| {
                InventoryError::UpstreamFetch("authentication returned no token".to_string())
            })?
            .token;

        debug!("Authenticated against phpIPAM");
        Ok(token)
    }

    async fn token(&self) -> InventoryResult<&str> {
        self.token
            .get_or_try_init(|| self.authenticate())
            .await
            .map(String::as_str)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> InventoryResult<Option<T>> {
        let token = self.token().await?;
        let request = self.client.get(self.endpoint(path)).header("token", token);
        send(request, path).await
    }
}

async fn send<T: DeserializeOwned>(
    request: RequestBuilder,
    what: &str,
) -> InventoryResult<Option<T>> {
    let response = request
        .send()
        .await
        .map_err(|e| InventoryError::UpstreamFetch(format!("phpIPAM {} failed: {}", what, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(InventoryError::UpstreamFetch(format!(
            "phpIPAM {} returned {}: {}",
            what, status, body
        )));
    }

    let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
        InventoryError::UpstreamFetch(format!("phpIPAM {} returned invalid JSON: {}", what, e))
    })?;
    unwrap_envelope(envelope, what)
}

fn unwrap_envelope<T>(envelope: ApiResponse<T>, what: &str) -> InventoryResult<Option<T>> {
    if envelope.is_failure() {
        return Err(InventoryError::UpstreamFetch(format!(
            "phpIPAM {} failed: {}",
            what,
            envelope.message.as_deref().unwrap_or("no message")
        )));
    }
    Ok(envelope.data)
}

#[async_trait]
impl IpamSource for PhpIpamClient {
    async fn addresses(&self) -> InventoryResult<Vec<AddressRecord>> {
        let addresses: Vec<AddressRecord> = self.get("addresses/").await?.unwrap_or_default();
        debug!(count = addresses.len(), "Fetched addresses");
        Ok(addresses)
    }

    async fn locations(&self) -> InventoryResult<Vec<LocationRecord>> {
        let locations: Vec<LocationRecord> =
            self.get("tools/locations/").await?.unwrap_or_default();
        debug!(count = locations.len(), "Fetched locations");
        Ok(locations)
    }

    async fn online_state(&self, address_id: &str) -> InventoryResult<i64> {
        let ping: PingData = self
            .get(&format!("addresses/{}/ping/", address_id))
            .await?
            .ok_or_else(|| {
                InventoryError::UpstreamFetch(format!("no ping result for address {}", address_id))
            })?;
        ping.exit_code()
    }

    fn name(&self) -> &str {
        "phpipam"
    }
}
