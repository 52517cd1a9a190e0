use crate::{ClientError, Result};
use emoncms_core::models::{render_value, Payload};
use emoncms_core::{ClientConfig, Feed, RequestResult};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;

/// Account uuid lookup, available from emoncms 11.5.7
pub const UUID_ROUTE: &str = "user/getuuid.json";
pub const FEED_LIST_ROUTE: &str = "feed/list.json";
pub const FEED_FIELDS_ROUTE: &str = "feed/aget.json";

/// emoncms REST API Client
#[derive(Debug, Clone)]
pub struct EmoncmsClient {
    config: ClientConfig,
    session: Option<HttpClient>,
}

fn build_http_client(config: &ClientConfig) -> Result<HttpClient> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .danger_accept_invalid_certs(config.insecure_skip_verify)
        .build()?;
    Ok(client)
}

impl EmoncmsClient {
    /// Create a new client for the server described by `config`
    pub fn new(config: ClientConfig) -> Self {
        tracing::info!("Initializing emoncms client for {}", config.base_url);

        let session = if config.reuse_session {
            match build_http_client(&config) {
                Ok(client) => Some(client),
                Err(err) => {
                    tracing::warn!("Shared session unavailable, falling back to per-call: {}", err);
                    None
                }
            }
        } else {
            None
        };

        Self { config, session }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn http_client(&self) -> Result<HttpClient> {
        match &self.session {
            Some(client) => Ok(client.clone()),
            None => build_http_client(&self.config),
        }
    }

    async fn send(&self, path: &str, params: Option<&[(&str, &str)]>) -> Result<Payload> {
        let url = self.config.route_url(path);
        let default_params = [("apikey", self.config.api_key.as_str())];
        let params = match params {
            Some(params) if !params.is_empty() => params,
            _ => &default_params[..],
        };

        let response = self.http_client()?.get(&url).query(params).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(Payload::inspect(value))
    }

    async fn fetch_payload(&self, path: &str, params: Option<&[(&str, &str)]>) -> Result<Payload> {
        tracing::debug!("requesting emoncms on {}", path);

        let result = self.send(path, params).await;
        if let Err(err) = &result {
            tracing::error!("emoncms request on {} failed: {}", path, err);
        }
        result
    }

    /// GET a route and keep the failure category
    ///
    /// Without `params` (or with an empty slice) the api key is sent as
    /// `apikey`. Explicit params replace it entirely. A `{success, message}`
    /// envelope is unwrapped to its `message`, whatever its `success`.
    pub async fn fetch(&self, path: &str, params: Option<&[(&str, &str)]>) -> Result<Value> {
        self.fetch_payload(path, params).await.map(Payload::into_value)
    }

    /// GET a route, folding every failure into the result
    pub async fn request(&self, path: &str, params: Option<&[(&str, &str)]>) -> RequestResult {
        match self.fetch(path, params).await {
            Ok(message) => RequestResult::ok(message),
            Err(err) => RequestResult::failure(err.to_string()),
        }
    }

    /// Get the account uuid, if the server exposes one
    pub async fn get_uuid(&self) -> Option<String> {
        let payload = self.fetch_payload(UUID_ROUTE, None).await.ok()?;
        if payload.is_failure() {
            tracing::debug!(
                "no account uuid on {}: {}",
                self.config.base_url,
                render_value(&payload.into_value())
            );
            return None;
        }

        match payload.into_value() {
            Value::String(uuid) if !uuid.is_empty() => Some(uuid),
            other => {
                tracing::debug!("no account uuid on {}: {}", self.config.base_url, other);
                None
            }
        }
    }

    /// List all feeds, each namespaced with the account uuid when one is available
    pub async fn list_feeds(&self) -> Option<Vec<Feed>> {
        let (uuid, feed_data) =
            tokio::join!(self.get_uuid(), self.request(FEED_LIST_ROUTE, None));

        let payload = feed_data.into_payload()?;
        let mut feeds: Vec<Feed> = match serde_json::from_value(payload) {
            Ok(feeds) => feeds,
            Err(err) => {
                tracing::error!("unexpected feed list from {}: {}", self.config.base_url, err);
                return None;
            }
        };

        if let Some(uuid) = uuid {
            for feed in &mut feeds {
                feed.set_uuid(&uuid);
            }
        }

        Some(feeds)
    }

    /// Get all fields of a single feed
    pub async fn get_feed_fields(&self, feed_id: u64) -> Option<Feed> {
        let id = feed_id.to_string();
        let params = [("apikey", self.config.api_key.as_str()), ("id", id.as_str())];

        match self.request(FEED_FIELDS_ROUTE, Some(&params[..])).await.into_payload()? {
            Value::Object(fields) => Some(Feed::from(fields)),
            other => {
                tracing::debug!("feed {} has no field mapping: {}", feed_id, other);
                None
            }
        }
    }
}
