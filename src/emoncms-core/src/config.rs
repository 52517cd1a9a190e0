use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,

    /// Per-request timeout, written in seconds in config files
    #[serde(
        default = "default_request_timeout",
        serialize_with = "serialize_secs",
        deserialize_with = "deserialize_secs"
    )]
    pub request_timeout: Duration,

    // TLS configuration
    #[serde(default)]
    pub insecure_skip_verify: bool,

    /// Keep one HTTP client for the lifetime of the emoncms client
    #[serde(default)]
    pub reuse_session: bool,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(20)
}

fn serialize_secs<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.as_secs_f64())
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    pub fn with_reuse_session(mut self, reuse: bool) -> Self {
        self.reuse_session = reuse;
        self
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Full URL of a route, tolerating slashes on either side of the join
    pub fn route_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            api_key: String::new(),
            request_timeout: default_request_timeout(),
            insecure_skip_verify: false,
            reuse_session: false,
        }
    }
}
