//! emoncms Client Library
//!
//! HTTP client for the emoncms energy-monitoring API.
//!
//! ```rust,no_run
//! use emoncms_rs::{ClientConfig, EmoncmsClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = EmoncmsClient::new(ClientConfig::new("http://192.168.1.10", "apikey"));
//!     if let Some(feeds) = client.list_feeds().await {
//!         for feed in feeds {
//!             println!("{:?} {:?}", feed.id(), feed.uuid());
//!         }
//!     }
//! }
//! ```

mod client;

pub use client::{EmoncmsClient, FEED_FIELDS_ROUTE, FEED_LIST_ROUTE, UUID_ROUTE};
pub use emoncms_core::models::status_message;
pub use emoncms_core::{ClientConfig, Feed, RequestResult};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("time out error: {0}")]
    Timeout(reqwest::Error),

    #[error("client error: {0}")]
    Transport(reqwest::Error),

    #[error("{}", status_message(*.0))]
    Status(u16),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err)
        } else {
            ClientError::Transport(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
