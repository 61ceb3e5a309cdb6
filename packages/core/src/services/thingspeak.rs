use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::readings::error::SourceError;

/// Upper bound on a single channel request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ThingSpeakClient {
    feeds_url: String,
    http: Client,
}

impl ThingSpeakClient {
    pub fn new(feeds_url: String) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {}", err)))?;

        Ok(Self { feeds_url, http })
    }

    pub fn feeds_url(&self) -> &str {
        &self.feeds_url
    }
}

#[derive(Debug, Deserialize)]
pub struct ThingSpeakFeedsResponse {
    #[serde(default)]
    pub feeds: Option<Vec<ThingSpeakFeed>>,
}

/// One feed entry. Field values arrive as strings, numbers or null
/// depending on the channel firmware.
#[derive(Debug, Clone, Deserialize)]
pub struct ThingSpeakFeed {
    pub created_at: Option<String>,
    pub field1: Option<Value>,
    pub field2: Option<Value>,
    pub field3: Option<Value>,
    pub field4: Option<Value>,
    pub field5: Option<Value>,
    pub field6: Option<Value>,
}

impl ThingSpeakClient {
    pub async fn fetch_feeds(&self) -> Result<Vec<ThingSpeakFeed>, SourceError> {
        let response = self
            .http
            .get(&self.feeds_url)
            .send()
            .await
            .map_err(|err| SourceError::Network {
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SourceError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let payload = response
            .json::<ThingSpeakFeedsResponse>()
            .await
            .map_err(|err| SourceError::Format {
                message: err.to_string(),
            })?;

        Ok(payload.feeds.unwrap_or_default())
    }
}
