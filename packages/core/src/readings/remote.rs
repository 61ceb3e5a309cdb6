//! Remote channel source
//!
//! Adapts the ThingSpeakClient to implement the ReadingSource trait

use async_trait::async_trait;
use serde_json::Value;

use crate::readings::{
    provider::{ReadingSource, SourceResult},
    types::RawRecord,
};
use crate::services::thingspeak::{ThingSpeakClient, ThingSpeakFeed};

/// Adapter that implements ReadingSource for ThingSpeakClient
pub struct RemoteChannelSource {
    client: ThingSpeakClient,
}

impl RemoteChannelSource {
    pub fn new(client: ThingSpeakClient) -> Self {
        Self { client }
    }

    fn convert_feed(feed: ThingSpeakFeed) -> RawRecord {
        RawRecord {
            created_at: feed.created_at,
            fields: [
                feed.field1,
                feed.field2,
                feed.field3,
                feed.field4,
                feed.field5,
                feed.field6,
            ]
            .map(value_to_text),
        }
    }
}

/// Numbers and strings pass through as text; null counts as missing.
fn value_to_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl ReadingSource for RemoteChannelSource {
    async fn load_records(&self) -> SourceResult<Vec<RawRecord>> {
        tracing::debug!("Fetching channel feeds from {}", self.client.feeds_url());
        let feeds = self.client.fetch_feeds().await?;
        Ok(feeds.into_iter().map(Self::convert_feed).collect())
    }

    fn source_name(&self) -> &str {
        "remote"
    }
}
