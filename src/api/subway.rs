use anyhow::Result;

use crate::decode::subway;
use crate::dispatch::Line;
use crate::fetch::{fetch_text, BasicClient};
use crate::predictions::RawPrediction;

const BASE_URL: &str = "http://developer.mbta.com/lib/rthr";

pub struct SubwayClient {
    base_url: String,
    client: BasicClient,
}

impl SubwayClient {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            client: BasicClient::new(),
        }
    }

    pub fn predictions(&self, line: Line, needle: &str) -> Result<Vec<RawPrediction>> {
        let url = format!("{}/{}.json", self.base_url, line.feed_name());
        let json = fetch_text(&self.client, &url)?;
        Ok(subway::decode_predictions(&json, needle)?)
    }
}

impl Default for SubwayClient {
    fn default() -> Self {
        Self::new()
    }
}
