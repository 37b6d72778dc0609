use anyhow::Result;

use crate::decode::bus::{self, BusPredictions, BusRoute, RouteConfig};
use crate::fetch::{fetch_text, BasicClient};

const BASE_URL: &str = "http://webservices.nextbus.com/service/publicXMLFeed";
const AGENCY: &str = "mbta";

pub struct NextBusClient {
    base_url: String,
    client: BasicClient,
}

impl NextBusClient {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            client: BasicClient::new(),
        }
    }

    fn command_url(&self, command: &str) -> String {
        format!("{}?command={}&a={}", self.base_url, command, AGENCY)
    }

    pub fn route_list(&self) -> Result<Vec<BusRoute>> {
        let xml = fetch_text(&self.client, &self.command_url("routeList"))?;
        Ok(bus::decode_route_list(&xml)?)
    }

    /// Fetches a route's stop and direction layout. `terse` skips the path
    /// geometry, which we never render.
    pub fn route_config(&self, route: &str) -> Result<RouteConfig> {
        let url = format!("{}&r={}&terse", self.command_url("routeConfig"), route);
        let xml = fetch_text(&self.client, &url)?;
        Ok(bus::decode_route_config(&xml)?)
    }

    pub fn predictions_for_stop(&self, route: &str, stop: &str) -> Result<BusPredictions> {
        let url = format!("{}&r={}&s={}", self.command_url("predictions"), route, stop);
        let xml = fetch_text(&self.client, &url)?;
        Ok(bus::decode_predictions(&xml)?)
    }

    pub fn predictions_for_stop_id(&self, stop_id: &str) -> Result<BusPredictions> {
        let url = format!("{}&stopId={}", self.command_url("predictions"), stop_id);
        let xml = fetch_text(&self.client, &url)?;
        Ok(bus::decode_predictions(&xml)?)
    }
}

impl Default for NextBusClient {
    fn default() -> Self {
        Self::new()
    }
}
