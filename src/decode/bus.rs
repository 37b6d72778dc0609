//! Decoder for the NextBus public XML feed.
//!
//! Three response shapes: the route list, a single route's configuration, and
//! a predictions block for one stop. All of them embed errors the same way,
//! as an `<Error shouldRetry="...">` element in place of the payload, so every
//! decode starts with [`check_feed_error`].

use std::collections::HashMap;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::error::{Error, Result};
use crate::predictions::RawPrediction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRoute {
    pub tag: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusStop {
    pub lat: String,
    pub lon: String,
    /// Numeric stop ID; empty when the feed omits it.
    pub stop_id: String,
    pub tag: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDirection {
    pub name: String,
    pub title: String,
    pub stop_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    pub tag: String,
    pub title: String,
    pub stops: HashMap<String, BusStop>,
    pub directions: Vec<RouteDirection>,
}

/// Full output of a predictions decode. Feed-wide messages are standalone
/// annotations, never arrivals. An empty `predictions` with the stop title
/// set is the feed's "no predictions available" case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusPredictions {
    pub stop_title: String,
    pub messages: Vec<String>,
    pub predictions: Vec<RawPrediction>,
}

fn attr(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or("").to_string()
}

/// Fails when the body's first child is the feed's error element.
fn check_feed_error(body: Node) -> Result<()> {
    let Some(err) = body.first_element_child().filter(|n| n.has_tag_name("Error")) else {
        return Ok(());
    };
    let text = err.text().unwrap_or("").trim().to_string();
    if err.attribute("shouldRetry") == Some("false") {
        Err(Error::FeedRejected(text))
    } else {
        Err(Error::FeedUnavailable(text))
    }
}

pub fn decode_route_list(xml: &str) -> Result<Vec<BusRoute>> {
    let doc = Document::parse(xml)?;
    let body = doc.root_element();
    check_feed_error(body)?;

    let routes: Vec<BusRoute> = body
        .children()
        .filter(|n| n.has_tag_name("route"))
        .map(|n| BusRoute {
            tag: attr(n, "tag"),
            title: attr(n, "title"),
        })
        .collect();
    debug!(count = routes.len(), "decoded route list");
    Ok(routes)
}

pub fn decode_route_config(xml: &str) -> Result<RouteConfig> {
    let doc = Document::parse(xml)?;
    let body = doc.root_element();
    check_feed_error(body)?;

    let route = body
        .first_element_child()
        .ok_or_else(|| Error::Malformed("route config without a route element".into()))?;

    let mut stops = HashMap::new();
    let mut directions = Vec::new();

    for child in route.children() {
        if child.has_tag_name("stop") {
            let stop = BusStop {
                lat: attr(child, "lat"),
                lon: attr(child, "lon"),
                stop_id: attr(child, "stopId"),
                tag: attr(child, "tag"),
                title: attr(child, "title"),
            };
            stops.insert(stop.tag.clone(), stop);
        } else if child.has_tag_name("direction") {
            directions.push(RouteDirection {
                name: attr(child, "name"),
                title: attr(child, "title"),
                stop_tags: child
                    .children()
                    .filter(|n| n.has_tag_name("stop"))
                    .map(|n| attr(n, "tag"))
                    .collect(),
            });
        }
        // <path> children carry map geometry we have no use for
    }

    Ok(RouteConfig {
        tag: attr(route, "tag"),
        title: attr(route, "title"),
        stops,
        directions,
    })
}

/// Decodes the predictions block for one stop.
///
/// Each `<prediction>` entry becomes one [`RawPrediction`] with its
/// direction's heading as the destination. The feed reports whole minutes
/// from now; ETAs are normalized to seconds here.
pub fn decode_predictions(xml: &str) -> Result<BusPredictions> {
    let doc = Document::parse(xml)?;
    let body = doc.root_element();
    check_feed_error(body)?;

    let block = body
        .children()
        .find(|n| n.has_tag_name("predictions"))
        .ok_or_else(|| Error::Malformed("response without a predictions block".into()))?;

    let mut out = BusPredictions {
        stop_title: attr(block, "stopTitle"),
        messages: Vec::new(),
        predictions: Vec::new(),
    };

    if block.has_attribute("dirTitleBecauseNoPredictions") {
        debug!(stop = %out.stop_title, "feed reports no predictions");
        return Ok(out);
    }

    for child in block.children() {
        if child.has_tag_name("message") {
            out.messages.push(attr(child, "text"));
        } else if child.has_tag_name("direction") {
            let heading = attr(child, "title");
            for pred in child.children().filter(|n| n.has_tag_name("prediction")) {
                let minutes: u32 = pred.attribute("minutes").unwrap_or("").parse().map_err(
                    |_| {
                        Error::Malformed(format!(
                            "bad minutes value for stop '{}'",
                            out.stop_title
                        ))
                    },
                )?;
                let note = if pred.attribute("delayed") == Some("true") {
                    "[DELAYED]"
                } else {
                    ""
                };
                out.predictions.push(RawPrediction {
                    stop: out.stop_title.clone(),
                    destination: heading.clone(),
                    eta_seconds: minutes * 60,
                    note: note.to_string(),
                });
            }
        }
    }

    debug!(
        stop = %out.stop_title,
        arrivals = out.predictions.len(),
        messages = out.messages.len(),
        "decoded bus predictions"
    );
    Ok(out)
}
