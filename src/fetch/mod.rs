//! Blocking HTTP transport.
//!
//! Gzip-compressed bodies are negotiated and decompressed transparently by
//! the client, so callers always see plain response text.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use tracing::debug;

#[tracing::instrument(skip(client), fields(url = %url))]
pub fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let req = reqwest::blocking::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req)?.error_for_status()?;
    let body = resp.text()?;
    debug!(bytes = body.len(), "response body received");
    Ok(body)
}
