//! Thin clients for the two upstream feeds. Each owns its base URL and a
//! [`BasicClient`], builds the parameterized GET, and hands the body to the
//! matching decoder.
//!
//! [`BasicClient`]: crate::fetch::BasicClient

mod nextbus;
mod subway;

pub use nextbus::NextBusClient;
pub use subway::SubwayClient;
