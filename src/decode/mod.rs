//! Feed decoders.
//!
//! One decoder per upstream shape: the NextBus XML tree and the heavy-rail
//! JSON document. They share no wire format, only the [`RawPrediction`]
//! output contract.
//!
//! [`RawPrediction`]: crate::predictions::RawPrediction

pub mod bus;
pub mod subway;
