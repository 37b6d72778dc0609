//! Resolution of a `pred` argument list into a concrete feed target.
//!
//! The first token is either the `bus` literal, a subway line color, or an
//! alias. Aliases substitute their stored expansion for the whole token list
//! and resolution re-enters from the top, so an alias may point at another
//! alias. Depth is bounded by [`MAX_ALIAS_DEPTH`]: nothing legitimate nests
//! that far, and without the bound a cycle of aliases would recurse until the
//! stack ran out.

use tracing::debug;

use crate::error::{Error, Result};
use crate::faves::FaveTable;

pub const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Red,
    Blue,
    Orange,
}

impl Line {
    /// Recognizes a line color token or its single-letter abbreviation.
    /// The green line has no feed.
    pub fn parse(token: &str) -> Option<Line> {
        match token {
            "red" | "r" => Some(Line::Red),
            "blue" | "b" => Some(Line::Blue),
            "orange" | "o" => Some(Line::Orange),
            _ => None,
        }
    }

    pub fn feed_name(self) -> &'static str {
        match self {
            Line::Red => "red",
            Line::Blue => "blue",
            Line::Orange => "orange",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredTarget {
    /// Bus stop addressed by route tag and stop tag.
    BusStop { route: String, stop: String },
    /// Bus stop addressed by numeric stop ID.
    BusStopId { stop_id: String },
    /// Subway stops addressed by name substring.
    Subway { line: Line, needle: String },
}

pub fn resolve_target(args: &[String], faves: &FaveTable) -> Result<PredTarget> {
    let mut tokens: Vec<String> = args.to_vec();

    for _ in 0..=MAX_ALIAS_DEPTH {
        let Some(first) = tokens.first() else {
            return Err(Error::BadUsage("not enough arguments".into()));
        };

        if first == "bus" {
            return match tokens.len() {
                2 => Ok(PredTarget::BusStopId {
                    stop_id: tokens[1].clone(),
                }),
                3 => Ok(PredTarget::BusStop {
                    route: tokens[1].clone(),
                    stop: tokens[2].clone(),
                }),
                _ => Err(Error::BadUsage(
                    "bus predictions take a stop ID, or a route tag and a stop tag".into(),
                )),
            };
        }

        if let Some(line) = Line::parse(first) {
            if tokens.len() < 2 {
                return Err(Error::BadUsage("no stop name given".into()));
            }
            let needle = tokens[1..].join(" ").to_lowercase();
            return Ok(PredTarget::Subway { line, needle });
        }

        // Not a literal target, so it must be an alias. Its expansion
        // replaces the whole token list and resolution starts over.
        let expansion = faves
            .get(first.as_str())
            .ok_or_else(|| Error::UnknownAlias(first.clone()))?;
        debug!(alias = %first, %expansion, "expanding alias");
        tokens = expansion.split_whitespace().map(str::to_string).collect();
    }

    Err(Error::AliasLoop(
        args.first().cloned().unwrap_or_default(),
    ))
}
