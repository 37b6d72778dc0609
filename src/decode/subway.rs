//! Decoder for the heavy-rail JSON feed.
//!
//! The document is one `TripList` with a trip per train; each trip predicts
//! arrival times at every stop ahead of it. Callers filter stops with a
//! case-insensitive substring needle, since subway stops are addressed by
//! name rather than tag.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::predictions::RawPrediction;

#[derive(Debug, Deserialize)]
pub struct TripDocument {
    #[serde(rename = "TripList")]
    pub trip_list: TripList,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TripList {
    #[serde(default)]
    pub trips: Vec<Trip>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trip {
    pub destination: String,
    pub note: Option<String>,
    #[serde(default)]
    pub predictions: Vec<StopEta>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopEta {
    pub stop: String,
    /// Already in seconds, unlike the bus feed.
    pub seconds: u32,
}

/// Decodes the document and keeps the stop entries whose name contains
/// `needle` (lower-cased comparison, original case in the output).
///
/// An empty result means nothing matched anywhere in the document; that is
/// the caller's cue to say "no stops found" rather than print an empty board.
pub fn decode_predictions(json: &str, needle: &str) -> Result<Vec<RawPrediction>> {
    let doc: TripDocument = serde_json::from_str(json)?;
    let needle = needle.to_lowercase();

    let mut out = Vec::new();
    for trip in &doc.trip_list.trips {
        let note = trip.note.clone().unwrap_or_default();
        for entry in &trip.predictions {
            if entry.stop.to_lowercase().contains(&needle) {
                out.push(RawPrediction {
                    stop: entry.stop.clone(),
                    destination: trip.destination.clone(),
                    eta_seconds: entry.seconds,
                    note: note.clone(),
                });
            }
        }
    }

    debug!(
        trips = doc.trip_list.trips.len(),
        matched = out.len(),
        %needle,
        "decoded subway predictions"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "TripList": {
            "CurrentTime": 1371950400,
            "Line": "Red",
            "Trips": [
                {
                    "TripID": "R982ADD5E",
                    "Destination": "Alewife",
                    "Predictions": [
                        { "StopID": "70105", "Stop": "Quincy Center", "Seconds": 120 },
                        { "StopID": "70103", "Stop": "Quincy Adams", "Seconds": 360 },
                        { "StopID": "70085", "Stop": "Harvard Square", "Seconds": 1500 }
                    ]
                },
                {
                    "TripID": "R982ADD60",
                    "Destination": "Braintree",
                    "Note": "Big Red",
                    "Predictions": [
                        { "StopID": "70104", "Stop": "Quincy Center", "Seconds": 95 }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_needle_matches_substring_case_insensitively() {
        let preds = decode_predictions(DOC, "QuInCy").unwrap();

        let stops: Vec<&str> = preds.iter().map(|p| p.stop.as_str()).collect();
        assert_eq!(stops, vec!["Quincy Center", "Quincy Adams", "Quincy Center"]);
    }

    #[test]
    fn test_needle_does_not_match_other_stops() {
        let preds = decode_predictions(DOC, "quincy").unwrap();
        assert!(preds.iter().all(|p| !p.stop.contains("Harvard")));
    }

    #[test]
    fn test_seconds_are_taken_verbatim() {
        let preds = decode_predictions(DOC, "harvard").unwrap();
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].eta_seconds, 1500);
        assert_eq!(preds[0].destination, "Alewife");
    }

    #[test]
    fn test_trip_note_carries_onto_every_entry() {
        let preds = decode_predictions(DOC, "quincy center").unwrap();
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].note, "");
        assert_eq!(preds[1].note, "Big Red");
    }

    #[test]
    fn test_no_match_yields_empty_not_error() {
        let preds = decode_predictions(DOC, "riverside").unwrap();
        assert!(preds.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(decode_predictions("{\"TripList\": []}", "x").is_err());
    }
}
