//! The unified arrival model both feed decoders produce.
//!
//! Bus and subway responses look nothing alike on the wire; by the time they
//! leave their decoders, both are flat sequences of [`RawPrediction`] records.
//! [`aggregate`] folds such a sequence into the board the presentation layer
//! renders: stops in first-seen order, destinations under each stop in
//! first-seen order, arrivals under each destination sorted by ETA.

/// One predicted arrival, as reported by a feed. ETA is always in seconds;
/// the bus decoder converts from the whole minutes its feed reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrediction {
    pub stop: String,
    pub destination: String,
    pub eta_seconds: u32,
    /// Free-text annotation, `""` when the feed has none.
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub eta_seconds: u32,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationArrivals {
    pub destination: String,
    pub arrivals: Vec<Arrival>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopArrivals {
    pub stop: String,
    pub destinations: Vec<DestinationArrivals>,
}

/// Groups raw predictions by exact `(stop, destination)` equality.
///
/// Key order is first-occurrence order of the input: the feeds deliver
/// predictions in direction-of-travel order and the user expects to see that
/// order back. Arrivals within a destination are sorted ascending by ETA with
/// a stable sort, so equal ETAs keep their feed order. Duplicate
/// `(eta, note)` pairs are kept; two vehicles may legitimately be the same
/// distance out.
pub fn aggregate<I>(raw: I) -> Vec<StopArrivals>
where
    I: IntoIterator<Item = RawPrediction>,
{
    let mut board: Vec<StopArrivals> = Vec::new();

    for pred in raw {
        let stop_idx = match board.iter().position(|s| s.stop == pred.stop) {
            Some(idx) => idx,
            None => {
                board.push(StopArrivals {
                    stop: pred.stop.clone(),
                    destinations: Vec::new(),
                });
                board.len() - 1
            }
        };

        let destinations = &mut board[stop_idx].destinations;
        let dest_idx = match destinations
            .iter()
            .position(|d| d.destination == pred.destination)
        {
            Some(idx) => idx,
            None => {
                destinations.push(DestinationArrivals {
                    destination: pred.destination.clone(),
                    arrivals: Vec::new(),
                });
                destinations.len() - 1
            }
        };

        destinations[dest_idx].arrivals.push(Arrival {
            eta_seconds: pred.eta_seconds,
            note: pred.note,
        });
    }

    for stop in &mut board {
        for dest in &mut stop.destinations {
            dest.arrivals.sort_by_key(|a| a.eta_seconds);
        }
    }

    board
}
