use mbta_tracker::decode::{bus, subway};
use mbta_tracker::dispatch::{resolve_target, Line, PredTarget};
use mbta_tracker::faves::FaveTable;
use mbta_tracker::predictions::aggregate;

#[test]
fn test_bus_feed_through_to_board() {
    let xml = include_str!("fixtures/predictions_71.xml");
    let decoded = bus::decode_predictions(xml).expect("Failed to decode bus feed");

    assert_eq!(decoded.stop_title, "Harvard Sq @ Garden St - Dawes Island");
    assert_eq!(decoded.messages.len(), 1);

    let board = aggregate(decoded.predictions);

    // One stop, two directions, in feed order
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].destinations.len(), 2);
    assert_eq!(
        board[0].destinations[0].destination,
        "Watertown Square via Mt. Auburn St"
    );
    assert_eq!(
        board[0].destinations[1].destination,
        "Harvard via Mt. Auburn St"
    );

    let watertown = &board[0].destinations[0].arrivals;
    assert_eq!(watertown.len(), 2);
    assert_eq!(watertown[0].eta_seconds, 480);
    assert_eq!(watertown[0].note, "[DELAYED]");
    assert_eq!(watertown[1].eta_seconds, 840);
    assert_eq!(watertown[1].note, "");
}

#[test]
fn test_subway_feed_through_to_board() {
    let json = include_str!("fixtures/red_line.json");
    let raw = subway::decode_predictions(json, "quincy").expect("Failed to decode subway feed");

    let board = aggregate(raw);

    // Stops in first-seen order; Harvard Square filtered out by the needle
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].stop, "Quincy Center");
    assert_eq!(board[1].stop, "Quincy Adams");

    // Quincy Center serves both trips, destinations in feed order
    assert_eq!(board[0].destinations.len(), 2);
    assert_eq!(board[0].destinations[0].destination, "Alewife");
    assert_eq!(board[0].destinations[0].arrivals[0].eta_seconds, 120);
    assert_eq!(board[0].destinations[1].destination, "Braintree");
    assert_eq!(board[0].destinations[1].arrivals[0].note, "Big Red");
}

#[test]
fn test_alias_chain_dispatches_like_direct_invocation() {
    let mut faves = FaveTable::new();
    faves.insert("home".to_string(), "r harv".to_string());
    faves.insert("h".to_string(), "home".to_string());

    let direct = resolve_target(
        &["r".to_string(), "harv".to_string()],
        &faves,
    )
    .unwrap();
    let via_alias = resolve_target(&["h".to_string()], &faves).unwrap();

    assert_eq!(direct, via_alias);
    assert_eq!(
        via_alias,
        PredTarget::Subway {
            line: Line::Red,
            needle: "harv".to_string()
        }
    );
}
