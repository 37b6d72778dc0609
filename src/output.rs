//! Terminal rendering for listings, arrival boards, and faves.
//!
//! Everything here goes to stdout; diagnostics and logs never do.

use crate::decode::bus::{BusRoute, RouteConfig};
use crate::faves::FaveTable;
use crate::predictions::StopArrivals;

pub fn print_routes(routes: &[BusRoute]) {
    println!("{} BUS ROUTES {}", "*".repeat(10), "*".repeat(10));
    println!();
    println!("{:16}  {}", "Route", "Tag");
    for route in routes {
        println!("{:16}  {}", route.title, route.tag);
    }
}

pub fn print_route_config(config: &RouteConfig) {
    println!("Route: {}, tag: {}", config.title, config.tag);
    println!();
    for direction in &config.directions {
        println!("{}: {}", direction.name, direction.title);
        for tag in &direction.stop_tags {
            if let Some(stop) = config.stops.get(tag) {
                println!("{:.<50}, ID: {:6}, tag: {}", stop.title, stop.stop_id, stop.tag);
            }
        }
        println!();
    }
}

/// Renders the aggregated board: one block per stop, destinations in feed
/// order, ETAs shown in whole minutes.
pub fn print_board(board: &[StopArrivals]) {
    for stop in board {
        println!("Stop: {}", stop.stop);
        for dest in &stop.destinations {
            println!(" Destination: {}", dest.destination);
            for arrival in &dest.arrivals {
                println!(
                    "  {:>2} min                 {}",
                    arrival.eta_seconds / 60,
                    arrival.note.to_uppercase()
                );
            }
        }
        println!();
    }
}

/// Feed-wide messages are set apart from the board with starred rules.
pub fn print_messages(messages: &[String]) {
    for text in messages {
        println!("{}", "*".repeat(60));
        println!("{text}");
        println!("{}", "*".repeat(60));
    }
}

pub fn print_no_predictions(stop_title: &str) {
    println!("Stop: {stop_title}");
    println!();
    println!("[No predictions]");
}

pub fn print_faves(faves: &FaveTable) {
    if faves.is_empty() {
        println!("No faves");
        return;
    }
    for (alias, expansion) in faves {
        println!("{:10} -> {}", alias, expansion);
    }
}
