//! Basic example demonstrating valhalla actor usage.
//!
//! Run with: cargo run --example basic -- /path/to/valhalla.json

use std::env;

use valhalla::{Actor, ActorProviding, ProcessEngine, ValhallaError};

fn main() -> Result<(), ValhallaError> {
    // Get config path from command line
    let config_path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/valhalla.json");
        std::process::exit(1);
    });

    let actor = Actor::new(config_path, ProcessEngine::default());

    // A short drive across Manhattan
    let route_request = concat!(
        r#"{"locations":[{"lat":40.744014,"lon":-73.990508},"#,
        r#"{"lat":40.739735,"lon":-73.979713}],"costing":"auto"}"#
    );

    // Heights along the same two points
    let height_request = concat!(
        r#"{"range":true,"shape":[{"lat":40.744014,"lon":-73.990508},"#,
        r#"{"lat":40.739735,"lon":-73.979713}]}"#
    );

    println!("Route response:");
    println!("{:-<50}", "");
    match actor.route(route_request) {
        Ok(response) => println!("{}", response),
        Err(ValhallaError::Io(e)) => {
            println!("valhalla_service could not be started: {}", e);
            return Ok(());
        }
        Err(e) => println!("error - {}", e),
    }

    println!("\nHeight response:");
    println!("{:-<50}", "");
    match actor.height(height_request) {
        Ok(response) => println!("{}", response),
        Err(e) => println!("error - {}", e),
    }

    Ok(())
}
