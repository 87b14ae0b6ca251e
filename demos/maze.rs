//! ASCII map pathfinding demo.
//!
//! Run: cargo run --bin maze [seed]
//!
//! Without a seed the built-in map is solved; with one a random map is
//! generated first.

use gridstar_demos::{AsciiMap, DEMO_MAP, random_map};
use gridstar_paths::EngineConfig;

fn main() {
    let text = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => random_map(40, 16, 0.3, seed),
        Some(Err(e)) => {
            eprintln!("Error: bad seed: {e}");
            std::process::exit(2);
        }
        None => DEMO_MAP.to_string(),
    };

    let map = match AsciiMap::parse(&text, EngineConfig::eight_connected()) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match map.solve() {
        Ok(path) if path.is_empty() => {
            print!("{}", map.render(&path));
            println!("no path");
        }
        Ok(path) => {
            print!("{}", map.render(&path));
            println!("steps: {}  cost: {}", path.steps(), path.cost());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
