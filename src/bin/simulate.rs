//! Headless balance simulator.
//!
//! Plays the game with a scripted autopilot and reports spawner and score
//! statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 50 lives
//!   cargo run --bin simulate -- -n 200         # 200 lives
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use dino_runner::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DINO RUNNER SIMULATOR                            ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Lives:          {}", config.num_runs);
    println!("  Frame cap:      {}", config.max_frames_per_run);
    println!(
        "  Player:         {}",
        if config.autopilot { "autopilot" } else { "idle" }
    );
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!("sim_report_{}.json", config.seed.unwrap_or(0));
        let written = report
            .to_json()
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(&filename, json));
        match written {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-f" | "--frames" => {
                if i + 1 < args.len() {
                    config.max_frames_per_run = args[i + 1].parse().unwrap_or(36_000);
                    i += 1;
                }
            }
            "--idle" => {
                config.autopilot = false;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Dino Runner Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of lives to play (default: 50)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -f, --frames <F>    Frame cap per life (default: 36,000)");
    println!("    --idle              Never jump or duck");
    println!("    -v, --verbose       Print every life");
    println!("    --json              Save JSON report");
    println!("    --quick             Quick check (10 lives, 6,000 frames)");
    println!("    -h, --help          Show this help");
}
