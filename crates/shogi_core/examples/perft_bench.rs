//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p shogi_core -- [depth] [sfen]
//!
//! Examples:
//!   # Default: depth 4 from every test position
//!   cargo flamegraph --example perft_bench -p shogi_core
//!
//!   # Custom depth
//!   cargo flamegraph --example perft_bench -p shogi_core -- 5
//!
//!   # Custom depth and position, with per-move counts logged
//!   RUST_LOG=debug cargo run --release --example perft_bench -p shogi_core -- 3 "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1"

use shogi_core::{board::Position, perft::perft, perft::perft_divide};
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Standard test positions for comprehensive profiling
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
    ),
    (
        "Matsuri",
        "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
    ),
    (
        "Max moves",
        "R8/2K1S1SSk/4B4/9/9/9/9/9/1L1L1L3 b RBGSNLP3g3n17p 1",
    ),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    shogi_core::attacks::init();

    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    // If SFEN provided, use single position mode
    if let Some(sfen) = args.get(2) {
        run_single_position(sfen, depth);
    } else {
        run_all_positions(depth);
    }
}

fn load(sfen: &str) -> Position {
    Position::from_sfen(sfen).unwrap_or_else(|e| {
        eprintln!("Invalid SFEN '{sfen}': {e}");
        std::process::exit(2);
    })
}

fn run_single_position(sfen: &str, depth: u8) {
    let mut pos = load(sfen);

    println!("Position: {sfen}");
    println!("Depth: {depth}");
    println!();

    if tracing::enabled!(tracing::Level::DEBUG) {
        for (mv, nodes) in perft_divide(&mut pos, depth) {
            tracing::debug!(%mv, nodes, "divide");
        }
    }

    let start = Instant::now();
    let nodes = perft(&mut pos, depth);
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {nps:.0}");
}

fn run_all_positions(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = std::time::Duration::ZERO;

    for (name, sfen) in TEST_POSITIONS {
        let mut pos = load(sfen);

        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        let nps = if elapsed.as_secs_f64() > 0.0 {
            nodes as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        println!(" {nodes:>12} nodes in {elapsed:>8.3?} ({nps:>10.0} nps)");
    }

    println!();
    println!("{:=<70}", "");
    let total_nps = if total_time.as_secs_f64() > 0.0 {
        total_nodes as f64 / total_time.as_secs_f64()
    } else {
        0.0
    };
    println!("TOTAL: {total_nodes} nodes in {total_time:.3?} ({total_nps:.0} nps)");
}
