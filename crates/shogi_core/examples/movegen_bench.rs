//! Move generation and mate-in-one benchmark for profiling with cargo-flamegraph.
//!
//! Runs many iterations of legal_moves_into and find_mate on a handful of
//! positions covering openings, crowded middlegames and drop-heavy endings.
//!
//! Usage:
//!   cargo flamegraph --example movegen_bench -p shogi_core

use shogi_core::{board::Position, movegen::legal_moves_into};
use std::time::Instant;

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Start",
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
    ),
    (
        "Bishop exchange",
        "ln1g1g1nl/1r1s1k3/p1pppp1pp/6p2/1p7/2P6/PPSPPPPPP/7R1/LN1GKGSNL b Bbs 1",
    ),
    (
        "Matsuri",
        "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
    ),
    (
        "Max moves",
        "R8/2K1S1SSk/4B4/9/9/9/9/9/1L1L1L3 b RBGSNLP3g3n17p 1",
    ),
    ("Drop mate", "7nk/7n1/8P/9/9/9/9/9/8K b RL 1"),
    ("Pinned defender", "7pk/7bs/9/9/9/9/9/8L/8K b N 1"),
];

const ITERATIONS: usize = 100_000;

fn main() {
    shogi_core::attacks::init();
    println!("=== Move Generation Benchmark ===");
    println!("Iterations per position: {ITERATIONS}");
    println!();

    let mut move_buf = Vec::with_capacity(600);
    let mut total_moves = 0usize;
    let mut total_time = std::time::Duration::ZERO;
    let mut mate_time = std::time::Duration::ZERO;

    for (name, sfen) in TEST_POSITIONS {
        let mut pos = Position::from_sfen(sfen).expect("benchmark positions are valid");

        print!("{name:.<20}");

        let start = Instant::now();
        let mut moves_generated = 0usize;

        for _ in 0..ITERATIONS {
            legal_moves_into(&pos, &mut move_buf);
            moves_generated += move_buf.len();
        }

        let elapsed = start.elapsed();
        total_moves += moves_generated;
        total_time += elapsed;

        let mate_start = Instant::now();
        let mut mate = None;
        if !pos.in_check() {
            for _ in 0..ITERATIONS / 10 {
                mate = pos.find_mate();
            }
        }
        mate_time += mate_start.elapsed();

        let moves_per_pos = moves_generated as f64 / ITERATIONS as f64;
        let mps = if elapsed.as_secs_f64() > 0.0 {
            ITERATIONS as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let mate = mate.map_or_else(|| "-".to_string(), |mv| mv.to_usi());

        println!(" {moves_per_pos:>5.1} moves/pos, {mps:>10.0} pos/sec ({elapsed:>8.3?}), mate {mate}");
    }

    println!();
    println!("{:=<70}", "");
    let avg_mps = if total_time.as_secs_f64() > 0.0 {
        (ITERATIONS * TEST_POSITIONS.len()) as f64 / total_time.as_secs_f64()
    } else {
        0.0
    };
    println!("TOTAL: {total_moves} moves in {total_time:.3?} ({avg_mps:.0} positions/sec)");
    println!("Mate search: {mate_time:.3?}");
}
