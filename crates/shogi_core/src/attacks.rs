//! Pre-computed attack tables for move generation and attack detection.
//!
//! This module contains:
//! - Step tables for pawn, knight, silver and gold (per color) and king
//! - Sliding attacks along the four lines (file, rank, diagonal, anti-diagonal),
//!   looked up by gathering the line's inner occupancy into a dense index
//! - `between` and line-relation tables for pins, interpositions and x-rays
//!
//! Everything is built once on first use.

use std::sync::LazyLock;
use std::time::Instant;

use crate::bitboard::Bitboard;
use crate::types::{Color, NUM_SQUARES, PieceKind, file_of, rank_of, sq};

/// The four lines a slider can move along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Line {
    File = 0,
    Rank = 1,
    Diag = 2,
    AntiDiag = 3,
}

impl Line {
    pub const ALL: [Line; 4] = [Line::File, Line::Rank, Line::Diag, Line::AntiDiag];

    /// One step along the line as (file, rank); the opposite step is the negation.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Line::File => (0, 1),
            Line::Rank => (1, 0),
            Line::Diag => (1, 1),
            Line::AntiDiag => (1, -1),
        }
    }
}

// Step deltas as (file, rank) seen from Black; White's are negated.
const PAWN_STEPS: &[(i8, i8)] = &[(0, -1)];
const KNIGHT_STEPS: &[(i8, i8)] = &[(-1, -2), (1, -2)];
const SILVER_STEPS: &[(i8, i8)] = &[(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)];
const GOLD_STEPS: &[(i8, i8)] = &[(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];
const KING_STEPS: &[(i8, i8)] = &[
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub struct AttackTables {
    pawn: [[Bitboard; NUM_SQUARES]; 2],
    knight: [[Bitboard; NUM_SQUARES]; 2],
    silver: [[Bitboard; NUM_SQUARES]; 2],
    gold: [[Bitboard; NUM_SQUARES]; 2],
    king: [Bitboard; NUM_SQUARES],
    /// Unobstructed forward file ray per color.
    lance_rays: [[Bitboard; NUM_SQUARES]; 2],
    /// Unobstructed squares on each line through a square, excluding it.
    line_rays: [[Bitboard; 4]; NUM_SQUARES],
    /// Squares whose occupancy matters for a line lookup (board edges dropped).
    line_masks: [[Bitboard; 4]; NUM_SQUARES],
    line_offsets: [[usize; 4]; NUM_SQUARES],
    line_attacks: Vec<Bitboard>,
    between: Vec<Bitboard>,
    relation: Vec<Option<Line>>,
}

pub static ATTACKS: LazyLock<AttackTables> = LazyLock::new(AttackTables::build);

/// Build the tables now instead of on first lookup.
pub fn init() {
    LazyLock::force(&ATTACKS);
}

fn step_table(color: Color, steps: &[(i8, i8)]) -> [Bitboard; NUM_SQUARES] {
    let sign = if color == Color::Black { 1 } else { -1 };
    let mut table = [Bitboard::EMPTY; NUM_SQUARES];
    for (s, entry) in table.iter_mut().enumerate() {
        let (f, r) = (file_of(s as u8), rank_of(s as u8));
        for &(df, dr) in steps {
            if let Some(t) = sq(f + sign * df, r + sign * dr) {
                entry.set(t);
            }
        }
    }
    table
}

/// Walk each direction from `from` until the edge, stopping after the first occupied square.
pub fn sliding_attacks_slow(from: u8, dirs: &[(i8, i8)], occ: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for &(df, dr) in dirs {
        let (mut f, mut r) = (file_of(from) + df, rank_of(from) + dr);
        while let Some(t) = sq(f, r) {
            result.set(t);
            if occ.contains(t) {
                break;
            }
            f += df;
            r += dr;
        }
    }
    result
}

impl AttackTables {
    fn build() -> Self {
        let started = Instant::now();
        let pawn = [step_table(Color::Black, PAWN_STEPS), step_table(Color::White, PAWN_STEPS)];
        let knight = [step_table(Color::Black, KNIGHT_STEPS), step_table(Color::White, KNIGHT_STEPS)];
        let silver = [step_table(Color::Black, SILVER_STEPS), step_table(Color::White, SILVER_STEPS)];
        let gold = [step_table(Color::Black, GOLD_STEPS), step_table(Color::White, GOLD_STEPS)];
        let king = step_table(Color::Black, KING_STEPS);

        let mut lance_rays = [[Bitboard::EMPTY; NUM_SQUARES]; 2];
        let mut line_rays = [[Bitboard::EMPTY; 4]; NUM_SQUARES];
        let mut line_masks = [[Bitboard::EMPTY; 4]; NUM_SQUARES];
        let mut line_offsets = [[0usize; 4]; NUM_SQUARES];
        let mut line_attacks = Vec::new();

        for s in 0..NUM_SQUARES as u8 {
            lance_rays[Color::Black.idx()][s as usize] =
                sliding_attacks_slow(s, &[(0, -1)], Bitboard::EMPTY);
            lance_rays[Color::White.idx()][s as usize] =
                sliding_attacks_slow(s, &[(0, 1)], Bitboard::EMPTY);

            for line in Line::ALL {
                let (df, dr) = line.delta();
                let dirs = [(df, dr), (-df, -dr)];
                let ray = sliding_attacks_slow(s, &dirs, Bitboard::EMPTY);

                // Edge squares never block anything beyond themselves.
                let mut mask = Bitboard::EMPTY;
                for &(ddf, ddr) in &dirs {
                    let (mut f, mut r) = (file_of(s) + ddf, rank_of(s) + ddr);
                    while sq(f + ddf, r + ddr).is_some() {
                        if let Some(t) = sq(f, r) {
                            mask.set(t);
                        }
                        f += ddf;
                        r += ddr;
                    }
                }

                let li = line as usize;
                line_rays[s as usize][li] = ray;
                line_masks[s as usize][li] = mask;
                line_offsets[s as usize][li] = line_attacks.len();

                let squares: Vec<u8> = mask.collect();
                for index in 0..(1usize << squares.len()) {
                    let occ = squares
                        .iter()
                        .enumerate()
                        .filter(|(bit, _)| index & (1 << bit) != 0)
                        .fold(Bitboard::EMPTY, |acc, (_, &t)| acc.with(t));
                    debug_assert_eq!(occ.merge_to_line_index(mask), index);
                    line_attacks.push(sliding_attacks_slow(s, &dirs, occ));
                }
            }
        }

        let mut between = vec![Bitboard::EMPTY; NUM_SQUARES * NUM_SQUARES];
        let mut relation = vec![None; NUM_SQUARES * NUM_SQUARES];
        for a in 0..NUM_SQUARES as u8 {
            for b in 0..NUM_SQUARES as u8 {
                if a == b {
                    continue;
                }
                let df = file_of(b) - file_of(a);
                let dr = rank_of(b) - rank_of(a);
                let line = if df == 0 {
                    Line::File
                } else if dr == 0 {
                    Line::Rank
                } else if df == dr {
                    Line::Diag
                } else if df == -dr {
                    Line::AntiDiag
                } else {
                    continue;
                };
                let idx = a as usize * NUM_SQUARES + b as usize;
                relation[idx] = Some(line);
                let step = (df.signum(), dr.signum());
                let (mut f, mut r) = (file_of(a) + step.0, rank_of(a) + step.1);
                let mut squares = Bitboard::EMPTY;
                while let Some(t) = sq(f, r) {
                    if t == b {
                        break;
                    }
                    squares.set(t);
                    f += step.0;
                    r += step.1;
                }
                between[idx] = squares;
            }
        }

        tracing::debug!(
            line_entries = line_attacks.len(),
            elapsed = ?started.elapsed(),
            "built attack tables"
        );

        AttackTables {
            pawn,
            knight,
            silver,
            gold,
            king,
            lance_rays,
            line_rays,
            line_masks,
            line_offsets,
            line_attacks,
            between,
            relation,
        }
    }

    #[inline(always)]
    fn line_attack(&self, s: u8, line: Line, occ: Bitboard) -> Bitboard {
        let s = s as usize;
        let li = line as usize;
        let index = occ.merge_to_line_index(self.line_masks[s][li]);
        self.line_attacks[self.line_offsets[s][li] + index]
    }
}

#[inline(always)]
pub fn pawn_attacks(color: Color, s: u8) -> Bitboard {
    ATTACKS.pawn[color.idx()][s as usize]
}

#[inline(always)]
pub fn knight_attacks(color: Color, s: u8) -> Bitboard {
    ATTACKS.knight[color.idx()][s as usize]
}

#[inline(always)]
pub fn silver_attacks(color: Color, s: u8) -> Bitboard {
    ATTACKS.silver[color.idx()][s as usize]
}

#[inline(always)]
pub fn gold_attacks(color: Color, s: u8) -> Bitboard {
    ATTACKS.gold[color.idx()][s as usize]
}

#[inline(always)]
pub fn king_attacks(s: u8) -> Bitboard {
    ATTACKS.king[s as usize]
}

#[inline(always)]
pub fn line_attacks(s: u8, line: Line, occ: Bitboard) -> Bitboard {
    ATTACKS.line_attack(s, line, occ)
}

#[inline(always)]
pub fn lance_attacks(color: Color, s: u8, occ: Bitboard) -> Bitboard {
    ATTACKS.line_attack(s, Line::File, occ) & ATTACKS.lance_rays[color.idx()][s as usize]
}

#[inline(always)]
pub fn rook_attacks(s: u8, occ: Bitboard) -> Bitboard {
    ATTACKS.line_attack(s, Line::File, occ) | ATTACKS.line_attack(s, Line::Rank, occ)
}

#[inline(always)]
pub fn bishop_attacks(s: u8, occ: Bitboard) -> Bitboard {
    ATTACKS.line_attack(s, Line::Diag, occ) | ATTACKS.line_attack(s, Line::AntiDiag, occ)
}

#[inline(always)]
pub fn horse_attacks(s: u8, occ: Bitboard) -> Bitboard {
    bishop_attacks(s, occ) | king_attacks(s)
}

#[inline(always)]
pub fn dragon_attacks(s: u8, occ: Bitboard) -> Bitboard {
    rook_attacks(s, occ) | king_attacks(s)
}

/// Forward file ray of a lance on an empty board.
#[inline(always)]
pub fn lance_pseudo_attacks(color: Color, s: u8) -> Bitboard {
    ATTACKS.lance_rays[color.idx()][s as usize]
}

#[inline(always)]
pub fn rook_pseudo_attacks(s: u8) -> Bitboard {
    let rays = &ATTACKS.line_rays[s as usize];
    rays[Line::File as usize] | rays[Line::Rank as usize]
}

#[inline(always)]
pub fn bishop_pseudo_attacks(s: u8) -> Bitboard {
    let rays = &ATTACKS.line_rays[s as usize];
    rays[Line::Diag as usize] | rays[Line::AntiDiag as usize]
}

/// Squares a piece of `kind` and `color` on `s` attacks given `occ`.
pub fn attacks_of(kind: PieceKind, color: Color, s: u8, occ: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn_attacks(color, s),
        PieceKind::Lance => lance_attacks(color, s, occ),
        PieceKind::Knight => knight_attacks(color, s),
        PieceKind::Silver => silver_attacks(color, s),
        PieceKind::Bishop => bishop_attacks(s, occ),
        PieceKind::Rook => rook_attacks(s, occ),
        PieceKind::King => king_attacks(s),
        PieceKind::Horse => horse_attacks(s, occ),
        PieceKind::Dragon => dragon_attacks(s, occ),
        PieceKind::Gold
        | PieceKind::ProPawn
        | PieceKind::ProLance
        | PieceKind::ProKnight
        | PieceKind::ProSilver => gold_attacks(color, s),
    }
}

/// Squares strictly between `a` and `b`; empty unless they share a line.
#[inline(always)]
pub fn between(a: u8, b: u8) -> Bitboard {
    ATTACKS.between[a as usize * NUM_SQUARES + b as usize]
}

/// The line `a` and `b` share, if any.
#[inline(always)]
pub fn line_relation(a: u8, b: u8) -> Option<Line> {
    ATTACKS.relation[a as usize * NUM_SQUARES + b as usize]
}

/// The whole line through `a` and `b` (both included), or empty.
pub fn line_through(a: u8, b: u8) -> Bitboard {
    match line_relation(a, b) {
        Some(line) => ATTACKS.line_rays[a as usize][line as usize].with(a),
        None => Bitboard::EMPTY,
    }
}

/// `a`, `b` and `c` lie on one line.
#[inline(always)]
pub fn aligned(a: u8, b: u8, c: u8) -> bool {
    line_through(a, c).contains(b)
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
