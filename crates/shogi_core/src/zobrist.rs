//! Zobrist hashing for shogi positions.
//!
//! Two keys are maintained incrementally during make/unmake:
//! - the board key: each piece on each square (2 colors × 14 kinds × 81 squares)
//!   plus a side-to-move value, XOR-ed in when White is to move
//! - the hand key: one value per (color, hand kind, count), so holding `n`
//!   pieces of a kind XORs in the values for 1..=n
//!
//! Keeping them apart lets repetition detection compare boards while judging
//! hands separately.

use crate::hand::Hand;
use crate::types::{Color, NUM_SQUARES, Piece, PieceKind};

/// One more than the largest hand count (18 pawns).
const HAND_SLOTS: usize = 19;

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; NUM_SQUARES]; PieceKind::NUM]; 2],
    /// Indexed by [color][hand slot][count]; count 0 is unused.
    pub hands: [[[u64; HAND_SLOTS]; 7]; 2],
    /// XOR-ed into the board key when White is to move
    pub side_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate keys with xorshift64 from a fixed seed.
    pub const fn new() -> Self {
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x2545_F491_4F6C_DD1Du64;

        let mut pieces = [[[0u64; NUM_SQUARES]; PieceKind::NUM]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < PieceKind::NUM {
                let mut sq = 0;
                while sq < NUM_SQUARES {
                    state = xorshift64(state);
                    pieces[color][kind][sq] = state;
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        let mut hands = [[[0u64; HAND_SLOTS]; 7]; 2];
        let mut color = 0;
        while color < 2 {
            let mut slot = 0;
            while slot < 7 {
                let mut count = 1;
                while count < HAND_SLOTS {
                    state = xorshift64(state);
                    hands[color][slot][count] = state;
                    count += 1;
                }
                slot += 1;
            }
            color += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        ZobristKeys {
            pieces,
            hands,
            side_to_move,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Key toggled when the `count`-th piece of `kind` enters or leaves a hand.
    #[inline(always)]
    pub fn hand_key(&self, color: Color, kind: PieceKind, count: u32) -> u64 {
        let slot = kind.hand_idx().unwrap_or(0);
        self.hands[color.idx()][slot][count as usize]
    }

    /// Full hand key for both hands, computed from scratch.
    pub fn hands_key(&self, hands: &[Hand; 2]) -> u64 {
        let mut key = 0u64;
        for color in Color::ALL {
            for (kind, n) in hands[color.idx()].iter() {
                for count in 1..=n {
                    key ^= self.hand_key(color, kind, count);
                }
            }
        }
        key
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
