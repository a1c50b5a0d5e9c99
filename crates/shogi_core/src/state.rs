//! Per-ply derived state kept on the position's history stack.

use crate::bitboard::Bitboard;
use crate::hand::Hand;
use crate::types::{Color, Piece, PieceKind};

/// Where a piece was or went in a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceLocation {
    Board(u8),
    /// `count` is the 1-based number of that kind in the hand after adding or before removing.
    Hand { color: Color, kind: PieceKind, count: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceChange {
    pub old_piece: Piece,
    pub old_location: PieceLocation,
    pub new_piece: Piece,
    pub new_location: PieceLocation,
}

/// Up to two piece changes made by the last move, for incremental evaluators.
///
/// A drop or quiet move changes one piece; a capture also moves the captured
/// piece into the mover's hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyPiece {
    changes: [Option<PieceChange>; 2],
}

impl DirtyPiece {
    pub fn push(&mut self, change: PieceChange) {
        match self.changes.iter_mut().find(|c| c.is_none()) {
            Some(slot) => *slot = Some(change),
            None => debug_assert!(false, "a move changes at most two pieces"),
        }
    }

    pub fn len(&self) -> usize {
        self.changes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.changes[0].is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceChange> {
        self.changes.iter().flatten()
    }
}

/// Derived facts about one position, pushed on every move.
#[derive(Clone, Copy, Debug)]
pub struct StateInfo {
    /// Enemy pieces giving check to the side to move.
    pub checkers: Bitboard,
    /// Per king color: pieces of either color that are the only piece between the king and an enemy slider.
    pub blockers_for_king: [Bitboard; 2],
    /// Per king color: enemy sliders pinning one of that king's own pieces.
    pub pinners: [Bitboard; 2],
    /// Per kind: squares from which a piece of the side to move would attack the enemy king.
    pub check_squares: [Bitboard; PieceKind::NUM],
    pub board_key: u64,
    pub hand_key: u64,
    /// Black-minus-White material, hand pieces included.
    pub material: i32,
    pub captured: Option<Piece>,
    pub plies_from_null: u32,
    /// Per color: plies covered by that side's unbroken run of checks, 2 per check.
    pub continuous_checks: [u32; 2],
    pub hand_of_side_to_move: Hand,
    pub dirty: DirtyPiece,
}

impl StateInfo {
    #[inline(always)]
    pub fn key(&self) -> u64 {
        self.board_key ^ self.hand_key
    }
}
