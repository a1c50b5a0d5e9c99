//! Pieces in hand.

use crate::types::PieceKind;

/// Most pieces of each hand kind that exist in a game, in `PieceKind::HAND` order.
pub const HAND_MAX: [u8; 7] = [18, 4, 4, 4, 4, 2, 2];

/// Per-kind counts of captured pieces available for dropping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hand([u8; 7]);

impl Hand {
    pub const EMPTY: Hand = Hand([0; 7]);

    #[inline(always)]
    fn slot(kind: PieceKind) -> usize {
        debug_assert!(kind.hand_idx().is_some(), "{kind:?} is never held in hand");
        kind.hand_idx().unwrap_or(0)
    }

    #[inline(always)]
    pub fn count(&self, kind: PieceKind) -> u32 {
        self.0[Self::slot(kind)] as u32
    }

    #[inline(always)]
    pub fn has(&self, kind: PieceKind) -> bool {
        self.0[Self::slot(kind)] > 0
    }

    pub fn add(&mut self, kind: PieceKind) {
        let slot = Self::slot(kind);
        debug_assert!(self.0[slot] < HAND_MAX[slot]);
        self.0[slot] += 1;
    }

    pub fn remove(&mut self, kind: PieceKind) {
        let slot = Self::slot(kind);
        debug_assert!(self.0[slot] > 0);
        self.0[slot] -= 1;
    }

    pub fn set(&mut self, kind: PieceKind, count: u8) {
        self.0[Self::slot(kind)] = count;
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// One bit per held kind, in `PieceKind::HAND` order.
    pub fn existence_mask(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, n)| **n > 0)
            .fold(0, |mask, (slot, _)| mask | 1 << slot)
    }

    pub fn has_any_except_pawn(&self) -> bool {
        self.0[1..].iter().any(|&n| n > 0)
    }

    /// Every kind is held at least as many times as in `other`.
    pub fn is_equal_or_superior(&self, other: &Hand) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a >= b)
    }

    /// Held kinds with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u32)> + '_ {
        PieceKind::HAND
            .iter()
            .zip(self.0.iter())
            .filter(|(_, n)| **n > 0)
            .map(|(&kind, &n)| (kind, n as u32))
    }
}
