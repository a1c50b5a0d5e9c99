//! Bitboard representation for the 81-square shogi board.
//!
//! Squares are numbered `file * 9 + rank` (see `types`). The board is split
//! over two words: word 0 holds squares 0..=62 (files 1 to 7) in bits 0..=62,
//! word 1 holds squares 63..=80 (files 8 and 9) in bits 0..=17. Bits outside
//! the board are always zero, so `popcount` and iteration only ever report
//! real squares.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

const LO_BITS: u64 = (1u64 << 63) - 1;
const HI_BITS: u64 = (1u64 << 18) - 1;

/// A set of squares on the shogi board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub [u64; 2]);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard([0, 0]);
    pub const ALL: Bitboard = Bitboard([LO_BITS, HI_BITS]);

    /// Create a bitboard with a single square set.
    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        debug_assert!(sq < 81);
        if sq < 63 {
            Bitboard([1u64 << sq, 0])
        } else {
            Bitboard([0, 1u64 << (sq - 63)])
        }
    }

    /// All nine squares of a file (0 = USI file 1).
    pub const fn file_mask(file: i8) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        let mut rank = 0;
        while rank < 9 {
            bb = bb.with((file as u8) * 9 + rank);
            rank += 1;
        }
        bb
    }

    /// All nine squares of a rank (0 = USI rank `a`).
    pub const fn rank_mask(rank: i8) -> Bitboard {
        let mut bb = Bitboard::EMPTY;
        let mut file = 0;
        while file < 9 {
            bb = bb.with(file * 9 + rank as u8);
            file += 1;
        }
        bb
    }

    #[inline(always)]
    pub const fn with(self, sq: u8) -> Bitboard {
        let b = Bitboard::from_square(sq);
        Bitboard([self.0[0] | b.0[0], self.0[1] | b.0[1]])
    }

    /// Check if the bitboard is empty.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        (self.0[0] | self.0[1]) == 0
    }

    /// Check if a specific square is set.
    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        let b = Bitboard::from_square(sq);
        ((self.0[0] & b.0[0]) | (self.0[1] & b.0[1])) != 0
    }

    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        *self |= Bitboard::from_square(sq);
    }

    #[inline(always)]
    pub fn clear(&mut self, sq: u8) {
        *self = self.and_not(Bitboard::from_square(sq));
    }

    #[inline(always)]
    pub fn toggle(&mut self, sq: u8) {
        *self ^= Bitboard::from_square(sq);
    }

    /// Count the number of set squares.
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0[0].count_ones() + self.0[1].count_ones()
    }

    /// More than one square set.
    #[inline(always)]
    pub const fn more_than_one(self) -> bool {
        if self.0[0] != 0 && self.0[1] != 0 {
            return true;
        }
        let w = self.0[0] | self.0[1];
        (w & w.wrapping_sub(1)) != 0
    }

    /// Lowest-numbered square, or None if empty.
    #[inline(always)]
    pub const fn lsb(self) -> Option<u8> {
        if self.0[0] != 0 {
            Some(self.0[0].trailing_zeros() as u8)
        } else if self.0[1] != 0 {
            Some(63 + self.0[1].trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Get and remove the lowest-numbered square.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u8> {
        if self.0[0] != 0 {
            let sq = self.0[0].trailing_zeros() as u8;
            self.0[0] &= self.0[0] - 1;
            Some(sq)
        } else if self.0[1] != 0 {
            let sq = 63 + self.0[1].trailing_zeros() as u8;
            self.0[1] &= self.0[1] - 1;
            Some(sq)
        } else {
            None
        }
    }

    /// `self & !other` without leaving the board.
    #[inline(always)]
    pub const fn and_not(self, other: Bitboard) -> Bitboard {
        Bitboard([self.0[0] & !other.0[0], self.0[1] & !other.0[1]])
    }

    /// Gather the bits of `self` selected by `mask` into a dense index.
    ///
    /// Word 0's selected bits come first, word 1's are stacked above them,
    /// which numbers mask squares in increasing square order.
    #[inline(always)]
    pub fn merge_to_line_index(self, mask: Bitboard) -> usize {
        let lo = pext(self.0[0], mask.0[0]);
        let hi = pext(self.0[1], mask.0[1]);
        (lo | (hi << mask.0[0].count_ones())) as usize
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline(always)]
fn pext(value: u64, mask: u64) -> u64 {
    core::arch::x86_64::_pext_u64(value, mask)
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline(always)]
fn pext(value: u64, mut mask: u64) -> u64 {
    let mut out = 0u64;
    let mut bit = 1u64;
    while mask != 0 {
        let low = mask & mask.wrapping_neg();
        if value & low != 0 {
            out |= bit;
        }
        mask ^= low;
        bit <<= 1;
    }
    out
}

// Operator implementations
impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline(always)]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard([self.0[0] & rhs.0[0], self.0[1] & rhs.0[1]])
    }
}

impl BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0[0] &= rhs.0[0];
        self.0[1] &= rhs.0[1];
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline(always)]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard([self.0[0] | rhs.0[0], self.0[1] | rhs.0[1]])
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0[0] |= rhs.0[0];
        self.0[1] |= rhs.0[1];
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline(always)]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard([self.0[0] ^ rhs.0[0], self.0[1] ^ rhs.0[1]])
    }
}

impl BitXorAssign for Bitboard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0[0] ^= rhs.0[0];
        self.0[1] ^= rhs.0[1];
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    /// Complement within the board; off-board bits stay clear.
    #[inline(always)]
    fn not(self) -> Bitboard {
        Bitboard([!self.0[0] & LO_BITS, !self.0[1] & HI_BITS])
    }
}

/// Iterator over set squares, lowest first.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<u8> {
        self.pop_lsb()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.popcount() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Bitboard {}

impl FromIterator<u8> for Bitboard {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut bb = Bitboard::EMPTY;
        for sq in iter {
            bb.set(sq);
        }
        bb
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
