//! Mate-in-one detection.
//!
//! Only checking moves are tried; each one is played and the defender's
//! replies are examined without generating them: king steps, captures of the
//! checker and interpositions by move or drop.

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::movegen::{drop_targets, move_variants};
use crate::types::*;

/// Drop kinds tried after knights, strongest checkers first.
const DROP_ORDER: [PieceKind; 6] = [
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Lance,
    PieceKind::Pawn,
];

impl Position {
    /// A legal move that checkmates the opponent at once, if there is one.
    ///
    /// The side to move must not be in check. Pawn drops that would mate are
    /// illegal and never returned.
    pub fn find_mate(&mut self) -> Option<Move> {
        debug_assert!(!self.in_check(), "mate search while in check");
        let us = self.side_to_move();
        let them = us.other();
        let ksq = self.king_sq(them);
        let ours = self.pieces_of(us);
        let occ = self.occupied();
        let discoverers = self.blockers_for_king(them) & ours;

        // Knights first: their checks cannot be blocked.
        for from in self.pieces_cp(us, PieceKind::Knight) {
            let targets = knight_attacks(us, from).and_not(ours);
            if let Some(mv) = self.mate_among_moves(PieceKind::Knight, from, targets) {
                return Some(mv);
            }
        }
        if self.hand(us).has(PieceKind::Knight) {
            let targets = knight_attacks(them, ksq) & drop_targets(self, us, PieceKind::Knight);
            if let Some(mv) = self.mate_among_drops(PieceKind::Knight, targets) {
                return Some(mv);
            }
        }

        let others = ours.and_not(self.pieces(PieceKind::Knight));
        for from in others {
            let Some(pc) = self.piece_at(from) else {
                continue;
            };
            let mut targets = attacks_of(pc.kind, us, from, occ).and_not(ours);
            if !discoverers.contains(from) {
                let mut checking = self.check_squares(pc.kind);
                if let Some(promoted) = pc.kind.promote() {
                    checking |= self.check_squares(promoted);
                }
                targets &= checking;
            }
            if let Some(mv) = self.mate_among_moves(pc.kind, from, targets) {
                return Some(mv);
            }
        }

        for kind in DROP_ORDER {
            if !self.hand(us).has(kind) {
                continue;
            }
            let targets = self.check_squares(kind) & drop_targets(self, us, kind);
            if let Some(mv) = self.mate_among_drops(kind, targets) {
                return Some(mv);
            }
        }
        None
    }

    fn mate_among_moves(&mut self, kind: PieceKind, from: u8, targets: Bitboard) -> Option<Move> {
        let us = self.side_to_move();
        for to in targets {
            for mv in move_variants(us, kind, from, to).into_iter().flatten() {
                if self.gives_check(mv) && self.is_legal(mv) && self.is_mate_after(mv) {
                    return Some(mv);
                }
            }
        }
        None
    }

    fn mate_among_drops(&mut self, kind: PieceKind, targets: Bitboard) -> Option<Move> {
        for to in targets {
            let mv = Move::new_drop(kind, to);
            // Pawn-drop mates fail the legality test.
            if self.is_legal(mv) && self.is_mate_after(mv) {
                return Some(mv);
            }
        }
        None
    }

    fn is_mate_after(&mut self, mv: Move) -> bool {
        let undo = self.make_move(mv);
        let mated = !self.has_evasion();
        self.unmake_move(undo);
        if mated {
            tracing::trace!(%mv, sfen = %self.to_sfen(), "found mate in one");
        }
        mated
    }

    /// The side to move, which is in check, has at least one legal reply.
    ///
    /// Interposing pawn drops are assumed legal even if they would themselves
    /// mate, so a mate behind such a block can be missed but never invented.
    pub fn has_evasion(&self) -> bool {
        let us = self.side_to_move();
        let them = us.other();
        let ksq = self.king_sq(us);
        let occ = self.occupied();
        let checkers = self.checkers();
        debug_assert!(!checkers.is_empty());

        let without_king = occ.and_not(Bitboard::from_square(ksq));
        for to in king_attacks(ksq).and_not(self.pieces_of(us)) {
            if self.attackers_to(them, to, without_king).is_empty() {
                return true;
            }
        }
        if checkers.more_than_one() {
            return false;
        }
        let Some(csq) = checkers.lsb() else {
            return false;
        };

        let pinned = self.blockers_for_king(us);
        let can_reach = |to: u8| {
            self.attackers_to(us, to, occ)
                .and_not(self.pieces(PieceKind::King))
                .any(|from| !pinned.contains(from) || aligned(from, to, ksq))
        };

        if can_reach(csq) {
            return true;
        }
        let hand = self.hand(us);
        let held = hand.existence_mask();
        for to in between(csq, ksq) {
            if can_reach(to) {
                return true;
            }
            if held == 0 {
                continue;
            }
            let droppable = PieceKind::HAND.iter().any(|&kind| {
                hand.has(kind) && drop_targets(self, us, kind).contains(to)
            });
            if droppable {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "mate_tests.rs"]
mod mate_tests;
