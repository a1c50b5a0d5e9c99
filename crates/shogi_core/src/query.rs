//! Attack queries: who attacks a square, pins and discovered checks, check
//! prediction and move legality.

use crate::attacks::*;
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::state::StateInfo;
use crate::types::*;

impl Position {
    /// Pieces of `color` attacking `s`, with sliders seeing through `occ`.
    pub fn attackers_to(&self, color: Color, s: u8, occ: Bitboard) -> Bitboard {
        // Step patterns are point-symmetric: a piece of `color` attacks `s`
        // exactly when the same kind of the other color on `s` attacks it.
        let them = color.other();
        let kings = self.pieces(PieceKind::King);
        let attackers = (pawn_attacks(them, s) & self.pieces(PieceKind::Pawn))
            | (lance_attacks(them, s, occ) & self.pieces(PieceKind::Lance))
            | (knight_attacks(them, s) & self.pieces(PieceKind::Knight))
            | (silver_attacks(them, s)
                & (self.pieces(PieceKind::Silver) | kings | self.pieces(PieceKind::Dragon)))
            | (gold_attacks(them, s) & (self.golds() | kings | self.pieces(PieceKind::Horse)))
            | (bishop_attacks(s, occ)
                & (self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Horse)))
            | (rook_attacks(s, occ)
                & (self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Dragon)));
        attackers & self.pieces_of(color)
    }

    /// Attackers of both colors.
    pub fn attackers_to_both(&self, s: u8, occ: Bitboard) -> Bitboard {
        self.attackers_to(Color::Black, s, occ) | self.attackers_to(Color::White, s, occ)
    }

    /// Whether any piece of `color` attacks `s` on the current board.
    pub fn exists_attacker(&self, color: Color, s: u8) -> bool {
        let them = color.other();
        let ours = self.pieces_of(color);
        let occ = self.occupied();
        let hit = |bb: Bitboard| !(bb & ours).is_empty();

        hit(pawn_attacks(them, s) & self.pieces(PieceKind::Pawn))
            || hit(knight_attacks(them, s) & self.pieces(PieceKind::Knight))
            || hit(
                silver_attacks(them, s)
                    & (self.pieces(PieceKind::Silver)
                        | self.pieces(PieceKind::King)
                        | self.pieces(PieceKind::Dragon)),
            )
            || hit(
                gold_attacks(them, s)
                    & (self.golds() | self.pieces(PieceKind::King) | self.pieces(PieceKind::Horse)),
            )
            || hit(lance_attacks(them, s, occ) & self.pieces(PieceKind::Lance))
            || hit(
                bishop_attacks(s, occ)
                    & (self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Horse)),
            )
            || hit(
                rook_attacks(s, occ)
                    & (self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Dragon)),
            )
    }

    /// Pieces shielding the king on `ksq` from sliders of `slider_color`.
    ///
    /// Returns `(blockers, pinners)`: blockers are pieces of either color that
    /// are alone between the king and such a slider; pinners are the sliders
    /// whose lone blocker belongs to the king's side.
    pub fn slider_blockers(&self, slider_color: Color, ksq: u8) -> (Bitboard, Bitboard) {
        let king_color = slider_color.other();
        let snipers = ((lance_pseudo_attacks(king_color, ksq) & self.pieces(PieceKind::Lance))
            | (bishop_pseudo_attacks(ksq)
                & (self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Horse)))
            | (rook_pseudo_attacks(ksq)
                & (self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Dragon))))
            & self.pieces_of(slider_color);

        let mut blockers = Bitboard::EMPTY;
        let mut pinners = Bitboard::EMPTY;
        for sniper in snipers {
            let between = between(ksq, sniper) & self.occupied();
            if !between.is_empty() && !between.more_than_one() {
                blockers |= between;
                if !(between & self.pieces_of(king_color)).is_empty() {
                    pinners.set(sniper);
                }
            }
        }
        (blockers, pinners)
    }

    pub(crate) fn set_check_info(&self, st: &mut StateInfo) {
        let us = self.side_to_move();
        let them = us.other();
        st.checkers = self.attackers_to(them, self.king_sq(us), self.occupied());
        for color in Color::ALL {
            let (blockers, pinners) = self.slider_blockers(color.other(), self.king_sq(color));
            st.blockers_for_king[color.idx()] = blockers;
            st.pinners[color.idx()] = pinners;
        }
        let ksq = self.king_sq(them);
        for kind in PieceKind::ALL {
            st.check_squares[kind.idx()] = match kind {
                PieceKind::King => Bitboard::EMPTY,
                _ => attacks_of(kind, them, ksq, self.occupied()),
            };
        }
    }

    /// Moving a blocker from `from` to `to` uncovers a slider onto `ksq`.
    #[inline(always)]
    pub fn is_discovered_check(blockers: Bitboard, from: u8, to: u8, ksq: u8) -> bool {
        blockers.contains(from) && !aligned(from, to, ksq)
    }

    /// Whether the (pseudo-legal) move checks the opponent.
    pub fn gives_check(&self, mv: Move) -> bool {
        match mv {
            Move::Drop { kind, to } => self.check_squares(kind).contains(to),
            Move::Normal { from, to, promote } => {
                let Some(pc) = self.piece_at(from) else {
                    return false;
                };
                let kind = match (promote, pc.kind.promote()) {
                    (true, Some(promoted)) => promoted,
                    _ => pc.kind,
                };
                let them = self.side_to_move().other();
                self.check_squares(kind).contains(to)
                    || Self::is_discovered_check(
                        self.blockers_for_king(them),
                        from,
                        to,
                        self.king_sq(them),
                    )
            }
        }
    }

    /// A pawn of `color` dropped on `s` would be checkmate.
    ///
    /// Only meaningful when the pawn on `s` attacks the enemy king.
    pub fn is_pawn_drop_checkmate(&self, color: Color, s: u8) -> bool {
        let them = color.other();
        let ksq = self.king_sq(them);
        let occ = self.occupied() | Bitboard::from_square(s);

        // Unsupported pawn: the king takes it.
        if self.attackers_to(color, s, occ).is_empty() {
            return false;
        }

        let defenders = self
            .attackers_to(them, s, occ)
            .and_not(self.pieces(PieceKind::King));
        let pinned = self.blockers_for_king(them);
        for from in defenders {
            if !pinned.contains(from) || aligned(from, s, ksq) {
                return false;
            }
        }

        let without_king = occ.and_not(Bitboard::from_square(ksq));
        let escapes = king_attacks(ksq).and_not(self.pieces_of(them) | Bitboard::from_square(s));
        for to in escapes {
            if self.attackers_to(color, to, without_king).is_empty() {
                return false;
            }
        }
        true
    }

    /// Cheap validity check for a move of unknown origin (hash tables, killers).
    ///
    /// When in check, also requires the move to address the check.
    pub fn is_pseudo_legal(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let occ = self.occupied();
        let to = mv.to_sq();
        if to as usize >= NUM_SQUARES {
            return false;
        }

        match mv {
            Move::Drop { kind, .. } => {
                if kind.hand_idx().is_none()
                    || !self.hand(us).has(kind)
                    || occ.contains(to)
                    || is_dead_square(us, kind, to)
                {
                    return false;
                }
                if kind == PieceKind::Pawn
                    && !(self.pieces_cp(us, PieceKind::Pawn) & Bitboard::file_mask(file_of(to)))
                        .is_empty()
                {
                    return false;
                }
                let checkers = self.checkers();
                if !checkers.is_empty() {
                    if checkers.more_than_one() {
                        return false;
                    }
                    let csq = checkers.lsb().unwrap_or(0);
                    return between(csq, self.king_sq(us)).contains(to);
                }
                true
            }
            Move::Normal { from, promote, .. } => {
                if from as usize >= NUM_SQUARES || from == to {
                    return false;
                }
                let Some(pc) = self.piece_at(from) else {
                    return false;
                };
                if pc.color != us
                    || self.pieces_of(us).contains(to)
                    || !attacks_of(pc.kind, us, from, occ).contains(to)
                {
                    return false;
                }
                if promote {
                    if !pc.kind.can_promote()
                        || !(in_promotion_zone(us, from) || in_promotion_zone(us, to))
                    {
                        return false;
                    }
                } else if is_dead_square(us, pc.kind, to) {
                    return false;
                }

                let checkers = self.checkers();
                if !checkers.is_empty() && pc.kind != PieceKind::King {
                    if checkers.more_than_one() {
                        return false;
                    }
                    let csq = checkers.lsb().unwrap_or(0);
                    if !(between(csq, self.king_sq(us)) | checkers).contains(to) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// Full legality of a pseudo-legal move.
    pub fn is_legal(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        match mv {
            Move::Drop { kind, to } => {
                let them = us.other();
                !(kind == PieceKind::Pawn
                    && pawn_attacks(us, to).contains(self.king_sq(them))
                    && self.is_pawn_drop_checkmate(us, to))
            }
            Move::Normal { from, to, .. } => {
                let ksq = self.king_sq(us);
                if from == ksq {
                    let occ = self.occupied().and_not(Bitboard::from_square(from));
                    return self.attackers_to(us.other(), to, occ).is_empty();
                }
                !self.blockers_for_king(us).contains(from) || aligned(from, to, ksq)
            }
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod query_tests;
