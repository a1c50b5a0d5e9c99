//! Static exchange evaluation.

use crate::attacks::{Line, bishop_attacks, lance_attacks, line_relation, rook_attacks};
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::material::{capture_value, promotion_gain};
use crate::types::{Color, Move, PieceKind, in_promotion_zone};

/// Recapture order, cheapest piece first.
const LEAST_VALUABLE_FIRST: [PieceKind; PieceKind::NUM] = [
    PieceKind::Pawn,
    PieceKind::Lance,
    PieceKind::Knight,
    PieceKind::ProPawn,
    PieceKind::ProLance,
    PieceKind::ProKnight,
    PieceKind::Silver,
    PieceKind::ProSilver,
    PieceKind::Gold,
    PieceKind::Bishop,
    PieceKind::Horse,
    PieceKind::Rook,
    PieceKind::Dragon,
    PieceKind::King,
];

impl Position {
    /// Whether the capture sequence started by `mv` on its destination nets
    /// at least `threshold` for the mover, both sides always recapturing with
    /// their least valuable attacker and free to stop.
    ///
    /// A capture that may promote (the capturer starts or lands in its
    /// promotion zone) is counted as promoting.
    pub fn see_ge(&self, mv: Move, threshold: i32) -> bool {
        let us = self.side_to_move();
        let to = mv.to_sq();

        let (from, placed_kind, gain) = match mv {
            Move::Drop { kind, .. } => (None, kind, 0),
            Move::Normal { from, promote, .. } => {
                let Some(pc) = self.piece_at(from) else {
                    return false;
                };
                let captured = self.piece_at(to).map_or(0, |c| capture_value(c.kind));
                match (promote, pc.kind.promote()) {
                    (true, Some(promoted)) => {
                        (Some(from), promoted, captured + promotion_gain(pc.kind))
                    }
                    _ => (Some(from), pc.kind, captured),
                }
            }
        };

        // Recaptures can only lower the first gain.
        if gain < threshold {
            return false;
        }

        let mut occupied = self.occupied() | Bitboard::from_square(to);
        if let Some(from) = from {
            occupied.clear(from);
        }
        let mut attackers = self.attackers_to_both(to, occupied);

        // gains[d]: net for the side making capture d if the exchange stops there.
        let mut gains = [0i32; 40];
        gains[0] = gain;
        let mut depth = 0;
        let mut on_square = placed_kind;
        let mut stm = us;

        while depth + 1 < gains.len() {
            stm = stm.other();
            attackers &= occupied;
            let mut stm_attackers = attackers & self.pieces_of(stm);

            // Pinned pieces stay put while their pinner is still on the board.
            if !(self.pinners(stm) & occupied).is_empty() {
                stm_attackers = stm_attackers.and_not(self.blockers_for_king(stm));
            }
            let Some(kind) = LEAST_VALUABLE_FIRST
                .into_iter()
                .find(|&k| !(stm_attackers & self.pieces(k)).is_empty())
            else {
                break;
            };
            let Some(s) = (stm_attackers & self.pieces(kind)).lsb() else {
                break;
            };

            // The king may only take last.
            let king_capture = kind == PieceKind::King;
            if king_capture && !(attackers & self.pieces_of(stm.other())).is_empty() {
                break;
            }

            let promotion = match kind.promote() {
                Some(promoted) if in_promotion_zone(stm, s) || in_promotion_zone(stm, to) => {
                    Some(promoted)
                }
                _ => None,
            };
            depth += 1;
            gains[depth] = capture_value(on_square) + promotion.map_or(0, |_| promotion_gain(kind))
                - gains[depth - 1];
            on_square = promotion.unwrap_or(kind);

            if king_capture {
                break;
            }

            occupied.clear(s);
            attackers |= self.xray_attackers(s, to, occupied);
        }

        while depth > 0 {
            gains[depth - 1] = gains[depth - 1].min(-gains[depth]);
            depth -= 1;
        }
        gains[0] >= threshold
    }

    /// Sliders behind `vacated` that now reach `to`.
    fn xray_attackers(&self, vacated: u8, to: u8, occupied: Bitboard) -> Bitboard {
        match line_relation(vacated, to) {
            Some(Line::File) => {
                (rook_attacks(to, occupied)
                    & (self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Dragon)))
                    | (lance_attacks(Color::White, to, occupied)
                        & self.pieces_cp(Color::Black, PieceKind::Lance))
                    | (lance_attacks(Color::Black, to, occupied)
                        & self.pieces_cp(Color::White, PieceKind::Lance))
            }
            Some(Line::Rank) => {
                rook_attacks(to, occupied)
                    & (self.pieces(PieceKind::Rook) | self.pieces(PieceKind::Dragon))
            }
            Some(Line::Diag | Line::AntiDiag) => {
                bishop_attacks(to, occupied)
                    & (self.pieces(PieceKind::Bishop) | self.pieces(PieceKind::Horse))
            }
            None => Bitboard::EMPTY,
        }
    }
}

#[cfg(test)]
#[path = "see_tests.rs"]
mod see_tests;
