use crate::attacks::attacks_of;
use crate::bitboard::Bitboard;
use crate::{board::Position, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(128);
    legal_moves_into(pos, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    if pos.in_check() {
        out.retain(|&mv| pos.is_pseudo_legal(mv) && pos.is_legal(mv));
    } else {
        out.retain(|&mv| pos.is_legal(mv));
    }
}

/// The promoting and/or plain forms of a board move, as the rules allow.
pub(crate) fn move_variants(color: Color, kind: PieceKind, from: u8, to: u8) -> [Option<Move>; 2] {
    let promote = (kind.can_promote()
        && (in_promotion_zone(color, from) || in_promotion_zone(color, to)))
    .then_some(Move::new_promote(from, to));
    let plain = (!is_dead_square(color, kind, to)).then_some(Move::new(from, to));
    [promote, plain]
}

/// Squares where `color` may drop `kind`, ignoring the pawn-drop-mate rule.
pub(crate) fn drop_targets(pos: &Position, color: Color, kind: PieceKind) -> Bitboard {
    let mut targets = !pos.occupied();
    let last = match color {
        Color::Black => 0,
        Color::White => NUM_RANKS - 1,
    };
    let step = if color == Color::Black { 1 } else { -1 };
    match kind {
        PieceKind::Pawn | PieceKind::Lance => {
            targets = targets.and_not(Bitboard::rank_mask(last));
        }
        PieceKind::Knight => {
            targets = targets
                .and_not(Bitboard::rank_mask(last))
                .and_not(Bitboard::rank_mask(last + step));
        }
        _ => {}
    }
    if kind == PieceKind::Pawn {
        for s in pos.pieces_cp(color, PieceKind::Pawn) {
            targets = targets.and_not(Bitboard::file_mask(file_of(s)));
        }
    }
    targets
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move();
    let ours = pos.pieces_of(us);
    let occ = pos.occupied();

    for from in ours {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        let targets = attacks_of(pc.kind, us, from, occ).and_not(ours);
        for to in targets {
            out.extend(move_variants(us, pc.kind, from, to).into_iter().flatten());
        }
    }

    for (kind, _) in pos.hand(us).iter() {
        for to in drop_targets(pos, us, kind) {
            out.push(Move::new_drop(kind, to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
