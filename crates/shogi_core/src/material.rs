//! Material values used by the exchange evaluator and the running material balance.

use crate::types::PieceKind;

pub const PAWN_VALUE: i32 = 90;
pub const LANCE_VALUE: i32 = 315;
pub const KNIGHT_VALUE: i32 = 405;
pub const SILVER_VALUE: i32 = 495;
pub const GOLD_VALUE: i32 = 540;
pub const BISHOP_VALUE: i32 = 855;
pub const ROOK_VALUE: i32 = 990;
pub const PRO_PAWN_VALUE: i32 = 540;
pub const PRO_LANCE_VALUE: i32 = 540;
pub const PRO_KNIGHT_VALUE: i32 = 540;
pub const PRO_SILVER_VALUE: i32 = 540;
pub const HORSE_VALUE: i32 = 945;
pub const DRAGON_VALUE: i32 = 1395;
pub const KING_VALUE: i32 = 15000;

#[inline(always)]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Lance => LANCE_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Silver => SILVER_VALUE,
        PieceKind::Gold => GOLD_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::ProPawn => PRO_PAWN_VALUE,
        PieceKind::ProLance => PRO_LANCE_VALUE,
        PieceKind::ProKnight => PRO_KNIGHT_VALUE,
        PieceKind::ProSilver => PRO_SILVER_VALUE,
        PieceKind::Horse => HORSE_VALUE,
        PieceKind::Dragon => DRAGON_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Swing from capturing `kind`: the opponent loses the piece and the captor gains its base kind in hand.
#[inline(always)]
pub fn capture_value(kind: PieceKind) -> i32 {
    if kind == PieceKind::King {
        return KING_VALUE;
    }
    piece_value(kind) + piece_value(kind.demote())
}

/// Gain from promoting `kind`; zero for kinds that cannot promote.
#[inline(always)]
pub fn promotion_gain(kind: PieceKind) -> i32 {
    match kind.promote() {
        Some(promoted) => piece_value(promoted) - piece_value(kind),
        None => 0,
    }
}
