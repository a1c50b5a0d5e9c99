use std::fmt;

use crate::error::MoveParseError;

pub const NUM_SQUARES: usize = 81;
pub const NUM_FILES: i8 = 9;
pub const NUM_RANKS: i8 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Sente, moves first and is written `b` in SFEN.
    Black,
    White,
}
impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    pub fn other(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

/// Piece kinds. Promoted kinds sit exactly 8 above their base kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn = 0,
    Lance = 1,
    Knight = 2,
    Silver = 3,
    Bishop = 4,
    Rook = 5,
    Gold = 6,
    King = 7,
    ProPawn = 8,
    ProLance = 9,
    ProKnight = 10,
    ProSilver = 11,
    Horse = 12,
    Dragon = 13,
}

impl PieceKind {
    pub const NUM: usize = 14;
    pub const ALL: [PieceKind; PieceKind::NUM] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Gold,
        PieceKind::King,
        PieceKind::ProPawn,
        PieceKind::ProLance,
        PieceKind::ProKnight,
        PieceKind::ProSilver,
        PieceKind::Horse,
        PieceKind::Dragon,
    ];
    /// Kinds that can be held in hand, in hand-slot order.
    pub const HAND: [PieceKind; 7] = [
        PieceKind::Pawn,
        PieceKind::Lance,
        PieceKind::Knight,
        PieceKind::Silver,
        PieceKind::Gold,
        PieceKind::Bishop,
        PieceKind::Rook,
    ];

    #[inline(always)]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn is_promoted(self) -> bool {
        self as u8 >= 8
    }

    pub fn can_promote(self) -> bool {
        (self as u8) < 6
    }

    pub fn promote(self) -> Option<PieceKind> {
        if self.can_promote() {
            Some(Self::ALL[self.idx() + 8])
        } else {
            None
        }
    }

    /// Base kind of a promoted piece; identity for everything else.
    pub fn demote(self) -> PieceKind {
        if self.is_promoted() {
            Self::ALL[self.idx() - 8]
        } else {
            self
        }
    }

    /// Moves like a gold general.
    pub fn is_gold_like(self) -> bool {
        matches!(
            self,
            PieceKind::Gold
                | PieceKind::ProPawn
                | PieceKind::ProLance
                | PieceKind::ProKnight
                | PieceKind::ProSilver
        )
    }

    /// Slot in `HAND`, or None for kinds that are never held.
    pub fn hand_idx(self) -> Option<usize> {
        match self {
            PieceKind::Pawn => Some(0),
            PieceKind::Lance => Some(1),
            PieceKind::Knight => Some(2),
            PieceKind::Silver => Some(3),
            PieceKind::Gold => Some(4),
            PieceKind::Bishop => Some(5),
            PieceKind::Rook => Some(6),
            _ => None,
        }
    }

    /// Upper-case SFEN letter of the base kind.
    pub fn letter(self) -> char {
        match self.demote() {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Gold => 'G',
            _ => 'K',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'G' => Some(PieceKind::Gold),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// SFEN token: `+` for promoted kinds, upper case for Black.
    pub fn to_sfen(self) -> String {
        let ch = match self.color {
            Color::Black => self.kind.letter(),
            Color::White => self.kind.letter().to_ascii_lowercase(),
        };
        if self.kind.is_promoted() {
            format!("+{ch}")
        } else {
            ch.to_string()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Normal { from: u8, to: u8, promote: bool },
    Drop { kind: PieceKind, to: u8 },
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Move::Normal {
            from,
            to,
            promote: false,
        }
    }

    pub fn new_promote(from: u8, to: u8) -> Self {
        Move::Normal {
            from,
            to,
            promote: true,
        }
    }

    pub fn new_drop(kind: PieceKind, to: u8) -> Self {
        Move::Drop { kind, to }
    }

    #[inline(always)]
    pub fn to_sq(self) -> u8 {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    /// Origin square; None for drops.
    #[inline(always)]
    pub fn from_sq(self) -> Option<u8> {
        match self {
            Move::Normal { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    pub fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    pub fn is_promotion(self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }

    /// USI text such as `7g7f`, `8h2b+` or `P*5e`.
    pub fn to_usi(self) -> String {
        match self {
            Move::Normal { from, to, promote } => {
                let suffix = if promote { "+" } else { "" };
                format!("{}{}{suffix}", sq_to_usi(from), sq_to_usi(to))
            }
            Move::Drop { kind, to } => format!("{}*{}", kind.letter(), sq_to_usi(to)),
        }
    }

    pub fn from_usi(s: &str) -> Result<Move, MoveParseError> {
        let invalid = || MoveParseError::Invalid(s.to_string());
        if let Some((piece, dest)) = s.split_once('*') {
            let mut chars = piece.chars();
            let kind = match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_uppercase() => {
                    PieceKind::from_letter(ch).ok_or_else(invalid)?
                }
                _ => return Err(invalid()),
            };
            if kind.hand_idx().is_none() {
                return Err(invalid());
            }
            let to = usi_to_sq(dest).ok_or_else(invalid)?;
            return Ok(Move::Drop { kind, to });
        }

        let (body, promote) = match s.strip_suffix('+') {
            Some(body) => (body, true),
            None => (s, false),
        };
        if body.len() != 4 || !body.is_ascii() {
            return Err(invalid());
        }
        let from = usi_to_sq(&body[..2]).ok_or_else(invalid)?;
        let to = usi_to_sq(&body[2..]).ok_or_else(invalid)?;
        if from == to {
            return Err(invalid());
        }
        Ok(Move::Normal { from, to, promote })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_usi())
    }
}

// Helpers. Squares are `file * 9 + rank`; file 0 is USI file 1, rank 0 is USI rank `a`.
#[inline(always)]
pub fn file_of(sq: u8) -> i8 {
    (sq / 9) as i8
}
#[inline(always)]
pub fn rank_of(sq: u8) -> i8 {
    (sq % 9) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..NUM_FILES).contains(&file) && (0..NUM_RANKS).contains(&rank) {
        Some((file as u8) * 9 + (rank as u8))
    } else {
        None
    }
}

/// Rank counted from the far side of the board as seen by `color`; 0 is the last rank.
#[inline(always)]
pub fn relative_rank(color: Color, sq: u8) -> i8 {
    match color {
        Color::Black => rank_of(sq),
        Color::White => NUM_RANKS - 1 - rank_of(sq),
    }
}

#[inline(always)]
pub fn in_promotion_zone(color: Color, sq: u8) -> bool {
    relative_rank(color, sq) <= 2
}

/// A piece of this kind could never move again from `sq`.
pub fn is_dead_square(color: Color, kind: PieceKind, sq: u8) -> bool {
    match kind {
        PieceKind::Pawn | PieceKind::Lance => relative_rank(color, sq) == 0,
        PieceKind::Knight => relative_rank(color, sq) <= 1,
        _ => false,
    }
}

pub fn sq_to_usi(sq: u8) -> String {
    let f = (b'1' + (sq / 9)) as char;
    let r = (b'a' + (sq % 9)) as char;
    format!("{f}{r}")
}

pub fn usi_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'1'..=b'9').contains(&f) || !(b'a'..=b'i').contains(&r) {
        return None;
    }
    Some((f - b'1') * 9 + (r - b'a'))
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
