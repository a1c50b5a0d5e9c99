use crate::bitboard::Bitboard;
use crate::error::{MoveParseError, SfenError};
use crate::hand::{HAND_MAX, Hand};
use crate::material::{capture_value, piece_value, promotion_gain};
use crate::movegen::legal_moves;
use crate::state::{DirtyPiece, PieceChange, PieceLocation, StateInfo};
use crate::types::*;
use crate::zobrist::ZOBRIST;

pub const START_SFEN: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// Largest move number accepted in SFEN; leaves room to keep counting plies.
pub const MAX_MOVE_NUMBER: u32 = 1_000_000_000;

/// Hand kinds in the order SFEN writes them.
const SFEN_HAND_ORDER: [PieceKind; 7] = [
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Gold,
    PieceKind::Silver,
    PieceKind::Knight,
    PieceKind::Lance,
    PieceKind::Pawn,
];

#[derive(Clone, Debug)]
pub struct Position {
    board: [Option<Piece>; NUM_SQUARES],
    by_color: [Bitboard; 2],
    by_kind: [Bitboard; PieceKind::NUM],
    occupied: Bitboard,
    hands: [Hand; 2],
    king_sq: [u8; 2],
    side_to_move: Color,
    game_ply: u32,
    /// One entry per position reached; the last is the current one.
    states: Vec<StateInfo>,
}

/// Token returned by `make_move`, consumed by `unmake_move`.
#[derive(Clone, Copy, Debug)]
#[must_use]
pub struct Undo {
    pub mv: Move,
    pub captured: Option<Piece>,
    game_ply: u32,
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_sfen(START_SFEN).expect("start position SFEN is valid")
    }

    fn empty() -> Self {
        Position {
            board: [None; NUM_SQUARES],
            by_color: [Bitboard::EMPTY; 2],
            by_kind: [Bitboard::EMPTY; PieceKind::NUM],
            occupied: Bitboard::EMPTY,
            hands: [Hand::EMPTY; 2],
            king_sq: [0; 2],
            side_to_move: Color::Black,
            game_ply: 1,
            states: Vec::with_capacity(256),
        }
    }

    /// Parse an SFEN string: board, side to move, hands and an optional move number.
    pub fn from_sfen(sfen: &str) -> Result<Self, SfenError> {
        let parsed = Self::parse_sfen(sfen).and_then(|pos| pos.validate().map(|()| pos));
        match parsed {
            Ok(mut pos) => {
                let st = pos.root_state();
                pos.states.push(st);
                debug_assert!(pos.is_ok());
                Ok(pos)
            }
            Err(err) => {
                tracing::debug!(sfen, %err, "rejected SFEN");
                Err(err)
            }
        }
    }

    fn parse_sfen(sfen: &str) -> Result<Self, SfenError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SfenError::MissingFields(parts.len()));
        }

        let mut pos = Position::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != NUM_RANKS as usize {
            return Err(SfenError::RankCount(ranks.len()));
        }

        for (rank, rank_str) in ranks.iter().enumerate() {
            // Columns run from file 9 on the left to file 1 on the right.
            let mut column = 0usize;
            let mut promoted = false;
            for ch in rank_str.chars() {
                match ch {
                    '1'..='9' if !promoted => column += ch as usize - '0' as usize,
                    '+' if !promoted => promoted = true,
                    _ => {
                        let token = if promoted { format!("+{ch}") } else { ch.to_string() };
                        let base = PieceKind::from_letter(ch)
                            .ok_or_else(|| SfenError::InvalidPiece(token.clone()))?;
                        let kind = if promoted {
                            base.promote()
                                .ok_or_else(|| SfenError::InvalidPiece(token.clone()))?
                        } else {
                            base
                        };
                        let color = if ch.is_ascii_uppercase() {
                            Color::Black
                        } else {
                            Color::White
                        };
                        let s = sq(NUM_FILES - 1 - column as i8, rank as i8).ok_or(
                            SfenError::FileCount {
                                rank,
                                files: column + 1,
                            },
                        )?;
                        pos.put_piece(Piece::new(color, kind), s);
                        column += 1;
                        promoted = false;
                    }
                }
                if column > NUM_FILES as usize {
                    return Err(SfenError::FileCount {
                        rank,
                        files: column,
                    });
                }
            }
            if promoted {
                return Err(SfenError::InvalidPiece("+".to_string()));
            }
            if column != NUM_FILES as usize {
                return Err(SfenError::FileCount {
                    rank,
                    files: column,
                });
            }
        }

        pos.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => return Err(SfenError::InvalidSideToMove(other.to_string())),
        };

        if parts[2] != "-" {
            let invalid = || SfenError::InvalidHand(parts[2].to_string());
            let mut count: Option<u32> = None;
            for ch in parts[2].chars() {
                if let Some(d) = ch.to_digit(10) {
                    let n = count.unwrap_or(0) * 10 + d;
                    if n == 0 || n > 18 {
                        return Err(invalid());
                    }
                    count = Some(n);
                    continue;
                }
                let kind = PieceKind::from_letter(ch)
                    .filter(|k| k.hand_idx().is_some())
                    .ok_or_else(invalid)?;
                let color = if ch.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                let hand = &mut pos.hands[color.idx()];
                let total = hand.count(kind) + count.take().unwrap_or(1);
                let max = HAND_MAX[kind.hand_idx().unwrap_or(0)] as u32;
                if total > max {
                    return Err(SfenError::TooManyPieces {
                        kind,
                        count: total,
                        max,
                    });
                }
                hand.set(kind, total as u8);
            }
            if count.is_some() {
                return Err(invalid());
            }
        }

        if let Some(text) = parts.get(3) {
            pos.game_ply = text
                .parse()
                .ok()
                .filter(|&n| n <= MAX_MOVE_NUMBER)
                .ok_or_else(|| SfenError::InvalidMoveNumber(text.to_string()))?;
        }

        Ok(pos)
    }

    fn validate(&self) -> Result<(), SfenError> {
        for color in Color::ALL {
            let count = self.pieces_cp(color, PieceKind::King).popcount();
            if count != 1 {
                return Err(SfenError::KingCount { color, count });
            }
        }

        for (slot, kind) in PieceKind::HAND.into_iter().enumerate() {
            let on_board = match kind.promote() {
                Some(promoted) => self.pieces(kind) | self.pieces(promoted),
                None => self.pieces(kind),
            };
            let count = on_board.popcount()
                + self.hands[0].count(kind)
                + self.hands[1].count(kind);
            let max = HAND_MAX[slot] as u32;
            if count > max {
                return Err(SfenError::TooManyPieces { kind, count, max });
            }
        }

        for s in self.occupied {
            if let Some(pc) = self.piece_at(s)
                && is_dead_square(pc.color, pc.kind, s)
            {
                return Err(SfenError::DeadPiece {
                    kind: pc.kind,
                    square: sq_to_usi(s),
                });
            }
        }

        for color in Color::ALL {
            let pawns = self.pieces_cp(color, PieceKind::Pawn);
            for file in 0..NUM_FILES {
                if (pawns & Bitboard::file_mask(file)).more_than_one() {
                    return Err(SfenError::DoublePawn {
                        color,
                        file: file + 1,
                    });
                }
            }
        }

        let them = self.side_to_move.other();
        if !self
            .attackers_to(self.side_to_move, self.king_sq(them), self.occupied)
            .is_empty()
        {
            return Err(SfenError::OpponentInCheck);
        }
        Ok(())
    }

    pub fn to_sfen(&self) -> String {
        let mut out = String::new();
        for rank in 0..NUM_RANKS {
            if rank > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for file in (0..NUM_FILES).rev() {
                match sq(file, rank).and_then(|s| self.piece_at(s)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push_str(&pc.to_sfen());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::Black => 'b',
            Color::White => 'w',
        });
        out.push(' ');

        let mut hand_text = String::new();
        for color in Color::ALL {
            for kind in SFEN_HAND_ORDER {
                let n = self.hands[color.idx()].count(kind);
                if n == 0 {
                    continue;
                }
                if n > 1 {
                    hand_text.push_str(&n.to_string());
                }
                hand_text.push_str(&Piece::new(color, kind).to_sfen());
            }
        }
        if hand_text.is_empty() {
            hand_text.push('-');
        }
        out.push_str(&hand_text);
        out.push(' ');
        out.push_str(&self.game_ply.to_string());
        out
    }

    // Accessors

    #[inline(always)]
    pub fn piece_at(&self, s: u8) -> Option<Piece> {
        self.board[s as usize]
    }
    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    #[inline(always)]
    pub fn hand(&self, color: Color) -> &Hand {
        &self.hands[color.idx()]
    }
    #[inline(always)]
    pub fn king_sq(&self, color: Color) -> u8 {
        self.king_sq[color.idx()]
    }
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }
    #[inline(always)]
    pub fn pieces_of(&self, color: Color) -> Bitboard {
        self.by_color[color.idx()]
    }
    #[inline(always)]
    pub fn pieces(&self, kind: PieceKind) -> Bitboard {
        self.by_kind[kind.idx()]
    }
    #[inline(always)]
    pub fn pieces_cp(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.by_color[color.idx()] & self.by_kind[kind.idx()]
    }
    /// Gold and every kind that moves like one.
    #[inline(always)]
    pub fn golds(&self) -> Bitboard {
        self.pieces(PieceKind::Gold)
            | self.pieces(PieceKind::ProPawn)
            | self.pieces(PieceKind::ProLance)
            | self.pieces(PieceKind::ProKnight)
            | self.pieces(PieceKind::ProSilver)
    }
    /// Move number as written in SFEN; advanced by every move.
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    #[inline(always)]
    pub fn st(&self) -> &StateInfo {
        self.states
            .last()
            .expect("position always has a current state")
    }
    pub(crate) fn states(&self) -> &[StateInfo] {
        &self.states
    }
    pub fn key(&self) -> u64 {
        self.st().key()
    }
    pub fn board_key(&self) -> u64 {
        self.st().board_key
    }
    pub fn hand_key(&self) -> u64 {
        self.st().hand_key
    }
    /// Black-minus-White material.
    pub fn material(&self) -> i32 {
        self.st().material
    }
    pub fn checkers(&self) -> Bitboard {
        self.st().checkers
    }
    pub fn in_check(&self) -> bool {
        !self.st().checkers.is_empty()
    }
    pub fn blockers_for_king(&self, color: Color) -> Bitboard {
        self.st().blockers_for_king[color.idx()]
    }
    pub fn pinners(&self, color: Color) -> Bitboard {
        self.st().pinners[color.idx()]
    }
    pub fn check_squares(&self, kind: PieceKind) -> Bitboard {
        self.st().check_squares[kind.idx()]
    }
    pub fn captured_piece(&self) -> Option<Piece> {
        self.st().captured
    }
    pub fn dirty_piece(&self) -> &DirtyPiece {
        &self.st().dirty
    }

    fn put_piece(&mut self, pc: Piece, s: u8) {
        debug_assert!(self.board[s as usize].is_none());
        self.board[s as usize] = Some(pc);
        self.by_color[pc.color.idx()].set(s);
        self.by_kind[pc.kind.idx()].set(s);
        self.occupied.set(s);
        if pc.kind == PieceKind::King {
            self.king_sq[pc.color.idx()] = s;
        }
    }

    fn remove_piece(&mut self, s: u8) -> Piece {
        let pc = self.board[s as usize]
            .take()
            .expect("no piece to remove");
        self.by_color[pc.color.idx()].clear(s);
        self.by_kind[pc.kind.idx()].clear(s);
        self.occupied.clear(s);
        pc
    }

    fn root_state(&self) -> StateInfo {
        let mut board_key = 0u64;
        let mut material = 0i32;
        for s in self.occupied {
            if let Some(pc) = self.piece_at(s) {
                board_key ^= ZOBRIST.piece_key(pc, s);
                material += sign(pc.color) * piece_value(pc.kind);
            }
        }
        if self.side_to_move == Color::White {
            board_key ^= ZOBRIST.side_to_move;
        }
        for color in Color::ALL {
            for (kind, n) in self.hands[color.idx()].iter() {
                material += sign(color) * piece_value(kind) * n as i32;
            }
        }

        let mut st = StateInfo {
            checkers: Bitboard::EMPTY,
            blockers_for_king: [Bitboard::EMPTY; 2],
            pinners: [Bitboard::EMPTY; 2],
            check_squares: [Bitboard::EMPTY; PieceKind::NUM],
            board_key,
            hand_key: ZOBRIST.hands_key(&self.hands),
            material,
            captured: None,
            plies_from_null: 0,
            continuous_checks: [0; 2],
            hand_of_side_to_move: self.hands[self.side_to_move.idx()],
            dirty: DirtyPiece::default(),
        };
        self.set_check_info(&mut st);
        st
    }

    /// Play a legal move. `unmake_move` with the returned token restores the position exactly.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        debug_assert!(self.is_pseudo_legal(mv) && self.is_legal(mv), "illegal move {mv}");
        let us = self.side_to_move;
        let prev = *self.st();

        let mut board_key = prev.board_key ^ ZOBRIST.side_to_move;
        let mut hand_key = prev.hand_key;
        let mut material = prev.material;
        let mut dirty = DirtyPiece::default();
        let mut captured = None;

        match mv {
            Move::Drop { kind, to } => {
                let count = self.hands[us.idx()].count(kind);
                hand_key ^= ZOBRIST.hand_key(us, kind, count);
                self.hands[us.idx()].remove(kind);
                let pc = Piece::new(us, kind);
                self.put_piece(pc, to);
                board_key ^= ZOBRIST.piece_key(pc, to);
                dirty.push(PieceChange {
                    old_piece: pc,
                    old_location: PieceLocation::Hand {
                        color: us,
                        kind,
                        count,
                    },
                    new_piece: pc,
                    new_location: PieceLocation::Board(to),
                });
            }
            Move::Normal { from, to, promote } => {
                let moved = self.remove_piece(from);
                board_key ^= ZOBRIST.piece_key(moved, from);

                if self.board[to as usize].is_some() {
                    let cap = self.remove_piece(to);
                    board_key ^= ZOBRIST.piece_key(cap, to);
                    let base = cap.kind.demote();
                    self.hands[us.idx()].add(base);
                    let count = self.hands[us.idx()].count(base);
                    hand_key ^= ZOBRIST.hand_key(us, base, count);
                    material += sign(us) * capture_value(cap.kind);
                    dirty.push(PieceChange {
                        old_piece: cap,
                        old_location: PieceLocation::Board(to),
                        new_piece: Piece::new(us, base),
                        new_location: PieceLocation::Hand {
                            color: us,
                            kind: base,
                            count,
                        },
                    });
                    captured = Some(cap);
                }

                let placed = if promote {
                    material += sign(us) * promotion_gain(moved.kind);
                    let kind = moved
                        .kind
                        .promote()
                        .expect("promotion of a kind that cannot promote");
                    Piece::new(us, kind)
                } else {
                    moved
                };
                self.put_piece(placed, to);
                board_key ^= ZOBRIST.piece_key(placed, to);
                dirty.push(PieceChange {
                    old_piece: moved,
                    old_location: PieceLocation::Board(from),
                    new_piece: placed,
                    new_location: PieceLocation::Board(to),
                });
            }
        }

        self.side_to_move = us.other();
        self.game_ply += 1;

        let mut st = StateInfo {
            board_key,
            hand_key,
            material,
            captured,
            plies_from_null: prev.plies_from_null + 1,
            hand_of_side_to_move: self.hands[us.other().idx()],
            dirty,
            ..prev
        };
        self.set_check_info(&mut st);
        st.continuous_checks[us.idx()] = if st.checkers.is_empty() {
            0
        } else {
            prev.continuous_checks[us.idx()] + 2
        };
        self.states.push(st);
        debug_assert!(self.is_ok());

        Undo {
            mv,
            captured,
            game_ply: self.game_ply,
        }
    }

    /// Reverse the most recent `make_move`.
    pub fn unmake_move(&mut self, undo: Undo) {
        debug_assert_eq!(undo.game_ply, self.game_ply, "undo token out of order");
        debug_assert!(self.states.len() > 1);
        self.states.pop();
        let us = self.side_to_move.other();
        self.side_to_move = us;
        self.game_ply -= 1;

        match undo.mv {
            Move::Drop { kind, to } => {
                self.remove_piece(to);
                self.hands[us.idx()].add(kind);
            }
            Move::Normal { from, to, promote } => {
                let placed = self.remove_piece(to);
                let moved = if promote {
                    Piece::new(us, placed.kind.demote())
                } else {
                    placed
                };
                self.put_piece(moved, from);
                if let Some(cap) = undo.captured {
                    self.hands[us.idx()].remove(cap.kind.demote());
                    self.put_piece(cap, to);
                }
            }
        }
        debug_assert!(self.is_ok());
    }

    /// Pass the turn. The side to move must not be in check.
    pub fn make_null_move(&mut self) -> Undo {
        debug_assert!(!self.in_check());
        let prev = *self.st();
        self.side_to_move = self.side_to_move.other();
        self.game_ply += 1;
        let mut st = StateInfo {
            board_key: prev.board_key ^ ZOBRIST.side_to_move,
            captured: None,
            plies_from_null: 0,
            continuous_checks: [0; 2],
            hand_of_side_to_move: self.hands[self.side_to_move.idx()],
            dirty: DirtyPiece::default(),
            ..prev
        };
        self.set_check_info(&mut st);
        self.states.push(st);
        Undo {
            mv: Move::new(0, 0),
            captured: None,
            game_ply: self.game_ply,
        }
    }

    pub fn unmake_null_move(&mut self, undo: Undo) {
        debug_assert_eq!(undo.game_ply, self.game_ply, "undo token out of order");
        self.states.pop();
        self.side_to_move = self.side_to_move.other();
        self.game_ply -= 1;
    }

    /// Parse a USI move and play it if it is legal here.
    pub fn make_usi_move(&mut self, text: &str) -> Result<Undo, MoveParseError> {
        let mv = Move::from_usi(text)?;
        if !legal_moves(self).contains(&mv) {
            return Err(MoveParseError::Illegal(text.to_string()));
        }
        Ok(self.make_move(mv))
    }

    /// Recompute everything from the board and compare with the incremental state.
    pub fn is_ok(&self) -> bool {
        let mut by_color = [Bitboard::EMPTY; 2];
        let mut by_kind = [Bitboard::EMPTY; PieceKind::NUM];
        for s in 0..NUM_SQUARES as u8 {
            if let Some(pc) = self.piece_at(s) {
                by_color[pc.color.idx()].set(s);
                by_kind[pc.kind.idx()].set(s);
            }
        }
        if by_color != self.by_color || by_kind != self.by_kind {
            return false;
        }
        if (by_color[0] & by_color[1]) != Bitboard::EMPTY
            || (by_color[0] | by_color[1]) != self.occupied
        {
            return false;
        }
        for color in Color::ALL {
            let kings = self.pieces_cp(color, PieceKind::King);
            if kings.popcount() != 1 || kings.lsb() != Some(self.king_sq(color)) {
                return false;
            }
        }
        let fresh = self.root_state();
        let st = self.st();
        fresh.board_key == st.board_key
            && fresh.hand_key == st.hand_key
            && fresh.material == st.material
            && fresh.checkers == st.checkers
            && fresh.hand_of_side_to_move == st.hand_of_side_to_move
    }
}

#[inline(always)]
fn sign(color: Color) -> i32 {
    match color {
        Color::Black => 1,
        Color::White => -1,
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
