//! Slow mailbox reference for cross-checking the bitboard position.
//!
//! Everything here walks piece directions square by square and plays moves
//! on a plain array, sharing nothing with the library beyond its types.

#![allow(dead_code)]

use shogi_core::{Color, Move, Piece, PieceKind, Position};

const ORTHO: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAG: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const GOLD: [(i8, i8); 6] = [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (0, 1)];
const SILVER: [(i8, i8); 5] = [(-1, -1), (0, -1), (1, -1), (-1, 1), (1, 1)];
const KNIGHT: [(i8, i8); 2] = [(-1, -2), (1, -2)];

fn square(file: i8, rank: i8) -> Option<u8> {
    ((0..9).contains(&file) && (0..9).contains(&rank)).then(|| (file * 9 + rank) as u8)
}

/// Rank counted from `color`'s own back rank toward the enemy, 0..=8 with 0 the far end.
fn forward_rank(color: Color, s: u8) -> i8 {
    let rank = (s % 9) as i8;
    match color {
        Color::Black => rank,
        Color::White => 8 - rank,
    }
}

fn in_zone(color: Color, s: u8) -> bool {
    forward_rank(color, s) < 3
}

fn must_promote(color: Color, kind: PieceKind, s: u8) -> bool {
    match kind {
        PieceKind::Pawn | PieceKind::Lance => forward_rank(color, s) == 0,
        PieceKind::Knight => forward_rank(color, s) < 2,
        _ => false,
    }
}

/// (direction, slides) pairs for a piece, in Black's orientation.
fn directions(kind: PieceKind) -> Vec<((i8, i8), bool)> {
    let steps = |dirs: &[(i8, i8)]| dirs.iter().map(|&d| (d, false)).collect::<Vec<_>>();
    let slides = |dirs: &[(i8, i8)]| dirs.iter().map(|&d| (d, true)).collect::<Vec<_>>();
    match kind {
        PieceKind::Pawn => steps(&[(0, -1)]),
        PieceKind::Lance => slides(&[(0, -1)]),
        PieceKind::Knight => steps(&KNIGHT),
        PieceKind::Silver => steps(&SILVER),
        PieceKind::Bishop => slides(&DIAG),
        PieceKind::Rook => slides(&ORTHO),
        PieceKind::King => [steps(&ORTHO), steps(&DIAG)].concat(),
        PieceKind::Horse => [slides(&DIAG), steps(&ORTHO)].concat(),
        PieceKind::Dragon => [slides(&ORTHO), steps(&DIAG)].concat(),
        _ => steps(&GOLD),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mailbox {
    pub board: [Option<Piece>; 81],
    pub hands: [[u32; 7]; 2],
    pub side_to_move: Color,
}

impl Mailbox {
    pub fn from_position(pos: &Position) -> Self {
        let mut board = [None; 81];
        for (s, slot) in board.iter_mut().enumerate() {
            *slot = pos.piece_at(s as u8);
        }
        let mut hands = [[0; 7]; 2];
        for color in Color::ALL {
            for (i, kind) in PieceKind::HAND.into_iter().enumerate() {
                hands[color.idx()][i] = pos.hand(color).count(kind);
            }
        }
        Self {
            board,
            hands,
            side_to_move: pos.side_to_move(),
        }
    }

    fn hand_slot(kind: PieceKind) -> usize {
        PieceKind::HAND
            .iter()
            .position(|&k| k == kind)
            .expect("kind is never held in hand")
    }

    pub fn king_sq(&self, color: Color) -> Option<u8> {
        (0..81u8).find(|&s| self.board[s as usize] == Some(Piece::new(color, PieceKind::King)))
    }

    /// Squares the piece on `from` attacks.
    pub fn targets(&self, from: u8) -> Vec<u8> {
        let Some(pc) = self.board[from as usize] else {
            return Vec::new();
        };
        let flip = if pc.color == Color::Black { 1 } else { -1 };
        let (file, rank) = ((from / 9) as i8, (from % 9) as i8);
        let mut out = Vec::new();
        for ((df, dr), slides) in directions(pc.kind) {
            let (df, dr) = (df * flip, dr * flip);
            let (mut f, mut r) = (file + df, rank + dr);
            while let Some(s) = square(f, r) {
                out.push(s);
                if !slides || self.board[s as usize].is_some() {
                    break;
                }
                f += df;
                r += dr;
            }
        }
        out
    }

    pub fn attacked_by(&self, color: Color, s: u8) -> bool {
        (0..81u8).any(|from| {
            matches!(self.board[from as usize], Some(pc) if pc.color == color)
                && self.targets(from).contains(&s)
        })
    }

    /// For every square, the ascending list of `color` pieces attacking it.
    pub fn attack_map(&self, color: Color) -> Vec<Vec<u8>> {
        let mut map = vec![Vec::new(); 81];
        for from in 0..81u8 {
            if matches!(self.board[from as usize], Some(pc) if pc.color == color) {
                for s in self.targets(from) {
                    map[s as usize].push(from);
                }
            }
        }
        map
    }

    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.king_sq(us)
            .is_some_and(|ksq| self.attacked_by(us.other(), ksq))
    }

    pub fn play(&mut self, mv: Move) {
        let us = self.side_to_move;
        match mv {
            Move::Drop { kind, to } => {
                self.hands[us.idx()][Self::hand_slot(kind)] -= 1;
                self.board[to as usize] = Some(Piece::new(us, kind));
            }
            Move::Normal { from, to, promote } => {
                let mut pc = self.board[from as usize].take().expect("no piece to move");
                if let Some(cap) = self.board[to as usize] {
                    self.hands[us.idx()][Self::hand_slot(cap.kind.demote())] += 1;
                }
                if promote {
                    pc.kind = pc.kind.promote().expect("kind cannot promote");
                }
                self.board[to as usize] = Some(pc);
            }
        }
        self.side_to_move = us.other();
    }

    fn pseudo_moves(&self) -> Vec<Move> {
        let us = self.side_to_move;
        let mut out = Vec::new();
        for from in 0..81u8 {
            let Some(pc) = self.board[from as usize] else {
                continue;
            };
            if pc.color != us {
                continue;
            }
            for to in self.targets(from) {
                if matches!(self.board[to as usize], Some(other) if other.color == us) {
                    continue;
                }
                if pc.kind.can_promote() && (in_zone(us, from) || in_zone(us, to)) {
                    out.push(Move::Normal { from, to, promote: true });
                }
                if !must_promote(us, pc.kind, to) {
                    out.push(Move::Normal { from, to, promote: false });
                }
            }
        }
        for (i, kind) in PieceKind::HAND.into_iter().enumerate() {
            if self.hands[us.idx()][i] == 0 {
                continue;
            }
            for to in 0..81u8 {
                if self.board[to as usize].is_some() || must_promote(us, kind, to) {
                    continue;
                }
                if kind == PieceKind::Pawn {
                    let file = to / 9;
                    let doubled = (0..9).any(|r| {
                        self.board[(file * 9 + r) as usize]
                            == Some(Piece::new(us, PieceKind::Pawn))
                    });
                    if doubled {
                        continue;
                    }
                }
                out.push(Move::Drop { kind, to });
            }
        }
        out
    }

    fn is_safe(&self, mv: Move) -> bool {
        let mut next = self.clone();
        next.play(mv);
        let us = self.side_to_move;
        next.king_sq(us)
            .is_none_or(|ksq| !next.attacked_by(us.other(), ksq))
    }

    /// Moves that leave the mover's king safe, before the pawn-drop-mate rule.
    pub fn safe_moves(&self) -> Vec<Move> {
        self.pseudo_moves()
            .into_iter()
            .filter(|&mv| self.is_safe(mv))
            .collect()
    }

    /// Pieces of the side not to move that attack the side to move's king.
    pub fn checkers(&self) -> Vec<u8> {
        let us = self.side_to_move;
        match self.king_sq(us) {
            Some(ksq) => self.attack_map(us.other()).swap_remove(ksq as usize),
            None => Vec::new(),
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudo_moves()
            .into_iter()
            .filter(|&mv| self.is_safe(mv) && !self.is_pawn_drop_mate(mv))
            .collect()
    }

    fn is_pawn_drop_mate(&self, mv: Move) -> bool {
        let Move::Drop { kind: PieceKind::Pawn, .. } = mv else {
            return false;
        };
        let mut next = self.clone();
        next.play(mv);
        // A pawn check is adjacent, so replies never include interposing drops.
        next.in_check() && !next.pseudo_moves().into_iter().any(|m| next.is_safe(m))
    }

    /// The side to move has been checkmated.
    pub fn is_mated(&self) -> bool {
        self.in_check()
            && !self
                .pseudo_moves()
                .into_iter()
                .any(|mv| self.is_safe(mv) && !self.is_pawn_drop_mate(mv))
    }
}

pub fn usi_set(moves: impl IntoIterator<Item = Move>) -> Vec<String> {
    let mut out: Vec<String> = moves.into_iter().map(|m| m.to_usi()).collect();
    out.sort();
    out
}
