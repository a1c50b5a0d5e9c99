//! Error types for position setup, move text and configuration.

use crate::types::{Color, PieceKind};

/// Reasons an SFEN string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SfenError {
    #[error("expected at least 3 space-separated fields, found {0}")]
    MissingFields(usize),

    #[error("expected 9 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files")]
    FileCount { rank: usize, files: usize },

    #[error("invalid piece token `{0}`")]
    InvalidPiece(String),

    #[error("invalid side to move `{0}`")]
    InvalidSideToMove(String),

    #[error("invalid hand `{0}`")]
    InvalidHand(String),

    #[error("invalid move number `{0}`")]
    InvalidMoveNumber(String),

    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },

    #[error("too many {kind:?}: {count} (at most {max})")]
    TooManyPieces { kind: PieceKind, count: u32, max: u32 },

    #[error("{kind:?} on {square} can never move")]
    DeadPiece { kind: PieceKind, square: String },

    #[error("two unpromoted {color:?} pawns on file {file}")]
    DoublePawn { color: Color, file: i8 },

    #[error("the side not to move is in check")]
    OpponentInCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("invalid move text `{0}`")]
    Invalid(String),

    #[error("move `{0}` is not legal in this position")]
    Illegal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
