//! Shogi position core: bitboards, attack tables, incremental make/unmake,
//! attack queries, static exchange evaluation and mate-in-one detection.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod config;
pub mod error;
pub mod hand;
pub mod mate;
pub mod material;
pub mod movegen;
pub mod perft;
pub mod query;
pub mod repetition;
pub mod see;
pub mod state;
pub mod types;
pub mod zobrist;

pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use config::CoreConfig;
pub use error::{ConfigError, MoveParseError, SfenError};
pub use hand::Hand;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use repetition::Repetition;
pub use state::{DirtyPiece, PieceChange, PieceLocation, StateInfo};
pub use types::*;
pub use zobrist::ZOBRIST;
