use super::*;
use crate::types::{Color, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    // Verify that keys are unique (no collisions in the whole table)
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for kind in 0..PieceKind::NUM {
            for sq in 0..NUM_SQUARES {
                let key = ZOBRIST.pieces[color][kind][sq];
                assert!(seen.insert(key), "Duplicate piece key found");
            }
        }
        for slot in 0..7 {
            for count in 1..HAND_SLOTS {
                let key = ZOBRIST.hands[color][slot][count];
                assert!(seen.insert(key), "Duplicate hand key found");
            }
        }
    }

    assert!(
        seen.insert(ZOBRIST.side_to_move),
        "Side to move key collision"
    );
}

#[test]
fn test_zobrist_piece_key() {
    let piece = Piece::new(Color::White, PieceKind::Pawn);
    let key1 = ZOBRIST.piece_key(piece, 0);
    let key2 = ZOBRIST.piece_key(piece, 1);
    assert_ne!(key1, key2);
    let promoted = Piece::new(Color::White, PieceKind::ProPawn);
    assert_ne!(key1, ZOBRIST.piece_key(promoted, 0));
}

#[test]
fn test_hands_key_is_incremental() {
    let mut hands = [Hand::EMPTY; 2];
    let mut key = 0u64;
    for _ in 0..3 {
        hands[Color::Black.idx()].add(PieceKind::Pawn);
        key ^= ZOBRIST.hand_key(
            Color::Black,
            PieceKind::Pawn,
            hands[Color::Black.idx()].count(PieceKind::Pawn),
        );
    }
    hands[Color::White.idx()].add(PieceKind::Rook);
    key ^= ZOBRIST.hand_key(Color::White, PieceKind::Rook, 1);
    assert_eq!(ZOBRIST.hands_key(&hands), key);
    assert_eq!(ZOBRIST.hands_key(&[Hand::EMPTY; 2]), 0);
}
