use super::*;
use crate::types::usi_to_sq;

fn s(name: &str) -> u8 {
    usi_to_sq(name).unwrap()
}

fn squares(names: &[&str]) -> Bitboard {
    names.iter().fold(Bitboard::EMPTY, |acc, n| acc.with(s(n)))
}

#[test]
fn test_step_attacks() {
    assert_eq!(pawn_attacks(Color::Black, s("5e")), squares(&["5d"]));
    assert_eq!(pawn_attacks(Color::White, s("5e")), squares(&["5f"]));
    assert_eq!(pawn_attacks(Color::Black, s("5a")), Bitboard::EMPTY);

    assert_eq!(knight_attacks(Color::Black, s("5e")), squares(&["4c", "6c"]));
    assert_eq!(knight_attacks(Color::White, s("5e")), squares(&["4g", "6g"]));
    assert_eq!(knight_attacks(Color::Black, s("1c")), squares(&["2a"]));

    assert_eq!(
        silver_attacks(Color::Black, s("5e")),
        squares(&["4d", "5d", "6d", "4f", "6f"])
    );
    assert_eq!(
        gold_attacks(Color::White, s("5e")),
        squares(&["4f", "5f", "6f", "4e", "6e", "5d"])
    );
    assert_eq!(king_attacks(s("5e")).popcount(), 8);
    assert_eq!(king_attacks(s("1a")).popcount(), 3);
}

#[test]
fn test_rook_and_bishop_empty_board() {
    assert_eq!(rook_attacks(s("5e"), Bitboard::EMPTY).popcount(), 16);
    assert_eq!(bishop_attacks(s("5e"), Bitboard::EMPTY).popcount(), 16);
    assert_eq!(bishop_attacks(s("1a"), Bitboard::EMPTY).popcount(), 8);
    assert_eq!(horse_attacks(s("5e"), Bitboard::EMPTY).popcount(), 20);
    assert_eq!(dragon_attacks(s("5e"), Bitboard::EMPTY).popcount(), 20);
}

#[test]
fn test_sliders_stop_at_blockers() {
    let occ = squares(&["5c", "3e", "7g"]);
    let rook = rook_attacks(s("5e"), occ);
    assert!(rook.contains(s("5c")));
    assert!(!rook.contains(s("5b")));
    assert!(rook.contains(s("3e")));
    assert!(!rook.contains(s("2e")));
    assert!(rook.contains(s("5i")));

    let bishop = bishop_attacks(s("5e"), occ);
    assert!(bishop.contains(s("7g")));
    assert!(!bishop.contains(s("8h")));
    assert!(bishop.contains(s("1a")));
}

#[test]
fn test_lance_attacks_forward_only() {
    let occ = squares(&["5b"]);
    assert_eq!(lance_attacks(Color::Black, s("5e"), occ), squares(&["5d", "5c", "5b"]));
    assert_eq!(
        lance_attacks(Color::White, s("5e"), occ),
        squares(&["5f", "5g", "5h", "5i"])
    );
    assert_eq!(lance_pseudo_attacks(Color::Black, s("5e")).popcount(), 4);
}

#[test]
fn test_line_lookup_matches_ray_walk() {
    // Deterministic pseudo-random occupancies.
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    for _ in 0..200 {
        let occ = Bitboard([next(), next()]) & Bitboard::ALL;
        for from in 0..81u8 {
            for line in Line::ALL {
                let (df, dr) = line.delta();
                let slow = sliding_attacks_slow(from, &[(df, dr), (-df, -dr)], occ);
                assert_eq!(line_attacks(from, line, occ), slow, "square {from} {line:?}");
            }
        }
    }
}

#[test]
fn test_between_and_relation() {
    assert_eq!(between(s("5a"), s("5e")), squares(&["5b", "5c", "5d"]));
    assert_eq!(between(s("1a"), s("4d")), squares(&["2b", "3c"]));
    assert_eq!(between(s("5e"), s("5f")), Bitboard::EMPTY);
    assert_eq!(between(s("5e"), s("4c")), Bitboard::EMPTY);
    assert_eq!(line_relation(s("5e"), s("4c")), None);
    assert_eq!(line_relation(s("5e"), s("1e")), Some(Line::Rank));
    assert_eq!(line_relation(s("5e"), s("5i")), Some(Line::File));
    assert!(aligned(s("5a"), s("5e"), s("5i")));
    assert!(!aligned(s("5a"), s("4e"), s("5i")));
    assert_eq!(line_through(s("1a"), s("2b")).popcount(), 9);
}

#[test]
fn test_attacks_of_dispatch() {
    let occ = Bitboard::EMPTY;
    for kind in [
        PieceKind::ProPawn,
        PieceKind::ProLance,
        PieceKind::ProKnight,
        PieceKind::ProSilver,
    ] {
        assert_eq!(
            attacks_of(kind, Color::Black, s("5e"), occ),
            gold_attacks(Color::Black, s("5e"))
        );
    }
    assert_eq!(attacks_of(PieceKind::Dragon, Color::White, s("5e"), occ), dragon_attacks(s("5e"), occ));
}

#[test]
fn test_init_is_idempotent() {
    init();
    init();
    assert_eq!(king_attacks(40).popcount(), 8);
}
