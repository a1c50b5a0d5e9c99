use super::*;
use crate::movegen::legal_moves;

const POSITIONS: [&str; 5] = [
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
    "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
    "R8/2K1S1SSk/4B4/9/9/9/9/9/1L1L1L3 b RBGSNLP3g3n17p 1",
    "k8/5+R3/3b1l3/4s4/6g1+r/4GP3/5LN2/9/K4L3 b - 1",
    "4k4/9/5P3/9/4S4/9/9/4R4/4K4 b G 1",
];

fn at(name: &str) -> u8 {
    usi_to_sq(name).unwrap()
}

fn usi(mv: &str) -> Move {
    Move::from_usi(mv).unwrap()
}

fn attackers_slow(pos: &Position, color: Color, s: u8) -> Bitboard {
    pos.pieces_of(color)
        .filter(|&from| {
            let pc = pos.piece_at(from).unwrap();
            attacks_of(pc.kind, color, from, pos.occupied()).contains(s)
        })
        .collect()
}

#[test]
fn test_attackers_match_slow_scan() {
    for sfen in POSITIONS {
        let pos = Position::from_sfen(sfen).unwrap();
        for color in Color::ALL {
            for s in 0..NUM_SQUARES as u8 {
                let expected = attackers_slow(&pos, color, s);
                assert_eq!(
                    pos.attackers_to(color, s, pos.occupied()),
                    expected,
                    "{sfen} {color:?} {}",
                    sq_to_usi(s)
                );
                assert_eq!(pos.exists_attacker(color, s), !expected.is_empty());
            }
        }
    }
}

#[test]
fn test_attackers_see_through_removed_pieces() {
    // Rook on 5h behind the silver on 5e reaches 5a once the silver is gone.
    let pos = Position::from_sfen(POSITIONS[4]).unwrap();
    let rook = at("5h");
    assert!(!pos.attackers_to(Color::Black, at("5b"), pos.occupied()).contains(rook));
    let occ = pos.occupied().and_not(Bitboard::from_square(at("5e")));
    assert!(pos.attackers_to(Color::Black, at("5b"), occ).contains(rook));
}

#[test]
fn test_pins_and_discoverers() {
    // White lance on 5c pins the black gold on 5g to the king on 5i.
    let pos = Position::from_sfen("4k4/9/4l4/9/9/9/4G4/9/4K4 b - 1").unwrap();
    assert_eq!(pos.blockers_for_king(Color::Black), Bitboard::from_square(at("5g")));
    assert_eq!(pos.pinners(Color::Black), Bitboard::from_square(at("5c")));
    assert!(pos.blockers_for_king(Color::White).is_empty());

    // Sideways is illegal for the pinned gold; forward along the file is fine.
    assert!(!pos.is_legal(usi("5g4g")));
    assert!(pos.is_legal(usi("5g5f")));

    // Black silver between a black rook and the white king: a blocker, not a pin.
    let pos = Position::from_sfen(POSITIONS[4]).unwrap();
    assert_eq!(pos.blockers_for_king(Color::White), Bitboard::from_square(at("5e")));
    assert!(pos.pinners(Color::White).is_empty());
}

#[test]
fn test_two_blockers_pin_nothing() {
    let pos = Position::from_sfen("4k4/9/4l4/9/4P4/9/4G4/9/4K4 b - 1").unwrap();
    assert!(pos.blockers_for_king(Color::Black).is_empty());
    assert!(pos.pinners(Color::Black).is_empty());
}

#[test]
fn test_gives_check_cases() {
    let pos = Position::from_sfen(POSITIONS[4]).unwrap();
    let cases = [
        ("5e4d", true),
        ("5e5d", false),
        ("4c4b+", true),
        ("4c4b", false),
        ("G*5b", true),
        ("G*4a", true),
        ("G*5c", false),
        ("5i4i", false),
    ];
    for (mv, expected) in cases {
        assert_eq!(pos.gives_check(usi(mv)), expected, "{mv}");
    }
}

#[test]
fn test_gives_check_matches_make() {
    for sfen in POSITIONS {
        let mut pos = Position::from_sfen(sfen).unwrap();
        for mv in legal_moves(&pos) {
            let predicted = pos.gives_check(mv);
            let undo = pos.make_move(mv);
            assert_eq!(predicted, pos.in_check(), "{sfen} {mv}");
            pos.unmake_move(undo);
        }
    }
}

#[test]
fn test_pseudo_legal_and_legal_agree_with_movegen() {
    let evasions = "4r3k/9/9/9/9/9/9/3P1P3/3LKL3 b G 1";
    for sfen in POSITIONS.iter().copied().chain([evasions]) {
        let pos = Position::from_sfen(sfen).unwrap();
        let legal = legal_moves(&pos);

        let mut candidates = Vec::new();
        for from in 0..NUM_SQUARES as u8 {
            for to in 0..NUM_SQUARES as u8 {
                candidates.push(Move::new(from, to));
                candidates.push(Move::new_promote(from, to));
            }
        }
        for kind in PieceKind::ALL {
            for to in 0..NUM_SQUARES as u8 {
                candidates.push(Move::new_drop(kind, to));
            }
        }

        for mv in candidates {
            let accepted = pos.is_pseudo_legal(mv) && pos.is_legal(mv);
            assert_eq!(accepted, legal.contains(&mv), "{sfen} {mv}");
        }
    }
}

#[test]
fn test_pseudo_legal_rejects_stale_moves() {
    let pos = Position::startpos();
    // Empty origin, enemy piece, blocked slider, drop with an empty hand.
    for mv in ["5e5d", "5c5d", "2h2c", "P*5e"] {
        assert!(!pos.is_pseudo_legal(usi(mv)), "{mv}");
    }
    assert!(pos.is_pseudo_legal(usi("7g7f")));
}

#[test]
fn test_king_cannot_step_along_checking_ray() {
    // Rook check on the file; stepping along it stays in check.
    let pos = Position::from_sfen("4k4/9/9/9/4r4/9/9/9/4K4 b - 1").unwrap();
    assert!(pos.in_check());
    assert!(pos.is_legal(usi("5i4i")));
    assert!(!pos.is_legal(usi("5i5h")));
}
