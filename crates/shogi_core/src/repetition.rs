//! Repetition and hand-superiority detection over the state history.

use crate::board::Position;

/// Default look-back, in plies, for repetition checks.
pub const DEFAULT_REPETITION_PLY: u32 = 16;

/// Outcome of comparing the current position with earlier ones, from the side to move's view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repetition {
    Not,
    Draw,
    /// The opponent has been checking on every move of the cycle.
    Win,
    /// The side to move has been checking on every move of the cycle.
    Lose,
    /// Same board, and the side to move holds at least the same hand plus more.
    Superior,
    /// Same board, and the side to move holds strictly less.
    Inferior,
}

impl Position {
    pub fn repetition(&self) -> Repetition {
        self.repetition_within(DEFAULT_REPETITION_PLY)
    }

    /// Compare with positions up to `max_ply` plies back with the same side to move,
    /// never crossing a null move.
    pub fn repetition_within(&self, max_ply: u32) -> Repetition {
        let states = self.states();
        let Some(current) = states.last() else {
            return Repetition::Not;
        };
        let end = max_ply.min(current.plies_from_null) as usize;
        if end < 4 {
            return Repetition::Not;
        }

        let us = self.side_to_move();
        let them = us.other();
        let last = states.len() - 1;
        for back in (4..=end).step_by(2) {
            let Some(earlier) = last.checked_sub(back).map(|i| &states[i]) else {
                break;
            };
            if earlier.board_key != current.board_key {
                continue;
            }
            if earlier.hand_key == current.hand_key {
                let checks = current.continuous_checks;
                return if back as u32 <= checks[us.idx()] {
                    Repetition::Lose
                } else if back as u32 <= checks[them.idx()] {
                    Repetition::Win
                } else {
                    Repetition::Draw
                };
            }
            let now = &current.hand_of_side_to_move;
            let before = &earlier.hand_of_side_to_move;
            if now.is_equal_or_superior(before) {
                return Repetition::Superior;
            }
            if before.is_equal_or_superior(now) {
                return Repetition::Inferior;
            }
        }
        Repetition::Not
    }
}
