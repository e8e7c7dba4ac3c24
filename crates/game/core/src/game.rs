//! Moves, game identifiers and revealed results.

use std::fmt;

/// A Rock-Paper-Scissors move.
///
/// The discriminant is the integer the contract stores (0 = rock, 1 = paper,
/// 2 = scissors) and is what gets encrypted on the way in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Move {
    /// Integer encoding used on-chain.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns true if `self` wins against `other`. Ties are not wins.
    pub const fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Paper, Move::Rock) | (Move::Scissors, Move::Paper)
        )
    }
}

/// Returned when an integer outside `0..=2` is decoded as a [`Move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid move encoding {0}, expected 0 (rock), 1 (paper) or 2 (scissors)")]
pub struct MoveError(pub u8);

impl TryFrom<u8> for Move {
    type Error = MoveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Move::Rock),
            1 => Ok(Move::Paper),
            2 => Ok(Move::Scissors),
            other => Err(MoveError(other)),
        }
    }
}

impl From<Move> for u8 {
    fn from(value: Move) -> Self {
        value.as_u8()
    }
}

/// On-chain game counter returned by `startGame`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameId(pub u64);

impl GameId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Revealed outcome of a round.
///
/// `choice` is the opponent's move; `won` is the player's win flag as
/// computed on-chain. A tie reports `won = false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameResult {
    pub won: bool,
    pub choice: Move,
}

impl GameResult {
    pub const fn new(won: bool, choice: Move) -> Self {
        Self { won, choice }
    }

    /// Builds the result the contract would compute for `player` against `house`.
    pub const fn resolve(player: Move, house: Move) -> Self {
        Self {
            won: player.beats(house),
            choice: house,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn move_encoding_round_trips_through_u8() {
        for mv in Move::iter() {
            assert_eq!(Move::try_from(mv.as_u8()), Ok(mv));
        }
        assert_eq!(Move::try_from(3), Err(MoveError(3)));
    }

    #[test]
    fn each_move_beats_exactly_one_other() {
        for mv in Move::iter() {
            let wins = Move::iter().filter(|other| mv.beats(*other)).count();
            assert_eq!(wins, 1, "{mv} should beat exactly one move");
            assert!(!mv.beats(mv), "ties are never wins");
        }
    }

    #[test]
    fn moves_parse_case_insensitively() {
        assert_eq!(Move::from_str("Paper"), Ok(Move::Paper));
        assert_eq!(Move::from_str("SCISSORS"), Ok(Move::Scissors));
        assert!(Move::from_str("lizard").is_err());
    }

    #[test]
    fn resolve_reports_house_move() {
        let result = GameResult::resolve(Move::Rock, Move::Scissors);
        assert!(result.won);
        assert_eq!(result.choice, Move::Scissors);

        let tie = GameResult::resolve(Move::Paper, Move::Paper);
        assert!(!tie.won);
    }
}
