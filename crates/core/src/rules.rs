//! Hinting, scoring and guess coercion rules

use serde_json::Value;

use crate::error::{GameError, Result};
use crate::models::Difficulty;

/// Bonus points for every attempt left unused on a win.
pub const UNUSED_ATTEMPT_BONUS: u32 = 10;

const VERY_CLOSE: u64 = 5;
const CLOSE: u64 = 10;

/// Proximity band of a guess, nearest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HintTier {
    Correct,
    VeryClose,
    Close,
    Far,
}

impl HintTier {
    pub fn of(guess: i64, target: i64) -> Self {
        match guess.abs_diff(target) {
            0 => HintTier::Correct,
            d if d <= VERY_CLOSE => HintTier::VeryClose,
            d if d <= CLOSE => HintTier::Close,
            _ => HintTier::Far,
        }
    }
}

pub fn hint(guess: i64, target: i64) -> String {
    let direction = if guess > target { "too high" } else { "too low" };
    match HintTier::of(guess, target) {
        HintTier::Correct => "correct".to_string(),
        HintTier::VeryClose => format!("very close! {}", direction),
        HintTier::Close => format!("close! {}", direction),
        HintTier::Far => direction.to_string(),
    }
}

pub fn score(difficulty: Difficulty, attempts: u32, won: bool) -> u32 {
    if !won {
        return 0;
    }
    let profile = difficulty.profile();
    profile.base_score + profile.max_attempts.saturating_sub(attempts) * UNUSED_ATTEMPT_BONUS
}

/// Coerce a raw JSON guess into an integer.
///
/// Accepts JSON integers and strings holding a base-10 integer. Floats,
/// decimal strings, booleans and null are all rejected, even when the
/// float has no fractional part. Integers beyond `i64` are reported as
/// out of range against `bounds`.
pub fn parse_guess(raw: &Value, bounds: (i64, i64)) -> Result<i64> {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(v)
            } else if n.is_u64() {
                Err(GameError::GuessOutOfRange { min: bounds.0, max: bounds.1 })
            } else {
                Err(GameError::InvalidGuessFormat)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| GameError::InvalidGuessFormat),
        _ => Err(GameError::InvalidGuessFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_hint_tiers() {
        assert_eq!(hint(25, 25), "correct");
        assert_eq!(hint(30, 25), "very close! too high");
        assert_eq!(hint(20, 25), "very close! too low");
        assert_eq!(hint(35, 25), "close! too high");
        assert_eq!(hint(15, 25), "close! too low");
        assert_eq!(hint(36, 25), "too high");
        assert_eq!(hint(1, 25), "too low");
    }

    #[test]
    fn test_score() {
        assert_eq!(score(Difficulty::Easy, 1, true), 190);
        assert_eq!(score(Difficulty::Medium, 7, true), 200);
        assert_eq!(score(Difficulty::Hard, 2, true), 330);
        assert_eq!(score(Difficulty::Hard, 2, false), 0);
    }

    #[test]
    fn test_parse_guess_accepts_integers() {
        assert_eq!(parse_guess(&json!(25), (1, 50)), Ok(25));
        assert_eq!(parse_guess(&json!(-5), (1, 50)), Ok(-5));
        assert_eq!(parse_guess(&json!("42"), (1, 50)), Ok(42));
        assert_eq!(parse_guess(&json!(" 7 "), (1, 50)), Ok(7));
    }

    #[test]
    fn test_parse_guess_rejects_non_integers() {
        for raw in [json!("abc"), json!("25.7"), json!(25.5), json!(25.0), json!(null), json!(true), json!([1])] {
            assert_eq!(parse_guess(&raw, (1, 50)), Err(GameError::InvalidGuessFormat), "{raw}");
        }
    }

    #[test]
    fn test_parse_guess_huge_integer_is_out_of_range() {
        assert_eq!(
            parse_guess(&json!(u64::MAX), (1, 50)),
            Err(GameError::GuessOutOfRange { min: 1, max: 50 })
        );
    }

    proptest! {
        #[test]
        fn closer_guess_never_gets_a_farther_tier(t in 1i64..=200, g1 in 1i64..=200, g2 in 1i64..=200) {
            prop_assume!(g1.abs_diff(t) < g2.abs_diff(t));
            prop_assert!(HintTier::of(g1, t) <= HintTier::of(g2, t));
        }

        #[test]
        fn hint_direction_follows_sign(t in 1i64..=200, g in 1i64..=200) {
            let h = hint(g, t);
            if g > t {
                prop_assert!(h.ends_with("too high"));
            } else if g < t {
                prop_assert!(h.ends_with("too low"));
            } else {
                prop_assert_eq!(h, "correct");
            }
        }
    }
}
