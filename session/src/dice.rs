//! Dice expression parsing and rolling.
//!
//! Expressions have the `<count>d<sides>` shape. The count is forgiving
//! (empty, unparseable or non-positive counts fall back to one die) while
//! the sides are strict: anything but a positive integer makes the whole
//! expression invalid, since a die without faces has no uniform range to
//! draw from.

#[cfg(test)]
#[path = "dice_test.rs"]
mod dice_test;

use rand::Rng;

/// Errors raised while parsing a dice expression.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The expression does not split into exactly `<count>d<sides>`.
    #[error("malformed dice expression: {0}")]
    Malformed(String),
    /// The sides part is not a positive integer.
    #[error("invalid die size in: {0}")]
    InvalidSides(String),
}

/// A parsed dice expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSpec {
    /// Verbatim expression as typed, echoed in messages and broadcasts.
    pub expr: String,
    /// Number of dice, at least 1.
    pub count: u32,
    /// Faces per die, at least 1.
    pub sides: u32,
}

/// The evaluated outcome of a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// Verbatim expression that produced this outcome.
    pub expr: String,
    /// Individual die results, one per die.
    pub rolls: Vec<u32>,
    /// Sum of all die results.
    pub total: i64,
}

impl RollOutcome {
    /// The `(r1,r2,...)` details string listing individual results.
    #[must_use]
    pub fn details(&self) -> String {
        let joined =
            self.rolls.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        format!("({joined})")
    }
}

/// Parse a `<count>d<sides>` expression.
///
/// An absent or unparseable count means one die. The sides must be a
/// positive integer.
///
/// # Errors
///
/// Returns [`DiceError::Malformed`] when the expression does not split on
/// `d` into exactly two parts, and [`DiceError::InvalidSides`] when the
/// sides part is not a positive integer.
pub fn parse_expr(expr: &str) -> Result<RollSpec, DiceError> {
    let mut parts = expr.split('d');
    let (Some(count_part), Some(sides_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(DiceError::Malformed(expr.to_owned()));
    };

    let count = count_part.parse::<u32>().unwrap_or(1).max(1);
    let sides = match sides_part.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(DiceError::InvalidSides(expr.to_owned())),
    };

    Ok(RollSpec { expr: expr.to_owned(), count, sides })
}

/// Roll a parsed expression with the given randomness source.
pub fn roll(spec: &RollSpec, rng: &mut impl Rng) -> RollOutcome {
    let rolls: Vec<u32> = (0..spec.count).map(|_| rng.random_range(1..=spec.sides)).collect();
    let total = rolls.iter().map(|&r| i64::from(r)).sum();
    RollOutcome { expr: spec.expr.clone(), rolls, total }
}
