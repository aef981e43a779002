//! Error types for fraction requests and navigation.

use thiserror::Error;

/// Contract breaches detected while building or navigating the tree.
///
/// The panicking entry points ([SternBrocot::fraction][crate::SternBrocot::fraction],
/// [Fraction::father_at][crate::Fraction::father_at], ...) report these through
/// their message, the `try_*` entry points return them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FractionError {
    /// A numerator or denominator below zero
    #[error("fractions must be non-negative, got {p}/{q}")]
    NegativeComponent { p: String, q: String },

    /// A partial quotient that does not fit in the quotient type
    #[error("partial quotient {0} overflows the quotient type")]
    QuotientOverflow(String),

    /// `father_at(m)` with `m` outside of `[1, u - 1]`
    #[error("father depth {m} is outside of [1, {max}]")]
    InvalidFatherDepth { m: String, max: String },

    /// A coefficient that cannot be appended at the given depth
    #[error("cannot append coefficient {coefficient} at depth {depth} to a fraction of depth {k}")]
    InvalidPush {
        coefficient: String,
        depth: String,
        k: String,
    },

    /// Navigation on the sentinel 0/0
    #[error("operation on the null fraction 0/0")]
    NullFraction,
}
