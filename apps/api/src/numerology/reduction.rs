//! Digit reduction — the single primitive shared by all four core numbers.
//!
//! `reduce(n)` repeatedly sums decimal digits until the value is a single
//! digit or one of the master numbers (11, 22, 33). Master numbers are never
//! reduced further, at any call site.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Multi-digit values that stop the reduction loop.
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

/// A fully reduced numerology value: 1–9 or a master number.
///
/// The invariant is enforced on construction and on deserialization, so a
/// `NumerologyReport` can never carry 0 or an unreduced multi-digit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CoreNumber(u8);

impl CoreNumber {
    /// Every value a `CoreNumber` can hold, in display order.
    pub const ALL: [CoreNumber; 12] = [
        CoreNumber(1),
        CoreNumber(2),
        CoreNumber(3),
        CoreNumber(4),
        CoreNumber(5),
        CoreNumber(6),
        CoreNumber(7),
        CoreNumber(8),
        CoreNumber(9),
        CoreNumber(11),
        CoreNumber(22),
        CoreNumber(33),
    ];

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_master(self) -> bool {
        MASTER_NUMBERS.contains(&u32::from(self.0))
    }
}

impl TryFrom<u8> for CoreNumber {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=9).contains(&value) || MASTER_NUMBERS.contains(&u32::from(value)) {
            Ok(CoreNumber(value))
        } else {
            Err(format!(
                "{value} is not a reduced numerology value (expected 1-9, 11, 22 or 33)"
            ))
        }
    }
}

impl From<CoreNumber> for u8 {
    fn from(number: CoreNumber) -> Self {
        number.0
    }
}

impl fmt::Display for CoreNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum of the decimal digits of `n`.
pub fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Reduces `n` to a single digit or a master number.
///
/// Zero is only reachable from an empty letter group (a name without vowels,
/// for example) and reduces to 9, its digital root modulo 9.
pub fn reduce(n: u32) -> CoreNumber {
    if n == 0 {
        return CoreNumber(9);
    }

    let mut n = n;
    while n > 9 && !MASTER_NUMBERS.contains(&n) {
        n = digit_sum(n);
    }
    // n is now 1..=9 or a master number, both of which fit in u8.
    CoreNumber(n as u8)
}
