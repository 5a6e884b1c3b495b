//! Numerology Engine — (full name, birth date) → `NumerologyReport`.
//!
//! Pure and deterministic: no I/O, no shared state. The only failure is
//! `NumerologyError::InvalidInput`, raised while parsing the inputs.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::numerology::letters::sum_letters;
use crate::numerology::recommendations::{build_recommendations, CoreNumbers};
use crate::numerology::reduction::{reduce, CoreNumber};
use crate::numerology::tables::describe;

const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumerologyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// A trimmed full name that contains at least one Latin letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    pub fn parse(raw: &str) -> Result<Self, NumerologyError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();

        if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&length) {
            return Err(NumerologyError::InvalidInput(format!(
                "Full name must be between {MIN_NAME_CHARS} and {MAX_NAME_CHARS} characters (got {length})"
            )));
        }

        if sum_letters(trimmed).letter_count == 0 {
            return Err(NumerologyError::InvalidInput(
                "Full name must contain at least one Latin letter (A-Z)".to_string(),
            ));
        }

        Ok(FullName(trimmed.to_string()))
    }

    /// The name as it should be displayed, diacritics included.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A real calendar date with a four-digit year. Time and offset are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose local date is used.
    pub fn parse(raw: &str) -> Result<Self, NumerologyError> {
        let raw = raw.trim();
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
            .map_err(|_| {
                NumerologyError::InvalidInput(format!(
                    "Birth date '{raw}' is not a valid calendar date (expected YYYY-MM-DD)"
                ))
            })?;

        Self::from_date(date)
    }

    pub fn from_date(date: NaiveDate) -> Result<Self, NumerologyError> {
        if !(1..=9999).contains(&date.year()) {
            return Err(NumerologyError::InvalidInput(format!(
                "Birth year {} is outside 1-9999",
                date.year()
            )));
        }
        Ok(BirthDate(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// ISO-8601 form, e.g. `1990-05-15`.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Human form used in rendered documents, e.g. `May 15, 1990`.
    pub fn display(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

/// The computed report. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyReport {
    pub life_path_number: CoreNumber,
    pub life_path_description: String,
    pub expression_number: CoreNumber,
    pub expression_description: String,
    pub soul_urge_number: CoreNumber,
    pub soul_urge_description: String,
    pub personality_number: CoreNumber,
    pub personality_description: String,
    pub recommendations: Vec<String>,
}

impl NumerologyReport {
    pub fn numbers(&self) -> CoreNumbers {
        CoreNumbers {
            life_path: self.life_path_number,
            expression: self.expression_number,
            soul_urge: self.soul_urge_number,
            personality: self.personality_number,
        }
    }
}

/// Life path: day, month and year are each reduced on their own (so a day
/// of 11 or 29 contributes 11), then summed and reduced again.
///
/// `1990-05-15` → 6 + 5 + (1990 → 19 → 10 → 1) = 12 → 3.
pub fn life_path_number(birth_date: BirthDate) -> CoreNumber {
    let date = birth_date.date();
    // Guarded to 1..=9999 by BirthDate.
    let year = date.year().unsigned_abs();

    let day = reduce(date.day());
    let month = reduce(date.month());
    let year = reduce(year);

    reduce(u32::from(day.value()) + u32::from(month.value()) + u32::from(year.value()))
}

/// Builds the full report from validated inputs. Infallible.
pub fn generate_report(full_name: &FullName, birth_date: BirthDate) -> NumerologyReport {
    let sums = sum_letters(full_name.as_str());

    let numbers = CoreNumbers {
        life_path: life_path_number(birth_date),
        expression: reduce(sums.all),
        soul_urge: reduce(sums.vowels),
        personality: reduce(sums.consonants),
    };

    NumerologyReport {
        life_path_number: numbers.life_path,
        life_path_description: describe(numbers.life_path).to_string(),
        expression_number: numbers.expression,
        expression_description: describe(numbers.expression).to_string(),
        soul_urge_number: numbers.soul_urge,
        soul_urge_description: describe(numbers.soul_urge).to_string(),
        personality_number: numbers.personality,
        personality_description: describe(numbers.personality).to_string(),
        recommendations: build_recommendations(&numbers),
    }
}

/// Parses raw inputs and computes the report.
pub fn calculate(full_name: &str, birth_date: &str) -> Result<NumerologyReport, NumerologyError> {
    let full_name = FullName::parse(full_name)?;
    let birth_date = BirthDate::parse(birth_date)?;
    Ok(generate_report(&full_name, birth_date))
}
