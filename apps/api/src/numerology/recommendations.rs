//! Recommendations — a fixed-length list templated from the four core numbers.

use crate::numerology::reduction::CoreNumber;
use crate::numerology::tables::{life_path_focus, theme};

/// Every report carries exactly this many recommendations.
pub const RECOMMENDATION_COUNT: usize = 4;

/// The four core numbers a recommendation set is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreNumbers {
    pub life_path: CoreNumber,
    pub expression: CoreNumber,
    pub soul_urge: CoreNumber,
    pub personality: CoreNumber,
}

impl CoreNumbers {
    /// Distinct master numbers among the four, ascending.
    pub fn masters(&self) -> Vec<CoreNumber> {
        let mut masters: Vec<CoreNumber> = [
            self.life_path,
            self.expression,
            self.soul_urge,
            self.personality,
        ]
        .into_iter()
        .filter(|n| n.is_master())
        .collect();
        masters.sort();
        masters.dedup();
        masters
    }
}

/// Builds the recommendation list in display order:
/// 1. life path focus
/// 2. expression talent
/// 3. soul urge / personality pairing
/// 4. master-number pacing, or a yearly review when there is none
pub fn build_recommendations(numbers: &CoreNumbers) -> Vec<String> {
    let focus = life_path_focus(numbers.life_path).to_string();

    let talent = format!(
        "Put your natural talent for {} to work in a project other people can see and benefit from.",
        theme(numbers.expression)
    );

    let pairing = if numbers.soul_urge == numbers.personality {
        format!(
            "Your inner drive and the way others see you both point toward {}. Let that consistency guide your bigger decisions.",
            theme(numbers.soul_urge)
        )
    } else {
        format!(
            "Bridge what you want inwardly ({}) with the impression you give outwardly ({}) by sharing your motives openly.",
            theme(numbers.soul_urge),
            theme(numbers.personality)
        )
    };

    let masters = numbers.masters();
    let closing = if masters.is_empty() {
        "Revisit this report on each birthday and note which strengths have grown over the past year.".to_string()
    } else {
        let list = masters
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" and ");
        let noun = if masters.len() == 1 { "number" } else { "numbers" };
        format!(
            "You carry master {noun} {list}. Pace yourself with steady routines so their intensity becomes strength rather than strain."
        )
    };

    vec![focus, talent, pairing, closing]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerology::reduction::reduce;

    fn numbers(lp: u32, ex: u32, su: u32, pe: u32) -> CoreNumbers {
        CoreNumbers {
            life_path: reduce(lp),
            expression: reduce(ex),
            soul_urge: reduce(su),
            personality: reduce(pe),
        }
    }

    #[test]
    fn test_length_is_constant_and_entries_non_empty() {
        for lp in CoreNumber::ALL {
            for other in CoreNumber::ALL {
                let recs = build_recommendations(&CoreNumbers {
                    life_path: lp,
                    expression: other,
                    soul_urge: other,
                    personality: lp,
                });
                assert_eq!(recs.len(), RECOMMENDATION_COUNT);
                assert!(recs.iter().all(|r| !r.trim().is_empty()));
            }
        }
    }

    #[test]
    fn test_same_numbers_same_recommendations() {
        let a = build_recommendations(&numbers(3, 7, 1, 6));
        let b = build_recommendations(&numbers(3, 7, 1, 6));
        assert_eq!(a, b);
    }

    #[test]
    fn test_first_recommendation_follows_life_path() {
        let recs = build_recommendations(&numbers(8, 1, 2, 3));
        assert_eq!(recs[0], life_path_focus(reduce(8)));
    }

    #[test]
    fn test_pairing_when_soul_urge_equals_personality() {
        let recs = build_recommendations(&numbers(1, 2, 5, 5));
        assert!(recs[2].contains("both point toward freedom and change"));
    }

    #[test]
    fn test_pairing_when_soul_urge_differs() {
        let recs = build_recommendations(&numbers(1, 2, 5, 4));
        assert!(recs[2].contains("(freedom and change)"));
        assert!(recs[2].contains("(structure and perseverance)"));
    }

    #[test]
    fn test_master_numbers_are_listed_once() {
        let recs = build_recommendations(&numbers(11, 22, 11, 4));
        assert!(recs[3].contains("master numbers 11 and 22"), "{}", recs[3]);

        let recs = build_recommendations(&numbers(33, 2, 3, 4));
        assert!(recs[3].contains("master number 33."), "{}", recs[3]);
    }

    #[test]
    fn test_closing_without_master_numbers() {
        let recs = build_recommendations(&numbers(1, 2, 3, 4));
        assert!(recs[3].starts_with("Revisit this report"));
    }
}
