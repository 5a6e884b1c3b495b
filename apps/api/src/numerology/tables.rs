//! Static copy keyed by reduced value: descriptions, themes, life path focus.
//!
//! Copy is plain ASCII so every renderer (including the PDF core fonts) can
//! show it verbatim.

use crate::numerology::reduction::CoreNumber;

/// Description shown next to any core number with this value.
pub fn describe(number: CoreNumber) -> &'static str {
    match number.value() {
        1 => "The pioneer. Independent, driven and original, you are at your best when you lead and open new paths for others to follow.",
        2 => "The peacemaker. Sensitive and diplomatic, you bring people together and thrive in partnerships built on trust and patience.",
        3 => "The communicator. Expressive, creative and optimistic, you inspire others through words, art and a contagious joy for life.",
        4 => "The builder. Practical and disciplined, you create lasting foundations through steady work, order and reliability.",
        5 => "The adventurer. Curious and adaptable, you seek freedom, variety and experiences that expand your view of the world.",
        6 => "The nurturer. Responsible and caring, you protect family and community and find meaning in being of service.",
        7 => "The seeker. Analytical and introspective, you look beneath the surface for truth and value depth over noise.",
        8 => "The achiever. Ambitious and strategic, you understand power and resources and turn vision into material results.",
        9 => "The humanitarian. Compassionate and idealistic, you see the bigger picture and are drawn to causes larger than yourself.",
        11 => "Master number 11, the intuitive. Highly sensitive and visionary, you carry a spark of inspiration meant to uplift others.",
        22 => "Master number 22, the master builder. You combine big dreams with practical skill and can shape structures that last generations.",
        33 => "Master number 33, the master teacher. Deeply compassionate, you lead through service, healing and unconditional care.",
        // CoreNumber cannot hold any other value.
        _ => "A number outside the reduced range.",
    }
}

/// Short theme phrase used when templating recommendations.
pub fn theme(number: CoreNumber) -> &'static str {
    match number.value() {
        1 => "independence and initiative",
        2 => "cooperation and diplomacy",
        3 => "self-expression and creativity",
        4 => "structure and perseverance",
        5 => "freedom and change",
        6 => "care and responsibility",
        7 => "reflection and analysis",
        8 => "ambition and leadership",
        9 => "compassion and generosity",
        11 => "intuition and inspiration",
        22 => "vision and large-scale building",
        33 => "healing and guidance",
        _ => "balance",
    }
}

/// Life-path-specific next step, the first recommendation in every report.
pub fn life_path_focus(number: CoreNumber) -> &'static str {
    match number.value() {
        1 => "Choose one personal project this month and own it from start to finish without waiting for permission.",
        2 => "Invest in one key partnership this month and practise asking for what you need as clearly as you offer support.",
        3 => "Set aside a regular slot for creative work and share the result with someone whose opinion you value.",
        4 => "Write down a long-term plan with monthly milestones and review your progress on a fixed day each week.",
        5 => "Plan a new experience outside your routine, then anchor it with one habit that keeps you grounded.",
        6 => "Offer your care where it is welcomed and set one clear boundary that protects your own energy.",
        7 => "Schedule quiet time for study or reflection and keep a journal of the questions that keep returning.",
        8 => "Define one measurable goal for your career or finances and review it against your values every month.",
        9 => "Give your time to a cause you believe in and let go of one old commitment that no longer serves you.",
        11 => "Trust your first intuition on a decision this week and note how it compares with your analysis afterwards.",
        22 => "Break your biggest ambition into concrete phases and recruit one ally to help you build the first one.",
        33 => "Mentor someone who is where you once were and make sure you receive as much support as you give.",
        _ => "Review this report regularly and notice which strengths you use most.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_core_number_has_copy() {
        for number in CoreNumber::ALL {
            assert!(!describe(number).is_empty());
            assert!(!theme(number).is_empty());
            assert!(!life_path_focus(number).is_empty());
            assert_ne!(describe(number), "A number outside the reduced range.");
        }
    }

    #[test]
    fn test_descriptions_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for number in CoreNumber::ALL {
            assert!(seen.insert(describe(number)), "duplicate copy for {number}");
        }
    }

    #[test]
    fn test_master_descriptions_name_the_master_number() {
        for number in CoreNumber::ALL.into_iter().filter(|n| n.is_master()) {
            assert!(describe(number).starts_with(&format!("Master number {number}")));
        }
    }

    #[test]
    fn test_copy_is_plain_ascii() {
        for number in CoreNumber::ALL {
            for text in [describe(number), theme(number), life_path_focus(number)] {
                assert!(text.is_ascii(), "non-ASCII copy: {text}");
                assert!(
                    !text.contains(['&', '<', '>', '"', '\'']),
                    "markup-sensitive copy: {text}"
                );
            }
        }
    }
}
