//! Pythagorean letter table and vowel classification.
//!
//! Only ASCII Latin letters A–Z (either case) carry a value. Everything else
//! in a name (spaces, diacritics, punctuation, other scripts) is skipped.

/// `Y` counts as a consonant in soul urge / personality splits.
pub const Y_IS_VOWEL: bool = false;

const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

/// Values for A..=Z, cycling 1..=9:
/// A,J,S=1  B,K,T=2  C,L,U=3  D,M,V=4  E,N,W=5  F,O,X=6  G,P,Y=7  H,Q,Z=8  I,R=9
const LETTER_VALUES: [u32; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, // A-I
    1, 2, 3, 4, 5, 6, 7, 8, 9, // J-R
    1, 2, 3, 4, 5, 6, 7, 8, // S-Z
];

/// Pythagorean value of `c`, or `None` if it is not a Latin letter.
pub fn letter_value(c: char) -> Option<u32> {
    if c.is_ascii_alphabetic() {
        let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
        Some(LETTER_VALUES[index])
    } else {
        None
    }
}

/// Whether a Latin letter is a vowel. Non-letters are never vowels.
pub fn is_vowel(c: char) -> bool {
    let upper = c.to_ascii_uppercase();
    VOWELS.contains(&upper) || (Y_IS_VOWEL && upper == 'Y')
}

/// Raw (unreduced) letter sums of a name, split by letter class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterSums {
    pub all: u32,
    pub vowels: u32,
    pub consonants: u32,
    /// Number of Latin letters that contributed.
    pub letter_count: usize,
}

/// Sums letter values across `name`, ignoring non-Latin characters.
pub fn sum_letters(name: &str) -> LetterSums {
    name.chars().fold(LetterSums::default(), |mut acc, c| {
        if let Some(value) = letter_value(c) {
            acc.all += value;
            acc.letter_count += 1;
            if is_vowel(c) {
                acc.vowels += value;
            } else {
                acc.consonants += value;
            }
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_table_cycles() {
        let expected = [
            ('A', 1),
            ('J', 1),
            ('S', 1),
            ('B', 2),
            ('K', 2),
            ('T', 2),
            ('C', 3),
            ('L', 3),
            ('U', 3),
            ('D', 4),
            ('M', 4),
            ('V', 4),
            ('E', 5),
            ('N', 5),
            ('W', 5),
            ('F', 6),
            ('O', 6),
            ('X', 6),
            ('G', 7),
            ('P', 7),
            ('Y', 7),
            ('H', 8),
            ('Q', 8),
            ('Z', 8),
            ('I', 9),
            ('R', 9),
        ];
        for (c, value) in expected {
            assert_eq!(letter_value(c), Some(value), "upper {c}");
            assert_eq!(
                letter_value(c.to_ascii_lowercase()),
                Some(value),
                "lower {c}"
            );
        }
    }

    #[test]
    fn test_non_latin_characters_have_no_value() {
        for c in [' ', '-', '\'', '1', 'ễ', 'Đ', 'ß', 'Ж', '名'] {
            assert_eq!(letter_value(c), None, "{c:?} should be ignored");
        }
    }

    #[test]
    fn test_y_is_consonant() {
        assert!(!Y_IS_VOWEL);
        assert!(!is_vowel('Y'));
        assert!(!is_vowel('y'));
        assert!(is_vowel('a'));
        assert!(is_vowel('U'));
        assert!(!is_vowel('é'));
    }

    #[test]
    fn test_sum_letters_splits_vowels_and_consonants() {
        // N5 G7 U3 Y7 E5 N5 | V4 A1 N5 | A1
        let sums = sum_letters("Nguyen Van A");
        assert_eq!(sums.letter_count, 10);
        assert_eq!(sums.all, 43);
        assert_eq!(sums.vowels, 3 + 5 + 1 + 1);
        assert_eq!(sums.consonants, 5 + 7 + 7 + 5 + 4 + 5);
        assert_eq!(sums.vowels + sums.consonants, sums.all);
    }

    #[test]
    fn test_sum_letters_skips_diacritic_letters() {
        // "ễ" is not A-Z and contributes nothing.
        assert_eq!(sum_letters("Nguyễn"), sum_letters("Nguyn"));
        assert_eq!(sum_letters("Trần Thị").letter_count, 5);
    }
}
