//! Conversion of English word-form numbers ("Five Thousand Two Hundred")
//! into integers.

use crate::error::NumberParseError;

fn unit_value(word: &str) -> Option<u64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

fn scale_value(word: &str) -> Option<u64> {
    match word {
        "thousand" => Some(1_000),
        "million" => Some(1_000_000),
        "billion" => Some(1_000_000_000),
        _ => None,
    }
}

fn is_number_word(word: &str) -> bool {
    unit_value(word).is_some()
        || scale_value(word).is_some()
        || word == "hundred"
        || word == "point"
}

/// Convert an optional phrase, treating absence as an error.
pub fn words_to_number_opt(phrase: Option<&str>) -> Result<u64, NumberParseError> {
    match phrase {
        Some(p) => words_to_number(p),
        None => Err(NumberParseError::Missing),
    }
}

/// Convert a word-form number phrase into an integer.
///
/// Words outside the number vocabulary are ignored ("Five Thousand Rupees"
/// reads as 5000). Anything after `point` is a fractional part and is
/// dropped. A plain digit string is accepted as-is.
pub fn words_to_number(phrase: &str) -> Result<u64, NumberParseError> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return Err(NumberParseError::Empty);
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed
            .parse()
            .map_err(|_| NumberParseError::Overflow(trimmed.to_string()));
    }

    let lowered = trimmed.to_lowercase().replace('-', " ");
    let words: Vec<&str> = lowered
        .split_whitespace()
        .filter(|w| is_number_word(w))
        .collect();

    if words.is_empty() {
        return Err(NumberParseError::NoNumberWords(trimmed.to_string()));
    }

    for repeatable in ["thousand", "million", "billion", "point"] {
        if words.iter().filter(|w| **w == repeatable).count() > 1 {
            return Err(NumberParseError::Redundant(repeatable.to_string()));
        }
    }

    let integer_words = match words.iter().position(|w| *w == "point") {
        Some(idx) => &words[..idx],
        None => &words[..],
    };

    let overflow = || NumberParseError::Overflow(trimmed.to_string());

    let mut total: u64 = 0;
    let mut group: u64 = 0;
    let mut last_scale: Option<u64> = None;

    for word in integer_words {
        if let Some(value) = unit_value(word) {
            group = group.checked_add(value).ok_or_else(overflow)?;
        } else if *word == "hundred" {
            let multiplier = if group == 0 { 1 } else { group };
            group = multiplier.checked_mul(100).ok_or_else(overflow)?;
        } else if let Some(scale) = scale_value(word) {
            if last_scale.is_some_and(|prev| prev <= scale) {
                return Err(NumberParseError::Malformed(trimmed.to_string()));
            }
            last_scale = Some(scale);

            let multiplier = if group == 0 { 1 } else { group };
            let chunk = multiplier.checked_mul(scale).ok_or_else(overflow)?;
            total = total.checked_add(chunk).ok_or_else(overflow)?;
            group = 0;
        }
    }

    total.checked_add(group).ok_or_else(overflow)
}
