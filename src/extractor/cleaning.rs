//! Description cleaning and numeric token scanning.
//!
//! Strips substrings that look like areas but are not (slash-joined words,
//! dates, `= <number> <unit>` restatements), then scans for area tokens
//! (`<number> <unit>`) and dimension expressions (`<number> x <number>`).

use crate::constants::{AREA_UNIT_VARIANTS, DIGIT_CLASS, EQUALS_FRAGMENT_UNITS};
use regex::Regex;
use std::sync::LazyLock;

static SLASH_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z]+(/[A-Za-z]+)+\b").expect("slash-word pattern is valid")
});

static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    let d = DIGIT_CLASS;
    Regex::new(&format!(r"\b{d}{{1,2}}[/-]{d}{{1,2}}[/-]{d}{{2,4}}\b"))
        .expect("date pattern is valid")
});

static EQUALS_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    let d = DIGIT_CLASS;
    let units = EQUALS_FRAGMENT_UNITS.join("|");
    Regex::new(&format!(r"=\s*{d}+\.?{d}*\s*({units})")).expect("equals pattern is valid")
});

static AREA_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    let d = DIGIT_CLASS;
    let units = AREA_UNIT_VARIANTS.join("|");
    Regex::new(&format!(r"({d}+\.?{d}*)\s*({units})")).expect("area pattern is valid")
});

static DIMENSION: LazyLock<Regex> = LazyLock::new(|| {
    let d = DIGIT_CLASS;
    Regex::new(&format!(r"({d}+\.?{d}*)\s*[*xX]\s*({d}+\.?{d}*)"))
        .expect("dimension pattern is valid")
});

/// A `<number><unit>` match
#[derive(Debug, Clone, PartialEq)]
pub struct AreaToken<'a> {
    /// Byte offset of the match in the scanned text
    pub start: usize,
    /// Whole matched text, number and unit
    pub text: &'a str,
    pub value: f64,
}

/// A `<number> x <number>` match
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension<'a> {
    pub length: &'a str,
    pub width: &'a str,
}

impl Dimension<'_> {
    pub fn product(&self) -> f64 {
        parse_numeral(self.length) * parse_numeral(self.width)
    }

    /// Display form, e.g. `10*12`
    pub fn expression(&self) -> String {
        format!("{}*{}", self.length, self.width)
    }
}

/// Remove substrings that must not be read as area tokens
pub fn clean_description(text: &str) -> String {
    let text = SLASH_WORDS.replace_all(text, "");
    let text = DATE_LIKE.replace_all(&text, "");
    EQUALS_FRAGMENT.replace_all(&text, "").into_owned()
}

pub fn area_tokens(text: &str) -> Vec<AreaToken<'_>> {
    AREA_TOKEN
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?;
            Some(AreaToken {
                start: whole.start(),
                text: whole.as_str(),
                value: parse_numeral(number.as_str()),
            })
        })
        .collect()
}

pub fn dimensions(text: &str) -> Vec<Dimension<'_>> {
    DIMENSION
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Dimension {
                length: caps.get(1)?.as_str(),
                width: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Parse a captured numeral, accepting Devanagari digits.
///
/// Captures only ever hold digits and at most one dot, so parsing cannot
/// fail on regex output; anything else reads as zero.
pub fn parse_numeral(text: &str) -> f64 {
    let ascii: String = text
        .chars()
        .map(|c| match c {
            '०'..='९' => char::from_digit(c as u32 - '०' as u32, 10).unwrap_or(c),
            _ => c,
        })
        .collect();
    ascii.parse().unwrap_or(0.0)
}

/// Slice of `text` covering at most `window_chars` characters before `start`
pub fn context_before(text: &str, start: usize, window_chars: usize) -> &str {
    let prefix = &text[..start];
    let from = match window_chars.checked_sub(1) {
        Some(skip) => prefix
            .char_indices()
            .rev()
            .nth(skip)
            .map(|(idx, _)| idx)
            .unwrap_or(0),
        None => start,
    };
    &prefix[from..]
}
