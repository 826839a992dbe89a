//! Category resolution for area tokens and construction-type labels.
//!
//! Both lookups are ordered tables evaluated first-match-wins, so precedence
//! is the table order and nothing else.

use crate::constants::{classification_needles as needles, context_keywords};
use crate::models::AreaCategory;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Test applied to a canonical construction-type key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPredicate {
    /// Key contains at least one of the substrings
    ContainsAny(&'static [&'static str]),
}

impl KeyPredicate {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyPredicate::ContainsAny(parts) => parts.iter().any(|part| key.contains(part)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub predicate: KeyPredicate,
    pub category: AreaCategory,
}

/// Direct-mode classification table, in precedence order
pub static CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        predicate: KeyPredicate::ContainsAny(needles::RCC),
        category: AreaCategory::Rcc,
    },
    ClassificationRule {
        predicate: KeyPredicate::ContainsAny(needles::CONSTRUCTION),
        category: AreaCategory::Construction,
    },
    ClassificationRule {
        predicate: KeyPredicate::ContainsAny(needles::TEMPORARY_SHED),
        category: AreaCategory::TemporaryShed,
    },
    ClassificationRule {
        predicate: KeyPredicate::ContainsAny(needles::PARKING),
        category: AreaCategory::Parking,
    },
    ClassificationRule {
        predicate: KeyPredicate::ContainsAny(needles::OPEN_SPACE),
        category: AreaCategory::Open,
    },
];

/// Contextual keyword families, in precedence order
static CONTEXT_RULES: LazyLock<Vec<(Regex, AreaCategory)>> = LazyLock::new(|| {
    let family = |pattern: &str, case_insensitive: bool| {
        RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .expect("keyword pattern is valid")
    };
    vec![
        (family(context_keywords::PARKING, true), AreaCategory::Parking),
        (family(context_keywords::RCC, false), AreaCategory::Rcc),
        (
            family(context_keywords::TEMPORARY_SHED, false),
            AreaCategory::TemporaryShed,
        ),
        (
            family(context_keywords::CONSTRUCTION, false),
            AreaCategory::Construction,
        ),
        (family(context_keywords::OPEN_SPACE, false), AreaCategory::Open),
    ]
});

static PARKING_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(context_keywords::PARKING)
        .case_insensitive(true)
        .build()
        .expect("parking pattern is valid")
});

/// Canonical key for a construction-type label.
///
/// NFKD-decomposes, drops whitespace, zero-width joiners, dots and hyphens,
/// then lowercases.
pub fn normalize_label(label: &str) -> String {
    let stripped: String = label
        .nfkd()
        .filter(|c| !is_label_separator(*c))
        .collect();
    stripped.trim().to_lowercase()
}

fn is_label_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{00a0}' | '.' | '-')
}

/// First rule matching the canonical key
pub fn classify_key(key: &str) -> Option<AreaCategory> {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.predicate.matches(key))
        .map(|rule| rule.category)
}

/// Category for an area token given the text preceding it.
/// Unrecognized context defaults to RCC.
pub fn categorize_context(context: &str) -> AreaCategory {
    CONTEXT_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(context))
        .map(|(_, category)| *category)
        .unwrap_or(AreaCategory::Rcc)
}

pub fn mentions_parking(text: &str) -> bool {
    PARKING_MENTION.is_match(text)
}
