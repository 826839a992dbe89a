//! Area extraction from free-text construction descriptions.
//!
//! Turns one residential record into categorized area totals. Records
//! labelled mixed-use, or whose description mentions parking, are split per
//! area token using the keywords preceding each token (contextual mode).
//! Everything else is assigned wholesale to the category of its
//! construction-type label (direct mode).

pub mod classification;
pub mod cleaning;

#[cfg(test)]
pub mod tests;

use self::classification::{categorize_context, classify_key, mentions_parking, normalize_label};
use self::cleaning::{area_tokens, clean_description, context_before, dimensions};

use crate::config::ExtractionConfig;
use crate::models::{AreaCategory, AreaRecord, AreaResult, ExtractionMode, UnmatchedTypes};
use tracing::trace;

/// Stateless area extractor
#[derive(Debug, Clone, Default)]
pub struct AreaExtractor {
    config: ExtractionConfig,
}

impl AreaExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract categorized areas for one record.
    ///
    /// Labels that match no classification rule in direct mode are recorded
    /// in `unmatched` and their area defaults to RCC.
    pub fn extract(&self, record: &AreaRecord, unmatched: &mut UnmatchedTypes) -> AreaResult {
        let description = record.description.trim();
        let declared = record.declared_total_or_zero();
        let cleaned = clean_description(description);

        match self.mode_for(description, &record.construction_type) {
            ExtractionMode::Contextual => self.extract_contextual(&cleaned, declared),
            ExtractionMode::Direct => extract_direct(
                description,
                &cleaned,
                declared,
                &record.construction_type,
                unmatched,
            ),
        }
    }

    pub fn mode_for(&self, description: &str, construction_type: &str) -> ExtractionMode {
        if construction_type.trim() == self.config.mixed_use_marker || mentions_parking(description)
        {
            ExtractionMode::Contextual
        } else {
            ExtractionMode::Direct
        }
    }

    fn extract_contextual(&self, cleaned: &str, declared: f64) -> AreaResult {
        let mut result = AreaResult::empty(ExtractionMode::Contextual);
        let mut raw_tokens = Vec::new();
        let mut matched_total = 0.0;

        for token in area_tokens(cleaned) {
            let context = context_before(cleaned, token.start, self.config.context_window_chars);
            let category = categorize_context(context);
            trace!(token = token.text, ?category, "categorized area token");

            result.add(category, token.value);
            matched_total += token.value;
            raw_tokens.push(token.text.trim().to_string());
        }

        result.raw_area_text = join_raw(raw_tokens);
        let total = if declared > 0.0 { declared } else { matched_total };
        reconcile(&mut result, total);
        result
    }
}

fn extract_direct(
    description: &str,
    cleaned: &str,
    declared: f64,
    construction_type: &str,
    unmatched: &mut UnmatchedTypes,
) -> AreaResult {
    let dims = dimensions(cleaned);
    let dimension_total: f64 = dims.iter().map(|d| d.product()).sum();

    let mut raw_tokens: Vec<String> = dims.iter().map(|d| d.expression()).collect();
    raw_tokens.extend(area_tokens(description).into_iter().map(|t| t.text.to_string()));

    let total = if declared > 0.0 { declared } else { dimension_total };
    let category = match classify_key(&normalize_label(construction_type)) {
        Some(category) => category,
        None => {
            unmatched.record(construction_type);
            AreaCategory::Rcc
        }
    };

    let mut result = AreaResult::empty(ExtractionMode::Direct);
    result.raw_area_text = join_raw(raw_tokens);
    result.add(category, total);
    result.total_area = total;
    result
}

fn join_raw(tokens: Vec<String>) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(", "))
    }
}

/// Make the category totals add up to `total`.
///
/// A shortfall goes to RCC. A surplus (a declared total smaller than the
/// matched tokens) scales every category down proportionally.
fn reconcile(result: &mut AreaResult, total: f64) {
    let assigned = result.category_sum();
    if total > assigned {
        result.rcc += total - assigned;
    } else if assigned > total && assigned > 0.0 {
        let factor = total / assigned;
        result.rcc *= factor;
        result.parking *= factor;
        result.construction *= factor;
        result.temporary_shed *= factor;
        result.open *= factor;
    }
    result.total_area = total;
}
