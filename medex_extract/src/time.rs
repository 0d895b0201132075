//! Multi-date extraction from free text.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, warn};

use medex_core::NerBackend;

use crate::dates::{DateNormalizer, remove_partial_duplicates};
use crate::keywords::KeywordRegistry;

/// NER label whose spans are treated as date candidates.
pub const DATE_LABEL: &str = "DATE";

/// Finds every date in a sentence from numeric patterns and, when a tagger is
/// configured, its `DATE` entities.
#[derive(Clone)]
pub struct TimeExtractor {
    registry: Arc<KeywordRegistry>,
    normalizer: DateNormalizer,
    ner: Option<Arc<dyn NerBackend>>,
}

impl TimeExtractor {
    #[must_use]
    pub fn new(registry: Arc<KeywordRegistry>, normalizer: DateNormalizer) -> Self {
        Self {
            registry,
            normalizer,
            ner: None,
        }
    }

    /// Swap the date settings; a configured tagger is kept.
    #[must_use]
    pub const fn with_normalizer(mut self, normalizer: DateNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    #[must_use]
    pub fn with_ner(mut self, ner: Arc<dyn NerBackend>) -> Self {
        self.ner = Some(ner);
        self
    }

    /// Raw date candidates before suppression and normalization.
    ///
    /// Numeric patterns only run when the sentence has a date indicator
    /// ("date:", "on "); tagger spans are appended after them. A tagger
    /// failure is logged and leaves the pattern candidates intact.
    pub async fn candidates(&self, sentence: &str) -> Vec<String> {
        let lower = sentence.to_lowercase();
        let mut candidates: Vec<String> = Vec::new();

        if self.registry.date_indicators().matches(&lower) {
            candidates.extend(
                self.registry
                    .full_dates()
                    .find_all(&lower)
                    .into_iter()
                    .chain(self.registry.partial_dates().find_all(&lower))
                    .map(str::to_string),
            );
        }

        if let Some(ner) = &self.ner {
            match ner.get_entities(sentence).await {
                Ok(mut groups) => {
                    if let Some(spans) = groups.remove(DATE_LABEL) {
                        candidates.extend(spans);
                    }
                }
                Err(e) => warn!("NER lookup failed, using pattern dates only: {e}"),
            }
        }

        candidates
    }

    /// Dates mentioned in one sentence, in candidate order.
    pub async fn extract_time(&self, sentence: &str) -> Vec<NaiveDate> {
        let candidates = self.candidates(sentence).await;
        if candidates.is_empty() {
            return Vec::new();
        }

        let kept = remove_partial_duplicates(&candidates);
        debug!(
            "Date candidates: {} found, {} after partial-duplicate removal",
            candidates.len(),
            kept.len()
        );

        kept.iter()
            .filter_map(|token| self.normalizer.normalize(token))
            .collect()
    }
}
