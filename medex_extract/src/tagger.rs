//! Sentence-level tagging.

use medex_core::{Concept, MentionRecord, SentenceRecord};

use crate::keywords::KeywordRegistry;

/// Tags single sentences against a borrowed keyword registry.
#[derive(Debug, Clone, Copy)]
pub struct SentenceTagger<'a> {
    registry: &'a KeywordRegistry,
}

impl<'a> SentenceTagger<'a> {
    #[must_use]
    pub const fn new(registry: &'a KeywordRegistry) -> Self {
        Self { registry }
    }

    /// Receptor status in one sentence.
    ///
    /// Positive and negative triggers are tested independently, so a
    /// discordant sentence can set both flags. Returns `None` when neither
    /// fires, or when `concept` is not a receptor.
    #[must_use]
    pub fn tag_receptor(&self, concept: Concept, sentence: &str) -> Option<SentenceRecord> {
        let keywords = self.registry.receptor(concept)?;
        let lower = sentence.to_lowercase();

        let positive = keywords.positive.matches(&lower);
        let negative = keywords.negative.matches(&lower);
        if !positive && !negative {
            return None;
        }

        Some(SentenceRecord {
            concept,
            positive,
            negative,
            sentence: sentence.to_string(),
            percent: keywords.percent.percent(&lower),
        })
    }

    /// Mention of DCIS, a surgical procedure, or menopause.
    ///
    /// A record is produced if any trigger matches.
    #[must_use]
    pub fn tag_mention(&self, concept: Concept, sentence: &str) -> Option<MentionRecord> {
        let keywords = self.registry.mention(concept)?;
        let lower = sentence.to_lowercase();

        let matched = keywords.mention.matched(&lower);
        if matched.is_empty() {
            return None;
        }

        Some(MentionRecord {
            concept,
            sentence: sentence.to_string(),
            percent: keywords
                .percent
                .as_ref()
                .and_then(|percent| percent.percent(&lower)),
            matched,
        })
    }
}
