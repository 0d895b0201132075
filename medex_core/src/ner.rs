//! Named-entity recognition seam.
//!
//! The tagger itself is an external service. Extraction code only sees this
//! trait, so tests substitute an in-memory fake.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::text::{Tokenizer, WordTokenizer};

/// Label the taggers assign to tokens outside any entity.
pub const OUTSIDE_LABEL: &str = "O";

/// Entity spans keyed by label, spans in text order.
pub type EntityGroups = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: String,
    pub label: String,
}

impl TaggedToken {
    #[must_use]
    pub fn new(token: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            label: label.into(),
        }
    }
}

#[async_trait]
pub trait NerBackend: Send + Sync {
    /// Label each token, preserving order.
    async fn tag(&self, tokens: &[String]) -> crate::Result<Vec<TaggedToken>>;

    /// Entity spans found in `text`, keyed by label (`DATE`, `PERSON`, ...).
    async fn get_entities(&self, text: &str) -> crate::Result<EntityGroups> {
        let tokens = WordTokenizer.tokenize(text);
        if tokens.is_empty() {
            return Ok(EntityGroups::new());
        }
        let tagged = self.tag(&tokens).await?;
        let groups = group_tags(&tagged);
        debug!(
            "Tagged {} tokens into {} entity labels",
            tagged.len(),
            groups.len()
        );
        Ok(groups)
    }
}

/// Join runs of consecutive tokens sharing a label into spans, then collect
/// the spans per label. Tokens labelled [`OUTSIDE_LABEL`] are dropped.
///
/// ```
/// use medex_core::{TaggedToken, group_tags};
///
/// let tagged = [
///     TaggedToken::new("Rami", "PERSON"),
///     TaggedToken::new("Eid", "PERSON"),
///     TaggedToken::new("is", "O"),
///     TaggedToken::new("studying", "O"),
/// ];
/// let groups = group_tags(&tagged);
/// assert_eq!(groups["PERSON"], vec!["Rami Eid".to_string()]);
/// assert!(!groups.contains_key("O"));
/// ```
#[must_use]
pub fn group_tags(tagged: &[TaggedToken]) -> EntityGroups {
    let mut groups = EntityGroups::new();
    let mut iter = tagged.iter().peekable();

    while let Some(first) = iter.next() {
        let mut words = vec![first.token.as_str()];
        while let Some(next) = iter.next_if(|t| t.label == first.label) {
            words.push(next.token.as_str());
        }
        if first.label == OUTSIDE_LABEL {
            continue;
        }
        groups
            .entry(first.label.clone())
            .or_default()
            .push(words.join(" "));
    }

    groups
}
