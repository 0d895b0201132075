#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod error;
pub mod ner;
pub mod record;
pub mod text;

pub use config::{DateConfig, NerBackendKind, NerConfig};
pub use error::{Error, Result};
pub use ner::{EntityGroups, NerBackend, OUTSIDE_LABEL, TaggedToken, group_tags};
pub use record::{Concept, MentionRecord, Polarity, SentenceRecord};
pub use text::{RuleSentenceSplitter, SentenceSplitter, Tokenizer, WordTokenizer};
