#![warn(
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
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

pub mod dates;
pub mod keywords;
pub mod matcher;
mod report;
mod scalar;
mod tagger;
mod time;

pub use dates::{DateError, DateNormalizer, remove_partial_duplicates};
pub use keywords::{
    BuildError, KeywordDefs, KeywordRegistry, KeywordSetDef, MatchMode, MentionDefs,
    MentionKeywords, ReceptorDefs, ReceptorKeywords,
};
pub use matcher::KeywordSet;
pub use report::{ReportExtractor, ReportSummary};
pub use scalar::{labelled_date, most_common, parse_age, raw_age};
pub use tagger::SentenceTagger;
pub use time::{DATE_LABEL, TimeExtractor};
