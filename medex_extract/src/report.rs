//! Report-level aggregation.
//!
//! Every extractor splits the report, runs a per-sentence step and keeps the
//! results in sentence order. List extractions are never deduplicated;
//! scalar facts go through [`most_common`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use medex_core::{
    Concept, MentionRecord, NerBackend, RuleSentenceSplitter, SentenceRecord, SentenceSplitter,
};

use crate::dates::DateNormalizer;
use crate::keywords::KeywordRegistry;
use crate::scalar::{labelled_date, most_common, parse_age, raw_age};
use crate::tagger::SentenceTagger;
use crate::time::TimeExtractor;

/// Everything extracted from one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    pub age: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
    pub last_menstrual_period: Option<NaiveDate>,
    pub estrogen: Vec<SentenceRecord>,
    pub progesterone: Vec<SentenceRecord>,
    pub her2: Vec<SentenceRecord>,
    pub p53: Vec<SentenceRecord>,
    pub dcis: Vec<MentionRecord>,
    pub surgical: Vec<MentionRecord>,
    pub menopause: Vec<MentionRecord>,
    pub dates: Vec<NaiveDate>,
}

pub struct ReportExtractor {
    registry: Arc<KeywordRegistry>,
    splitter: Arc<dyn SentenceSplitter>,
    normalizer: DateNormalizer,
    time: TimeExtractor,
}

impl ReportExtractor {
    /// Extractor with the rule splitter and default date settings.
    #[must_use]
    pub fn new(registry: Arc<KeywordRegistry>) -> Self {
        let normalizer = DateNormalizer::default();
        Self {
            time: TimeExtractor::new(Arc::clone(&registry), normalizer),
            registry,
            splitter: Arc::new(RuleSentenceSplitter::default()),
            normalizer,
        }
    }

    #[must_use]
    pub fn with_splitter(mut self, splitter: Arc<dyn SentenceSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    #[must_use]
    pub fn with_normalizer(mut self, normalizer: DateNormalizer) -> Self {
        self.normalizer = normalizer;
        self.time = self.time.with_normalizer(normalizer);
        self
    }

    /// Route `DATE` lookups through a tagger.
    #[must_use]
    pub fn with_ner(mut self, ner: Arc<dyn NerBackend>) -> Self {
        self.time = self.time.with_ner(ner);
        self
    }

    #[must_use]
    pub fn split(&self, report: &str) -> Vec<String> {
        self.splitter.split(report)
    }

    /// Receptor records for `concept`, one per mentioning sentence.
    #[must_use]
    pub fn extract_receptor(&self, concept: Concept, report: &str) -> Vec<SentenceRecord> {
        let tagger = SentenceTagger::new(&self.registry);
        self.split(report)
            .iter()
            .filter_map(|sentence| tagger.tag_receptor(concept, sentence))
            .collect()
    }

    /// Mention records for DCIS, surgical history or menopause.
    #[must_use]
    pub fn extract_mentions(&self, concept: Concept, report: &str) -> Vec<MentionRecord> {
        let tagger = SentenceTagger::new(&self.registry);
        self.split(report)
            .iter()
            .filter_map(|sentence| tagger.tag_mention(concept, sentence))
            .collect()
    }

    #[must_use]
    pub fn extract_estrogen(&self, report: &str) -> Vec<SentenceRecord> {
        self.extract_receptor(Concept::Estrogen, report)
    }

    #[must_use]
    pub fn extract_progesterone(&self, report: &str) -> Vec<SentenceRecord> {
        self.extract_receptor(Concept::Progesterone, report)
    }

    #[must_use]
    pub fn extract_her2(&self, report: &str) -> Vec<SentenceRecord> {
        self.extract_receptor(Concept::Her2, report)
    }

    #[must_use]
    pub fn extract_p53(&self, report: &str) -> Vec<SentenceRecord> {
        self.extract_receptor(Concept::P53, report)
    }

    #[must_use]
    pub fn extract_dcis(&self, report: &str) -> Vec<MentionRecord> {
        self.extract_mentions(Concept::Dcis, report)
    }

    #[must_use]
    pub fn extract_surgical(&self, report: &str) -> Vec<MentionRecord> {
        self.extract_mentions(Concept::Surgical, report)
    }

    #[must_use]
    pub fn extract_menopause(&self, report: &str) -> Vec<MentionRecord> {
        self.extract_mentions(Concept::LastMenstrualPeriod, report)
    }

    /// Patient age: majority vote over raw age phrases, then the phrase's
    /// leading number.
    #[must_use]
    pub fn extract_age(&self, report: &str) -> Option<u32> {
        let phrases: Vec<String> = self
            .split(report)
            .iter()
            .filter_map(|sentence| raw_age(&self.registry, sentence))
            .collect();
        debug!("Age candidates: {phrases:?}");
        parse_age(&most_common(&phrases)?)
    }

    /// Date of birth: majority vote over normalized dates.
    #[must_use]
    pub fn extract_dob(&self, report: &str) -> Option<NaiveDate> {
        let dates: Vec<NaiveDate> = self
            .split(report)
            .iter()
            .filter_map(|sentence| {
                labelled_date(
                    &self.registry,
                    self.registry.date_of_birth(),
                    &self.normalizer,
                    sentence,
                )
            })
            .collect();
        most_common(&dates)
    }

    /// Last menstrual period: majority vote over normalized `lmp:` dates.
    #[must_use]
    pub fn extract_lmp(&self, report: &str) -> Option<NaiveDate> {
        let dates: Vec<NaiveDate> = self
            .split(report)
            .iter()
            .filter_map(|sentence| {
                labelled_date(
                    &self.registry,
                    self.registry.last_menstrual_period(),
                    &self.normalizer,
                    sentence,
                )
            })
            .collect();
        most_common(&dates)
    }

    /// Dates in one sentence.
    pub async fn extract_time(&self, sentence: &str) -> Vec<NaiveDate> {
        self.time.extract_time(sentence).await
    }

    /// Dates from every sentence of a report, in sentence order.
    pub async fn extract_report_dates(&self, report: &str) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        for sentence in self.split(report) {
            dates.extend(self.time.extract_time(&sentence).await);
        }
        dates
    }

    /// Run every extraction over one report.
    pub async fn summarize(&self, report: &str) -> ReportSummary {
        let summary = ReportSummary {
            age: self.extract_age(report),
            date_of_birth: self.extract_dob(report),
            last_menstrual_period: self.extract_lmp(report),
            estrogen: self.extract_estrogen(report),
            progesterone: self.extract_progesterone(report),
            her2: self.extract_her2(report),
            p53: self.extract_p53(report),
            dcis: self.extract_dcis(report),
            surgical: self.extract_surgical(report),
            menopause: self.extract_menopause(report),
            dates: self.extract_report_dates(report).await,
        };
        debug!(
            "Summarized report: {} estrogen, {} progesterone, {} her2, {} p53 records",
            summary.estrogen.len(),
            summary.progesterone.len(),
            summary.her2.len(),
            summary.p53.len()
        );
        summary
    }
}
