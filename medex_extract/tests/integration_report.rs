//! Integration tests for whole-report extraction.
//!
//! These tests verify that:
//! - A short pathology note yields age and receptor records end to end
//! - Scalar facts are voted across sentences
//! - Tagger date spans flow through normalization
//! - Keyword files replace the built-in inventory

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use medex_core::{Concept, NerBackend, TaggedToken};
use medex_extract::{DateNormalizer, KeywordDefs, KeywordRegistry, KeywordSetDef, ReportExtractor};

/// Labels a fixed vocabulary as `DATE` and everything else as outside.
struct VocabularyTagger(&'static [&'static str]);

#[async_trait]
impl NerBackend for VocabularyTagger {
    async fn tag(&self, tokens: &[String]) -> medex_core::Result<Vec<TaggedToken>> {
        Ok(tokens
            .iter()
            .map(|token| {
                let label = if self.0.contains(&token.as_str()) { "DATE" } else { "O" };
                TaggedToken::new(token.clone(), label)
            })
            .collect())
    }
}

fn extractor() -> ReportExtractor {
    let registry = KeywordRegistry::with_defaults().expect("Failed to build default keywords");
    ReportExtractor::new(Arc::new(registry))
        .with_normalizer(DateNormalizer::default().with_current_year(2024))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Invalid test date")
}

#[tokio::test]
async fn test_short_pathology_note() {
    let report = "Patient is a 52 yo woman. ER: positive (70%). PR: negative.";
    let summary = extractor().summarize(report).await;

    assert_eq!(summary.age, Some(52));
    assert_eq!(summary.estrogen.len(), 1);
    assert!(summary.estrogen[0].positive);
    assert_eq!(summary.estrogen[0].percent.as_deref(), Some("70%"));
    assert_eq!(summary.progesterone.len(), 1);
    assert!(summary.progesterone[0].negative);
    assert!(summary.her2.is_empty());
    assert!(summary.p53.is_empty());
    assert!(summary.dates.is_empty());
}

#[tokio::test]
async fn test_empty_report() {
    let summary = extractor().summarize("").await;
    assert_eq!(summary, medex_extract::ReportSummary::default());
}

#[test]
fn test_multi_paragraph_report_keeps_sentence_order() {
    let report = "CLINICAL HISTORY: 61 year old woman with a palpable mass.\n\n\
                  IMMUNOHISTOCHEMISTRY: ER positive. PR weakly positive.\n\
                  HER-2/neu negative. p53 is negative.\n\n\
                  Prior biopsy and lumpectomy on the left.";
    let extractor = extractor();

    assert_eq!(extractor.extract_age(report), Some(61));
    assert_eq!(extractor.extract_estrogen(report).len(), 1);
    assert!(extractor.extract_progesterone(report)[0].positive);
    assert!(extractor.extract_her2(report)[0].negative);
    assert!(extractor.extract_p53(report)[0].negative);

    let surgical = extractor.extract_surgical(report);
    assert_eq!(surgical.len(), 1);
    assert_eq!(surgical[0].matched, vec!["lumpectomy", "biopsy"]);
    assert_eq!(surgical[0].concept, Concept::Surgical);
}

#[test]
fn test_age_vote_ties_go_to_first_mention() {
    let report = "47 yo female referred. She is a 45 yo female. \
                  On review, 45 yo female. Repeat: 47 yo female.";
    assert_eq!(extractor().extract_age(report), Some(47));
}

#[test]
fn test_dob_vote_across_spellings() {
    let report = "DOB: 02/03/1965. Date of birth: 2-3-1965. Birth date: 03/02/1965.";
    assert_eq!(extractor().extract_dob(report), Some(date(1965, 2, 3)));
}

#[tokio::test]
async fn test_tagger_dates_join_pattern_dates() {
    let tagger = VocabularyTagger(&["January", "5", ",", "2019"]);
    let extractor = extractor().with_ner(Arc::new(tagger));

    let report = "Seen in clinic January 5, 2019 for follow up. Imaging on 03/07.";
    let dates = extractor.extract_report_dates(report).await;
    assert_eq!(dates, vec![date(2019, 1, 5), date(2024, 3, 7)]);
}

#[test]
fn test_custom_keywords_replace_defaults() {
    let defs = KeywordDefs {
        menopause: medex_extract::MentionDefs {
            mention: KeywordSetDef::literal(&["postmenopausal", "perimenopausal"]),
            percent: None,
        },
        ..KeywordDefs::default()
    };
    let registry = KeywordRegistry::new(defs).expect("Failed to build custom keywords");
    let extractor = ReportExtractor::new(Arc::new(registry));

    let menopause = extractor.extract_menopause("Postmenopausal woman. No HRT.");
    assert_eq!(menopause.len(), 1);
    assert_eq!(menopause[0].matched, vec!["postmenopausal"]);
}
