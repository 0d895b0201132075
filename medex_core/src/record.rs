//! Per-sentence extraction records.
//!
//! A record only exists when a sentence mentioned its concept. Absence is the
//! normal outcome for a sentence that says nothing about the concept.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A clinical attribute searched for in a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Concept {
    /// Estrogen receptor status.
    Estrogen = 0,
    /// Progesterone receptor status.
    Progesterone = 1,
    /// HER2 (her-2/neu) status.
    Her2 = 2,
    /// p53 status.
    P53 = 3,
    /// Ductal carcinoma in situ mention.
    Dcis = 4,
    /// Prior surgical procedures ("s/p mastectomy", "lumpectomy").
    Surgical = 5,
    /// Patient age.
    Age = 6,
    /// Patient date of birth.
    DateOfBirth = 7,
    /// Last menstrual period and menopause mentions.
    LastMenstrualPeriod = 8,
}

impl Concept {
    /// Concepts tagged with positive/negative polarity.
    pub const RECEPTORS: [Self; 4] = [Self::Estrogen, Self::Progesterone, Self::Her2, Self::P53];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Estrogen => "estrogen",
            Self::Progesterone => "progesterone",
            Self::Her2 => "her2",
            Self::P53 => "p53",
            Self::Dcis => "dcis",
            Self::Surgical => "surgical",
            Self::Age => "age",
            Self::DateOfBirth => "date_of_birth",
            Self::LastMenstrualPeriod => "last_menstrual_period",
        }
    }
}

impl std::fmt::Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Concept {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "estrogen" | "er" => Ok(Self::Estrogen),
            "progesterone" | "pr" => Ok(Self::Progesterone),
            "her2" => Ok(Self::Her2),
            "p53" => Ok(Self::P53),
            "dcis" => Ok(Self::Dcis),
            "surgical" => Ok(Self::Surgical),
            "age" => Ok(Self::Age),
            "date_of_birth" | "dob" => Ok(Self::DateOfBirth),
            "last_menstrual_period" | "lmp" => Ok(Self::LastMenstrualPeriod),
            _ => Err("unknown concept"),
        }
    }
}

/// Which side of a concept a keyword set detects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Polarity {
    /// "er positive", "her2 3+"
    Positive = 0,
    /// "er negative", "her2neu neg"
    Negative = 1,
    /// Percentage figures: "er (70%)"
    Percent = 2,
    /// Plain mention without a status: "dcis", "lumpectomy"
    Mention = 3,
}

impl Polarity {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Percent => "percent",
            Self::Mention => "mention",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receptor or biomarker status found in one sentence.
///
/// Both flags may be set at once: the positive and negative keyword sets are
/// tested independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub concept: Concept,
    pub positive: bool,
    pub negative: bool,
    /// Source sentence, original case.
    pub sentence: String,
    /// Percentage figure such as `70%`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<String>,
}

/// A mention of a concept that has no polarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub concept: Concept,
    pub sentence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<String>,
    /// Keywords found in the sentence, in registry order.
    pub matched: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concept_round_trips_through_str() {
        for concept in [
            Concept::Estrogen,
            Concept::Progesterone,
            Concept::Her2,
            Concept::P53,
            Concept::Dcis,
            Concept::Surgical,
            Concept::Age,
            Concept::DateOfBirth,
            Concept::LastMenstrualPeriod,
        ] {
            assert_eq!(Concept::from_str(concept.as_str()), Ok(concept));
        }
        assert_eq!(Concept::from_str("DOB"), Ok(Concept::DateOfBirth));
        assert!(Concept::from_str("ki67").is_err());
    }

    #[test]
    fn polarity_names_keyword_sets() {
        assert_eq!(format!("{}.{}", Concept::Her2, Polarity::Negative), "her2.negative");
        assert_eq!(Polarity::Mention.to_string(), "mention");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn sentence_record_omits_missing_percent() {
        let record = SentenceRecord {
            concept: Concept::Progesterone,
            positive: false,
            negative: true,
            sentence: "PR: negative.".to_string(),
            percent: None,
        };

        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["concept"], "progesterone");
        assert_eq!(json["negative"], true);
        assert!(json.get("percent").is_none());
    }
}
