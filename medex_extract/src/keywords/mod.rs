//! Keyword registry: the phrase and pattern inventory for every concept.
//!
//! Definitions are plain serde data so a deployment can replace them with a
//! JSON file. [`KeywordRegistry`] is the compiled, read-only form that the
//! taggers borrow.

mod defaults;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::matcher::KeywordSet;
use medex_core::{Concept, Polarity};

/// Error type for registry building.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid regex {pattern:?} in keyword set {set}: {source}")]
    Regex {
        set: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot read keyword file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid keyword file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// How the entries of a keyword set are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring test.
    #[default]
    Literal,
    /// Case-insensitive regex search.
    Regex,
}

/// Definition of a single keyword set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSetDef {
    #[serde(default)]
    pub mode: MatchMode,
    pub patterns: Vec<String>,
}

impl KeywordSetDef {
    #[must_use]
    pub fn literal(phrases: &[&str]) -> Self {
        Self {
            mode: MatchMode::Literal,
            patterns: phrases.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn regex(patterns: &[&str]) -> Self {
        Self {
            mode: MatchMode::Regex,
            patterns: patterns.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Compile into a [`KeywordSet`]. Repeated entries are kept once.
    ///
    /// # Errors
    /// Returns an error if a regex entry does not compile.
    pub fn build(&self, name: &str) -> Result<KeywordSet, BuildError> {
        let mut seen = HashSet::new();
        let unique = self
            .patterns
            .iter()
            .filter(|p| seen.insert(p.as_str()))
            .collect::<Vec<_>>();

        match self.mode {
            MatchMode::Literal => Ok(KeywordSet::literal(
                name,
                unique.into_iter().map(|p| p.to_lowercase()),
            )),
            MatchMode::Regex => {
                let compiled = unique
                    .into_iter()
                    .map(|p| {
                        RegexBuilder::new(p)
                            .case_insensitive(true)
                            .build()
                            .map_err(|source| BuildError::Regex {
                                set: name.to_string(),
                                pattern: p.clone(),
                                source,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(KeywordSet::patterns(name, compiled))
            }
        }
    }
}

/// Positive, negative and percentage triggers for one receptor or biomarker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceptorDefs {
    pub positive: KeywordSetDef,
    pub negative: KeywordSetDef,
    pub percent: KeywordSetDef,
}

/// Triggers for a concept that is only ever mentioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionDefs {
    pub mention: KeywordSetDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<KeywordSetDef>,
}

/// Every keyword definition the extractors use.
///
/// Fields missing from a JSON file fall back to the built-in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordDefs {
    pub estrogen: ReceptorDefs,
    pub progesterone: ReceptorDefs,
    pub her2: ReceptorDefs,
    pub p53: ReceptorDefs,
    pub dcis: MentionDefs,
    pub surgical: MentionDefs,
    pub menopause: MentionDefs,
    pub age: KeywordSetDef,
    pub date_of_birth: KeywordSetDef,
    pub last_menstrual_period: KeywordSetDef,
    /// Phrases that suggest a sentence carries a date.
    pub date_indicators: KeywordSetDef,
    /// Complete numeric dates: `mm/dd/yyyy`, `mm-dd-yyyy`.
    pub full_dates: KeywordSetDef,
    /// Two-component numeric dates: `mm/dd`, `mm/yy`.
    pub partial_dates: KeywordSetDef,
}

impl KeywordDefs {
    /// Read definitions from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| BuildError::Json {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Keyword set name such as `her2.negative`, used in build errors.
fn set_name(concept: Concept, polarity: Polarity) -> String {
    format!("{concept}.{polarity}")
}

#[derive(Debug, Clone)]
pub struct ReceptorKeywords {
    pub positive: KeywordSet,
    pub negative: KeywordSet,
    pub percent: KeywordSet,
}

impl ReceptorKeywords {
    fn build(concept: Concept, defs: &ReceptorDefs) -> Result<Self, BuildError> {
        Ok(Self {
            positive: defs.positive.build(&set_name(concept, Polarity::Positive))?,
            negative: defs.negative.build(&set_name(concept, Polarity::Negative))?,
            percent: defs.percent.build(&set_name(concept, Polarity::Percent))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MentionKeywords {
    pub mention: KeywordSet,
    pub percent: Option<KeywordSet>,
}

impl MentionKeywords {
    fn build(name: &str, defs: &MentionDefs) -> Result<Self, BuildError> {
        Ok(Self {
            mention: defs.mention.build(&format!("{name}.{}", Polarity::Mention))?,
            percent: defs
                .percent
                .as_ref()
                .map(|p| p.build(&format!("{name}.{}", Polarity::Percent)))
                .transpose()?,
        })
    }
}

/// Compiled keyword sets, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct KeywordRegistry {
    defs: KeywordDefs,
    estrogen: ReceptorKeywords,
    progesterone: ReceptorKeywords,
    her2: ReceptorKeywords,
    p53: ReceptorKeywords,
    dcis: MentionKeywords,
    surgical: MentionKeywords,
    menopause: MentionKeywords,
    age: KeywordSet,
    date_of_birth: KeywordSet,
    last_menstrual_period: KeywordSet,
    date_indicators: KeywordSet,
    full_dates: KeywordSet,
    partial_dates: KeywordSet,
}

impl KeywordRegistry {
    /// Compile a registry from definitions.
    ///
    /// # Errors
    /// Returns an error if any regex entry is invalid.
    pub fn new(defs: KeywordDefs) -> Result<Self, BuildError> {
        let registry = Self {
            estrogen: ReceptorKeywords::build(Concept::Estrogen, &defs.estrogen)?,
            progesterone: ReceptorKeywords::build(Concept::Progesterone, &defs.progesterone)?,
            her2: ReceptorKeywords::build(Concept::Her2, &defs.her2)?,
            p53: ReceptorKeywords::build(Concept::P53, &defs.p53)?,
            dcis: MentionKeywords::build(Concept::Dcis.as_str(), &defs.dcis)?,
            surgical: MentionKeywords::build(Concept::Surgical.as_str(), &defs.surgical)?,
            menopause: MentionKeywords::build("menopause", &defs.menopause)?,
            age: defs.age.build(Concept::Age.as_str())?,
            date_of_birth: defs.date_of_birth.build(Concept::DateOfBirth.as_str())?,
            last_menstrual_period: defs
                .last_menstrual_period
                .build(Concept::LastMenstrualPeriod.as_str())?,
            date_indicators: defs.date_indicators.build("date_indicators")?,
            full_dates: defs.full_dates.build("full_dates")?,
            partial_dates: defs.partial_dates.build("partial_dates")?,
            defs,
        };
        debug!(
            "Built keyword registry: {} estrogen, {} progesterone, {} her2, {} p53 triggers",
            registry.estrogen.positive.len() + registry.estrogen.negative.len(),
            registry.progesterone.positive.len() + registry.progesterone.negative.len(),
            registry.her2.positive.len() + registry.her2.negative.len(),
            registry.p53.positive.len() + registry.p53.negative.len(),
        );
        Ok(registry)
    }

    /// Create a registry from the built-in inventory.
    ///
    /// # Errors
    /// Returns an error if a built-in pattern fails to compile.
    pub fn with_defaults() -> Result<Self, BuildError> {
        Self::new(KeywordDefs::default())
    }

    /// Create a registry from a JSON definitions file.
    ///
    /// # Errors
    /// Returns an error if the file is unreadable or a pattern is invalid.
    pub fn from_json_file(path: &Path) -> Result<Self, BuildError> {
        Self::new(KeywordDefs::from_json_file(path)?)
    }

    /// The definitions this registry was compiled from.
    #[must_use]
    pub const fn defs(&self) -> &KeywordDefs {
        &self.defs
    }

    /// Polarity triggers for a receptor concept; `None` for other concepts.
    #[must_use]
    pub const fn receptor(&self, concept: Concept) -> Option<&ReceptorKeywords> {
        match concept {
            Concept::Estrogen => Some(&self.estrogen),
            Concept::Progesterone => Some(&self.progesterone),
            Concept::Her2 => Some(&self.her2),
            Concept::P53 => Some(&self.p53),
            _ => None,
        }
    }

    /// Mention triggers; menopause mentions belong to the LMP concept.
    #[must_use]
    pub const fn mention(&self, concept: Concept) -> Option<&MentionKeywords> {
        match concept {
            Concept::Dcis => Some(&self.dcis),
            Concept::Surgical => Some(&self.surgical),
            Concept::LastMenstrualPeriod => Some(&self.menopause),
            _ => None,
        }
    }

    #[must_use]
    pub const fn age(&self) -> &KeywordSet {
        &self.age
    }

    #[must_use]
    pub const fn date_of_birth(&self) -> &KeywordSet {
        &self.date_of_birth
    }

    #[must_use]
    pub const fn last_menstrual_period(&self) -> &KeywordSet {
        &self.last_menstrual_period
    }

    #[must_use]
    pub const fn date_indicators(&self) -> &KeywordSet {
        &self.date_indicators
    }

    #[must_use]
    pub const fn full_dates(&self) -> &KeywordSet {
        &self.full_dates
    }

    #[must_use]
    pub const fn partial_dates(&self) -> &KeywordSet {
        &self.partial_dates
    }
}
