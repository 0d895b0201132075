//! Keyword membership tests for a single sentence.
//!
//! Every method expects lower-cased input; callers lower-case once per
//! sentence and reuse it across concepts.

use once_cell::sync::Lazy;
use regex::Regex;

#[expect(clippy::expect_used, reason = "literal pattern is always valid")]
static PERCENT_FIGURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:\.\d+)?\s*(?:%|percent)").expect("percent pattern is valid")
});

#[derive(Debug, Clone)]
enum Keyword {
    Literal(String),
    Pattern(Regex),
}

impl Keyword {
    fn source(&self) -> &str {
        match self {
            Self::Literal(phrase) => phrase,
            Self::Pattern(re) => re.as_str(),
        }
    }

    fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            Self::Literal(phrase) => text
                .find(phrase.as_str())
                .map(|start| &text[start..start + phrase.len()]),
            Self::Pattern(re) => re.find(text).map(|m| m.as_str()),
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Literal(phrase) => text.contains(phrase.as_str()),
            Self::Pattern(re) => re.is_match(text),
        }
    }
}

/// A compiled, immutable set of phrases or regex fragments.
///
/// Keywords keep their declaration order, which is the iteration order for
/// every "first match" query.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    name: String,
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    pub(crate) fn literal(name: &str, phrases: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.to_string(),
            keywords: phrases.into_iter().map(Keyword::Literal).collect(),
        }
    }

    pub(crate) fn patterns(name: &str, patterns: impl IntoIterator<Item = Regex>) -> Self {
        Self {
            name: name.to_string(),
            keywords: patterns.into_iter().map(Keyword::Pattern).collect(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// True if any phrase is a substring of `lower` or any pattern matches it.
    #[must_use]
    pub fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| k.is_match(lower))
    }

    /// Source text of every keyword present in `lower`, in declaration order.
    #[must_use]
    pub fn matched(&self, lower: &str) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|k| k.is_match(lower))
            .map(|k| k.source().to_string())
            .collect()
    }

    /// Text matched by the first keyword (in declaration order) that matches.
    #[must_use]
    pub fn first_match<'t>(&self, lower: &'t str) -> Option<&'t str> {
        self.keywords.iter().find_map(|k| k.find(lower))
    }

    /// Every match of every keyword, grouped by keyword in declaration order.
    #[must_use]
    pub fn find_all<'t>(&self, lower: &'t str) -> Vec<&'t str> {
        let mut found = Vec::new();
        for keyword in &self.keywords {
            match keyword {
                Keyword::Pattern(re) => found.extend(re.find_iter(lower).map(|m| m.as_str())),
                Keyword::Literal(phrase) => {
                    found.extend(lower.match_indices(phrase.as_str()).map(|(_, s)| s));
                }
            }
        }
        found
    }

    /// Percentage figure carried by the first matching keyword.
    ///
    /// Returns `None` when nothing matches, and also when the first matching
    /// keyword has no figure in its match (a bare `dcis` mention).
    #[must_use]
    pub fn percent(&self, lower: &str) -> Option<String> {
        let matched = self.first_match(lower)?;
        PERCENT_FIGURE
            .find(matched)
            .map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn regex_set(patterns: &[&str]) -> KeywordSet {
        KeywordSet::patterns(
            "test",
            patterns
                .iter()
                .map(|p| Regex::new(p).expect("test pattern should compile")),
        )
    }

    fn literal_set(phrases: &[&str]) -> KeywordSet {
        KeywordSet::literal("test", phrases.iter().map(|p| (*p).to_string()))
    }

    #[test]
    fn literal_phrases_match_as_substrings() {
        let set = literal_set(&["er positive", "er: +"]);
        assert!(set.matches("tumor is er positive."));
        assert!(set.matches("er: + and pr: -"));
        assert!(!set.matches("pr positive"));
        assert!(!set.matches(""));
    }

    #[test]
    fn literal_phrases_are_not_regex() {
        let set = literal_set(&["er/pr+"]);
        assert!(set.matches("er/pr+ disease"));
        assert!(!set.matches("er/prr disease"));
    }

    #[test]
    fn regex_fragments_match_anywhere() {
        let set = regex_set(&[r"\d+ yo female"]);
        assert!(set.matches("a 45 yo female presents"));
        assert!(!set.matches("a yo female"));
    }

    #[test]
    fn first_match_follows_declaration_order() {
        let set = regex_set(&[r"\d+yo female", r"\d+yo f"]);
        assert_eq!(set.first_match("45yo female"), Some("45yo female"));

        let reversed = regex_set(&[r"\d+yo f", r"\d+yo female"]);
        assert_eq!(reversed.first_match("45yo female"), Some("45yo f"));
    }

    #[test]
    fn matched_lists_every_present_keyword() {
        let set = literal_set(&["lumpectomy", "biopsy", "s/p mastectomy"]);
        assert_eq!(
            set.matched("s/p mastectomy, prior biopsy"),
            vec!["biopsy".to_string(), "s/p mastectomy".to_string()]
        );
    }

    #[test]
    fn find_all_groups_by_pattern() {
        let set = regex_set(&[r"\d+/\d+/\d+", r"\d+-\d+-\d+"]);
        assert_eq!(
            set.find_all("date: 2020-01-05 and 01/02/2020, 03/04/2021"),
            vec!["01/02/2020", "03/04/2021", "2020-01-05"]
        );
    }

    #[test]
    fn percent_extracts_figure_from_first_match() {
        let set = regex_set(&[r"er \w+ \(\d+%\)", r"er: positive \(\d+%\)"]);
        assert_eq!(set.percent("er: positive (70%)."), Some("70%".to_string()));
        assert_eq!(set.percent("er strongly (95%)"), Some("95%".to_string()));
        assert_eq!(set.percent("er positive"), None);
    }

    #[test]
    fn percent_uses_only_first_matching_pattern() {
        let set = regex_set(&[r"dcis is \d+ percent", "dcis"]);
        assert_eq!(set.percent("dcis is 20 percent"), Some("20 percent".to_string()));
        assert_eq!(set.percent("extensive dcis, 20%"), None);
    }
}
