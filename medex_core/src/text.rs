//! Sentence splitting and word tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

#[expect(clippy::expect_used, reason = "literal pattern is always valid")]
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph pattern is valid"));

#[expect(clippy::expect_used, reason = "literal pattern is always valid")]
static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:[-/'.]\w+)*%?|[^\w\s]").expect("word pattern is valid")
});

/// Abbreviations whose trailing period does not end a sentence.
pub const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "dr.", "mr.", "mrs.", "ms.", "vs.", "e.g.", "i.e.", "approx.", "st.", "pt.", "hx.",
];

pub trait SentenceSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<String>;
}

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Punctuation-driven splitter for English clinical prose.
///
/// Breaks after `.`, `!` or `?` followed by whitespace, and at blank lines.
/// Known abbreviations and single-letter initials do not end a sentence.
#[derive(Debug, Clone)]
pub struct RuleSentenceSplitter {
    abbreviations: Vec<String>,
}

impl Default for RuleSentenceSplitter {
    fn default() -> Self {
        Self::new(DEFAULT_ABBREVIATIONS.iter().map(|a| (*a).to_string()))
    }
}

impl RuleSentenceSplitter {
    #[must_use]
    pub fn new(abbreviations: impl IntoIterator<Item = String>) -> Self {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|a| a.to_lowercase())
                .collect(),
        }
    }

    /// Whether the period ending `segment` belongs to an abbreviation.
    fn ends_with_abbreviation(&self, segment: &str) -> bool {
        let Some(last_word) = segment.split_whitespace().last() else {
            return false;
        };
        let word = last_word.trim_start_matches(|c: char| matches!(c, '(' | '[' | '"' | '\''));

        let mut chars = word.chars();
        if let (Some(initial), Some('.'), None) = (chars.next(), chars.next(), chars.next()) {
            if initial.is_uppercase() {
                return true;
            }
        }

        let lower = word.to_lowercase();
        self.abbreviations.iter().any(|a| *a == lower)
    }

    fn split_paragraph(&self, paragraph: &str, sentences: &mut Vec<String>) {
        let mut start = 0;
        let mut iter = paragraph.char_indices().peekable();

        while let Some((idx, ch)) = iter.next() {
            if !matches!(ch, '.' | '!' | '?') {
                continue;
            }

            let mut end = idx + ch.len_utf8();
            while let Some((next_idx, next)) =
                iter.next_if(|&(_, c)| matches!(c, '.' | '!' | '?' | '"' | '\'' | ')' | ']'))
            {
                end = next_idx + next.len_utf8();
            }

            if !iter.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
                continue;
            }
            if ch == '.' && self.ends_with_abbreviation(&paragraph[start..=idx]) {
                continue;
            }

            push_trimmed(sentences, &paragraph[start..end]);
            start = end;
        }

        push_trimmed(sentences, &paragraph[start..]);
    }
}

fn push_trimmed(sentences: &mut Vec<String>, segment: &str) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

impl SentenceSplitter for RuleSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for paragraph in PARAGRAPH_BREAK.split(text) {
            self.split_paragraph(paragraph, &mut sentences);
        }
        sentences
    }
}

/// Splits text into words and single punctuation marks.
///
/// Dates (`01/02/2020`), hyphenated markers (`her-2/neu`) and percentages
/// (`70%`) stay one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD.find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<String> {
        RuleSentenceSplitter::default().split(text)
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        assert_eq!(
            split("Patient is a 52 yo woman. ER: positive (70%). PR: negative."),
            vec![
                "Patient is a 52 yo woman.",
                "ER: positive (70%).",
                "PR: negative."
            ]
        );
    }

    #[test]
    fn keeps_abbreviations_and_initials_together() {
        assert_eq!(
            split("Seen by Dr. Smith and J. Doe today. Size approx. 2.5 cm!"),
            vec!["Seen by Dr. Smith and J. Doe today.", "Size approx. 2.5 cm!"]
        );
    }

    #[test]
    fn synoptic_no_ends_its_line() {
        assert_eq!(
            split("Lymphovascular invasion: No. ER negative."),
            vec!["Lymphovascular invasion: No.", "ER negative."]
        );
    }

    #[test]
    fn blank_lines_end_sentences() {
        assert_eq!(
            split("IMPRESSION: benign\n\n  \nDOB: 01/02/1960"),
            vec!["IMPRESSION: benign", "DOB: 01/02/1960"]
        );
    }

    #[test]
    fn closing_brackets_stay_with_their_sentence() {
        assert_eq!(
            split("Receptors were checked (ER+.) Next visit in May."),
            vec!["Receptors were checked (ER+.)", "Next visit in May."]
        );
    }

    #[test]
    fn empty_text_has_no_sentences() {
        assert!(split("").is_empty());
        assert!(split("   \n\n ").is_empty());
    }

    #[test]
    fn tokenizer_keeps_dates_and_percentages_whole() {
        let tokens = WordTokenizer.tokenize("ER (70%) on 01/02/2020, her-2/neu neg.");
        assert_eq!(
            tokens,
            vec![
                "ER",
                "(",
                "70%",
                ")",
                "on",
                "01/02/2020",
                ",",
                "her-2/neu",
                "neg",
                "."
            ]
        );
    }
}
