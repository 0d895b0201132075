//! Single-valued facts resolved from many sentence-level candidates.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::hash::Hash;

use crate::dates::DateNormalizer;
use crate::keywords::KeywordRegistry;
use crate::matcher::KeywordSet;

/// Most frequent value; ties go to the value seen first.
///
/// ```
/// use medex_extract::most_common;
///
/// assert_eq!(most_common(&["b", "a", "a", "b"]), Some("b"));
/// assert_eq!(most_common::<&str>(&[]), None);
/// ```
#[must_use]
pub fn most_common<T: Eq + Hash + Clone>(values: &[T]) -> Option<T> {
    let mut order: Vec<&T> = Vec::new();
    let mut counts: HashMap<&T, usize> = HashMap::new();

    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut best: Option<(&T, usize)> = None;
    for value in order {
        let count = counts[value];
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}

/// Raw age phrase in a sentence, e.g. `"45 yo female"`.
#[must_use]
pub fn raw_age(registry: &KeywordRegistry, sentence: &str) -> Option<String> {
    let lower = sentence.to_lowercase();
    registry.age().first_match(&lower).map(str::to_string)
}

/// First run of digits in a raw age phrase.
#[must_use]
pub fn parse_age(raw: &str) -> Option<u32> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let digits = &raw[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Date announced by a labelled pattern such as `dob: 01/02/1960`.
///
/// The labelled match is re-scanned for a complete numeric date, which is
/// then normalized; unreadable dates count as no candidate.
#[must_use]
pub fn labelled_date(
    registry: &KeywordRegistry,
    labels: &KeywordSet,
    normalizer: &DateNormalizer,
    sentence: &str,
) -> Option<NaiveDate> {
    let lower = sentence.to_lowercase();
    let labelled = labels.first_match(&lower)?;
    let token = registry.full_dates().find_all(labelled).into_iter().next()?;
    normalizer.normalize(token)
}
