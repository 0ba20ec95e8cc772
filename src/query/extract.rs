//! Entity extraction.
//!
//! Each extractor scans an already-lowercased question for one kind of
//! entity. They are pure and do not depend on one another.

use std::sync::LazyLock;

use regex::Regex;

use super::dictionary::{DEPARTMENT_SYNONYMS, PRODUCT_KEYWORDS};

/// Canonical code of the first department synonym contained in the question.
pub fn find_department(question: &str) -> Option<String> {
    DEPARTMENT_SYNONYMS
        .iter()
        .find(|(synonym, _)| question.contains(synonym))
        .map(|(_, code)| code.to_string())
}

/// Year of study from "year 2", "year: 3" or "2nd year". Not range-checked.
pub fn find_year(question: &str) -> Option<u32> {
    let caps = YEAR_PATTERN.captures(question)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
}

/// Row limit from "top N", "first N" or "limit N". Zero yields `None`.
pub fn find_limit(question: &str) -> Option<u32> {
    LIMIT_PATTERN
        .captures(question)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&n| n > 0)
}

/// First product keyword contained in the question, capitalized ("Laptop").
pub fn find_product(question: &str) -> Option<String> {
    PRODUCT_KEYWORDS
        .iter()
        .find(|word| question.contains(*word))
        .map(|word| capitalize(word))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:(?:year\s*:?)\s*(\d{1,2})|(\d{1,2})(?:st|nd|rd|th)?\s+year)\b")
        .expect("Invalid regex")
});
static LIMIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:top|first|limit)\s+(\d{1,3})\b").expect("Invalid regex")
});
