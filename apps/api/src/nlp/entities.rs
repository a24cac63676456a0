//! Pattern-based entity extraction.
//!
//! Each entity kind has its own independent matcher. Results keep
//! first-occurrence order and are not deduplicated.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::nlp::vocabulary::{scan_vocabulary, LOCATIONS, TECHNICAL_SKILLS};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Optional country code, then 3-3-4 digit groups with optional separators.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?1?[-.\s]?)?\(?([0-9]{3})\)?[-.\s]?([0-9]{3})[-.\s]?([0-9]{4})")
        .expect("valid phone regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://[-\w.]+(?::\d+)?(?:/[\w/.]*(?:\?[\w&=%.]*)?(?:#[\w.]*)?)?",
    )
    .expect("valid url regex")
});

/// Tried in order; matches are concatenated pattern by pattern.
static DATE_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        // 03/15/2021, 15-03-21
        Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").expect("valid day-first date regex"),
        // 2021/03/15, 2021-3-5
        Regex::new(r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b").expect("valid year-first date regex"),
        // March 15, 2021 / Mar 15 2021
        Regex::new(
            r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{1,2},? \d{4}\b",
        )
        .expect("valid month-name date regex"),
    ]
});

/// All entities found in a document, keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBag {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub urls: Vec<String>,
    pub dates: Vec<String>,
    pub locations: Vec<String>,
    pub skills: Vec<String>,
}

impl EntityBag {
    /// Number of matches per kind, for statistics.
    pub fn counts(&self) -> [(&'static str, usize); 6] {
        [
            ("emails", self.emails.len()),
            ("phones", self.phones.len()),
            ("urls", self.urls.len()),
            ("dates", self.dates.len()),
            ("locations", self.locations.len()),
            ("skills", self.skills.len()),
        ]
    }
}

pub fn extract_entities(text: &str) -> EntityBag {
    EntityBag {
        emails: extract_emails(text),
        phones: extract_phones(text),
        urls: extract_urls(text),
        dates: extract_dates(text),
        locations: scan_vocabulary(text, LOCATIONS),
        skills: extract_skills(text),
    }
}

/// Technical skills from the fixed vocabulary that appear in `text`.
pub fn extract_skills(text: &str) -> Vec<String> {
    scan_vocabulary(text, TECHNICAL_SKILLS)
}

/// First email address in `text`, if any.
pub fn first_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First phone number in `text` as its ten digits, if any.
pub fn first_phone(text: &str) -> Option<String> {
    PHONE_RE.captures(text).map(|caps| join_phone_digits(&caps))
}

fn extract_emails(text: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn extract_phones(text: &str) -> Vec<String> {
    PHONE_RE
        .captures_iter(text)
        .map(|caps| join_phone_digits(&caps))
        .collect()
}

fn join_phone_digits(caps: &regex::Captures<'_>) -> String {
    // Groups 2..=4 always participate in a match; the country-code prefix is dropped.
    (2..=4)
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str())
        .collect()
}

fn extract_urls(text: &str) -> Vec<String> {
    URL_RE.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

fn extract_dates(text: &str) -> Vec<String> {
    DATE_RES
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}
