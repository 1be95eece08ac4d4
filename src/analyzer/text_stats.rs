use super::category::{classify, ContentCategory};
use crate::metadata::{MetaValue, Metadata};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{3,}").expect("word regex"));
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("sentence break regex"));
static LIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*[-*•]").expect("list line regex"));

const TOP_KEYWORDS: usize = 10;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "has", "him", "his", "how", "its", "may", "who", "did", "she", "this", "that",
    "with", "have", "from", "they", "will", "would", "there", "their", "what", "about", "which",
    "when", "were", "been", "into", "than", "then", "them", "these", "those", "some", "such",
    "only", "also", "just", "more", "most", "other", "over", "very", "your", "each", "where",
    "while", "should", "could", "being", "does", "after", "before", "because", "between",
    "through",
];

/// Heuristic readability bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityLevel {
    VeryEasy,
    Easy,
    Moderate,
    Difficult,
    VeryDifficult,
}

impl ReadabilityLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 10.0 {
            ReadabilityLevel::VeryEasy
        } else if score < 15.0 {
            ReadabilityLevel::Easy
        } else if score < 20.0 {
            ReadabilityLevel::Moderate
        } else if score < 25.0 {
            ReadabilityLevel::Difficult
        } else {
            ReadabilityLevel::VeryDifficult
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadabilityLevel::VeryEasy => "very_easy",
            ReadabilityLevel::Easy => "easy",
            ReadabilityLevel::Moderate => "moderate",
            ReadabilityLevel::Difficult => "difficult",
            ReadabilityLevel::VeryDifficult => "very_difficult",
        }
    }
}

/// Statistical and lexical profile of a text span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub top_keywords: Vec<String>,
    pub unique_word_count: usize,
    pub total_word_count: usize,
    pub lexical_diversity: f64,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub content_category: ContentCategory,
    pub has_questions: bool,
    pub has_lists: bool,
    pub has_numbers: bool,
    pub has_urls: bool,
    pub avg_word_length: f64,
    pub readability_score: f64,
    pub readability_level: ReadabilityLevel,
}

/// Compute the heuristic profile of `text`
///
/// Total over any input and a pure function of it: the empty string yields
/// zeroed counts, `general` and `very_easy`.
pub fn analyze_text(text: &str) -> TextAnalysis {
    let lowercased = text.to_lowercase();

    let words: Vec<String> = WORD
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();
    let total_word_count = words.len();

    // first-seen order, so the stable sort below keeps ties in that order
    let mut frequencies: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for word in words.iter().map(String::as_str) {
        match positions.get(word) {
            Some(&i) => frequencies[i].1 += 1,
            None => {
                positions.insert(word, frequencies.len());
                frequencies.push((word, 1));
            }
        }
    }
    let unique_word_count = frequencies.len();

    let mut candidates: Vec<(&str, usize)> = frequencies
        .into_iter()
        .filter(|(word, _)| !STOP_WORDS.contains(word))
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    let top_keywords: Vec<String> = candidates
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(word, _)| word.to_string())
        .collect();

    let lexical_diversity = if total_word_count > 0 {
        round_to(unique_word_count as f64 / total_word_count as f64, 3)
    } else {
        0.0
    };

    let sentence_count = SENTENCE_BREAK
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count();
    let avg_sentence_length = if sentence_count > 0 {
        round_to(total_word_count as f64 / sentence_count as f64, 1)
    } else {
        0.0
    };

    let avg_word_length = if total_word_count > 0 {
        let letters: usize = words.iter().map(String::len).sum();
        round_to(letters as f64 / total_word_count as f64, 1)
    } else {
        0.0
    };

    let readability_score = round_to(avg_sentence_length * 0.5 + avg_word_length * 2.0, 1);

    TextAnalysis {
        content_category: classify(&top_keywords, &lowercased),
        top_keywords,
        unique_word_count,
        total_word_count,
        lexical_diversity,
        sentence_count,
        avg_sentence_length,
        has_questions: text.contains('?'),
        has_lists: LIST_LINE.is_match(text),
        has_numbers: text.bytes().any(|b| b.is_ascii_digit()),
        has_urls: text.contains("http://") || text.contains("https://"),
        avg_word_length,
        readability_score,
        readability_level: ReadabilityLevel::from_score(readability_score),
    }
}

impl TextAnalysis {
    /// Flatten into metadata entries, each key prefixed with `prefix`
    pub fn to_metadata(&self, prefix: &str) -> Metadata {
        let key = |name: &str| format!("{}{}", prefix, name);

        let mut metadata = Metadata::new();
        metadata.insert(key("top_keywords"), self.top_keywords.clone().into());
        metadata.insert(key("unique_word_count"), self.unique_word_count.into());
        metadata.insert(key("total_word_count"), self.total_word_count.into());
        metadata.insert(key("lexical_diversity"), self.lexical_diversity.into());
        metadata.insert(key("sentence_count"), self.sentence_count.into());
        metadata.insert(key("avg_sentence_length"), self.avg_sentence_length.into());
        metadata.insert(
            key("content_category"),
            MetaValue::from(self.content_category.as_str()),
        );
        metadata.insert(key("has_questions"), self.has_questions.into());
        metadata.insert(key("has_lists"), self.has_lists.into());
        metadata.insert(key("has_numbers"), self.has_numbers.into());
        metadata.insert(key("has_urls"), self.has_urls.into());
        metadata.insert(key("avg_word_length"), self.avg_word_length.into());
        metadata.insert(key("readability_score"), self.readability_score.into());
        metadata.insert(
            key("readability_level"),
            MetaValue::from(self.readability_level.as_str()),
        );
        metadata
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
