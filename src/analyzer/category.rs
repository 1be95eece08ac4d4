use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coarse topic of a text span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Technical,
    Business,
    Academic,
    News,
    Narrative,
    General,
}

impl ContentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Technical => "technical",
            ContentCategory::Business => "business",
            ContentCategory::Academic => "academic",
            ContentCategory::News => "news",
            ContentCategory::Narrative => "narrative",
            ContentCategory::General => "general",
        }
    }
}

const TECHNICAL: &[&str] = &[
    "code",
    "function",
    "algorithm",
    "data",
    "system",
    "software",
    "api",
    "database",
    "server",
    "programming",
    "computer",
    "network",
    "implementation",
    "module",
    "compiler",
];

const BUSINESS: &[&str] = &[
    "market",
    "revenue",
    "customer",
    "sales",
    "profit",
    "business",
    "company",
    "strategy",
    "management",
    "investment",
    "product",
    "growth",
];

const ACADEMIC: &[&str] = &[
    "research",
    "study",
    "analysis",
    "theory",
    "hypothesis",
    "experiment",
    "university",
    "journal",
    "evidence",
    "methodology",
    "findings",
];

const NEWS: &[&str] = &[
    "reported",
    "announced",
    "government",
    "president",
    "official",
    "according",
    "yesterday",
    "today",
    "breaking",
    "election",
    "police",
];

/// Checked in this order; the first set sharing a keyword wins
const KEYWORD_SETS: &[(ContentCategory, &[&str])] = &[
    (ContentCategory::Technical, TECHNICAL),
    (ContentCategory::Business, BUSINESS),
    (ContentCategory::Academic, ACADEMIC),
    (ContentCategory::News, NEWS),
];

static NARRATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(once|story|character|chapter|tale|hero)\b").expect("narrative regex")
});

/// Classify a text span from its top keywords, falling back to a narrative
/// pattern over the lowercased text
pub fn classify(top_keywords: &[String], lowercased: &str) -> ContentCategory {
    for (category, words) in KEYWORD_SETS {
        if top_keywords.iter().any(|k| words.contains(&k.as_str())) {
            return *category;
        }
    }

    if NARRATIVE.is_match(lowercased) {
        return ContentCategory::Narrative;
    }

    ContentCategory::General
}
