use super::{Fragment, FragmentKind, PARAGRAPH_SEPARATOR};
use crate::metadata::{keys, Metadata};
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank line regex"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence end regex"));

/// Short-paragraph buffer state
#[derive(Debug, Default)]
enum BufferState {
    #[default]
    Idle,
    /// Paragraphs waiting to be merged, and their joined length
    Buffering { parts: Vec<String>, len: usize },
}

/// Emits text fragments with a shared order counter
struct TextSegmenter {
    min_length: usize,
    max_length: usize,
    state: BufferState,
    fragments: Vec<Fragment>,
}

/// Segment plain text into paragraph fragments
///
/// Paragraphs shorter than `min_length` are merged until the merged run
/// reaches `min_length`; anything longer than `max_length` is split at
/// sentence boundaries.
pub fn segment_text(content: &str, min_length: usize, max_length: usize) -> Vec<Fragment> {
    let mut segmenter = TextSegmenter {
        min_length,
        max_length,
        state: BufferState::Idle,
        fragments: Vec::new(),
    };

    for raw in BLANK_LINE.split(content) {
        let paragraph = normalize(raw);
        if paragraph.is_empty() {
            continue;
        }
        segmenter.push(paragraph);
    }

    segmenter.flush();
    segmenter.fragments
}

impl TextSegmenter {
    fn push(&mut self, paragraph: String) {
        let len = char_len(&paragraph);

        if len >= self.min_length {
            self.flush();
            self.emit(paragraph);
            return;
        }

        let buffered_len = if let BufferState::Buffering { parts, len: total } = &mut self.state {
            *total += char_len(PARAGRAPH_SEPARATOR) + len;
            parts.push(paragraph);
            *total
        } else {
            self.state = BufferState::Buffering {
                parts: vec![paragraph],
                len,
            };
            len
        };

        if buffered_len >= self.min_length {
            self.flush();
        }
    }

    /// Buffering -> Idle, emitting the merged paragraphs
    fn flush(&mut self) {
        if let BufferState::Buffering { parts, .. } = std::mem::take(&mut self.state) {
            self.emit(parts.join(PARAGRAPH_SEPARATOR));
        }
    }

    fn emit(&mut self, unit: String) {
        if char_len(&unit) > self.max_length {
            for chunk in split_sentences(&unit, self.max_length) {
                self.push_fragment(chunk);
            }
        } else {
            self.push_fragment(unit);
        }
    }

    fn push_fragment(&mut self, content: String) {
        let word_count = content.split_whitespace().count();
        let mut metadata = Metadata::new();
        metadata.insert(keys::LENGTH.into(), char_len(&content).into());
        metadata.insert(keys::WORD_COUNT.into(), word_count.into());

        self.fragments.push(Fragment {
            content,
            kind: FragmentKind::Paragraph,
            order: self.fragments.len(),
            parent_key: None,
            metadata,
        });
    }
}

/// Collapse whitespace runs to a single space and trim
fn normalize(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Split an over-long unit into sentences and pack them greedily.
/// A single sentence longer than `max_length` becomes its own chunk.
pub(crate) fn split_sentences(text: &str, max_length: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END.find_iter(text) {
        // punctuation is one byte, keep it with the sentence
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in sentences.into_iter().map(str::trim).filter(|s| !s.is_empty()) {
        let sentence_len = char_len(sentence);

        if current.is_empty() {
            current.push_str(sentence);
            current_len = sentence_len;
        } else if current_len + 1 + sentence_len <= max_length {
            current.push(' ');
            current.push_str(sentence);
            current_len += 1 + sentence_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_len = sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
