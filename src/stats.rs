//! Pure text-statistics helpers.
//!
//! Stateless functions the pipeline uses for word counting and that the
//! API layer uses for request logging. Counts are whitespace-delimited
//! token counts; no linguistic analysis happens here.

use serde::Serialize;

/// Count whitespace-delimited words in a text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Aggregate statistics for a block of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub character_count: usize,
    pub character_count_no_spaces: usize,
    pub paragraph_count: usize,
    pub average_words_per_sentence: f64,
    pub estimated_reading_time_minutes: usize,
}

impl TextStats {
    /// Compute statistics for the given text.
    ///
    /// Sentences split on `.`, `!`, `?`; paragraphs on blank lines;
    /// reading time assumes 200 words per minute.
    pub fn analyze(text: &str) -> Self {
        let text = text.trim();

        let word_count = word_count(text);
        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count();
        let character_count = text.chars().count();
        let character_count_no_spaces =
            text.chars().filter(|c| !c.is_whitespace()).count();
        let paragraph_count = text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count();
        let average_words_per_sentence = if sentence_count > 0 {
            ((word_count as f64 / sentence_count as f64) * 10.0).round() / 10.0
        } else {
            0.0
        };
        let estimated_reading_time_minutes = word_count.div_ceil(200);

        Self {
            word_count,
            sentence_count,
            character_count,
            character_count_no_spaces,
            paragraph_count,
            average_words_per_sentence,
            estimated_reading_time_minutes,
        }
    }
}
