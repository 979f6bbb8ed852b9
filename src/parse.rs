//! Pattern matchers for semi-structured LLM output.
//!
//! The external model is only *asked* (via its instructions) to emit tagged
//! lines; nothing guarantees it complies. These matchers are the sole
//! parsing boundary between raw generated text and structured records.
//! Lines that do not match are silently skipped -- they contribute to
//! neither counts nor structured output.
//!
//! Two patterns exist:
//! - scene tags: `Scene <N>:` anywhere in a block of text;
//! - scene-prompt lines: `Scene <N> - Prompt <M>: <text>`, optionally
//!   prefixed by a list-bullet dash.
//!
//! Matching is case-sensitive on the literal tokens `Scene` and `Prompt`.

use once_cell::sync::Lazy;
use regex::Regex;

static SCENE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Scene (\d+):").expect("scene tag regex"));

static PROMPT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Scene \d+ - Prompt \d+:").expect("prompt tag regex"));

static PROMPT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\s*Scene (\d+) - Prompt (\d+):\s*(.+)$").expect("prompt line regex")
});

/// One parsed `Scene <N> - Prompt <M>: <text>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    /// Scene number digits as they appeared in the source (used verbatim
    /// for the `scene_<N>` key).
    pub scene: String,
    /// Prompt variant number within the scene.
    pub number: u32,
    /// The prompt text, trimmed.
    pub prompt: String,
}

/// Extract the scene numbers from every `Scene <N>:` tag in the text.
///
/// This is a match count, not a validated sequence: numbers need not be
/// contiguous, sorted, or unique.
pub fn scene_numbers(text: &str) -> Vec<u32> {
    SCENE_TAG
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse().ok())
        .collect()
}

/// Count `Scene <N>:` tags in the text.
pub fn count_scenes(text: &str) -> usize {
    SCENE_TAG.find_iter(text).count()
}

/// Count `Scene <N> - Prompt <M>:` tags in the text.
///
/// This is the authoritative prompt count reported by the pipeline; the
/// formatter's stricter line matcher may reconstruct fewer entries.
pub fn count_prompt_tags(text: &str) -> usize {
    PROMPT_TAG.find_iter(text).count()
}

/// Parse every conforming `Scene <N> - Prompt <M>: <text>` line, in source
/// order. Non-empty lines that do not match are skipped.
pub fn prompt_lines(text: &str) -> Vec<PromptLine> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            PROMPT_LINE.captures(line).map(|cap| PromptLine {
                scene: cap[1].to_string(),
                number: cap[2].parse().unwrap_or(0),
                prompt: cap[3].trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_numbers_extracted() {
        let text = "Scene 1: A dune.\nScene 2: Two moons.\nScene 10: The return.";
        assert_eq!(scene_numbers(text), vec![1, 2, 10]);
        assert_eq!(count_scenes(text), 3);
    }

    #[test]
    fn test_scene_numbers_need_not_be_ordered() {
        let text = "Scene 3: C.\nScene 1: A.\nScene 3: C again.";
        assert_eq!(scene_numbers(text), vec![3, 1, 3]);
        assert_eq!(count_scenes(text), 3);
    }

    #[test]
    fn test_scene_tag_requires_colon_and_case() {
        assert_eq!(count_scenes("Scene 1 has no colon"), 0);
        assert_eq!(count_scenes("scene 1: lowercase"), 0);
    }

    #[test]
    fn test_count_prompt_tags() {
        let text = "Scene 1 - Prompt 1: A cat\nScene 1 - Prompt 2: A dog\nScene 2 - Prompt 1: A tree";
        assert_eq!(count_prompt_tags(text), 3);
    }

    #[test]
    fn test_prompt_lines_grouping_order() {
        let text = "Scene 1 - Prompt 1: A cat\nScene 1 - Prompt 2: A dog\nScene 2 - Prompt 1: A tree";
        let lines = prompt_lines(text);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], PromptLine { scene: "1".into(), number: 1, prompt: "A cat".into() });
        assert_eq!(lines[1].prompt, "A dog");
        assert_eq!(lines[2].scene, "2");
    }

    #[test]
    fn test_prompt_lines_tolerate_bullet_dash() {
        let text = "- Scene 1 - Prompt 1: A harbor at dawn";
        let lines = prompt_lines(text);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].prompt, "A harbor at dawn");
    }

    #[test]
    fn test_prompt_lines_skip_nonconforming() {
        let text = "Prompt: no scene tag\n\nSome commentary.\nScene 1 - Prompt 1: Valid";
        let lines = prompt_lines(text);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].prompt, "Valid");
    }

    #[test]
    fn test_prompt_line_requires_text_after_colon() {
        assert!(prompt_lines("Scene 1 - Prompt 1:").is_empty());
    }

    #[test]
    fn test_counts_can_diverge_from_line_parse() {
        // The tag counter matches mid-line; the line matcher is stricter.
        let text = "Intro text Scene 1 - Prompt 1: embedded in prose";
        assert_eq!(count_prompt_tags(text), 1);
        assert!(prompt_lines(text).is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(count_scenes(""), 0);
        assert_eq!(count_prompt_tags(""), 0);
        assert!(prompt_lines("").is_empty());
    }
}
