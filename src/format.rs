//! Response formatter: raw prompt text → keyed scene structure.
//!
//! Takes the final stage's raw output and regroups its conforming lines
//! into `scene_<N>` buckets for the API response. The formatter is a pure
//! function of its inputs; running it twice on the same text yields
//! identical output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parse;

/// One image prompt entry within a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Prompt variant number as tagged in the source line.
    pub number: u32,
    /// The prompt text, trimmed.
    pub prompt: String,
}

/// Structured prompt response: prompts grouped by scene key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredPrompts {
    /// `scene_<N>` → prompts in source-line order (not sorted by number).
    pub scenes: BTreeMap<String, Vec<PromptEntry>>,
    /// Number of distinct scene keys reconstructed by the formatter.
    pub total_scenes: usize,
    /// The generation stage's authoritative tag count, NOT a recount of
    /// the reconstructed entries.
    pub total_prompts: usize,
}

/// Group the raw prompt text into scene buckets.
///
/// `reported_count` is the prompt-tag count measured by the generation
/// stage and is passed through as `total_prompts`. If the stricter
/// line matcher reconstructs a different number of entries (the model
/// deviated from the expected line pattern), the discrepancy is logged
/// and the reported count is still trusted.
pub fn format_prompts(image_prompts_text: &str, reported_count: usize) -> StructuredPrompts {
    let mut scenes: BTreeMap<String, Vec<PromptEntry>> = BTreeMap::new();

    let lines = parse::prompt_lines(image_prompts_text);
    let parsed_count = lines.len();

    for line in lines {
        let key = format!("scene_{}", line.scene);
        scenes.entry(key).or_default().push(PromptEntry {
            number: line.number,
            prompt: line.prompt,
        });
    }

    if parsed_count != reported_count {
        tracing::warn!(
            reported_count,
            parsed_count,
            "prompt count mismatch: formatter reconstructed a different number \
             of entries than the generation stage counted"
        );
    }

    StructuredPrompts {
        total_scenes: scenes.len(),
        total_prompts: reported_count,
        scenes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_PROMPTS: &str =
        "Scene 1 - Prompt 1: A cat\nScene 1 - Prompt 2: A dog\nScene 2 - Prompt 1: A tree";

    #[test]
    fn test_groups_by_scene_key() {
        let out = format_prompts(THREE_PROMPTS, 3);
        assert_eq!(out.total_scenes, 2);
        assert_eq!(out.total_prompts, 3);
        assert_eq!(out.scenes["scene_1"].len(), 2);
        assert_eq!(out.scenes["scene_2"].len(), 1);
    }

    #[test]
    fn test_preserves_line_order_within_scene() {
        // Out-of-order prompt numbers stay in source order.
        let text = "Scene 1 - Prompt 2: Second tag first\nScene 1 - Prompt 1: First tag second";
        let out = format_prompts(text, 2);
        let entries = &out.scenes["scene_1"];
        assert_eq!(entries[0].number, 2);
        assert_eq!(entries[1].number, 1);
    }

    #[test]
    fn test_scene_key_uses_digits_as_matched() {
        let out = format_prompts("Scene 10 - Prompt 1: Wide shot", 1);
        assert!(out.scenes.contains_key("scene_10"));
    }

    #[test]
    fn test_skips_nonconforming_lines() {
        let text = "Here are your prompts:\n\nScene 1 - Prompt 1: A cat\nEnjoy!";
        let out = format_prompts(text, 1);
        assert_eq!(out.total_scenes, 1);
        assert_eq!(out.scenes["scene_1"].len(), 1);
    }

    #[test]
    fn test_trusts_reported_count_on_mismatch() {
        // The stage counted 5 tags but the formatter only reconstructs 1.
        let out = format_prompts("Scene 1 - Prompt 1: A cat", 5);
        assert_eq!(out.total_prompts, 5);
        assert_eq!(out.scenes["scene_1"].len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let a = format_prompts(THREE_PROMPTS, 3);
        let b = format_prompts(THREE_PROMPTS, 3);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_empty_input() {
        let out = format_prompts("", 0);
        assert!(out.scenes.is_empty());
        assert_eq!(out.total_scenes, 0);
        assert_eq!(out.total_prompts, 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(format_prompts(THREE_PROMPTS, 3)).unwrap();
        assert!(json.get("totalScenes").is_some());
        assert!(json.get("totalPrompts").is_some());
        assert!(json["scenes"]["scene_1"][0].get("prompt").is_some());
    }
}
