//! The three pipeline stages and their typed records.
//!
//! Each stage is a pure orchestration step: it builds a natural-language
//! instruction embedding its input, invokes its agent once, and parses the
//! raw response into a typed record plus a structural count. Stages hold no
//! state across invocations; two runs on the same input may differ because
//! the model is non-deterministic, which is expected.
//!
//! No stage enforces the constraints its instruction communicates (e.g. the
//! rewrite word-count tolerance) -- counts are measured and reported, not
//! validated.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::error::Result;
use crate::llm_ctx::LlmCtx;
use crate::parse;
use crate::stats::word_count;
use crate::PipelineError;

/// Output of the rewrite stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteResult {
    /// The rewritten narrative text.
    pub rewritten_text: String,
    /// Whitespace-delimited token count of the input text.
    pub original_word_count: usize,
    /// Whitespace-delimited token count of the rewritten text.
    pub rewritten_word_count: usize,
}

/// Output of the segmentation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneBreakdown {
    /// Raw scene list text as generated.
    pub scenes_text: String,
    /// Number of `Scene <N>:` tags found (a match count, not a validated
    /// sequence).
    pub scene_count: usize,
}

/// Output of the prompt-generation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePromptSet {
    /// Raw prompt list text as generated.
    pub image_prompts_text: String,
    /// Number of `Scene <N> - Prompt <M>:` tags found. This is the
    /// authoritative total the API reports.
    pub prompt_count: usize,
}

/// Rewrites input text while communicating a ±5% word-count tolerance.
#[derive(Debug, Clone)]
pub struct RewriteStage {
    agent: Agent,
}

impl RewriteStage {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// Build the stage instruction for the given input text.
    pub fn build_prompt(text: &str) -> String {
        format!(
            "Rewrite the following text while maintaining approximately {} words \
             (±5% is acceptable).\n\nOriginal text:\n{}\n\nProvide ONLY the \
             rewritten text, no explanations.",
            word_count(text),
            text
        )
    }

    pub async fn run(&self, ctx: &LlmCtx, text: &str) -> Result<RewriteResult> {
        if text.trim().is_empty() {
            return Err(PipelineError::MissingInput {
                stage: "rewrite-text".into(),
            });
        }

        let original_word_count = word_count(text);
        let rewritten_text = self.agent.generate(ctx, &Self::build_prompt(text)).await?;
        let rewritten_word_count = word_count(&rewritten_text);

        tracing::debug!(
            original_word_count,
            rewritten_word_count,
            "rewrite stage complete"
        );

        Ok(RewriteResult {
            rewritten_text,
            original_word_count,
            rewritten_word_count,
        })
    }
}

/// Breaks rewritten text into maximally granular numbered scenes.
#[derive(Debug, Clone)]
pub struct SegmentStage {
    agent: Agent,
}

impl SegmentStage {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// Build the stage instruction for the given rewritten text.
    pub fn build_prompt(rewritten_text: &str) -> String {
        format!(
            "Break the following text into AS MANY distinct, detailed scenes as \
             possible. Each scene should be richly described with visual details.\n\n\
             Text to break into scenes:\n{}\n\n\
             Remember to:\n\
             - Maximize the number of scenes\n\
             - Provide 2-4 sentences per scene with vivid visual details\n\
             - Number each scene (Scene 1, Scene 2, etc.)\n\
             - Think cinematically - every significant moment or visual change is a new scene",
            rewritten_text
        )
    }

    pub async fn run(&self, ctx: &LlmCtx, input: &RewriteResult) -> Result<SceneBreakdown> {
        if input.rewritten_text.trim().is_empty() {
            return Err(PipelineError::MissingInput {
                stage: "break-into-scenes".into(),
            });
        }

        let scenes_text = self
            .agent
            .generate(ctx, &Self::build_prompt(&input.rewritten_text))
            .await?;
        let scene_count = parse::count_scenes(&scenes_text);

        tracing::debug!(scene_count, "segmentation stage complete");

        Ok(SceneBreakdown {
            scenes_text,
            scene_count,
        })
    }
}

/// Generates tagged image-prompt variants (target 3-5) for each scene.
#[derive(Debug, Clone)]
pub struct PromptStage {
    agent: Agent,
}

impl PromptStage {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }

    /// Build the stage instruction for the given scene breakdown text.
    pub fn build_prompt(scenes_text: &str) -> String {
        format!(
            "Generate 3-5 detailed image generation prompts for EACH of the \
             following scenes. Maximize variety and creative interpretations.\n\n\
             Scenes:\n{}\n\n\
             Remember to:\n\
             - Create multiple prompt variations per scene (different angles, styles, emphasis)\n\
             - Include specific visual details (lighting, mood, composition, camera angle)\n\
             - Use professional photography and cinematography terms\n\
             - Format as: Scene X - Prompt Y: [detailed prompt]",
            scenes_text
        )
    }

    pub async fn run(&self, ctx: &LlmCtx, input: &SceneBreakdown) -> Result<ImagePromptSet> {
        if input.scenes_text.trim().is_empty() {
            return Err(PipelineError::MissingInput {
                stage: "generate-image-prompts".into(),
            });
        }

        let image_prompts_text = self
            .agent
            .generate(ctx, &Self::build_prompt(&input.scenes_text))
            .await?;
        let prompt_count = parse::count_prompt_tags(&image_prompts_text);

        tracing::debug!(prompt_count, "prompt-generation stage complete");

        Ok(ImagePromptSet {
            image_prompts_text,
            prompt_count,
        })
    }
}
