//! Named generation capabilities.
//!
//! An [`Agent`] pairs a set of system-prompt instructions with a model and
//! an [`LlmConfig`]. The three agents used by the pipeline are built by
//! [`text_rewriter`], [`scene_breaker`], and [`image_prompt_generator`];
//! they are handed to the workflow explicitly at construction time rather
//! than resolved by name from a global registry.

use crate::backend::{LlmConfig, LlmRequest};
use crate::error::Result;
use crate::llm_ctx::LlmCtx;

/// Default model for all agents; override per deployment via
/// [`Agent::with_model`] or `SCENEFORGE_MODEL`.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// A named generation capability: instructions + model + config.
///
/// `generate` is the single suspension point the pipeline has per stage --
/// one awaited backend call, no retry, no streaming.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Agent name (for logging and error messages).
    name: String,
    /// System-prompt instructions sent with every call.
    instructions: String,
    /// Model identifier.
    model: String,
    /// LLM configuration.
    config: LlmConfig,
}

impl Agent {
    /// Create a new agent with the given name and instructions.
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: DEFAULT_MODEL.to_string(),
            config: LlmConfig::default(),
        }
    }

    /// Set the model for this agent.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the LLM configuration.
    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    /// Agent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The agent's system-prompt instructions.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Invoke the backend with this agent's instructions and the given
    /// prompt, returning the raw generated text.
    ///
    /// Transport and provider errors propagate unchanged; the caller does
    /// not retry.
    pub async fn generate(&self, ctx: &LlmCtx, prompt: &str) -> Result<String> {
        let request = LlmRequest {
            model: self.model.clone(),
            system_prompt: Some(self.instructions.clone()),
            prompt: prompt.to_string(),
            config: self.config.clone(),
        };
        let response = ctx
            .backend
            .complete(&ctx.client, &ctx.base_url, &request)
            .await?;
        tracing::debug!(
            agent = %self.name,
            status = response.status,
            chars = response.text.len(),
            "generation call completed"
        );
        Ok(response.text)
    }
}

const TEXT_REWRITER_INSTRUCTIONS: &str = "\
You are an automated text-refining engine. You receive a piece of text and \
rewrite it to improve clarity, flow, and readability under strict constraints.

CONSTRAINTS
- Meaning preservation: the core message must remain identical to the \
original. Do not add or remove significant information.
- Word count adherence: the final word count must be within ±5% of the \
original text's word count.
- Tone and style parity: the tone (formal, humorous, technical) and style \
must match the original.

OUTPUT
- Output ONLY the final, rewritten text.
- Do not include commentary, apologies, or metadata. Do not say \"Here is \
the rewritten text:\" or anything similar.";

const SCENE_BREAKER_INSTRUCTIONS: &str = "\
Analyze the provided text and deconstruct it into the maximum possible \
number of granular, visually rich scenes. The output should read as a \
shot-by-shot guide for a film director or storyboard artist.

GUIDING PRINCIPLE: MAXIMIZE SCENE COUNT
A new scene MUST be created whenever one of the following occurs:
- A change in physical location or setting.
- A significant shift in time.
- A new character enters or leaves the focus.
- A distinct new action is initiated or completed.
- The emotional tone or mood shifts dramatically.
- The implied camera angle, focus, or shot type changes (e.g., from a wide \
shot to a close-up on an object).

SCENE CONTENT
For each scene, provide a vivid 2-4 sentence description covering setting \
and environment, characters and their positioning and expressions, the most \
critical action, and the mood and lighting.

OUTPUT FORMAT
- Sequentially number each scene, starting with \"Scene 1:\".
- Your response MUST contain ONLY the numbered list of scenes.
- Do not include any explanations, summaries, or other text.";

const IMAGE_PROMPT_GENERATOR_INSTRUCTIONS: &str = "\
Translate narrative scene descriptions into a diverse set of technically \
detailed, artistically rich prompts for AI image generators.

PROCESS
1. Choose ONE consistent style for all prompts of a scene (e.g., cinematic, \
animation, watercolor, anime, cyberpunk, pixel art, oil painting).
2. For each scene, generate distinct variations: a cinematic wide or medium \
shot of the overall scene; a character-focused close-up emphasizing \
expression and emotion; an environmental shot highlighting the setting; and \
a macro detail shot of a single important object with shallow depth of field.

PROMPT ANATOMY
Construct each prompt as a comma-separated list of keywords in this order: \
[Subject/Action], [Setting Details], [Atmosphere/Mood], [Lighting], \
[Composition/Camera], [Style/Medium], [Technical Details like --ar 16:9]

OUTPUT FORMAT
- Your response must ONLY contain the generated prompts.
- Do not include headers, explanations, or any other text.
- Use this exact line format:
  - Scene 1 - Prompt 1: [Prompt text]
  - Scene 1 - Prompt 2: [Prompt text]";

/// The rewrite-stage agent: refines text while preserving meaning, tone,
/// and approximate length.
pub fn text_rewriter() -> Agent {
    Agent::new("text-rewriter", TEXT_REWRITER_INSTRUCTIONS)
}

/// The segmentation-stage agent: breaks text into maximally granular
/// numbered scenes.
pub fn scene_breaker() -> Agent {
    Agent::new("scene-breaker", SCENE_BREAKER_INSTRUCTIONS)
}

/// The prompt-generation-stage agent: produces tagged image-prompt
/// variants per scene.
pub fn image_prompt_generator() -> Agent {
    Agent::new("image-prompt-generator", IMAGE_PROMPT_GENERATOR_INSTRUCTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use std::sync::Arc;

    #[test]
    fn test_agent_builder() {
        let agent = Agent::new("test", "Follow the rules.")
            .with_model("gpt-4o-mini")
            .with_config(LlmConfig::default().with_temperature(0.2));
        assert_eq!(agent.name(), "test");
        assert_eq!(agent.model(), "gpt-4o-mini");
        assert_eq!(agent.instructions(), "Follow the rules.");
    }

    #[test]
    fn test_stock_agents_have_format_contracts() {
        // The parsers depend on the tagged line formats the instructions demand.
        assert!(scene_breaker().instructions().contains("Scene 1:"));
        assert!(image_prompt_generator()
            .instructions()
            .contains("Scene 1 - Prompt 1:"));
        assert!(text_rewriter().instructions().contains("±5%"));
    }

    #[tokio::test]
    async fn test_generate_returns_backend_text() {
        let ctx = LlmCtx::builder("http://unused")
            .backend(Arc::new(MockBackend::fixed("rewritten text")))
            .build();
        let agent = Agent::new("test", "instructions");
        let text = agent.generate(&ctx, "some prompt").await.unwrap();
        assert_eq!(text, "rewritten text");
    }

    #[tokio::test]
    async fn test_generate_propagates_failure() {
        let ctx = LlmCtx::builder("http://unused")
            .backend(Arc::new(MockBackend::failing("service unavailable")))
            .build();
        let agent = Agent::new("test", "instructions");
        let err = agent.generate(&ctx, "prompt").await.unwrap_err();
        assert!(err.to_string().contains("service unavailable"));
    }
}
