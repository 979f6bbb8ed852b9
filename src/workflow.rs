//! The text-to-image-prompts workflow.
//!
//! [`TextToImagePrompts`] sequences the three stages in fixed order:
//! rewrite → segment → generate prompts, feeding each stage's output
//! record to the next. Execution is strictly sequential -- stage N+1
//! needs the literal text output of stage N -- and aborts on the first
//! error with no retry, no partial result, and nothing to roll back
//! (no stage has side effects beyond producing a value).
//!
//! Agents are injected explicitly at construction time; the builder
//! rejects a workflow with a missing agent instead of deferring the
//! failure to request time.

use crate::agent::Agent;
use crate::error::Result;
use crate::llm_ctx::LlmCtx;
use crate::stage::{
    ImagePromptSet, PromptStage, RewriteResult, RewriteStage, SceneBreakdown, SegmentStage,
};
use crate::PipelineError;

/// All three stage records from one workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub rewrite: RewriteResult,
    pub scenes: SceneBreakdown,
    pub prompts: ImagePromptSet,
}

/// Sequential three-stage pipeline from narrative text to image prompts.
pub struct TextToImagePrompts {
    rewrite: RewriteStage,
    segment: SegmentStage,
    prompts: PromptStage,
}

impl TextToImagePrompts {
    /// Create a new workflow builder.
    pub fn builder() -> TextToImagePromptsBuilder {
        TextToImagePromptsBuilder::default()
    }

    /// Create a workflow from the stock agents, all using the given model.
    pub fn with_model(model: &str) -> Self {
        Self {
            rewrite: RewriteStage::new(crate::agent::text_rewriter().with_model(model)),
            segment: SegmentStage::new(crate::agent::scene_breaker().with_model(model)),
            prompts: PromptStage::new(crate::agent::image_prompt_generator().with_model(model)),
        }
    }

    /// Run the full pipeline on the given narrative text.
    ///
    /// Three awaited generation calls, one per stage, strictly in order.
    /// The first stage error is returned unchanged; later stages are not
    /// invoked after a failure.
    pub async fn run(&self, ctx: &LlmCtx, text: &str) -> Result<WorkflowRun> {
        let rewrite = self.rewrite.run(ctx, text).await?;
        let scenes = self.segment.run(ctx, &rewrite).await?;
        let prompts = self.prompts.run(ctx, &scenes).await?;

        tracing::info!(
            original_words = rewrite.original_word_count,
            scene_count = scenes.scene_count,
            prompt_count = prompts.prompt_count,
            "workflow run complete"
        );

        Ok(WorkflowRun {
            rewrite,
            scenes,
            prompts,
        })
    }
}

impl std::fmt::Debug for TextToImagePrompts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextToImagePrompts")
            .field("stages", &["rewrite-text", "break-into-scenes", "generate-image-prompts"])
            .finish()
    }
}

/// Builder for [`TextToImagePrompts`], validating that every stage has an
/// agent.
#[derive(Default)]
pub struct TextToImagePromptsBuilder {
    rewriter: Option<Agent>,
    scene_breaker: Option<Agent>,
    prompt_generator: Option<Agent>,
}

impl TextToImagePromptsBuilder {
    /// Set the rewrite-stage agent.
    pub fn rewriter(mut self, agent: Agent) -> Self {
        self.rewriter = Some(agent);
        self
    }

    /// Set the segmentation-stage agent.
    pub fn scene_breaker(mut self, agent: Agent) -> Self {
        self.scene_breaker = Some(agent);
        self
    }

    /// Set the prompt-generation-stage agent.
    pub fn prompt_generator(mut self, agent: Agent) -> Self {
        self.prompt_generator = Some(agent);
        self
    }

    /// Build the workflow, failing if any stage is missing its agent.
    pub fn build(self) -> Result<TextToImagePrompts> {
        let rewriter = self.rewriter.ok_or_else(|| {
            PipelineError::InvalidConfig("Text Rewriter agent not provided".to_string())
        })?;
        let scene_breaker = self.scene_breaker.ok_or_else(|| {
            PipelineError::InvalidConfig("Scene Breaker agent not provided".to_string())
        })?;
        let prompt_generator = self.prompt_generator.ok_or_else(|| {
            PipelineError::InvalidConfig("Image Prompt Generator agent not provided".to_string())
        })?;

        Ok(TextToImagePrompts {
            rewrite: RewriteStage::new(rewriter),
            segment: SegmentStage::new(scene_breaker),
            prompts: PromptStage::new(prompt_generator),
        })
    }
}
