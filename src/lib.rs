//! # SceneForge
//!
//! Narrative text to image-generation prompts, in three LLM stages.
//!
//! The pipeline rewrites input text at constant length, breaks the rewrite
//! into numbered scenes, and generates tagged image-prompt variants per
//! scene. Stage outputs are semi-structured model text; deterministic regex
//! parsing turns them into counts and, at the end, a scene-keyed structure
//! for the HTTP API.
//!
//! ## Core Concepts
//!
//! - **[`Agent`]** — a named persona: system instructions plus a model.
//!   Three stock agents ([`agent::text_rewriter`], [`agent::scene_breaker`],
//!   [`agent::image_prompt_generator`]) drive the pipeline.
//! - **[`LlmCtx`]** — shared transport context (HTTP client, endpoint,
//!   backend), built once at startup.
//! - **[`Backend`]** — object-safe provider trait. [`OllamaBackend`] is the
//!   default; [`MockBackend`] scripts deterministic replies for tests.
//! - **[`TextToImagePrompts`]** — the sequential three-stage workflow,
//!   assembled from explicitly provided agents.
//! - **[`format_prompts`]** — regroups the final stage's raw text into
//!   `scene_<N>` buckets for the API response.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sceneforge::{LlmCtx, TextToImagePrompts};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = LlmCtx::builder("http://localhost:11434").build();
//!     let workflow = TextToImagePrompts::with_model("llama3.2:3b");
//!
//!     let run = workflow.run(&ctx, "A storm rolled in over the harbor.").await?;
//!     let structured = sceneforge::format_prompts(
//!         &run.prompts.image_prompts_text,
//!         run.prompts.prompt_count,
//!     );
//!     println!("{}", serde_json::to_string_pretty(&structured)?);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod backend;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod llm_ctx;
pub mod parse;
pub mod stage;
pub mod stats;
pub mod workflow;

pub use agent::{Agent, DEFAULT_MODEL};
#[cfg(feature = "openai")]
pub use backend::OpenAiBackend;
pub use backend::{Backend, LlmConfig, LlmRequest, LlmResponse, MockBackend, OllamaBackend};
pub use config::AppConfig;
pub use error::{PipelineError, Result};
pub use format::{format_prompts, PromptEntry, StructuredPrompts};
pub use llm_ctx::{LlmCtx, LlmCtxBuilder};
pub use stage::{ImagePromptSet, RewriteResult, SceneBreakdown};
pub use workflow::{TextToImagePrompts, TextToImagePromptsBuilder, WorkflowRun};
