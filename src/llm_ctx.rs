//! Shared LLM transport context.
//!
//! [`LlmCtx`] carries the HTTP client, LLM backend, and endpoint. It is
//! constructed once at startup and shared by every agent call in every
//! pipeline run; it holds no per-request state.

use crate::backend::{Backend, OllamaBackend};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared transport context for agent generation calls.
///
/// # Example
///
/// ```
/// use sceneforge::LlmCtx;
///
/// let ctx = LlmCtx::builder("http://localhost:11434").build();
/// ```
#[derive(Clone)]
pub struct LlmCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL for the LLM provider (e.g. `http://localhost:11434`).
    pub base_url: String,
    /// LLM backend. Default: [`OllamaBackend`].
    pub backend: Arc<dyn Backend>,
}

impl LlmCtx {
    /// Create a new builder.
    pub fn builder(base_url: impl Into<String>) -> LlmCtxBuilder {
        LlmCtxBuilder {
            client: None,
            base_url: base_url.into(),
            backend: None,
            timeout: None,
        }
    }
}

impl std::fmt::Debug for LlmCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmCtx")
            .field("base_url", &self.base_url)
            .field("backend", &self.backend.name())
            .finish()
    }
}

/// Builder for [`LlmCtx`].
pub struct LlmCtxBuilder {
    client: Option<Client>,
    base_url: String,
    backend: Option<Arc<dyn Backend>>,
    timeout: Option<Duration>,
}

impl LlmCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the LLM backend. Default: [`OllamaBackend`].
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// If a custom `Client` is provided via `.client()`, this setting is
    /// ignored (the custom client's own timeout applies). This is the only
    /// timeout the pipeline imposes on generation calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the context.
    pub fn build(self) -> LlmCtx {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));
        let client = self.client.unwrap_or_else(|| {
            Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client")
        });
        LlmCtx {
            client,
            base_url: normalize_base_url(&self.base_url),
            backend: self.backend.unwrap_or_else(|| Arc::new(OllamaBackend)),
        }
    }
}

/// Strip known provider path suffixes from a base URL.
/// This prevents double-pathing when backends append their own paths.
/// e.g., "https://api.openai.com/v1" -> "https://api.openai.com"
/// e.g., "http://localhost:11434/api" -> "http://localhost:11434"
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    // Strip known suffixes (order matters -- longest first)
    for suffix in &[
        "/v1/chat/completions",
        "/v1/chat",
        "/v1",
        "/api/generate",
        "/api/chat",
        "/api",
    ] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    trimmed.to_string()
}
