//! AI trait for LLM extraction calls.
//!
//! The pipeline supplies a system prompt and a user payload and consumes
//! a raw text reply; everything about the transport is the implementor's
//! concern.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::content::ExtractionRequest;

/// LLM collaborator for document extraction.
///
/// Implementations wrap a specific provider (OpenRouter, OpenAI, etc.)
/// and own transport policy: auth, retries, rate limits, timeouts. The
/// pipeline issues calls concurrently across attachments; implementations
/// that need to throttle do so internally.
#[async_trait]
pub trait AI: Send + Sync {
    /// Send one extraction request and return the raw model text.
    ///
    /// No structural guarantee on the reply beyond "attempted JSON,
    /// possibly wrapped in prose or code fences". The caller parses
    /// tolerantly and treats an unusable reply as a soft failure.
    async fn call(&self, request: &ExtractionRequest) -> Result<String>;
}
