//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the pipeline
//! without making real AI or file-format calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{DecodeError, DecodeResult, Result};
use crate::pipeline::prompts::BILL_SYSTEM_PROMPT;
use crate::traits::{ai::AI, decoder::AttachmentDecoder};
use crate::types::content::{ExtractionRequest, RowGrid};

/// A mock AI implementation for testing.
///
/// Replies are queued per extraction task and popped in call order;
/// when a queue runs dry the mock falls back to a minimal well-formed
/// reply. Every call is recorded for assertions. Clones share queues
/// and call history, so a test can keep one handle and move the other
/// into the pipeline.
#[derive(Clone, Default)]
pub struct MockAI {
    bill_replies: Arc<RwLock<VecDeque<String>>>,
    packing_list_replies: Arc<RwLock<VecDeque<String>>>,
    calls: Arc<RwLock<Vec<MockAICall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub struct MockAICall {
    /// Which extraction task the system prompt belonged to
    pub task: MockTask,

    /// The user payload the pipeline sent
    pub user_payload: String,
}

/// The extraction task a call targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockTask {
    /// Container-number extraction
    Bill,

    /// SKU/quantity extraction
    PackingList,
}

impl MockAI {
    /// Create a new mock AI with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw reply for the next bill extraction call.
    pub fn with_bill_reply(self, raw: impl Into<String>) -> Self {
        self.bill_replies.write().unwrap().push_back(raw.into());
        self
    }

    /// Queue a raw reply for the next packing-list extraction call.
    pub fn with_packing_list_reply(self, raw: impl Into<String>) -> Self {
        self.packing_list_replies
            .write()
            .unwrap()
            .push_back(raw.into());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of calls for one task.
    pub fn call_count(&self, task: MockTask) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| c.task == task)
            .count()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl AI for MockAI {
    async fn call(&self, request: &ExtractionRequest) -> Result<String> {
        let task = if request.system_prompt == BILL_SYSTEM_PROMPT {
            MockTask::Bill
        } else {
            MockTask::PackingList
        };

        self.calls.write().unwrap().push(MockAICall {
            task,
            user_payload: request.user_payload.clone(),
        });

        let queued = match task {
            MockTask::Bill => self.bill_replies.write().unwrap().pop_front(),
            MockTask::PackingList => self.packing_list_replies.write().unwrap().pop_front(),
        };

        Ok(queued.unwrap_or_else(|| match task {
            MockTask::Bill => r#"{"container_numbers": []}"#.to_string(),
            MockTask::PackingList => r#"{"items": []}"#.to_string(),
        }))
    }
}

/// A mock decoder for testing.
///
/// Treats PDF bytes as UTF-8 text and spreadsheet bytes as a JSON
/// array-of-rows, so tests can author attachment content inline. Empty
/// PDF bytes and malformed row JSON fail the decode, which is how tests
/// exercise the per-attachment failure path. Clones share call history.
#[derive(Clone, Default)]
pub struct MockDecoder {
    calls: Arc<RwLock<Vec<MockDecoderCall>>>,
}

/// Record of a call made to the mock decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDecoderCall {
    /// `decode_pdf_text` with this many input bytes
    PdfText { input_len: usize },

    /// `decode_spreadsheet_rows` with this many input bytes
    SpreadsheetRows { input_len: usize },
}

impl MockDecoder {
    /// Create a new mock decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockDecoderCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl AttachmentDecoder for MockDecoder {
    async fn decode_pdf_text(&self, bytes: &[u8]) -> DecodeResult<String> {
        self.calls
            .write()
            .unwrap()
            .push(MockDecoderCall::PdfText {
                input_len: bytes.len(),
            });

        if bytes.is_empty() {
            return Err(DecodeError::Pdf {
                reason: "empty attachment".to_string(),
            });
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    async fn decode_spreadsheet_rows(&self, bytes: &[u8]) -> DecodeResult<RowGrid> {
        self.calls
            .write()
            .unwrap()
            .push(MockDecoderCall::SpreadsheetRows {
                input_len: bytes.len(),
            });

        serde_json::from_slice(bytes).map_err(|e| DecodeError::Spreadsheet {
            reason: e.to_string(),
        })
    }
}
