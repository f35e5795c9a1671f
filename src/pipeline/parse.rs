//! Tolerant recovery of JSON from raw model replies.
//!
//! Models wrap their JSON in prose and code fences often enough that
//! strict parsing would throw away good extractions. The recovery here
//! is deliberately shallow: strip fence markers, slice from the first
//! `{` to the last `}`, then parse. Truncated or otherwise invalid JSON
//! is not repaired beyond that.

use serde_json::Value;

use crate::types::record::{BillExtractionResult, PackingListExtractionResult};

/// Outcome of reading a model reply as JSON.
///
/// A sum type rather than an `Option` alias so every consumer is forced
/// to handle the failure case explicitly. `Unparseable` is a recoverable
/// condition: the reply contributes nothing and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// The reply contained well-formed JSON
    Parsed(Value),

    /// Nothing parseable could be recovered
    Unparseable,
}

impl ModelReply {
    /// The parsed value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Unparseable => None,
        }
    }

    /// Whether the reply parsed.
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }
}

/// Recover a JSON value from a raw model reply.
///
/// Tolerates fenced code blocks and prose before/after the object. Never
/// returns an error: any parse failure is [`ModelReply::Unparseable`].
pub fn extract_json(raw: &str) -> ModelReply {
    let mut text = raw.trim();

    let stripped;
    if text.contains("```") {
        stripped = text.replace("```json", "").replace("```", "");
        text = stripped.trim();
    }

    let sliced;
    if !text.starts_with('{') {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if end > start {
                sliced = &text[start..=end];
                text = sliced;
            }
        }
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value) => ModelReply::Parsed(value),
        Err(_) => ModelReply::Unparseable,
    }
}

/// Parse a bill extraction reply into its typed result.
///
/// `None` covers both an unparseable reply and JSON whose shape does not
/// fit; either way the attachment contributes nothing.
pub fn parse_bill_reply(raw: &str) -> Option<BillExtractionResult> {
    extract_json(raw)
        .into_value()
        .and_then(|value| serde_json::from_value(value).ok())
}

/// Parse a packing-list extraction reply into its typed result.
pub fn parse_packing_list_reply(raw: &str) -> Option<PackingListExtractionResult> {
    extract_json(raw)
        .into_value()
        .and_then(|value| serde_json::from_value(value).ok())
}
