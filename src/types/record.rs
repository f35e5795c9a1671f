//! Extraction results, the reconciled packing list, and the terminal
//! record of a pipeline run.
//!
//! Wire-facing reply types deserialize leniently: a field the model got
//! wrong degrades to its default instead of discarding the whole reply.
//! The one exception is an item's `qty_expected`, which is kept as the
//! raw JSON scalar so a malformed quantity can never drop the line - it
//! is coerced (non-numeric becomes zero) only when the reducer recomputes
//! the checksum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::types::attachment::EmailEnvelope;

/// Reply shape of a bill-of-lading extraction call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillExtractionResult {
    /// Container numbers found in the document text
    #[serde(default)]
    pub container_numbers: Vec<String>,
}

/// One SKU line as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PklItem {
    /// Stable alphanumeric product code
    pub sku: String,

    /// Line quantity, kept as the raw JSON scalar until reconciliation
    #[serde(default)]
    pub qty_expected: Value,
}

impl PklItem {
    /// Create an item with a numeric quantity.
    pub fn new(sku: impl Into<String>, qty_expected: f64) -> Self {
        Self {
            sku: sku.into(),
            qty_expected: Value::from(qty_expected),
        }
    }
}

/// Reply shape of a packing-list extraction call.
///
/// `qty_sum` and `checksum_ok` are what the model claims about its own
/// arithmetic. They are recorded verbatim and never trusted; the reducer
/// recomputes both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackingListExtractionResult {
    /// One entry per product row, in sheet order
    #[serde(default)]
    pub items: Vec<PklItem>,

    /// Document-level total from the sheet's Total row, if one was found
    #[serde(default, deserialize_with = "lenient_number")]
    pub doc_total_qty_from_sheet: Option<f64>,

    /// The model's self-reported sum over its items. Informational only.
    #[serde(default, deserialize_with = "lenient_number")]
    pub qty_sum: Option<f64>,

    /// The model's self-reported reconciliation verdict. Informational only.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub checksum_ok: Option<bool>,
}

/// A packing-list line after quantity coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuQuantity {
    /// Stable alphanumeric product code
    pub sku: String,

    /// Expected unit count for this line (zero if the model's value was
    /// not numeric)
    pub qty_expected: f64,
}

impl SkuQuantity {
    /// Create a line item.
    pub fn new(sku: impl Into<String>, qty_expected: f64) -> Self {
        Self {
            sku: sku.into(),
            qty_expected,
        }
    }
}

/// Packing-list lines with a locally recomputed checksum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciledPackingList {
    /// All lines across every packing-list reply, in order, duplicates
    /// kept as separate lines
    pub pkl_items: Vec<SkuQuantity>,

    /// Sum of `qty_expected` over `pkl_items`, recomputed here - never
    /// read from the model
    pub qty_sum: f64,

    /// Document-stated total, when one was found
    pub doc_total_qty: Option<f64>,

    /// `Some(qty_sum == doc_total_qty)` when the sheet stated a finite
    /// total; `None` when there was nothing to reconcile against
    pub checksum_ok: Option<bool>,

    /// The model's self-reported sum, carried for auditing
    pub llm_reported_sum: Option<f64>,

    /// The model's self-reported verdict, carried for auditing
    pub llm_checksum_ok: Option<bool>,
}

/// The reconciliation surface of a run, carried on the final record so a
/// reviewer can audit a mismatch without re-running the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecksumReport {
    /// Locally recomputed sum over `sku_items`
    pub qty_sum: f64,

    /// Document-stated total, when one was found
    pub doc_total_qty: Option<f64>,

    /// Reconciliation verdict; `None` means no total was stated
    pub checksum_ok: Option<bool>,

    /// The model's self-reported sum
    pub llm_reported_sum: Option<f64>,

    /// The model's self-reported verdict
    pub llm_checksum_ok: Option<bool>,
}

impl From<&ReconciledPackingList> for ChecksumReport {
    fn from(pkl: &ReconciledPackingList) -> Self {
        Self {
            qty_sum: pkl.qty_sum,
            doc_total_qty: pkl.doc_total_qty,
            checksum_ok: pkl.checksum_ok,
            llm_reported_sum: pkl.llm_reported_sum,
            llm_checksum_ok: pkl.llm_checksum_ok,
        }
    }
}

/// The terminal artifact of one email's pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalRecord {
    /// Unique id of this run
    pub run_id: Uuid,

    /// When the record was produced
    pub extracted_at: DateTime<Utc>,

    /// Prompt revision tag the run was configured with
    #[serde(default)]
    pub prompt_version: String,

    /// Source email metadata, when the caller supplied it
    pub email: Option<EmailEnvelope>,

    /// Deduplicated container numbers, insertion-ordered
    pub container_numbers: Vec<String>,

    /// Packing-list lines, duplicates kept as separate lines
    pub sku_items: Vec<SkuQuantity>,

    /// Quantity reconciliation outcome
    pub checksum: ChecksumReport,
}

impl FinalRecord {
    /// Attach source email metadata.
    pub fn with_email(mut self, email: EmailEnvelope) -> Self {
        self.email = Some(email);
        self
    }

    /// Tag the record with a prompt revision.
    pub fn with_prompt_version(mut self, version: impl Into<String>) -> Self {
        self.prompt_version = version.into();
        self
    }
}

/// Coerce a JSON scalar to a number the way the reconciliation expects:
/// numbers pass through, numeric strings parse, everything else is `None`.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}
