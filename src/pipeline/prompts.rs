//! LLM prompts for the two extraction tasks.
//!
//! Both prompts mandate JSON-only output. The packing-list prompt asks
//! the model to self-report a sum and a checksum flag; those fields are
//! informational only and the reducer recomputes both.

use sha2::{Digest, Sha256};

use crate::types::content::{ExtractionRequest, RowGrid};

/// System prompt for container-number extraction from bill-of-lading text.
pub const BILL_SYSTEM_PROMPT: &str = "You are an expert at extracting container numbers \
from shipping documents. Extract all container numbers from the provided text. \
Container numbers typically follow formats like ABCD1234567 or ABCD 123456 7. \
Return ONLY a JSON object with a 'container_numbers' array of strings.";

/// System prompt for SKU/quantity extraction from a packing-list grid.
pub const PKL_SYSTEM_PROMPT: &str = r#"You read packing lists exported from Excel. You are given one sheet as a JSON array of rows. Each row is an array of cells in order: [cell_0, cell_1, ...]. Some rows are headers, some are product lines, some are totals.

Your tasks:

1. Identify which column is the SKU column (codes like SNSFNWO5006NR2, usually alphanumeric, stable per product line).
2. Identify which column is the line quantity column (count of units for that SKU).
   - Prefer columns whose header contains QTY or QUANTITY.
   - Do not use weights, CBM, dimensions, or totals as quantity.
3. For each product row with a SKU, output one object with:
   - sku (string)
   - qty_expected (number, quantity for that SKU on that row)
4. If the sheet contains a "Total" row (cells like Total, TOTAL etc.), extract the document-level total quantity from the appropriate quantity column.
5. Compute the sum of all your qty_expected values.
6. Set checksum_ok = true if your sum equals the document-level total quantity (when present), otherwise false.

Return ONLY a JSON object with this shape:
{
  "items": [{"sku": "SNSFNWO5006NR2", "qty_expected": 82}, ...],
  "doc_total_qty_from_sheet": 113,
  "qty_sum": 113,
  "checksum_ok": true
}"#;

/// Framing line prepended to the packing-list user payload.
const PKL_USER_PREFIX: &str = "Here is the sheet as JSON array-of-rows:";

/// Build the prompt pair for a bill-of-lading extraction call.
///
/// The user payload is the decoded PDF text, unmodified.
pub fn build_bill_prompt(text: &str) -> ExtractionRequest {
    ExtractionRequest {
        system_prompt: BILL_SYSTEM_PROMPT.to_string(),
        user_payload: text.to_string(),
    }
}

/// Build the prompt pair for a packing-list extraction call.
///
/// The user payload is the grid serialized as a JSON array-of-arrays,
/// header row included; no columns are interpreted before the model
/// sees them.
pub fn build_packing_list_prompt(rows: &RowGrid) -> ExtractionRequest {
    ExtractionRequest {
        system_prompt: PKL_SYSTEM_PROMPT.to_string(),
        user_payload: format!("{}\n\n{}", PKL_USER_PREFIX, rows.to_json()),
    }
}

/// Hash of the bill system prompt, for auditing which prompt revision
/// produced a record.
pub fn bill_prompt_hash() -> String {
    prompt_hash(BILL_SYSTEM_PROMPT)
}

/// Hash of the packing-list system prompt.
pub fn packing_list_prompt_hash() -> String {
    prompt_hash(PKL_SYSTEM_PROMPT)
}

fn prompt_hash(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}
