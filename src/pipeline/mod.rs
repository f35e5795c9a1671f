//! Extraction pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Attachment classification from filenames
//! - Prompt construction for the two extraction tasks
//! - Tolerant parsing of raw model replies
//! - Per-branch reduction with independent checksum reconciliation
//! - The final merge of both branches into one record

pub mod classify;
pub mod merge;
pub mod parse;
pub mod prompts;
pub mod reduce;
pub mod runner;

pub use classify::classify;
pub use merge::merge;
pub use parse::{extract_json, parse_bill_reply, parse_packing_list_reply, ModelReply};
pub use prompts::{
    bill_prompt_hash, build_bill_prompt, build_packing_list_prompt, packing_list_prompt_hash,
    BILL_SYSTEM_PROMPT, PKL_SYSTEM_PROMPT,
};
pub use reduce::{reduce_bill_results, reduce_packing_list, BillSummary};
pub use runner::Pipeline;
