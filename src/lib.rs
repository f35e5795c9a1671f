//! Shipment-Document Extraction Library
//!
//! Classifies the attachments of an inbound shipment email, extracts
//! container numbers from bill-of-lading PDFs and SKU/quantity lines
//! from packing-list spreadsheets via a language model, and reconciles
//! an independently recomputed quantity checksum against the
//! document-stated total.
//!
//! # Design Philosophy
//!
//! **"Never trust the model's arithmetic"**
//!
//! - The model reads documents; the library does the bookkeeping
//! - Replies are parsed tolerantly (prose and code fences are fine)
//! - Every failure is scoped to one attachment - a run never aborts
//! - The checksum is recomputed locally and auditable, with the model's
//!   self-reported sum carried alongside for comparison
//!
//! # Usage
//!
//! ```rust,ignore
//! use shipdoc::{Attachment, Pipeline};
//! use shipdoc::testing::{MockAI, MockDecoder};
//!
//! let pipeline = Pipeline::new(MockDecoder::new(), MockAI::new());
//!
//! let attachments = vec![
//!     Attachment::new("Bill_of_Lading.pdf", "application/pdf", pdf_bytes),
//!     Attachment::new("PKL-0042.xlsx", "application/vnd.ms-excel", xlsx_bytes),
//! ];
//!
//! let record = pipeline.process_email(attachments, None).await;
//! println!("{} containers, checksum {:?}", record.container_numbers.len(), record.checksum.checksum_ok);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (AI, AttachmentDecoder)
//! - [`types`] - Attachment, content, and record types
//! - [`pipeline`] - Classify → prompt → parse → reduce → merge
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openrouter")]
pub mod ai;

// Re-export core types at crate root
pub use error::{DecodeError, ExtractionError};
pub use traits::{ai::AI, decoder::AttachmentDecoder};
pub use types::{
    attachment::{Attachment, AttachmentType, ClassifiedAttachment, EmailEnvelope},
    config::PipelineConfig,
    content::{Cell, DecodedContent, ExtractionRequest, RowGrid},
    record::{
        BillExtractionResult, ChecksumReport, FinalRecord, PackingListExtractionResult, PklItem,
        ReconciledPackingList, SkuQuantity,
    },
};

// Re-export pipeline components
pub use pipeline::{
    // Core functions
    build_bill_prompt, build_packing_list_prompt, classify, extract_json, merge,
    parse_bill_reply, parse_packing_list_reply, reduce_bill_results, reduce_packing_list,
    // Prompt auditing
    bill_prompt_hash, packing_list_prompt_hash,
    // Aggregates
    BillSummary, ModelReply,
    // Orchestration
    Pipeline,
};

// Re-export security utilities
pub use security::SecretString;

#[cfg(feature = "openrouter")]
pub use ai::OpenRouter;

// Re-export testing utilities
pub use testing::{MockAI, MockDecoder};
