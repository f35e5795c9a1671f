//! Per-email pipeline orchestration.
//!
//! One `process_email` call owns every piece of state for that email:
//! attachments are classified, the two extraction branches fan out over
//! their attachments concurrently, and the merge is a join barrier that
//! runs only after both branches complete - a branch with zero
//! attachments completes immediately with an empty result.
//!
//! Nothing here aborts the email. Decode failures, call failures, and
//! unparseable replies are soft failures scoped to one attachment; they
//! are logged and the attachment contributes nothing.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::pipeline::classify::classify;
use crate::pipeline::merge::merge;
use crate::pipeline::parse::{parse_bill_reply, parse_packing_list_reply};
use crate::pipeline::prompts::{build_bill_prompt, build_packing_list_prompt};
use crate::pipeline::reduce::{reduce_bill_results, reduce_packing_list};
use crate::traits::{ai::AI, decoder::AttachmentDecoder};
use crate::types::attachment::{Attachment, AttachmentType, ClassifiedAttachment, EmailEnvelope};
use crate::types::config::PipelineConfig;
use crate::types::record::{BillExtractionResult, FinalRecord, PackingListExtractionResult};

/// The classification → extraction → reconciliation pipeline for one
/// email's attachments.
///
/// # Example
///
/// ```rust,ignore
/// use shipdoc::{Pipeline, Attachment};
/// use shipdoc::testing::{MockAI, MockDecoder};
///
/// let pipeline = Pipeline::new(MockDecoder::new(), MockAI::new());
/// let record = pipeline
///     .process_email(vec![Attachment::new("bill.pdf", "application/pdf", b"...".to_vec())], None)
///     .await;
/// ```
pub struct Pipeline<D: AttachmentDecoder, A: AI> {
    decoder: D,
    ai: A,
    config: PipelineConfig,
}

impl<D: AttachmentDecoder, A: AI> Pipeline<D, A> {
    /// Create a pipeline with default configuration.
    pub fn new(decoder: D, ai: A) -> Self {
        Self {
            decoder,
            ai,
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(decoder: D, ai: A, config: PipelineConfig) -> Self {
        Self {
            decoder,
            ai,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline over one email's attachments.
    ///
    /// Never fails: every per-attachment problem degrades that
    /// attachment's contribution to nothing, and an email with no
    /// usable attachments produces a record with empty sequences.
    pub async fn process_email(
        &self,
        attachments: Vec<Attachment>,
        email: Option<EmailEnvelope>,
    ) -> FinalRecord {
        let classified: Vec<ClassifiedAttachment> = attachments
            .into_iter()
            .map(|attachment| {
                let kind = classify(&attachment.filename);
                debug!(filename = %attachment.filename, kind = ?kind, "classified attachment");
                ClassifiedAttachment { attachment, kind }
            })
            .collect();

        let mut bills = Vec::new();
        let mut packing_lists = Vec::new();
        for item in classified {
            match item.kind {
                AttachmentType::Bill => bills.push(item.attachment),
                AttachmentType::PackagingList => packing_lists.push(item.attachment),
                AttachmentType::CommercialInvoice | AttachmentType::Unknown => {
                    debug!(
                        filename = %item.attachment.filename,
                        kind = ?item.kind,
                        "attachment not extracted, dropping"
                    );
                }
            }
        }

        // both branches run concurrently; the merge below is the join
        // barrier and waits for both, empty branches included
        let (bill_replies, pkl_replies) = futures::join!(
            self.run_bill_branch(&bills),
            self.run_packing_list_branch(&packing_lists),
        );

        let bill = reduce_bill_results(&bill_replies);
        let pkl = reduce_packing_list(&pkl_replies);

        info!(
            containers = bill.container_numbers.len(),
            sku_lines = pkl.pkl_items.len(),
            qty_sum = pkl.qty_sum,
            checksum_ok = ?pkl.checksum_ok,
            "email processed"
        );

        let mut record = merge(bill, pkl).with_prompt_version(&self.config.prompt_version);
        if let Some(envelope) = email {
            record = record.with_email(envelope);
        }
        record
    }

    async fn run_bill_branch(
        &self,
        attachments: &[Attachment],
    ) -> Vec<Option<BillExtractionResult>> {
        join_all(attachments.iter().map(|a| self.extract_bill(a))).await
    }

    async fn run_packing_list_branch(
        &self,
        attachments: &[Attachment],
    ) -> Vec<Option<PackingListExtractionResult>> {
        join_all(attachments.iter().map(|a| self.extract_packing_list(a))).await
    }

    /// Decode, prompt, and parse one bill attachment.
    async fn extract_bill(&self, attachment: &Attachment) -> Option<BillExtractionResult> {
        let text = match self.decoder.decode_pdf_text(&attachment.bytes).await {
            Ok(text) => text,
            Err(e) => {
                warn!(filename = %attachment.filename, error = %e, "PDF decode failed, skipping attachment");
                return None;
            }
        };

        let request = build_bill_prompt(&text);
        let raw = match self.ai.call(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(filename = %attachment.filename, error = %e, "bill extraction call failed");
                return None;
            }
        };

        let parsed = parse_bill_reply(&raw);
        if parsed.is_none() {
            warn!(filename = %attachment.filename, "unparseable bill reply, contributing nothing");
        }
        parsed
    }

    /// Decode, prompt, and parse one packing-list attachment.
    async fn extract_packing_list(
        &self,
        attachment: &Attachment,
    ) -> Option<PackingListExtractionResult> {
        let rows = match self.decoder.decode_spreadsheet_rows(&attachment.bytes).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(filename = %attachment.filename, error = %e, "spreadsheet decode failed, skipping attachment");
                return None;
            }
        };

        let request = build_packing_list_prompt(&rows);
        let raw = match self.ai.call(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(filename = %attachment.filename, error = %e, "packing-list extraction call failed");
                return None;
            }
        };

        let parsed = parse_packing_list_reply(&raw);
        if parsed.is_none() {
            warn!(filename = %attachment.filename, "unparseable packing-list reply, contributing nothing");
        }
        parsed
    }
}
