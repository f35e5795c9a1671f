//! Decoder trait for file-format collaborators.

use async_trait::async_trait;

use crate::error::DecodeResult;
use crate::types::content::RowGrid;

/// File-format collaborators that turn attachment bytes into content the
/// prompt builder can use.
///
/// A decode failure is fatal for that attachment only - the pipeline
/// logs it and moves on without aborting siblings or the other branch.
#[async_trait]
pub trait AttachmentDecoder: Send + Sync {
    /// Extract plain text from a bill-of-lading PDF.
    async fn decode_pdf_text(&self, bytes: &[u8]) -> DecodeResult<String>;

    /// Extract the cell grid from a packing-list spreadsheet, header row
    /// included when the sheet has one.
    async fn decode_spreadsheet_rows(&self, bytes: &[u8]) -> DecodeResult<RowGrid>;
}
