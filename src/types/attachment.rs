//! Email attachments and their classification labels.

use serde::{Deserialize, Serialize};

/// The document class an attachment is filed under.
///
/// Only `Bill` and `PackagingList` reach extraction; `CommercialInvoice`
/// and `Unknown` attachments are filtered out before either branch and
/// produce no downstream artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    /// Bill of lading (PDF) - names the containers in a shipment
    Bill,

    /// Commercial invoice (XLSX) - handled outside this pipeline
    CommercialInvoice,

    /// Packing list (XLSX) - SKUs and quantities shipped
    PackagingList,

    /// No classification rule matched
    Unknown,
}

impl AttachmentType {
    /// Whether this attachment type is extracted by one of the two branches.
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Bill | Self::PackagingList)
    }
}

/// A downloaded email attachment, as handed over by the mail collaborator.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Original filename from the mail client
    pub filename: String,

    /// MIME type reported by the mail client
    pub mime_type: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create a new attachment.
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// An attachment plus the label the classifier assigned to it.
///
/// Produced once per inbound file and immutable afterwards; consumed by
/// exactly one branch or dropped.
#[derive(Debug, Clone)]
pub struct ClassifiedAttachment {
    /// The underlying attachment
    pub attachment: Attachment,

    /// The classifier's verdict
    pub kind: AttachmentType,
}

/// Metadata of the email an attachment set came from.
///
/// Echoed on the final record so downstream consumers can tie a record
/// back to its source mail without re-querying the mailbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailEnvelope {
    /// Subject line
    #[serde(default)]
    pub subject: String,

    /// Sender address
    #[serde(default)]
    pub from: String,

    /// Date header, as the mail client rendered it
    #[serde(default)]
    pub date: String,
}

impl EmailEnvelope {
    /// Create a new envelope.
    pub fn new(
        subject: impl Into<String>,
        from: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            from: from.into(),
            date: date.into(),
        }
    }
}
