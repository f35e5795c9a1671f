//! Join the two branch outputs into the terminal record.

use chrono::Utc;
use uuid::Uuid;

use crate::pipeline::reduce::BillSummary;
use crate::types::record::{ChecksumReport, FinalRecord, ReconciledPackingList};

/// Combine the bill and packing-list branch outputs.
///
/// Pure combination: the branches are independent document types and no
/// reconciliation happens between them. A branch that saw no attachments
/// contributes an empty sequence - absence is not an error.
pub fn merge(bill: BillSummary, pkl: ReconciledPackingList) -> FinalRecord {
    let checksum = ChecksumReport::from(&pkl);

    FinalRecord {
        run_id: Uuid::new_v4(),
        extracted_at: Utc::now(),
        prompt_version: String::new(),
        email: None,
        container_numbers: bill.container_numbers.into_iter().collect(),
        sku_items: pkl.pkl_items,
        checksum,
    }
}
