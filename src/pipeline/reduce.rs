//! Per-branch reducers: fold extraction replies into branch summaries.
//!
//! Each email run owns its accumulators; reducers are plain folds over
//! the branch's reply list with no state outside the call.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::types::record::{
    coerce_number, BillExtractionResult, PackingListExtractionResult, ReconciledPackingList,
    SkuQuantity,
};

/// Aggregated output of the bill branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillSummary {
    /// Deduplicated container numbers in first-seen order
    pub container_numbers: IndexSet<String>,
}

/// Union container numbers across all bill replies.
///
/// `None` replies (decode failure, call failure, unparseable text)
/// contribute nothing; partial failure is tolerated per attachment, not
/// fatal to the run. Feeding the same reply twice yields the same set as
/// feeding it once.
pub fn reduce_bill_results(results: &[Option<BillExtractionResult>]) -> BillSummary {
    let mut container_numbers = IndexSet::new();

    for result in results.iter().flatten() {
        for number in &result.container_numbers {
            container_numbers.insert(number.clone());
        }
    }

    BillSummary { container_numbers }
}

/// Concatenate packing-list lines across replies and recompute the
/// quantity checksum.
///
/// Lines are kept in reply order and never merged by SKU: the same SKU
/// on two rows stays two lines, both counting toward the sum. The
/// model's own `qty_sum`/`checksum_ok` are carried through untouched and
/// the reconciliation below never reads them - a stated total is only
/// ever compared against the sum recomputed here.
pub fn reduce_packing_list(
    results: &[Option<PackingListExtractionResult>],
) -> ReconciledPackingList {
    let mut pkl_items = Vec::new();
    let mut doc_total_qty = None;
    let mut llm_reported_sum = None;
    let mut llm_checksum_ok = None;

    for result in results.iter().flatten() {
        pkl_items.extend(result.items.iter().map(|item| SkuQuantity {
            sku: item.sku.clone(),
            // non-numeric quantities degrade the checksum, never the line count
            qty_expected: coerce_number(&item.qty_expected).unwrap_or(0.0),
        }));

        // last-write-wins; in practice only one reply carries these
        if let Some(total) = result.doc_total_qty_from_sheet {
            doc_total_qty = Some(total);
        }
        if let Some(sum) = result.qty_sum {
            llm_reported_sum = Some(sum);
        }
        if let Some(ok) = result.checksum_ok {
            llm_checksum_ok = Some(ok);
        }
    }

    let qty_sum: f64 = pkl_items.iter().map(|item| item.qty_expected).sum();
    let checksum_ok = doc_total_qty
        .filter(|total| total.is_finite())
        .map(|total| qty_sum == total);

    ReconciledPackingList {
        pkl_items,
        qty_sum,
        doc_total_qty,
        checksum_ok,
        llm_reported_sum,
        llm_checksum_ok,
    }
}
