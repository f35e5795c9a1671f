//! Integration tests for the full extraction pipeline.
//!
//! These tests drive the whole flow with mock collaborators:
//! 1. Classify attachments from filenames
//! 2. Decode per branch
//! 3. Prompt + parse model replies
//! 4. Reduce and reconcile
//! 5. Merge into the final record

use shipdoc::testing::{MockAI, MockDecoder, MockTask};
use shipdoc::{Attachment, EmailEnvelope, Pipeline, PipelineConfig};

/// Helper to author a packing-list attachment; the mock decoder reads
/// spreadsheet bytes as a JSON array-of-rows.
fn pkl_attachment(filename: &str, rows_json: &str) -> Attachment {
    Attachment::new(
        filename,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        rows_json.as_bytes().to_vec(),
    )
}

fn bill_attachment(filename: &str, text: &str) -> Attachment {
    Attachment::new(filename, "application/pdf", text.as_bytes().to_vec())
}

#[tokio::test]
async fn test_full_email_produces_reconciled_record() {
    let ai = MockAI::new()
        .with_bill_reply(
            "Sure! ```json\n{\"container_numbers\":[\"MSKU1234567\",\"TGHU7654321\"]}\n```",
        )
        .with_packing_list_reply(
            r#"{
                "items": [
                    {"sku": "SNSFNWO5006NR2", "qty_expected": 82},
                    {"sku": "SNSFNWO5006NR3", "qty_expected": 31}
                ],
                "doc_total_qty_from_sheet": 113,
                "qty_sum": 113,
                "checksum_ok": true
            }"#,
        );

    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![
        bill_attachment("Bill_of_Lading.pdf", "containers MSKU1234567 TGHU7654321"),
        Attachment::new("CI 20240917.xlsx", "application/vnd.ms-excel", b"ignored".to_vec()),
        pkl_attachment(
            "PKL-0042.xlsx",
            r#"[["SKU","QTY"],["SNSFNWO5006NR2",82],["SNSFNWO5006NR3",31],["Total",113]]"#,
        ),
        Attachment::new("photo.jpg", "image/jpeg", b"ignored".to_vec()),
    ];

    let email = EmailEnvelope::new("Shipment 4471", "ops@example.com", "2026-08-01");
    let record = pipeline.process_email(attachments, Some(email.clone())).await;

    assert_eq!(record.container_numbers, vec!["MSKU1234567", "TGHU7654321"]);
    assert_eq!(record.sku_items.len(), 2);
    assert_eq!(record.sku_items[0].sku, "SNSFNWO5006NR2");
    assert_eq!(record.checksum.qty_sum, 113.0);
    assert_eq!(record.checksum.checksum_ok, Some(true));
    assert_eq!(record.email, Some(email));
    assert!(!record.prompt_version.is_empty());
}

#[tokio::test]
async fn test_unrelated_attachments_generate_no_calls() {
    let ai = MockAI::new();
    let ai_handle = ai.clone();
    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![
        Attachment::new("CI 20240917.xlsx", "application/vnd.ms-excel", b"x".to_vec()),
        Attachment::new("notes.txt", "text/plain", b"x".to_vec()),
    ];

    let record = pipeline.process_email(attachments, None).await;

    assert!(record.container_numbers.is_empty());
    assert!(record.sku_items.is_empty());
    // neither the commercial invoice nor the unknown file reached the model
    assert!(ai_handle.calls().is_empty());
}

#[tokio::test]
async fn test_container_numbers_dedup_across_bills() {
    let ai = MockAI::new()
        .with_bill_reply(r#"{"container_numbers": ["MSKU1234567", "TGHU7654321"]}"#)
        .with_bill_reply(r#"{"container_numbers": ["MSKU1234567", "OOLU0001111"]}"#);

    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![
        bill_attachment("bill-page-1.pdf", "page one"),
        bill_attachment("bill-page-2.pdf", "page two"),
    ];

    let record = pipeline.process_email(attachments, None).await;

    assert_eq!(record.container_numbers.len(), 3);
    assert!(record.container_numbers.contains(&"MSKU1234567".to_string()));
    assert!(record.container_numbers.contains(&"TGHU7654321".to_string()));
    assert!(record.container_numbers.contains(&"OOLU0001111".to_string()));
}

#[tokio::test]
async fn test_decode_failure_does_not_abort_siblings() {
    let ai = MockAI::new()
        .with_bill_reply(r#"{"container_numbers": ["MSKU1234567"]}"#);

    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![
        // empty bytes make the mock decoder fail this attachment
        bill_attachment("broken_bill.pdf", ""),
        bill_attachment("bill.pdf", "container MSKU1234567"),
    ];

    let record = pipeline.process_email(attachments, None).await;

    assert_eq!(record.container_numbers, vec!["MSKU1234567"]);
}

#[tokio::test]
async fn test_unparseable_reply_degrades_to_empty() {
    let ai = MockAI::new().with_packing_list_reply("I could not read this sheet, sorry.");
    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![pkl_attachment("packing list.xlsx", r#"[["SKU","QTY"]]"#)];
    let record = pipeline.process_email(attachments, None).await;

    assert!(record.sku_items.is_empty());
    assert_eq!(record.checksum.qty_sum, 0.0);
    assert_eq!(record.checksum.checksum_ok, None);
}

#[tokio::test]
async fn test_bill_only_email_still_merges() {
    // the packing-list branch has zero attachments and must complete
    // immediately with an empty result, not block the join
    let ai = MockAI::new().with_bill_reply(r#"{"container_numbers": ["MSKU1234567"]}"#);
    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![
        bill_attachment("bol-1.pdf", "a"),
        bill_attachment("bol-2.pdf", "b"),
    ];

    let record = pipeline.process_email(attachments, None).await;

    assert_eq!(record.container_numbers, vec!["MSKU1234567"]);
    assert!(record.sku_items.is_empty());
    assert_eq!(record.checksum.checksum_ok, None);
}

#[tokio::test]
async fn test_checksum_mismatch_is_propagated_not_fixed() {
    let ai = MockAI::new().with_packing_list_reply(
        r#"{
            "items": [{"sku": "A", "qty_expected": 50}, {"sku": "B", "qty_expected": 63}],
            "doc_total_qty_from_sheet": 100,
            "qty_sum": 100,
            "checksum_ok": true
        }"#,
    );
    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![pkl_attachment("pkl.xlsx", r#"[["SKU","QTY"]]"#)];
    let record = pipeline.process_email(attachments, None).await;

    // the model claimed its sum matched; the recomputed one does not
    assert_eq!(record.checksum.qty_sum, 113.0);
    assert_eq!(record.checksum.doc_total_qty, Some(100.0));
    assert_eq!(record.checksum.checksum_ok, Some(false));
    assert_eq!(record.checksum.llm_checksum_ok, Some(true));
}

#[tokio::test]
async fn test_non_numeric_quantity_keeps_line() {
    let ai = MockAI::new().with_packing_list_reply(
        r#"{"items": [{"sku": "C", "qty_expected": "N/A"}, {"sku": "D", "qty_expected": 7}]}"#,
    );
    let pipeline = Pipeline::new(MockDecoder::new(), ai);

    let attachments = vec![pkl_attachment("pkl.xlsx", r#"[["SKU","QTY"]]"#)];
    let record = pipeline.process_email(attachments, None).await;

    assert_eq!(record.sku_items.len(), 2);
    assert_eq!(record.sku_items[0].qty_expected, 0.0);
    assert_eq!(record.checksum.qty_sum, 7.0);
}

#[tokio::test]
async fn test_custom_config_tags_record() {
    let config = PipelineConfig::new().with_prompt_version("2026-02-01-03");
    let pipeline = Pipeline::with_config(MockDecoder::new(), MockAI::new(), config);

    let record = pipeline.process_email(vec![], None).await;

    assert_eq!(record.prompt_version, "2026-02-01-03");
}

#[tokio::test]
async fn test_fan_out_issues_one_call_per_extracted_attachment() {
    let ai = MockAI::new();
    let decoder = MockDecoder::new();
    let ai_handle = ai.clone();
    let decoder_handle = decoder.clone();

    let attachments = vec![
        bill_attachment("bill.pdf", "text"),
        pkl_attachment("pkl.xlsx", r#"[["SKU"]]"#),
        pkl_attachment("packing-2.xlsx", r#"[["SKU"]]"#),
        Attachment::new("photo.jpg", "image/jpeg", b"x".to_vec()),
    ];

    let pipeline = Pipeline::new(decoder, ai);
    let _record = pipeline.process_email(attachments, None).await;

    assert_eq!(ai_handle.call_count(MockTask::Bill), 1);
    assert_eq!(ai_handle.call_count(MockTask::PackingList), 2);
    assert_eq!(decoder_handle.calls().len(), 3);
}
