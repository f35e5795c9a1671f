//! Filename-based attachment classification.
//!
//! Classification is a pure function of the filename: whole-word matches
//! against a prioritized rule table, first match wins. Word boundaries
//! are mandatory - "responsible_report.pdf" contains the letters of
//! "bill" but names no bill, so naive substring containment would
//! misroute it. Underscores, spaces, dots and dashes all separate words;
//! letters and digits do not.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::attachment::AttachmentType;

/// One classification rule: any of `words` as a whole word in the
/// filename, plus the required extension.
struct Rule {
    words: &'static [&'static str],
    extension: &'static str,
    label: AttachmentType,
}

/// Rule priority is table order; the first matching rule wins.
static RULES: &[Rule] = &[
    Rule {
        words: &["bill", "bol"],
        extension: ".pdf",
        label: AttachmentType::Bill,
    },
    Rule {
        words: &["ci"],
        extension: ".xlsx",
        label: AttachmentType::CommercialInvoice,
    },
    Rule {
        words: &["pkl", "pack", "packing"],
        extension: ".xlsx",
        label: AttachmentType::PackagingList,
    },
];

/// One compiled pattern per rule word, in rule order.
static WORD_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    RULES
        .iter()
        .flat_map(|rule| rule.words.iter().copied())
        .map(|word| (word, word_pattern(word)))
        .collect()
});

/// Compile a case-insensitive whole-word pattern.
///
/// Alphanumerics are word characters; anything else (underscore
/// included) is a separator, so "Bill_of_Lading" matches "bill" while
/// "responsible" does not.
fn word_pattern(word: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)(^|[^a-z0-9]){}([^a-z0-9]|$)",
        regex::escape(word)
    ))
    .unwrap()
}

/// Whether `filename` contains `word` as a whole word.
fn contains_word(filename: &str, word: &str) -> bool {
    WORD_PATTERNS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, re)| re.is_match(filename))
        .unwrap_or(false)
}

/// Classify an attachment from its filename alone.
///
/// Pure and side-effect free. Filenames that match no rule come back as
/// [`AttachmentType::Unknown`]; the pipeline drops those silently rather
/// than treating them as an error.
pub fn classify(filename: &str) -> AttachmentType {
    let lowered = filename.to_ascii_lowercase();

    for rule in RULES {
        if lowered.ends_with(rule.extension)
            && rule.words.iter().any(|word| contains_word(filename, word))
        {
            return rule.label;
        }
    }

    AttachmentType::Unknown
}
