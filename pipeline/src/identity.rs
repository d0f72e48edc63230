// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Identity document matcher.
//!
//! Cross-checks the fields an external service extracted from a
//! presented identity document against what the voter typed into the
//! registration wizard. The result is advisory only: warnings are
//! rendered next to the fields, and nothing here ever blocks the
//! surrounding flow.

use crate::payloads::DocumentExtraction;

/// Name similarity below this emits a warning.
const NAME_WARNING_THRESHOLD: f64 = 0.8;

/**
 * Per-field comparison result.
 *
 * `similarity` is in [0, 1]; `warning` is a rendered annotation, or
 * `None` when the field looks consistent.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityMatch {
    /// Name of the compared field.
    pub field: String,

    /// Similarity score in [0, 1].
    pub similarity: f64,

    /// Advisory annotation, if the field looks inconsistent.
    pub warning: Option<String>,
}

/**
 * Compares entered registration data against extracted document fields.
 *
 * The similarity scoring is a coarse heuristic by contract, not an
 * edit distance: exact case-insensitive match scores 1.0, one string
 * containing the other scores 0.9, anything else a flat 0.5. This is
 * a known precision limitation of the scoring contract.
 */
pub fn compare(
    entered_name: &str,
    entered_id: &str,
    extracted_name: &str,
    extracted_id: &str,
) -> Vec<IdentityMatch> {
    let name_similarity = similarity(entered_name, extracted_name);
    let name_warning = (name_similarity < NAME_WARNING_THRESHOLD).then(|| {
        format!(
            "Name on document (\"{extracted_name}\") does not closely match \
             the registered name (\"{entered_name}\")"
        )
    });

    let ids_match = entered_id.trim() == extracted_id.trim();
    let id_warning = (!ids_match)
        .then(|| "ID number on document does not match the registered ID number".to_string());

    vec![
        IdentityMatch {
            field: "name".to_string(),
            similarity: name_similarity,
            warning: name_warning,
        },
        IdentityMatch {
            field: "id_number".to_string(),
            similarity: if ids_match { 1.0 } else { 0.0 },
            warning: id_warning,
        },
    ]
}

/**
 * Compares against a document-extraction response.
 *
 * Returns `None` when extraction failed; the driver shows a generic
 * retry message and skips the matcher path entirely.
 */
pub fn compare_extraction(
    entered_name: &str,
    entered_id: &str,
    extraction: &DocumentExtraction,
) -> Option<Vec<IdentityMatch>> {
    if !extraction.success {
        return None;
    }

    let extracted = extraction.extracted.as_ref()?;
    Some(compare(
        entered_name,
        entered_id,
        &extracted.name,
        &extracted.id_number,
    ))
}

/// Coarse string similarity: 1.0 exact (case-insensitive), 0.9
/// containment, 0.5 otherwise.
fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a == b {
        1.0
    } else if a.contains(&b) || b.contains(&a) {
        0.9
    } else {
        0.5
    }
}
