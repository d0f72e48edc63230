// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! External interface shapes: the payloads this pipeline assembles for
//! the backend and the responses it consumes from it.
//!
//! Transport framing and response adjudication belong to the backend
//! collaborator; the pipeline only builds these structures and
//! interprets a success signal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::elections::Position;

/// Destination the ballot flow navigates to after a confirmed submission.
pub const RESULTS_DESTINATION: &str = "/voting/results";

/// A candidate reference as the backend expects it inside a ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRef {
    /// Backend identifier of the selected candidate.
    pub id: String,

    /// Display name, echoed for the audit trail.
    pub name: String,
}

/**
 * The ballot submission payload.
 *
 * `fingerprint` may be the low-entropy fallback identifier; the
 * backend treats that as "fingerprint unavailable" rather than a
 * device identity.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BallotPayload {
    /// One selected candidate per contested position.
    pub selections: BTreeMap<Position, CandidateRef>,

    /// Device fingerprint digest or its fallback sentinel.
    pub fingerprint: String,

    /// Anti-forgery token staged by the hosting page.
    pub csrf_token: String,
}

/**
 * The registration submission payload.
 *
 * Assembled by the driver from the wizard's validated fields, the
 * captured selfie and the device fingerprint.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    /// Validated field values, keyed by form control name.
    pub fields: BTreeMap<String, String>,

    /// Device fingerprint digest or its fallback sentinel.
    pub fingerprint: String,

    /// JPEG-encoded selfie captured during the wizard, hex-encoded.
    #[serde(with = "hex::serde")]
    pub selfie_jpeg: Vec<u8>,
}

/// Fields the document-extraction service pulled from an identity document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIdentity {
    /// Name as printed on the document.
    pub name: String,

    /// Document identity number.
    pub id_number: String,

    /// Date of birth as printed, uninterpreted.
    pub dob: String,
}

/**
 * Response of the external document-extraction service.
 *
 * On `success: false` the identity matcher is skipped and the driver
 * shows a generic retry message.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExtraction {
    /// Whether extraction produced usable fields.
    pub success: bool,

    /// The extracted fields, present when `success` is true.
    #[serde(default)]
    pub extracted: Option<ExtractedIdentity>,
}
