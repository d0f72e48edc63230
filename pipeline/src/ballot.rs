// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Ballot-selection state machine.
//!
//! Enforces the one-candidate-per-position invariant, tracks
//! completion, renders the review summary and drives fire-once
//! submission. The controller owns the selection set exclusively;
//! selections are mutated only through [`BallotInput`]s, which the
//! platform serializes.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::elections::{Candidate, Position};
use crate::fingerprint::DeviceFingerprint;
use crate::payloads::{BallotPayload, CandidateRef, RESULTS_DESTINATION};

/// One recorded choice for a contested position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotSelection {
    /// The contested position.
    pub position: Position,

    /// Backend identifier of the chosen candidate.
    pub candidate_id: String,

    /// Display name of the chosen candidate.
    pub candidate_name: String,
}

/**
 * The stages of the ballot flow.
 *
 * `Reviewable` is re-derived from completeness after every selection
 * change: losing completeness returns the ballot to `Selecting`.
 * `Submitting` is fire-once; the only stages reachable from it are
 * `Submitted` and, on a failed submission, `Reviewable` with the
 * selection set intact.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallotStage {
    /// Selections incomplete; review disabled.
    Selecting,

    /// Every position selected; review and submission enabled.
    Reviewable,

    /// Submission in flight; the submit affordance is disabled.
    Submitting,

    /// The vote was accepted; terminal.
    Submitted,
}

/// Inputs the rendering adapter feeds into the controller.
#[derive(Debug, Clone)]
pub enum BallotInput {
    /// The voter picked a candidate card for a position.
    SelectCandidate {
        position: Position,
        candidate: Candidate,
    },

    /// The voter asked for the review summary.
    ShowConfirmation,

    /**
     * The voter confirmed the reviewed ballot. The fingerprint and
     * anti-forgery token are read from wherever the page staged them.
     */
    ConfirmVote {
        fingerprint: DeviceFingerprint,
        csrf_token: String,
    },

    /// The awaited submission resolved.
    SubmissionResolved(Result<(), String>),
}

/// Effects for the rendering adapter to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum BallotOutput {
    /// A selection was recorded; update the cards and affordances.
    SelectionRecorded {
        completion_count: usize,
        review_enabled: bool,
    },

    /// Render the review summary, ordered by ballot order.
    Confirmation(Vec<BallotSelection>),

    /// Disable submit and perform the submission.
    Submit(BallotPayload),

    /// Navigate to the results destination.
    Navigate { destination: &'static str },

    /// Submission failed; selections are retained, invite a retry.
    RetrySubmission { message: String },

    /// The input is not valid in the current stage; no state changed.
    Ignored,
}

/**
 * State of the ballot controller.
 *
 * Constructed per ballot view and passed explicitly to the driver;
 * there is no process-wide instance.
 */
#[derive(Debug, Default)]
pub struct BallotController {
    selections: BTreeMap<Position, BallotSelection>,
    submission: SubmissionState,
}

/// Sub-state tracking the fire-once submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SubmissionState {
    #[default]
    NotSubmitted,
    InFlight,
    Accepted,
}

impl BallotController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions with a recorded selection.
    pub fn completion_count(&self) -> usize {
        self.selections.len()
    }

    /**
     * Pure predicate: true iff every required position has a
     * selection. Never mutates the selection set.
     */
    pub fn validate_ballot(&self) -> bool {
        Position::iter().all(|position| self.selections.contains_key(&position))
    }

    /// The current stage, derived from completeness and submission state.
    pub fn stage(&self) -> BallotStage {
        match self.submission {
            SubmissionState::Accepted => BallotStage::Submitted,
            SubmissionState::InFlight => BallotStage::Submitting,
            SubmissionState::NotSubmitted => {
                if self.validate_ballot() {
                    BallotStage::Reviewable
                } else {
                    BallotStage::Selecting
                }
            }
        }
    }

    /// The recorded selection for a position, if any.
    pub fn selection(&self, position: Position) -> Option<&BallotSelection> {
        self.selections.get(&position)
    }

    /// Processes one input and returns the effect to render.
    pub fn process_input(&mut self, input: BallotInput) -> BallotOutput {
        match (self.stage(), input) {
            (
                BallotStage::Selecting | BallotStage::Reviewable,
                BallotInput::SelectCandidate {
                    position,
                    candidate,
                },
            ) => {
                // At most one selection per position: a new pick for
                // the same position supersedes, never accumulates.
                // Re-picking the same candidate is idempotent.
                self.selections.insert(
                    position,
                    BallotSelection {
                        position,
                        candidate_id: candidate.id,
                        candidate_name: candidate.name,
                    },
                );

                BallotOutput::SelectionRecorded {
                    completion_count: self.completion_count(),
                    review_enabled: self.validate_ballot(),
                }
            }

            (BallotStage::Reviewable, BallotInput::ShowConfirmation) => {
                BallotOutput::Confirmation(self.ordered_summary())
            }

            (
                BallotStage::Reviewable,
                BallotInput::ConfirmVote {
                    fingerprint,
                    csrf_token,
                },
            ) => {
                // Fire-once: entering Submitting closes the path back
                // to Selecting and disables the submit affordance.
                self.submission = SubmissionState::InFlight;

                BallotOutput::Submit(BallotPayload {
                    selections: self
                        .selections
                        .iter()
                        .map(|(position, selection)| {
                            (
                                *position,
                                CandidateRef {
                                    id: selection.candidate_id.clone(),
                                    name: selection.candidate_name.clone(),
                                },
                            )
                        })
                        .collect(),
                    fingerprint: fingerprint.as_str().to_string(),
                    csrf_token,
                })
            }

            (BallotStage::Submitting, BallotInput::SubmissionResolved(Ok(()))) => {
                self.submission = SubmissionState::Accepted;
                tracing::debug!("ballot accepted");

                BallotOutput::Navigate {
                    destination: RESULTS_DESTINATION,
                }
            }

            (BallotStage::Submitting, BallotInput::SubmissionResolved(Err(message))) => {
                // Selections are retained so a retry does not force
                // re-selection.
                self.submission = SubmissionState::NotSubmitted;
                tracing::warn!(%message, "ballot submission failed");

                BallotOutput::RetrySubmission { message }
            }

            // Defensive no-op: the submit affordance should make an
            // incomplete ConfirmVote unreachable, and nothing may
            // mutate a ballot once submission started.
            _ => BallotOutput::Ignored,
        }
    }

    /// The review summary in ballot order.
    fn ordered_summary(&self) -> Vec<BallotSelection> {
        Position::iter()
            .filter_map(|position| self.selections.get(&position).cloned())
            .collect()
    }
}
