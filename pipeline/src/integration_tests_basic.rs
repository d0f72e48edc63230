// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Basic end-to-end test of the voter-integrity pipeline. Drives the
//! registration wizard, capture controller, fingerprint engine,
//! identity matcher, countdown gate and ballot controller through one
//! complete voting day against the headless platform implementations.

use chrono::NaiveDate;
use platform::clock::FixedClock;
use platform::environment::StaticEnvironment;
use platform::media::{StreamConstraints, SyntheticCamera};
use platform::store::MemoryStore;
use strum::IntoEnumIterator;

use crate::ballot::{BallotController, BallotInput, BallotOutput, BallotStage};
use crate::capture::CaptureController;
use crate::countdown::CountdownGate;
use crate::elections::{Candidate, ElectionSchedule, Phase, Position};
use crate::fingerprint::FingerprintEngine;
use crate::identity;
use crate::payloads::{DocumentExtraction, ExtractedIdentity};
use crate::registration::{FileUpload, RegistrationWizard, WizardInput, WizardOutput};

const VOTING_DAY: (i32, u32, u32) = (2026, 2, 14);

fn clock_at(h: u32, m: u32) -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(VOTING_DAY.0, VOTING_DAY.1, VOTING_DAY.2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap(),
    )
}

fn png_upload(name: &str) -> FileUpload {
    FileUpload {
        name: name.to_string(),
        mime: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G', 0, 0, 0, 0],
    }
}

#[test]
fn full_registration_and_voting_flow() {
    let env = StaticEnvironment::default();
    let clock = clock_at(9, 0);

    // One fingerprint engine per page context; the digest is reused
    // across the registration and ballot payloads.
    let mut engine = FingerprintEngine::new();
    let fingerprint = engine.fingerprint(&env, &clock).clone();
    assert!(!fingerprint.is_fallback());

    // --- Registration wizard: steps 1 and 2 (typed fields) ---
    let mut wizard = RegistrationWizard::new(MemoryStore::new());
    for (name, value) in [
        ("full_name", "John Doe"),
        ("id_number", "12345678"),
        ("phone_number", "0712345678"),
    ] {
        wizard.process_input(WizardInput::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    assert!(matches!(
        wizard.process_input(WizardInput::Next),
        WizardOutput::StepChanged { step: 2 }
    ));
    for (name, value) in [("email", "john@example.com"), ("county", "Nairobi")] {
        wizard.process_input(WizardInput::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    assert!(matches!(
        wizard.process_input(WizardInput::Next),
        WizardOutput::StepChanged { step: 3 }
    ));

    // --- Step 3: document uploads with local previews ---
    for field in ["id_front", "id_back"] {
        let output = wizard.process_input(WizardInput::FileSelected {
            field: field.to_string(),
            upload: png_upload(&format!("{field}.png")),
        });
        assert!(matches!(output, WizardOutput::FilePreview { .. }));
    }
    assert!(matches!(
        wizard.process_input(WizardInput::Next),
        WizardOutput::StepChanged { step: 4 }
    ));

    // --- Step 4: selfie via the capture controller ---
    let camera = SyntheticCamera::default();
    let mut capture = CaptureController::new();
    capture.start(&camera, &StreamConstraints::default()).unwrap();
    let mut selfie = None;
    capture.capture(|frame| selfie = Some(frame)).unwrap();
    let selfie = selfie.unwrap();
    assert!(!capture.is_previewing());

    wizard.process_input(WizardInput::FileSelected {
        field: "face_photo".to_string(),
        upload: FileUpload {
            name: "selfie.jpg".to_string(),
            mime: "image/jpeg".to_string(),
            bytes: selfie.jpeg.clone(),
        },
    });
    let fields = match wizard.process_input(WizardInput::Next) {
        WizardOutput::ReadyToSubmit { fields } => fields,
        other => panic!("expected ReadyToSubmit, got {other:?}"),
    };

    // The backend accepts the registration; the draft is cleared so a
    // later visit starts from scratch.
    assert_eq!(
        wizard.process_input(WizardInput::SubmissionAccepted),
        WizardOutput::DraftCleared
    );
    let fresh = RegistrationWizard::new(wizard.into_store());
    assert_eq!(fresh.current_step(), 1);
    assert!(fresh.field("full_name").is_none());

    // --- Identity matcher: advisory only ---
    let extraction = DocumentExtraction {
        success: true,
        extracted: Some(ExtractedIdentity {
            name: "JOHN DOE".to_string(),
            id_number: "12345678".to_string(),
            dob: "1990-01-01".to_string(),
        }),
    };
    let matches = identity::compare_extraction(
        fields.get("full_name").unwrap(),
        fields.get("id_number").unwrap(),
        &extraction,
    )
    .unwrap();
    assert!(matches.iter().all(|m| m.warning.is_none()));

    // --- Countdown gate: entry point opens with the voting window ---
    let schedule = ElectionSchedule::new(
        NaiveDate::from_ymd_opt(VOTING_DAY.0, VOTING_DAY.1, VOTING_DAY.2).unwrap(),
    );
    let mut gate = CountdownGate::new(schedule);
    assert!(!gate.tick(&clock_at(7, 0)).unwrap().entry_enabled);
    let view = gate.tick(&clock_at(9, 0)).unwrap();
    assert_eq!(view.phase, Phase::Open);
    assert!(view.entry_enabled);

    // --- Ballot: select, review, submit (with one failed attempt) ---
    let mut ballot = BallotController::new();
    for (index, position) in Position::iter().enumerate() {
        ballot.process_input(BallotInput::SelectCandidate {
            position,
            candidate: Candidate {
                id: format!("c-{index}"),
                name: format!("Candidate {index}"),
            },
        });
    }
    assert!(ballot.validate_ballot());

    let summary = match ballot.process_input(BallotInput::ShowConfirmation) {
        BallotOutput::Confirmation(summary) => summary,
        other => panic!("expected Confirmation, got {other:?}"),
    };
    assert_eq!(summary.len(), Position::COUNT);

    let payload = match ballot.process_input(BallotInput::ConfirmVote {
        fingerprint: fingerprint.clone(),
        csrf_token: "csrf".to_string(),
    }) {
        BallotOutput::Submit(payload) => payload,
        other => panic!("expected Submit, got {other:?}"),
    };
    assert_eq!(payload.fingerprint, fingerprint.as_str());
    assert_eq!(payload.selections.len(), Position::COUNT);

    // First attempt fails; selections survive for the retry.
    ballot.process_input(BallotInput::SubmissionResolved(Err(
        "network unreachable".to_string()
    )));
    assert_eq!(ballot.stage(), BallotStage::Reviewable);

    let retry = ballot.process_input(BallotInput::ConfirmVote {
        fingerprint: fingerprint.clone(),
        csrf_token: "csrf".to_string(),
    });
    assert!(matches!(retry, BallotOutput::Submit(_)));
    assert_eq!(
        ballot.process_input(BallotInput::SubmissionResolved(Ok(()))),
        BallotOutput::Navigate {
            destination: crate::payloads::RESULTS_DESTINATION
        }
    );
    assert_eq!(ballot.stage(), BallotStage::Submitted);

    // --- Gate closes and latches after the voting window ---
    let view = gate.tick(&clock_at(18, 0)).unwrap();
    assert_eq!(view.phase, Phase::Closed);
    gate.stop();
    assert_eq!(gate.tick(&clock_at(18, 1)), None);
}

#[test]
fn reload_mid_wizard_resumes_from_the_persisted_draft() {
    let mut wizard = RegistrationWizard::new(MemoryStore::new());
    for (name, value) in [
        ("full_name", "Mary Atieno"),
        ("id_number", "87654321"),
        ("phone_number", "0101234567"),
    ] {
        wizard.process_input(WizardInput::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    wizard.process_input(WizardInput::Next);

    // Reconstruct against the same persisted store, as a reload does.
    let resumed = RegistrationWizard::new(wizard.into_store());

    assert_eq!(resumed.current_step(), 2);
    assert_eq!(resumed.field("full_name"), Some("Mary Atieno"));
    assert_eq!(resumed.field("id_number"), Some("87654321"));
    assert_eq!(resumed.field("phone_number"), Some("0101234567"));
}

#[test]
fn fallback_fingerprint_still_flows_into_the_ballot_payload() {
    let env = StaticEnvironment {
        deny_collection: true,
        ..StaticEnvironment::default()
    };
    let clock = clock_at(9, 0);
    let mut engine = FingerprintEngine::new();
    let fingerprint = engine.fingerprint(&env, &clock).clone();
    assert!(fingerprint.is_fallback());

    let mut ballot = BallotController::new();
    for (index, position) in Position::iter().enumerate() {
        ballot.process_input(BallotInput::SelectCandidate {
            position,
            candidate: Candidate {
                id: format!("c-{index}"),
                name: format!("Candidate {index}"),
            },
        });
    }

    let payload = match ballot.process_input(BallotInput::ConfirmVote {
        fingerprint: fingerprint.clone(),
        csrf_token: "csrf".to_string(),
    }) {
        BallotOutput::Submit(payload) => payload,
        other => panic!("expected Submit, got {other:?}"),
    };

    // The low-entropy sentinel is handed over as-is; the backend
    // branches on it server-side.
    assert_eq!(payload.fingerprint, fingerprint.as_str());
}
