// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Registration wizard state machine.
//!
//! Drives the multi-step voter registration form: per-step validation,
//! persistence of in-progress answers to the session store, and
//! file-upload constraints. The wizard owns the draft and the store
//! exclusively; the rendering adapter feeds it [`WizardInput`]s and
//! projects the returned [`WizardOutput`]s onto the form.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use platform::store::DraftStore;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Store key of the persisted draft.
const DRAFT_KEY: &str = "agora.registration.draft";

/// Upload ceiling for image fields.
const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Number of wizard steps.
pub const STEP_COUNT: usize = 4;

/// RFC-lite email check: one `@`, something on both sides, a dot in
/// the domain part.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static pattern"));

/// National phone format after normalization: ten digits, `07` or `01`.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[17]\d{8}$").expect("static pattern"));

/// Validation applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; presence only.
    Text,

    /// RFC-lite email format.
    Email,

    /// Fixed national phone format.
    Phone,

    /// Image upload; presence means an accepted file was recorded.
    Image,
}

/// One form control within a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The control's `name` attribute; also the draft key.
    pub name: &'static str,

    /// Validation applied on step transition.
    pub kind: FieldKind,

    /// Whether `Next` requires a value.
    pub required: bool,
}

const fn field(name: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required,
    }
}

/// The fixed step layout: personal details, contact details, identity
/// documents, selfie confirmation.
pub const STEPS: [&[FieldSpec]; STEP_COUNT] = [
    &[
        field("full_name", FieldKind::Text, true),
        field("id_number", FieldKind::Text, true),
        field("phone_number", FieldKind::Phone, true),
    ],
    &[
        field("email", FieldKind::Email, true),
        field("county", FieldKind::Text, true),
        field("school", FieldKind::Text, false),
    ],
    &[
        field("id_front", FieldKind::Image, true),
        field("id_back", FieldKind::Image, true),
    ],
    &[field("face_photo", FieldKind::Image, true)],
];

/**
 * The persisted in-progress state of the wizard.
 *
 * Keys of `fields` are exactly the `name` attributes of the form
 * controls; values are always the latest edit. Survives a reload
 * within the browsing session via the draft store.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    /// Current step, 1-based.
    #[serde(default = "first_step")]
    pub step: usize,

    /// Latest value per form control.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

fn first_step() -> usize {
    1
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self {
            step: 1,
            fields: BTreeMap::new(),
        }
    }
}

/// A file the voter selected for an image field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Original file name.
    pub name: String,

    /// Declared MIME type.
    pub mime: String,

    /// File content.
    pub bytes: Vec<u8>,
}

/// Inputs the rendering adapter feeds into the wizard.
#[derive(Debug, Clone)]
pub enum WizardInput {
    /**
     * The voter edited a form control. Updates the draft and persists
     * it immediately, independent of step transitions.
     */
    FieldChanged { name: String, value: String },

    /// Advance to the next step; validates the current step first.
    Next,

    /// Return to the previous step; never re-validates.
    Prev,

    /// The voter selected a file for an image field.
    FileSelected { field: String, upload: FileUpload },

    /// The backend accepted the registration; the persisted draft is
    /// discarded so a later visit starts fresh.
    SubmissionAccepted,
}

/// Effects for the rendering adapter to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardOutput {
    /// The draft was updated and persisted.
    DraftUpdated,

    /// Step visibility should move to `step` (1-based).
    StepChanged { step: usize },

    /**
     * The transition was rejected. `field` is the first invalid
     * control and should receive focus; `message` is shown inline.
     */
    ValidationFailed { field: String, message: String },

    /// Render a local preview of the accepted file. Nothing uploads
    /// until final submission.
    FilePreview { field: String, bytes: Vec<u8> },

    /// The file was rejected and the input reset; show `reason`.
    FileRejected { field: String, reason: String },

    /// The final step validated; the driver may assemble the
    /// registration payload from these fields.
    ReadyToSubmit {
        fields: BTreeMap<String, String>,
    },

    /// The persisted draft was discarded after an accepted submission.
    DraftCleared,
}

/**
 * The registration wizard.
 *
 * Owns the draft store exclusively. Construction restores any
 * persisted draft; a corrupted draft is logged and replaced with an
 * empty one, never an error.
 */
#[derive(Debug)]
pub struct RegistrationWizard<S: DraftStore> {
    store: S,
    draft: RegistrationDraft,
}

impl<S: DraftStore> RegistrationWizard<S> {
    pub fn new(store: S) -> Self {
        let draft = Self::restore(&store);
        Self { store, draft }
    }

    /// Current step, 1-based.
    pub fn current_step(&self) -> usize {
        self.draft.step
    }

    /// Latest value of a form control, if any.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.draft.fields.get(name).map(String::as_str)
    }

    /// Consumes the wizard and returns its store; the persisted draft
    /// outlives the view within the browsing session.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Processes one input and returns the effect to render.
    pub fn process_input(&mut self, input: WizardInput) -> WizardOutput {
        match input {
            WizardInput::FieldChanged { name, value } => {
                self.draft.fields.insert(name, value);
                self.persist();
                WizardOutput::DraftUpdated
            }

            WizardInput::Next => match self.validate_step(self.draft.step) {
                Err((field, message)) => WizardOutput::ValidationFailed { field, message },
                Ok(()) if self.draft.step < STEP_COUNT => {
                    self.draft.step += 1;
                    self.persist();
                    WizardOutput::StepChanged {
                        step: self.draft.step,
                    }
                }
                Ok(()) => WizardOutput::ReadyToSubmit {
                    fields: self.draft.fields.clone(),
                },
            },

            WizardInput::Prev => {
                if self.draft.step > 1 {
                    self.draft.step -= 1;
                    self.persist();
                }
                WizardOutput::StepChanged {
                    step: self.draft.step,
                }
            }

            WizardInput::FileSelected { field, upload } => {
                match validate_upload(&upload) {
                    Err(reason) => {
                        // No partial state: forget any previously
                        // accepted file for this control.
                        self.draft.fields.remove(&field);
                        self.persist();
                        WizardOutput::FileRejected { field, reason }
                    }
                    Ok(()) => {
                        self.draft.fields.insert(field.clone(), upload.name);
                        self.persist();
                        WizardOutput::FilePreview {
                            field,
                            bytes: upload.bytes,
                        }
                    }
                }
            }

            WizardInput::SubmissionAccepted => {
                self.draft = RegistrationDraft::default();
                if let Err(error) = self.store.remove(DRAFT_KEY) {
                    tracing::warn!(%error, "draft removal failed");
                }
                WizardOutput::DraftCleared
            }
        }
    }

    /// Validates the required fields of `step`, reporting the first
    /// invalid control.
    fn validate_step(&self, step: usize) -> Result<(), (String, String)> {
        let specs = STEPS
            .get(step.saturating_sub(1))
            .copied()
            .unwrap_or_default();

        for spec in specs {
            let value = self.field(spec.name).unwrap_or("").trim().to_string();

            if value.is_empty() {
                if spec.required {
                    return Err((spec.name.to_string(), "This field is required".to_string()));
                }
                continue;
            }

            match spec.kind {
                FieldKind::Text | FieldKind::Image => {}
                FieldKind::Email => {
                    if !EMAIL_PATTERN.is_match(&value) {
                        return Err((
                            spec.name.to_string(),
                            "Enter a valid email address".to_string(),
                        ));
                    }
                }
                FieldKind::Phone => {
                    if !PHONE_PATTERN.is_match(&normalize_phone(&value)) {
                        return Err((
                            spec.name.to_string(),
                            "Enter a valid phone number, e.g. 0712 345 678".to_string(),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    fn restore(store: &S) -> RegistrationDraft {
        let persisted = match store.read(DRAFT_KEY) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "draft store unreadable, starting empty");
                return RegistrationDraft::default();
            }
        };

        match persisted {
            None => RegistrationDraft::default(),
            Some(json) => match serde_json::from_str::<RegistrationDraft>(&json) {
                Ok(draft) if (1..=STEP_COUNT).contains(&draft.step) => draft,
                Ok(draft) => {
                    tracing::warn!(
                        step = draft.step,
                        "persisted draft step out of range, starting empty"
                    );
                    RegistrationDraft::default()
                }
                Err(error) => {
                    tracing::warn!(%error, "corrupted persisted draft, starting empty");
                    RegistrationDraft::default()
                }
            },
        }
    }

    fn persist(&mut self) {
        // The draft contains only strings; serialization cannot fail.
        let json = match serde_json::to_string(&self.draft) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "draft serialization failed");
                return;
            }
        };

        if let Err(error) = self.store.write(DRAFT_KEY, &json) {
            tracing::warn!(%error, "draft persistence failed");
        }
    }
}

/**
 * Normalizes a phone number to the canonical national form.
 *
 * Strips non-digits; a nine-digit number starting `7` or `1` gains
 * the leading zero.
 */
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if digits.len() == 9 && (digits.starts_with('7') || digits.starts_with('1')) {
        format!("0{digits}")
    } else {
        digits
    }
}

/// Rejects oversized and non-image uploads at the boundary.
fn validate_upload(upload: &FileUpload) -> Result<(), String> {
    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err("File is larger than 5 MB".to_string());
    }

    if !upload.mime.starts_with("image/") {
        return Err("Only image files are accepted".to_string());
    }

    // Magic-number check on top of the declared MIME type.
    let header = upload.bytes.as_slice();
    let looks_like_image = header.starts_with(&[0xFF, 0xD8])
        || header.starts_with(&[0x89, b'P', b'N', b'G'])
        || header.starts_with(b"GIF");
    if !looks_like_image {
        return Err("File content is not a recognized image".to_string());
    }

    Ok(())
}
