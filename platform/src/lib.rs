// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Browser platform seam for the Agora voter-integrity pipeline.
//!
//! The pipeline crate contains only pure state and logic; everything it
//! needs from the hosting environment is reached through the traits in
//! this crate: device characteristics and canvas rendering
//! ([`environment`]), camera streams ([`media`]), the session-scoped
//! draft store ([`store`]) and the clock ([`clock`]).
//!
//! A browser host binds these traits to the real platform APIs. This
//! crate also ships deterministic in-memory implementations so the
//! pipeline can be driven headless, which is how the test suites run.

/// Wall-clock access.
pub mod clock;

/// Device characteristics and the canvas fingerprint probe.
pub mod environment;

/// Error handling.
pub mod error;

/// Camera streams and captured frames.
pub mod media;

/// Session-scoped key/value persistence.
pub mod store;

pub use error::Error;
