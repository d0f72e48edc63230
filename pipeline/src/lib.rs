// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Client-side voter-integrity pipeline for the Agora election
//! platform.
//!
//! The pipeline produces best-effort identity signals and enforces
//! strict local ballot invariants in an environment the voter
//! controls. It is pure state and logic: each controller consumes an
//! input enum and returns an output enum of effects for a thin
//! rendering adapter to perform. The adapter, transport framing, and
//! all server-side adjudication live elsewhere.

/// Declares the ballot-selection state machine.
pub mod ballot;

/// Declares the camera capture controller.
pub mod capture;

/// Declares the election-phase countdown gate.
pub mod countdown;

/// Declares the shared election data model.
pub mod elections;

/// Declares the device fingerprint engine.
pub mod fingerprint;

/// Declares the identity document matcher.
pub mod identity;

/// Declares the submission payload and external interface shapes.
pub mod payloads;

/// Declares the registration wizard state machine.
pub mod registration;

/// Basic end-to-end test of the pipeline against the headless
/// platform implementations.
#[cfg(test)]
mod integration_tests_basic;
