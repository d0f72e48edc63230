// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Wall-clock access.
//!
//! The countdown gate and the fingerprint fallback both read the
//! clock; injecting it keeps them deterministic under test.

use chrono::{Local, NaiveDateTime};

/// Read access to the local wall clock.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// Milliseconds since the Unix epoch, derived from [`Clock::now`].
    fn unix_millis(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }
}

/// The system clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
