// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Election-phase countdown gate.
//!
//! Derives the election phase from the configured voting window and
//! gates the ballot entry point accordingly. The hosting view drives
//! the gate on a fixed one-second cadence and must cancel the tick
//! source on teardown; `stop` makes any tick after cancellation
//! inert, so a late timer callback cannot resurrect the view.

use std::time::Duration;

use chrono::NaiveDateTime;
use platform::clock::Clock;

use crate::elections::{ElectionSchedule, Phase};

/// Cadence the hosting view drives [`CountdownGate::tick`] at.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Entry-point label per phase.
const LABEL_BEFORE_OPEN: &str = "Voting opens soon";
const LABEL_OPEN: &str = "Cast your vote";
const LABEL_CLOSED: &str = "Voting has closed";

/// Countdown display, decomposed for the timer digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    /// The zeroed timer shown once the election has closed.
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    fn until(now: NaiveDateTime, target: NaiveDateTime) -> Self {
        let seconds = (target - now).num_seconds().max(0) as u64;
        Self {
            days: seconds / 86_400,
            hours: seconds % 86_400 / 3_600,
            minutes: seconds % 3_600 / 60,
            seconds: seconds % 60,
        }
    }
}

/// What the hosting view renders after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateView {
    /// The derived election phase.
    pub phase: Phase,

    /// Time until open (BeforeOpen), until close (Open), or zero (Closed).
    pub remaining: TimeRemaining,

    /// Whether the ballot entry point is enabled.
    pub entry_enabled: bool,

    /// Label on the ballot entry point.
    pub entry_label: &'static str,
}

/**
 * Gates the ballot entry point on the election phase.
 *
 * `Closed` latches irreversibly for the mounted lifetime: the
 * election instant does not move backward, so a clock adjustment
 * cannot reopen a closed gate.
 */
#[derive(Debug)]
pub struct CountdownGate {
    schedule: ElectionSchedule,
    closed_latched: bool,
    stopped: bool,
}

impl CountdownGate {
    pub fn new(schedule: ElectionSchedule) -> Self {
        Self {
            schedule,
            closed_latched: false,
            stopped: false,
        }
    }

    /**
     * Recomputes the gate view at the clock's current instant.
     *
     * Returns `None` once the gate has been stopped; a late timer
     * callback after teardown is a no-op.
     */
    pub fn tick(&mut self, clock: &dyn Clock) -> Option<GateView> {
        if self.stopped {
            return None;
        }

        let now = clock.now();
        let phase = if self.closed_latched {
            Phase::Closed
        } else {
            self.schedule.phase(now)
        };

        if phase == Phase::Closed && !self.closed_latched {
            self.closed_latched = true;
            tracing::debug!("voting window closed, gate latched");
        }

        Some(match phase {
            Phase::BeforeOpen => GateView {
                phase,
                remaining: TimeRemaining::until(now, self.schedule.opens_at()),
                entry_enabled: false,
                entry_label: LABEL_BEFORE_OPEN,
            },
            Phase::Open => GateView {
                phase,
                remaining: TimeRemaining::until(now, self.schedule.closes_at()),
                entry_enabled: true,
                entry_label: LABEL_OPEN,
            },
            Phase::Closed => GateView {
                phase,
                remaining: TimeRemaining::ZERO,
                entry_enabled: false,
                entry_label: LABEL_CLOSED,
            },
        })
    }

    /// Cancels the gate. Idempotent; every later tick is inert.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use platform::clock::FixedClock;

    use super::*;

    fn schedule() -> ElectionSchedule {
        ElectionSchedule::new(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap())
    }

    fn clock_at(h: u32, m: u32) -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 2, 14)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        )
    }

    #[test]
    fn before_open_counts_down_to_start_with_entry_disabled() {
        let mut gate = CountdownGate::new(schedule());

        let view = gate.tick(&clock_at(7, 0)).unwrap();

        assert_eq!(view.phase, Phase::BeforeOpen);
        assert!(!view.entry_enabled);
        assert_eq!(
            view.remaining,
            TimeRemaining {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn open_enables_the_entry_point_and_counts_to_close() {
        let mut gate = CountdownGate::new(schedule());

        let view = gate.tick(&clock_at(12, 0)).unwrap();

        assert_eq!(view.phase, Phase::Open);
        assert!(view.entry_enabled);
        assert_eq!(view.entry_label, LABEL_OPEN);
        assert_eq!(view.remaining.hours, 5);
    }

    #[test]
    fn closed_zeroes_the_timer_and_relabels_the_entry_point() {
        let mut gate = CountdownGate::new(schedule());

        let view = gate.tick(&clock_at(18, 0)).unwrap();

        assert_eq!(view.phase, Phase::Closed);
        assert!(!view.entry_enabled);
        assert_eq!(view.entry_label, LABEL_CLOSED);
        assert_eq!(view.remaining, TimeRemaining::ZERO);
    }

    #[test]
    fn closed_latches_against_a_backward_clock() {
        let mut gate = CountdownGate::new(schedule());

        gate.tick(&clock_at(18, 0)).unwrap();
        let view = gate.tick(&clock_at(12, 0)).unwrap();

        assert_eq!(view.phase, Phase::Closed);
        assert!(!view.entry_enabled);
    }

    #[test]
    fn ticks_after_stop_are_inert() {
        let mut gate = CountdownGate::new(schedule());

        gate.tick(&clock_at(12, 0)).unwrap();
        gate.stop();
        gate.stop(); // idempotent

        assert_eq!(gate.tick(&clock_at(12, 1)), None);
    }

    #[test]
    fn remaining_time_decomposes_into_display_digits() {
        let now = NaiveDate::from_ymd_opt(2026, 2, 12)
            .unwrap()
            .and_hms_opt(6, 58, 30)
            .unwrap();

        let remaining = TimeRemaining::until(now, schedule().opens_at());

        assert_eq!(
            remaining,
            TimeRemaining {
                days: 2,
                hours: 1,
                minutes: 1,
                seconds: 30
            }
        );
    }
}
