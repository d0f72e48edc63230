// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Agora Elections
// See LICENSE.md for details

//! Shared election data model: contested positions, candidates, the
//! voting schedule and the phase derived from it.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Default opening time of the voting window.
pub const DEFAULT_START_TIME: NaiveTime = match NaiveTime::from_hms_opt(8, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/// Default closing time of the voting window.
pub const DEFAULT_END_TIME: NaiveTime = match NaiveTime::from_hms_opt(17, 0, 0) {
    Some(t) => t,
    None => unreachable!(),
};

/**
 * A contested position on the ballot.
 *
 * This is a closed enumeration: the set of required positions is
 * fixed and known in advance, and a well-formed ballot carries
 * exactly one candidate per position. Declaration order is ballot
 * order, used everywhere an ordered summary is rendered.
 */
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Position {
    President,
    Governor,
    Senator,
    Mp,
    Mca,
}

impl Position {
    /// Number of contested positions on the ballot.
    pub const COUNT: usize = 5;
}

/// A candidate contesting a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Backend identifier of the candidate.
    pub id: String,

    /// Display name of the candidate.
    pub name: String,
}

/// Election phase derived purely from the current time and the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// Voting has not opened yet.
    BeforeOpen,

    /// The voting window is open.
    Open,

    /// The voting window has closed.
    Closed,
}

/**
 * The configured voting window of an election.
 *
 * A single voting date with a start and end time. When the end time
 * is not after the start time the window crosses midnight and closes
 * on the following day.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSchedule {
    /// The voting date.
    pub voting_date: NaiveDate,

    /// Opening time on the voting date.
    pub start_time: NaiveTime,

    /// Closing time; on the next day when not after `start_time`.
    pub end_time: NaiveTime,
}

impl ElectionSchedule {
    /// Schedule for `voting_date` with the default 08:00–17:00 window.
    pub fn new(voting_date: NaiveDate) -> Self {
        Self {
            voting_date,
            start_time: DEFAULT_START_TIME,
            end_time: DEFAULT_END_TIME,
        }
    }

    /// The instant the voting window opens.
    pub fn opens_at(&self) -> NaiveDateTime {
        self.voting_date.and_time(self.start_time)
    }

    /// The instant the voting window closes.
    pub fn closes_at(&self) -> NaiveDateTime {
        if self.end_time <= self.start_time {
            // Midnight crossover: the window closes on the next day.
            self.voting_date
                .checked_add_days(Days::new(1))
                .unwrap_or(self.voting_date)
                .and_time(self.end_time)
        } else {
            self.voting_date.and_time(self.end_time)
        }
    }

    /// Derives the election phase at `now`.
    pub fn phase(&self, now: NaiveDateTime) -> Phase {
        if now < self.opens_at() {
            Phase::BeforeOpen
        } else if now <= self.closes_at() {
            Phase::Open
        } else {
            Phase::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn ballot_order_is_declaration_order() {
        let order: Vec<Position> = Position::iter().collect();
        assert_eq!(
            order,
            vec![
                Position::President,
                Position::Governor,
                Position::Senator,
                Position::Mp,
                Position::Mca,
            ]
        );
        assert_eq!(order.len(), Position::COUNT);
    }

    #[test]
    fn position_serializes_to_lowercase_identifier() {
        assert_eq!(
            serde_json::to_string(&Position::President).unwrap(),
            "\"president\""
        );
        assert_eq!(Position::Mca.to_string(), "mca");
    }

    #[test]
    fn phase_follows_the_voting_window() {
        let schedule = ElectionSchedule::new(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());

        assert_eq!(schedule.phase(at(2026, 2, 14, 7, 0)), Phase::BeforeOpen);
        assert_eq!(schedule.phase(at(2026, 2, 14, 12, 0)), Phase::Open);
        assert_eq!(schedule.phase(at(2026, 2, 14, 18, 0)), Phase::Closed);
        assert_eq!(schedule.phase(at(2026, 2, 13, 12, 0)), Phase::BeforeOpen);
        assert_eq!(schedule.phase(at(2026, 2, 15, 12, 0)), Phase::Closed);
    }

    #[test]
    fn midnight_crossover_closes_on_the_next_day() {
        let schedule = ElectionSchedule {
            voting_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
            start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(4, 0, 0).unwrap(),
        };

        assert_eq!(schedule.phase(at(2026, 2, 14, 23, 0)), Phase::Open);
        assert_eq!(schedule.phase(at(2026, 2, 15, 3, 0)), Phase::Open);
        assert_eq!(schedule.phase(at(2026, 2, 15, 5, 0)), Phase::Closed);
    }
}
