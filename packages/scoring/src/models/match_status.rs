use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::errors::scoring_errors::ScoringError;

/// Lifecycle status of a match. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Pending,
    Delayed,
    Started,
    Suspended,
    Finished,
}

/// Operator or engine events that move a match through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchAction {
    Start,
    Suspend,
    Resume,
    /// The last set was decided on court.
    Complete,
    /// The operator ends the match and names the winner.
    Finish,
}

impl MatchStatus {
    /// Initial status of a newly scheduled match.
    pub fn for_schedule(scheduled_start: DateTime<Utc>, now: DateTime<Utc>) -> MatchStatus {
        if scheduled_start > now {
            MatchStatus::Pending
        } else {
            MatchStatus::Delayed
        }
    }

    pub fn transition(self, action: MatchAction) -> Result<MatchStatus, ScoringError> {
        let next = match (self, action) {
            (MatchStatus::Pending | MatchStatus::Delayed, MatchAction::Start) => {
                MatchStatus::Started
            }
            (MatchStatus::Started, MatchAction::Suspend) => MatchStatus::Suspended,
            (MatchStatus::Suspended, MatchAction::Resume) => MatchStatus::Started,
            (MatchStatus::Started, MatchAction::Complete | MatchAction::Finish) => {
                MatchStatus::Finished
            }
            (from, action) => return Err(ScoringError::InvalidTransition { from, action }),
        };
        Ok(next)
    }

    pub fn can_transition(self, action: MatchAction) -> bool {
        self.transition(action).is_ok()
    }

    pub fn is_in_play(self) -> bool {
        self == MatchStatus::Started
    }

    pub fn is_terminal(self) -> bool {
        self == MatchStatus::Finished
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStatus::Pending => "Pending",
            MatchStatus::Delayed => "Delayed",
            MatchStatus::Started => "Started",
            MatchStatus::Suspended => "Suspended",
            MatchStatus::Finished => "Finished",
        };
        f.write_str(label)
    }
}

impl fmt::Display for MatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchAction::Start => "start",
            MatchAction::Suspend => "suspend",
            MatchAction::Resume => "resume",
            MatchAction::Complete => "complete",
            MatchAction::Finish => "finish",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    #[case(MatchStatus::Pending, MatchAction::Start, MatchStatus::Started)]
    #[case(MatchStatus::Delayed, MatchAction::Start, MatchStatus::Started)]
    #[case(MatchStatus::Started, MatchAction::Suspend, MatchStatus::Suspended)]
    #[case(MatchStatus::Suspended, MatchAction::Resume, MatchStatus::Started)]
    #[case(MatchStatus::Started, MatchAction::Complete, MatchStatus::Finished)]
    #[case(MatchStatus::Started, MatchAction::Finish, MatchStatus::Finished)]
    fn test_allowed_transitions(
        #[case] from: MatchStatus,
        #[case] action: MatchAction,
        #[case] expected: MatchStatus,
    ) {
        assert_eq!(from.transition(action).unwrap(), expected);
    }

    #[rstest]
    #[case(MatchStatus::Pending, MatchAction::Resume)]
    #[case(MatchStatus::Pending, MatchAction::Suspend)]
    #[case(MatchStatus::Delayed, MatchAction::Complete)]
    #[case(MatchStatus::Started, MatchAction::Start)]
    #[case(MatchStatus::Started, MatchAction::Resume)]
    #[case(MatchStatus::Suspended, MatchAction::Start)]
    #[case(MatchStatus::Suspended, MatchAction::Finish)]
    #[case(MatchStatus::Finished, MatchAction::Start)]
    #[case(MatchStatus::Finished, MatchAction::Resume)]
    fn test_rejected_transitions(#[case] from: MatchStatus, #[case] action: MatchAction) {
        match from.transition(action) {
            Err(ScoringError::InvalidTransition { from: f, action: a }) => {
                assert_eq!(f, from);
                assert_eq!(a, action);
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
        assert!(!from.can_transition(action));
    }

    #[test]
    fn test_schedule_in_future_is_pending() {
        let now = Utc::now();
        assert_eq!(
            MatchStatus::for_schedule(now + Duration::hours(2), now),
            MatchStatus::Pending
        );
    }

    #[test]
    fn test_schedule_now_or_past_is_delayed() {
        let now = Utc::now();
        assert_eq!(MatchStatus::for_schedule(now, now), MatchStatus::Delayed);
        assert_eq!(
            MatchStatus::for_schedule(now - Duration::minutes(30), now),
            MatchStatus::Delayed
        );
    }

    #[test]
    fn test_transition_error_message() {
        let err = MatchStatus::Pending.transition(MatchAction::Resume).unwrap_err();
        assert_eq!(err.to_string(), "Cannot resume a match that is Pending");
    }
}
