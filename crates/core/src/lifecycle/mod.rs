//! Booking lifecycle state machine.
//!
//! The legality rule lives in one static successor table instead of
//! per-screen conditionals. [`available_actions`] doubles as the
//! authorization surface: presentation layers offer exactly the actions it
//! returns, so terminal bookings naturally render none.

use thiserror::Error;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::booking::BookingStatus;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no transition from {from:?} to {to:?}")]
    IllegalTransition { from: BookingStatus, to: BookingStatus },
    #[error("booking is already {status:?}")]
    NoOp { status: BookingStatus },
}

/// Direct successors of `current` in the booking lifecycle. Empty for the
/// terminal statuses.
pub fn available_actions(current: BookingStatus) -> &'static [BookingStatus] {
    use BookingStatus::{Approved, CheckedIn, CheckedOut, Paid, Pending, Rejected};

    match current {
        Pending => &[Approved, Rejected],
        Approved => &[Paid],
        Paid => &[CheckedIn],
        CheckedIn => &[CheckedOut],
        Rejected | CheckedOut => &[],
    }
}

pub fn is_terminal(status: BookingStatus) -> bool {
    available_actions(status).is_empty()
}

/// Decides whether `current` may move to `requested` and returns the
/// resulting status. Requesting the current status is an explicit
/// [`TransitionError::NoOp`] rather than a silent success, so callers
/// cannot mask bugs by re-requesting the state a booking is already in.
///
/// Pure decision function; applying the result to the persisted record is
/// the caller's responsibility.
pub fn attempt_transition(
    current: BookingStatus,
    requested: BookingStatus,
) -> Result<BookingStatus, TransitionError> {
    if requested == current {
        return Err(TransitionError::NoOp { status: current });
    }
    if available_actions(current).contains(&requested) {
        Ok(requested)
    } else {
        Err(TransitionError::IllegalTransition { from: current, to: requested })
    }
}

/// [`attempt_transition`] plus an audit record of the decision, applied or
/// rejected alike.
pub fn attempt_transition_with_audit<S>(
    current: BookingStatus,
    requested: BookingStatus,
    sink: &S,
    audit: &AuditContext,
) -> Result<BookingStatus, TransitionError>
where
    S: AuditSink,
{
    let result = attempt_transition(current, requested);
    match &result {
        Ok(next) => {
            sink.emit(
                AuditEvent::new(
                    audit.booking_id.clone(),
                    audit.correlation_id.clone(),
                    "booking.transition_applied",
                    AuditCategory::Lifecycle,
                    audit.actor.clone(),
                    AuditOutcome::Success,
                )
                .with_metadata("from", format!("{current:?}"))
                .with_metadata("to", format!("{next:?}")),
            );
        }
        Err(error) => {
            sink.emit(
                AuditEvent::new(
                    audit.booking_id.clone(),
                    audit.correlation_id.clone(),
                    "booking.transition_rejected",
                    AuditCategory::Lifecycle,
                    audit.actor.clone(),
                    AuditOutcome::Rejected,
                )
                .with_metadata("from", format!("{current:?}"))
                .with_metadata("requested", format!("{requested:?}"))
                .with_metadata("error", error.to_string()),
            );
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::audit::{AuditContext, InMemoryAuditSink};
    use crate::domain::booking::{BookingId, BookingStatus};

    use super::{
        attempt_transition, attempt_transition_with_audit, available_actions, is_terminal,
        TransitionError,
    };

    #[test]
    fn happy_path_runs_pending_to_checked_out() {
        let mut status = BookingStatus::Pending;
        for next in [
            BookingStatus::Approved,
            BookingStatus::Paid,
            BookingStatus::CheckedIn,
            BookingStatus::CheckedOut,
        ] {
            status = attempt_transition(status, next).expect("legal step");
        }
        assert_eq!(status, BookingStatus::CheckedOut);
        assert!(is_terminal(status));
    }

    #[test]
    fn every_listed_action_succeeds_and_everything_else_is_illegal() {
        for current in BookingStatus::ALL {
            let actions = available_actions(current);
            for requested in BookingStatus::ALL {
                let result = attempt_transition(current, requested);
                if requested == current {
                    assert_eq!(result, Err(TransitionError::NoOp { status: current }));
                } else if actions.contains(&requested) {
                    assert_eq!(result, Ok(requested));
                } else {
                    assert_eq!(
                        result,
                        Err(TransitionError::IllegalTransition { from: current, to: requested })
                    );
                }
            }
        }
    }

    #[test]
    fn actions_never_include_the_current_status() {
        for current in BookingStatus::ALL {
            assert!(!available_actions(current).contains(&current));
        }
    }

    #[test]
    fn only_rejected_and_checked_out_are_terminal() {
        for current in BookingStatus::ALL {
            let expected = matches!(current, BookingStatus::Rejected | BookingStatus::CheckedOut);
            assert_eq!(is_terminal(current), expected, "terminality of {current:?}");
        }
    }

    #[test]
    fn skipping_ahead_is_rejected() {
        let error = attempt_transition(BookingStatus::Pending, BookingStatus::Paid)
            .expect_err("pending cannot jump straight to paid");
        assert!(matches!(error, TransitionError::IllegalTransition { .. }));
    }

    #[test]
    fn pending_is_unreachable_once_left() {
        // Walk the whole reachable graph; the initial status must never
        // show up as anyone's successor.
        let mut visited = HashSet::new();
        let mut frontier = vec![BookingStatus::Pending];
        while let Some(status) = frontier.pop() {
            if !visited.insert(status) {
                continue;
            }
            for &next in available_actions(status) {
                assert_ne!(next, BookingStatus::Pending, "cycle back to pending via {status:?}");
                frontier.push(next);
            }
        }
        assert_eq!(visited.len(), BookingStatus::ALL.len());
    }

    #[test]
    fn rejected_audit_event_carries_the_error() {
        let sink = InMemoryAuditSink::default();
        let context = AuditContext::new(
            Some(BookingId("bk-2025-0107".to_owned())),
            "req-9",
            "admin-ui",
        );

        let _ = attempt_transition_with_audit(
            BookingStatus::CheckedOut,
            BookingStatus::Pending,
            &sink,
            &context,
        )
        .expect_err("terminal status has no successors");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "booking.transition_rejected");
        assert!(events[0].metadata.contains_key("error"));
    }

    #[test]
    fn applied_audit_event_records_both_endpoints() {
        let sink = InMemoryAuditSink::default();
        let context =
            AuditContext::new(Some(BookingId("bk-2025-0108".to_owned())), "req-10", "admin-ui");

        let next = attempt_transition_with_audit(
            BookingStatus::Pending,
            BookingStatus::Approved,
            &sink,
            &context,
        )
        .expect("pending -> approved");
        assert_eq!(next, BookingStatus::Approved);

        let events = sink.events();
        assert_eq!(events[0].event_type, "booking.transition_applied");
        assert_eq!(events[0].metadata.get("to").map(String::as_str), Some("Approved"));
    }
}
