use crate::workflows::booking::domain::BookingStatus;
use crate::workflows::booking::service::WorkflowError;
use crate::workflows::booking::transitions::{next_status, BookingAction};

use BookingAction::*;
use BookingStatus::*;

const ACTIONS: [BookingAction; 7] = [
    ClassifyAtHome,
    AssignVendor,
    Accept,
    Reject,
    Start,
    Complete,
    Cancel,
];

fn assert_edge(from: BookingStatus, action: BookingAction, to: BookingStatus) {
    assert_eq!(
        next_status(from, action).expect("edge is legal"),
        to,
        "{from:?} --{action:?}--> {to:?}"
    );
}

fn assert_blocked(from: BookingStatus, action: BookingAction) {
    match next_status(from, action) {
        Err(WorkflowError::InvalidTransition {
            from: reported,
            action: reported_action,
        }) => {
            assert_eq!(reported, from);
            assert_eq!(reported_action, action);
        }
        other => panic!("expected {from:?} to block {action:?}, got {other:?}"),
    }
}

#[test]
fn the_listed_edges_are_legal() {
    assert_edge(Pending, ClassifyAtHome, AwaitingManager);
    assert_edge(Pending, AssignVendor, AwaitingVendorResponse);
    assert_edge(AwaitingManager, AssignVendor, AwaitingVendorResponse);
    assert_edge(Pending, Accept, Confirmed);
    assert_edge(AwaitingVendorResponse, Accept, Confirmed);
    assert_edge(Pending, Reject, Cancelled);
    assert_edge(AwaitingVendorResponse, Reject, Cancelled);
    assert_edge(Confirmed, Start, InProgress);
    assert_edge(InProgress, Complete, Completed);
}

#[test]
fn every_non_terminal_state_can_cancel() {
    for from in [Pending, AwaitingManager, AwaitingVendorResponse, Confirmed, InProgress] {
        assert_edge(from, Cancel, Cancelled);
    }
}

#[test]
fn terminal_states_admit_no_action() {
    for from in [Completed, Cancelled] {
        for action in ACTIONS {
            assert_blocked(from, action);
        }
    }
}

#[test]
fn off_table_pairs_are_blocked() {
    assert_blocked(AwaitingManager, ClassifyAtHome);
    assert_blocked(AwaitingManager, Accept);
    assert_blocked(AwaitingManager, Reject);
    assert_blocked(AwaitingVendorResponse, AssignVendor);
    assert_blocked(Confirmed, Accept);
    assert_blocked(Confirmed, Complete);
    assert_blocked(InProgress, Start);
    assert_blocked(Pending, Start);
    assert_blocked(Pending, Complete);
}

#[test]
fn no_action_reaches_more_than_one_step() {
    // Each legal edge lands on a state listed in the table for that action,
    // never skipping ahead (e.g. Pending can never jump to Completed).
    for from in BookingStatus::ALL {
        for action in ACTIONS {
            if let Ok(to) = next_status(from, action) {
                assert_ne!(
                    to, from,
                    "transitions always move: {from:?} --{action:?}--> {to:?}"
                );
                assert!(
                    !from.is_terminal(),
                    "terminal state {from:?} produced an edge"
                );
                if to == Completed {
                    assert_eq!(from, InProgress, "only InProgress completes");
                }
            }
        }
    }
}
