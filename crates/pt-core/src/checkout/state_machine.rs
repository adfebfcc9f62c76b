//! Checkout state machine.
//!
//! Defines a pure state transition function for the checkout gate.

use serde::Serialize;

use crate::cart::Position;

/// Checkout gate state.
///
/// `Failed` is not terminal: the user can retry (`Trigger`) or dismiss the
/// error (`Dismiss`) once the problem is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckoutState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed { reason: CheckoutFailure },
}

impl CheckoutState {
    /// Validation or submission in flight; triggers are ignored.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Submitting)
    }
}

/// Events that drive the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckoutEvent {
    /// User activated the checkout button.
    Trigger,
    ValidationPassed,
    ValidationFailed { reason: CheckoutFailure },
    /// Order service accepted the order.
    SubmissionAccepted { message: String },
    /// Order service rejected the order or could not be reached.
    SubmissionFailed { reason: CheckoutFailure },
    /// User dismissed the last failure.
    Dismiss,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CheckoutAction {
    /// Check preconditions against the hydrated selection.
    Validate,
    /// Send the order request.
    Submit,
    /// Empty the local selection.
    ClearSelection,
    NotifySuccess { message: String },
    ReportFailure { reason: CheckoutFailure },
    /// Leave the cart after the success notice had time to show.
    ScheduleNavigation,
}

/// Why a checkout attempt did not go through. Messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum CheckoutFailure {
    #[error("payment method required")]
    PaymentMethodRequired,

    #[error("cart is empty")]
    EmptySelection,

    #[error("some items are not loaded yet or failed to load (positions {})", join_positions(.positions))]
    UnresolvedItems { positions: Vec<Position> },

    #[error("some items are no longer available, remove them to continue (positions {})", join_positions(.positions))]
    UnavailableItems { positions: Vec<Position> },

    /// The persisted selection no longer matches the lines being ordered.
    #[error("cart changed since it was loaded, review it and try again")]
    SelectionChanged,

    #[error("failed to place order: {message}")]
    Submission { message: String },
}

impl CheckoutFailure {
    /// Failures detected locally, before any network call.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Submission { .. })
    }
}

fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(Position::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pure checkout state machine: no side effects.
pub struct CheckoutStateMachine;

impl CheckoutStateMachine {
    pub fn transition(
        state: CheckoutState,
        event: CheckoutEvent,
    ) -> (CheckoutState, Vec<CheckoutAction>) {
        match (state, event) {
            (CheckoutState::Idle | CheckoutState::Failed { .. }, CheckoutEvent::Trigger) => {
                (CheckoutState::Validating, vec![CheckoutAction::Validate])
            }
            (CheckoutState::Validating, CheckoutEvent::ValidationPassed) => {
                (CheckoutState::Submitting, vec![CheckoutAction::Submit])
            }
            (CheckoutState::Validating, CheckoutEvent::ValidationFailed { reason }) => (
                CheckoutState::Failed {
                    reason: reason.clone(),
                },
                vec![CheckoutAction::ReportFailure { reason }],
            ),
            (CheckoutState::Submitting, CheckoutEvent::SubmissionAccepted { message }) => (
                CheckoutState::Succeeded,
                vec![
                    CheckoutAction::ClearSelection,
                    CheckoutAction::NotifySuccess { message },
                    CheckoutAction::ScheduleNavigation,
                ],
            ),
            (CheckoutState::Submitting, CheckoutEvent::SubmissionFailed { reason }) => (
                CheckoutState::Failed {
                    reason: reason.clone(),
                },
                vec![CheckoutAction::ReportFailure { reason }],
            ),
            (CheckoutState::Failed { .. }, CheckoutEvent::Dismiss) => {
                (CheckoutState::Idle, Vec::new())
            }
            (state, _event) => (state, Vec::new()),
        }
    }
}
