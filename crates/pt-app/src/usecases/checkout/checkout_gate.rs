//! Checkout gate
//! 结账关卡
//!
//! Drives [`CheckoutStateMachine`] and performs the side effects it asks
//! for. The state lives behind an async mutex that is only held for the
//! duration of a transition, so a second trigger arriving while the first
//! is validating or submitting sees a busy state and is ignored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use pt_core::cart::HydratedEntry;
use pt_core::checkout::{
    validate_checkout, CheckoutAction, CheckoutEvent, CheckoutFailure, CheckoutState,
    CheckoutStateMachine,
};
use pt_core::config::CheckoutConfig;
use pt_core::order::PaymentMethod;
use pt_core::ports::{NavigationPort, Notice, NotificationPort, OrderError, OrderPort};

use crate::usecases::cart::LocalSelectionStore;

const GENERIC_SUBMISSION_ERROR: &str = "an error occurred during checkout";
const DEFAULT_SUCCESS_MESSAGE: &str = "Order placed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// How long the success notice stays before navigating away.
    pub redirect_delay: Duration,
    pub redirect_route: String,
}

impl From<&CheckoutConfig> for CheckoutSettings {
    fn from(config: &CheckoutConfig) -> Self {
        Self {
            redirect_delay: config.redirect_delay(),
            redirect_route: config.redirect_route.clone(),
        }
    }
}

/// Result of one checkout trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// A previous trigger is still validating or submitting.
    Ignored,
    /// A precondition failed; nothing was sent.
    Rejected(CheckoutFailure),
    /// The order service rejected the order or could not be reached.
    Failed(CheckoutFailure),
    Succeeded { message: String },
}

pub struct CheckoutGate {
    store: Arc<LocalSelectionStore>,
    orders: Arc<dyn OrderPort>,
    notifier: Arc<dyn NotificationPort>,
    navigator: Arc<dyn NavigationPort>,
    settings: CheckoutSettings,
    state: Mutex<CheckoutState>,
}

impl CheckoutGate {
    pub fn new(
        store: Arc<LocalSelectionStore>,
        orders: Arc<dyn OrderPort>,
        notifier: Arc<dyn NotificationPort>,
        navigator: Arc<dyn NavigationPort>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            store,
            orders,
            notifier,
            navigator,
            settings,
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    pub async fn state(&self) -> CheckoutState {
        self.state.lock().await.clone()
    }

    /// Acknowledges the last failure and returns to `Idle`.
    pub async fn dismiss(&self) {
        let actions = self.advance(CheckoutEvent::Dismiss).await;
        self.perform(actions).await;
    }

    /// Validates the hydrated selection and, when every precondition holds,
    /// submits the order.
    ///
    /// # Behavior / 行为
    /// - Ignored while a previous trigger is validating or submitting
    /// - Validation failures are reported without any network call
    /// - On success the selection is cleared and, after the configured
    ///   delay, the user is sent to the redirect route
    /// - On submission failure the selection is kept for a retry
    #[tracing::instrument(
        name = "usecase.checkout.execute",
        skip(self, entries),
        fields(entries = entries.len(), payment_method = ?payment_method)
    )]
    pub async fn checkout(
        &self,
        payment_method: Option<PaymentMethod>,
        entries: &[HydratedEntry],
    ) -> CheckoutOutcome {
        let actions = self.advance(CheckoutEvent::Trigger).await;
        if !actions.contains(&CheckoutAction::Validate) {
            debug!("Checkout already in progress, ignoring trigger");
            return CheckoutOutcome::Ignored;
        }

        let verdict = match validate_checkout(payment_method, entries) {
            Ok(order) => self.ensure_current(entries).await.map(|()| order),
            Err(reason) => Err(reason),
        };
        let order = match verdict {
            Ok(order) => order,
            Err(reason) => {
                info!(reason = %reason, "Checkout rejected by validation");
                let actions = self
                    .advance(CheckoutEvent::ValidationFailed {
                        reason: reason.clone(),
                    })
                    .await;
                self.perform(actions).await;
                return CheckoutOutcome::Rejected(reason);
            }
        };

        let actions = self.advance(CheckoutEvent::ValidationPassed).await;
        if !actions.contains(&CheckoutAction::Submit) {
            warn!("Checkout state changed during validation, aborting");
            return CheckoutOutcome::Ignored;
        }

        info!(lines = order.line_items().len(), "Submitting order");
        match self.orders.submit_order(&order).await {
            Ok(receipt) => {
                let message = if receipt.message.trim().is_empty() {
                    DEFAULT_SUCCESS_MESSAGE.to_string()
                } else {
                    receipt.message
                };
                info!(message = %message, "Order accepted");
                let actions = self
                    .advance(CheckoutEvent::SubmissionAccepted {
                        message: message.clone(),
                    })
                    .await;
                self.perform(actions).await;
                CheckoutOutcome::Succeeded { message }
            }
            Err(err) => {
                error!(error = %err, "Order submission failed");
                let reason = CheckoutFailure::Submission {
                    message: user_message(&err),
                };
                let actions = self
                    .advance(CheckoutEvent::SubmissionFailed {
                        reason: reason.clone(),
                    })
                    .await;
                self.perform(actions).await;
                CheckoutOutcome::Failed(reason)
            }
        }
    }

    /// The order must cover exactly what is persisted, since success
    /// clears the whole selection.
    async fn ensure_current(&self, entries: &[HydratedEntry]) -> Result<(), CheckoutFailure> {
        let persisted = self.store.read_all().await;
        let matches = persisted.len() == entries.len()
            && persisted
                .iter()
                .zip(entries)
                .all(|(stored, shown)| stored.item_id == shown.item_id);
        if matches {
            return Ok(());
        }
        warn!(
            persisted = persisted.len(),
            shown = entries.len(),
            "Selection changed since it was hydrated"
        );
        Err(CheckoutFailure::SelectionChanged)
    }

    async fn advance(&self, event: CheckoutEvent) -> Vec<CheckoutAction> {
        let mut state = self.state.lock().await;
        let (next, actions) = CheckoutStateMachine::transition(state.clone(), event);
        debug!(from = ?*state, to = ?next, "Checkout transition");
        *state = next;
        actions
    }

    async fn perform(&self, actions: Vec<CheckoutAction>) {
        for action in actions {
            match action {
                CheckoutAction::ClearSelection => {
                    // The order is already placed; a stale cart is the lesser evil.
                    if let Err(err) = self.store.clear().await {
                        error!(error = %err, "Failed to clear selection after order");
                    }
                }
                CheckoutAction::NotifySuccess { message } => {
                    self.notifier.notify(Notice::success(message));
                }
                CheckoutAction::ReportFailure { reason } => {
                    let notice = if reason.is_validation() {
                        Notice::warning(reason.to_string())
                    } else {
                        Notice::error(reason.to_string())
                    };
                    self.notifier.notify(notice);
                }
                CheckoutAction::ScheduleNavigation => {
                    tokio::time::sleep(self.settings.redirect_delay).await;
                    self.navigator.navigate(&self.settings.redirect_route);
                }
                CheckoutAction::Validate | CheckoutAction::Submit => {}
            }
        }
    }
}

fn user_message(err: &OrderError) -> String {
    match err {
        OrderError::Rejected { message } if !message.trim().is_empty() => message.clone(),
        _ => GENERIC_SUBMISSION_ERROR.to_string(),
    }
}
