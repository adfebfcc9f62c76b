//! Checkout domain module.
//!
//! This module defines the checkout gate state machine and the precondition
//! check that guards order construction.

mod state_machine;
mod validation;

pub use state_machine::{
    CheckoutAction, CheckoutEvent, CheckoutFailure, CheckoutState, CheckoutStateMachine,
};
pub use validation::validate_checkout;
