//! Billing recurrence policy and payment-order scheduling.
//!
//! The recurrence table drives two very different consumers. Labels and
//! installment caps are advisory: the UI must stay renderable even when the
//! data layer drifts, so unknown keys degrade to documented defaults. Month
//! multipliers are load-bearing: a wrong month count corrupts a payment
//! schedule, so that lookup signals instead of default-filling. The asymmetry
//! is deliberate and must survive refactors.

#![deny(unsafe_code)]

mod error;
mod recurrence;
mod schedule;

pub use error::BillingError;
pub use recurrence::{
    label_of, max_installments_of, months_per_cycle, Recurrence, DEFAULT_MAX_INSTALLMENTS,
};
pub use schedule::{
    generate_payment_orders, PaymentOrder, PaymentPlanRequest, PaymentStatus, MAX_INSTALLMENTS,
    MIN_INSTALLMENTS,
};
