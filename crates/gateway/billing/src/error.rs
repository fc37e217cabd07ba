//! Billing errors.

use thiserror::Error;

use crate::schedule::{MAX_INSTALLMENTS, MIN_INSTALLMENTS};

#[derive(Debug, Error)]
pub enum BillingError {
    /// The recurrence key is not in the policy table. Raised only by the
    /// month-multiplier path; cosmetic lookups degrade instead.
    #[error("unknown recurrence: {0}")]
    UnknownRecurrence(String),

    /// Installment count outside the supported range.
    #[error("installment count must be between {MIN_INSTALLMENTS} and {MAX_INSTALLMENTS}, got {0}")]
    InvalidInstallmentCount(u32),

    /// Adding the cycle offset to the start date overflowed the calendar.
    #[error("due date out of range for installment {installment}")]
    DueDateOutOfRange { installment: u32 },
}
