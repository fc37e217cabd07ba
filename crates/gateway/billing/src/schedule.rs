//! Payment-order schedule generation.
//!
//! One pending order per installment, due dates spaced a whole number of
//! billing cycles apart. This is the one consumer of the month multiplier,
//! so an unknown recurrence key stops the whole generation up front.

use chrono::{DateTime, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BillingError;
use crate::recurrence::months_per_cycle;

pub const MIN_INSTALLMENTS: u32 = 1;
pub const MAX_INSTALLMENTS: u32 = 24;

/// Request to generate payment orders for a contracted plan.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentPlanRequest {
    pub student_id: String,
    pub plan_id: String,
    pub plan_name: String,
    /// Price per installment in minor currency units (centavos).
    pub amount_minor: i64,
    /// Raw recurrence key as stored on the plan.
    pub recurrence: String,
    pub installments: u32,
    /// First due date; defaults to now.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

/// Lifecycle status of a payment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pendente,
    Pago,
    Cancelado,
}

/// A single payment order ready for insertion into the data backend.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: Uuid,
    pub student_id: String,
    pub amount_minor: i64,
    pub due_date: DateTime<Utc>,
    pub status: PaymentStatus,
}

/// Generate the pending payment orders for a plan.
///
/// Due dates sit `i * months_per_cycle` calendar months after the start date,
/// normalized to midnight UTC. An unknown recurrence key or an installment
/// count outside `1..=24` rejects the request before any order is built.
pub fn generate_payment_orders(
    request: &PaymentPlanRequest,
) -> Result<Vec<PaymentOrder>, BillingError> {
    let months = months_per_cycle(&request.recurrence)?;

    if !(MIN_INSTALLMENTS..=MAX_INSTALLMENTS).contains(&request.installments) {
        return Err(BillingError::InvalidInstallmentCount(request.installments));
    }

    let start = request
        .start_date
        .unwrap_or_else(Utc::now)
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();

    let mut orders = Vec::with_capacity(request.installments as usize);
    for installment in 0..request.installments {
        let due_date = start
            .checked_add_months(Months::new(installment * months))
            .ok_or(BillingError::DueDateOutOfRange { installment })?;

        orders.push(PaymentOrder {
            id: Uuid::new_v4(),
            student_id: request.student_id.clone(),
            amount_minor: request.amount_minor,
            due_date,
            status: PaymentStatus::Pendente,
        });
    }

    tracing::debug!(
        student_id = %request.student_id,
        plan_id = %request.plan_id,
        recurrence = %request.recurrence,
        count = orders.len(),
        "generated payment orders"
    );

    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(recurrence: &str, installments: u32) -> PaymentPlanRequest {
        PaymentPlanRequest {
            student_id: "aluno-1".to_string(),
            plan_id: "plano-1".to_string(),
            plan_name: "Plano Trimestral".to_string(),
            amount_minor: 15_000,
            recurrence: recurrence.to_string(),
            installments,
            start_date: Some(Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_due_dates_follow_cycle_length() {
        let orders = generate_payment_orders(&request("trimestral", 4)).unwrap();
        assert_eq!(orders.len(), 4);

        let expected_months = [1, 4, 7, 10];
        for (order, month) in orders.iter().zip(expected_months) {
            let expected = Utc.with_ymd_and_hms(2026, month, 15, 0, 0, 0).unwrap();
            assert_eq!(order.due_date, expected);
            assert_eq!(order.status, PaymentStatus::Pendente);
            assert_eq!(order.amount_minor, 15_000);
        }
    }

    #[test]
    fn test_start_date_normalizes_to_midnight() {
        let orders = generate_payment_orders(&request("mensal", 1)).unwrap();
        assert_eq!(
            orders[0].due_date,
            Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_recurrence_rejected() {
        let err = generate_payment_orders(&request("quinzenal", 4)).unwrap_err();
        assert!(matches!(err, BillingError::UnknownRecurrence(_)));
    }

    #[test]
    fn test_installment_bounds() {
        assert!(matches!(
            generate_payment_orders(&request("mensal", 0)).unwrap_err(),
            BillingError::InvalidInstallmentCount(0)
        ));
        assert!(matches!(
            generate_payment_orders(&request("mensal", 25)).unwrap_err(),
            BillingError::InvalidInstallmentCount(25)
        ));
        assert!(generate_payment_orders(&request("mensal", 24)).is_ok());
    }

    #[test]
    fn test_each_order_gets_a_fresh_id() {
        let orders = generate_payment_orders(&request("mensal", 12)).unwrap();
        let mut ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }
}
