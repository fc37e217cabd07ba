//! Billing policy and payment-generation handlers.

use crate::cookies;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use gateway_billing::{
    generate_payment_orders, label_of, max_installments_of, PaymentPlanRequest, Recurrence,
};
use gateway_client::DataClient;
use serde::Serialize;
use serde_json::{json, Value};

/// One row of the recurrence policy table.
#[derive(Debug, Serialize)]
pub struct RecurrencePolicy {
    pub key: String,
    pub label: String,
    pub months_per_cycle: u32,
    pub max_recommended_installments: u32,
}

/// `GET /api/v1/billing/recurrences` — the full policy table for the UI.
pub async fn list_recurrences() -> Json<Vec<RecurrencePolicy>> {
    let policies = Recurrence::ALL
        .iter()
        .map(|r| RecurrencePolicy {
            key: r.as_key().to_string(),
            label: r.label().to_string(),
            months_per_cycle: r.months_per_cycle(),
            max_recommended_installments: r.max_recommended_installments(),
        })
        .collect();

    Json(policies)
}

/// Policy for one (possibly drifted) recurrence key.
///
/// Label and installment cap degrade for unknown keys; months are omitted
/// rather than guessed.
#[derive(Debug, Serialize)]
pub struct RecurrencePolicyLookup {
    pub key: String,
    pub label: String,
    pub max_recommended_installments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months_per_cycle: Option<u32>,
}

/// `GET /api/v1/billing/recurrences/:key` — tolerant single-key lookup.
pub async fn get_recurrence(Path(key): Path<String>) -> Json<RecurrencePolicyLookup> {
    Json(RecurrencePolicyLookup {
        label: label_of(&key),
        max_recommended_installments: max_installments_of(&key),
        months_per_cycle: Recurrence::parse(&key).map(|r| r.months_per_cycle()),
        key,
    })
}

const INSERT_PAYMENTS_MUTATION: &str = r#"
    mutation InsertPayments($objects: [payments_insert_input!]!) {
      insert_payments(objects: $objects) {
        affected_rows
        returning {
          id
          payment_date
          amount
          status
        }
      }
    }
"#;

/// Response for payment-order generation.
#[derive(Debug, Serialize)]
pub struct GeneratePaymentsResponse {
    pub created: u64,
    pub message: String,
}

/// `POST /api/v1/payments/generate` — build and persist the installment plan.
///
/// The schedule is derived entirely by the billing engine; this handler only
/// moves it to the data backend under the caller's authority (or the admin
/// override when no caller token is present).
pub async fn generate_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PaymentPlanRequest>,
) -> ApiResult<Json<GeneratePaymentsResponse>> {
    let orders = generate_payment_orders(&request)?;

    let token = cookies::session_token(&headers);
    let client = DataClient::for_request(&state.config.backend, token.as_deref())?;

    let rows: Vec<Value> = orders
        .iter()
        .map(|order| {
            json!({
                "id": order.id,
                "student_id": order.student_id,
                "amount": order.amount_minor,
                "payment_date": order.due_date,
                "payment_method": Value::Null,
                "status": order.status,
            })
        })
        .collect();

    let data = client
        .execute(INSERT_PAYMENTS_MUTATION, json!({ "objects": rows }))
        .await?;

    let created = data
        .pointer("/insert_payments/affected_rows")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    tracing::info!(
        student_id = %request.student_id,
        plan_id = %request.plan_id,
        created,
        "payment orders persisted"
    );

    let message = if created > 0 {
        format!("{created} ordem(ns) de pagamento gerada(s) com sucesso!")
    } else {
        "Nenhuma ordem de pagamento foi criada".to_string()
    };

    Ok(Json(GeneratePaymentsResponse { created, message }))
}
