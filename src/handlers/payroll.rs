use crate::{
    errors::AppResult,
    models::{
        AdvanceEntry, AdvancePayload, AdvanceRequest, Payment, PaymentRequest, PayrollQuery,
        SalaryFilter, SalaryRecord,
    },
    services::payroll::PayrollService,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

/// Latest salary row per employee
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, description = "Payroll sheet", body = Vec<SalaryRecord>),
        (status = 502, description = "Salary data could not be loaded"),
    ),
    tag = "Payroll"
)]
pub async fn get_payroll_sheet(
    State(state): State<AppState>,
    Query(query): Query<PayrollQuery>,
) -> AppResult<Json<Vec<SalaryRecord>>> {
    let records = state.api.salary_records(&SalaryFilter::default()).await?;
    Ok(Json(PayrollService::sheet(&records, &query)))
}

/// Advance ledger
#[utoipa::path(
    get,
    path = "/api/v1/payroll/advances",
    responses(
        (status = 200, description = "All advances", body = Vec<AdvanceEntry>),
    ),
    tag = "Payroll"
)]
pub async fn list_advances(State(state): State<AppState>) -> AppResult<Json<Vec<AdvanceEntry>>> {
    Ok(Json(state.api.advances().await?))
}

/// Validates the request, then fills in the employee's name when the caller left it out.
async fn advance_payload(state: &AppState, body: &AdvanceRequest) -> AppResult<AdvancePayload> {
    let mut payload = PayrollService::prepare_advance(body, None)?;
    if payload.employee_name.is_empty() {
        if let Ok(profile) = state.api.employee(&payload.employee_id).await {
            payload.employee_name = profile.name;
        }
    }
    Ok(payload)
}

/// Record a salary advance
#[utoipa::path(
    post,
    path = "/api/v1/payroll/advances",
    request_body = AdvanceRequest,
    responses(
        (status = 201, description = "Advance recorded", body = AdvanceEntry),
        (status = 400, description = "Missing employee or non-positive amount"),
    ),
    tag = "Payroll"
)]
pub async fn create_advance(
    State(state): State<AppState>,
    Json(body): Json<AdvanceRequest>,
) -> AppResult<(StatusCode, Json<AdvanceEntry>)> {
    let payload = advance_payload(&state, &body).await?;
    let entry = state.api.save_advance(None, &payload).await?;

    info!("Advance of {} recorded for {}", payload.amount, payload.employee_id);
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Edit an advance
#[utoipa::path(
    patch,
    path = "/api/v1/payroll/advances/{id}",
    params(("id" = i64, Path, description = "Advance entry ID")),
    request_body = AdvanceRequest,
    responses(
        (status = 200, description = "Advance updated", body = AdvanceEntry),
        (status = 400, description = "Missing employee or non-positive amount"),
        (status = 404, description = "Advance not found"),
    ),
    tag = "Payroll"
)]
pub async fn update_advance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<AdvanceRequest>,
) -> AppResult<Json<AdvanceEntry>> {
    let payload = advance_payload(&state, &body).await?;
    let entry = state.api.save_advance(Some(id), &payload).await?;

    info!("Advance {} updated for {}", id, payload.employee_id);
    Ok(Json(entry))
}

/// Salary payments made so far
#[utoipa::path(
    get,
    path = "/api/v1/payroll/payments",
    responses(
        (status = 200, description = "All payments", body = Vec<Payment>),
    ),
    tag = "Payroll"
)]
pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Vec<Payment>>> {
    Ok(Json(state.api.payments().await?))
}

/// Record a salary payment, recovering part of the outstanding advance
#[utoipa::path(
    post,
    path = "/api/v1/payroll/payments",
    request_body = PaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Deduction exceeds the outstanding advance"),
    ),
    tag = "Payroll"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(body): Json<PaymentRequest>,
) -> AppResult<(StatusCode, Json<Payment>)> {
    PayrollService::check_payment(&body)?;

    let records = state
        .api
        .salary_records(&SalaryFilter::for_employee(body.employee_id.trim()))
        .await?;
    let payload = PayrollService::prepare_payment(&body, &records)?;
    let payment = state.api.create_payment(&payload).await?;

    info!(
        "Payment of {} recorded for {} ({})",
        payload.amount_paid, payload.employee_id, payload.pay_period
    );
    Ok((StatusCode::CREATED, Json(payment)))
}
