use crate::{
    errors::AppResult,
    models::{PeriodQuery, SalaryDashboard, SalaryFilter},
    services::salary::build_dashboard,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};

/// Salary dashboard for a relative period, compared against the period before it
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/salary",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Dashboard figures", body = SalaryDashboard),
        (status = 502, description = "Salary data could not be loaded"),
    ),
    tag = "Dashboard"
)]
pub async fn get_salary_dashboard(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<SalaryDashboard>> {
    let records = state.api.salary_records(&SalaryFilter::default()).await?;
    let period = query.period.unwrap_or_default();

    Ok(Json(build_dashboard(&records, period, state.today())))
}
