use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateEmployeeReply, CreateEmployeeRequest, DailyAttendanceEntry, DirectoryEntry,
        DirectoryPage, DirectoryQuery, EmployeeUpdate, SalaryFilter, UpdateEmployeeResponse,
    },
    services::directory,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Map;
use tracing::info;

/// Directory joined with each employee's salary history
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(DirectoryQuery),
    responses(
        (status = 200, description = "One page of the directory", body = DirectoryPage),
        (status = 502, description = "Directory or salary data could not be loaded"),
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<Json<DirectoryPage>> {
    let all = SalaryFilter::default();
    let (profiles, salary) =
        tokio::try_join!(state.api.directory(), state.api.salary_records(&all))?;

    let entries = directory::filter(directory::join(&profiles, &salary), &query);
    Ok(Json(directory::paginate(
        entries,
        query.page,
        state.config.directory_page_size,
    )))
}

/// The filtered directory as a CSV download
#[utoipa::path(
    get,
    path = "/api/v1/employees/export",
    params(DirectoryQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 502, description = "Directory or salary data could not be loaded"),
    ),
    tag = "Employees"
)]
pub async fn export_employees(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<impl IntoResponse> {
    let all = SalaryFilter::default();
    let (profiles, salary) =
        tokio::try_join!(state.api.directory(), state.api.salary_records(&all))?;

    let entries = directory::filter(directory::join(&profiles, &salary), &query);
    let csv = directory::export_csv(&entries)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"employee_directory.csv\"",
            ),
        ],
        csv,
    ))
}

/// Add an employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = CreateEmployeeReply),
        (status = 400, description = "Missing fields or rejected by the HR service"),
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    Json(body): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<CreateEmployeeReply>)> {
    let payload = directory::new_employee_payload(&body)?;
    let reply = state.api.create_employee(&payload).await?;

    if !reply.success {
        return Err(AppError::Validation(directory::creation_error(&reply)));
    }

    info!(
        "Employee {} {} added to {}",
        payload.personal_info.first_name,
        payload.personal_info.last_name,
        payload.professional_info.department
    );
    Ok((StatusCode::CREATED, Json(reply)))
}

/// Employee profile with attendance and OT totals
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee detail", body = DirectoryEntry),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<DirectoryEntry>> {
    let filter = SalaryFilter::for_employee(&employee_id);
    let (profile, salary) = tokio::try_join!(
        state.api.employee(&employee_id),
        state.api.salary_records(&filter)
    )?;

    directory::join(std::slice::from_ref(&profile), &salary)
        .pop()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Employee '{employee_id}'")))
}

/// Update an employee; only fields that changed are forwarded
#[utoipa::path(
    patch,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    request_body(
        content = Object,
        description = "Profile fields to change, keyed by field name",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Fields sent to the HR service", body = UpdateEmployeeResponse),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(body): Json<EmployeeUpdate>,
) -> AppResult<Json<UpdateEmployeeResponse>> {
    let current = state.api.employee(&employee_id).await?;
    let fields = directory::changed_fields(&current, &body)?;

    if fields.is_empty() {
        return Ok(Json(UpdateEmployeeResponse {
            updated: false,
            fields: Map::new(),
        }));
    }

    state.api.update_employee(&employee_id, &fields).await?;
    info!("Employee {} updated: {:?}", employee_id, fields.keys().collect::<Vec<_>>());

    Ok(Json(UpdateEmployeeResponse {
        updated: true,
        fields,
    }))
}

/// Remove an employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee removed"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "Employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<StatusCode> {
    state.api.delete_employee(&employee_id).await?;
    info!("Employee {} removed", employee_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Day-by-day attendance history for one employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/daily-attendance",
    params(("employee_id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Daily attendance rows", body = Vec<DailyAttendanceEntry>),
    ),
    tag = "Employees"
)]
pub async fn employee_daily_attendance(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<Vec<DailyAttendanceEntry>>> {
    let rows = state.api.daily_attendance(Some(&employee_id)).await?;
    Ok(Json(rows))
}
