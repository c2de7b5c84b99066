use crate::{
    errors::{AppError, AppResult},
    models::{
        AttendanceTracker, DailySheetQuery, DailySheetRow, LateOvertime, MinutesRequest,
        RowOutcome, SaveAttendanceReport, SaveAttendanceRequest, TrackerQuery,
    },
    services::attendance::{self, TrackerFilter},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Per-employee attendance totals over a period or a single month
#[utoipa::path(
    get,
    path = "/api/v1/attendance/tracker",
    params(TrackerQuery),
    responses(
        (status = 200, description = "Attendance roll-up", body = AttendanceTracker),
        (status = 400, description = "Unknown month or month without year"),
        (status = 502, description = "Attendance data could not be loaded"),
    ),
    tag = "Attendance"
)]
pub async fn get_tracker(
    State(state): State<AppState>,
    Query(query): Query<TrackerQuery>,
) -> AppResult<Json<AttendanceTracker>> {
    let filter = TrackerFilter::from_query(&query)?;
    let records = state.api.attendance_records().await?;

    Ok(Json(attendance::tracker(
        &records,
        filter,
        query.search.as_deref(),
        state.today(),
    )))
}

/// The day's attendance sheet, prefilled from each employee's shift
#[utoipa::path(
    get,
    path = "/api/v1/attendance/daily",
    params(DailySheetQuery),
    responses(
        (status = 200, description = "One row per employee", body = Vec<DailySheetRow>),
        (status = 502, description = "Directory or attendance data could not be loaded"),
    ),
    tag = "Attendance"
)]
pub async fn get_daily_sheet(
    State(state): State<AppState>,
    Query(query): Query<DailySheetQuery>,
) -> AppResult<Json<Vec<DailySheetRow>>> {
    let date = query.date.unwrap_or_else(|| state.today());
    let (profiles, recorded) =
        tokio::try_join!(state.api.directory(), state.api.daily_attendance(None))?;

    Ok(Json(attendance::daily_sheet(
        &profiles,
        &recorded,
        date,
        query.search.as_deref(),
    )))
}

/// Save the day's sheet, one upstream write per row
#[utoipa::path(
    post,
    path = "/api/v1/attendance/daily",
    request_body = SaveAttendanceRequest,
    responses(
        (status = 200, description = "Per-row outcome", body = SaveAttendanceReport),
        (status = 400, description = "No rows to save"),
    ),
    tag = "Attendance"
)]
pub async fn save_daily_sheet(
    State(state): State<AppState>,
    Json(body): Json<SaveAttendanceRequest>,
) -> AppResult<Json<SaveAttendanceReport>> {
    if body.rows.is_empty() {
        return Err(AppError::Validation("No attendance rows to save".to_string()));
    }

    let profiles = state.api.directory().await?;
    let records = attendance::daily_records(body.date, &body.rows, &profiles);

    let mut tasks = JoinSet::new();
    for (index, record) in records.into_iter().enumerate() {
        let api = state.api.clone();
        tasks.spawn(async move {
            let result = api.save_daily_attendance(&record).await;
            (index, record.employee_id, result)
        });
    }

    let mut outcomes = Vec::with_capacity(body.rows.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, employee_id, Ok(()))) => outcomes.push((
                index,
                RowOutcome {
                    employee_id,
                    saved: true,
                    error: None,
                },
            )),
            Ok((index, employee_id, Err(e))) => {
                warn!("Attendance for {} on {} not saved: {}", employee_id, body.date, e);
                outcomes.push((
                    index,
                    RowOutcome {
                        employee_id,
                        saved: false,
                        error: Some(e.to_string()),
                    },
                ));
            }
            Err(e) => warn!("Attendance save task failed: {}", e),
        }
    }

    // A task that died never reported back; list its row as failed.
    let rows: Vec<RowOutcome> = body
        .rows
        .iter()
        .enumerate()
        .map(|(index, input)| {
            outcomes
                .iter()
                .find(|(i, _)| *i == index)
                .map(|(_, outcome)| outcome.clone())
                .unwrap_or_else(|| RowOutcome {
                    employee_id: input.employee_id.clone(),
                    saved: false,
                    error: Some("Save did not complete".to_string()),
                })
        })
        .collect();

    let saved = rows.iter().filter(|r| r.saved).count();
    let failed = rows.len() - saved;
    info!("Attendance for {}: {} saved, {} failed", body.date, saved, failed);

    Ok(Json(SaveAttendanceReport {
        saved,
        failed,
        rows,
    }))
}

/// Late and overtime minutes for a single row
#[utoipa::path(
    post,
    path = "/api/v1/attendance/minutes",
    request_body = MinutesRequest,
    responses(
        (status = 200, description = "Computed minutes", body = LateOvertime),
    ),
    tag = "Attendance"
)]
pub async fn calculate_minutes(Json(body): Json<MinutesRequest>) -> Json<LateOvertime> {
    Json(attendance::minutes_for(&body))
}
