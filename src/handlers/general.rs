use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::json;

/// Landing page listing the dashboard's routes
pub async fn root_handler() -> impl IntoResponse {
    Html(r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>Tally HR Dashboard API</title>
  <style>
    body { font-family: system-ui, sans-serif; background: #f8fafc; color: #0f172a; margin: 0; padding: 40px 20px; }
    main { max-width: 820px; margin: 0 auto; }
    h1 { font-size: 2.2rem; margin-bottom: 4px; color: #0d9488; }
    .lead { color: #475569; margin-top: 0; }
    .links a { display: inline-block; margin-right: 16px; color: #0d9488; font-weight: 600; }
    section { background: #fff; border: 1px solid #e2e8f0; border-radius: 10px; padding: 16px 24px; margin-top: 24px; }
    h4 { text-transform: uppercase; letter-spacing: 0.08em; font-size: 0.75rem; color: #64748b; margin: 16px 0 6px; }
    .r { display: flex; gap: 12px; padding: 5px 0; font-size: 0.85rem; }
    .m { font-family: monospace; font-weight: 700; min-width: 56px; }
    .p { font-family: monospace; flex: 1; }
    .d { color: #64748b; }
  </style>
</head>
<body>
<main>
  <h1>Tally HR Dashboard</h1>
  <p class="lead">Salary, attendance, directory and payroll views over the HR spreadsheet service.</p>
  <p class="links"><a href="/docs">Swagger UI</a><a href="/health">Health</a></p>

  <section>
    <h4>Dashboard</h4>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/dashboard/salary?period=</span><span class="d">Salary dashboard with period comparison</span></div>

    <h4>Employees</h4>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/employees</span><span class="d">Directory with attendance and OT, paginated</span></div>
    <div class="r"><span class="m">POST</span><span class="p">/api/v1/employees</span><span class="d">Add an employee</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/employees/export</span><span class="d">Directory as CSV</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/employees/{employee_id}</span><span class="d">Employee details</span></div>
    <div class="r"><span class="m">PATCH</span><span class="p">/api/v1/employees/{employee_id}</span><span class="d">Update changed profile fields</span></div>
    <div class="r"><span class="m">DELETE</span><span class="p">/api/v1/employees/{employee_id}</span><span class="d">Remove an employee</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/employees/{employee_id}/daily-attendance</span><span class="d">Daily attendance history</span></div>

    <h4>Attendance</h4>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/attendance/tracker</span><span class="d">Monthly attendance roll-up</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/attendance/daily?date=</span><span class="d">The day's attendance sheet</span></div>
    <div class="r"><span class="m">POST</span><span class="p">/api/v1/attendance/daily</span><span class="d">Save the day's sheet</span></div>
    <div class="r"><span class="m">POST</span><span class="p">/api/v1/attendance/minutes</span><span class="d">Late and overtime minutes for one row</span></div>

    <h4>Payroll</h4>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/payroll</span><span class="d">Latest salary row per employee</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/payroll/advances</span><span class="d">Advance ledger</span></div>
    <div class="r"><span class="m">POST</span><span class="p">/api/v1/payroll/advances</span><span class="d">Record an advance</span></div>
    <div class="r"><span class="m">PATCH</span><span class="p">/api/v1/payroll/advances/{id}</span><span class="d">Edit an advance</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/payroll/payments</span><span class="d">Salary payments</span></div>
    <div class="r"><span class="m">POST</span><span class="p">/api/v1/payroll/payments</span><span class="d">Record a payment</span></div>

    <h4>Revenue</h4>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/revenue/trend?period=</span><span class="d">Revenue trend series</span></div>
    <div class="r"><span class="m">GET</span><span class="p">/api/v1/revenue/compare?period_type=</span><span class="d">Current vs previous period</span></div>
  </section>
</main>
</body>
</html>"#)
}

/// Liveness plus upstream reachability
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.api.ping().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "upstream": "reachable",
                "service": "tally-dashboard",
                "version": env!("CARGO_PKG_VERSION")
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "upstream": "unreachable",
                "upstream_url": state.config.upstream_base_url,
            })),
        )
    }
}
