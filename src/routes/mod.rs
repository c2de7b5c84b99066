// src/routes/mod.rs

use crate::{
    handlers::{
        attendance::{calculate_minutes, get_daily_sheet, get_tracker, save_daily_sheet},
        dashboard::get_salary_dashboard,
        directory::{
            create_employee, delete_employee, employee_daily_attendance, export_employees,
            get_employee, list_employees, update_employee,
        },
        general::{health_handler, root_handler},
        payroll::{
            create_advance, create_payment, get_payroll_sheet, list_advances, list_payments,
            update_advance,
        },
        revenue::{get_revenue_comparison, get_revenue_trend},
    },
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // ─── Dashboard ────────────────────────────────────────
        .route("/dashboard/salary", get(get_salary_dashboard))
        // ─── Employees ────────────────────────────────────────
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/export", get(export_employees))
        .route(
            "/employees/{employee_id}",
            get(get_employee)
                .patch(update_employee)
                .delete(delete_employee),
        )
        .route(
            "/employees/{employee_id}/daily-attendance",
            get(employee_daily_attendance),
        )
        // ─── Attendance ───────────────────────────────────────
        .route("/attendance/tracker", get(get_tracker))
        .route("/attendance/daily", get(get_daily_sheet).post(save_daily_sheet))
        .route("/attendance/minutes", post(calculate_minutes))
        // ─── Payroll ──────────────────────────────────────────
        .route("/payroll", get(get_payroll_sheet))
        .route("/payroll/advances", get(list_advances).post(create_advance))
        .route("/payroll/advances/{id}", patch(update_advance))
        .route("/payroll/payments", get(list_payments).post(create_payment))
        // ─── Revenue ──────────────────────────────────────────
        .route("/revenue/trend", get(get_revenue_trend))
        .route("/revenue/compare", get(get_revenue_comparison))
}

/// Full application: landing page, health, the versioned API and its docs.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{CreateEmployeeReply, DailyAttendanceEntry, RevenueTrendReply},
        test_support::{FakeHrApi, profile, salary_row},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn staffed() -> FakeHrApi {
        FakeHrApi {
            profiles: vec![profile("E1", "Asha", "Sales"), profile("E2", "Ravi", "Ops")],
            salary: vec![
                salary_row("E1", "Asha", 2025, "MAR", "30000"),
                salary_row("E2", "Ravi", 2025, "MAR", "50000"),
                salary_row("E1", "Asha", 2024, "SEP", "28000"),
            ],
            ..FakeHrApi::default()
        }
    }

    #[tokio::test]
    async fn dashboard_aggregates_latest_window() {
        let (_, state) = staffed().into_state();
        let (status, body) = call(
            build_app(state),
            "GET",
            "/api/v1/dashboard/salary?period=last_6_months",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_employees"], 2);
        assert_eq!(body["employees_change"], 100.0);
        assert_eq!(body["salary_distribution"][2]["range"], "40k-60k");
        assert_eq!(body["salary_distribution"][2]["count"], 1);
        assert_eq!(body["top_salaried_employees"][0]["name"], "Ravi");
        assert_eq!(body["current_range"]["start"], "2024-10-01");
    }

    #[tokio::test]
    async fn upstream_outage_is_a_bad_gateway() {
        let (_, state) = FakeHrApi {
            offline: true,
            ..FakeHrApi::default()
        }
        .into_state();
        let (status, body) = call(build_app(state), "GET", "/api/v1/dashboard/salary", None).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "Failed to load salary data");
    }

    #[tokio::test]
    async fn directory_pages_and_filters() {
        let (_, state) = staffed().into_state();
        let (status, body) = call(build_app(state), "GET", "/api/v1/employees?departments=Ops", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_entries"], 1);
        assert_eq!(body["entries"][0]["employee_id"], "E2");
        assert_eq!(body["entries"][0]["attendance_percentage"], 92.3);
        assert_eq!(body["page_numbers"], json!([1]));
    }

    #[tokio::test]
    async fn export_is_served_as_csv() {
        let (_, state) = staffed().into_state();
        let resp = build_app(state)
            .oneshot(Request::get("/api/v1/employees/export").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn employee_detail_and_missing_employee() {
        let (_, state) = staffed().into_state();
        let app = build_app(state);

        let (status, body) = call(app.clone(), "GET", "/api/v1/employees/E1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Asha");
        assert_eq!(body["ot_hours"], 6.0);

        let (status, _) = call(app, "GET", "/api/v1/employees/E404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_employee_validates_before_calling_upstream() {
        let (api, state) = staffed().into_state();
        let (status, body) = call(
            build_app(state),
            "POST",
            "/api/v1/employees",
            Some(json!({"first_name": "Mina"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("Last name"));
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_employee_surfaces_field_errors() {
        let (api, state) = FakeHrApi {
            create_reply: CreateEmployeeReply {
                success: false,
                errors: serde_json::from_value(json!({"email": ["Enter a valid email."]})).unwrap(),
                message: None,
            },
            ..FakeHrApi::default()
        }
        .into_state();
        let form = json!({
            "first_name": "Mina",
            "last_name": "Rao",
            "mobile_number": "9000000000",
            "department": "Packing",
            "designation": "Helper",
            "email": "not-an-email",
            "basic_salary": "24,000"
        });
        let (status, body) = call(build_app(state), "POST", "/api/v1/employees", Some(form)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("email: Enter a valid email."));
        let created = api.created.lock().unwrap();
        assert_eq!(created[0].professional_info.ot_charge, "100.00");
        assert_eq!(created[0].professional_info.off_days, vec!["SUNDAY"]);
    }

    #[tokio::test]
    async fn unchanged_update_makes_no_upstream_call() {
        let (api, state) = staffed().into_state();
        let app = build_app(state);

        let (status, body) = call(
            app.clone(),
            "PATCH",
            "/api/v1/employees/E1",
            Some(json!({"name": "Asha", "shift_start_time": "9:00 AM"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["updated"], false);
        assert!(api.updates.lock().unwrap().is_empty());

        let (_, body) = call(
            app,
            "PATCH",
            "/api/v1/employees/E1",
            Some(json!({"designation": "Supervisor", "employment_type": "Part Time"})),
        )
        .await;
        assert_eq!(body["updated"], true);
        assert_eq!(body["fields"]["employment_type"], "PART_TIME");
        assert_eq!(api.updates.lock().unwrap()[0].0, "E1");
    }

    #[tokio::test]
    async fn delete_employee_returns_no_content() {
        let (_, state) = staffed().into_state();
        let (status, _) = call(build_app(state), "DELETE", "/api/v1/employees/E2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn daily_sheet_and_batch_save() {
        let mut fake = staffed();
        fake.daily = vec![DailyAttendanceEntry {
            employee_id: "E2".to_string(),
            date: "2025-03-04".to_string(),
            attendance_status: "ABSENT".to_string(),
            ..DailyAttendanceEntry::default()
        }];
        fake.reject_daily_for = vec!["E2".to_string()];
        let (api, state) = fake.into_state();
        let app = build_app(state);

        let (status, body) = call(app.clone(), "GET", "/api/v1/attendance/daily?date=2025-03-04", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["clock_in"], "09:00");
        assert_eq!(body[0]["status"], "PRESENT");
        assert_eq!(body[1]["status"], "ABSENT");

        let save = json!({
            "date": "2025-03-04",
            "rows": [
                {"employee_id": "E1", "status": "PRESENT", "clock_in": "09:20", "clock_out": "18:00"},
                {"employee_id": "E2", "status": "HALF DAY", "clock_in": "09:00", "clock_out": "13:00"}
            ]
        });
        let (status, body) = call(app, "POST", "/api/v1/attendance/daily", Some(save)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["saved"], 1);
        assert_eq!(body["failed"], 1);
        assert_eq!(body["rows"][0]["employee_id"], "E1");
        assert_eq!(body["rows"][1]["saved"], false);

        let saved = api.saved_daily.lock().unwrap();
        assert_eq!((saved[0].late_minutes, saved[0].ot_minutes), (20, 60));
    }

    #[tokio::test]
    async fn minutes_endpoint() {
        let (_, state) = FakeHrApi::default().into_state();
        let (status, body) = call(
            build_app(state),
            "POST",
            "/api/v1/attendance/minutes",
            Some(json!({"clock_in": "09:15", "clock_out": "17:45", "status": "PRESENT"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"late_minutes": 15, "ot_minutes": 45}));
    }

    #[tokio::test]
    async fn tracker_rejects_month_without_year() {
        let (_, state) = FakeHrApi::default().into_state();
        let (status, _) = call(build_app(state), "GET", "/api/v1/attendance/tracker?month=MAR", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn payment_deduction_is_bounded_by_outstanding_advance() {
        let (api, state) = staffed().into_state();
        let app = build_app(state);

        let too_much = json!({
            "employee_id": "E1",
            "payment_date": "2025-03-31",
            "advance_deduction": "2500",
            "payment_method": "Cash"
        });
        let (status, _) = call(app.clone(), "POST", "/api/v1/payroll/payments", Some(too_much)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(api.saved_payments.lock().unwrap().is_empty());

        let ok = json!({
            "employee_id": "E1",
            "payment_date": "2025-03-31",
            "advance_deduction": "500",
            "payment_method": "Cash"
        });
        let (status, body) = call(app, "POST", "/api/v1/payroll/payments", Some(ok)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["amount_paid"], "29500");
        assert_eq!(body["payment_method"], "CASH");
    }

    #[tokio::test]
    async fn advance_fills_in_employee_name() {
        let (api, state) = staffed().into_state();
        let body = json!({
            "employee_id": "E2",
            "advance_date": "2025-03-10",
            "amount": "1500",
            "for_month": "Mar 2025",
            "payment_method": "bank"
        });
        let (status, _) = call(build_app(state), "POST", "/api/v1/payroll/advances", Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        let saved = api.saved_advances.lock().unwrap();
        assert_eq!(saved[0].1.employee_name, "Ravi");
        assert_eq!(saved[0].1.payment_method, "BANK_TRANSFER");
    }

    #[tokio::test]
    async fn payroll_sheet_keeps_latest_row() {
        let (_, state) = staffed().into_state();
        let (_, body) = call(build_app(state), "GET", "/api/v1/payroll?search=asha", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["month"], "MAR");
    }

    #[tokio::test]
    async fn revenue_degrades_to_zero() {
        let (_, state) = FakeHrApi {
            revenue: Some(RevenueTrendReply {
                labels: vec!["Jan".to_string(), "Feb".to_string()],
                data: vec![10.0, 12.5],
                trend: 25.0,
            }),
            ..FakeHrApi::default()
        }
        .into_state();
        let app = build_app(state);

        let (_, trend) = call(app.clone(), "GET", "/api/v1/revenue/trend?period=last_6_months", None).await;
        assert_eq!(trend["total"], 12.5);

        let (status, compare) = call(app, "GET", "/api/v1/revenue/compare?period_type=weekly", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(compare["total"], 0.0);
        assert_eq!(compare["chart_data"]["labels"], json!([]));
    }

    #[tokio::test]
    async fn health_reports_upstream_state() {
        let (_, state) = FakeHrApi {
            offline: true,
            ..FakeHrApi::default()
        }
        .into_state();
        let (status, body) = call(build_app(state), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["upstream"], "unreachable");
    }
}
