// src/services/hr_api.rs

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, error};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        AdvanceEntry, AdvancePayload, AttendanceRecord, CreateEmployeeReply, DailyAttendance,
        DailyAttendanceEntry, EmployeeProfile, NewEmployeePayload, Payment, PaymentPayload,
        RevenueComparisonReply, RevenuePeriod, RevenuePeriodType, RevenueTrendReply, SalaryFilter,
        SalaryRecord,
    },
};

/// Everything the dashboard reads from or writes to the HR/Excel service.
#[async_trait]
pub trait HrApi: Send + Sync {
    async fn directory(&self) -> AppResult<Vec<EmployeeProfile>>;

    async fn employee(&self, employee_id: &str) -> AppResult<EmployeeProfile> {
        self.directory()
            .await?
            .into_iter()
            .find(|p| p.employee_id == employee_id)
            .ok_or_else(|| AppError::NotFound(format!("Employee '{employee_id}'")))
    }

    async fn salary_records(&self, filter: &SalaryFilter) -> AppResult<Vec<SalaryRecord>>;
    async fn attendance_records(&self) -> AppResult<Vec<AttendanceRecord>>;
    async fn daily_attendance(&self, employee_id: Option<&str>) -> AppResult<Vec<DailyAttendanceEntry>>;
    async fn save_daily_attendance(&self, record: &DailyAttendance) -> AppResult<()>;

    async fn create_employee(&self, payload: &NewEmployeePayload) -> AppResult<CreateEmployeeReply>;
    async fn update_employee(
        &self,
        employee_id: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<()>;
    async fn delete_employee(&self, employee_id: &str) -> AppResult<()>;

    async fn advances(&self) -> AppResult<Vec<AdvanceEntry>>;
    /// Creates the entry, or replaces entry `id` when given.
    async fn save_advance(&self, id: Option<i64>, payload: &AdvancePayload) -> AppResult<AdvanceEntry>;
    async fn payments(&self) -> AppResult<Vec<Payment>>;
    async fn create_payment(&self, payload: &PaymentPayload) -> AppResult<Payment>;

    async fn revenue_trend(&self, period: RevenuePeriod) -> AppResult<RevenueTrendReply>;
    async fn revenue_comparison(&self, period_type: RevenuePeriodType) -> AppResult<RevenueComparisonReply>;

    /// Cheap reachability probe for the health check.
    async fn ping(&self) -> bool;
}

#[derive(Clone)]
pub struct HrApiClient {
    client: Client,
    base_url: String,
}

impl HrApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends the request and rejects non-2xx replies, logging what came back.
    async fn send(&self, req: RequestBuilder, what: &str) -> AppResult<Response> {
        let resp = req.send().await.map_err(|e| {
            error!("Upstream request for {} failed: {}", what, e);
            AppError::Upstream(format!("Failed to load {what}"))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("Upstream returned {} for {}: {}", status, what, body);
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(AppError::NotFound(what.to_string()));
            }
            return Err(AppError::Upstream(format!("Failed to load {what}")));
        }
        Ok(resp)
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder, what: &str) -> AppResult<T> {
        let resp = self.send(req, what).await?;
        resp.json().await.map_err(|e| {
            error!("Could not decode upstream {}: {}", what, e);
            AppError::Upstream(format!("Failed to load {what}"))
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, what: &str) -> AppResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.json(self.request(Method::POST, path).json(body), what).await
    }
}

#[async_trait]
impl HrApi for HrApiClient {
    async fn directory(&self) -> AppResult<Vec<EmployeeProfile>> {
        let req = self.request(Method::GET, "/api/excel/employees/get_directory_data/");
        self.json(req, "employee directory").await
    }

    async fn salary_records(&self, filter: &SalaryFilter) -> AppResult<Vec<SalaryRecord>> {
        debug!(?filter, "Fetching salary data");
        let req = self.request(Method::GET, "/api/excel/salary-data/").query(filter);
        self.json(req, "salary data").await
    }

    async fn attendance_records(&self) -> AppResult<Vec<AttendanceRecord>> {
        let req = self.request(Method::GET, "/api/excel/attendance/");
        self.json(req, "attendance data").await
    }

    async fn daily_attendance(&self, employee_id: Option<&str>) -> AppResult<Vec<DailyAttendanceEntry>> {
        let mut req = self.request(Method::GET, "/api/excel/daily-attendance/");
        if let Some(id) = employee_id {
            req = req.query(&[("employee_id", id)]);
        }
        self.json(req, "daily attendance").await
    }

    async fn save_daily_attendance(&self, record: &DailyAttendance) -> AppResult<()> {
        let req = self
            .request(Method::POST, "/api/excel/daily-attendance/")
            .json(record);
        self.send(req, "daily attendance").await?;
        Ok(())
    }

    async fn create_employee(&self, payload: &NewEmployeePayload) -> AppResult<CreateEmployeeReply> {
        let resp = self
            .request(Method::POST, "/api/excel/create-employee/")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Create employee request failed: {}", e);
                AppError::Upstream("Failed to create employee".to_string())
            })?;

        // Field errors come back on a 4xx with the same reply shape.
        let status = resp.status();
        let reply = resp.json::<CreateEmployeeReply>().await.map_err(|e| {
            error!("Could not decode create-employee reply ({}): {}", status, e);
            AppError::Upstream("Failed to create employee".to_string())
        })?;
        Ok(CreateEmployeeReply {
            success: reply.success && status.is_success(),
            ..reply
        })
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<()> {
        let req = self
            .request(Method::PATCH, "/api/excel/employees/update_by_employee_id/")
            .query(&[("employee_id", employee_id)])
            .json(fields);
        self.send(req, "employee update").await?;
        Ok(())
    }

    async fn delete_employee(&self, employee_id: &str) -> AppResult<()> {
        let req = self
            .request(Method::DELETE, "/api/excel/employees/delete_by_employee_id/")
            .query(&[("employee_id", employee_id)]);
        self.send(req, "employee").await?;
        Ok(())
    }

    async fn advances(&self) -> AppResult<Vec<AdvanceEntry>> {
        let req = self.request(Method::GET, "/api/excel/advance-ledger/");
        self.json(req, "advance ledger").await
    }

    async fn save_advance(&self, id: Option<i64>, payload: &AdvancePayload) -> AppResult<AdvanceEntry> {
        match id {
            Some(id) => {
                let req = self
                    .request(Method::PATCH, &format!("/api/excel/advance-ledger/{id}/"))
                    .json(payload);
                self.json(req, "advance entry").await
            }
            None => {
                self.post_json("/api/excel/advance-ledger/", payload, "advance entry")
                    .await
            }
        }
    }

    async fn payments(&self) -> AppResult<Vec<Payment>> {
        let req = self.request(Method::GET, "/api/excel/payments/");
        self.json(req, "payments").await
    }

    async fn create_payment(&self, payload: &PaymentPayload) -> AppResult<Payment> {
        self.post_json("/api/excel/payments/", payload, "payment").await
    }

    async fn revenue_trend(&self, period: RevenuePeriod) -> AppResult<RevenueTrendReply> {
        let req = self
            .request(Method::GET, "/data/revenue-trend/")
            .query(&[("time_period", period.as_param())]);
        self.json(req, "revenue trend").await
    }

    async fn revenue_comparison(&self, period_type: RevenuePeriodType) -> AppResult<RevenueComparisonReply> {
        let req = self
            .request(Method::GET, "/api/revenue/")
            .query(&[("period_type", period_type.as_param()), ("category", "all")]);
        self.json(req, "revenue").await
    }

    async fn ping(&self) -> bool {
        self.request(Method::GET, "/api/excel/employees/get_directory_data/")
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}
