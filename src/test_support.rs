// In-memory stand-in for the HR service, used by the router tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        AdvanceEntry, AdvancePayload, AttendanceRecord, CreateEmployeeReply, DailyAttendance,
        DailyAttendanceEntry, EmployeeProfile, NewEmployeePayload, Payment, PaymentPayload,
        RevenueComparisonReply, RevenuePeriod, RevenuePeriodType, RevenueTrendReply, SalaryFilter,
        SalaryRecord,
    },
    services::hr_api::HrApi,
    state::AppState,
};

#[derive(Default)]
pub struct FakeHrApi {
    pub profiles: Vec<EmployeeProfile>,
    pub salary: Vec<SalaryRecord>,
    pub attendance: Vec<AttendanceRecord>,
    pub daily: Vec<DailyAttendanceEntry>,
    pub advances: Vec<AdvanceEntry>,
    pub payments: Vec<Payment>,
    pub create_reply: CreateEmployeeReply,
    pub revenue: Option<RevenueTrendReply>,
    /// Every read fails as if the HR service were down
    pub offline: bool,
    /// Daily saves for these employee ids fail
    pub reject_daily_for: Vec<String>,

    pub saved_daily: Mutex<Vec<DailyAttendance>>,
    pub created: Mutex<Vec<NewEmployeePayload>>,
    pub updates: Mutex<Vec<(String, Map<String, Value>)>>,
    pub saved_advances: Mutex<Vec<(Option<i64>, AdvancePayload)>>,
    pub saved_payments: Mutex<Vec<PaymentPayload>>,
}

impl FakeHrApi {
    fn check(&self, what: &str) -> AppResult<()> {
        if self.offline {
            Err(AppError::Upstream(format!("Failed to load {what}")))
        } else {
            Ok(())
        }
    }

    pub fn into_state(self) -> (Arc<FakeHrApi>, AppState) {
        let api = Arc::new(self);
        let state = AppState::new(api.clone(), Config::default());
        (api, state)
    }
}

pub fn profile(id: &str, name: &str, department: &str) -> EmployeeProfile {
    EmployeeProfile {
        employee_id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        designation: "Operator".to_string(),
        employment_type: "FULL_TIME".to_string(),
        shift_start_time: "09:00".to_string(),
        shift_end_time: "17:00".to_string(),
        basic_salary: "30000".to_string(),
        ..EmployeeProfile::default()
    }
}

pub fn salary_row(id: &str, name: &str, year: i32, month: &str, salary: &str) -> SalaryRecord {
    SalaryRecord {
        employee_id: id.to_string(),
        name: name.to_string(),
        year,
        month: month.to_string(),
        department: "Sales".to_string(),
        basic_salary: salary.to_string(),
        days_present: "24".to_string(),
        days_absent: "2".to_string(),
        ot_hours: "3".to_string(),
        late_minutes: "15".to_string(),
        net_payable: salary.to_string(),
        total_old_advance: "2000".to_string(),
        ..SalaryRecord::default()
    }
}

#[async_trait]
impl HrApi for FakeHrApi {
    async fn directory(&self) -> AppResult<Vec<EmployeeProfile>> {
        self.check("employee directory")?;
        Ok(self.profiles.clone())
    }

    async fn salary_records(&self, filter: &SalaryFilter) -> AppResult<Vec<SalaryRecord>> {
        self.check("salary data")?;
        Ok(self
            .salary
            .iter()
            .filter(|r| filter.employee_id.as_ref().is_none_or(|id| &r.employee_id == id))
            .cloned()
            .collect())
    }

    async fn attendance_records(&self) -> AppResult<Vec<AttendanceRecord>> {
        self.check("attendance data")?;
        Ok(self.attendance.clone())
    }

    async fn daily_attendance(&self, employee_id: Option<&str>) -> AppResult<Vec<DailyAttendanceEntry>> {
        self.check("daily attendance")?;
        Ok(self
            .daily
            .iter()
            .filter(|e| employee_id.is_none_or(|id| e.employee_id == id))
            .cloned()
            .collect())
    }

    async fn save_daily_attendance(&self, record: &DailyAttendance) -> AppResult<()> {
        if self.reject_daily_for.contains(&record.employee_id) {
            return Err(AppError::Upstream("Failed to load daily attendance".to_string()));
        }
        self.saved_daily.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn create_employee(&self, payload: &NewEmployeePayload) -> AppResult<CreateEmployeeReply> {
        self.created.lock().unwrap().push(payload.clone());
        Ok(self.create_reply.clone())
    }

    async fn update_employee(&self, employee_id: &str, fields: &Map<String, Value>) -> AppResult<()> {
        self.updates
            .lock()
            .unwrap()
            .push((employee_id.to_string(), fields.clone()));
        Ok(())
    }

    async fn delete_employee(&self, employee_id: &str) -> AppResult<()> {
        if self.profiles.iter().any(|p| p.employee_id == employee_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Employee '{employee_id}'")))
        }
    }

    async fn advances(&self) -> AppResult<Vec<AdvanceEntry>> {
        self.check("advance ledger")?;
        Ok(self.advances.clone())
    }

    async fn save_advance(&self, id: Option<i64>, payload: &AdvancePayload) -> AppResult<AdvanceEntry> {
        self.saved_advances.lock().unwrap().push((id, payload.clone()));
        Ok(AdvanceEntry {
            id: id.or(Some(1)),
            employee_id: payload.employee_id.clone(),
            employee_name: payload.employee_name.clone(),
            advance_date: payload.advance_date.to_string(),
            amount: payload.amount.to_string(),
            for_month: payload.for_month.clone(),
            payment_method: payload.payment_method.clone(),
            remarks: payload.remarks.clone(),
        })
    }

    async fn payments(&self) -> AppResult<Vec<Payment>> {
        self.check("payments")?;
        Ok(self.payments.clone())
    }

    async fn create_payment(&self, payload: &PaymentPayload) -> AppResult<Payment> {
        self.saved_payments.lock().unwrap().push(payload.clone());
        Ok(Payment {
            id: Some(1),
            employee_id: payload.employee_id.clone(),
            employee_name: payload.employee_name.clone(),
            payment_date: payload.payment_date.to_string(),
            net_payable: payload.net_payable.to_string(),
            advance_deduction: payload.advance_deduction.to_string(),
            amount_paid: payload.amount_paid.to_string(),
            pay_period: payload.pay_period.clone(),
            payment_method: payload.payment_method.clone(),
        })
    }

    async fn revenue_trend(&self, _period: RevenuePeriod) -> AppResult<RevenueTrendReply> {
        self.revenue
            .clone()
            .ok_or_else(|| AppError::Upstream("Failed to load revenue trend".to_string()))
    }

    async fn revenue_comparison(&self, _period_type: RevenuePeriodType) -> AppResult<RevenueComparisonReply> {
        Err(AppError::Upstream("Failed to load revenue".to_string()))
    }

    async fn ping(&self) -> bool {
        !self.offline
    }
}
