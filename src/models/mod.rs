// src/models/mod.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::services::numeric;

mod wire;

use wire::{lenient_number, lenient_optional_string, lenient_string, lenient_year};

// ─── Periods ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimePeriod {
    #[default]
    #[serde(rename = "this_month")]
    ThisMonth,
    #[serde(rename = "last_6_months")]
    Last6Months,
    #[serde(rename = "last_12_months")]
    Last12Months,
    #[serde(rename = "last_5_years")]
    Last5Years,
}

impl TimePeriod {
    /// Number of calendar months the window spans, ending at its anchor month.
    pub fn months(self) -> i64 {
        match self {
            TimePeriod::ThisMonth => 1,
            TimePeriod::Last6Months => 6,
            TimePeriod::Last12Months => 12,
            TimePeriod::Last5Years => 60,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    /// Defaults to `this_month`
    pub period: Option<TimePeriod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// ─── Salary Sheet ─────────────────────────────────────────────────────────────

/// One row of the upstream salary sheet: one employee for one pay month.
/// Every figure arrives as text; read them through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalaryRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub basic_salary: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub days_present: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub days_absent: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sl_wo_ot_wo_late: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ot_hours: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub basic_salary_per_hour: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ot_charges: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub late_minutes: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub basic_salary_per_minute: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub incentive: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub late_charges: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub salary_wo_advance_deduction: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub adv_paid_on_25th: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub repayment_of_old_adv: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub net_payable: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub total_old_advance: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub final_balance_advance: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tds: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sal_before_tds: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub advance: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_advance: Option<String>,
}

impl SalaryRecord {
    pub fn salary(&self) -> Decimal {
        numeric::parse_decimal(&self.basic_salary)
    }

    pub fn net_payable(&self) -> Decimal {
        numeric::parse_decimal(&self.net_payable)
    }

    pub fn present_days(&self) -> f64 {
        numeric::parse_f64(&self.days_present)
    }

    pub fn absent_days(&self) -> f64 {
        numeric::parse_f64(&self.days_absent)
    }

    pub fn ot_hours(&self) -> f64 {
        numeric::parse_f64(&self.ot_hours)
    }

    pub fn late_minutes(&self) -> f64 {
        numeric::parse_f64(&self.late_minutes)
    }

    /// Advance still owed: the explicit total when the sheet has one, else the old balance.
    pub fn outstanding_advance(&self) -> Decimal {
        numeric::parse_decimal(self.total_advance.as_deref().unwrap_or(&self.total_old_advance))
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Query forwarded to the salary-data endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SalaryFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
}

impl SalaryFilter {
    pub fn for_employee(employee_id: &str) -> Self {
        Self {
            employee_id: Some(employee_id.to_string()),
            ..Self::default()
        }
    }
}

// ─── Salary Dashboard ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DepartmentSummary {
    pub department: String,
    pub headcount: usize,
    pub total_salary: Decimal,
    pub average_salary: Decimal,
    pub attendance_percentage: f64,
    pub total_ot_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalaryBand {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalaryTrendPoint {
    /// e.g. "Mar 2025"
    pub month: String,
    pub average_salary: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OtTrendPoint {
    pub month: String,
    pub average_ot_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopEarner {
    pub name: String,
    pub salary: Decimal,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DepartmentHeadcount {
    pub department: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalaryDashboard {
    pub period: TimePeriod,
    pub current_range: Option<TimeRange>,
    pub previous_range: Option<TimeRange>,

    pub total_employees: usize,
    pub avg_attendance_percentage: f64,
    pub total_working_days: f64,
    pub total_ot_hours: f64,
    pub total_late_minutes: f64,

    pub employees_change: f64,
    pub attendance_change: f64,
    pub late_minutes_change: f64,
    pub ot_hours_change: f64,

    pub department_data: Vec<DepartmentSummary>,
    pub salary_distribution: Vec<SalaryBand>,
    pub today_attendance: Vec<StatusCount>,
    pub salary_trends: Vec<SalaryTrendPoint>,
    pub ot_trends: Vec<OtTrendPoint>,
    pub top_salaried_employees: Vec<TopEarner>,
    pub department_distribution: Vec<DepartmentHeadcount>,
}

// ─── Employee Directory ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EmployeeProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mobile_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub designation: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employment_type: String,
    #[serde(default, alias = "location_branch", deserialize_with = "lenient_string")]
    pub branch_location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shift_start_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub shift_end_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub basic_salary: String,
}

/// A directory profile joined with the employee's salary-sheet history.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DirectoryEntry {
    pub employee_id: String,
    pub name: String,
    pub mobile_number: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub employment_type: String,
    pub branch_location: String,
    /// Present days over recorded days, in percent; absent without history
    pub attendance_percentage: Option<f64>,
    /// Absent when the employee has no overtime on record
    pub ot_hours: Option<f64>,
    pub shift_start_time: String,
    pub shift_end_time: String,
    pub basic_salary: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DirectoryQuery {
    /// Case-insensitive match on name, id, department or designation
    pub search: Option<String>,
    /// Comma-separated department names
    pub departments: Option<String>,
    /// 1-based page number
    pub page: Option<usize>,
}

/// Entry in the compact page strip, e.g. `1 … 4 5 6 … 20`.
/// Serializes as the page number, or `"..."` for a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Gap,
}

impl Serialize for PageMarker {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageMarker::Page(n) => serializer.serialize_u64(*n as u64),
            PageMarker::Gap => serializer.serialize_str("..."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DirectoryPage {
    pub entries: Vec<DirectoryEntry>,
    pub page: usize,
    pub total_pages: usize,
    pub total_entries: usize,
    #[schema(value_type = Vec<Object>)]
    pub page_numbers: Vec<PageMarker>,
}

// ─── Create / Update Employee ─────────────────────────────────────────────────

/// Weekly off days as explicit flags. Sunday is off unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct OffDays {
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl Default for OffDays {
    fn default() -> Self {
        Self {
            monday: false,
            tuesday: false,
            wednesday: false,
            thursday: false,
            friday: false,
            saturday: false,
            sunday: true,
        }
    }
}

impl OffDays {
    /// Upper-case day names in week order, the form the create endpoint expects.
    pub fn to_list(self) -> Vec<String> {
        [
            (self.monday, "MONDAY"),
            (self.tuesday, "TUESDAY"),
            (self.wednesday, "WEDNESDAY"),
            (self.thursday, "THURSDAY"),
            (self.friday, "FRIDAY"),
            (self.saturday, "SATURDAY"),
            (self.sunday, "SUNDAY"),
        ]
        .into_iter()
        .filter(|(off, _)| *off)
        .map(|(_, day)| day.to_string())
        .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateEmployeeRequest {
    // Personal
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub gender: String,
    pub nationality: String,
    pub address: String,
    pub city: String,
    pub state: String,
    // Professional
    pub department: String,
    pub designation: String,
    pub employment_type: String,
    pub date_of_joining: String,
    pub location_branch: String,
    pub shift_start_time: String,
    pub shift_end_time: String,
    /// May contain thousands separators, e.g. "45,000"
    pub basic_salary: String,
    /// May carry a trailing percent sign, e.g. "10%"
    pub tds_percentage: String,
    pub off_days: OffDays,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    pub date_of_birth: String,
    pub marital_status: String,
    pub gender: String,
    pub nationality: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfessionalInfo {
    pub department: String,
    pub designation: String,
    pub employment_type: String,
    pub date_of_joining: String,
    pub location_branch: String,
    pub shift_start_time: String,
    pub shift_end_time: String,
    pub basic_salary: String,
    pub tds_percentage: String,
    pub ot_charge: String,
    pub off_days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NewEmployeePayload {
    pub personal_info: PersonalInfo,
    pub professional_info: ProfessionalInfo,
}

/// Reply of the upstream create endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployeeReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<Map<String, Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Edited profile fields; only the ones that differ from the stored profile are sent on.
pub type EmployeeUpdate = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UpdateEmployeeResponse {
    pub updated: bool,
    #[schema(value_type = Object)]
    pub fields: Map<String, Value>,
}

// ─── Attendance ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum AttendanceStatus {
    #[serde(rename = "PRESENT", alias = "Present")]
    Present,
    #[serde(rename = "ABSENT", alias = "Absent")]
    Absent,
    #[serde(rename = "HALF DAY", alias = "Half Day")]
    HalfDay,
    #[serde(rename = "PAID LEAVE", alias = "Paid Leave")]
    PaidLeave,
}

impl AttendanceStatus {
    /// Only days actually worked accrue late and overtime minutes.
    pub fn is_worked(self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::HalfDay)
    }
}

/// Monthly attendance roll-up row from the attendance endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub department: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub present_days: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub absent_days: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ot_hours: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub late_minutes: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrackerQuery {
    pub period: Option<TimePeriod>,
    /// Three-letter month for a single custom month; requires `year`
    pub month: Option<String>,
    pub year: Option<i32>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthInfo {
    pub month: String,
    pub year: i32,
    pub total_days: u32,
    pub working_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackerRow {
    pub employee_id: String,
    pub name: String,
    /// Only reported for single-month views
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub calendar_days: u32,
    pub total_working_days: u32,
    pub present_days: f64,
    pub absent_days: f64,
    pub attendance_percentage: Option<f64>,
    pub ot_hours: f64,
    pub late_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceTracker {
    pub months: Vec<MonthInfo>,
    pub rows: Vec<TrackerRow>,
    /// Months present in the data, newest first, e.g. "MAR 2025"
    pub available_months: Vec<String>,
}

/// Row posted to the daily-attendance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAttendance {
    pub employee_id: String,
    pub date: NaiveDate,
    pub attendance_status: AttendanceStatus,
    pub check_in: String,
    pub check_out: String,
    pub late_minutes: i64,
    pub ot_minutes: i64,
}

/// Row read back from the daily-attendance endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyAttendanceEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub attendance_status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub check_in: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub check_out: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub late_minutes: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub ot_minutes: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailySheetQuery {
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailySheetRow {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub clock_in: String,
    pub clock_out: String,
    pub status: AttendanceStatus,
    pub late_minutes: i64,
    pub ot_minutes: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DailyRowInput {
    pub employee_id: String,
    pub status: AttendanceStatus,
    pub clock_in: String,
    pub clock_out: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveAttendanceRequest {
    pub date: NaiveDate,
    pub rows: Vec<DailyRowInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RowOutcome {
    pub employee_id: String,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SaveAttendanceReport {
    pub saved: usize,
    pub failed: usize,
    pub rows: Vec<RowOutcome>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MinutesRequest {
    #[serde(default)]
    pub shift_start: Option<String>,
    #[serde(default)]
    pub shift_end: Option<String>,
    pub clock_in: String,
    pub clock_out: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct LateOvertime {
    pub late_minutes: i64,
    pub ot_minutes: i64,
}

// ─── Payroll, Advances & Payments ─────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
pub struct PayrollQuery {
    /// Comma-separated department names
    pub departments: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AdvanceEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub advance_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub for_month: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_method: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remarks: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdvanceRequest {
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub advance_date: NaiveDate,
    pub amount: Decimal,
    /// Pay month the advance is recovered from, e.g. "Mar 2025"
    #[serde(default)]
    pub for_month: String,
    pub payment_method: String,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdvancePayload {
    pub employee_id: String,
    pub employee_name: String,
    pub advance_date: NaiveDate,
    pub amount: Decimal,
    pub for_month: String,
    pub payment_method: String,
    pub remarks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub employee_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub net_payable: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub advance_deduction: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amount_paid: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pay_period: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_method: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentRequest {
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub payment_date: NaiveDate,
    /// Looked up from the employee's salary row for the payment month when omitted
    #[serde(default)]
    pub net_payable: Option<Decimal>,
    #[serde(default)]
    pub advance_deduction: Decimal,
    #[serde(default)]
    pub pay_period: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaymentPayload {
    pub employee_id: String,
    pub employee_name: String,
    pub payment_date: NaiveDate,
    pub net_payable: Decimal,
    pub advance_deduction: Decimal,
    /// Net payable less the advance recovered in this payment
    pub amount_paid: Decimal,
    pub pay_period: String,
    pub payment_method: String,
}

// ─── Revenue ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RevenuePeriod {
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[default]
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_6_months")]
    Last6Months,
    #[serde(rename = "last_year")]
    LastYear,
    #[serde(rename = "last_5_years")]
    Last5Years,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePeriodType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueTrendQuery {
    pub period: Option<RevenuePeriod>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueCompareQuery {
    pub period_type: Option<RevenuePeriodType>,
}

/// Reply of the upstream revenue-trend endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevenueTrendReply {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub data: Vec<f64>,
    #[serde(default)]
    pub trend: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevenuePoint {
    #[serde(default)]
    pub revenue: f64,
}

/// Reply of the upstream period-type revenue endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueComparisonReply {
    pub current_period: RevenuePoint,
    pub previous_period: RevenuePoint,
    #[serde(default)]
    pub growth_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct RevenueData {
    pub total: f64,
    pub trend: f64,
    pub chart_data: ChartSeries,
}
