// src/openapi.rs

use crate::models::{
    AdvanceEntry, AdvanceRequest, AttendanceRecord, AttendanceStatus, AttendanceTracker,
    ChartSeries, CreateEmployeeReply, CreateEmployeeRequest, DailyAttendanceEntry,
    DailyRowInput, DailySheetRow, DepartmentHeadcount, DepartmentSummary, DirectoryEntry,
    DirectoryPage, LateOvertime, MinutesRequest, MonthInfo, OffDays, OtTrendPoint, Payment,
    PaymentRequest, RevenueData, RevenuePeriod, RevenuePeriodType, RowOutcome, SalaryBand,
    SalaryDashboard, SalaryRecord, SalaryTrendPoint, SaveAttendanceReport,
    SaveAttendanceRequest, StatusCount, TimePeriod, TimeRange, TopEarner, TrackerRow,
    UpdateEmployeeResponse,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tally HR Dashboard API",
        version = "0.1.0",
        description = "Salary, attendance, directory, payroll and revenue views computed \
            from the HR spreadsheet service. Every figure is read fresh from upstream; \
            this service keeps no data of its own.",
        license(name = "MIT")
    ),
    paths(
        // Dashboard
        crate::handlers::dashboard::get_salary_dashboard,
        // Employees
        crate::handlers::directory::list_employees,
        crate::handlers::directory::export_employees,
        crate::handlers::directory::create_employee,
        crate::handlers::directory::get_employee,
        crate::handlers::directory::update_employee,
        crate::handlers::directory::delete_employee,
        crate::handlers::directory::employee_daily_attendance,
        // Attendance
        crate::handlers::attendance::get_tracker,
        crate::handlers::attendance::get_daily_sheet,
        crate::handlers::attendance::save_daily_sheet,
        crate::handlers::attendance::calculate_minutes,
        // Payroll
        crate::handlers::payroll::get_payroll_sheet,
        crate::handlers::payroll::list_advances,
        crate::handlers::payroll::create_advance,
        crate::handlers::payroll::update_advance,
        crate::handlers::payroll::list_payments,
        crate::handlers::payroll::create_payment,
        // Revenue
        crate::handlers::revenue::get_revenue_trend,
        crate::handlers::revenue::get_revenue_comparison,
    ),
    components(
        schemas(
            TimePeriod, TimeRange, SalaryRecord, SalaryDashboard, DepartmentSummary,
            SalaryBand, StatusCount, SalaryTrendPoint, OtTrendPoint, TopEarner,
            DepartmentHeadcount,
            DirectoryEntry, DirectoryPage, CreateEmployeeRequest, OffDays,
            CreateEmployeeReply, UpdateEmployeeResponse,
            AttendanceStatus, AttendanceRecord, AttendanceTracker, MonthInfo, TrackerRow,
            DailyAttendanceEntry, DailySheetRow, DailyRowInput, SaveAttendanceRequest,
            SaveAttendanceReport, RowOutcome, MinutesRequest, LateOvertime,
            AdvanceEntry, AdvanceRequest, Payment, PaymentRequest,
            RevenuePeriod, RevenuePeriodType, RevenueData, ChartSeries,
        )
    ),
    tags(
        (name = "Dashboard", description = "Salary dashboard with period-over-period comparison"),
        (name = "Employees", description = "Directory, profiles and CSV export"),
        (name = "Attendance", description = "Monthly tracker and the daily operations log"),
        (name = "Payroll", description = "Payroll sheet, advances and payments"),
        (name = "Revenue", description = "Revenue trend and period comparison"),
    )
)]
pub struct ApiDoc;
