// src/services/salary.rs

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    models::{SalaryDashboard, SalaryRecord, StatusCount, TimePeriod},
    services::{aggregate, compare, numeric::round2, period},
};

/// Builds the salary dashboard for `period` from the full salary sheet.
pub fn build_dashboard(
    records: &[SalaryRecord],
    period: TimePeriod,
    today: NaiveDate,
) -> SalaryDashboard {
    let windows = period::resolve(records, period, today);
    let (current, previous) = period::split(records, &windows);

    debug!(
        ?period,
        current_rows = current.len(),
        previous_rows = previous.len(),
        "Building salary dashboard"
    );

    let agg = aggregate::aggregate(current);
    let previous_totals = aggregate::totals(previous);
    let changes = compare::compare(&agg.totals, &previous_totals);
    let totals = &agg.totals;

    let today_attendance = vec![
        StatusCount {
            status: "Present".to_string(),
            count: totals.present_days,
        },
        StatusCount {
            status: "Absent".to_string(),
            count: totals.absent_days(),
        },
    ];

    SalaryDashboard {
        period,
        current_range: windows.current.to_range(),
        previous_range: windows.previous.to_range(),

        total_employees: totals.employees,
        avg_attendance_percentage: round2(totals.attendance_percentage()),
        total_working_days: totals.max_working_days,
        total_ot_hours: totals.ot_hours,
        total_late_minutes: totals.late_minutes,

        employees_change: changes.employees_change,
        attendance_change: changes.attendance_change,
        late_minutes_change: changes.late_minutes_change,
        ot_hours_change: changes.ot_hours_change,

        department_distribution: agg.department_distribution(),
        department_data: agg.departments,
        salary_distribution: agg.salary_distribution,
        today_attendance,
        salary_trends: agg.salary_trends,
        ot_trends: agg.ot_trends,
        top_salaried_employees: agg.top_salaried,
    }
}
