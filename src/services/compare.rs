// src/services/compare.rs

use crate::services::{aggregate::PeriodTotals, numeric::round1};

const CHANGE_LIMIT: f64 = 999.9;
const ATTENDANCE_LIMIT: f64 = 100.0;

/// Period-over-period deltas shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodComparison {
    pub employees_change: f64,
    pub attendance_change: f64,
    pub late_minutes_change: f64,
    pub ot_hours_change: f64,
}

/// Relative change in percent. Growth from nothing counts as +100%.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else if current > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Attendance moves in percentage points, and only against a period that has some.
pub fn attendance_change(current_pct: f64, previous_pct: f64) -> f64 {
    if previous_pct > 0.0 { current_pct - previous_pct } else { 0.0 }
}

pub fn cap_and_round(value: f64, limit: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    round1(value).clamp(-limit, limit)
}

pub fn compare(current: &PeriodTotals, previous: &PeriodTotals) -> PeriodComparison {
    PeriodComparison {
        employees_change: cap_and_round(
            percentage_change(current.employees as f64, previous.employees as f64),
            CHANGE_LIMIT,
        ),
        attendance_change: cap_and_round(
            attendance_change(current.attendance_percentage(), previous.attendance_percentage()),
            ATTENDANCE_LIMIT,
        ),
        late_minutes_change: cap_and_round(
            percentage_change(current.late_minutes, previous.late_minutes),
            CHANGE_LIMIT,
        ),
        ot_hours_change: cap_and_round(
            percentage_change(current.ot_hours, previous.ot_hours),
            CHANGE_LIMIT,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn totals(employees: usize, present: f64, recorded: f64, ot: f64, late: f64) -> PeriodTotals {
        PeriodTotals {
            employees,
            present_days: present,
            recorded_days: recorded,
            ot_hours: ot,
            late_minutes: late,
            max_working_days: recorded,
        }
    }

    #[test]
    fn large_growth_is_capped() {
        assert_eq!(cap_and_round(percentage_change(1000.0, 1.0), CHANGE_LIMIT), 999.9);
    }

    #[test]
    fn growth_from_zero() {
        assert_eq!(percentage_change(5.0, 0.0), 100.0);
        assert_eq!(percentage_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn compares_each_card() {
        let current = totals(12, 90.0, 100.0, 30.0, 50.0);
        let previous = totals(10, 80.0, 100.0, 40.0, 0.0);
        let cmp = compare(&current, &previous);
        assert_eq!(cmp.employees_change, 20.0);
        assert_eq!(cmp.attendance_change, 10.0);
        assert_eq!(cmp.ot_hours_change, -25.0);
        assert_eq!(cmp.late_minutes_change, 100.0);
    }

    #[test]
    fn attendance_needs_a_baseline() {
        let current = totals(3, 20.0, 25.0, 0.0, 0.0);
        let cmp = compare(&current, &PeriodTotals::default());
        assert_eq!(cmp.attendance_change, 0.0);
        assert_eq!(cmp.employees_change, 100.0);
    }

    proptest! {
        #[test]
        fn changes_stay_within_bounds(
            current in 0.0f64..1e9,
            previous in 0.0f64..1e9,
            cur_pct in 0.0f64..=100.0,
            prev_pct in 0.0f64..=100.0,
        ) {
            let change = cap_and_round(percentage_change(current, previous), CHANGE_LIMIT);
            prop_assert!((-CHANGE_LIMIT..=CHANGE_LIMIT).contains(&change));
            let points = cap_and_round(attendance_change(cur_pct, prev_pct), ATTENDANCE_LIMIT);
            prop_assert!((-ATTENDANCE_LIMIT..=ATTENDANCE_LIMIT).contains(&points));
        }
    }
}
