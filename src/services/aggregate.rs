// src/services/aggregate.rs

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashSet};

use crate::{
    models::{
        DepartmentHeadcount, DepartmentSummary, OtTrendPoint, SalaryBand, SalaryRecord,
        SalaryTrendPoint, TopEarner,
    },
    services::{
        numeric::normalize_department,
        period::{YearMonth, trend_month},
    },
};

const TOP_EARNERS: usize = 5;

/// Salary bands, lower bound inclusive. The last band is open-ended.
const SALARY_BANDS: [(&str, Decimal, Option<Decimal>); 5] = [
    ("0-20k", dec!(0), Some(dec!(20000))),
    ("20k-40k", dec!(20000), Some(dec!(40000))),
    ("40k-60k", dec!(40000), Some(dec!(60000))),
    ("60k-80k", dec!(60000), Some(dec!(80000))),
    ("80k+", dec!(80000), None),
];

/// Headline totals for one period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodTotals {
    pub employees: usize,
    pub present_days: f64,
    pub recorded_days: f64,
    pub ot_hours: f64,
    pub late_minutes: f64,
    /// Longest present+absent span of any single row
    pub max_working_days: f64,
}

impl PeriodTotals {
    pub fn attendance_percentage(&self) -> f64 {
        percentage(self.present_days, self.recorded_days)
    }

    pub fn absent_days(&self) -> f64 {
        self.recorded_days - self.present_days
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub totals: PeriodTotals,
    pub departments: Vec<DepartmentSummary>,
    pub salary_distribution: Vec<SalaryBand>,
    pub salary_trends: Vec<SalaryTrendPoint>,
    pub ot_trends: Vec<OtTrendPoint>,
    pub top_salaried: Vec<TopEarner>,
}

impl Aggregate {
    pub fn department_distribution(&self) -> Vec<DepartmentHeadcount> {
        self.departments
            .iter()
            .map(|d| DepartmentHeadcount {
                department: d.department.clone(),
                count: d.headcount,
            })
            .collect()
    }
}

#[derive(Default)]
struct DepartmentAcc<'a> {
    names: HashSet<&'a str>,
    salary: Decimal,
    ot_hours: f64,
    present: f64,
    recorded: f64,
}

#[derive(Default)]
struct MonthAcc<'a> {
    names: HashSet<&'a str>,
    salary: Decimal,
    ot_hours: f64,
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

/// A salary that would overflow the running total is left out of it.
fn add_salary(total: &mut Decimal, salary: Decimal) {
    if let Some(sum) = total.checked_add(salary) {
        *total = sum;
    }
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        (total / Decimal::from(count)).round_dp(2)
    }
}

/// Strips a trailing ` <digits>` suffix the sheet uses to tell duplicate
/// rows apart: `"John Doe 2"` → `"John Doe"`.
pub fn clean_display_name(name: &str) -> &str {
    let without_digits = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == name.len() {
        return name;
    }
    let trimmed = without_digits.trim_end();
    if trimmed.len() == without_digits.len() {
        name
    } else {
        trimmed
    }
}

fn salary_band(salary: Decimal) -> Option<usize> {
    SALARY_BANDS
        .iter()
        .position(|(_, min, max)| salary >= *min && max.is_none_or(|max| salary < max))
}

/// Headline totals only; used for the comparison period.
pub fn totals<'a, I>(records: I) -> PeriodTotals
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    let mut names = HashSet::new();
    let mut totals = PeriodTotals::default();

    for record in records.into_iter().filter(|r| r.has_name()) {
        names.insert(record.name.as_str());
        let present = record.present_days();
        let recorded = present + record.absent_days();
        totals.present_days += present;
        totals.recorded_days += recorded;
        totals.ot_hours += record.ot_hours();
        totals.late_minutes += record.late_minutes();
        totals.max_working_days = totals.max_working_days.max(recorded);
    }

    totals.employees = names.len();
    totals
}

/// Folds one period's salary rows into every summary the dashboard shows.
///
/// Rows without a name are ignored. Bad figures read as zero, so this never
/// fails; the output depends only on the rows passed in.
pub fn aggregate<'a, I>(records: I) -> Aggregate
where
    I: IntoIterator<Item = &'a SalaryRecord>,
{
    let rows: Vec<&SalaryRecord> = records.into_iter().filter(|r| r.has_name()).collect();

    let mut departments: BTreeMap<String, DepartmentAcc> = BTreeMap::new();
    let mut months: BTreeMap<YearMonth, MonthAcc> = BTreeMap::new();
    let mut band_counts = [0usize; SALARY_BANDS.len()];
    let mut earners: BTreeMap<&str, TopEarner> = BTreeMap::new();

    for record in &rows {
        let department = normalize_department(&record.department);
        let salary = record.salary();
        let present = record.present_days();
        let recorded = present + record.absent_days();
        let ot_hours = record.ot_hours();

        let dept = departments.entry(department.clone()).or_default();
        dept.names.insert(record.name.as_str());
        add_salary(&mut dept.salary, salary);
        dept.ot_hours += ot_hours;
        dept.present += present;
        dept.recorded += recorded;

        if let Some(band) = salary_band(salary) {
            band_counts[band] += 1;
        }

        if let Some(month) = trend_month(record) {
            let acc = months.entry(month).or_default();
            acc.names.insert(record.name.as_str());
            add_salary(&mut acc.salary, salary);
            acc.ot_hours += ot_hours;
        }

        let clean = clean_display_name(&record.name);
        let replace = earners.get(clean).is_none_or(|e| salary > e.salary);
        if replace {
            earners.insert(
                clean,
                TopEarner {
                    name: clean.to_string(),
                    salary,
                    department,
                },
            );
        }
    }

    let departments = departments
        .into_iter()
        .map(|(department, acc)| {
            let headcount = acc.names.len();
            DepartmentSummary {
                department,
                headcount,
                total_salary: acc.salary,
                average_salary: average(acc.salary, headcount),
                attendance_percentage: percentage(acc.present, acc.recorded),
                total_ot_hours: acc.ot_hours,
            }
        })
        .collect();

    let salary_distribution = SALARY_BANDS
        .iter()
        .zip(band_counts)
        .map(|((label, _, _), count)| SalaryBand {
            range: label.to_string(),
            count,
        })
        .collect();

    let salary_trends = months
        .iter()
        .map(|(month, acc)| SalaryTrendPoint {
            month: month.label(),
            average_salary: average(acc.salary, acc.names.len()),
        })
        .collect();

    let ot_trends = months
        .iter()
        .map(|(month, acc)| OtTrendPoint {
            month: month.label(),
            average_ot_hours: if acc.names.is_empty() {
                0.0
            } else {
                acc.ot_hours / acc.names.len() as f64
            },
        })
        .collect();

    let mut top_salaried: Vec<TopEarner> = earners.into_values().collect();
    top_salaried.sort_by(|a, b| b.salary.cmp(&a.salary));
    top_salaried.truncate(TOP_EARNERS);

    Aggregate {
        totals: totals(rows.iter().copied()),
        departments,
        salary_distribution,
        salary_trends,
        ot_trends,
        top_salaried,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(name: &str, department: &str, salary: &str) -> SalaryRecord {
        SalaryRecord {
            year: 2025,
            month: "MAR".to_string(),
            name: name.to_string(),
            employee_id: name.to_lowercase().replace(' ', "-"),
            department: department.to_string(),
            basic_salary: salary.to_string(),
            days_present: "20".to_string(),
            days_absent: "5".to_string(),
            ot_hours: "2".to_string(),
            late_minutes: "10".to_string(),
            ..SalaryRecord::default()
        }
    }

    #[test]
    fn empty_figures_never_produce_nan() {
        let rows = vec![SalaryRecord {
            name: "Blank".to_string(),
            ..SalaryRecord::default()
        }];
        let agg = aggregate(&rows);
        let dept = &agg.departments[0];
        assert_eq!(dept.department, "N/A");
        assert_eq!(dept.average_salary, Decimal::ZERO);
        assert_eq!(dept.attendance_percentage, 0.0);
        assert_eq!(agg.totals.attendance_percentage(), 0.0);
    }

    #[test]
    fn oversized_salaries_do_not_overflow_the_totals() {
        let huge = Decimal::MAX.to_string();
        let rows = vec![record("Asha", "Sales", &huge), record("Ravi", "Sales", &huge)];

        let agg = aggregate(&rows);
        let sales = &agg.departments[0];
        assert_eq!(sales.headcount, 2);
        assert_eq!(sales.total_salary, Decimal::MAX);
        assert_eq!(agg.salary_trends[0].average_salary, (Decimal::MAX / Decimal::from(2)).round_dp(2));
        assert_eq!(agg.salary_distribution[4].count, 2);
        assert_eq!(agg.top_salaried.len(), 2);
    }

    #[test]
    fn headcount_counts_distinct_names() {
        let mut feb = record("Asha", "Sales", "30000");
        feb.month = "FEB".to_string();
        let rows = vec![record("Asha", "Sales", "30000"), feb, record("Ravi", "Sales", "50000")];

        let agg = aggregate(&rows);
        let sales = &agg.departments[0];
        assert_eq!(sales.headcount, 2);
        assert_eq!(sales.total_salary, dec!(110000));
        assert_eq!(sales.average_salary, dec!(55000));
        assert_eq!(sales.attendance_percentage, 80.0);
        assert_eq!(sales.total_ot_hours, 6.0);
    }

    #[test]
    fn blank_and_zero_departments_fold_into_na() {
        let rows = vec![
            record("A", "", "1"),
            record("B", "   ", "1"),
            record("C", "0", "1"),
            record("D", "Sales", "1"),
        ];
        let agg = aggregate(&rows);
        let names: Vec<_> = agg.departments.iter().map(|d| d.department.as_str()).collect();
        assert_eq!(names, vec!["N/A", "Sales"]);
        assert_eq!(agg.departments[0].headcount, 3);
    }

    #[test]
    fn band_lower_edges_are_inclusive() {
        let rows = vec![
            record("A", "X", "19999.99"),
            record("B", "X", "20000"),
            record("C", "X", "80000"),
            record("D", "X", "not a number"),
        ];
        let agg = aggregate(&rows);
        let counts: Vec<_> = agg.salary_distribution.iter().map(|b| (b.range.as_str(), b.count)).collect();
        assert_eq!(
            counts,
            vec![("0-20k", 2), ("20k-40k", 1), ("40k-60k", 0), ("60k-80k", 0), ("80k+", 1)]
        );
    }

    #[test]
    fn negative_salaries_fall_outside_every_band() {
        let agg = aggregate(&[record("A", "X", "-10")]);
        assert!(agg.salary_distribution.iter().all(|b| b.count == 0));
    }

    #[test]
    fn top_earners_dedupe_numbered_names() {
        let rows = vec![record("John Doe 1", "Ops", "50000"), record("John Doe 2", "Ops", "70000")];
        let agg = aggregate(&rows);
        assert_eq!(
            agg.top_salaried,
            vec![TopEarner {
                name: "John Doe".to_string(),
                salary: dec!(70000),
                department: "Ops".to_string(),
            }]
        );
    }

    #[test]
    fn top_earners_keep_five_highest() {
        let rows: Vec<_> = (1..=7)
            .map(|i| record(&format!("Worker{i}"), "X", &format!("{}", i * 1000)))
            .collect();
        let agg = aggregate(&rows);
        let salaries: Vec<_> = agg.top_salaried.iter().map(|e| e.salary).collect();
        assert_eq!(salaries, vec![dec!(7000), dec!(6000), dec!(5000), dec!(4000), dec!(3000)]);
    }

    #[test]
    fn clean_names() {
        assert_eq!(clean_display_name("John Doe 2"), "John Doe");
        assert_eq!(clean_display_name("John Doe   15"), "John Doe");
        assert_eq!(clean_display_name("Agent007"), "Agent007");
        assert_eq!(clean_display_name("Plain"), "Plain");
    }

    #[test]
    fn trends_average_per_distinct_employee_in_order() {
        let mut jan = record("Asha", "X", "30000");
        jan.date = "01/31/2025".to_string();
        let mut jan_again = record("Asha", "X", "10000");
        jan_again.date = "01/15/2025".to_string();
        let mut dec = record("Ravi", "X", "40000");
        dec.date = "2024-12-31".to_string();
        let mut fallback = record("Mina", "X", "20000");
        fallback.date = "??".to_string();
        fallback.month = "feb".to_string();

        let agg = aggregate(&[jan, jan_again, dec, fallback]);
        let salary: Vec<_> = agg
            .salary_trends
            .iter()
            .map(|p| (p.month.as_str(), p.average_salary))
            .collect();
        assert_eq!(
            salary,
            vec![("Dec 2024", dec!(40000)), ("Jan 2025", dec!(40000)), ("Feb 2025", dec!(20000))]
        );
        assert_eq!(agg.ot_trends[1].month, "Jan 2025");
        assert_eq!(agg.ot_trends[1].average_ot_hours, 4.0);
    }

    #[test]
    fn rows_without_names_are_skipped() {
        let rows = vec![record("  ", "X", "99999"), record("Asha", "X", "100")];
        let agg = aggregate(&rows);
        assert_eq!(agg.totals.employees, 1);
        assert_eq!(agg.top_salaried.len(), 1);
    }

    #[test]
    fn totals_track_longest_row() {
        let mut long = record("Asha", "X", "1");
        long.days_present = "26".to_string();
        long.days_absent = "4".to_string();
        let totals = totals(&[record("Ravi", "X", "1"), long]);
        assert_eq!(totals.max_working_days, 30.0);
        assert_eq!(totals.present_days, 46.0);
        assert_eq!(totals.absent_days(), 9.0);
        assert_eq!(totals.late_minutes, 20.0);
    }

    proptest! {
        #[test]
        fn aggregation_is_repeatable(
            rows in proptest::collection::vec(
                ("[A-C]{1,2}( [0-9])?", "(Sales|Ops|0| |)", "[0-9]{0,6}", "[0-9]{0,2}"),
                0..25,
            )
        ) {
            let records: Vec<SalaryRecord> = rows
                .iter()
                .map(|(name, dept, salary, days)| {
                    let mut r = record(name, dept, salary);
                    r.days_present = days.clone();
                    r
                })
                .collect();
            prop_assert_eq!(aggregate(&records), aggregate(&records));
        }

        #[test]
        fn every_named_row_lands_in_one_band(salaries in proptest::collection::vec(0u32..200_000, 0..30)) {
            let records: Vec<SalaryRecord> = salaries
                .iter()
                .enumerate()
                .map(|(i, s)| record(&format!("E{i}"), "X", &s.to_string()))
                .collect();
            let agg = aggregate(&records);
            let banded: usize = agg.salary_distribution.iter().map(|b| b.count).sum();
            prop_assert_eq!(banded, records.len());
        }
    }
}
