// src/services/attendance.rs

use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    errors::{AppError, AppResult},
    models::{
        AttendanceRecord, AttendanceStatus, AttendanceTracker, DailyAttendance,
        DailyAttendanceEntry, DailyRowInput, DailySheetRow, EmployeeProfile, LateOvertime,
        MinutesRequest, MonthInfo, TimePeriod, TrackerQuery, TrackerRow,
    },
    services::{
        numeric::round2,
        period::{self, MonthWindow, YearMonth},
    },
};

pub const DEFAULT_SHIFT_START: &str = "09:00";
pub const DEFAULT_SHIFT_END: &str = "17:00";

// ─── Late / Overtime Minutes ─────────────────────────────────────────────────

/// Strict `HH:MM` clock reading (two digits, colon, two digits).
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for Shift {
    fn default() -> Self {
        Self {
            start: parse_clock(DEFAULT_SHIFT_START).unwrap_or_default(),
            end: parse_clock(DEFAULT_SHIFT_END).unwrap_or_default(),
        }
    }
}

impl Shift {
    /// Each end falls back to 09:00 / 17:00 independently unless it is strict `HH:MM`.
    pub fn from_times(start: Option<&str>, end: Option<&str>) -> Self {
        let fallback = Self::default();
        Self {
            start: start.and_then(parse_clock).unwrap_or(fallback.start),
            end: end.and_then(parse_clock).unwrap_or(fallback.end),
        }
    }

    pub fn of(profile: &EmployeeProfile) -> Self {
        Self::from_times(Some(&profile.shift_start_time), Some(&profile.shift_end_time))
    }

    pub fn start_hhmm(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_hhmm(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

fn minutes_after(later: NaiveTime, earlier: NaiveTime) -> i64 {
    (later - earlier).num_minutes().max(0)
}

/// Late arrival and overtime in whole minutes. Only worked days accrue
/// either; an unreadable clock time yields zero for both.
pub fn late_and_overtime(
    shift: Shift,
    clock_in: &str,
    clock_out: &str,
    status: AttendanceStatus,
) -> LateOvertime {
    if !status.is_worked() {
        return LateOvertime::default();
    }
    let (Some(clock_in), Some(clock_out)) = (parse_clock(clock_in), parse_clock(clock_out)) else {
        return LateOvertime::default();
    };
    LateOvertime {
        late_minutes: minutes_after(clock_in, shift.start),
        ot_minutes: minutes_after(clock_out, shift.end),
    }
}

pub fn minutes_for(req: &MinutesRequest) -> LateOvertime {
    let shift = Shift::from_times(req.shift_start.as_deref(), req.shift_end.as_deref());
    late_and_overtime(shift, &req.clock_in, &req.clock_out, req.status)
}

// ─── Daily Operations Log ────────────────────────────────────────────────────

/// Reads the status strings the daily endpoint hands back, in either casing.
pub fn parse_status(raw: &str) -> Option<AttendanceStatus> {
    match raw.trim().to_ascii_uppercase().replace('_', " ").as_str() {
        "PRESENT" => Some(AttendanceStatus::Present),
        "ABSENT" => Some(AttendanceStatus::Absent),
        "HALF DAY" => Some(AttendanceStatus::HalfDay),
        "PAID LEAVE" => Some(AttendanceStatus::PaidLeave),
        _ => None,
    }
}

/// Display only: recorded check-ins may carry seconds, e.g. "09:05:00" → "09:05".
fn clock_text(raw: &str) -> String {
    let raw = raw.trim();
    match parse_clock(raw).or_else(|| NaiveTime::parse_from_str(raw, "%H:%M:%S").ok()) {
        Some(t) => t.format("%H:%M").to_string(),
        None => raw.trim().to_string(),
    }
}

fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    needle.is_empty() || haystacks.iter().any(|h| h.to_lowercase().contains(needle))
}

/// The day's sheet: one row per employee, prefilled with their shift and
/// `Present`, overlaid with anything already recorded for `date`.
pub fn daily_sheet(
    profiles: &[EmployeeProfile],
    recorded: &[DailyAttendanceEntry],
    date: NaiveDate,
    search: Option<&str>,
) -> Vec<DailySheetRow> {
    let needle = search.unwrap_or_default().trim().to_lowercase();
    let recorded: HashMap<&str, &DailyAttendanceEntry> = recorded
        .iter()
        .filter(|e| period::parse_date(&e.date) == Some(date))
        .map(|e| (e.employee_id.as_str(), e))
        .collect();

    profiles
        .iter()
        .filter(|p| !p.employee_id.is_empty())
        .filter(|p| matches_search(&needle, &[&p.name, &p.employee_id, &p.department]))
        .map(|profile| {
            let shift = Shift::of(profile);
            match recorded.get(profile.employee_id.as_str()) {
                Some(entry) => DailySheetRow {
                    employee_id: profile.employee_id.clone(),
                    name: profile.name.clone(),
                    department: profile.department.clone(),
                    clock_in: clock_text(&entry.check_in),
                    clock_out: clock_text(&entry.check_out),
                    status: parse_status(&entry.attendance_status)
                        .unwrap_or(AttendanceStatus::Present),
                    late_minutes: entry.late_minutes.round() as i64,
                    ot_minutes: entry.ot_minutes.round() as i64,
                },
                None => DailySheetRow {
                    employee_id: profile.employee_id.clone(),
                    name: profile.name.clone(),
                    department: profile.department.clone(),
                    clock_in: shift.start_hhmm(),
                    clock_out: shift.end_hhmm(),
                    status: AttendanceStatus::Present,
                    late_minutes: 0,
                    ot_minutes: 0,
                },
            }
        })
        .collect()
}

/// Turns edited sheet rows into the records the daily endpoint stores,
/// recomputing late and overtime minutes against each employee's shift.
pub fn daily_records(
    date: NaiveDate,
    rows: &[DailyRowInput],
    profiles: &[EmployeeProfile],
) -> Vec<DailyAttendance> {
    let shifts: HashMap<&str, Shift> = profiles
        .iter()
        .map(|p| (p.employee_id.as_str(), Shift::of(p)))
        .collect();

    rows.iter()
        .map(|row| {
            let shift = shifts
                .get(row.employee_id.as_str())
                .copied()
                .unwrap_or_default();
            let minutes = late_and_overtime(shift, &row.clock_in, &row.clock_out, row.status);
            DailyAttendance {
                employee_id: row.employee_id.clone(),
                date,
                attendance_status: row.status,
                check_in: row.clock_in.clone(),
                check_out: row.clock_out.clone(),
                late_minutes: minutes.late_minutes,
                ot_minutes: minutes.ot_minutes,
            }
        })
        .collect()
}

// ─── Monthly Tracker ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerFilter {
    Period(TimePeriod),
    Month(YearMonth),
}

impl TrackerFilter {
    pub fn from_query(query: &TrackerQuery) -> AppResult<Self> {
        match (&query.month, query.year) {
            (Some(month), Some(year)) => {
                let month = period::month_index(month)
                    .ok_or_else(|| AppError::BadRequest(format!("Unknown month '{month}'")))?;
                Ok(TrackerFilter::Month(YearMonth::new(year, month)))
            }
            (Some(_), None) => Err(AppError::BadRequest(
                "A custom month also needs a year".to_string(),
            )),
            _ => Ok(TrackerFilter::Period(query.period.unwrap_or_default())),
        }
    }
}

fn record_month(record: &AttendanceRecord) -> Option<YearMonth> {
    period::month_of_date(&record.date)
}

fn tracker_window(records: &[AttendanceRecord], filter: TrackerFilter, today: NaiveDate) -> MonthWindow {
    match filter {
        TrackerFilter::Month(month) => MonthWindow::ending_at(month, 1),
        TrackerFilter::Period(TimePeriod::ThisMonth) => {
            MonthWindow::ending_at(YearMonth::from_date(today), 1)
        }
        TrackerFilter::Period(p) => {
            let anchor = period::latest(records.iter().filter_map(record_month));
            MonthWindow::ending_at(anchor, p.months())
        }
    }
}

#[derive(Default)]
struct TrackerAcc {
    name: String,
    date: String,
    present: f64,
    absent: f64,
    ot_hours: f64,
    late_minutes: f64,
}

/// Per-employee attendance roll-up over the months `filter` selects.
pub fn tracker(
    records: &[AttendanceRecord],
    filter: TrackerFilter,
    search: Option<&str>,
    today: NaiveDate,
) -> AttendanceTracker {
    let window = tracker_window(records, filter, today);
    let needle = search.unwrap_or_default().trim().to_lowercase();

    let months: Vec<MonthInfo> = window
        .months()
        .into_iter()
        .map(|m| MonthInfo {
            month: period::MONTH_LABELS[(m.month - 1) as usize].to_uppercase(),
            year: m.year,
            total_days: m.days_in_month(),
            working_days: m.working_days(),
        })
        .collect();
    let calendar_days: u32 = months.iter().map(|m| m.total_days).sum();
    let working_days: u32 = months.iter().map(|m| m.working_days).sum();

    let mut by_employee: BTreeMap<&str, TrackerAcc> = BTreeMap::new();
    for record in records {
        if !record_month(record).is_some_and(|m| window.contains(m)) {
            continue;
        }
        if !matches_search(&needle, &[&record.name, &record.employee_id]) {
            continue;
        }
        let acc = by_employee.entry(record.employee_id.as_str()).or_default();
        if acc.name.is_empty() {
            acc.name = record.name.clone();
        }
        if acc.date.is_empty() {
            acc.date = record.date.clone();
        }
        acc.present += record.present_days;
        acc.absent += record.absent_days;
        acc.ot_hours += record.ot_hours;
        acc.late_minutes += record.late_minutes;
    }

    let single_month = window.len() == 1;
    let rows = by_employee
        .into_iter()
        .map(|(employee_id, acc)| {
            let recorded = acc.present + acc.absent;
            TrackerRow {
                employee_id: employee_id.to_string(),
                name: acc.name,
                date: single_month.then_some(acc.date),
                calendar_days,
                total_working_days: working_days,
                present_days: acc.present,
                absent_days: acc.absent,
                attendance_percentage: (recorded > 0.0)
                    .then(|| round2(acc.present / recorded * 100.0)),
                ot_hours: round2(acc.ot_hours),
                late_minutes: acc.late_minutes,
            }
        })
        .collect();

    let available: BTreeSet<YearMonth> = records.iter().filter_map(record_month).collect();
    let available_months = available
        .into_iter()
        .rev()
        .map(|m| m.label().to_uppercase())
        .collect();

    AttendanceTracker {
        months,
        rows,
        available_months,
    }
}
