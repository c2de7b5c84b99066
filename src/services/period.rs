// src/services/period.rs
//
// Calendar arithmetic for the dashboard's relative periods. Windows are whole
// months; a record belongs to a window when its pay month does.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::{SalaryRecord, TimePeriod, TimeRange};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Anchor used when there is no data to anchor on.
pub const FALLBACK_ANCHOR: YearMonth = YearMonth { year: 2025, month: 1 };

/// Month number (1-12) for the spellings the salary sheet uses:
/// three-letter codes, full names and `SEPT`, in any case.
pub fn month_index(raw: &str) -> Option<u32> {
    let month = match raw.trim().to_ascii_uppercase().as_str() {
        "JAN" | "JANUARY" => 1,
        "FEB" | "FEBRUARY" => 2,
        "MAR" | "MARCH" => 3,
        "APR" | "APRIL" => 4,
        "MAY" => 5,
        "JUN" | "JUNE" => 6,
        "JUL" | "JULY" => 7,
        "AUG" | "AUGUST" => 8,
        "SEP" | "SEPT" | "SEPTEMBER" => 9,
        "OCT" | "OCTOBER" => 10,
        "NOV" | "NOVEMBER" => 11,
        "DEC" | "DECEMBER" => 12,
        _ => return None,
    };
    Some(month)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn offset(self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(self) -> Option<NaiveDate> {
        self.offset(1).first_day().and_then(|d| d.pred_opt())
    }

    pub fn days_in_month(self) -> u32 {
        self.last_day().map(|d| d.day()).unwrap_or(0)
    }

    /// Days that are not Sundays.
    pub fn working_days(self) -> u32 {
        let Some(first) = self.first_day() else {
            return 0;
        };
        first
            .iter_days()
            .take(self.days_in_month() as usize)
            .filter(|d| d.weekday() != chrono::Weekday::Sun)
            .count() as u32
    }

    /// "Mar 2025"
    pub fn label(self) -> String {
        format!("{} {}", MONTH_LABELS[(self.month - 1) as usize], self.year)
    }
}

/// A run of consecutive months, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub first: YearMonth,
    pub last: YearMonth,
}

impl MonthWindow {
    pub fn ending_at(last: YearMonth, months: i64) -> Self {
        Self {
            first: last.offset(-(months.max(1) - 1)),
            last,
        }
    }

    pub fn len(&self) -> i64 {
        self.last.ordinal() - self.first.ordinal() + 1
    }

    /// Window of the same length ending the month before this one starts.
    pub fn preceding(&self) -> Self {
        Self::ending_at(self.first.offset(-1), self.len())
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        self.first <= month && month <= self.last
    }

    pub fn months(&self) -> Vec<YearMonth> {
        (0..self.len()).map(|i| self.first.offset(i)).collect()
    }

    pub fn to_range(&self) -> Option<TimeRange> {
        Some(TimeRange {
            start: self.first.first_day()?,
            end: self.last.last_day()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindows {
    pub current: MonthWindow,
    pub previous: MonthWindow,
}

/// Pay month of a salary row. Unrecognised month names rank as January.
pub fn record_month(record: &SalaryRecord) -> YearMonth {
    YearMonth::new(record.year, month_index(&record.month).unwrap_or(1))
}

pub fn latest<I>(months: I) -> YearMonth
where
    I: IntoIterator<Item = YearMonth>,
{
    months.into_iter().max().unwrap_or(FALLBACK_ANCHOR)
}

/// Current and previous windows for `period`.
///
/// `this_month` follows the wall clock (`today`); every other period ends at
/// the latest pay month present in `records`.
pub fn resolve(records: &[SalaryRecord], period: TimePeriod, today: NaiveDate) -> PeriodWindows {
    let anchor = match period {
        TimePeriod::ThisMonth => YearMonth::from_date(today),
        _ => latest(records.iter().map(record_month)),
    };
    resolve_at(anchor, period)
}

pub fn resolve_at(anchor: YearMonth, period: TimePeriod) -> PeriodWindows {
    let current = MonthWindow::ending_at(anchor, period.months());
    PeriodWindows {
        current,
        previous: current.preceding(),
    }
}

/// Splits `records` into the rows of the current and previous windows.
pub fn split<'a>(
    records: &'a [SalaryRecord],
    windows: &PeriodWindows,
) -> (Vec<&'a SalaryRecord>, Vec<&'a SalaryRecord>) {
    let mut current = Vec::new();
    let mut previous = Vec::new();
    for record in records {
        let month = record_month(record);
        if windows.current.contains(month) {
            current.push(record);
        } else if windows.previous.contains(month) {
            previous.push(record);
        }
    }
    (current, previous)
}

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Best-effort parse of the free-form dates the sheet carries.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.date());
    }
    // "2025-03"
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
}

/// Month a row's free-form `date` points at.
///
/// Slash dates are read as `MM/DD/YYYY` by their month and year parts alone,
/// so `02/30/2025` still means February 2025; anything else goes through
/// [`parse_date`].
pub fn month_of_date(raw: &str) -> Option<YearMonth> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() >= 3 {
        let month = parts[0].trim().parse::<u32>().ok().filter(|m| (1..=12).contains(m));
        let year = leading_int(parts[2]);
        if let (Some(month), Some(year)) = (month, year) {
            return Some(YearMonth::new(year, month));
        }
    }
    parse_date(raw).map(YearMonth::from_date)
}

/// Pay month used for trend series: the row's date when it reads, else its
/// own month/year columns. `None` when neither names a month.
pub fn trend_month(record: &SalaryRecord) -> Option<YearMonth> {
    month_of_date(&record.date)
        .or_else(|| month_index(&record.month).map(|m| YearMonth::new(record.year, m)))
}

fn leading_int(raw: &str) -> Option<i32> {
    let raw = raw.trim_start();
    let end = raw
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    raw[..end].parse().ok()
}
