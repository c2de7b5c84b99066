// src/services/payroll.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::{
    errors::{AppError, AppResult},
    models::{
        AdvancePayload, AdvanceRequest, PaymentPayload, PaymentRequest, PayrollQuery, SalaryRecord,
    },
    services::{
        directory::split_list,
        numeric::normalize_department,
        period::{self, YearMonth},
    },
};

pub struct PayrollService;

impl PayrollService {
    /// Date a salary row is ordered by: its own date, else the first of its pay month.
    fn row_date(record: &SalaryRecord) -> Option<NaiveDate> {
        period::parse_date(&record.date).or_else(|| period::record_month(record).first_day())
    }

    /// Most recent salary row per employee id, ordered by name.
    pub fn latest_per_employee(records: &[SalaryRecord]) -> Vec<SalaryRecord> {
        let mut latest: HashMap<&str, &SalaryRecord> = HashMap::new();
        for record in records.iter().filter(|r| !r.employee_id.trim().is_empty()) {
            let newer = latest
                .get(record.employee_id.as_str())
                .is_none_or(|seen| Self::row_date(record) >= Self::row_date(seen));
            if newer {
                latest.insert(record.employee_id.as_str(), record);
            }
        }

        let mut rows: Vec<SalaryRecord> = latest.into_values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.employee_id.cmp(&b.employee_id)));
        rows
    }

    /// Payroll sheet: latest row per employee, narrowed by department and search.
    pub fn sheet(records: &[SalaryRecord], query: &PayrollQuery) -> Vec<SalaryRecord> {
        let departments = split_list(query.departments.as_deref());
        let needle = query.search.as_deref().unwrap_or_default().trim().to_lowercase();

        Self::latest_per_employee(records)
            .into_iter()
            .filter(|r| {
                let department = normalize_department(&r.department);
                departments.is_empty()
                    || departments.iter().any(|d| d.eq_ignore_ascii_case(&department))
            })
            .filter(|r| {
                needle.is_empty()
                    || r.name.to_lowercase().contains(&needle)
                    || r.employee_id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn normalize_payment_method(raw: &str) -> String {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => "CASH".to_string(),
            "bank" | "bank transfer" | "bank_transfer" => "BANK_TRANSFER".to_string(),
            "cheque" | "check" => "CHEQUE".to_string(),
            _ => raw.trim().to_string(),
        }
    }

    /// The employee's salary row for the pay month `date` falls in.
    pub fn record_for_month<'a>(records: &'a [SalaryRecord], date: NaiveDate) -> Option<&'a SalaryRecord> {
        let month = YearMonth::from_date(date);
        records
            .iter()
            .find(|r| r.year == month.year && period::month_index(&r.month) == Some(month.month))
    }

    pub fn prepare_advance(req: &AdvanceRequest, known_name: Option<&str>) -> AppResult<AdvancePayload> {
        if req.employee_id.trim().is_empty() {
            return Err(AppError::Validation("An employee is required".to_string()));
        }
        if req.amount <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Advance amount must be greater than zero".to_string(),
            ));
        }

        let employee_name = req
            .employee_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| known_name.map(str::to_string))
            .unwrap_or_default();

        Ok(AdvancePayload {
            employee_id: req.employee_id.trim().to_string(),
            employee_name,
            advance_date: req.advance_date,
            amount: req.amount.round_dp(2),
            for_month: req.for_month.trim().to_string(),
            payment_method: Self::normalize_payment_method(&req.payment_method),
            remarks: req.remarks.trim().to_string(),
        })
    }

    /// Checks that need no salary data, run before anything is fetched.
    pub fn check_payment(req: &PaymentRequest) -> AppResult<()> {
        if req.employee_id.trim().is_empty() {
            return Err(AppError::Validation("An employee is required".to_string()));
        }
        if req.advance_deduction < Decimal::ZERO {
            return Err(AppError::Validation(
                "Advance deduction cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Settles a payment against the employee's salary rows.
    ///
    /// The advance recovered may not exceed what the employee still owes;
    /// a missing net payable is read from the row for the payment month.
    pub fn prepare_payment(req: &PaymentRequest, records: &[SalaryRecord]) -> AppResult<PaymentPayload> {
        Self::check_payment(req)?;

        let month_row = Self::record_for_month(records, req.payment_date);
        let latest = records.iter().max_by_key(|r| Self::row_date(r));
        let reference = month_row.or(latest);

        let net_payable = match (req.net_payable, month_row) {
            (Some(amount), _) => amount,
            (None, Some(row)) => row.net_payable(),
            (None, None) => {
                return Err(AppError::Validation(format!(
                    "No salary record for {} in {}",
                    req.employee_id,
                    YearMonth::from_date(req.payment_date).label()
                )));
            }
        };

        let outstanding = reference
            .map(SalaryRecord::outstanding_advance)
            .unwrap_or(dec!(0))
            .max(dec!(0));
        if req.advance_deduction > outstanding {
            return Err(AppError::Validation(format!(
                "Advance deduction {} exceeds outstanding advance {}",
                req.advance_deduction, outstanding
            )));
        }

        let employee_name = req
            .employee_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| reference.map(|r| r.name.clone()))
            .unwrap_or_default();
        let pay_period = if req.pay_period.trim().is_empty() {
            YearMonth::from_date(req.payment_date).label()
        } else {
            req.pay_period.trim().to_string()
        };

        let amount_paid = net_payable
            .checked_sub(req.advance_deduction)
            .ok_or_else(|| AppError::Validation("Payment amount is out of range".to_string()))?;

        Ok(PaymentPayload {
            employee_id: req.employee_id.trim().to_string(),
            employee_name,
            payment_date: req.payment_date,
            net_payable,
            advance_deduction: req.advance_deduction,
            amount_paid,
            pay_period,
            payment_method: Self::normalize_payment_method(&req.payment_method),
        })
    }
}
