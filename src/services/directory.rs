// src/services/directory.rs

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::{collections::HashMap, str::FromStr, sync::OnceLock};

use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateEmployeeReply, CreateEmployeeRequest, DirectoryEntry, DirectoryPage, DirectoryQuery,
        EmployeeProfile, EmployeeUpdate, NewEmployeePayload, PageMarker, PersonalInfo,
        ProfessionalInfo, SalaryRecord,
    },
    services::numeric::{round1, round2},
};

/// Monthly hours the OT hourly rate is derived over.
const OT_HOURS_PER_MONTH: u32 = 240;

// ─── Join, Filter, Paginate ──────────────────────────────────────────────────

#[derive(Default)]
struct History {
    present: f64,
    absent: f64,
    ot_hours: f64,
}

/// Joins each profile with its salary-sheet history by `employee_id`.
pub fn join(profiles: &[EmployeeProfile], salary_rows: &[SalaryRecord]) -> Vec<DirectoryEntry> {
    let mut history: HashMap<&str, History> = HashMap::new();
    for row in salary_rows {
        let h = history.entry(row.employee_id.as_str()).or_default();
        h.present += row.present_days();
        h.absent += row.absent_days();
        h.ot_hours += row.ot_hours();
    }

    profiles
        .iter()
        .map(|p| {
            let h = history.get(p.employee_id.as_str());
            let attendance_percentage = h.and_then(|h| {
                let total = h.present + h.absent;
                (total > 0.0).then(|| round1(h.present / total * 100.0))
            });
            let ot_hours = h
                .map(|h| h.ot_hours)
                .filter(|ot| *ot > 0.0)
                .map(round2);

            DirectoryEntry {
                employee_id: p.employee_id.clone(),
                name: p.name.clone(),
                mobile_number: p.mobile_number.clone(),
                email: p.email.clone(),
                department: p.department.clone(),
                designation: p.designation.clone(),
                employment_type: p.employment_type.clone(),
                branch_location: p.branch_location.clone(),
                attendance_percentage,
                ot_hours,
                shift_start_time: p.shift_start_time.clone(),
                shift_end_time: p.shift_end_time.clone(),
                basic_salary: p.basic_salary.clone(),
            }
        })
        .collect()
}

/// Comma-separated list into trimmed, non-empty names.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn filter(entries: Vec<DirectoryEntry>, query: &DirectoryQuery) -> Vec<DirectoryEntry> {
    let needle = query.search.as_deref().unwrap_or_default().trim().to_lowercase();
    let departments = split_list(query.departments.as_deref());

    entries
        .into_iter()
        .filter(|e| {
            departments.is_empty()
                || departments.iter().any(|d| d.eq_ignore_ascii_case(&e.department))
        })
        .filter(|e| {
            needle.is_empty()
                || [&e.name, &e.employee_id, &e.department, &e.designation]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Compact page strip: every page when there are at most seven, otherwise
/// the first and last page around a window on the current one.
pub fn page_numbers(current: usize, total: usize) -> Vec<PageMarker> {
    use PageMarker::{Gap, Page};

    if total <= 7 {
        return (1..=total).map(Page).collect();
    }
    if current <= 4 {
        let mut strip: Vec<_> = (1..=5).map(Page).collect();
        strip.extend([Gap, Page(total)]);
        return strip;
    }
    if current >= total - 3 {
        let mut strip = vec![Page(1), Gap];
        strip.extend((total - 4..=total).map(Page));
        return strip;
    }
    vec![
        Page(1),
        Gap,
        Page(current - 1),
        Page(current),
        Page(current + 1),
        Gap,
        Page(total),
    ]
}

pub fn paginate(entries: Vec<DirectoryEntry>, page: Option<usize>, page_size: usize) -> DirectoryPage {
    let page_size = page_size.max(1);
    let total_entries = entries.len();
    let total_pages = total_entries.div_ceil(page_size).max(1);
    let page = page.unwrap_or(1).clamp(1, total_pages);

    let entries = entries
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    DirectoryPage {
        entries,
        page,
        total_pages,
        total_entries,
        page_numbers: page_numbers(page, total_pages),
    }
}

// ─── CSV Export ──────────────────────────────────────────────────────────────

const CSV_HEADERS: [&str; 12] = [
    "Employee Name",
    "Mobile Number",
    "Email",
    "Department",
    "Designation",
    "Employment Type",
    "Branch Location",
    "Attendance",
    "OT Hours",
    "Shift Start Time",
    "Shift End Time",
    "Basic Salary",
];

pub fn export_csv(entries: &[DirectoryEntry]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let csv_err = |e: csv::Error| AppError::Internal(format!("CSV export failed: {e}"));

    writer.write_record(CSV_HEADERS).map_err(csv_err)?;
    for e in entries {
        let attendance = e
            .attendance_percentage
            .map(|pct| format!("{pct:.1}%"))
            .unwrap_or_else(|| "-".to_string());
        let ot_hours = e
            .ot_hours
            .map(|ot| format!("{ot:.2} hrs"))
            .unwrap_or_else(|| "-".to_string());

        writer
            .write_record([
                e.name.as_str(),
                &e.mobile_number,
                &e.email,
                &e.department,
                &e.designation,
                &e.employment_type,
                &e.branch_location,
                &attendance,
                &ot_hours,
                &e.shift_start_time,
                &e.shift_end_time,
                &e.basic_salary,
            ])
            .map_err(csv_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV export failed: {e}")))
}

// ─── Field Normalization ─────────────────────────────────────────────────────

fn twelve_hour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2}) ?([AP]M)?$").expect("clock regex"))
}

fn is_hhmm(raw: &str) -> bool {
    let b = raw.as_bytes();
    b.len() == 5 && b[2] == b':' && [0, 1, 3, 4].iter().all(|&i| b[i].is_ascii_digit())
}

/// Shift time as `HH:MM`. Accepts `HH:MM:SS` and `h:mm AM/PM`; anything
/// else is passed through untouched.
pub fn format_hhmm(raw: &str) -> String {
    let raw = raw.trim();
    if is_hhmm(raw) {
        return raw.to_string();
    }
    if let Some(head) = raw.get(..5).filter(|head| raw.len() == 8 && is_hhmm(head)) {
        if raw.as_bytes()[5] == b':' {
            return head.to_string();
        }
    }

    let Some(caps) = twelve_hour_re().captures(raw) else {
        return raw.to_string();
    };
    let Ok(mut hours) = caps[1].parse::<u32>() else {
        return raw.to_string();
    };
    match caps.get(3).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("PM") if hours < 12 => hours += 12,
        Some("AM") if hours == 12 => hours = 0,
        _ => {}
    }
    format!("{hours:02}:{}", &caps[2])
}

/// `Full Time` → `FULL_TIME` and friends; unknown labels pass through.
pub fn normalize_employment_type(raw: &str) -> String {
    let key = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    match key.as_str() {
        "full time" => "FULL_TIME".to_string(),
        "part time" => "PART_TIME".to_string(),
        "contract" => "CONTRACT".to_string(),
        "intern" => "INTERN".to_string(),
        _ => raw.trim().to_string(),
    }
}

/// OT hourly rate: monthly salary over 240 hours, to two decimals.
/// Empty when the salary does not read as a positive amount.
pub fn ot_charge(basic_salary: &str) -> String {
    match Decimal::from_str(basic_salary.trim()) {
        Ok(salary) if salary > Decimal::ZERO => {
            let mut rate = (salary / Decimal::from(OT_HOURS_PER_MONTH)).round_dp(2);
            rate.rescale(2);
            rate.to_string()
        }
        _ => String::new(),
    }
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// Checks the required fields and shapes the create form into the nested
/// payload the employee service expects.
pub fn new_employee_payload(req: &CreateEmployeeRequest) -> AppResult<NewEmployeePayload> {
    let required = [
        ("First name", &req.first_name),
        ("Last name", &req.last_name),
        ("Mobile number", &req.mobile_number),
        ("Department", &req.department),
        ("Designation", &req.designation),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let basic_salary = req.basic_salary.replace(',', "").trim().to_string();
    let tds_percentage = req.tds_percentage.trim().trim_end_matches('%').trim().to_string();

    Ok(NewEmployeePayload {
        personal_info: PersonalInfo {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            mobile_number: req.mobile_number.trim().to_string(),
            email: req.email.trim().to_string(),
            date_of_birth: req.date_of_birth.clone(),
            marital_status: req.marital_status.clone(),
            gender: req.gender.clone(),
            nationality: req.nationality.clone(),
            address: req.address.clone(),
            city: req.city.clone(),
            state: req.state.clone(),
        },
        professional_info: ProfessionalInfo {
            department: req.department.trim().to_string(),
            designation: req.designation.trim().to_string(),
            employment_type: normalize_employment_type(&req.employment_type),
            date_of_joining: req.date_of_joining.clone(),
            location_branch: req.location_branch.clone(),
            shift_start_time: format_hhmm(&req.shift_start_time),
            shift_end_time: format_hhmm(&req.shift_end_time),
            ot_charge: ot_charge(&basic_salary),
            basic_salary,
            tds_percentage,
            off_days: req.off_days.to_list(),
        },
    })
}

fn messages(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(messages).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// Human-readable reason for a rejected create, one `field: messages` line per field.
pub fn creation_error(reply: &CreateEmployeeReply) -> String {
    if let Some(errors) = reply.errors.as_ref().filter(|e| !e.is_empty()) {
        return errors
            .iter()
            .map(|(field, value)| format!("{field}: {}\n", messages(value)))
            .collect();
    }
    reply
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "Failed to create employee".to_string())
}

// ─── Update ──────────────────────────────────────────────────────────────────

const IMMUTABLE_FIELDS: [&str; 2] = ["id", "employee_id"];

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn normalized(field: &str, value: &Value) -> Value {
    match (field, value) {
        ("employment_type", Value::String(s)) => Value::String(normalize_employment_type(s)),
        ("shift_start_time" | "shift_end_time", Value::String(s)) => Value::String(format_hhmm(s)),
        (_, Value::String(s)) => Value::String(s.trim().to_string()),
        _ => value.clone(),
    }
}

/// Fields of `update` that actually differ from `current`, normalized.
/// Empty and null edits are dropped rather than blanking the stored value.
pub fn changed_fields(current: &EmployeeProfile, update: &EmployeeUpdate) -> AppResult<Map<String, Value>> {
    let stored = match serde_json::to_value(current) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => return Err(AppError::Internal(e.to_string())),
    };

    let mut changed = Map::new();
    for (field, value) in update {
        if IMMUTABLE_FIELDS.contains(&field.as_str()) || text(value).is_empty() {
            continue;
        }
        let value = normalized(field, value);
        let stored_key = if field == "location_branch" { "branch_location" } else { field.as_str() };
        let unchanged = stored
            .get(stored_key)
            .is_some_and(|old| text(&normalized(field, old)) == text(&value));
        if !unchanged {
            changed.insert(field.clone(), value);
        }
    }
    Ok(changed)
}
