// src/ui/format.rs
// =============================================================================
// Date and price formatting for display, in Spanish.
//
// format_date("2024-01-15T10:30:00") -> "15 de enero de 2024, 10:30"
// format_price(15000.0)              -> "$15.000"
//
// The backend sends naive UTC timestamps (no offset). Those are shown as-is,
// like a browser does with new Date(...) on an offset-less ISO string.
// Timestamps with an offset are shown in the local time zone.
// =============================================================================

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Shown when there is no date at all.
pub const NO_DATE: &str = "N/A";
/// Shown when the date does not parse.
pub const INVALID_DATE: &str = "Fecha inválida";

pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return NO_DATE.to_string();
    };

    match parse_timestamp(raw) {
        Some(moment) => long_form(&moment),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive);
    }
    raw.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn long_form(moment: &NaiveDateTime) -> String {
    // month0() is always 0..=11
    let month = MONTHS.get(moment.month0() as usize).copied().unwrap_or("");
    format!(
        "{} de {} de {}, {:02}:{:02}",
        moment.day(),
        month,
        moment.year(),
        moment.hour(),
        moment.minute()
    )
}

/// Formats a price with `.` as thousands separator and `,` for decimals.
/// Whole amounts have no decimals.
pub fn format_price(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    match cents % 100 {
        0 => format!("{}${}", sign, whole),
        fraction => format!("{}${},{:02}", sign, whole, fraction),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
