//! Coercion of loosely typed spreadsheet cells into typed record fields.

use calamine::Data;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::ledger::purchase::is_valid_date;

/// Days from 0001-01-01 (CE day 1) to 1899-12-30, the day before Excel serial 1
/// once the fictitious 1900-02-29 is accounted for.
const EXCEL_EPOCH_DAYS_FROM_CE: i32 = 693_594;
const EXCEL_FAKE_LEAP_DAY: i64 = 60;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

pub(crate) static EMPTY_CELL: Data = Data::Empty;

/// Converts a date into its Excel (1900 system) serial number.
///
/// Returns `None` for dates the 1900 system cannot hold (before 1900-01-01 or
/// after 9999-12-31). Serials up to 1900-02-28 sit one below the plain day
/// count because serial 60 is the fictitious 1900-02-29.
pub fn date_to_excel_serial(date: NaiveDate) -> Option<f64> {
    if !is_valid_date(date) {
        return None;
    }
    let mut days = i64::from(date.num_days_from_ce() - EXCEL_EPOCH_DAYS_FROM_CE);
    if days <= EXCEL_FAKE_LEAP_DAY {
        days -= 1;
    }
    Some(days as f64)
}

/// Converts an Excel serial number into a date, ignoring any time fraction.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let mut days = serial.trunc() as i64;
    if days < EXCEL_FAKE_LEAP_DAY {
        days += 1;
    }
    let ce_days = i64::from(EXCEL_EPOCH_DAYS_FROM_CE).checked_add(days)?;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(ce_days).ok()?)
}

pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(value) => value.trim().is_empty(),
        _ => false,
    }
}

/// Reads a cell as text. Numbers lose a trailing `.0` so numeric farmer ids
/// come back as `"123"` rather than `"123.0"`.
pub fn text(cell: &Data) -> String {
    match cell {
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
            value.trim().to_string()
        }
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_number(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => excel_serial_to_date(value.as_f64())
            .map(|date| date.to_string())
            .unwrap_or_else(|| format_number(value.as_f64())),
        _ => String::new(),
    }
}

pub fn number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(value) => Some(*value),
        Data::Int(value) => Some(*value as f64),
        Data::String(value) => value.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn whole_number(cell: &Data) -> Option<u32> {
    let value = number(cell)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

pub fn date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(value) => excel_serial_to_date(value.as_f64()),
        Data::Float(value) => excel_serial_to_date(*value),
        Data::Int(value) => excel_serial_to_date(*value as f64),
        Data::String(value) | Data::DateTimeIso(value) => parse_date_text(value),
        _ => None,
    }
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .map(|value| value.date())
            })
        })
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
