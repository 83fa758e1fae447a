//! Lenient parsers for spreadsheet cells.
//!
//! Every parser returns `None` for blank or unparseable input; the profile
//! entity decides whether a parsed value is acceptable.

use chrono::NaiveDate;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Leading integer, so `"15 años"` reads as 15.
pub fn parse_integer(value: Option<&str>) -> Option<i32> {
    let value = non_blank(value)?;
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().ok()
}

/// Decimal with either `,` or `.` as separator; trailing units are ignored.
pub fn parse_decimal(value: Option<&str>) -> Option<f64> {
    let normalized = non_blank(value)?.replacen(',', ".", 1);
    let mut seen_dot = false;
    let end = normalized
        .char_indices()
        .find(|&(i, c)| match c {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            '-' | '+' if i == 0 => false,
            _ => true,
        })
        .map_or(normalized.len(), |(i, _)| i);
    normalized[..end].parse().ok()
}

/// `MM/DD/YYYY`; impossible calendar dates are dropped.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let value = non_blank(value)?;
    let mut parts = value.split('/').map(|p| p.trim().parse::<u32>().ok());
    let (Some(Some(month)), Some(Some(day)), Some(Some(year)), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Form timestamps look like `3/14/2024 10:32:05`; only the date is kept.
pub fn parse_timestamp(value: Option<&str>) -> Option<NaiveDate> {
    let value = non_blank(value)?;
    parse_date(value.split_whitespace().next())
}

/// `sí`, `si` and `yes` are true, `no` is false, anything else is unknown.
pub fn parse_bool(value: Option<&str>) -> Option<bool> {
    match non_blank(value)?.to_lowercase().as_str() {
        "sí" | "si" | "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

pub fn normalize_gender(value: Option<&str>) -> Option<String> {
    let value = non_blank(value)?;
    Some(match value.to_lowercase().as_str() {
        "masculino" => "M".to_string(),
        "femenino" => "F".to_string(),
        _ => value.to_string(),
    })
}

pub fn normalize_status(value: Option<&str>) -> Option<String> {
    let value = non_blank(value)?;
    Some(match value.to_lowercase().as_str() {
        "activo" => "A".to_string(),
        "inactivo" => "I".to_string(),
        _ => value.to_string(),
    })
}

pub fn text(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}
