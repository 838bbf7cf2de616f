// ============================================================================
// FORMATEO - importes y fechas para tablas y tarjetas
// ============================================================================

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const DEFAULT_CURRENCY: &str = "¥";
pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD HH:mm";

/// `1234.5` → `"¥1,234.50"`
pub fn format_amount(amount: f64) -> String {
    format_amount_with(amount, DEFAULT_CURRENCY, 2)
}

pub fn format_amount_with(amount: f64, currency: &str, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0.00 se muestra sin signo
    let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    match fraction {
        Some(f) => format!("{}{}{}.{}", currency, sign, grouped, f),
        None => format!("{}{}{}", currency, sign, grouped),
    }
}

/// Interpreta RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC) o `YYYY-MM-DD` (medianoche UTC)
pub fn parse_date_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formatea en la zona horaria local del navegador
pub fn format_date_time(input: &str, pattern: &str) -> String {
    format_date_time_in(input, pattern, &Local)
}

/// Tokens `YYYY MM DD HH mm ss`; cada uno se sustituye una sola vez.
/// Entrada vacía o inválida → cadena vacía.
pub fn format_date_time_in<Tz: TimeZone>(input: &str, pattern: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_date_time(input) {
        Some(dt) => render_pattern(&dt.with_timezone(tz), pattern),
        None => String::new(),
    }
}

fn render_pattern<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    pattern
        .replacen("YYYY", &dt.format("%Y").to_string(), 1)
        .replacen("MM", &dt.format("%m").to_string(), 1)
        .replacen("DD", &dt.format("%d").to_string(), 1)
        .replacen("HH", &dt.format("%H").to_string(), 1)
        .replacen("mm", &dt.format("%M").to_string(), 1)
        .replacen("ss", &dt.format("%S").to_string(), 1)
}

/// `HH:MM:SS` para el visor del log de depuración
pub fn format_clock(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%H:%M:%S").to_string()
}
