//! Relative time formatting for the `elapsed()` template function.

use chrono::{DateTime, Utc};
use minijinja::value::ValueKind;
use minijinja::{Error, ErrorKind, Value};
use newsdesk_locale::Printer;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats the time between `timestamp` and `now` in the printer's language.
///
/// A missing timestamp, or one in the future, is reported as "not yet".
pub fn elapsed_time(printer: &Printer, timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return printer.message("time_elapsed.not_yet");
    };
    if timestamp.timestamp() == 0 || now < timestamp {
        return printer.message("time_elapsed.not_yet");
    }

    let seconds = (now - timestamp).num_seconds();
    if seconds < MINUTE {
        return printer.message("time_elapsed.now");
    }
    if seconds < HOUR {
        let minutes = seconds / MINUTE;
        return printer.plural("time_elapsed.minutes", minutes, &[minutes]);
    }
    if seconds < DAY {
        let hours = seconds / HOUR;
        return printer.plural("time_elapsed.hours", hours, &[hours]);
    }

    let days = seconds / DAY;
    match days {
        1 => printer.message("time_elapsed.yesterday"),
        d if d < 21 => printer.plural("time_elapsed.days", d, &[d]),
        d if d < 31 => {
            let weeks = rounded_div(d, 7);
            printer.plural("time_elapsed.weeks", weeks, &[weeks])
        }
        d if d < 365 => {
            let months = rounded_div(d, 30);
            printer.plural("time_elapsed.months", months, &[months])
        }
        d => {
            let years = rounded_div(d, 365);
            printer.plural("time_elapsed.years", years, &[years])
        }
    }
}

fn rounded_div(n: i64, d: i64) -> i64 {
    (n as f64 / d as f64).round() as i64
}

/// Reads a timestamp passed to a template function.
///
/// Accepts RFC 3339 strings (how `chrono` serializes `DateTime`) and integer
/// Unix seconds. `none`, undefined and the empty string mean "no date".
pub fn parse_timestamp(value: &Value) -> Result<Option<DateTime<Utc>>, Error> {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => Ok(None),
        ValueKind::String => {
            let text = value.as_str().unwrap_or_default();
            if text.is_empty() {
                return Ok(None);
            }
            DateTime::parse_from_rfc3339(text)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidOperation,
                        format!("invalid timestamp {text:?}"),
                    )
                    .with_source(e)
                })
        }
        ValueKind::Number => {
            let seconds = value.as_i64().ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("timestamp {value} is not a whole number of seconds"),
                )
            })?;
            DateTime::from_timestamp(seconds, 0).map(Some).ok_or_else(|| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("timestamp {seconds} is out of range"),
                )
            })
        }
        _ => Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot use {} as a timestamp", value.kind()),
        )),
    }
}
