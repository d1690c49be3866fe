//! Date, time, datetime, year and yearmonth codecs.
//!
//! Every temporal cast produces a UTC timestamp. Custom formats use
//! strptime-style tokens, translated token by token into chrono's syntax.
//! Components a format does not carry default to January 1st of year 0,
//! midnight and UTC, so a time-only value lands on `0000-01-01`.

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveTime, SecondsFormat, TimeZone, Utc};

use tableschema_model::{CastError, DEFAULT_FORMAT, EncodeError, FieldType, Value};

const DATE_PATTERN: &str = "%Y-%m-%d";
const TIME_PATTERN: &str = "%H:%M:%S";
const YEAR_PATTERN: &str = "%Y";
const YEAR_MONTH_PATTERN: &str = "%Y-%m";

/// Format tag reserved for guessing the layout, which is not supported.
const ANY_FORMAT: &str = "any";

pub(crate) fn cast_date(format: &str, raw: &str) -> Result<Value, CastError> {
    cast_with(FieldType::Date, format, raw, |raw| {
        parse_pattern(FieldType::Date, DATE_PATTERN, raw)
    })
}

pub(crate) fn cast_time(format: &str, raw: &str) -> Result<Value, CastError> {
    cast_with(FieldType::Time, format, raw, |raw| {
        parse_pattern(FieldType::Time, TIME_PATTERN, raw)
    })
}

pub(crate) fn cast_datetime(format: &str, raw: &str) -> Result<Value, CastError> {
    cast_with(FieldType::DateTime, format, raw, |raw| {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| invalid(FieldType::DateTime, raw, e.to_string()))
    })
}

pub(crate) fn cast_year(format: &str, raw: &str) -> Result<Value, CastError> {
    cast_with(FieldType::Year, format, raw, |raw| {
        if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                FieldType::Year,
                raw,
                "expected a four-digit year".to_string(),
            ));
        }
        parse_pattern(FieldType::Year, YEAR_PATTERN, raw)
    })
}

pub(crate) fn cast_year_month(format: &str, raw: &str) -> Result<Value, CastError> {
    cast_with(FieldType::YearMonth, format, raw, |raw| {
        parse_pattern(FieldType::YearMonth, YEAR_MONTH_PATTERN, raw)
    })
}

/// Renders any temporal value as RFC 3339 in UTC.
pub(crate) fn encode(field_type: FieldType, value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::DateTime(dt) => Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        other => Err(EncodeError::IncompatibleValue {
            field_type,
            found: other.kind(),
        }),
    }
}

fn cast_with(
    field_type: FieldType,
    format: &str,
    raw: &str,
    parse_default: impl FnOnce(&str) -> Result<DateTime<Utc>, CastError>,
) -> Result<Value, CastError> {
    let parsed = match format {
        DEFAULT_FORMAT => parse_default(raw)?,
        ANY_FORMAT => {
            return Err(CastError::UnsupportedFormat {
                field_type,
                format: format.to_string(),
            });
        }
        custom => {
            let pattern = translate(custom).ok_or_else(|| CastError::UnsupportedFormat {
                field_type,
                format: custom.to_string(),
            })?;
            parse_pattern(field_type, &pattern, raw)?
        }
    };
    Ok(Value::DateTime(parsed))
}

fn parse_pattern(field_type: FieldType, pattern: &str, raw: &str) -> Result<DateTime<Utc>, CastError> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, raw, StrftimeItems::new(pattern))
        .map_err(|e| invalid(field_type, raw, e.to_string()))?;
    resolve(parsed).map_err(|reason| invalid(field_type, raw, reason))
}

fn resolve(mut parsed: Parsed) -> Result<DateTime<Utc>, String> {
    if parsed.year().is_none()
        && parsed.year_div_100().is_none()
        && parsed.year_mod_100().is_none()
    {
        parsed.set_year(0).map_err(|e| e.to_string())?;
    }
    if parsed.month().is_none() {
        parsed.set_month(1).map_err(|e| e.to_string())?;
    }
    if parsed.day().is_none() {
        parsed.set_day(1).map_err(|e| e.to_string())?;
    }
    let date = parsed.to_naive_date().map_err(|e| e.to_string())?;

    let time = if parsed.hour_mod_12().is_none() {
        NaiveTime::MIN
    } else {
        if parsed.minute().is_none() {
            parsed.set_minute(0).map_err(|e| e.to_string())?;
        }
        parsed.to_naive_time().map_err(|e| e.to_string())?
    };
    let naive = date.and_time(time);

    match parsed.offset() {
        None => Ok(naive.and_utc()),
        Some(seconds) => FixedOffset::east_opt(seconds)
            .and_then(|offset| offset.from_local_datetime(&naive).single())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| format!("offset of {seconds} seconds is out of range")),
    }
}

/// Translates strptime-style tokens into chrono's syntax.
///
/// Returns `None` when the format uses a token outside the supported table.
/// `.%f` reads a fraction of any length; a bare `%f` reads exactly six digits.
fn translate(format: &str) -> Option<String> {
    let mut out = String::with_capacity(format.len() + 4);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let mut token = String::from('%');
        let next = chars.next()?;
        token.push(next);
        if matches!(next, '-' | '_' | ':') {
            token.push(chars.next()?);
        }
        if token == "%f" && out.ends_with('.') {
            out.pop();
            out.push_str("%.f");
            continue;
        }
        out.push_str(chrono_token(&token)?);
    }
    Some(out)
}

fn chrono_token(token: &str) -> Option<&'static str> {
    let translated = match token {
        "%d" => "%d",
        "%-d" => "%-d",
        "%B" => "%B",
        "%b" | "%h" => "%b",
        "%m" => "%m",
        "%_m" => "%_m",
        "%-m" => "%-m",
        "%Y" => "%Y",
        "%y" => "%y",
        "%H" => "%H",
        "%I" => "%I",
        "%M" => "%M",
        "%S" => "%S",
        "%f" => "%6f",
        "%z" => "%z",
        "%:z" => "%:z",
        "%Z" => "%Z",
        "%p" => "%p",
        "%%" => "%%",
        _ => return None,
    };
    Some(translated)
}

fn invalid(field_type: FieldType, raw: &str, reason: String) -> CastError {
    CastError::InvalidValue {
        field_type,
        value: raw.to_string(),
        reason,
    }
}
