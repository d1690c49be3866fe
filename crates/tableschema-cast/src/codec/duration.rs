//! ISO 8601 style durations with calendar units approximated as fixed spans.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use tableschema_model::{CastError, EncodeError, FieldType, Value};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: u64 = 360 * SECONDS_PER_DAY;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?T?(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)(?:\.(\d+))?S)?$")
        .expect("duration regex")
});

pub(crate) fn cast(raw: &str) -> Result<Value, CastError> {
    parse(raw)
        .map(Value::Duration)
        .ok_or_else(|| CastError::InvalidValue {
            field_type: FieldType::Duration,
            value: raw.to_string(),
            reason: "expected an ISO 8601 duration such as P1Y2M3DT4H5M6S".to_string(),
        })
}

fn parse(raw: &str) -> Option<Duration> {
    let caps = DURATION_RE.captures(raw)?;
    let unit = |index: usize, seconds: u64| -> Option<u64> {
        match caps.get(index) {
            Some(m) => m.as_str().parse::<u64>().ok()?.checked_mul(seconds),
            None => Some(0),
        }
    };
    let total = [
        unit(1, SECONDS_PER_YEAR)?,
        unit(2, SECONDS_PER_MONTH)?,
        unit(3, SECONDS_PER_DAY)?,
        unit(4, SECONDS_PER_HOUR)?,
        unit(5, SECONDS_PER_MINUTE)?,
        unit(6, 1)?,
    ]
    .into_iter()
    .try_fold(0u64, u64::checked_add)?;

    let nanos = match caps.get(7) {
        Some(fraction) => {
            let digits: String = fraction.as_str().chars().take(9).collect();
            format!("{digits:0<9}").parse::<u32>().ok()?
        }
        None => 0,
    };
    Some(Duration::new(total, nanos))
}

/// Emits every component, e.g. `P1Y1M1DT1H1M0.5S`.
pub(crate) fn encode(value: &Value) -> Result<String, EncodeError> {
    let Value::Duration(duration) = value else {
        return Err(EncodeError::IncompatibleValue {
            field_type: FieldType::Duration,
            found: value.kind(),
        });
    };
    let mut rest = duration.as_secs();
    let mut take = |unit: u64| {
        let count = rest / unit;
        rest %= unit;
        count
    };
    let years = take(SECONDS_PER_YEAR);
    let months = take(SECONDS_PER_MONTH);
    let days = take(SECONDS_PER_DAY);
    let hours = take(SECONDS_PER_HOUR);
    let minutes = take(SECONDS_PER_MINUTE);
    let seconds = rest;

    let nanos = duration.subsec_nanos();
    let seconds = if nanos == 0 {
        seconds.to_string()
    } else {
        let fraction = format!("{nanos:09}");
        format!("{seconds}.{}", fraction.trim_end_matches('0'))
    };
    Ok(format!(
        "P{years}Y{months}M{days}DT{hours}H{minutes}M{seconds}S"
    ))
}
