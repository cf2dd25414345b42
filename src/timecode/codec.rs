use crate::errors::FormatError;

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`)
///
/// The value is rounded to the nearest millisecond. Negative, NaN and
/// infinite inputs render as `00:00:00,000`.
pub fn encode(seconds: f64) -> String {
    if seconds.is_nan() || seconds.is_infinite() || seconds < 0.0 {
        return "00:00:00,000".to_string();
    }

    let total_millis = (seconds * 1000.0).round() as u64;
    let hours = total_millis / MILLIS_PER_HOUR;
    let minutes = (total_millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let secs = (total_millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    let millis = total_millis % MILLIS_PER_SECOND;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) into seconds
///
/// Hours take at least two digits, minutes and seconds exactly two (below 60),
/// milliseconds exactly three. Surrounding whitespace is ignored.
pub fn decode(text: &str) -> Result<f64, FormatError> {
    let value = text.trim();

    let (clock, millis) = value.split_once(',').ok_or_else(|| {
        FormatError::new(format!(
            "timestamp '{}' is missing the ',' millisecond separator",
            value
        ))
    })?;

    let mut fields = clock.split(':');
    let (Some(hours), Some(minutes), Some(secs), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(FormatError::new(format!(
            "timestamp '{}' must have exactly three ':'-separated fields",
            value
        )));
    };

    let hours = parse_field(value, "hours", hours, 2, None)?;
    let minutes = parse_field(value, "minutes", minutes, 2, Some(2))?;
    let secs = parse_field(value, "seconds", secs, 2, Some(2))?;
    let millis = parse_field(value, "milliseconds", millis, 3, Some(3))?;

    if minutes >= 60 || secs >= 60 {
        return Err(FormatError::new(format!(
            "timestamp '{}' has minutes or seconds out of range",
            value
        )));
    }

    let total_millis = hours
        .checked_mul(MILLIS_PER_HOUR)
        .and_then(|ms| {
            ms.checked_add(minutes * MILLIS_PER_MINUTE + secs * MILLIS_PER_SECOND + millis)
        })
        .ok_or_else(|| {
            FormatError::new(format!("timestamp '{}' has an hours field out of range", value))
        })?;
    Ok(total_millis as f64 / 1000.0)
}

fn parse_field(
    value: &str,
    name: &str,
    field: &str,
    min_width: usize,
    max_width: Option<usize>,
) -> Result<u64, FormatError> {
    let width_ok = field.len() >= min_width && max_width.map_or(true, |max| field.len() <= max);
    if !width_ok || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::new(format!(
            "timestamp '{}' has an invalid {} field '{}'",
            value, name, field
        )));
    }

    field.parse::<u64>().map_err(|e| {
        FormatError::new(format!(
            "timestamp '{}' has an invalid {} field: {}",
            value, name, e
        ))
    })
}
