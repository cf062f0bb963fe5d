//! The sub-day duration grammar: a signed sequence of decimal numbers,
//! each with an optional fraction and a unit suffix, e.g. `"300ms"`, `"-1.5h"` or `"2h45m"`.
//!
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.

use sqlfield_db::Error;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Magnitude of `i64::MIN`, the largest absolute value a duration can have
const LIMIT: u64 = 1 << 63;

fn unit_scale(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => NANOSECOND,
        "us" | "\u{00b5}s" | "\u{03bc}s" => MICROSECOND,
        "ms" => MILLISECOND,
        "s" => SECOND,
        "m" => MINUTE,
        "h" => HOUR,
        _ => return None,
    })
}

/// Parse a duration into nanoseconds
pub fn parse_duration_text(original: &str) -> Result<i64, Error> {
    let invalid = || Error::DecodeError(format!("invalid duration {original:?}"));
    let out_of_range = || Error::DecodeError(format!("duration {original:?} is out of range"));

    let mut text = original;
    let mut negative = false;
    if let Some(rest) = text.strip_prefix('-') {
        negative = true;
        text = rest;
    } else if let Some(rest) = text.strip_prefix('+') {
        text = rest;
    }

    if text == "0" {
        return Ok(0);
    }
    if text.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !text.is_empty() {
        if !text.starts_with(|char: char| char == '.' || char.is_ascii_digit()) {
            return Err(invalid());
        }

        let (integer, rest) = leading_int(text).ok_or_else(out_of_range)?;
        let has_integer = rest.len() != text.len();
        text = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = text.strip_prefix('.') {
            let (digits, digits_scale, after) = leading_fraction(rest);
            has_fraction = after.len() != rest.len();
            fraction = digits;
            scale = digits_scale;
            text = after;
        }
        if !has_integer && !has_fraction {
            return Err(invalid());
        }

        let unit_end = text
            .find(|char: char| char == '.' || char.is_ascii_digit())
            .unwrap_or(text.len());
        let (unit, rest) = text.split_at(unit_end);
        if unit.is_empty() {
            return Err(Error::DecodeError(format!(
                "missing unit in duration {original:?}"
            )));
        }
        let unit = unit_scale(unit).ok_or_else(|| {
            Error::DecodeError(format!("unknown unit {unit:?} in duration {original:?}"))
        })?;
        text = rest;

        if integer > LIMIT / unit {
            return Err(out_of_range());
        }
        let mut value = integer * unit;
        if fraction > 0 {
            value += (fraction as f64 * (unit as f64 / scale)) as u64;
            if value > LIMIT {
                return Err(out_of_range());
            }
        }

        total = total
            .checked_add(value)
            .filter(|total| *total <= LIMIT)
            .ok_or_else(out_of_range)?;
    }

    if negative {
        // `LIMIT as i64` wraps to `i64::MIN` which is exactly the negated limit
        return Ok((total as i64).wrapping_neg());
    }
    if total > LIMIT - 1 {
        return Err(out_of_range());
    }
    Ok(total as i64)
}

/// Consume the leading digits, `None` on overflow
fn leading_int(text: &str) -> Option<(u64, &str)> {
    let end = text
        .find(|char: char| !char.is_ascii_digit())
        .unwrap_or(text.len());
    let mut value: u64 = 0;
    for digit in text[..end].bytes() {
        if value > LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > LIMIT {
            return None;
        }
    }
    Some((value, &text[end..]))
}

/// Consume the leading digits of a fraction, ignoring the precision which doesn't fit
fn leading_fraction(text: &str) -> (u64, f64, &str) {
    let end = text
        .find(|char: char| !char.is_ascii_digit())
        .unwrap_or(text.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for digit in text[..end].bytes() {
        if overflow {
            continue;
        }
        if value > (LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let next = value * 10 + u64::from(digit - b'0');
        if next > LIMIT {
            overflow = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &text[end..])
}

/// Format nanoseconds as text.
///
/// Durations below one second use the smallest fitting unit (`"1.5µs"`, `"300ms"`),
/// everything else is written as hours, minutes and seconds (`"1h0m0s"`, `"1m30.5s"`).
/// The zero duration is `"0s"`.
pub fn format_duration_text(nanos: i64) -> String {
    let mut buffer = [0u8; 32];
    let mut w = buffer.len();

    let negative = nanos < 0;
    let mut u = nanos.unsigned_abs();
    if u < SECOND {
        let precision;
        w -= 1;
        buffer[w] = b's';
        w -= 1;
        if u == 0 {
            buffer[w] = b'0';
            return String::from_utf8_lossy(&buffer[w..]).into_owned();
        } else if u < MICROSECOND {
            precision = 0;
            buffer[w] = b'n';
        } else if u < MILLISECOND {
            precision = 3;
            // µ is two bytes wide
            w -= 1;
            buffer[w..w + 2].copy_from_slice("\u{00b5}".as_bytes());
        } else {
            precision = 6;
            buffer[w] = b'm';
        }
        (w, u) = format_fraction(&mut buffer[..w], u, precision);
        w = format_int(&mut buffer[..w], u);
    } else {
        w -= 1;
        buffer[w] = b's';
        (w, u) = format_fraction(&mut buffer[..w], u, 9);
        w = format_int(&mut buffer[..w], u % 60);
        u /= 60;
        if u > 0 {
            w -= 1;
            buffer[w] = b'm';
            w = format_int(&mut buffer[..w], u % 60);
            u /= 60;
            if u > 0 {
                w -= 1;
                buffer[w] = b'h';
                w = format_int(&mut buffer[..w], u);
            }
        }
    }

    if negative {
        w -= 1;
        buffer[w] = b'-';
    }
    String::from_utf8_lossy(&buffer[w..]).into_owned()
}

/// Write the `precision` lowest digits of `value` as a fraction to the end of `buffer`.
///
/// Trailing zeros are omitted, as is the decimal point for a zero fraction.
/// Returns the start of the written text and the remaining integer part.
fn format_fraction(buffer: &mut [u8], mut value: u64, precision: usize) -> (usize, u64) {
    let mut w = buffer.len();
    let mut print = false;
    for _ in 0..precision {
        let digit = value % 10;
        print = print || digit != 0;
        if print {
            w -= 1;
            buffer[w] = digit as u8 + b'0';
        }
        value /= 10;
    }
    if print {
        w -= 1;
        buffer[w] = b'.';
    }
    (w, value)
}

/// Write `value` to the end of `buffer` and return the start of the written text
fn format_int(buffer: &mut [u8], mut value: u64) -> usize {
    let mut w = buffer.len();
    if value == 0 {
        w -= 1;
        buffer[w] = b'0';
    } else {
        while value > 0 {
            w -= 1;
            buffer[w] = (value % 10) as u8 + b'0';
            value /= 10;
        }
    }
    w
}

#[cfg(test)]
mod tests {
    use sqlfield_db::Error;

    use super::{format_duration_text, parse_duration_text, HOUR, MINUTE, SECOND};

    #[test]
    fn parse_units() {
        assert_eq!(parse_duration_text("1ns").unwrap(), 1);
        assert_eq!(parse_duration_text("1us").unwrap(), 1_000);
        assert_eq!(parse_duration_text("1\u{00b5}s").unwrap(), 1_000);
        assert_eq!(parse_duration_text("1ms").unwrap(), 1_000_000);
        assert_eq!(parse_duration_text("1s").unwrap(), SECOND as i64);
        assert_eq!(parse_duration_text("1m").unwrap(), MINUTE as i64);
        assert_eq!(parse_duration_text("1h").unwrap(), HOUR as i64);
    }

    #[test]
    fn parse_compound_and_signed() {
        assert_eq!(
            parse_duration_text("2h45m").unwrap(),
            (2 * HOUR + 45 * MINUTE) as i64
        );
        assert_eq!(parse_duration_text("1.5h").unwrap(), (90 * MINUTE) as i64);
        assert_eq!(parse_duration_text(".5s").unwrap(), (SECOND / 2) as i64);
        assert_eq!(parse_duration_text("-1m30s").unwrap(), -((90 * SECOND) as i64));
        assert_eq!(parse_duration_text("+3s").unwrap(), (3 * SECOND) as i64);
        assert_eq!(parse_duration_text("0").unwrap(), 0);
        assert_eq!(parse_duration_text("-0").unwrap(), 0);
    }

    #[test]
    fn parse_limits() {
        assert_eq!(
            parse_duration_text("9223372036854775807ns").unwrap(),
            i64::MAX
        );
        assert_eq!(
            parse_duration_text("-9223372036854775808ns").unwrap(),
            i64::MIN
        );
        assert!(parse_duration_text("9223372036854775808ns").is_err());
        assert!(parse_duration_text("3000000h").is_err());
    }

    #[test]
    fn parse_invalid() {
        for text in ["", "-", "invalid", "1", "1x", ".s", "1.h2", "s"] {
            assert!(
                matches!(parse_duration_text(text), Err(Error::DecodeError(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn format() {
        assert_eq!(format_duration_text(0), "0s");
        assert_eq!(format_duration_text(1), "1ns");
        assert_eq!(format_duration_text(1_000), "1\u{00b5}s");
        assert_eq!(format_duration_text(1_500), "1.5\u{00b5}s");
        assert_eq!(format_duration_text(300_000_000), "300ms");
        assert_eq!(format_duration_text(SECOND as i64), "1s");
        assert_eq!(format_duration_text((90 * SECOND + SECOND / 2) as i64), "1m30.5s");
        assert_eq!(format_duration_text(HOUR as i64), "1h0m0s");
        assert_eq!(format_duration_text(-(HOUR as i64)), "-1h0m0s");
        assert_eq!(format_duration_text(i64::MIN), "-2562047h47m16.854775808s");
        assert_eq!(format_duration_text(i64::MAX), "2562047h47m16.854775807s");
    }

    #[test]
    fn formatted_text_parses_back() {
        for nanos in [1, 1_500, 300_000_000, 90_500_000_000, 3_600_000_000_000, -42] {
            assert_eq!(parse_duration_text(&format_duration_text(nanos)).unwrap(), nanos);
        }
    }
}
