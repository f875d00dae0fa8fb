//! Value formatters for the router's `$`-prefixed hex strings.

use crate::error::{Error, Result, ValueErrorKind};

/// Format a raw MAC value (`$` followed by 12 hex digits) as colon pairs.
///
/// Letter case is kept as sent by the router.
///
/// # Examples
///
/// ```
/// use arris_connectbox::mib::format_mac;
///
/// assert_eq!(format_mac("$1234567890AB").unwrap(), "12:34:56:78:90:AB");
/// assert!(format_mac("not-a-mac").is_err());
/// ```
pub fn format_mac(value: &str) -> Result<String> {
    let hex = strip_hex_prefix(value)
        .filter(|hex| hex.len() == 12)
        .ok_or_else(|| Error::invalid_value(ValueErrorKind::InvalidMacFormat, value))?;

    let mut mac = String::with_capacity(17);
    for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
        if i > 0 {
            mac.push(':');
        }
        // ASCII hex digits, checked by strip_hex_prefix
        mac.push(pair[0] as char);
        mac.push(pair[1] as char);
    }
    Ok(mac)
}

/// Format a raw date value as `YYYY-MM-DD HH:MM:SS:ff`.
///
/// The value is `$` followed by hex bytes: a big-endian year, then month, day,
/// hour, minute, second and hundredths. Bytes past the eighth are ignored. An
/// all-zero value is the router's "no lease" marker and formats to
/// `0000-00-00 00:00:00:00`.
///
/// # Examples
///
/// ```
/// use arris_connectbox::mib::format_date;
///
/// assert_eq!(format_date("$07e30b0310330400").unwrap(), "2019-11-03 16:51:04:00");
/// assert_eq!(format_date("$0000000000000000").unwrap(), "0000-00-00 00:00:00:00");
/// ```
pub fn format_date(value: &str) -> Result<String> {
    let invalid = || Error::invalid_value(ValueErrorKind::InvalidDateFormat, value);

    let hex = strip_hex_prefix(value).ok_or_else(invalid)?;
    let bytes = decode_hex(hex).ok_or_else(invalid)?;
    let [y0, y1, month, day, hour, minute, second, hundredths, ..] = bytes[..] else {
        return Err(invalid());
    };

    let year = u16::from_be_bytes([y0, y1]);
    Ok(format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}:{:02}",
        year, month, day, hour, minute, second, hundredths
    ))
}

/// Strip the leading `$` and check that at least one hex digit follows.
fn strip_hex_prefix(value: &str) -> Option<&str> {
    let hex = value.strip_prefix('$')?;
    (!hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit())).then_some(hex)
}

/// Decode a hex string to bytes. Returns `None` for odd length or bad digits.
fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if !s.len().is_multiple_of(2) {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
