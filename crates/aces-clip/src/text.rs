//! Numeric and date text helpers.
//!
//! Float parsing goes through `str::parse`, which always uses `.` as the
//! decimal separator regardless of the host locale.

use chrono::{DateTime, Utc};

/// Parses three whitespace-separated floats.
///
/// Best effort: tokens are consumed left to right and parsing stops at the
/// first malformed or missing one, leaving the remaining components at 0.0.
///
/// # Example
///
/// ```rust
/// use aces_clip::text::parse_vec3;
///
/// assert_eq!(parse_vec3("1.1 -0.02 3e-1"), [1.1, -0.02, 0.3]);
/// assert_eq!(parse_vec3("1.5 x 2"), [1.5, 0.0, 0.0]);
/// ```
pub fn parse_vec3(s: &str) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (slot, token) in out.iter_mut().zip(s.split_whitespace()) {
        match token.parse() {
            Ok(v) => *slot = v,
            Err(_) => break,
        }
    }
    out
}

/// Parses a single float, ignoring surrounding whitespace.
pub fn parse_float(s: &str) -> Option<f32> {
    s.trim().parse().ok()
}

/// Parses the longest leading decimal number, ignoring what follows.
///
/// Dotted release strings read as their leading number: `1.0.3` is 1.0 and
/// `1.1.0` is 1.1. Returns `None` when the text does not start with a
/// number.
///
/// # Example
///
/// ```rust
/// use aces_clip::text::parse_leading_float;
///
/// assert_eq!(parse_leading_float("1.1.0"), Some(1.1));
/// assert_eq!(parse_leading_float("v1"), None);
/// ```
pub fn parse_leading_float(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    s[..end].parse().ok()
}

/// Turns `2015-05-04T12:30:00` into `2015-05-04 Time: 12:30:00`.
///
/// Text without a `T` separator is returned unchanged.
pub fn reformat_clip_date(s: &str) -> String {
    match s.split_once('T') {
        Some((date, time)) => format!("{} Time: {}", date, time),
        None => s.to_string(),
    }
}

/// Formats a timestamp the way clip files store it.
pub fn format_clip_date(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}
