//! Readout formatting.
//!
//! Values are rounded half-up at the requested precision by shifting the
//! decimal exponent in text, which avoids the binary error of multiplying
//! by a power of ten (`1.005` rounds to `1.01`, not `1.00`).

use serde::{Deserialize, Serialize};

/// Precision and unit of one readout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReadoutFormat {
    /// Digits after the decimal point
    pub decimal: u32,
    /// Unit appended after a space
    pub unit: Option<String>,
}

impl ReadoutFormat {
    /// Create a format.
    #[must_use]
    pub fn new(decimal: u32, unit: Option<String>) -> Self {
        Self { decimal, unit }
    }

    /// Format `value`, e.g. `"55.0 ft"`.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let number = if value.is_finite() {
            let rounded = round_half_up(value, self.decimal);
            // no negative zero in a readout
            let rounded = if rounded == 0.0 { 0.0 } else { rounded };
            format!("{rounded:.prec$}", prec = self.decimal as usize)
        } else {
            value.to_string()
        };
        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{number} {unit}"),
            _ => number,
        }
    }

    /// Number currently shown by a formatted readout; 0 when none.
    #[must_use]
    pub fn parse_displayed(&self, text: &str) -> f64 {
        parse_leading_number(text).unwrap_or(0.0)
    }
}

/// Round half-up at `decimal` places.
#[must_use]
pub fn round_half_up(value: f64, decimal: u32) -> f64 {
    // already exact at this precision once the shift leaves f64 range
    if !value.is_finite() || !(value.abs() * 10f64.powi(decimal as i32)).is_finite() {
        return value;
    }
    let shifted = format!("{value}e{decimal}")
        .parse::<f64>()
        .unwrap_or_else(|_| value * 10f64.powi(decimal as i32));
    let rounded = (shifted + 0.5).floor();
    format!("{rounded}e-{decimal}")
        .parse::<f64>()
        .unwrap_or_else(|_| rounded / 10f64.powi(decimal as i32))
}

/// Parse the longest numeric prefix of `text`, skipping leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, an optional
/// exponent, and `Infinity`. Trailing text such as a unit is ignored.
#[must_use]
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };
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
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse().ok()
}
