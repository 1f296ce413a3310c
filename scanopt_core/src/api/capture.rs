use std::str::FromStr;
use thiserror::Error;

use crate::api::Slot;
use crate::model::TypeCode;

/// How numeric tokens are converted into `%d`, `%f`, `%g` and `%F` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conversion {
    /// Convert the longest numeric prefix of the token, in the manner of C's `atoi`/`atof`.
    /// Integers are decimal only, while floats also accept `inf`, `nan` and hexadecimal (ex: `0x1.8p1`).
    /// A token without a numeric prefix converts to zero; conversion never fails.
    #[default]
    Permissive,
    /// The entire token must convert (via [`std::str::FromStr`]), otherwise parsing fails.
    Strict,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {type_code}")]
pub(crate) struct InvalidConversion {
    pub(crate) token: String,
    pub(crate) type_code: TypeCode,
}

impl<'a> Slot<'a> {
    /// Capture a token into this slot, according to the type code it was declared with.
    pub(crate) fn capture(
        &mut self,
        type_code: TypeCode,
        token: &str,
        conversion: Conversion,
    ) -> Result<(), InvalidConversion> {
        match (type_code, self) {
            (TypeCode::Integer, Slot::Integer(variable)) => {
                **variable = match conversion {
                    Conversion::Permissive => leading_integer(token),
                    Conversion::Strict => strict(token, type_code)?,
                };
            }
            (TypeCode::Float, Slot::Float(variable)) => {
                **variable = match conversion {
                    Conversion::Permissive => leading_float(token) as f32,
                    Conversion::Strict => strict(token, type_code)?,
                };
            }
            (TypeCode::Double, Slot::Double(variable)) => {
                **variable = match conversion {
                    Conversion::Permissive => leading_float(token),
                    Conversion::Strict => strict(token, type_code)?,
                };
            }
            (TypeCode::String, Slot::Text(variable)) => {
                **variable = token.to_string();
            }
            (TypeCode::StringAppend, Slot::Text(variable)) => {
                if !variable.is_empty() {
                    variable.push(' ');
                }

                variable.push_str(token);
            }
            (TypeCode::Boolean, Slot::Boolean(variable)) => {
                // Flags can only ever be switched on.
                **variable = true;
            }
            (type_code, slot) => {
                unreachable!(
                    "internal error - slot {:?} cannot capture {type_code}",
                    slot.kind()
                );
            }
        }

        Ok(())
    }
}

fn strict<T: FromStr>(token: &str, type_code: TypeCode) -> Result<T, InvalidConversion> {
    T::from_str(token).map_err(|_| InvalidConversion {
        token: token.to_string(),
        type_code,
    })
}

fn leading_integer(token: &str) -> i32 {
    let token = token.trim_start();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    // Saturate just past i32::MAX so that i32::MIN remains reachable.
    let limit = i64::from(i32::MAX) + 1;
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(limit));
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn leading_float(token: &str) -> f64 {
    let token = token.trim_start();
    let bytes = token.as_bytes();
    let mut end = match bytes.first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };

    if matches!(token.get(end..end + 2), Some("0x") | Some("0X")) {
        if let Some(value) = leading_hex_float(&token[end + 2..]) {
            return if token.starts_with('-') { -value } else { value };
        }
    }

    for word in ["infinity", "inf", "nan"] {
        if let Some(candidate) = token.get(end..end + word.len()) {
            if candidate.eq_ignore_ascii_case(word) {
                return token[..end + word.len()].parse().unwrap_or(0.0);
            }
        }
    }

    let digits_at = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };
    let mut mantissa_digits = digits_at(end);
    end += mantissa_digits;

    if bytes.get(end) == Some(&b'.') {
        let fraction_digits = digits_at(end + 1);
        mantissa_digits += fraction_digits;
        end += 1 + fraction_digits;
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent_end = end + 1;

        if matches!(bytes.get(exponent_end), Some(b'-') | Some(b'+')) {
            exponent_end += 1;
        }

        let exponent_digits = digits_at(exponent_end);

        if exponent_digits > 0 {
            end = exponent_end + exponent_digits;
        }
    }

    token[..end].parse().unwrap_or(0.0)
}

// The digits following a `0x` prefix, with an optional binary exponent (ex: `1.8p3`).
fn leading_hex_float(digits: &str) -> Option<f64> {
    let bytes = digits.as_bytes();
    let mut end = 0;
    let mut mantissa_digits = 0;
    let mut value = 0.0f64;

    while let Some(digit) = bytes.get(end).and_then(|b| (*b as char).to_digit(16)) {
        value = value * 16.0 + f64::from(digit);
        mantissa_digits += 1;
        end += 1;
    }

    if bytes.get(end) == Some(&b'.') {
        end += 1;
        let mut scale = 1.0 / 16.0;

        while let Some(digit) = bytes.get(end).and_then(|b| (*b as char).to_digit(16)) {
            value += f64::from(digit) * scale;
            scale /= 16.0;
            mantissa_digits += 1;
            end += 1;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'p') | Some(b'P')) {
        let mut exponent_end = end + 1;
        let negative = bytes.get(exponent_end) == Some(&b'-');

        if matches!(bytes.get(exponent_end), Some(b'-') | Some(b'+')) {
            exponent_end += 1;
        }

        let exponent = bytes[exponent_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .fold(0i32, |acc, b| {
                acc.saturating_mul(10).saturating_add(i32::from(b - b'0'))
            });

        if bytes.get(exponent_end).map_or(false, u8::is_ascii_digit) {
            value *= 2f64.powi(if negative { -exponent } else { exponent });
        }
    }

    Some(value)
}
