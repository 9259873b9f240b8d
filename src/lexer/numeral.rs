use std::str::FromStr;

use crate::err::LuzError;
use crate::syntax::TokenValue;

#[derive(Debug, Clone, Copy)]
pub enum Numeral {
    Int(i64),
    Float(f64),
}

impl Numeral {
    pub fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    #[inline]
    pub fn to_float(self) -> Self {
        match self {
            Numeral::Int(i) => Self::Float(i as f64),
            Numeral::Float(_) => self,
        }
    }

    /// Decodes a numeral the way Lua 5.3+ does when `integer_literals` is
    /// set, and the way Lua 5.1/5.2 do (everything is a float) otherwise.
    pub fn parse_lua(text: &str, integer_literals: bool) -> Result<Self, LuzError> {
        if integer_literals {
            return text.parse();
        }
        match hex_digits(text) {
            Some(digits) if !is_hex_float(digits) => hex_integer_as_float(digits)
                .map(Numeral::Float)
                .ok_or_else(|| LuzError::NumberParsing(text.to_string())),
            _ => Ok(text.parse::<Numeral>()?.to_float()),
        }
    }
}

impl From<Numeral> for TokenValue {
    fn from(value: Numeral) -> Self {
        match value {
            Numeral::Int(i) => TokenValue::Integer(i),
            Numeral::Float(f) => TokenValue::Float(f),
        }
    }
}

/// `0x` prefix stripped, if the numeral is hexadecimal.
pub(crate) fn hex_digits(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

pub(crate) fn is_hex_float(digits: &str) -> bool {
    digits.contains(['.', 'p', 'P'])
}

impl FromStr for Numeral {
    type Err = LuzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let string = s.trim();
        let invalid = || LuzError::NumberParsing(string.to_string());

        if let Some(digits) = hex_digits(string) {
            if is_hex_float(digits) {
                return hex_float(digits).map(Numeral::Float).ok_or_else(invalid);
            }
            // Hexadecimal integers wrap around.
            return digits
                .chars()
                .try_fold(0i64, |acc, c| {
                    c.to_digit(16)
                        .map(|d| acc.wrapping_mul(16).wrapping_add(i64::from(d)))
                })
                .filter(|_| !digits.is_empty())
                .map(Numeral::Int)
                .ok_or_else(invalid);
        }

        if !string.contains(['.', 'e', 'E']) {
            if let Ok(int) = string.parse::<i64>() {
                return Ok(Numeral::Int(int));
            }
        }
        // Decimal integers too large for an i64 become floats.
        string
            .parse::<f64>()
            .map(Numeral::Float)
            .map_err(|_| invalid())
    }
}

fn hex_integer_as_float(digits: &str) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits
        .chars()
        .try_fold(0f64, |acc, c| c.to_digit(16).map(|d| acc * 16.0 + f64::from(d)))
}

/// `digits` is everything after `0x`: mantissa with an optional fraction,
/// then an optional binary exponent.
fn hex_float(digits: &str) -> Option<f64> {
    let (mantissa, exponent) = match digits.find(['p', 'P']) {
        Some(at) => (&digits[..at], binary_exponent(&digits[at + 1..])?),
        None => (digits, 0),
    };

    let mut value = 0f64;
    let mut scale = 0i64;
    let mut seen_dot = false;
    let mut any_digit = false;
    for c in mantissa.chars() {
        if c == '.' {
            if seen_dot {
                return None;
            }
            seen_dot = true;
            continue;
        }
        value = value * 16.0 + f64::from(c.to_digit(16)?);
        any_digit = true;
        if seen_dot {
            scale -= 4;
        }
    }
    if !any_digit {
        return None;
    }
    Some(scale_by_power_of_two(value, exponent.saturating_add(scale)))
}

/// Signed decimal exponent, saturated to the `i64` range.
fn binary_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0i64, |acc, c| {
        let d = i64::from(c.to_digit(10)?);
        Some(if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        })
    })
}

/// `value * 2^exp` without overflowing the intermediate power.
fn scale_by_power_of_two(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP && value.is_finite() && value != 0.0 {
        value *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    value * 2f64.powi(exp.clamp(-STEP, STEP) as i32)
}

#[cfg(test)]
mod test {
    use super::Numeral;

    fn parse(s: &str) -> Numeral {
        s.parse().unwrap()
    }

    #[test]
    fn test_decimal_numerals() {
        assert!(matches!(parse("3"), Numeral::Int(3)));
        assert!(matches!(parse("345"), Numeral::Int(345)));
        assert!(matches!(parse("3.0"), Numeral::Float(f) if f == 3.0));
        assert!(matches!(parse("3.1416"), Numeral::Float(f) if f == 3.1416));
        assert!(matches!(parse("314.16e-2"), Numeral::Float(f) if f == 3.1416));
        assert!(matches!(parse("0.31416E1"), Numeral::Float(f) if f == 3.1416));
        assert!(matches!(parse("34e1"), Numeral::Float(f) if f == 340.0));
        assert!(matches!(parse(".5"), Numeral::Float(f) if f == 0.5));
        assert!(matches!(parse("5."), Numeral::Float(f) if f == 5.0));
    }

    #[test]
    fn test_decimal_overflow_becomes_float() {
        assert!(matches!(parse("9223372036854775807"), Numeral::Int(i64::MAX)));
        assert!(parse("9223372036854775808").is_float());
    }

    #[test]
    fn test_hex_integers_wrap() {
        assert!(matches!(parse("0xff"), Numeral::Int(255)));
        assert!(matches!(parse("0XA"), Numeral::Int(10)));
        assert!(matches!(parse("0xffffffffffffffff"), Numeral::Int(-1)));
        assert!(matches!(parse("0x7fffffffffffffff"), Numeral::Int(i64::MAX)));
        // 26 hex digits: only the low 64 bits survive.
        assert!(matches!(
            parse("0x13121110090807060504030201"),
            Numeral::Int(0x0807060504030201)
        ));
    }

    #[test]
    fn test_hex_floats() {
        assert!(matches!(parse("0x0.1E"), Numeral::Float(f) if f == 0.1171875));
        assert!(matches!(parse("0xA23p-4"), Numeral::Float(f) if f == 162.1875));
        assert!(matches!(
            parse("0X1.921FB54442D18P+1"),
            Numeral::Float(f) if f == std::f64::consts::PI
        ));
        assert!(matches!(parse("0x.8"), Numeral::Float(f) if f == 0.5));
        assert!(matches!(parse("0x1p-1074"), Numeral::Float(f) if f == 5e-324));
        assert!(matches!(parse("0x1p2000"), Numeral::Float(f) if f.is_infinite()));
    }

    #[test]
    fn test_huge_binary_exponents_saturate() {
        assert!(matches!(
            parse("0x1p99999999999999999999"),
            Numeral::Float(f) if f == f64::INFINITY
        ));
        assert!(matches!(
            parse("0x1p-99999999999999999999"),
            Numeral::Float(f) if f == 0.0
        ));
        assert!(matches!(
            parse("0x0p99999999999999999999"),
            Numeral::Float(f) if f == 0.0
        ));
    }

    #[test]
    fn test_float_only_numerals() {
        assert!(matches!(
            Numeral::parse_lua("10", false).unwrap(),
            Numeral::Float(f) if f == 10.0
        ));
        assert!(matches!(
            Numeral::parse_lua("0xffffffffffffffff", false).unwrap(),
            Numeral::Float(f) if f == 18446744073709551615.0
        ));
        assert!(Numeral::parse_lua("10", true).unwrap().is_int());
    }

    #[test]
    fn test_invalid() {
        assert!("0x".parse::<Numeral>().is_err());
        assert!("abc".parse::<Numeral>().is_err());
    }
}
