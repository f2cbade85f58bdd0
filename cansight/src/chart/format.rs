//! Fixed-point number formatting for labels and tooltips.

/// Fraction digits in the exact decimal expansion of any finite `f64`.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Format `value` with `digits` fraction digits.
///
/// Rounds on the exact binary value with ties away from zero, so 45.125
/// prints as "45.13" while 1.005 (stored just below) prints as "1.00".
/// Negative zero prints without a sign. Non-finite values use `Display`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(digits))
        .map(|b| b - b'0')
        .collect();
    let mut integer_len = integer.len();

    if fraction.as_bytes().get(digits).is_some_and(|next| *next >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
            integer_len += 1;
        }
    }

    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (i, digit) in kept.iter().enumerate() {
        if i == integer_len {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ties_round_up() {
        assert_eq!(to_fixed(45.125, 2), "45.13");
        assert_eq!(to_fixed(301.25, 1), "301.3");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-45.125, 2), "-45.13");
    }

    #[test]
    fn test_inexact_values_round_on_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(350.7, 2), "350.70");
        assert_eq!(to_fixed(0.1 + 0.2, 1), "0.3");
    }

    #[test]
    fn test_carry_into_integer_part() {
        assert_eq!(to_fixed(9.995, 2), "9.99");
        assert_eq!(to_fixed(9.9999, 2), "10.00");
        assert_eq!(to_fixed(99.96, 1), "100.0");
    }

    #[test]
    fn test_signs() {
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(0.0, 1), "0.0");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-12.0, 1), "-12.0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "inf");
    }
}
