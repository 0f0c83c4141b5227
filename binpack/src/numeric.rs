//! Integer alignment helpers and the decimal decomposition of reals.

/// Return `ceil(dividend / divisor)`.
///
/// __Panics__ if `divisor` is zero.
pub fn divide_ceil(dividend: i64, divisor: u64) -> i64 {
    let (dividend, divisor) = (i128::from(dividend), i128::from(divisor));
    let quotient = dividend.div_euclid(divisor);
    let result = if dividend.rem_euclid(divisor) == 0 { quotient } else { quotient + 1 };
    // |result| <= |dividend| for any divisor >= 1
    result as i64
}

/// Return `floor(dividend / divisor)`.
///
/// __Panics__ if `divisor` is zero.
pub fn divide_floor(dividend: i64, divisor: u64) -> i64 {
    i128::from(dividend).div_euclid(i128::from(divisor)) as i64
}

/// Return `true` if `value` is an exact multiple of `multiplier`.
pub fn is_multiple(value: i64, multiplier: u64) -> bool {
    i128::from(value).rem_euclid(i128::from(multiplier)) == 0
}

/// Return the absolute value of a plan `multiplier` or `None` if it is zero.
#[inline]
pub fn absolute_multiplier(multiplier: i64) -> Option<u64> {
    match multiplier.unsigned_abs() {
        0 => None,
        m => Some(m)
    }
}

/// The largest value representable with `bits` bits.
pub const fn uint_max(bits: u32) -> u64 {
    (2u64 << (bits - 1)) - 1
}

/// Return `true` if `value` fits in a single byte.
#[inline]
pub const fn is_byte(value: u64) -> bool {
    value <= u8::MAX as u64
}

/// Return the largest `exponent` such that `base^exponent <= value`, clamped
/// to `exponent_start..=exponent_end`.
pub fn closest_smallest_exponent(value: u64, base: u64, exponent_start: u8, exponent_end: u8) -> u8 {
    debug_assert!(exponent_start <= exponent_end);
    let mut power = base;
    for exponent in 1..exponent_end {
        match power.checked_mul(base) {
            Some(next) if next <= value => power = next,
            _ if exponent >= exponent_start => return exponent,
            Some(next) => power = next,
            None => return exponent_start
        }
    }
    exponent_end
}

/// Decompose a finite `value` into `(mantissa, point)` so that
/// `value == mantissa / 10^point`, where `mantissa` is the shortest decimal
/// significand that round-trips back to `value`.
///
/// Return `None` for non-finite values and when the significand does not fit
/// in an `i64`.
pub fn real_digits(value: f64) -> Option<(i64, u64)> {
    if !value.is_finite() {
        return None
    }
    let mut buffer = ryu_js::Buffer::new();
    let printed = buffer.format_finite(value);
    let (negative, printed) = match printed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, printed)
    };
    let (significand, exponent) = match printed.split_once('e') {
        Some((significand, exponent)) => (significand, exponent.parse::<i64>().ok()?),
        None => (printed, 0)
    };
    let (integral, fraction) = significand.split_once('.').unwrap_or((significand, ""));

    let mut mantissa = 0u64;
    for digit in integral.bytes().chain(fraction.bytes()) {
        mantissa = mantissa.checked_mul(10)?
                   .checked_add(u64::from(digit.checked_sub(b'0')?))?;
    }
    let mut point = fraction.len() as i64 - exponent;
    while point < 0 {
        mantissa = mantissa.checked_mul(10)?;
        point += 1;
    }
    let mantissa = i64::try_from(mantissa).ok()?;
    Some((if negative { -mantissa } else { mantissa }, point as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_ceil() {
        assert_eq!(divide_ceil(10, 5), 2);
        assert_eq!(divide_ceil(11, 5), 3);
        assert_eq!(divide_ceil(1, 5), 1);
        assert_eq!(divide_ceil(0, 5), 0);
        assert_eq!(divide_ceil(-1, 5), 0);
        assert_eq!(divide_ceil(-5, 5), -1);
        assert_eq!(divide_ceil(-6, 5), -1);
        assert_eq!(divide_ceil(-5, 1), -5);
        assert_eq!(divide_ceil(i64::MAX, 2), 1 << 62);
        assert_eq!(divide_ceil(i64::MIN, 1), i64::MIN);
        assert_eq!(divide_ceil(i64::MAX, u64::MAX), 1);
        assert_eq!(divide_ceil(i64::MIN, u64::MAX), 0);
    }

    #[test]
    fn test_divide_floor() {
        assert_eq!(divide_floor(10, 5), 2);
        assert_eq!(divide_floor(14, 5), 2);
        assert_eq!(divide_floor(-1, 5), -1);
        assert_eq!(divide_floor(-5, 5), -1);
        assert_eq!(divide_floor(-6, 5), -2);
        assert_eq!(divide_floor(16, 5), 3);
        assert_eq!(divide_floor(i64::MIN, 2), i64::MIN / 2);
        assert_eq!(divide_floor(i64::MIN, u64::MAX), -1);
    }

    #[test]
    fn test_is_multiple() {
        assert!(is_multiple(10, 5));
        assert!(is_multiple(-10, 5));
        assert!(is_multiple(0, 7));
        assert!(!is_multiple(11, 5));
        assert!(!is_multiple(-11, 5));
        assert!(is_multiple(i64::MIN, 1));
    }

    #[test]
    fn test_absolute_multiplier() {
        assert_eq!(absolute_multiplier(5), Some(5));
        assert_eq!(absolute_multiplier(-5), Some(5));
        assert_eq!(absolute_multiplier(i64::MIN), Some(1 << 63));
        assert_eq!(absolute_multiplier(0), None);
    }

    #[test]
    fn test_uint_max() {
        assert_eq!(uint_max(5), 31);
        assert_eq!(uint_max(8), 255);
        assert!(is_byte(255));
        assert!(!is_byte(256));
    }

    #[test]
    fn test_closest_smallest_exponent() {
        assert_eq!(closest_smallest_exponent(128, 2, 7, 10), 7);
        assert_eq!(closest_smallest_exponent(200, 2, 7, 10), 7);
        assert_eq!(closest_smallest_exponent(256, 2, 7, 10), 8);
        assert_eq!(closest_smallest_exponent(1023, 2, 7, 10), 9);
        assert_eq!(closest_smallest_exponent(1024, 2, 7, 10), 10);
        assert_eq!(closest_smallest_exponent(5000, 2, 7, 10), 10);
        assert_eq!(closest_smallest_exponent(u64::MAX, 2, 7, 10), 10);
    }

    #[test]
    fn test_real_digits() {
        assert_eq!(real_digits(3.14), Some((314, 2)));
        assert_eq!(real_digits(-3.14), Some((-314, 2)));
        assert_eq!(real_digits(123.456), Some((123456, 3)));
        assert_eq!(real_digits(0.0001), Some((1, 4)));
        assert_eq!(real_digits(0.000123), Some((123, 6)));
        assert_eq!(real_digits(1.5e-7), Some((15, 8)));
        assert_eq!(real_digits(5.0), Some((5, 0)));
        assert_eq!(real_digits(100.0), Some((100, 0)));
        assert_eq!(real_digits(1e-7), Some((1, 7)));
        assert_eq!(real_digits(1e21), None);
        assert_eq!(real_digits(1.5e18), Some((1_500_000_000_000_000_000, 0)));
        assert_eq!(real_digits(0.0), Some((0, 0)));
        assert_eq!(real_digits(-0.0), Some((0, 0)));
        assert_eq!(real_digits(f64::NAN), None);
        assert_eq!(real_digits(f64::INFINITY), None);
    }
}
