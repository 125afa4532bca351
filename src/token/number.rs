//! Numeric literal scanning.
//!
//! Accepts the longest prefix that forms a floating-point literal, in
//! either decimal (`12`, `1.5`, `.5`, `3e10`, `2.E-3`) or hexadecimal
//! (`0x1f`, `0x3p+2`, `0x.8`) form. An exponent marker is only consumed
//! when at least one digit follows it, so `3e` scans as `3`.

/// Scans a literal at the start of `input`. Returns the value and the
/// number of bytes consumed, or `None` if no literal starts here.
pub(crate) fn scan_number(input: &[u8]) -> Option<(f64, usize)> {
    if let Some(hex) = scan_hex(input) {
        return Some(hex);
    }
    scan_decimal(input)
}

fn digits_while(input: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    input[from..].iter().take_while(|&&b| pred(b)).count()
}

/// Length of an exponent part (`e-12`, `P+3`) starting at `at`, or 0.
fn exponent_len(input: &[u8], at: usize, markers: [u8; 2]) -> usize {
    match input.get(at) {
        Some(b) if markers.contains(b) => {}
        _ => return 0,
    }
    let mut i = at + 1;
    if matches!(input.get(i), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let digits = digits_while(input, i, |b| b.is_ascii_digit());
    if digits == 0 {
        0
    } else {
        i + digits - at
    }
}

fn scan_decimal(input: &[u8]) -> Option<(f64, usize)> {
    let int_digits = digits_while(input, 0, |b| b.is_ascii_digit());
    let mut len = int_digits;
    let mut frac_digits = 0;
    if input.get(len) == Some(&b'.') {
        frac_digits = digits_while(input, len + 1, |b| b.is_ascii_digit());
        if int_digits > 0 || frac_digits > 0 {
            len += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    len += exponent_len(input, len, [b'e', b'E']);

    let text = std::str::from_utf8(&input[..len]).ok()?;
    let value = text.parse::<f64>().ok()?;
    Some((value, len))
}

/// Hex digits that fit in the 64-bit accumulator.
const HEX_SIGNIFICANT_DIGITS: u32 = 16;

/// Significant digits of a hex literal: `mantissa * 2^exponent`, with
/// `sticky` set when nonzero digits were dropped past the accumulator.
#[derive(Debug, Default)]
struct HexDigits {
    mantissa: u64,
    kept: u32,
    exponent: i64,
    sticky: bool,
}

impl HexDigits {
    fn push_integer(&mut self, digit: u8) {
        if self.kept < HEX_SIGNIFICANT_DIGITS {
            if self.mantissa != 0 || digit != 0 {
                self.mantissa = self.mantissa << 4 | u64::from(digit);
                self.kept += 1;
            }
        } else {
            self.exponent = self.exponent.saturating_add(4);
            self.sticky |= digit != 0;
        }
    }

    fn push_fraction(&mut self, digit: u8) {
        if self.mantissa == 0 && digit == 0 {
            self.exponent = self.exponent.saturating_sub(4);
        } else if self.kept < HEX_SIGNIFICANT_DIGITS {
            self.mantissa = self.mantissa << 4 | u64::from(digit);
            self.kept += 1;
            self.exponent = self.exponent.saturating_sub(4);
        } else {
            self.sticky |= digit != 0;
        }
    }

    /// Rounds to the nearest `f64`, ties to even, in a single step.
    fn to_f64(&self) -> f64 {
        if self.mantissa == 0 {
            return 0.0;
        }
        let shift = self.mantissa.leading_zeros();
        let mantissa = self.mantissa << shift;
        // value lies in [2^top, 2^(top + 1))
        let top = self
            .exponent
            .saturating_sub(i64::from(shift))
            .saturating_add(63);
        if top > 1023 {
            return f64::INFINITY;
        }

        // 53 bits for normal results, fewer once the result goes subnormal
        let bits = if top >= -1022 { 53 } else { top + 1075 };
        if bits < 0 {
            return 0.0;
        }
        let dropped = 64 - bits as u32;
        let (kept, rest, half) = if dropped >= 64 {
            (0, mantissa, 1u64 << 63)
        } else {
            (
                mantissa >> dropped,
                mantissa & ((1u64 << dropped) - 1),
                1u64 << (dropped - 1),
            )
        };
        let round_up = rest > half || (rest == half && (self.sticky || kept & 1 == 1));
        let kept = if round_up { kept + 1 } else { kept };

        // kept <= 2^53, so both factors and the product are exact until overflow
        kept as f64 * power_of_two(top + 1 - bits)
    }
}

/// `2^exponent` for exponents in the finite `f64` range, subnormals included.
fn power_of_two(exponent: i64) -> f64 {
    if exponent >= -1022 {
        f64::from_bits(((exponent + 1023) as u64) << 52)
    } else {
        f64::from_bits(1u64 << (exponent + 1074))
    }
}

fn scan_hex(input: &[u8]) -> Option<(f64, usize)> {
    if input.len() < 3 || input[0] != b'0' || !matches!(input[1], b'x' | b'X') {
        return None;
    }

    let mut digits = HexDigits::default();
    let mut i = 2;
    let int_digits = digits_while(input, i, |b| b.is_ascii_hexdigit());
    for &b in &input[i..i + int_digits] {
        digits.push_integer(hex_value(b));
    }
    i += int_digits;

    let mut frac_digits = 0;
    if input.get(i) == Some(&b'.') {
        frac_digits = digits_while(input, i + 1, |b| b.is_ascii_hexdigit());
        if int_digits > 0 || frac_digits > 0 {
            for &b in &input[i + 1..i + 1 + frac_digits] {
                digits.push_fraction(hex_value(b));
            }
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        // "0x" with nothing after it is just the literal 0
        return None;
    }

    let exp_len = exponent_len(input, i, [b'p', b'P']);
    if exp_len > 0 {
        let text = std::str::from_utf8(&input[i + 1..i + exp_len]).ok()?;
        // saturate absurd exponents instead of failing; the result is 0 or inf anyway
        let parsed = text.parse::<i64>().unwrap_or(if text.starts_with('-') {
            i64::MIN / 2
        } else {
            i64::MAX / 2
        });
        digits.exponent = digits.exponent.saturating_add(parsed);
        i += exp_len;
    }

    Some((digits.to_f64(), i))
}

fn hex_value(b: u8) -> u8 {
    char::from(b).to_digit(16).map_or(0, |d| d as u8)
}
