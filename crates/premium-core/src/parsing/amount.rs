use crate::error::PremiumError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Fraction digits carried by every amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Parse a monetary token from the report into a signed amount.
///
/// Handles formats like:
/// - "21,149.00" -> 21149.00
/// - ".00" -> 0.00
/// - "10000" -> 10000.00
/// - "1,500.50CR" or "1,500.50 CR" -> -1500.50
/// - "0.00 CR" -> 0.00 (never negative zero)
/// - "-1500.50" -> -1500.50 (canonical output form)
pub fn parse_amount(raw: &str) -> Result<Decimal, PremiumError> {
    let malformed = || PremiumError::MalformedAmount {
        raw: raw.to_string(),
    };

    let (body, marked_credit) = strip_credit_marker(raw.trim());
    let (body, credit) = match body.strip_prefix('-') {
        Some(_) if marked_credit => return Err(malformed()),
        Some(rest) => (rest, true),
        None => (body, marked_credit),
    };
    let plain = plain_decimal(body).ok_or_else(malformed)?;
    let mut value = Decimal::from_str(&plain).map_err(|_| malformed())?;
    value.rescale(AMOUNT_SCALE);
    // Too many integer digits to keep the cents.
    if value.scale() != AMOUNT_SCALE {
        return Err(malformed());
    }

    if credit && !value.is_zero() {
        value.set_sign_negative(true);
    }
    Ok(value)
}

/// Canonical text for an amount: two fraction digits, no separators, "-" for credits.
pub fn format_amount(value: Decimal) -> String {
    let mut v =
        value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if v.is_zero() {
        v.set_sign_positive(true);
    }
    v.rescale(AMOUNT_SCALE);
    v.to_string()
}

/// Like [`format_amount`], but zero renders as ".00" the way the report prints it.
pub fn format_amount_compact(value: Decimal) -> String {
    let s = format_amount(value);
    if s == "0.00" {
        ".00".to_string()
    } else {
        s
    }
}

/// Split off a trailing credit marker, with or without a separating space.
fn strip_credit_marker(s: &str) -> (&str, bool) {
    let split = s.len().checked_sub(2).and_then(|i| s.get(i..).map(|tail| (i, tail)));
    match split {
        Some((i, tail)) if tail.eq_ignore_ascii_case("cr") => (s[..i].trim_end(), true),
        _ => (s, false),
    }
}

/// Validate an unsigned amount and return it without thousands separators.
///
/// Commas are only accepted between integer digits. The fraction, when
/// present, has one or two digits.
fn plain_decimal(s: &str) -> Option<String> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };

    if int_part.starts_with(',') || int_part.ends_with(',') || int_part.contains(",,") {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }
    let int_digits: String = int_part.chars().filter(|c| *c != ',').collect();

    match frac_part {
        None if int_digits.is_empty() => None,
        None => Some(int_digits),
        Some(frac) => {
            if frac.is_empty() || frac.len() > AMOUNT_SCALE as usize {
                return None;
            }
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let int_digits = if int_digits.is_empty() {
                "0".to_string()
            } else {
                int_digits
            };
            Some(format!("{int_digits}.{frac}"))
        }
    }
}
