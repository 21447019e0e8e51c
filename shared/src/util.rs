use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC time as an RFC 3339 string
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Provisional order number shown before the order service assigns the real id.
///
/// Format: `NRO-` followed by the last six digits of the millisecond clock.
pub fn provisional_order_id(millis: i64) -> String {
    format!("NRO-{:06}", millis.rem_euclid(1_000_000))
}

/// Format an amount as Chilean pesos: no decimals, `.` as thousands separator.
///
/// ```
/// use shared::util::format_clp;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_clp(Decimal::from(129990)), "$129.990");
/// assert_eq!(format_clp(Decimal::from(0)), "$0");
/// ```
pub fn format_clp(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64().unwrap_or_default();
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisional_order_id() {
        assert_eq!(provisional_order_id(1_730_000_123_456), "NRO-123456");
        assert_eq!(provisional_order_id(1_730_000_000_042), "NRO-000042");
    }

    #[test]
    fn test_format_clp() {
        assert_eq!(format_clp(Decimal::from(1_234_567)), "$1.234.567");
        assert_eq!(format_clp(Decimal::from(999)), "$999");
        assert_eq!(format_clp(Decimal::new(1104915, 1)), "$110.492");
        assert_eq!(format_clp(Decimal::from(-5000)), "-$5.000");
    }
}
