use super::currency::CurrencyCode;
use super::money::round_cents;
use rust_decimal::{Decimal, RoundingStrategy};

/// The currency rendered without minor units.
pub const INTEGER_STYLE_CURRENCY: &str = "JPY";

/// Renders an amount for display.
///
/// Yen is shown as `¥12,345`; every other currency as `USD 12.50`.
pub fn format_amount(amount: Decimal, currency: &CurrencyCode) -> String {
    if currency.as_str() == INTEGER_STYLE_CURRENCY {
        let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("¥{}", group_thousands(whole))
    } else {
        format!("{} {:.2}", currency, round_cents(amount))
    }
}

fn group_thousands(whole: Decimal) -> String {
    let digits = whole.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole.is_sign_negative() && !whole.is_zero() {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_yen_is_grouped_without_decimals() {
        let jpy = CurrencyCode::from("JPY");
        assert_eq!(format_amount(dec!(0), &jpy), "¥0");
        assert_eq!(format_amount(dec!(999), &jpy), "¥999");
        assert_eq!(format_amount(dec!(1000), &jpy), "¥1,000");
        assert_eq!(format_amount(dec!(1234567.5), &jpy), "¥1,234,568");
        assert_eq!(format_amount(dec!(-12345), &jpy), "¥-12,345");
    }

    #[test]
    fn test_other_currencies_use_two_decimals() {
        let usd = CurrencyCode::from("USD");
        assert_eq!(format_amount(dec!(12.5), &usd), "USD 12.50");
        assert_eq!(format_amount(dec!(100), &usd), "USD 100.00");
        assert_eq!(format_amount(dec!(0.125), &usd), "USD 0.13");
        assert_eq!(format_amount(dec!(1234.5), &"EUR".into()), "EUR 1234.50");
    }
}
