//! Display formatting for book fields (Brazilian locale)

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format as Brazilian Real, e.g. `R$ 1.234,56` (non-breaking space after the symbol)
pub fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.2}", rounded.abs());
    let (units, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$\u{a0}{grouped},{cents}")
}

/// Format as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::new(0, 0)), "R$\u{a0}0,00");
        assert_eq!(format_price(Decimal::new(4990, 2)), "R$\u{a0}49,90");
        assert_eq!(format_price(Decimal::new(123456, 2)), "R$\u{a0}1.234,56");
        assert_eq!(format_price(Decimal::new(1234567891, 1)), "R$\u{a0}123.456.789,10");
        assert_eq!(format_price(Decimal::new(1005, 3)), "R$\u{a0}1,01");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2017, 11, 7).unwrap();
        assert_eq!(format_date(date), "07/11/2017");
    }
}
