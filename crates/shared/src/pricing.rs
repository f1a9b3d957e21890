//! Money arithmetic for products, carts and orders.
//!
//! Amounts are `Decimal` with two fractional digits. Rounding follows
//! `Decimal::round_dp`, which rounds half to even.

use rust_decimal::Decimal;

/// Price after applying an optional percentage discount.
pub fn discounted_price(price: Decimal, discount_percent: Option<Decimal>) -> Decimal {
    match discount_percent {
        Some(discount) => {
            (price * (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED).round_dp(2)
        }
        None => price,
    }
}

pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of `quantity * unit_price` over the stored order lines.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(unit_price, quantity)| line_total(unit_price, quantity))
        .sum()
}

/// Sum of `quantity * price` over the current cart lines.
pub fn cart_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    order_total(lines)
}

/// Unit price frozen onto a new order line.
pub fn snapshot_unit_price(explicit: Option<Decimal>, current_price: Decimal) -> Decimal {
    explicit.unwrap_or(current_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("10.00", None, "10.00")]
    #[case("10.00", Some("15"), "8.50")]
    #[case("19.99", Some("10"), "17.99")]
    #[case("0.25", Some("50"), "0.12")]
    #[case("42.00", Some("0"), "42.00")]
    #[case("42.00", Some("100"), "0")]
    fn discounted_price_applies_percentage(
        #[case] price: &str,
        #[case] discount: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(discounted_price(dec(price), discount.map(dec)), dec(expected));
    }

    #[test]
    fn order_total_sums_stored_unit_prices() {
        let lines = vec![(dec("10.00"), 2), (dec("3.50"), 3)];
        assert_eq!(order_total(lines), dec("30.50"));
    }

    #[test]
    fn order_total_of_no_lines_is_zero() {
        assert_eq!(order_total(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn frozen_price_survives_product_price_change() {
        let mut product_price = dec("10.00");
        let frozen = snapshot_unit_price(None, product_price);
        let before = order_total(vec![(frozen, 2)]);

        product_price = dec("99.00");
        let after = order_total(vec![(frozen, 2)]);

        assert_eq!(before, after);
        assert_ne!(frozen, product_price);
    }

    #[test]
    fn explicit_unit_price_wins_over_current_price() {
        assert_eq!(
            snapshot_unit_price(Some(dec("7.00")), dec("10.00")),
            dec("7.00")
        );
    }

    #[test]
    fn cart_total_multiplies_price_by_quantity() {
        assert_eq!(cart_total(vec![(dec("2.50"), 4)]), dec("10.00"));
    }
}
