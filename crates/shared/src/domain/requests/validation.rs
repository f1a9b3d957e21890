use rust_decimal::{Decimal, RoundingStrategy};
use std::borrow::Cow;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Prices are stored as `NUMERIC(10,2)`: positive and below 10^8 once rounded to cents.
pub fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(invalid("price", "Price must be greater than 0"));
    }
    let cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if cents >= Decimal::new(100_000_000, 0) {
        return Err(invalid("price", "Price must be less than 100000000"));
    }
    Ok(())
}

pub fn validate_discount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        return Err(invalid(
            "discount_percent",
            "Discount must be between 0 and 100",
        ));
    }
    Ok(())
}

pub fn validate_password_not_numeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("password_numeric", "This password is entirely numeric."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("0", false)]
    #[case("-1", false)]
    #[case("0.01", true)]
    #[case("99999999.99", true)]
    #[case("100000000", false)]
    #[case("99999999.995", false)]
    #[case("1000000000000", false)]
    fn price_must_fit_storage(#[case] price: &str, #[case] ok: bool) {
        let price = Decimal::from_str(price).unwrap();
        assert_eq!(validate_price(&price).is_ok(), ok);
    }

    #[rstest]
    #[case("0", true)]
    #[case("100", true)]
    #[case("100.01", false)]
    #[case("-0.5", false)]
    fn discount_is_bounded(#[case] discount: &str, #[case] ok: bool) {
        let discount = Decimal::from_str(discount).unwrap();
        assert_eq!(validate_discount(&discount).is_ok(), ok);
    }

    #[test]
    fn numeric_passwords_are_rejected() {
        assert!(validate_password_not_numeric("12345678").is_err());
        assert!(validate_password_not_numeric("1234abcd").is_ok());
    }
}
