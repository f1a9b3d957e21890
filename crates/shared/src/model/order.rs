use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub customer_id: i32,
    pub payment_status: String,
    pub placed_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Complete,
    Failed,
}

impl PaymentStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "P",
            PaymentStatus::Complete => "C",
            PaymentStatus::Failed => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(PaymentStatus::Pending),
            "C" => Some(PaymentStatus::Complete),
            "F" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl Order {
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_code(&self.payment_status).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_status_codes_round_trip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Complete,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::from_code(status.as_code()), Some(status));
        }
        assert_eq!(PaymentStatus::from_code("X"), None);
    }

    #[test]
    fn payment_status_serializes_lowercase() {
        let json = serde_json::to_string(&PaymentStatus::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
    }
}
