use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Customer row joined with the owning user's name and email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub customer_id: i32,
    pub user_id: i32,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub membership: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    #[default]
    Bronze,
    Silver,
    Gold,
}

impl Membership {
    pub fn as_code(&self) -> &'static str {
        match self {
            Membership::Bronze => "B",
            Membership::Silver => "S",
            Membership::Gold => "G",
        }
    }

    /// Unknown codes fall back to bronze, the column default.
    pub fn from_code(code: &str) -> Self {
        match code {
            "S" => Membership::Silver,
            "G" => Membership::Gold,
            _ => Membership::Bronze,
        }
    }
}
