use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    pub refresh_token_id: i32,
    pub user_id: i32,
    pub token: String,
    pub expired_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}
