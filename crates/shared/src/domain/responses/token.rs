use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}
