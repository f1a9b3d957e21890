use super::validation::validate_password_not_numeric;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[validate(custom(function = "validate_password_not_numeric"))]
    #[validate(must_match(other = "password2", message = "Passwords do not match"))]
    pub password: String,

    pub password2: String,

    #[validate(length(min = 1, max = 150, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, message = "Last name is required"))]
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(password: &str, password2: &str) -> RegisterRequest {
        RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: password.into(),
            password2: password2.into(),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
        }
    }

    #[test]
    fn mismatched_passwords_flag_password_field() {
        let errors = register("wonderland1", "wonderland2").validate().unwrap_err();
        let fields = errors.field_errors();
        let password = fields.get("password").expect("password errors");
        assert!(
            password
                .iter()
                .any(|e| e.message.as_deref() == Some("Passwords do not match"))
        );
    }

    #[test]
    fn matching_passwords_validate() {
        assert!(register("wonderland1", "wonderland1").validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let errors = register("short", "short").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
