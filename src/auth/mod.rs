pub mod extractors;
pub mod middleware;
pub mod password;
pub mod roles;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Gender;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use roles::{require_benefactor, require_charity};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Username: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for a new user registration request.
///
/// Carries the full profile field set; the benefactor/charity role is chosen
/// later through the profile endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 200))]
    pub address: String,
    pub gender: Option<Gender>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i16>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Response after successful authentication (login or registration).
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT for session authentication.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_register_request() -> RegisterRequest {
        RegisterRequest {
            username: "test_user-123".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: "09123456789".to_string(),
            address: "12 Example Street".to_string(),
            gender: Some(Gender::M),
            age: Some(30),
            description: None,
        }
    }

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        assert!(valid_register_request().validate().is_ok());

        let mut bad_username = valid_register_request();
        bad_username.username = "test user!".to_string();
        assert!(bad_username.validate().is_err());

        let mut short_username = valid_register_request();
        short_username.username = "tu".to_string();
        assert!(short_username.validate().is_err());

        let mut bad_email = valid_register_request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut bad_age = valid_register_request();
        bad_age.age = Some(400);
        assert!(bad_age.validate().is_err());

        let mut empty_first_name = valid_register_request();
        empty_first_name.first_name = "".to_string();
        assert!(empty_first_name.validate().is_err());
    }
}
