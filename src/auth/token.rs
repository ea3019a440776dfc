use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: i32,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Generates a JWT for a given user id, expiring in 24 hours.
///
/// Requires the `JWT_SECRET` environment variable for signing.
pub fn generate_token(user_id: i32) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// Returns `AppError::Unauthorized` if the token is malformed, its signature
/// is invalid, or it has expired.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref JWT_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    }

    // Serializes JWT_SECRET mutation across tests and restores it afterwards.
    fn run_with_temp_jwt_secret<F>(secret_value: &str, test_logic: F)
    where
        F: FnOnce(),
    {
        let _guard = JWT_ENV_LOCK.lock().unwrap();

        let original = std::env::var("JWT_SECRET").ok();
        std::env::set_var("JWT_SECRET", secret_value);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(test_logic));

        if let Some(original) = original {
            std::env::set_var("JWT_SECRET", original);
        } else {
            std::env::remove_var("JWT_SECRET");
        }

        if let Err(panic_payload) = result {
            std::panic::resume_unwind(panic_payload);
        }
    }

    #[test]
    fn test_token_round_trip() {
        run_with_temp_jwt_secret("round_trip_secret", || {
            let token = generate_token(42).unwrap();
            let claims = verify_token(&token).unwrap();
            assert_eq!(claims.sub, 42);
        });
    }

    #[test]
    fn test_expired_token_is_rejected() {
        run_with_temp_jwt_secret("expiration_secret", || {
            let expiration = chrono::Utc::now()
                .checked_sub_signed(chrono::Duration::hours(2))
                .expect("valid timestamp")
                .timestamp() as usize;

            let expired = encode(
                &Header::default(),
                &Claims {
                    sub: 1,
                    exp: expiration,
                },
                &EncodingKey::from_secret("expiration_secret".as_bytes()),
            )
            .unwrap();

            match verify_token(&expired) {
                Err(AppError::Unauthorized(msg)) => {
                    assert!(msg.contains("ExpiredSignature"), "got: {}", msg);
                }
                other => panic!("expected Unauthorized, got {:?}", other.map(|c| c.sub)),
            }
        });
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        run_with_temp_jwt_secret("the_real_secret", || {
            let foreign = encode(
                &Header::default(),
                &Claims {
                    sub: 1,
                    exp: chrono::Utc::now().timestamp() as usize + 3600,
                },
                &EncodingKey::from_secret("some_other_secret".as_bytes()),
            )
            .unwrap();

            match verify_token(&foreign) {
                Err(AppError::Unauthorized(msg)) => {
                    assert!(msg.contains("InvalidSignature"), "got: {}", msg);
                }
                other => panic!("expected Unauthorized, got {:?}", other.map(|c| c.sub)),
            }
        });
    }
}
