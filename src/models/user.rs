use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Gender marker used on user profiles and task limits.
/// Corresponds to the `gender` SQL enum ('M' / 'F').
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    M,
    F,
}

/// Role a user takes on once they create a profile.
/// Corresponds to the `user_role` SQL enum.
///
/// A freshly registered user has no role; creating a benefactor or charity
/// profile claims the matching role exactly once.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Benefactor,
    Charity,
}

/// A registered user as stored in the database and returned by the API.
/// The password hash is intentionally not part of this struct.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub gender: Option<Gender>,
    pub age: Option<i16>,
    pub description: Option<String>,
    pub role: Option<UserRole>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_wire_format() {
        assert_eq!(serde_json::to_string(&Gender::M).unwrap(), "\"M\"");
        assert_eq!(serde_json::to_string(&Gender::F).unwrap(), "\"F\"");
        assert_eq!(
            serde_json::from_str::<Gender>("\"F\"").unwrap(),
            Gender::F
        );
        assert!(serde_json::from_str::<Gender>("\"X\"").is_err());
    }

    #[test]
    fn test_user_role_wire_format() {
        assert_eq!(
            serde_json::to_string(&UserRole::Benefactor).unwrap(),
            "\"benefactor\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"charity\"").unwrap(),
            UserRole::Charity
        );
    }
}
