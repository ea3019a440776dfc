use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A benefactor profile attached to a user.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Benefactor {
    pub id: i32,
    pub user_id: i32,
    /// Experience level: 0 beginner, 1 intermediate, 2 expert.
    pub experience: i16,
    /// Hours per week the benefactor can commit.
    pub free_time_per_week: i16,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a benefactor profile.
#[derive(Debug, Deserialize, Validate)]
pub struct BenefactorInput {
    #[validate(range(min = 0, max = 2))]
    pub experience: i16,
    #[validate(range(min = 0, max = 168))]
    pub free_time_per_week: i16,
}

/// A charity profile attached to a user.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Charity {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// Official registration number of the organization.
    pub reg_number: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a charity profile.
#[derive(Debug, Deserialize, Validate)]
pub struct CharityInput {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 10))]
    pub reg_number: String,
}
