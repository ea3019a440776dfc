//! Role guards for benefactor-only and charity-only endpoints.
//!
//! Each guard resolves the caller's profile row or fails with 403, the same
//! gate the profile-creation endpoints establish when they claim a role.

use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{Benefactor, Charity};

/// Resolves the caller's benefactor profile, or fails with `Forbidden`.
pub async fn require_benefactor(pool: &PgPool, user_id: i32) -> Result<Benefactor, AppError> {
    let benefactor = sqlx::query_as::<_, Benefactor>(
        "SELECT id, user_id, experience, free_time_per_week, created_at \
         FROM benefactors WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    benefactor.ok_or_else(|| AppError::Forbidden("Benefactor profile required".into()))
}

/// Resolves the caller's charity profile, or fails with `Forbidden`.
pub async fn require_charity(pool: &PgPool, user_id: i32) -> Result<Charity, AppError> {
    let charity = sqlx::query_as::<_, Charity>(
        "SELECT id, user_id, name, reg_number, created_at \
         FROM charities WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    charity.ok_or_else(|| AppError::Forbidden("Charity profile required".into()))
}
