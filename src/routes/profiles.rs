//! Profile registration endpoints.
//!
//! A user picks a role exactly once by creating either a benefactor or a
//! charity profile. The role flip and the profile insert run in one
//! transaction; the conditional `role IS NULL` update is what rejects a
//! second registration of either kind.

use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Benefactor, BenefactorInput, Charity, CharityInput, UserRole},
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Creates a benefactor profile for the authenticated user.
///
/// ## Responses:
/// - `201 Created`: the new `Benefactor` profile.
/// - `400 Bad Request`: invalid input, or the caller already has a role.
/// - `401 Unauthorized`: missing or invalid token.
#[post("/benefactors")]
pub async fn create_benefactor(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    profile_data: web::Json<BenefactorInput>,
) -> Result<impl Responder, AppError> {
    profile_data.validate()?;

    let mut tx = pool.begin().await?;

    let claimed = sqlx::query("UPDATE users SET role = $1 WHERE id = $2 AND role IS NULL")
        .bind(UserRole::Benefactor)
        .bind(user.0)
        .execute(&mut *tx)
        .await?;

    if claimed.rows_affected() == 0 {
        return Err(AppError::BadRequest(
            "User already has a registered profile".into(),
        ));
    }

    let profile = sqlx::query_as::<_, Benefactor>(
        "INSERT INTO benefactors (user_id, experience, free_time_per_week) \
         VALUES ($1, $2, $3) \
         RETURNING id, user_id, experience, free_time_per_week, created_at",
    )
    .bind(user.0)
    .bind(profile_data.experience)
    .bind(profile_data.free_time_per_week)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(HttpResponse::Created().json(profile))
}

/// Creates a charity profile for the authenticated user.
///
/// ## Responses:
/// - `201 Created`: the new `Charity` profile.
/// - `400 Bad Request`: invalid input, or the caller already has a role.
/// - `401 Unauthorized`: missing or invalid token.
#[post("/charities")]
pub async fn create_charity(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    profile_data: web::Json<CharityInput>,
) -> Result<impl Responder, AppError> {
    profile_data.validate()?;

    let mut tx = pool.begin().await?;

    let claimed = sqlx::query("UPDATE users SET role = $1 WHERE id = $2 AND role IS NULL")
        .bind(UserRole::Charity)
        .bind(user.0)
        .execute(&mut *tx)
        .await?;

    if claimed.rows_affected() == 0 {
        return Err(AppError::BadRequest(
            "User already has a registered profile".into(),
        ));
    }

    let profile = sqlx::query_as::<_, Charity>(
        "INSERT INTO charities (user_id, name, reg_number) \
         VALUES ($1, $2, $3) \
         RETURNING id, user_id, name, reg_number, created_at",
    )
    .bind(user.0)
    .bind(&profile_data.name)
    .bind(&profile_data.reg_number)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(HttpResponse::Created().json(profile))
}
