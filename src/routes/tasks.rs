use crate::{
    auth::{require_benefactor, require_charity, AuthenticatedUser},
    error::AppError,
    models::{Task, TaskInput, TaskQuery, TaskResponseAction, TaskResponseInput, TaskState},
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const TASK_COLUMNS: &str = "t.id, t.title, t.description, t.date, t.gender_limit, \
     t.age_limit_from, t.age_limit_to, t.state, t.charity_id, t.assigned_benefactor, \
     t.created_at, t.updated_at";

/// Retrieves the tasks visible to the authenticated caller.
///
/// Visibility is role-driven: every `pending` task, plus tasks owned by the
/// caller's charity, plus tasks assigned to the caller's benefactor.
///
/// ## Query Parameters:
/// - `title` (optional): substring match on the task title.
/// - `charity` (optional): substring match on the posting charity's name.
/// - `gender` (optional): drops tasks whose `gender_limit` equals the value.
/// - `age` (optional): drops tasks whose `age_limit_from` is at or above the value.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, newest first.
/// - `401 Unauthorized`: missing or invalid token.
#[get("")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    query_params: web::Query<TaskQuery>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    // Base visibility clause; filter and exclude conditions are appended
    // with positional parameters in bind order.
    let mut sql = format!(
        "SELECT {TASK_COLUMNS} FROM tasks t \
         JOIN charities c ON c.id = t.charity_id \
         LEFT JOIN benefactors b ON b.id = t.assigned_benefactor \
         WHERE (t.state = 'pending' OR c.user_id = $1 OR b.user_id = $1)"
    );
    let mut param_count = 2;

    if query_params.title.is_some() {
        sql.push_str(&format!(" AND t.title ILIKE ${}", param_count));
        param_count += 1;
    }
    if query_params.charity.is_some() {
        sql.push_str(&format!(" AND c.name ILIKE ${}", param_count));
        param_count += 1;
    }
    if query_params.gender.is_some() {
        // IS DISTINCT FROM keeps unrestricted tasks (NULL gender_limit).
        sql.push_str(&format!(
            " AND t.gender_limit IS DISTINCT FROM ${}",
            param_count
        ));
        param_count += 1;
    }
    if query_params.age.is_some() {
        sql.push_str(&format!(
            " AND (t.age_limit_from IS NULL OR t.age_limit_from < ${})",
            param_count
        ));
    }

    sql.push_str(" ORDER BY t.created_at DESC");

    let mut query_builder = sqlx::query_as::<_, Task>(&sql).bind(user.0);

    if let Some(title) = &query_params.title {
        query_builder = query_builder.bind(format!("%{}%", title));
    }
    if let Some(charity) = &query_params.charity {
        query_builder = query_builder.bind(format!("%{}%", charity));
    }
    if let Some(gender) = query_params.gender {
        query_builder = query_builder.bind(gender);
    }
    if let Some(age) = query_params.age {
        query_builder = query_builder.bind(age);
    }

    let tasks = query_builder.fetch_all(&**pool).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task under the caller's charity.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`: `title` (required), `description`,
/// `date`, `gender_limit`, `age_limit_from`, `age_limit_to`.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, starting `pending`.
/// - `400 Bad Request`: input validation failed.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: caller has no charity profile.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let charity = require_charity(&pool, user.0).await?;
    let task = Task::new(task_data.into_inner(), charity.id);

    let result = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks \
            (id, title, description, date, gender_limit, age_limit_from, age_limit_to, state, charity_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {}",
        TASK_COLUMNS.replace("t.", "")
    ))
    .bind(task.id)
    .bind(task.title)
    .bind(task.description)
    .bind(task.date)
    .bind(task.gender_limit)
    .bind(task.age_limit_from)
    .bind(task.age_limit_to)
    .bind(task.state)
    .bind(task.charity_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Picks the right 404 after a transition update touched zero rows.
///
/// `owner` is the caller's charity id for owner-scoped transitions; a task
/// owned by someone else reports plain "Task not found." rather than leaking
/// its state.
async fn transition_failure(
    pool: &PgPool,
    task_id: Uuid,
    owner: Option<i32>,
    detail: &str,
) -> Result<AppError, AppError> {
    let row: Option<(i32,)> = sqlx::query_as("SELECT charity_id FROM tasks WHERE id = $1")
        .bind(task_id)
        .fetch_optional(pool)
        .await?;

    Ok(match row {
        None => AppError::NotFound("Task not found.".into()),
        Some((charity_id,)) if owner.is_some_and(|owner_id| owner_id != charity_id) => {
            AppError::NotFound("Task not found.".into())
        }
        Some(_) => AppError::NotFound(detail.into()),
    })
}

/// Benefactor requests a pending task.
///
/// Transition `pending` → `waiting`, attaching the caller's benefactor. The
/// whole transition is one conditional UPDATE, so two racing requests cannot
/// both claim the task.
///
/// ## Responses:
/// - `200 OK`: `{"detail": "Request sent."}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: caller has no benefactor profile.
/// - `404 Not Found`: unknown task, or "This task is not pending."
#[get("/{id}/request")]
pub async fn request_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let benefactor = require_benefactor(&pool, user.0).await?;
    let task_uuid = task_id.into_inner();

    let updated = sqlx::query(
        "UPDATE tasks \
         SET state = $1, assigned_benefactor = $2, updated_at = NOW() \
         WHERE id = $3 AND state = $4",
    )
    .bind(TaskState::Waiting)
    .bind(benefactor.id)
    .bind(task_uuid)
    .bind(TaskState::Pending)
    .execute(&**pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(transition_failure(&pool, task_uuid, None, "This task is not pending.").await?);
    }

    Ok(HttpResponse::Ok().json(json!({ "detail": "Request sent." })))
}

/// Charity accepts or rejects a requested task.
///
/// Body: `{"response": "A"}` to accept (`waiting` → `assigned`, keeping the
/// benefactor) or `{"response": "R"}` to reject (`waiting` → `pending`,
/// releasing the benefactor). The task lookup comes first, then the response
/// value, then the state guard. Only the owning charity can respond.
///
/// ## Responses:
/// - `200 OK`: `{"detail": "Response sent."}`.
/// - `400 Bad Request`: response value outside `"A"` / `"R"`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: caller has no charity profile.
/// - `404 Not Found`: unknown or foreign task, or "This task is not waiting."
#[post("/{id}/response")]
pub async fn respond_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    response_data: web::Json<TaskResponseInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let charity = require_charity(&pool, user.0).await?;
    let task_uuid = task_id.into_inner();

    // A missing or foreign task 404s before the response value is inspected.
    let owner: Option<(i32,)> = sqlx::query_as("SELECT charity_id FROM tasks WHERE id = $1")
        .bind(task_uuid)
        .fetch_optional(&**pool)
        .await?;
    match owner {
        Some((charity_id,)) if charity_id == charity.id => {}
        _ => return Err(AppError::NotFound("Task not found.".into())),
    }

    let action = TaskResponseAction::parse(response_data.response.as_deref()).ok_or_else(|| {
        AppError::BadRequest(r#"Required field ("A" for accepted / "R" for rejected)"#.into())
    })?;

    let updated = match action {
        TaskResponseAction::Accepted => {
            sqlx::query(
                "UPDATE tasks SET state = $1, updated_at = NOW() \
                 WHERE id = $2 AND state = $3 AND charity_id = $4",
            )
            .bind(TaskState::Assigned)
            .bind(task_uuid)
            .bind(TaskState::Waiting)
            .bind(charity.id)
            .execute(&**pool)
            .await?
        }
        TaskResponseAction::Rejected => {
            sqlx::query(
                "UPDATE tasks SET state = $1, assigned_benefactor = NULL, updated_at = NOW() \
                 WHERE id = $2 AND state = $3 AND charity_id = $4",
            )
            .bind(TaskState::Pending)
            .bind(task_uuid)
            .bind(TaskState::Waiting)
            .bind(charity.id)
            .execute(&**pool)
            .await?
        }
    };

    if updated.rows_affected() == 0 {
        return Err(transition_failure(
            &pool,
            task_uuid,
            Some(charity.id),
            "This task is not waiting.",
        )
        .await?);
    }

    Ok(HttpResponse::Ok().json(json!({ "detail": "Response sent." })))
}

/// Charity marks an assigned task as done.
///
/// Transition `assigned` → `done`; the benefactor stays attached for the
/// record. Only the owning charity can resolve the task.
///
/// ## Responses:
/// - `200 OK`: `{"detail": "Task has been done successfully."}`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `403 Forbidden`: caller has no charity profile.
/// - `404 Not Found`: unknown or foreign task, or "Task is not assigned yet."
#[post("/{id}/done")]
pub async fn done_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let charity = require_charity(&pool, user.0).await?;
    let task_uuid = task_id.into_inner();

    let updated = sqlx::query(
        "UPDATE tasks SET state = $1, updated_at = NOW() \
         WHERE id = $2 AND state = $3 AND charity_id = $4",
    )
    .bind(TaskState::Done)
    .bind(task_uuid)
    .bind(TaskState::Assigned)
    .bind(charity.id)
    .execute(&**pool)
    .await?;

    if updated.rows_affected() == 0 {
        return Err(transition_failure(
            &pool,
            task_uuid,
            Some(charity.id),
            "Task is not assigned yet.",
        )
        .await?);
    }

    Ok(HttpResponse::Ok().json(json!({ "detail": "Task has been done successfully." })))
}
