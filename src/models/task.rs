use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::Gender;

/// Lifecycle state of a task.
/// Corresponds to the `task_state` SQL enum.
///
/// Transitions: `Pending` → `Waiting` (benefactor requests) → `Assigned`
/// (charity accepts) → `Done` (charity resolves); a rejection returns the
/// task from `Waiting` to `Pending`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Open for benefactor requests.
    Pending,
    /// A benefactor has requested the task; awaiting the charity's decision.
    Waiting,
    /// The charity accepted the request; the benefactor is working on it.
    Assigned,
    /// The charity marked the task resolved.
    Done,
}

/// Input structure for creating a task. Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description. Maximum length of 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional scheduled date for the task.
    pub date: Option<DateTime<Utc>>,

    /// Restrict the task to benefactors of one gender.
    pub gender_limit: Option<Gender>,

    /// Minimum benefactor age, inclusive.
    #[validate(range(min = 0, max = 150))]
    pub age_limit_from: Option<i16>,

    /// Maximum benefactor age, inclusive.
    #[validate(range(min = 0, max = 150))]
    pub age_limit_to: Option<i16>,
}

/// A task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub gender_limit: Option<Gender>,
    pub age_limit_from: Option<i16>,
    pub age_limit_to: Option<i16>,
    /// Current lifecycle state.
    pub state: TaskState,
    /// The charity that posted the task.
    pub charity_id: i32,
    /// The benefactor currently attached to the task. Set exactly while the
    /// state is `Waiting` or `Assigned`.
    pub assigned_benefactor: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters accepted by the task listing endpoint.
///
/// `title` and `charity` narrow the listing (substring match); `gender` and
/// `age` drop tasks the caller cannot take (`gender_limit` equal to the value,
/// or `age_limit_from` at or above the value).
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    pub title: Option<String>,
    pub charity: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i16>,
}

/// Body of the charity's decision on a requested task.
#[derive(Debug, Deserialize)]
pub struct TaskResponseInput {
    pub response: Option<String>,
}

/// A charity's decision on a requested task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResponseAction {
    /// "A": keep the benefactor and move the task to `Assigned`.
    Accepted,
    /// "R": release the benefactor and return the task to `Pending`.
    Rejected,
}

impl TaskResponseAction {
    /// Parses the wire value. Anything other than "A" or "R" is invalid.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("A") => Some(TaskResponseAction::Accepted),
            Some("R") => Some(TaskResponseAction::Rejected),
            _ => None,
        }
    }
}

impl Task {
    /// Creates a new `Task` from `TaskInput` under the given charity.
    /// The task starts `Pending` with no benefactor attached.
    pub fn new(input: TaskInput, charity_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            date: input.date,
            gender_limit: input.gender_limit,
            age_limit_from: input.age_limit_from,
            age_limit_to: input.age_limit_to,
            state: TaskState::Pending,
            charity_id,
            assigned_benefactor: None,
            created_at: now,
            updated_at: now,
        }
    }
}
