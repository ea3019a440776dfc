pub mod profile;
pub mod task;
pub mod user;

pub use profile::{Benefactor, BenefactorInput, Charity, CharityInput};
pub use task::{Task, TaskInput, TaskQuery, TaskResponseAction, TaskResponseInput, TaskState};
pub use user::{Gender, User, UserRole};
