pub mod auth;
pub mod health;
pub mod profiles;
pub mod tasks;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(profiles::create_benefactor)
    .service(profiles::create_charity)
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::request_task)
            .service(tasks::respond_task)
            .service(tasks::done_task),
    );
}
