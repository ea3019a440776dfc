use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use charitask::auth::AuthMiddleware;
use charitask::routes::{self, health};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;

fn register_payload(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "password": "Password123!",
        "first_name": "Integration",
        "last_name": "User",
        "phone": "09123456789",
        "address": "12 Example Street",
        "gender": "M",
        "age": 30,
        "description": "integration test account"
    })
}

async fn cleanup_user(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    cleanup_user(&pool, "integration@example.com").await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    // Register a new user
    let payload = register_payload("integration_user", "integration@example.com");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );
    let auth: charitask::auth::AuthResponse =
        serde_json::from_slice(&body_bytes).expect("registration response should parse");
    assert!(!auth.token.is_empty());

    // The created profile comes back alongside the token: no role yet, and
    // no password material
    let body: serde_json::Value =
        serde_json::from_slice(&body_bytes).expect("registration body should be JSON");
    assert_eq!(body["user"]["username"], "integration_user");
    assert_eq!(body["user"]["email"], "integration@example.com");
    assert!(body["user"]["role"].is_null());
    assert!(body["user"].get("password_hash").is_none());

    // Registering the same user again should fail
    let req_conflict = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    assert_eq!(
        resp_conflict.status(),
        actix_web::http::StatusCode::BAD_REQUEST,
        "Duplicate registration did not fail as expected"
    );

    // Login with the registered credentials
    let req_login = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({
            "email": "integration@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), actix_web::http::StatusCode::OK);
    let login_body = test::read_body(resp_login).await;
    let login: charitask::auth::AuthResponse =
        serde_json::from_slice(&login_body).expect("login response should parse");
    assert_eq!(login.user_id, auth.user_id);

    // Wrong password is rejected
    let req_bad = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({
            "email": "integration@example.com",
            "password": "WrongPassword1"
        }))
        .to_request();
    let resp_bad = test::call_service(&app, req_bad).await;
    assert_eq!(resp_bad.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    cleanup_user(&pool, "integration@example.com").await;
}

#[actix_rt::test]
async fn test_register_validation_errors() {
    dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return;
    };
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    // Invalid email
    let mut bad_email = register_payload("validation_user", "not-an-email");
    bad_email["email"] = json!("not-an-email");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&bad_email)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Short password
    let mut short_password = register_payload("validation_user", "validation@example.com");
    short_password["password"] = json!("short");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&short_password)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Username with forbidden characters
    let mut bad_username = register_payload("bad user!", "validation@example.com");
    bad_username["username"] = json!("bad user!");
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&bad_username)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}
