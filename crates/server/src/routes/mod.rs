//! HTTP routes
//!
//! Everything lives under `/api`. Administration routes are nested under
//! `/api/admin` and require the admin role. Any origin may call the API, and
//! other paths fall back to the configured frontend directory.

mod admin;
mod auth;
mod catalog;
mod export;
mod reports;
mod time_entries;
mod work_sessions;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the API router
pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/employees",
            get(admin::list_employees).post(admin::create_employee),
        )
        .route(
            "/employees/{id}",
            put(admin::update_employee).delete(admin::delete_employee),
        )
        .route("/tasks", post(catalog::create_task))
        .route("/tasks/{id}", delete(catalog::delete_task))
        .route("/projects", post(catalog::create_project))
        .route("/projects/{id}", delete(catalog::delete_project))
        .route("/stats/global", get(admin::global_stats))
        .route("/stats/employees", get(admin::employee_stats))
        .route("/stats/employees/{id}", get(admin::employee_stat))
        .route("/activity/recent", get(admin::recent_activity))
        .route("/export/detailed", post(export::detailed))
        .route("/gamma/generate-report/{employee_id}", post(reports::generate))
        .route("/gamma/status/{generation_id}", get(reports::status));

    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/logout", post(auth::logout))
        .route("/work-sessions/today", get(work_sessions::today))
        .route("/work-sessions/update", post(work_sessions::update))
        .route("/work-sessions/end-day", post(work_sessions::end_day))
        .route("/time-entries/start", post(time_entries::start))
        .route("/time-entries/history", get(time_entries::history))
        .route("/time-entries/{id}", put(time_entries::complete))
        .route("/tasks", get(catalog::list_tasks).post(catalog::create_task))
        .route("/tasks/{id}", delete(catalog::delete_task))
        .route(
            "/projects",
            get(catalog::list_projects).post(catalog::create_project),
        )
        .route("/projects/{id}", delete(catalog::delete_project))
        .nest("/admin", admin);

    let static_dir = state.config().server.static_dir.clone();
    let mut app = Router::new().nest("/api", api).with_state(state);
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(cors())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Parse a record id from a path segment
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::Validation(format!("Identifiant invalide : {raw}")))
}

/// An employee id that does not parse cannot name an employee
fn parse_employee_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::EmployeeNotFound)
}

/// Trimmed text, rejecting blank values with `message`
fn non_empty(value: &str, message: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::State;
    use axum::http::header::{
        ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD,
        AUTHORIZATION, CONTENT_TYPE, ORIGIN,
    };
    use axum::http::{Method, Request, StatusCode};
    use axum::Json;
    use daytimer_core::credentials::{generate_token, hash_password};
    use daytimer_core::{Account, AccountRepository, AccountRole, AuthSession, Config, Database};
    use daytimer_net::GammaClient;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    struct Fixture {
        app: Router,
        admin_token: String,
        employee_token: String,
        employee_id: Uuid,
    }

    fn account(first: &str, last: &str, email: &str, role: AccountRole) -> Account {
        // Placeholder hash: never verifies, tokens are issued directly
        Account::new(
            first.to_string(),
            last.to_string(),
            email.to_string(),
            "unusable".to_string(),
            Some("Développeuse".to_string()),
            role,
        )
    }

    fn issue_token(db: &Database, account_id: Uuid) -> String {
        let session = AuthSession::new(account_id, generate_token(), 24);
        db.create_session(&session).unwrap();
        session.token
    }

    fn fixture_with(db: Database, gamma_url: &str) -> Fixture {
        let admin = account("Ada", "Admin", "admin@example.com", AccountRole::Admin);
        let employee = account("Alice", "Martin", "alice@example.com", AccountRole::Employee);
        db.create_account(&admin).unwrap();
        db.create_account(&employee).unwrap();
        let admin_token = issue_token(&db, admin.id);
        let employee_token = issue_token(&db, employee.id);

        let gamma = GammaClient::new(gamma_url, "sk-test").unwrap();
        let state = AppState::new(db, gamma, Config::default());
        Fixture {
            app: router(state),
            admin_token,
            employee_token,
            employee_id: employee.id,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(
            Database::open_in_memory().unwrap(),
            "http://127.0.0.1:9/v0.2/generations",
        )
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[derive(Clone, Default)]
    struct GammaStub {
        last_body: Arc<Mutex<Option<Value>>>,
    }

    async fn serve_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v0.2/generations")
    }

    async fn accept_generation(
        State(stub): State<GammaStub>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        *stub.last_body.lock().unwrap() = Some(body);
        Json(json!({ "generationId": "gen-42" }))
    }

    async fn throttle_generation() -> (StatusCode, Json<Value>) {
        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "message": "Too many requests" })),
        )
    }

    #[tokio::test]
    async fn test_access_control() {
        let f = fixture();

        let (status, body) = call(&f.app, Method::GET, "/api/work-sessions/today", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token manquant");

        let (status, body) = call(
            &f.app,
            Method::GET,
            "/api/work-sessions/today",
            Some("not-a-token"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Token invalide");

        let (status, body) = call(
            &f.app,
            Method::GET,
            "/api/admin/employees",
            Some(&f.employee_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Accès refusé - Admin uniquement");

        let (status, body) = call(
            &f.app,
            Method::GET,
            "/api/admin/employees",
            Some(&f.admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["email"], "alice@example.com");
        assert!(body[0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_verify_logout() {
        let db = Database::open_in_memory().unwrap();
        let mut bob = account("Bob", "Durand", "bob@example.com", AccountRole::Employee);
        bob.password_hash = hash_password("secret123").unwrap();
        db.create_account(&bob).unwrap();
        let f = fixture_with(db, "http://127.0.0.1:9/v0.2/generations");

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "bob@example.com", "password": "wrong-pass" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Email ou mot de passe incorrect");

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "bob@example.com", "password": "secret123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["first_name"], "Bob");
        assert_eq!(body["user"]["role"], "employee");
        let token = body["token"].as_str().unwrap().to_string();
        assert_eq!(token.len(), 48);

        let (status, body) = call(&f.app, Method::GET, "/api/auth/verify", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["user"]["email"], "bob@example.com");

        let (status, _) = call(&f.app, Method::POST, "/api/auth/logout", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(&f.app, Method::GET, "/api/auth/verify", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_work_session_round_trip() {
        let f = fixture();
        let token = Some(f.employee_token.as_str());

        let (status, body) = call(&f.app, Method::GET, "/api/work-sessions/today", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "work_seconds": 0, "break_seconds": 0, "lunch_seconds": 0 })
        );

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/work-sessions/update",
            token,
            Some(json!({ "work_seconds": 3600, "break_seconds": 600, "lunch_seconds": 1800 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Session mise à jour");

        let (_, body) = call(&f.app, Method::GET, "/api/work-sessions/today", token, None).await;
        assert_eq!(body["work_seconds"], 3600);
        assert_eq!(body["break_seconds"], 600);
        assert_eq!(body["lunch_seconds"], 1800);
        assert!(body["start_time"].is_string());
        assert!(body["end_time"].is_null());

        let (status, _) = call(
            &f.app,
            Method::POST,
            "/api/work-sessions/update",
            token,
            Some(json!({ "work_seconds": -1, "break_seconds": 0, "lunch_seconds": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/work-sessions/update",
            token,
            Some(json!({ "work_seconds": i64::MAX, "break_seconds": i64::MAX, "lunch_seconds": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Les compteurs ne peuvent pas dépasser 24 heures");

        let (_, body) = call(&f.app, Method::GET, "/api/work-sessions/today", token, None).await;
        assert_eq!(body["work_seconds"], 3600);

        let (status, _) = call(&f.app, Method::POST, "/api/work-sessions/end-day", token, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = call(&f.app, Method::GET, "/api/work-sessions/today", token, None).await;
        assert!(body["end_time"].is_string());
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let f = fixture();
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/work-sessions/today")
            .header(ORIGIN, "http://localhost:5173")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
            .body(Body::empty())
            .unwrap();
        let response = f.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        // Error responses carry the header too
        let request = Request::builder()
            .uri("/api/auth/verify")
            .header(ORIGIN, "http://localhost:5173")
            .body(Body::empty())
            .unwrap();
        let response = f.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_frontend_served_outside_api() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Daytimer</h1>").unwrap();
        let mut config = Config::default();
        config.server.static_dir = Some(dir.path().to_path_buf());
        let gamma = GammaClient::new("http://127.0.0.1:9/v0.2/generations", "").unwrap();
        let app = router(AppState::new(Database::open_in_memory().unwrap(), gamma, config));

        let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Daytimer</h1>");

        let (status, body) = call(&app, Method::GET, "/api/auth/verify", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Token manquant");
    }

    #[tokio::test]
    async fn test_end_day_without_session_is_a_no_op() {
        let f = fixture();
        let token = Some(f.employee_token.as_str());

        let (status, body) = call(&f.app, Method::POST, "/api/work-sessions/end-day", token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = call(&f.app, Method::GET, "/api/work-sessions/today", token, None).await;
        assert!(body.get("id").is_none());
        assert_eq!(body["work_seconds"], 0);
    }

    #[tokio::test]
    async fn test_time_entry_lifecycle() {
        let f = fixture();
        let token = Some(f.employee_token.as_str());

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/tasks",
            Some(&f.admin_token),
            Some(json!({ "name": "Revue de code" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let task_id = body["task_id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/time-entries/start",
            token,
            Some(json!({ "task_id": task_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let finished = body["entry_id"].as_str().unwrap().to_string();

        let (_, body) = call(&f.app, Method::POST, "/api/time-entries/start", token, None).await;
        let open = body["entry_id"].as_str().unwrap().to_string();

        let (status, _) = call(
            &f.app,
            Method::PUT,
            &format!("/api/time-entries/{finished}"),
            token,
            Some(json!({ "duration_seconds": 1500 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &f.app,
            Method::PUT,
            &format!("/api/time-entries/{finished}"),
            token,
            Some(json!({ "duration_seconds": -3 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &f.app,
            Method::PUT,
            &format!("/api/time-entries/{finished}"),
            token,
            Some(json!({ "duration_seconds": 86_401 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(&f.app, Method::GET, "/api/time-entries/history", token, None).await;
        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        let done = entries.iter().find(|e| e["id"] == finished.as_str()).unwrap();
        assert_eq!(done["duration_seconds"], 1500);
        assert!(done["ended_at"].is_string());
        assert_eq!(done["task_name"], "Revue de code");

        let pending = entries.iter().find(|e| e["id"] == open.as_str()).unwrap();
        assert_eq!(pending["duration_seconds"], 0);
        assert!(pending["ended_at"].is_null());
    }

    #[tokio::test]
    async fn test_catalog_permissions_and_aliases() {
        let f = fixture();

        let (status, _) = call(
            &f.app,
            Method::POST,
            "/api/tasks",
            Some(&f.employee_token),
            Some(json!({ "name": "Support" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = call(
            &f.app,
            Method::POST,
            "/api/admin/projects",
            Some(&f.admin_token),
            Some(json!({ "name": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/admin/projects",
            Some(&f.admin_token),
            Some(json!({ "name": "Site vitrine", "client": "Boulangerie Dupont" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let project_id = body["project_id"].as_str().unwrap().to_string();

        let (_, body) = call(&f.app, Method::GET, "/api/projects", Some(&f.employee_token), None).await;
        assert_eq!(body[0]["name"], "Site vitrine");
        assert_eq!(body[0]["client"], "Boulangerie Dupont");

        let (status, _) = call(
            &f.app,
            Method::DELETE,
            &format!("/api/projects/{project_id}"),
            Some(&f.admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = call(&f.app, Method::GET, "/api/projects", Some(&f.employee_token), None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_employee_management() {
        let f = fixture();
        let admin = Some(f.admin_token.as_str());

        let new_employee = json!({
            "first_name": "Chloé",
            "last_name": "Bernard",
            "email": "chloe@example.com",
            "password": "secret123",
            "position": "Designer"
        });
        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/admin/employees",
            admin,
            Some(new_employee.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["user_id"].is_string());

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/admin/employees",
            admin,
            Some(new_employee),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Cet email existe déjà" }));

        let (status, _) = call(
            &f.app,
            Method::POST,
            "/api/admin/employees",
            admin,
            Some(json!({
                "first_name": "Paul",
                "last_name": "Petit",
                "email": "paul@example.com",
                "password": "123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &f.app,
            Method::PUT,
            &format!("/api/admin/employees/{}", Uuid::new_v4()),
            admin,
            Some(json!({ "position": "Lead" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Employé non trouvé");

        let (status, _) = call(
            &f.app,
            Method::PUT,
            &format!("/api/admin/employees/{}", f.employee_id),
            admin,
            Some(json!({ "position": "Lead" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &f.app,
            Method::DELETE,
            &format!("/api/admin/employees/{}", f.employee_id),
            admin,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Deactivation revokes the employee's token
        let (status, _) = call(
            &f.app,
            Method::GET,
            "/api/auth/verify",
            Some(&f.employee_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_statistics_routes() {
        let db = Database::open_in_memory().unwrap();
        let f = fixture_with(db, "http://127.0.0.1:9/v0.2/generations");
        let admin = Some(f.admin_token.as_str());

        call(
            &f.app,
            Method::POST,
            "/api/work-sessions/update",
            Some(&f.employee_token),
            Some(json!({ "work_seconds": 7200, "break_seconds": 0, "lunch_seconds": 1800 })),
        )
        .await;

        let (status, body) = call(&f.app, Method::GET, "/api/admin/stats/global", admin, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_employees"], 1);
        assert_eq!(body["total_work_seconds"], 7200);

        let (_, body) = call(&f.app, Method::GET, "/api/admin/stats/employees", admin, None).await;
        assert_eq!(body[0]["first_name"], "Alice");
        assert_eq!(body[0]["productivity_rate"], 80.0);

        let (status, body) = call(
            &f.app,
            Method::GET,
            &format!("/api/admin/stats/employees/{}", f.employee_id),
            admin,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_days"], 1);

        let (status, _) = call(
            &f.app,
            Method::GET,
            &format!("/api/admin/stats/employees/{}", Uuid::new_v4()),
            admin,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&f.app, Method::GET, "/api/admin/activity/recent", admin, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_detailed_export() {
        let db = Database::open_in_memory().unwrap();
        let f = fixture_with(db, "http://127.0.0.1:9/v0.2/generations");
        let admin = Some(f.admin_token.as_str());

        call(
            &f.app,
            Method::POST,
            "/api/work-sessions/update",
            Some(&f.employee_token),
            Some(json!({ "work_seconds": 3600, "break_seconds": 600, "lunch_seconds": 1800 })),
        )
        .await;

        let (status, body) = call(
            &f.app,
            Method::POST,
            "/api/admin/export/detailed",
            admin,
            Some(json!({ "includeDailyStats": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["exportDate"].is_string());
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["employee"]["email"], "alice@example.com");
        assert_eq!(data[0]["summary"]["total_work_seconds"], 3600);
        assert_eq!(data[0]["daily"].as_array().unwrap().len(), 1);
        assert!(data[0].get("activities").is_none());
        assert!(data[0].get("projects").is_none());

        // A window that excludes today
        let (_, body) = call(
            &f.app,
            Method::POST,
            "/api/admin/export/detailed",
            admin,
            Some(json!({
                "employeeIds": [f.employee_id, Uuid::new_v4()],
                "startDate": "2000-01-01",
                "endDate": "2000-01-31"
            })),
        )
        .await;
        assert_eq!(body["filters"]["startDate"], "2000-01-01");
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["summary"]["total_work_seconds"], 0);

        let (status, _) = call(
            &f.app,
            Method::POST,
            "/api/admin/export/detailed",
            admin,
            Some(json!({ "startDate": "2026-02-01", "endDate": "2026-01-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_generation_submits_document() {
        let stub = GammaStub::default();
        let url = serve_stub(
            Router::new()
                .route("/v0.2/generations", axum::routing::post(accept_generation))
                .with_state(stub.clone()),
        )
        .await;

        let db = Database::open_in_memory().unwrap();
        let f = fixture_with(db, &url);
        let admin = Some(f.admin_token.as_str());

        let (status, body) = call(
            &f.app,
            Method::POST,
            &format!("/api/admin/gamma/generate-report/{}", f.employee_id),
            admin,
            Some(json!({ "includeDetails": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["generationId"], "gen-42");
        assert_eq!(
            body["message"],
            "Génération en cours... Cela peut prendre 30-60 secondes."
        );

        let sent = stub.last_body.lock().unwrap().clone().unwrap();
        assert!(sent["inputText"].as_str().unwrap().contains("Alice"));
        assert_eq!(sent["themeName"], "Night Sky");

        let (status, body) = call(
            &f.app,
            Method::POST,
            &format!("/api/admin/gamma/generate-report/{}", Uuid::new_v4()),
            admin,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Employé non trouvé");
    }

    #[tokio::test]
    async fn test_report_generation_forwards_upstream_status() {
        let url = serve_stub(
            Router::new().route("/v0.2/generations", axum::routing::post(throttle_generation)),
        )
        .await;

        let db = Database::open_in_memory().unwrap();
        let f = fixture_with(db, &url);

        let (status, body) = call(
            &f.app,
            Method::POST,
            &format!("/api/admin/gamma/generate-report/{}", f.employee_id),
            Some(&f.admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Erreur API Gamma");
        assert_eq!(body["status"], 429);
        assert_eq!(body["details"]["message"], "Too many requests");
    }

    #[tokio::test]
    async fn test_report_status_unreachable_service() {
        let f = fixture();
        let (status, body) = call(
            &f.app,
            Method::GET,
            "/api/admin/gamma/status/gen-1",
            Some(&f.admin_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Erreur lors de la vérification du statut");
        assert!(body["message"].is_string());
    }

    #[test]
    fn test_path_helpers() {
        assert!(matches!(parse_id("nope"), Err(ApiError::Validation(_))));
        assert!(matches!(
            parse_employee_id("42"),
            Err(ApiError::EmployeeNotFound)
        ));
        assert_eq!(non_empty("  Alice ", "x").unwrap(), "Alice");
        assert!(non_empty("   ", "x").is_err());
    }
}
