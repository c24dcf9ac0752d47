// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod identity;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use hackathon_api::{
    ApiError, ApiResult, ApplicationInfo, ApplicationRequest, ApplicationsQuery, ApplyResponse,
    CreateHackathonRequest, DecisionResponse, DeleteHackathonResponse, HackathonInfo,
    ListApplicationsResponse, ListHackathonsRequest, ListHackathonsResponse, PageQuery,
    UpdateHackathonRequest,
};
use hackathon_domain::{Connection, Event, Sponsor, User};
use hackathon_persistence::{DEFAULT_MAX_CONNECTIONS, Persistence, PersistenceConfig, PersistenceError};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::identity::CallerActor;

/// Hackathon server - HTTP front end for the hackathon data access core
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Upper bound on pooled database connections (file databases only)
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,
}

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to open database: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state shared across handlers.
///
/// `Persistence` is a cheap handle over a connection pool, so every request
/// clones it rather than locking a shared instance.
#[derive(Clone)]
struct AppState {
    persistence: Persistence,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Runs a blocking API call on the blocking pool.
///
/// The call sees a `Persistence` bound to a fresh cancellation token. If the
/// client goes away, axum drops this future, the guard fires, and any
/// transaction still in flight rolls back instead of committing.
async fn run_blocking<T, F>(app_state: &AppState, op: F) -> Result<T, HttpError>
where
    T: Send + 'static,
    F: FnOnce(&Persistence) -> ApiResult<T> + Send + 'static,
{
    let token: CancellationToken = CancellationToken::new();
    let guard = token.clone().drop_guard();
    let persistence: Persistence = app_state.persistence.with_cancellation(token);

    let joined = tokio::task::spawn_blocking(move || op(&persistence)).await;
    let _ = guard.disarm();

    match joined {
        Ok(result) => result.map_err(HttpError::from),
        Err(e) => {
            error!(error = %e, "Blocking task failed");
            Err(HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: String::from("Internal error: request task failed"),
            })
        }
    }
}

// ============================================================================
// Hackathons
// ============================================================================

/// Handler for POST `/hackathons`.
async fn handle_create_hackathon(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Json(req): Json<CreateHackathonRequest>,
) -> Result<(StatusCode, Json<HackathonInfo>), HttpError> {
    info!(
        actor = actor.user_id,
        year = req.year,
        semester = %req.semester,
        "Handling create_hackathon request"
    );

    let info: HackathonInfo = run_blocking(&app_state, move |persistence| {
        hackathon_api::create_hackathon(persistence, &req, &actor)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(info)))
}

/// Handler for GET `/hackathons?year=&semester=`.
async fn handle_list_hackathons(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListHackathonsRequest>,
) -> Result<Json<ListHackathonsResponse>, HttpError> {
    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::list_hackathons(persistence, &query)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/hackathons/current`.
async fn handle_get_current_hackathon(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<HackathonInfo>, HttpError> {
    let today: time::Date = OffsetDateTime::now_utc().date();
    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_current_hackathon(persistence, today)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for GET `/hackathons/{id}`.
async fn handle_get_hackathon(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
) -> Result<Json<HackathonInfo>, HttpError> {
    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon(persistence, hackathon_id)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for PATCH `/hackathons/{id}`.
async fn handle_update_hackathon(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    CallerActor(actor): CallerActor,
    Json(req): Json<UpdateHackathonRequest>,
) -> Result<Json<HackathonInfo>, HttpError> {
    info!(
        actor = actor.user_id,
        hackathon_id, "Handling update_hackathon request"
    );

    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::update_hackathon(persistence, hackathon_id, &req, &actor)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for DELETE `/hackathons/{id}`.
async fn handle_delete_hackathon(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    CallerActor(actor): CallerActor,
) -> Result<Json<DeleteHackathonResponse>, HttpError> {
    info!(
        actor = actor.user_id,
        hackathon_id, "Handling delete_hackathon request"
    );

    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::delete_hackathon(persistence, hackathon_id, &actor)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/terms/{year}/{semester}/hackathon`.
async fn handle_get_hackathon_by_term(
    AxumState(app_state): AxumState<AppState>,
    Path((year, semester)): Path<(i32, String)>,
) -> Result<Json<HackathonInfo>, HttpError> {
    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon_by_term(persistence, year, &semester)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for GET `/events/{id}/hackathon`.
async fn handle_get_hackathon_by_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<HackathonInfo>, HttpError> {
    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon_by_event(persistence, event_id)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for GET `/sponsors/{id}/hackathons`.
async fn handle_list_hackathons_by_sponsor(
    AxumState(app_state): AxumState<AppState>,
    Path(sponsor_id): Path<i64>,
) -> Result<Json<ListHackathonsResponse>, HttpError> {
    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::list_hackathons_by_sponsor(persistence, sponsor_id)
    })
    .await?;
    Ok(Json(response))
}

// ============================================================================
// Paged relations
// ============================================================================

/// Handler for GET `/hackathons/{id}/sponsors`.
async fn handle_get_hackathon_sponsors(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Connection<Sponsor>>, HttpError> {
    let page = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon_sponsors(persistence, hackathon_id, &query)
    })
    .await?;
    Ok(Json(page))
}

/// Handler for GET `/hackathons/{id}/events`.
async fn handle_get_hackathon_events(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Connection<Event>>, HttpError> {
    let page = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon_events(persistence, hackathon_id, &query)
    })
    .await?;
    Ok(Json(page))
}

/// Handler for GET `/hackathons/{id}/applicants`.
async fn handle_get_hackathon_applicants(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Connection<User>>, HttpError> {
    let page = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon_applicants(persistence, hackathon_id, &query)
    })
    .await?;
    Ok(Json(page))
}

/// Handler for GET `/hackathons/{id}/attendees`.
async fn handle_get_hackathon_attendees(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Connection<User>>, HttpError> {
    let page = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_hackathon_attendees(persistence, hackathon_id, &query)
    })
    .await?;
    Ok(Json(page))
}

/// Handler for GET `/hackathons/{id}/applications?status=`.
async fn handle_get_applications_by_hackathon(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    CallerActor(actor): CallerActor,
    Query(query): Query<ApplicationsQuery>,
) -> Result<Json<Connection<ApplicationInfo>>, HttpError> {
    let page = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_applications_by_hackathon(persistence, hackathon_id, &query, &actor)
    })
    .await?;
    Ok(Json(page))
}

// ============================================================================
// Applications
// ============================================================================

/// Handler for POST `/hackathons/{id}/applications`.
///
/// The applicant is always the caller.
async fn handle_apply_to_hackathon(
    AxumState(app_state): AxumState<AppState>,
    Path(hackathon_id): Path<i64>,
    CallerActor(actor): CallerActor,
    Json(req): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<ApplyResponse>), HttpError> {
    info!(
        user_id = actor.user_id,
        hackathon_id, "Handling apply_to_hackathon request"
    );

    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::apply_to_hackathon(persistence, hackathon_id, &req, &actor)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/hackathons/{id}/applications/{user_id}`.
async fn handle_get_application(
    AxumState(app_state): AxumState<AppState>,
    Path((hackathon_id, user_id)): Path<(i64, i64)>,
    CallerActor(actor): CallerActor,
) -> Result<Json<ApplicationInfo>, HttpError> {
    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::get_application(persistence, hackathon_id, user_id, &actor)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for PATCH `/hackathons/{id}/applications/{user_id}`.
async fn handle_update_application(
    AxumState(app_state): AxumState<AppState>,
    Path((hackathon_id, user_id)): Path<(i64, i64)>,
    CallerActor(actor): CallerActor,
    Json(req): Json<ApplicationRequest>,
) -> Result<Json<ApplicationInfo>, HttpError> {
    info!(
        actor = actor.user_id,
        hackathon_id, user_id, "Handling update_application request"
    );

    let info = run_blocking(&app_state, move |persistence| {
        hackathon_api::update_application(persistence, hackathon_id, user_id, &req, &actor)
    })
    .await?;
    Ok(Json(info))
}

/// Handler for POST `/hackathons/{id}/applications/{user_id}/accept`.
async fn handle_accept_applicant(
    AxumState(app_state): AxumState<AppState>,
    Path((hackathon_id, user_id)): Path<(i64, i64)>,
    CallerActor(actor): CallerActor,
) -> Result<Json<DecisionResponse>, HttpError> {
    info!(
        actor = actor.user_id,
        hackathon_id, user_id, "Handling accept_applicant request"
    );

    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::accept_applicant(persistence, hackathon_id, user_id, &actor)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for POST `/hackathons/{id}/applications/{user_id}/deny`.
async fn handle_deny_applicant(
    AxumState(app_state): AxumState<AppState>,
    Path((hackathon_id, user_id)): Path<(i64, i64)>,
    CallerActor(actor): CallerActor,
) -> Result<Json<DecisionResponse>, HttpError> {
    info!(
        actor = actor.user_id,
        hackathon_id, user_id, "Handling deny_applicant request"
    );

    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::deny_applicant(persistence, hackathon_id, user_id, &actor)
    })
    .await?;
    Ok(Json(response))
}

/// Handler for GET `/users/{id}/applications`.
async fn handle_list_applications_by_user(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
    CallerActor(actor): CallerActor,
) -> Result<Json<ListApplicationsResponse>, HttpError> {
    let response = run_blocking(&app_state, move |persistence| {
        hackathon_api::list_applications_by_user(persistence, user_id, &actor)
    })
    .await?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/hackathons",
            post(handle_create_hackathon).get(handle_list_hackathons),
        )
        .route("/hackathons/current", get(handle_get_current_hackathon))
        .route(
            "/hackathons/{id}",
            get(handle_get_hackathon)
                .patch(handle_update_hackathon)
                .delete(handle_delete_hackathon),
        )
        .route(
            "/hackathons/{id}/sponsors",
            get(handle_get_hackathon_sponsors),
        )
        .route("/hackathons/{id}/events", get(handle_get_hackathon_events))
        .route(
            "/hackathons/{id}/applicants",
            get(handle_get_hackathon_applicants),
        )
        .route(
            "/hackathons/{id}/attendees",
            get(handle_get_hackathon_attendees),
        )
        .route(
            "/hackathons/{id}/applications",
            get(handle_get_applications_by_hackathon).post(handle_apply_to_hackathon),
        )
        .route(
            "/hackathons/{id}/applications/{user_id}",
            get(handle_get_application).patch(handle_update_application),
        )
        .route(
            "/hackathons/{id}/applications/{user_id}/accept",
            post(handle_accept_applicant),
        )
        .route(
            "/hackathons/{id}/applications/{user_id}/deny",
            post(handle_deny_applicant),
        )
        .route(
            "/terms/{year}/{semester}/hackathon",
            get(handle_get_hackathon_by_term),
        )
        .route("/events/{id}/hackathon", get(handle_get_hackathon_by_event))
        .route(
            "/sponsors/{id}/hackathons",
            get(handle_list_hackathons_by_sponsor),
        )
        .route(
            "/users/{id}/applications",
            get(handle_list_applications_by_user),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing hackathon server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!(
            path = %db_path,
            max_connections = args.max_connections,
            "Using file-based database"
        );
        let config: PersistenceConfig =
            PersistenceConfig::file(db_path.as_str()).with_max_connections(args.max_connections);
        Persistence::new_with_config(&config)?
    } else {
        warn!("Using in-memory database; all data is lost on exit");
        Persistence::new_in_memory()?
    };

    let app: Router = build_router(AppState { persistence });

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use diesel::{Connection as _, RunQueryDsl, SqliteConnection, sql_query};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::identity::{USER_ID_HEADER, USER_ROLE_HEADER};

    const ADMIN: (i64, &str) = (1, "ADMIN");
    const APPLICANT: (i64, &str) = (2, "NORMAL");
    const OTHER: (i64, &str) = (3, "NORMAL");

    /// Test app state over a fresh in-memory database, plus a side
    /// connection that seeds rows owned by other services.
    fn create_test_app_state() -> (AppState, SqliteConnection) {
        let config: PersistenceConfig = PersistenceConfig::in_memory();
        let persistence: Persistence =
            Persistence::new_with_config(&config).expect("Failed to create in-memory persistence");
        let mut seed: SqliteConnection =
            SqliteConnection::establish(&config.database_url).expect("seed connection");
        for (table, id) in [("users", 1), ("users", 2), ("users", 3), ("sponsors", 10)] {
            sql_query(format!("INSERT INTO {table} (id) VALUES ({id})"))
                .execute(&mut seed)
                .expect("seed row");
        }
        (AppState { persistence }, seed)
    }

    fn request(
        method: &str,
        uri: &str,
        actor: Option<(i64, &str)>,
        body: Option<&Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user_id, role)) = actor {
            builder = builder
                .header(USER_ID_HEADER, user_id.to_string())
                .header(USER_ROLE_HEADER, role);
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (HttpStatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn fall_2023() -> Value {
        json!({
            "year": 2023,
            "semester": "FALL",
            "start_date": "2023-10-10",
            "end_date": "2023-10-17",
        })
    }

    async fn create_fall_2023(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            request("POST", "/hackathons", Some(ADMIN), Some(&fall_2023())),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_create_hackathon_as_admin_succeeds() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);

        let id = create_fall_2023(&app).await;

        let (status, body) = send(&app, request("GET", &format!("/hackathons/{id}"), None, None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["semester"], "FALL");
        assert_eq!(body["start_date"], "2023-10-10");
        assert_eq!(body["status"], "PAST");
    }

    #[tokio::test]
    async fn test_create_hackathon_without_identity_is_unauthenticated() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, body) = send(&app, request("POST", "/hackathons", None, Some(&fall_2023()))).await;

        assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_create_hackathon_as_normal_user_is_forbidden() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, _) = send(
            &app,
            request("POST", "/hackathons", Some(APPLICANT), Some(&fall_2023())),
        )
        .await;

        assert_eq!(status, HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_invalid_input_is_bad_request() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let reversed = json!({
            "year": 2023,
            "semester": "FALL",
            "start_date": "2023-10-17",
            "end_date": "2023-10-10",
        });

        let (status, body) = send(&app, request("POST", "/hackathons", Some(ADMIN), Some(&reversed))).await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("end_date"));
    }

    #[tokio::test]
    async fn test_missing_hackathon_is_not_found() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);

        let (status, _) = send(&app, request("GET", "/hackathons/41", None, None)).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);

        let (status, _) = send(&app, request("GET", "/hackathons/current", None, None)).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_current_hackathon_route() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let far_future = json!({
            "year": 2099,
            "semester": "SPRING",
            "start_date": "2099-02-01",
            "end_date": "2099-02-03",
        });
        send(&app, request("POST", "/hackathons", Some(ADMIN), Some(&far_future))).await;

        let (status, body) = send(&app, request("GET", "/hackathons/current", None, None)).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["year"], 2099);
        assert_eq!(body["status"], "FUTURE");
    }

    #[tokio::test]
    async fn test_update_and_lookup_routes() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let id = create_fall_2023(&app).await;

        let (status, body) = send(
            &app,
            request(
                "PATCH",
                &format!("/hackathons/{id}"),
                Some(ADMIN),
                Some(&json!({ "semester": "SPRING", "add_sponsors": [10] })),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["semester"], "SPRING");

        let (status, body) = send(&app, request("GET", "/terms/2023/spring/hackathon", None, None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["id"], id);

        let (status, body) = send(&app, request("GET", "/sponsors/10/hackathons", None, None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["hackathons"][0]["id"], id);

        let (status, body) = send(
            &app,
            request("GET", "/hackathons?year=2023&semester=SPRING", None, None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["hackathons"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app,
            request("GET", &format!("/hackathons/{id}/sponsors?first=1"), None, None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["total_count"], 1);
        assert_eq!(body["items"][0]["id"], 10);
        assert_eq!(body["page_info"]["has_next_page"], false);
    }

    #[tokio::test]
    async fn test_update_with_unknown_event_is_not_found() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let id = create_fall_2023(&app).await;

        let (status, _) = send(
            &app,
            request(
                "PATCH",
                &format!("/hackathons/{id}"),
                Some(ADMIN),
                Some(&json!({ "add_events": [999] })),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_cursor_is_bad_request() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let id = create_fall_2023(&app).await;

        let (status, _) = send(
            &app,
            request(
                "GET",
                &format!("/hackathons/{id}/events?first=2&after=%21%21"),
                None,
                None,
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_application_workflow_routes() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let id = create_fall_2023(&app).await;
        let answers = json!({ "why_attend": ["fun"] });

        let (status, body) = send(
            &app,
            request(
                "POST",
                &format!("/hackathons/{id}/applications"),
                Some(APPLICANT),
                Some(&answers),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CREATED);
        assert_eq!(body["user_id"], APPLICANT.0);

        let (status, _) = send(
            &app,
            request(
                "POST",
                &format!("/hackathons/{id}/applications"),
                Some(APPLICANT),
                Some(&answers),
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);

        let application_uri = format!("/hackathons/{id}/applications/{}", APPLICANT.0);
        let (status, _) = send(&app, request("GET", &application_uri, Some(OTHER), None)).await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        let (status, body) = send(&app, request("GET", &application_uri, Some(APPLICANT), None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "WAITING");

        let (status, _) = send(
            &app,
            request("POST", &format!("{application_uri}/accept"), Some(APPLICANT), None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            request("POST", &format!("{application_uri}/accept"), Some(ADMIN), None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "ACCEPTED");

        let (status, _) = send(
            &app,
            request("POST", &format!("{application_uri}/deny"), Some(ADMIN), None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::CONFLICT);

        let (status, body) = send(
            &app,
            request("GET", &format!("/hackathons/{id}/attendees"), None, None),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["items"][0]["id"], APPLICANT.0);

        let (status, body) = send(
            &app,
            request(
                "GET",
                &format!("/hackathons/{id}/applications?status=ACCEPTED"),
                Some(ADMIN),
                None,
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["total_count"], 1);

        let (status, body) = send(
            &app,
            request(
                "GET",
                &format!("/users/{}/applications", APPLICANT.0),
                Some(APPLICANT),
                None,
            ),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["applications"][0]["id"], format!("{id}-{}", APPLICANT.0));
    }

    #[tokio::test]
    async fn test_update_application_route() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let id = create_fall_2023(&app).await;
        send(
            &app,
            request(
                "POST",
                &format!("/hackathons/{id}/applications"),
                Some(APPLICANT),
                Some(&json!({})),
            ),
        )
        .await;

        let (status, body) = send(
            &app,
            request(
                "PATCH",
                &format!("/hackathons/{id}/applications/{}", APPLICANT.0),
                Some(APPLICANT),
                Some(&json!({ "what_do_you_want_to_learn": ["rust"] })),
            ),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["what_do_you_want_to_learn"][0], "rust");
        assert_eq!(body["why_attend"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_route() {
        let (app_state, _seed) = create_test_app_state();
        let app: Router = build_router(app_state);
        let id = create_fall_2023(&app).await;
        let uri = format!("/hackathons/{id}");

        let (status, body) = send(&app, request("DELETE", &uri, Some(ADMIN), None)).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, _) = send(&app, request("GET", &uri, None, None)).await;
        assert_eq!(status, HttpStatusCode::NOT_FOUND);
    }
}
