use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put, MethodRouter},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database::Database;
use crate::handlers::{auth, reviews, students, users};
use crate::middleware::jwt_auth_middleware;

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub fn app(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(student_routes())
        .merge(review_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    if config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Require a valid bearer token for the given method route
fn protected(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/api/identify", protected(get(auth::identify)))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(users::list))
        .route("/api/users/:id", get(users::get).merge(protected(put(users::update))))
}

fn student_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/students",
            get(students::list).merge(protected(post(students::create))),
        )
        .route(
            "/api/students/:student_id",
            get(students::get).merge(protected(put(students::update).delete(students::delete))),
        )
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(reviews::list).merge(protected(post(reviews::create))))
        .route(
            "/api/reviews/:id",
            get(reviews::get).merge(protected(axum::routing::delete(reviews::delete))),
        )
        .route("/api/reviews/:id/experience", protected(put(reviews::update_experience)))
        .route("/api/reviews/:id/rating", protected(put(reviews::update_rating)))
        .route("/api/reviews/:id/upvote", protected(post(reviews::upvote)))
        .route("/api/reviews/:id/downvote", protected(post(reviews::downvote)))
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Staff Review API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "auth": "/auth/login, /auth/signup (public), /api/identify (protected)",
                "users": "/api/users[/:id] (read public, update protected)",
                "students": "/api/students[/:student_id] (read public, write protected)",
                "reviews": "/api/reviews[/:id[/experience|/rating|/upvote|/downvote]] (read public, write protected)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
