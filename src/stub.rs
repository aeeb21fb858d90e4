//! In-memory stand-in for the backend surface the suite exercises.
//! A fixture, not a product: opaque tokens, no persistence, no hashing.

use axum::{
    Extension, Json, Router,
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Default)]
pub struct StubState {
    /// token -> username
    tokens: Arc<DashMap<String, String>>,
    /// username -> email
    users: Arc<DashMap<String, String>>,
}

/// Identity attached to the request by the auth middleware.
#[derive(Clone)]
struct SessionUser {
    username: String,
}

pub fn stub_router() -> Router {
    let state = StubState::default();

    let authed = Router::new()
        .route("/auth/me", get(me))
        .route("/servers", post(create_server))
        .route("/communities", post(create_community))
        .route("/search", get(search))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/auth/register", post(register))
        .route("/health", get(health))
        .merge(authed)
        .with_state(state)
}

async fn auth_middleware(
    State(state): State<StubState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    if let Some(token) = token {
        if let Some(username) = state.tokens.get(&token) {
            req.extensions_mut().insert(SessionUser {
                username: username.clone(),
            });
            return Ok(next.run(req).await);
        }
    }

    Err(error_response(StatusCode::UNAUTHORIZED, "Unauthorized"))
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

#[derive(Deserialize, Validate)]
struct RegisterRequest {
    #[validate(length(min = 2, max = 64))]
    username: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 8))]
    password: String,
}

async fn register(
    State(state): State<StubState>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, &e.to_string());
    }
    // entry() keeps the duplicate check and the insert atomic under
    // concurrent registrations.
    match state.users.entry(payload.username.clone()) {
        Entry::Occupied(_) => {
            return error_response(StatusCode::BAD_REQUEST, "Username already exists");
        }
        Entry::Vacant(entry) => {
            entry.insert(payload.email.clone());
        }
    }

    let token = Uuid::new_v4().simple().to_string();
    state.tokens.insert(token.clone(), payload.username.clone());

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "token": token,
                "user": {
                    "username": payload.username,
                    "email": payload.email,
                },
            },
        })),
    )
        .into_response()
}

async fn me(
    State(state): State<StubState>,
    Extension(session): Extension<SessionUser>,
) -> Response {
    let email = state
        .users
        .get(&session.username)
        .map(|e| e.clone())
        .unwrap_or_default();

    Json(json!({
        "success": true,
        "data": {
            "user": {
                "username": session.username,
                "email": email,
            },
        },
    }))
    .into_response()
}

#[derive(Deserialize, Validate)]
struct CreateServerRequest {
    #[validate(length(min = 1, max = 100))]
    name: String,
}

async fn create_server(
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<CreateServerRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, &e.to_string());
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "id": Uuid::new_v4(),
                "name": payload.name,
                "owner": session.username,
            },
        })),
    )
        .into_response()
}

#[derive(Deserialize, Validate)]
struct CreateCommunityRequest {
    #[validate(length(min = 1, max = 100))]
    name: String,
    description: Option<String>,
}

async fn create_community(
    Extension(session): Extension<SessionUser>,
    Json(payload): Json<CreateCommunityRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, &e.to_string());
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": {
                "id": Uuid::new_v4(),
                "name": payload.name,
                "description": payload.description,
                "owner": session.username,
            },
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

async fn search(Query(query): Query<SearchQuery>) -> Response {
    Json(json!({
        "success": true,
        "data": {
            "query": query.q.unwrap_or_default(),
            "results": [],
        },
    }))
    .into_response()
}

async fn health() -> Response {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}
