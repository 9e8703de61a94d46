//! In-memory stand-in for the DocMason document service.
//!
//! Serves the same routes as the hosted API under `/api/v1`, keeps every
//! record in a single `RwLock`-guarded store and renders "PDFs" as a fixed
//! byte layout around the rendered HTML. Authentication accepts any valid
//! key in the store; the key passed to `app_with_key` is seeded on startup.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

mod handlers;
pub mod model;

use model::{Template, TemplateData, TemplateRequest, UserApi, USER_ID};

pub const DEFAULT_API_KEY: &str = "test-key";

#[derive(Debug, Default)]
pub struct Store {
    pub templates: Vec<Template>,
    pub template_data: Vec<TemplateData>,
    pub template_requests: Vec<TemplateRequest>,
    pub user_apis: Vec<UserApi>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn is_valid_key(&self, key: &str) -> bool {
        self.user_apis.iter().any(|api| api.valid && api.key == key)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
}

impl AppState {
    pub fn new(api_key: &str) -> Self {
        let now = timestamp();
        let store = Store {
            user_apis: vec![UserApi {
                guid: Uuid::new_v4().to_string(),
                key: api_key.to_string(),
                valid: true,
                created_at: now.clone(),
                updated_at: now,
                user_id: USER_ID,
            }],
            ..Store::default()
        };
        Self {
            db: Arc::new(RwLock::new(store)),
        }
    }
}

/// Errors in the service's JSON shapes.
#[derive(Debug)]
pub enum MockError {
    Unauthorized,
    NotFound {
        msg: &'static str,
        param: &'static str,
    },
    Invalid {
        msg: String,
        param: &'static str,
        location: &'static str,
    },
    LimitReached(model::Limits),
    UnsupportedMediaType,
}

impl MockError {
    pub fn invalid_body(msg: impl Into<String>, param: &'static str) -> Self {
        MockError::Invalid {
            msg: msg.into(),
            param,
            location: "body",
        }
    }

    pub fn invalid_query(msg: impl Into<String>, param: &'static str) -> Self {
        MockError::Invalid {
            msg: msg.into(),
            param,
            location: "query",
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        match self {
            MockError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid or missing API key"}))).into_response()
            }
            MockError::NotFound { msg, param } => (
                StatusCode::NOT_FOUND,
                Json(json!({"errors": [{"msg": msg, "param": param, "location": "query"}]})),
            )
                .into_response(),
            MockError::Invalid { msg, param, location } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"errors": [{"msg": msg, "param": param, "location": location}]})),
            )
                .into_response(),
            MockError::LimitReached(limits) => (
                StatusCode::FORBIDDEN,
                Json(json!({"errors": [{"msg": "Limit reached for your plan"}], "limits": limits})),
            )
                .into_response(),
            MockError::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({"message": "Assets must be uploaded as raw bytes, not JSON"})),
            )
                .into_response(),
        }
    }
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state = AppState::new(api_key);

    let protected = Router::new()
        .route(
            "/template",
            post(handlers::create_template)
                .get(handlers::get_template)
                .patch(handlers::update_template)
                .delete(handlers::delete_template),
        )
        .route("/template/list", get(handlers::list_templates))
        .route("/template/preview", post(handlers::preview_template))
        .route("/template/pdf", post(handlers::template_pdf))
        .route("/template/upload-asset", post(handlers::upload_asset))
        .route(
            "/template-data",
            post(handlers::create_template_data)
                .get(handlers::get_template_data)
                .patch(handlers::update_template_data)
                .delete(handlers::delete_template_data),
        )
        .route("/template-data/list", get(handlers::list_template_data))
        .route("/template-data/validate", post(handlers::validate_template_data))
        .route("/template-data/apply", post(handlers::apply_template_data))
        .route("/template-data/apply/pdf", post(handlers::apply_template_data_pdf))
        .route(
            "/template-request",
            post(handlers::create_template_request)
                .get(handlers::get_template_request)
                .patch(handlers::update_template_request)
                .delete(handlers::delete_template_request),
        )
        .route("/template-request/list", get(handlers::list_template_requests))
        .route("/template-request/stats", get(handlers::template_request_stats))
        .route(
            "/userapi",
            post(handlers::create_user_api)
                .get(handlers::get_user_api)
                .patch(handlers::update_user_api)
                .delete(handlers::delete_user_api),
        )
        .route("/userapi/list", get(handlers::list_user_apis))
        .route("/user/profile", get(handlers::user_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    let public = Router::new()
        .route("/userapi/verify", post(handlers::verify_user_api))
        .route("/user/create", post(handlers::create_user))
        .route("/user/resend-verification", post(handlers::resend_verification));

    Router::new()
        .nest("/api/v1", protected.merge(public))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, MockError> {
    let key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    let authorized = match key {
        Some(key) => state.db.read().await.is_valid_key(&key),
        None => false,
    };
    if !authorized {
        return Err(MockError::Unauthorized);
    }
    Ok(next.run(request).await)
}

pub(crate) fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
