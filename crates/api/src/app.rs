use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::repository::{
    CategoryRepository, RegistrationRepository, SubmissionRepository, UserRepository,
};
use domain::services::{RegistrationStore, SubmissionStore};
use persistence::memory::MemoryBackend;
use persistence::postgres::{
    PgCategoryRepository, PgRegistrationRepository, PgSubmissionRepository, PgUserRepository,
};
use shared::jwt::JwtConfig;

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, security_headers_middleware, trace_id};
use crate::routes::{admin, auth, categories, health, pricing, registrations, submissions, users};

/// Repository handles for every aggregate, backend-agnostic.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
}

impl Repositories {
    pub fn memory(backend: MemoryBackend) -> Self {
        let backend = Arc::new(backend);
        Self {
            users: backend.clone(),
            categories: backend.clone(),
            registrations: backend.clone(),
            submissions: backend,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepository::new(pool.clone())),
            submissions: Arc::new(PgSubmissionRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub repos: Repositories,
    pub registrations: Arc<RegistrationStore>,
    pub submissions: Arc<SubmissionStore>,
    /// Present only when running against PostgreSQL; used by health checks.
    pub pool: Option<PgPool>,
}

pub fn create_app(config: Config, repos: Repositories, pool: Option<PgPool>) -> Router {
    let config = Arc::new(config);
    let jwt = Arc::new(JwtConfig::new(
        &config.jwt.secret,
        config.jwt.token_expiry_secs,
    ));

    // Both stores share one lock so cross-store mutations serialize.
    let write_lock = Arc::new(Mutex::new(()));
    let registrations = Arc::new(RegistrationStore::new(
        repos.registrations.clone(),
        repos.categories.clone(),
        repos.submissions.clone(),
        write_lock.clone(),
    ));
    let submissions = Arc::new(SubmissionStore::new(
        repos.submissions.clone(),
        repos.registrations.clone(),
        write_lock,
    ));

    let state = AppState {
        config: config.clone(),
        jwt,
        repos,
        registrations,
        submissions,
        pool,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        // Auth (v1)
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        // Current user
        .route("/api/v1/users/me", get(users::me))
        .route("/api/v1/users/me/become-host", post(users::become_host))
        // Categories and pricing
        .route("/api/v1/categories", get(categories::list_categories))
        .route("/api/v1/pricing", get(pricing::get_pricing))
        // Registrations
        .route(
            "/api/v1/registrations",
            get(registrations::search_registrations).post(registrations::create_registration),
        )
        .route(
            "/api/v1/registrations/mine",
            get(registrations::list_my_registrations),
        )
        .route(
            "/api/v1/registrations/:id",
            get(registrations::get_registration).delete(registrations::delete_registration),
        )
        .route(
            "/api/v1/registrations/:id/publish",
            post(registrations::publish_registration),
        )
        .route(
            "/api/v1/registrations/:id/approve",
            post(registrations::approve_registration),
        )
        .route(
            "/api/v1/registrations/:id/reject",
            post(registrations::reject_registration),
        )
        .route(
            "/api/v1/registrations/:id/pause",
            post(registrations::pause_registration),
        )
        .route(
            "/api/v1/registrations/:id/resume",
            post(registrations::resume_registration),
        )
        .route(
            "/api/v1/registrations/:id/featured",
            put(registrations::set_featured),
        )
        // Submissions
        .route(
            "/api/v1/registrations/:id/submissions",
            get(submissions::list_submissions).post(submissions::create_submission),
        )
        .route(
            "/api/v1/submissions/:id/status",
            put(submissions::set_submission_status),
        )
        .route(
            "/api/v1/submissions/:id",
            delete(submissions::delete_submission),
        )
        // Admin
        .route("/api/v1/admin/users", get(admin::list_users))
        .route("/api/v1/admin/users/:id/role", put(admin::set_user_role))
        .route("/api/v1/admin/categories", put(admin::upsert_category))
        .route("/api/v1/admin/stats", get(admin::get_admin_stats));

    // Public operational routes (no authentication)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
