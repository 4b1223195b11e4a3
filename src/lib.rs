use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod content;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod repository;
pub mod storage;
pub mod uploads;

// Module for routing segregation (Public, Admin).
pub mod routes;
use auth::AuthUser; // The resolved authenticated session identity.
use routes::{admin, public};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use config::AppConfig;
pub use notify::{MockNotifier, NotifierState, SupabaseFunctionsClient};
pub use repository::{PostgresRepository, RepositoryState};
pub use storage::{MockStorageService, S3StorageClient, StorageState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the application.
/// It aggregates all API paths and data schemas that have been decorated with
/// the `#[utoipa::path]` and `#[derive(utoipa::ToSchema)]` macros.
/// The resulting JSON is served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_site_content, handlers::get_portfolio, handlers::submit_contact,
        handlers::signup, handlers::login, handlers::get_me,
        handlers::get_admin_projects, handlers::create_project,
        handlers::set_publish_state, handlers::delete_project
    ),
    components(
        schemas(
            models::Project, models::ProjectImage, models::ProjectWithImages,
            models::ContactRequest, models::ContactSubmission,
            models::ServiceCategory, models::BudgetBracket, models::TimelineBracket,
            models::SignupRequest, models::LoginRequest, models::AuthTokens, models::User,
            content::SiteContent, content::HeroSection, content::AboutSection,
            content::ServiceOffering, content::Testimonial, content::ContactCta,
        )
    ),
    tags(
        (name = "studio-portal", description = "Bin Hafiz Graphics site & admin API")
    )
)]
struct ApiDoc;

/// AppState
///
/// Implements the **Unified State Pattern**. This is the single, thread-safe, and
/// immutable container holding all essential application services and configuration.
/// The application state is shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: Abstracts database access via the PgPool connection.
    pub repo: RepositoryState,
    /// Storage Layer: Abstracts S3/MinIO access for the portfolio images.
    pub storage: StorageState,
    /// Notifier: Abstracts the contact-email function invocation.
    pub notifier: NotifierState,
    /// Configuration: The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow extractors and handlers to selectively pull
// components from the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for StorageState {
    fn from_ref(app_state: &AppState) -> StorageState {
        app_state.storage.clone()
    }
}

impl FromRef<AppState> for NotifierState {
    fn from_ref(app_state: &AppState) -> NotifierState {
        app_state.notifier.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces the session gate for the admin routes.
///
/// *Mechanism*: It attempts to extract `AuthUser` from the request. Since
/// `AuthUser` implements `FromRequestParts`, if authentication (JWT validation,
/// profile lookup) fails, the extractor immediately rejects the request with a
/// 401 Unauthorized status, preventing execution of the handler. The session is
/// validated exactly once per request, here at the router layer, rather than
/// re-derived inside every view.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and scoped
/// middleware, and registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: Serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public Routes: No middleware applied.
        .merge(public::public_routes())
        // Admin Routes: Nested under '/admin' and protected by the session gate.
        .nest(
            "/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Apply the Unified State to all routes.
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation: a unique UUID for every incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing: wraps the request/response lifecycle in a tracing
                // span that carries the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation: returns the x-request-id header to the
                // client and injects it into subsequent service calls.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation. It extracts the
/// `x-request-id` header (if present) and includes it in the structured logging
/// metadata alongside the HTTP method and URI, so every log line for a single
/// request is correlated by a unique ID.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
