use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Defines endpoints that are **unauthenticated** and accessible to any client.
/// These routes serve the marketing site's read-only data, accept contact
/// inquiries, and provide the identity gateway (signup/login) for the admin.
///
/// Security Mandate:
/// The portfolio handler must enforce `is_published = true` at the Repository
/// level. This prevents anonymous viewing of hidden or draft projects.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // A simple, unauthenticated endpoint used for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /content
        // The landing page's static sections (hero, about, services, testimonials,
        // contact CTA) in their fixed display order.
        .route("/content", get(handlers::get_site_content))
        // GET /portfolio
        // Published projects with nested images, newest first. The `is_published`
        // restriction is enforced in the repository query.
        .route("/portfolio", get(handlers::get_portfolio))
        // POST /contact
        // Contact form intake: validate, persist, then trigger the notification email.
        .route("/contact", post(handlers::submit_contact))
        // POST /auth/signup, POST /auth/login
        // Identity flow proxied to the external Auth provider.
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
}
