use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Admin Router Module
///
/// Defines the session-gated routes of the admin panel. The entire router is
/// wrapped in the auth middleware layer in `create_router`, so every handler
/// here receives a validated `AuthUser`; requests without a session are
/// rejected with 401 before any handler runs (the client treats that as its
/// redirect-to-login signal).
///
/// All project operations are additionally owner-scoped in the repository
/// queries, so one signed-in user can never touch another's records.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/me
        // Session introspection: who is signed in. The login page uses a 200 here
        // as its redirect-into-admin signal.
        .route("/me", get(handlers::get_me))
        // GET /admin/projects
        // Lists ALL of the owner's projects with nested images, including drafts
        // (`is_published = false`), for the management view.
        //
        // POST /admin/projects
        // Multipart create: project fields plus the image files. Runs the
        // compensating upload workflow.
        .route(
            "/projects",
            get(handlers::get_admin_projects).post(handlers::create_project),
        )
        // PUT /admin/projects/{id}/publish
        // Publishes or hides one project; body is a JSON boolean.
        .route("/projects/{id}/publish", put(handlers::set_publish_state))
        // DELETE /admin/projects/{id}
        // Removes the stored files, then the project row (images cascade away).
        .route(
            "/projects/{id}",
            axum::routing::delete(handlers::delete_project),
        )
}
