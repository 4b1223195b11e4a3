use crate::{
    AppState,
    auth::AuthUser,
    content::{self, SiteContent},
    models::{
        AuthTokens, ContactRequest, ContactSubmission, CreateProjectMeta, LoginRequest, Project,
        ProjectWithImages, SignupRequest, User,
    },
    storage::StorageState,
    uploads::{self, ImageFile, UploadError},
};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// SupabaseAuthResponse
///
/// Minimal struct to deserialize the response from the external Supabase
/// /auth/v1/signup endpoint, specifically capturing the new user's UUID.
#[derive(Deserialize)]
struct SupabaseAuthResponse {
    id: Uuid,
}

/// The uniform user-facing failure message for remote errors. The client is
/// never told which step failed.
const CONTACT_FAILURE: &str = "Please try again or contact me directly via email.";

type ErrorBody = Json<serde_json::Value>;

fn error_body(message: impl Into<String>) -> ErrorBody {
    Json(serde_json::json!({ "error": message.into() }))
}

/// Fills in the public-access URL for every image in a listing before it is
/// handed to a client.
fn resolve_image_urls(storage: &StorageState, projects: &mut [ProjectWithImages]) {
    for project in projects.iter_mut() {
        for image in project.images.iter_mut() {
            image.url = Some(storage.public_url(&image.path));
        }
    }
}

// --- Public Site Handlers ---

/// get_site_content
///
/// [Public Route] The landing page's static sections, in display order.
#[utoipa::path(
    get,
    path = "/content",
    responses((status = 200, description = "Site sections", body = SiteContent))
)]
pub async fn get_site_content() -> Json<SiteContent> {
    Json(content::site_content())
}

/// get_portfolio
///
/// [Public Route] Published portfolio projects with their images nested, newest
/// first. The repository enforces `is_published = true` unconditionally.
#[utoipa::path(
    get,
    path = "/portfolio",
    responses((status = 200, description = "Published projects", body = [ProjectWithImages]))
)]
pub async fn get_portfolio(State(state): State<AppState>) -> Json<Vec<ProjectWithImages>> {
    let mut projects = state.repo.published_projects().await;
    resolve_image_urls(&state.storage, &mut projects);
    Json(projects)
}

/// submit_contact
///
/// [Public Route] Contact form intake. Fields are trimmed, then validated;
/// invalid submissions never reach the persistence call. On success the row is
/// inserted and the `send-contact-email` function is invoked with the same
/// payload. If either remote step fails the whole submission reports failure
/// with one generic message, even when the row was already persisted — there is
/// deliberately no compensating deletion here.
#[utoipa::path(
    post,
    path = "/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Submission stored and notification sent", body = ContactSubmission),
        (status = 422, description = "Validation failure"),
        (status = 500, description = "Remote failure")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactSubmission>), (StatusCode, ErrorBody)> {
    let submission = payload.trimmed();

    if let Err(errors) = submission.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "errors": errors })),
        ));
    }

    let stored = state
        .repo
        .insert_contact_submission(submission.clone())
        .await
        .map_err(|e| {
            tracing::error!("contact insert failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(CONTACT_FAILURE))
        })?;

    state
        .notifier
        .send_contact_email(&submission)
        .await
        .map_err(|e| {
            tracing::error!("send-contact-email failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_body(CONTACT_FAILURE))
        })?;

    Ok((StatusCode::CREATED, Json(stored)))
}

// --- Auth Handlers ---

/// signup
///
/// [Public Route] Handles initial account creation via the external Supabase
/// Auth service.
///
/// *Flow*: Calls Supabase's signup endpoint, retrieves the `auth.users.id`
/// (UUID), and then uses that ID to create the corresponding record in the
/// application's local `public.profiles` table. This keeps primary keys
/// synchronized between the external Auth system and the local schema.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses((status = 200, description = "Registered", body = User))
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<User>, StatusCode> {
    let client = reqwest::Client::new();
    let auth_url = format!("{}/auth/v1/signup", state.config.supabase_url);

    let response = client
        .post(auth_url)
        .header("apikey", &state.config.supabase_anon_key)
        .header("Content-Type", "application/json")
        .json(&serde_json::json!({ "email": payload.email, "password": payload.password }))
        .send()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !response.status().is_success() {
        // Supabase rejected the user (e.g., email already exists, weak password).
        return Err(StatusCode::BAD_REQUEST);
    }

    let supabase_user = response
        .json::<SupabaseAuthResponse>()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let created = state
        .repo
        .create_user(User {
            id: supabase_user.id,
            email: payload.email,
        })
        .await
        .map_err(|e| {
            tracing::error!("profile mirror insert failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(created))
}

/// login
///
/// [Public Route] Password grant against the external Auth service. The session
/// tokens are forwarded to the client, which presents the access token as a
/// Bearer header on admin routes.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session tokens", body = AuthTokens),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthTokens>, StatusCode> {
    let client = reqwest::Client::new();
    let token_url = format!(
        "{}/auth/v1/token?grant_type=password",
        state.config.supabase_url
    );

    let response = client
        .post(token_url)
        .header("apikey", &state.config.supabase_anon_key)
        .header("Content-Type", "application/json")
        .json(&serde_json::json!({ "email": payload.email, "password": payload.password }))
        .send()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !response.status().is_success() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let tokens = response
        .json::<AuthTokens>()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(tokens))
}

/// get_me
///
/// [Admin Route] The resolved session profile. A 401 here is the client's
/// signal to redirect to the login page; a 200 on the login page is its signal
/// to redirect into the admin panel.
#[utoipa::path(
    get,
    path = "/admin/me",
    responses(
        (status = 200, description = "Session profile", body = User),
        (status = 401, description = "No session")
    )
)]
pub async fn get_me(AuthUser { id, email }: AuthUser) -> Json<User> {
    Json(User { id, email })
}

// --- Admin Project Handlers ---

/// get_admin_projects
///
/// [Admin Route] The owner's projects with nested images, published or not,
/// newest first. No pagination; the total row count is assumed small.
#[utoipa::path(
    get,
    path = "/admin/projects",
    responses((status = 200, description = "All of the owner's projects", body = [ProjectWithImages]))
)]
pub async fn get_admin_projects(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<ProjectWithImages>> {
    let mut projects = state.repo.projects_for_user(id).await;
    resolve_image_urls(&state.storage, &mut projects);
    Json(projects)
}

/// create_project
///
/// [Admin Route] Multipart project creation: text fields (`title`,
/// `description`, `github_url`, `live_url`, `is_published`) plus one or more
/// `images` file fields. Delegates to the upload workflow, which stores every
/// file and its metadata row concurrently and compensates on partial failure.
#[utoipa::path(
    post,
    path = "/admin/projects",
    responses(
        (status = 201, description = "Created", body = ProjectWithImages),
        (status = 422, description = "Missing title or images"),
        (status = 500, description = "Upload failed, partial state rolled back")
    )
)]
pub async fn create_project(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProjectWithImages>), (StatusCode, ErrorBody)> {
    let mut meta = CreateProjectMeta::default();
    let mut files: Vec<ImageFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, error_body("malformed multipart body")))?
    {
        let read_err = |_| (StatusCode::BAD_REQUEST, error_body("malformed multipart body"));
        match field.name() {
            Some("title") => meta.title = field.text().await.map_err(read_err)?,
            Some("description") => meta.description = field.text().await.map_err(read_err)?,
            Some("github_url") => {
                let value = field.text().await.map_err(read_err)?;
                meta.github_url = (!value.trim().is_empty()).then(|| value.trim().to_string());
            }
            Some("live_url") => {
                let value = field.text().await.map_err(read_err)?;
                meta.live_url = (!value.trim().is_empty()).then(|| value.trim().to_string());
            }
            Some("is_published") => {
                let value = field.text().await.map_err(read_err)?;
                meta.is_published = value == "true" || value == "on" || value == "1";
            }
            Some("images") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(read_err)?;
                files.push(ImageFile {
                    filename,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    match uploads::create_project_with_images(&state.repo, &state.storage, user_id, meta, files)
        .await
    {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(UploadError::Rejected(reason)) => {
            Err((StatusCode::UNPROCESSABLE_ENTITY, error_body(reason)))
        }
        Err(e) => {
            tracing::error!("create_project failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                error_body("Could not create project"),
            ))
        }
    }
}

/// set_publish_state
///
/// [Admin Route] Publishes or hides a project. The body is a bare JSON boolean.
///
/// *Authorization*: the repository folds an **Owner-Only** check into the
/// update, so a project that exists but belongs to someone else reads as 404.
#[utoipa::path(
    put,
    path = "/admin/projects/{id}/publish",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = bool,
    responses(
        (status = 200, description = "Updated", body = Project),
        (status = 404, description = "Not Found or Not Yours")
    )
)]
pub async fn set_publish_state(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(published): Json<bool>,
) -> Result<Json<Project>, StatusCode> {
    match state.repo.set_published(id, user_id, published).await {
        Some(project) => Ok(Json(project)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// delete_project
///
/// [Admin Route] Deletes a project after removing each of its stored files
/// individually. File removal is best-effort: a failed removal is logged and
/// skipped, never retried, and does not block the row delete. The image rows
/// disappear with the project via the FK cascade.
#[utoipa::path(
    delete,
    path = "/admin/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found or Not Yours")
    )
)]
pub async fn delete_project(
    AuthUser { id: user_id, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    let paths = state.repo.image_paths(id, user_id).await;
    for path in &paths {
        if let Err(e) = state.storage.remove_object(path).await {
            tracing::warn!("could not remove stored file {}: {}", path, e);
        }
    }

    if state.repo.delete_project(id, user_id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
