use crate::models::{
    ContactRequest, ContactSubmission, CreateProjectMeta, NewProjectImage, Project, ProjectImage,
    ProjectWithImages, User,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Defines the abstract contract for all persistence operations. This is the core
/// of the Repository Abstraction pattern, allowing the handlers to interact with
/// the data layer without knowing the specific implementation (Postgres, Mock, etc.).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn Repository>`) safely shareable and usable across Axum's asynchronous
/// task boundaries.
///
/// Error policy: read paths degrade to empty/`None`/`false` with the failure
/// logged, keeping the interface responsive. The write paths consumed by the
/// upload workflow return `Result`, because the workflow must know whether the
/// project insert succeeded before touching storage, and must compensate when a
/// later step fails.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Portfolio Retrieval ---
    // Public listing: published projects only, newest first, images nested in
    // position order. Produced by a single query for a consistent snapshot.
    async fn published_projects(&self) -> Vec<ProjectWithImages>;
    // Admin listing: all of the owner's projects, published or not.
    async fn projects_for_user(&self, user_id: Uuid) -> Vec<ProjectWithImages>;

    // --- Project Mutation ---
    async fn create_project(
        &self,
        meta: CreateProjectMeta,
        user_id: Uuid,
    ) -> Result<Project, sqlx::Error>;
    async fn insert_project_image(
        &self,
        image: NewProjectImage,
    ) -> Result<ProjectImage, sqlx::Error>;
    // Owner-Only: flips `is_published` only if `user_id` matches the project owner.
    async fn set_published(
        &self,
        id: Uuid,
        user_id: Uuid,
        published: bool,
    ) -> Option<Project>;
    // Object keys of a project's stored files, for pre-delete storage cleanup.
    async fn image_paths(&self, project_id: Uuid, user_id: Uuid) -> Vec<String>;
    // Owner-Only row delete; the project_images rows go with it via FK cascade.
    async fn delete_project(&self, id: Uuid, user_id: Uuid) -> bool;

    // --- Contact Intake ---
    async fn insert_contact_submission(
        &self,
        req: ContactRequest,
    ) -> Result<ContactSubmission, sqlx::Error>;

    // --- User/Auth ---
    async fn get_user(&self, id: Uuid) -> Option<User>;
    async fn create_user(&self, user: User) -> Result<User, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer access across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One row of the project/image LEFT JOIN. The image columns are nullable
/// because a project may have no images yet (e.g., mid-cleanup after a failed
/// upload).
#[derive(FromRow)]
struct PortfolioRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    github_url: Option<String>,
    live_url: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    image_id: Option<Uuid>,
    image_path: Option<String>,
    image_alt: Option<String>,
    image_position: Option<i32>,
}

const PORTFOLIO_SELECT: &str = r#"
    SELECT
        p.id, p.user_id, p.title, p.description,
        p.github_url, p.live_url, p.is_published, p.created_at,
        i.id       AS image_id,
        i.path     AS image_path,
        i.alt      AS image_alt,
        i.position AS image_position
    FROM projects p
    LEFT JOIN project_images i ON i.project_id = p.id
"#;

/// Groups the flat join rows into nested `ProjectWithImages`. Rows for one
/// project are adjacent because the queries order by `p.created_at DESC, p.id`.
fn fold_portfolio_rows(rows: Vec<PortfolioRow>) -> Vec<ProjectWithImages> {
    let mut out: Vec<ProjectWithImages> = Vec::new();
    for row in rows {
        if out.last().map(|p| p.id) != Some(row.id) {
            out.push(ProjectWithImages {
                id: row.id,
                user_id: row.user_id,
                title: row.title.clone(),
                description: row.description.clone(),
                github_url: row.github_url.clone(),
                live_url: row.live_url.clone(),
                is_published: row.is_published,
                created_at: row.created_at,
                images: Vec::new(),
            });
        }
        if let (Some(image_id), Some(path), Some(alt), Some(position)) =
            (row.image_id, row.image_path, row.image_alt, row.image_position)
        {
            if let Some(current) = out.last_mut() {
                current.images.push(ProjectImage {
                    id: image_id,
                    project_id: row.id,
                    user_id: row.user_id,
                    path,
                    alt,
                    position,
                    url: None,
                });
            }
        }
    }
    out
}

#[async_trait]
impl Repository for PostgresRepository {
    /// published_projects
    ///
    /// Public gallery query. **Security**: strictly enforces `is_published = true`
    /// so hidden work never leaks to anonymous visitors.
    async fn published_projects(&self) -> Vec<ProjectWithImages> {
        let sql = format!(
            "{PORTFOLIO_SELECT} WHERE p.is_published = true \
             ORDER BY p.created_at DESC, p.id, i.position ASC"
        );
        match sqlx::query_as::<_, PortfolioRow>(&sql)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => fold_portfolio_rows(rows),
            Err(e) => {
                tracing::error!("published_projects error: {:?}", e);
                vec![]
            }
        }
    }

    /// projects_for_user
    ///
    /// Admin listing. Owner-scoped; does *not* restrict on `is_published`.
    async fn projects_for_user(&self, user_id: Uuid) -> Vec<ProjectWithImages> {
        let sql = format!(
            "{PORTFOLIO_SELECT} WHERE p.user_id = $1 \
             ORDER BY p.created_at DESC, p.id, i.position ASC"
        );
        match sqlx::query_as::<_, PortfolioRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
        {
            Ok(rows) => fold_portfolio_rows(rows),
            Err(e) => {
                tracing::error!("projects_for_user error: {:?}", e);
                vec![]
            }
        }
    }

    /// create_project
    ///
    /// Inserts the project row. The caller (upload workflow) aborts the whole
    /// operation if this fails, before any file has been stored.
    async fn create_project(
        &self,
        meta: CreateProjectMeta,
        user_id: Uuid,
    ) -> Result<Project, sqlx::Error> {
        let new_id = Uuid::new_v4();
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, user_id, title, description, github_url, live_url, is_published, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, user_id, title, description, github_url, live_url, is_published, created_at
            "#,
        )
        .bind(new_id)
        .bind(user_id)
        .bind(meta.title)
        .bind(meta.description)
        .bind(meta.github_url)
        .bind(meta.live_url)
        .bind(meta.is_published)
        .fetch_one(&self.pool)
        .await
    }

    /// insert_project_image
    ///
    /// One metadata row per stored file, written after the upload succeeds.
    async fn insert_project_image(
        &self,
        image: NewProjectImage,
    ) -> Result<ProjectImage, sqlx::Error> {
        sqlx::query_as::<_, ProjectImage>(
            r#"
            INSERT INTO project_images (id, project_id, user_id, path, alt, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, user_id, path, alt, position
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(image.project_id)
        .bind(image.user_id)
        .bind(image.path)
        .bind(image.alt)
        .bind(image.position)
        .fetch_one(&self.pool)
        .await
    }

    /// set_published
    ///
    /// Single-field update with the **Owner-Only** check folded into the WHERE
    /// clause. `None` means the project does not exist or is not owned by the
    /// caller; prior state stays in place on failure.
    async fn set_published(&self, id: Uuid, user_id: Uuid, published: bool) -> Option<Project> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET is_published = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, github_url, live_url, is_published, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(published)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("set_published error: {:?}", e);
            None
        })
    }

    /// image_paths
    ///
    /// The stored object keys of a project, read before raw deletion so each
    /// file can be removed individually.
    async fn image_paths(&self, project_id: Uuid, user_id: Uuid) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT path FROM project_images WHERE project_id = $1 AND user_id = $2 ORDER BY position",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("image_paths error: {:?}", e);
            vec![]
        })
    }

    /// delete_project
    ///
    /// Deletes a project only if the provided `user_id` matches the project
    /// owner. Image rows are removed by the `ON DELETE CASCADE` constraint.
    async fn delete_project(&self, id: Uuid, user_id: Uuid) -> bool {
        match sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
        {
            Ok(res) => res.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_project error: {:?}", e);
                false
            }
        }
    }

    /// insert_contact_submission
    ///
    /// Write-once insert of a validated, trimmed contact inquiry. The enum
    /// selections are stored by their wire values.
    async fn insert_contact_submission(
        &self,
        req: ContactRequest,
    ) -> Result<ContactSubmission, sqlx::Error> {
        #[derive(FromRow)]
        struct Inserted {
            id: Uuid,
            created_at: DateTime<Utc>,
        }

        let inserted = sqlx::query_as::<_, Inserted>(
            r#"
            INSERT INTO contact_submissions
                (id, name, email, phone, company, service, budget, timeline, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.company)
        .bind(req.service.as_str())
        .bind(req.budget.map(|b| b.as_str()))
        .bind(req.timeline.map(|t| t.as_str()))
        .bind(&req.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(ContactSubmission {
            id: inserted.id,
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
            service: req.service,
            budget: req.budget,
            timeline: req.timeline,
            message: req.message,
            created_at: inserted.created_at,
        })
    }

    /// get_user
    ///
    /// Retrieves the profile record needed to resolve an authenticated session.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, email FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or(None)
    }

    /// create_user
    ///
    /// Creates the mirroring profile record in `public.profiles` after external
    /// auth signup succeeds.
    async fn create_user(&self, user: User) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO profiles (id, email) VALUES ($1, $2) RETURNING id, email",
        )
        .bind(user.id)
        .bind(user.email)
        .fetch_one(&self.pool)
        .await
    }
}
