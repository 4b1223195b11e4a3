use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// Represents the admin's canonical identity record stored in the `public.profiles` table.
/// This structure includes the minimal required data resolved during authentication.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    // Primary Key, also the Foreign Key to the external auth.users table.
    pub id: Uuid,
    // The user's primary identifier.
    pub email: String,
}

/// Project
///
/// A portfolio entry from the `public.projects` table. Shown on the public site
/// once `is_published` is set; mutated only by the publish toggle and deletion.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct Project {
    pub id: Uuid,
    // FK to public.profiles.id (Owner).
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    // Optional external links.
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    // Controls public visibility (enforced at the Repository layer).
    pub is_published: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// ProjectImage
///
/// One stored image belonging to a project, from the `public.project_images` table.
/// `position` defines display order within the project; it is set at upload time
/// to the file's index in the original selection and is not guaranteed unique
/// or gap-free.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct ProjectImage {
    pub id: Uuid,
    // FK to public.projects.id, ON DELETE CASCADE.
    pub project_id: Uuid,
    pub user_id: Uuid,
    // Object key within the storage bucket: `{user_id}/{project_id}/{ts}-{idx}.{ext}`.
    pub path: String,
    pub alt: String,
    pub position: i32,
    /// Public-access URL resolved from `path`. Not a database column; filled in
    /// by the storage layer before the image is returned to a client.
    #[sqlx(default)]
    pub url: Option<String>,
}

/// ProjectWithImages
///
/// API shape joining a project with its ordered images. Produced by a single
/// repository query rather than two independent fetches, so the images always
/// belong to the same snapshot as the project list.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ProjectWithImages {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub is_published: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    // Ordered by `position` ascending.
    pub images: Vec<ProjectImage>,
}

impl ProjectWithImages {
    pub fn new(project: Project, images: Vec<ProjectImage>) -> Self {
        Self {
            id: project.id,
            user_id: project.user_id,
            title: project.title,
            description: project.description,
            github_url: project.github_url,
            live_url: project.live_url,
            is_published: project.is_published,
            created_at: project.created_at,
            images,
        }
    }
}

/// --- Request Payloads (Input Schemas) ---

/// CreateProjectMeta
///
/// Text fields of the multipart project-creation request (POST /admin/projects).
/// The image files arrive in the same multipart body under the `images` field.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectMeta {
    pub title: String,
    pub description: String,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub is_published: bool,
}

/// NewProjectImage
///
/// Repository input for one image-metadata row, built by the upload workflow
/// after the corresponding file has been stored.
#[derive(Debug, Clone)]
pub struct NewProjectImage {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub path: String,
    pub alt: String,
    pub position: i32,
}

/// SignupRequest
///
/// Input payload for the signup endpoint (POST /auth/signup).
/// The password is only passed through to the external Auth provider (Supabase)
/// and never persisted or logged internally by this application.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// LoginRequest
///
/// Input payload for the password login endpoint (POST /auth/login).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// AuthTokens
///
/// The session payload returned by the external Auth provider on a successful
/// password grant, forwarded to the client as-is.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

// --- Contact Intake Schemas ---

/// ServiceCategory
///
/// The fixed set of services offered on the contact form. The wire values match
/// the site's form options exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ServiceCategory {
    LogoDesign,
    BrandIdentity,
    PrintDesign,
    DigitalDesign,
    Packaging,
    Consultation,
    Other,
}

impl ServiceCategory {
    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogoDesign => "logo-design",
            Self::BrandIdentity => "brand-identity",
            Self::PrintDesign => "print-design",
            Self::DigitalDesign => "digital-design",
            Self::Packaging => "packaging",
            Self::Consultation => "consultation",
            Self::Other => "other",
        }
    }
}

/// BudgetBracket
///
/// Optional budget range selection (Nigerian Naira brackets, as on the site).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum BudgetBracket {
    #[serde(rename = "under-50k")]
    Under50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "100k-250k")]
    From100kTo250k,
    #[serde(rename = "250k-500k")]
    From250kTo500k,
    #[serde(rename = "over-500k")]
    Over500k,
}

impl BudgetBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under50k => "under-50k",
            Self::From50kTo100k => "50k-100k",
            Self::From100kTo250k => "100k-250k",
            Self::From250kTo500k => "250k-500k",
            Self::Over500k => "over-500k",
        }
    }
}

/// TimelineBracket
///
/// Optional project timeline selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub enum TimelineBracket {
    #[serde(rename = "urgent")]
    Urgent,
    #[serde(rename = "1-2-weeks")]
    OneToTwoWeeks,
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "2-3-months")]
    TwoToThreeMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl TimelineBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::OneToTwoWeeks => "1-2-weeks",
            Self::OneMonth => "1-month",
            Self::TwoToThreeMonths => "2-3-months",
            Self::Flexible => "flexible",
        }
    }
}

/// ContactRequest
///
/// Input payload for the contact form (POST /contact). Field rules mirror the
/// site's form schema: short names, malformed emails, and thin messages are
/// rejected before any remote call is made. A missing `service` fails JSON
/// deserialization outright, which serves the same purpose.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct ContactRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: ServiceCategory,
    pub budget: Option<BudgetBracket>,
    pub timeline: Option<TimelineBracket>,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl ContactRequest {
    /// Returns a copy with all text fields trimmed and empty optional fields
    /// collapsed to `None`. Validation and persistence both operate on this
    /// form, so the stored record always holds the trimmed values.
    pub fn trimmed(&self) -> Self {
        let clean_opt = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: clean_opt(&self.phone),
            company: clean_opt(&self.company),
            service: self.service,
            budget: self.budget,
            timeline: self.timeline,
            message: self.message.trim().to_string(),
        }
    }
}

/// ContactSubmission
///
/// The persisted contact record from `public.contact_submissions`, echoed back
/// to the client on success. Write-once; there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: ServiceCategory,
    pub budget: Option<BudgetBracket>,
    pub timeline: Option<TimelineBracket>,
    pub message: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}
