use futures::future::try_join_all;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{CreateProjectMeta, NewProjectImage, ProjectWithImages},
    repository::RepositoryState,
    storage::StorageState,
};

/// ImageFile
///
/// One image from the multipart create-project request: the original filename
/// (used only to derive the object key's extension), the declared MIME type,
/// and the raw bytes.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// UploadError
///
/// Failure taxonomy of the create-project workflow. `Rejected` is caught before
/// any remote call; the others carry the failing step so the handler can log a
/// useful message while the client still sees a single generic failure.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Rejected(&'static str),
    #[error("project insert failed: {0}")]
    ProjectInsert(sqlx::Error),
    #[error("image {index} failed: {reason}")]
    ImageStep { index: usize, reason: String },
}

/// Derives the storage object key for one uploaded file:
/// `{user_id}/{project_id}/{timestamp}-{index}.{ext}`. A filename without an
/// extension yields a key with no extension segment; this is accepted as-is.
fn storage_key(
    user_id: Uuid,
    project_id: Uuid,
    stamp_millis: i64,
    index: usize,
    filename: &str,
) -> String {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(std::ffi::OsStr::to_str);
    match extension {
        Some(ext) => format!("{user_id}/{project_id}/{stamp_millis}-{index}.{ext}"),
        None => format!("{user_id}/{project_id}/{stamp_millis}-{index}"),
    }
}

/// create_project_with_images
///
/// The admin panel's project-creation workflow:
///
/// 1. Reject an empty title or an empty file list before any remote call.
/// 2. Insert the project row. A failure here fails the whole operation; no
///    cleanup is needed because nothing else exists yet.
/// 3. For each file, an independent task derives the object key, uploads the
///    bytes, and inserts one image-metadata row at `position = index` with
///    alt text `"{title} image {index + 1}"`. The tasks run concurrently; the
///    project insert strictly precedes every upload, but uploads have no
///    ordering guarantee relative to each other.
/// 4. If any task fails, the workflow compensates: every derived object key is
///    removed best-effort, then the project row is deleted (cascading away any
///    image rows that did land). The first failure surfaces to the caller, and
///    no orphan project survives a partial upload.
///
/// On success the created project is returned with its images, each carrying
/// its resolved public URL.
pub async fn create_project_with_images(
    repo: &RepositoryState,
    storage: &StorageState,
    user_id: Uuid,
    meta: CreateProjectMeta,
    files: Vec<ImageFile>,
) -> Result<ProjectWithImages, UploadError> {
    if meta.title.trim().is_empty() {
        return Err(UploadError::Rejected("title must not be empty"));
    }
    if files.is_empty() {
        return Err(UploadError::Rejected("at least one image is required"));
    }

    let title = meta.title.clone();
    let project = repo
        .create_project(meta, user_id)
        .await
        .map_err(UploadError::ProjectInsert)?;

    let stamp_millis = chrono::Utc::now().timestamp_millis();
    let keys: Vec<String> = files
        .iter()
        .enumerate()
        .map(|(idx, f)| storage_key(user_id, project.id, stamp_millis, idx, &f.filename))
        .collect();

    let tasks = files.into_iter().zip(keys.iter()).enumerate().map(
        |(idx, (file, key))| {
            let repo = repo.clone();
            let storage = storage.clone();
            let key = key.clone();
            let alt = format!("{} image {}", title, idx + 1);
            let project_id = project.id;
            async move {
                storage
                    .put_object(&key, file.bytes, &file.content_type)
                    .await
                    .map_err(|reason| UploadError::ImageStep { index: idx, reason })?;

                let mut image = repo
                    .insert_project_image(NewProjectImage {
                        project_id,
                        user_id,
                        path: key.clone(),
                        alt,
                        position: idx as i32,
                    })
                    .await
                    .map_err(|e| UploadError::ImageStep {
                        index: idx,
                        reason: e.to_string(),
                    })?;

                image.url = Some(storage.public_url(&key));
                Ok::<_, UploadError>(image)
            }
        },
    );

    match try_join_all(tasks).await {
        Ok(images) => Ok(ProjectWithImages::new(project, images)),
        Err(first_failure) => {
            // Compensation: undo the partial state so the admin can simply retry.
            // Object removal is best-effort; keys that were never uploaded just
            // produce a harmless not-found.
            for key in &keys {
                if let Err(e) = storage.remove_object(key).await {
                    tracing::warn!("cleanup: could not remove {}: {}", key, e);
                }
            }
            if !repo.delete_project(project.id, user_id).await {
                tracing::error!(
                    "cleanup: could not delete project {} after failed upload",
                    project.id
                );
            }
            Err(first_failure)
        }
    }
}
