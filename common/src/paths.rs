//! Filesystem layout for uploaded assets.
//!
//! All uploads live under `UPLOAD_STORAGE_ROOT`:
//!
//! ```text
//! {root}/courses/course_{id}/thumbnail.{ext}
//! {root}/ebooks/{public_id}.{ext}
//! ```

use crate::config;
use std::path::PathBuf;

pub fn storage_root() -> PathBuf {
    PathBuf::from(config::upload_storage_root())
}

pub fn course_dir(course_id: i64) -> PathBuf {
    storage_root().join("courses").join(format!("course_{course_id}"))
}

pub fn course_thumbnail_path(course_id: i64, ext: &str) -> PathBuf {
    course_dir(course_id).join(format!("thumbnail.{ext}"))
}

pub fn ebook_dir() -> PathBuf {
    storage_root().join("ebooks")
}

pub fn ebook_file_path(public_id: &str, ext: &str) -> PathBuf {
    ebook_dir().join(format!("{public_id}.{ext}"))
}

/// Creates every missing ancestor of `path`. SQLite-style storage roots are
/// not created up front, so writers call this before the first write.
pub fn ensure_parent_dirs(path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
