use std::path::Path;

use villagetrace_types::errors::AppError;

pub(crate) async fn read_to_string(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes `contents` to `path`, creating the parent directory if needed.
pub(crate) async fn write(path: &Path, contents: &str) -> Result<(), AppError> {
    let io_error = |source| AppError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(io_error)?;
    }
    tokio::fs::write(path, contents).await.map_err(io_error)
}
