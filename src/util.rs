//! Small file-system helpers shared across modules.

/// What: Check whether a path exists.
///
/// Inputs:
/// - `path`: File or directory path
///
/// Output:
/// - `true` when the path exists; permission or I/O errors count as absent
pub async fn exists(path: &str) -> bool {
    match tokio::fs::try_exists(path).await {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!(path, error = %e, "existence check failed");
            false
        }
    }
}
