use crate::shared::error::VisualizerError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Security
/// Uses `symlink_metadata()` so the check applies to the link itself,
/// not to the file it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "configuration file")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a text file after running the regular-file and size checks.
///
/// Every failure is reported as [`VisualizerError::FileUnreadable`] so callers
/// can tell an unreadable input apart from malformed content.
pub fn safe_read_to_string(path: &Path, file_description: &str) -> Result<String> {
    validate_regular_file(path, file_description).map_err(|e| VisualizerError::FileUnreadable {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    fs::read_to_string(path).map_err(|e| {
        VisualizerError::FileUnreadable {
            path: path.to_path_buf(),
            details: format!("Failed to read {}: {}", file_description, e),
        }
        .into()
    })
}
