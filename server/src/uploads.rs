// Logo upload handling
// Uploaded images land in the flat asset directory under a server-assigned
// unique name; the stored reference is the /uploads/<name> web path.

use std::path::Path;

use courtside_lib::services::AssetDirectory;

use crate::error::{ApiError, ApiResult};

/// Upload size limit for logo images
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "svg"];

/// Store an uploaded logo and return its asset reference
pub fn store_logo(
    assets: &AssetDirectory,
    original_name: &str,
    bytes: &[u8],
) -> ApiResult<String> {
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(ApiError::bad_request("Logo file is too large (max 5 MB)"));
    }

    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::bad_request("Only image files are allowed"));
    }

    let name = format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        extension
    );

    assets
        .write_file(&name, bytes)
        .map_err(|e| ApiError::internal(format!("Failed to store upload: {}", e)))?;

    Ok(format!("/uploads/{}", name))
}
