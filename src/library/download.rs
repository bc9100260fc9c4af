use std::path::{Path, PathBuf};

use tracing::info;

use crate::http::ApiError;

/// File name a download of `title` is saved under. Only the last path
/// component survives, so a title can never write outside the target dir.
pub fn file_name_for(title: &str) -> Option<String> {
    let name = Path::new(title.trim()).file_name()?.to_str()?.to_string();
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name)
}

pub async fn save_download(dir: &Path, title: &str, bytes: &[u8]) -> Result<PathBuf, ApiError> {
    let name = file_name_for(title)
        .ok_or_else(|| ApiError::File(format!("cannot save '{title}' as a file")))?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, bytes).await?;

    info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
