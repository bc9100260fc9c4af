use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::ValidationError,
    http::{ApiError, MediaApi},
    model::UploadFile,
};

const UPLOAD_FAILED: &str = "Failed to upload file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The table should refetch and the dialog close.
    Completed,
    /// The dialog stays open with its selection.
    Failed,
    /// Nothing was sent.
    Skipped,
}

/// Files picked for one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<PathBuf>,
}

impl UploadBatch {
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Reads every file. One unreadable file fails the whole batch.
    pub async fn load(&self) -> Result<Vec<UploadFile>, ApiError> {
        let mut loaded = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| ApiError::File(format!("invalid file name: {}", path.display())))?
                .to_string();
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| ApiError::File(format!("{}: {}", path.display(), e)))?;
            loaded.push(UploadFile { name, bytes });
        }
        Ok(loaded)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadDialog {
    files: Vec<PathBuf>,
    loading: bool,
    error: Option<String>,
}

impl UploadDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        if !self.files.contains(&path) {
            self.files.push(path);
        }
    }

    pub fn remove_last(&mut self) -> Option<PathBuf> {
        self.files.pop()
    }

    pub fn begin_submit(&mut self) -> Option<UploadBatch> {
        if self.loading {
            return None;
        }
        if self.files.is_empty() {
            self.error = Some(ValidationError::NoFilesSelected.to_string());
            return None;
        }

        self.loading = true;
        self.error = None;
        Some(UploadBatch {
            files: self.files.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> UploadOutcome {
        self.loading = false;
        match result {
            Ok(()) => {
                self.files.clear();
                UploadOutcome::Completed
            }
            Err(e) => {
                debug!("Upload failed: {}", e);
                self.error = Some(match &e {
                    ApiError::File(message) => message.clone(),
                    other => other.detail_or(UPLOAD_FAILED),
                });
                UploadOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn MediaApi, token: &str) -> UploadOutcome {
        let Some(batch) = self.begin_submit() else {
            return UploadOutcome::Skipped;
        };
        let result = send_batch(api, token, &batch).await;
        self.finish_submit(result)
    }
}

pub async fn send_batch(api: &dyn MediaApi, token: &str, batch: &UploadBatch) -> Result<(), ApiError> {
    let files = batch.load().await?;
    api.upload_media(token, files).await
}
