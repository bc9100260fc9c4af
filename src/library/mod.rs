pub mod download;
pub mod sort;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use download::save_download;
pub use sort::{SortConfig, SortDirection, SortKey};

use crate::{
    http::{ApiError, MediaApi},
    model::MediaItem,
};

pub const LOAD_FAILED: &str = "Something went wrong. Couldn't load the media.";
pub const DOWNLOAD_FAILED: &str = "Download failed.";
pub const DELETE_FAILED: &str = "Delete failed.";

/// What a fetch should ask the backend for, tagged with the generation it
/// was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    List { generation: u64 },
    Search { generation: u64, query: String },
}

impl FetchRequest {
    pub fn generation(&self) -> u64 {
        match self {
            FetchRequest::List { generation } | FetchRequest::Search { generation, .. } => {
                *generation
            }
        }
    }

    pub async fn execute(
        &self,
        api: &dyn MediaApi,
        token: &str,
    ) -> Result<Vec<MediaItem>, ApiError> {
        match self {
            FetchRequest::List { .. } => api.list_media(token).await,
            FetchRequest::Search { query, .. } => api.search_media(token, query).await,
        }
    }
}

/// Client-side copy of the user's library plus the state of the table that
/// shows it.
#[derive(Debug, Clone, Default)]
pub struct MediaTable {
    items: Vec<MediaItem>,
    sort: SortConfig,
    query: String,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
    generation: u64,
}

impl MediaTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sorted(&self) -> Vec<&MediaItem> {
        self.sort.apply(&self.items)
    }

    pub fn request_sort(&mut self, key: SortKey) {
        self.sort = self.sort.toggled(key);
    }

    /// Starts a fetch for the current query. Any result still outstanding
    /// from an earlier fetch becomes stale.
    pub fn begin_fetch(&mut self) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        if self.query.is_empty() {
            FetchRequest::List {
                generation: self.generation,
            }
        } else {
            FetchRequest::Search {
                generation: self.generation,
                query: self.query.clone(),
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> FetchRequest {
        self.query = query.into();
        self.begin_fetch()
    }

    /// Applies a fetch result. Returns `false` when the result was stale and
    /// got dropped.
    pub fn finish_fetch(
        &mut self,
        generation: u64,
        result: Result<Vec<MediaItem>, ApiError>,
    ) -> bool {
        if generation != self.generation {
            debug!(
                "Dropping stale fetch result (generation {}, latest {})",
                generation, self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(e) => {
                debug!("Media fetch failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        true
    }

    pub fn finish_delete(&mut self, title: &str, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                self.items.retain(|item| item.title != title);
                self.error = None;
                self.notice = Some(format!("Deleted {title}"));
            }
            Err(e) => {
                debug!("Delete of '{}' failed: {}", title, e);
                self.notice = None;
                self.error = Some(DELETE_FAILED.to_string());
            }
        }
    }

    pub fn finish_download(&mut self, title: &str, result: Result<PathBuf, ApiError>) {
        match result {
            Ok(path) => {
                self.error = None;
                self.notice = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                debug!("Download of '{}' failed: {}", title, e);
                self.notice = None;
                self.error = Some(DOWNLOAD_FAILED.to_string());
            }
        }
    }

    /// Record shown at `index` of the sorted view.
    pub fn activate(&self, index: usize) -> Option<MediaItem> {
        self.sorted().get(index).map(|item| (*item).clone())
    }

    pub async fn refresh(&mut self, api: &dyn MediaApi, token: &str) -> bool {
        let request = self.begin_fetch();
        let result = request.execute(api, token).await;
        self.finish_fetch(request.generation(), result)
    }

    pub async fn search(&mut self, api: &dyn MediaApi, token: &str, query: &str) -> bool {
        let request = self.set_query(query);
        let result = request.execute(api, token).await;
        self.finish_fetch(request.generation(), result)
    }

    pub async fn delete(&mut self, api: &dyn MediaApi, token: &str, title: &str) {
        let result = api.delete_media(token, title).await;
        self.finish_delete(title, result);
    }

    pub async fn download(&mut self, api: &dyn MediaApi, token: &str, title: &str, dir: &Path) {
        let result = download_to(api, token, title, dir).await;
        self.finish_download(title, result);
    }
}

pub async fn download_to(
    api: &dyn MediaApi,
    token: &str,
    title: &str,
    dir: &Path,
) -> Result<PathBuf, ApiError> {
    let bytes = api.download_media(token, title).await?;
    save_download(dir, title, &bytes).await
}
