pub mod endpoints;
pub mod error;

use async_trait::async_trait;
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

pub use endpoints::Endpoints;
pub use error::ApiError;

use crate::model::{AccessToken, Credentials, MediaItem, UploadFile, User, Welcome};

/// Multipart field every uploaded file is attached under.
pub const UPLOAD_FIELD: &str = "file";

/// The backend as seen by the client. `ApiService` talks HTTP; tests swap in
/// fakes.
#[async_trait]
pub trait MediaApi: Send + Sync {
    async fn welcome(&self) -> Result<String, ApiError>;
    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError>;
    async fn register(&self, credentials: &Credentials) -> Result<String, ApiError>;
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;
    async fn list_media(&self, token: &str) -> Result<Vec<MediaItem>, ApiError>;
    async fn search_media(&self, token: &str, query: &str) -> Result<Vec<MediaItem>, ApiError>;
    async fn download_media(&self, token: &str, title: &str) -> Result<Vec<u8>, ApiError>;
    async fn delete_media(&self, token: &str, title: &str) -> Result<(), ApiError>;
    async fn upload_media(&self, token: &str, files: Vec<UploadFile>) -> Result<(), ApiError>;
}

pub struct ApiService {
    client: Client,
    endpoints: Endpoints,
}

impl ApiService {
    pub fn new(endpoints: Endpoints) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let err = ApiError::status(status.as_u16(), &body);
        debug!("Request failed with {}: {}", status, err);
        Err(err)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    fn access_token(body: AccessToken) -> Result<String, ApiError> {
        let token = body.access_token.trim();
        if token.is_empty() {
            return Err(ApiError::Decode("empty access token".into()));
        }
        Ok(token.to_string())
    }
}

#[async_trait]
impl MediaApi for ApiService {
    async fn welcome(&self) -> Result<String, ApiError> {
        let response = self.client.get(self.endpoints.welcome()).send().await?;
        let body: Welcome = Self::json(response).await?;
        Ok(body.message)
    }

    async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let form = [
            ("grant_type", ""),
            ("username", credentials.email.as_str()),
            ("password", credentials.password.as_str()),
            ("scope", ""),
            ("client_id", ""),
            ("client_secret", ""),
        ];
        let response = self
            .client
            .post(self.endpoints.token())
            .form(&form)
            .send()
            .await?;
        let token = Self::access_token(Self::json(response).await?)?;
        info!("Logged in as {}", credentials.email);
        Ok(token)
    }

    async fn register(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoints.users())
            .json(credentials)
            .send()
            .await?;
        let token = Self::access_token(Self::json(response).await?)?;
        info!("Registered {}", credentials.email);
        Ok(token)
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .client
            .get(self.endpoints.current_user())
            .bearer_auth(token)
            .send()
            .await?;
        let user: User = Self::json(response).await?;
        debug!("Session belongs to {}", user.email);
        Ok(user)
    }

    async fn list_media(&self, token: &str) -> Result<Vec<MediaItem>, ApiError> {
        let response = self
            .client
            .get(self.endpoints.media_list())
            .bearer_auth(token)
            .send()
            .await?;
        let items: Vec<MediaItem> = Self::json(response).await?;
        debug!("Fetched {} media items", items.len());
        Ok(items)
    }

    async fn search_media(&self, token: &str, query: &str) -> Result<Vec<MediaItem>, ApiError> {
        let response = self
            .client
            .get(self.endpoints.media_search(query))
            .bearer_auth(token)
            .send()
            .await?;
        let items: Vec<MediaItem> = Self::json(response).await?;
        debug!("Search '{}' matched {} items", query, items.len());
        Ok(items)
    }

    async fn download_media(&self, token: &str, title: &str) -> Result<Vec<u8>, ApiError> {
        let url = self
            .endpoints
            .download(title)
            .ok_or_else(|| ApiError::InvalidTitle(title.to_string()))?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await?;
        let bytes = Self::check(response).await?.bytes().await?;
        debug!("Downloaded '{}' ({} bytes)", title, bytes.len());
        Ok(bytes.to_vec())
    }

    async fn delete_media(&self, token: &str, title: &str) -> Result<(), ApiError> {
        let url = self
            .endpoints
            .delete(title)
            .ok_or_else(|| ApiError::InvalidTitle(title.to_string()))?;
        let response = self
            .client
            .delete(url)
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;
        info!("Deleted '{}'", title);
        Ok(())
    }

    async fn upload_media(&self, token: &str, files: Vec<UploadFile>) -> Result<(), ApiError> {
        let count = files.len();
        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part(UPLOAD_FIELD, Part::bytes(file.bytes).file_name(file.name))
        });

        let response = self
            .client
            .post(self.endpoints.upload())
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        match Self::check(response).await {
            Ok(_) => {
                info!("Uploaded {} file(s)", count);
                Ok(())
            }
            Err(e) => {
                warn!("Upload of {} file(s) rejected: {}", count, e);
                Err(e)
            }
        }
    }
}
