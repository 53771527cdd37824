//! Remote API contracts and the HTTP implementation.
//!
//! The [`RemoteApi`] trait mirrors the backend endpoints the client consumes.
//! Production code uses [`HttpApi`]; tests substitute in-memory fakes.

use crate::error::{ClientError, Result};
use pictrail_engine::{CollectionId, MediaRef, PhotoId, RemotePhoto};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitleBody<'a> {
    title: &'a str,
}

/// One row of the remote collection listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCollectionSummary {
    pub id: CollectionId,
    #[serde(default)]
    pub title: Option<String>,
    /// Cover reference declared by the server, if any
    #[serde(default)]
    pub cover: Option<String>,
}

/// One row of the remote photo listing.
///
/// The backend returns either a resolvable image URL or the image bytes embedded
/// as base64, never both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePhotoRow {
    pub id: PhotoId,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Embedded image bytes, base64-encoded
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl RemotePhotoRow {
    /// Convert into the engine's remote photo representation.
    pub fn into_remote_photo(self) -> RemotePhoto {
        let media = match (self.image_url, self.image_data) {
            (Some(url), _) => MediaRef::Uri(url),
            (None, Some(data)) => MediaRef::Embedded(data),
            (None, None) => MediaRef::Uri(String::new()),
        };
        RemotePhoto {
            id: self.id,
            media,
            title: self.title,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The backend endpoints consumed by the client.
#[allow(async_fn_in_trait)]
pub trait RemoteApi {
    async fn login(&self, username: &str, password: &str) -> Result<String>;
    async fn register(&self, username: &str, password: &str) -> Result<()>;
    async fn list_collections(&self, token: &str) -> Result<Vec<RemoteCollectionSummary>>;
    async fn list_photos(
        &self,
        token: &str,
        collection_id: CollectionId,
    ) -> Result<Vec<RemotePhotoRow>>;
    async fn create_collection(&self, token: &str, title: &str)
        -> Result<RemoteCollectionSummary>;
    async fn upload_photo(
        &self,
        token: &str,
        image: Vec<u8>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        collection_id: CollectionId,
    ) -> Result<()>;
    async fn delete_photo(&self, token: &str, id: PhotoId) -> Result<()>;
    async fn delete_collection(&self, token: &str, id: CollectionId) -> Result<()>;
    async fn rename_collection(&self, token: &str, id: CollectionId, title: &str) -> Result<()>;
}

/// [`RemoteApi`] over HTTP via reqwest.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpApi {
    /// Create an API client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Map auth rejections to [`ClientError::Auth`], other failures to `Network`.
    fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Auth),
            _ => Ok(response.error_for_status()?),
        }
    }
}

impl RemoteApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url("login"))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        let body: LoginResponse = Self::check(response)?.json().await?;
        Ok(body.token)
    }

    async fn register(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("register"))
            .json(&CredentialsBody { username, password })
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn list_collections(&self, token: &str) -> Result<Vec<RemoteCollectionSummary>> {
        let response = self
            .http
            .get(self.url("collections"))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn list_photos(
        &self,
        token: &str,
        collection_id: CollectionId,
    ) -> Result<Vec<RemotePhotoRow>> {
        let response = self
            .http
            .get(self.url("photos"))
            .query(&[("collectionId", collection_id)])
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn create_collection(
        &self,
        token: &str,
        title: &str,
    ) -> Result<RemoteCollectionSummary> {
        let response = self
            .http
            .post(self.url("collections"))
            .bearer_auth(token)
            .json(&TitleBody { title })
            .send()
            .await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn upload_photo(
        &self,
        token: &str,
        image: Vec<u8>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        collection_id: CollectionId,
    ) -> Result<()> {
        let part = reqwest::multipart::Part::bytes(image)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("latitude", latitude.unwrap_or_default().to_string())
            .text("longitude", longitude.unwrap_or_default().to_string())
            .text("collectionId", collection_id.to_string());

        let response = self
            .http
            .post(self.url("photos"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn delete_photo(&self, token: &str, id: PhotoId) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("photos/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn delete_collection(&self, token: &str, id: CollectionId) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("collections/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn rename_collection(&self, token: &str, id: CollectionId, title: &str) -> Result<()> {
        let response = self
            .http
            .put(self.url(&format!("collections/{id}")))
            .bearer_auth(token)
            .json(&TitleBody { title })
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }
}
