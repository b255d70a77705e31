//! Avatar uploads to an external image host.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::ClientError;

/// imgbb upload endpoint.
pub const IMGBB_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

/// A picked file, before upload.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// An uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedImage {
    pub url: String,
    /// Host-specific handle for removal, when the host returns one.
    pub delete_url: Option<String>,
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &AvatarUpload) -> Result<HostedImage, ClientError>;

    /// Best-effort removal of an image nothing will reference.
    async fn discard(&self, image: &HostedImage) -> Result<(), ClientError>;
}

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    data: ImgbbImage,
}

#[derive(Debug, Deserialize)]
struct ImgbbImage {
    display_url: String,
    #[serde(default)]
    delete_url: Option<String>,
}

/// [`ImageHost`] for imgbb.
pub struct ImgbbHost {
    client: reqwest::Client,
    endpoint: String,
    key: String,
}

impl ImgbbHost {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), IMGBB_UPLOAD_URL, key)
    }

    /// Reuse a client, or point at a different endpoint.
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            key: key.into(),
        }
    }

    /// Read the API key from `IMAGE_HOST_KEY`.
    pub fn from_env() -> Result<Self, ClientError> {
        std::env::var("IMAGE_HOST_KEY")
            .map(Self::new)
            .map_err(|_| ClientError::Config("IMAGE_HOST_KEY must be set".to_string()))
    }
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, image: &AvatarUpload) -> Result<HostedImage, ClientError> {
        let mut part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
        if let Some(content_type) = &image.content_type {
            part = part.mime_str(content_type)?;
        }

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.key.as_str())])
            .multipart(Form::new().part("image", part))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                code: "IMAGE_UPLOAD_FAILED".to_string(),
                message: body,
            });
        }

        let parsed: ImgbbResponse = response.json().await?;
        tracing::debug!(url = %parsed.data.display_url, "Image uploaded");
        Ok(HostedImage {
            url: parsed.data.display_url,
            delete_url: parsed.data.delete_url,
        })
    }

    async fn discard(&self, image: &HostedImage) -> Result<(), ClientError> {
        // imgbb only offers removal through its web page.
        tracing::warn!(
            url = %image.url,
            delete_url = image.delete_url.as_deref().unwrap_or("-"),
            "Orphaned image left on host",
        );
        Ok(())
    }
}
