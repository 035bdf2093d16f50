use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

use super::error::ensure_success;
use super::picker::image_content_type;
use super::{ObjectStorage, ServiceError};
use crate::model::LocalImage;

const SERVICE: &str = "storage service";

#[derive(Debug, Deserialize)]
struct DownloadUrl {
    url: String,
}

/// Object storage reached over HTTP.
///
/// Objects live at `{base_url}/o/{key}`, with `/` in the key percent-encoded
/// so nested keys stay one path segment. `GET .../url` on an object returns
/// `{"url": "..."}` with its durable download URL.
#[derive(Debug, Clone)]
pub struct HttpObjectStorage {
    client: Client,
    base_url: String,
}

impl HttpObjectStorage {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/o/{}", self.base_url, key.replace('/', "%2F"))
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn put_file(&self, key: &str, image: &LocalImage) -> Result<(), ServiceError> {
        let bytes = Bytes::from(tokio::fs::read(image.path()).await?);
        let content_type = image_content_type(image.path()).unwrap_or("application/octet-stream");
        debug!(key, size = bytes.len(), content_type, "storage: uploading");

        let response = self
            .client
            .put(self.object_url(key))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        ensure_success(SERVICE, response).await?;
        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .get(format!("{}/url", self.object_url(key)))
            .send()
            .await?;
        let body = ensure_success(SERVICE, response).await?.text().await?;
        let DownloadUrl { url } = serde_json::from_str(&body)?;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_url_encodes_nested_keys() {
        let storage = HttpObjectStorage::new(Client::new(), "http://store.test/");
        assert_eq!(
            storage.object_url("banners/banner_1"),
            "http://store.test/o/banners%2Fbanner_1"
        );
    }

    #[test]
    fn download_url_body_shape() {
        let parsed: DownloadUrl = serde_json::from_str(r#"{"url":"https://x/b"}"#).unwrap();
        assert_eq!(parsed.url, "https://x/b");
    }
}
