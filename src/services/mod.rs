//! Interfaces to the external collaborators, plus the adapters the app ships with.
//!
//! The submission workflow only sees the traits in this module. The
//! concrete adapters speak plain HTTP to the event backend and read
//! local files for the identity token and banner images.

mod error;
mod events;
mod identity;
mod picker;
mod storage;

use async_trait::async_trait;

use crate::model::{IdToken, LocalImage, NewEvent};

pub use error::ServiceError;
pub use events::HttpEventService;
pub use identity::TokenFileIdentity;
pub use picker::FilePathPicker;
pub use storage::HttpObjectStorage;

/// Supplies the current session's bearer token.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns `Ok(None)` when nobody is signed in.
    async fn id_token(&self) -> Result<Option<IdToken>, ServiceError>;
}

/// Stores uploaded files under caller-chosen keys.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads the image's bytes to `key`.
    async fn put_file(&self, key: &str, image: &LocalImage) -> Result<(), ServiceError>;

    /// Returns a durable access URL for an object previously stored at `key`.
    async fn download_url(&self, key: &str) -> Result<String, ServiceError>;
}

/// Creates event records on the backend.
#[async_trait]
pub trait EventPersistence: Send + Sync {
    async fn create_event(&self, event: &NewEvent, token: &IdToken) -> Result<(), ServiceError>;
}

/// Outcome of a media permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Outcome of launching the image picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    Cancelled,
    Selected(LocalImage),
}

/// Lets the user choose a banner image from local media.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn request_permission(&self) -> Result<Permission, ServiceError>;

    async fn launch(&self) -> Result<PickResult, ServiceError>;
}
