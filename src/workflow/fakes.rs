//! In-memory collaborators for workflow tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{IdToken, LocalImage, NewEvent};
use crate::services::{
    EventPersistence, IdentityProvider, ImagePicker, ObjectStorage, Permission, PickResult,
    ServiceError,
};

use super::submit::Submission;

fn boom(what: &str) -> ServiceError {
    ServiceError::Io(std::io::Error::other(format!("{what} failed")))
}

pub enum FakeIdentity {
    SignedIn(&'static str),
    SignedOut,
    Broken,
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn id_token(&self) -> Result<Option<IdToken>, ServiceError> {
        match self {
            Self::SignedIn(token) => Ok(Some(IdToken::new(*token))),
            Self::SignedOut => Ok(None),
            Self::Broken => Err(boom("identity")),
        }
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub fail_upload: bool,
    pub fail_url: bool,
    pub uploads: Mutex<Vec<(String, LocalImage)>>,
    pub url_requests: Mutex<Vec<String>>,
}

impl FakeStorage {
    pub fn failing() -> Self {
        Self {
            fail_upload: true,
            ..Self::default()
        }
    }

    pub fn without_urls() -> Self {
        Self {
            fail_url: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn put_file(&self, key: &str, image: &LocalImage) -> Result<(), ServiceError> {
        if self.fail_upload {
            return Err(boom("upload"));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((key.to_string(), image.clone()));
        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<String, ServiceError> {
        let mut requests = self.url_requests.lock().unwrap();
        requests.push(key.to_string());
        if self.fail_url {
            return Err(boom("download url"));
        }
        Ok(format!("https://x/banner{}", requests.len()))
    }
}

#[derive(Default)]
pub struct FakeEvents {
    pub fail: bool,
    pub created: Mutex<Vec<(NewEvent, IdToken)>>,
}

impl FakeEvents {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<(NewEvent, IdToken)> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPersistence for FakeEvents {
    async fn create_event(&self, event: &NewEvent, token: &IdToken) -> Result<(), ServiceError> {
        if self.fail {
            return Err(boom("create event"));
        }
        self.created
            .lock()
            .unwrap()
            .push((event.clone(), token.clone()));
        Ok(())
    }
}

pub struct FakePicker {
    pub permission: Permission,
    pub result: Option<PickResult>,
}

#[async_trait]
impl ImagePicker for FakePicker {
    async fn request_permission(&self) -> Result<Permission, ServiceError> {
        Ok(self.permission)
    }

    async fn launch(&self) -> Result<PickResult, ServiceError> {
        self.result.clone().ok_or_else(|| boom("picker"))
    }
}

/// The day every rigged submission dates its fresh draft.
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

/// Handles on the fakes wired into a [`Submission`].
pub struct Rig {
    pub storage: Arc<FakeStorage>,
    pub events: Arc<FakeEvents>,
    pub submission: Submission,
}

pub fn rig(identity: FakeIdentity, storage: FakeStorage, events: FakeEvents) -> Rig {
    let storage = Arc::new(storage);
    let events = Arc::new(events);
    let submission = Submission::new(Arc::new(identity), storage.clone(), events.clone())
        .with_today(fixed_today);
    Rig {
        storage,
        events,
        submission,
    }
}
