use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{IdentityProvider, ServiceError};
use crate::model::IdToken;

/// Reads the session token from a file written by the sign-in tool.
///
/// A missing or blank file means the user is not signed in.
#[derive(Debug, Clone)]
pub struct TokenFileIdentity {
    path: PathBuf,
}

impl TokenFileIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IdentityProvider for TokenFileIdentity {
    async fn id_token(&self) -> Result<Option<IdToken>, ServiceError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "identity: no token file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let token = contents.trim();
        Ok((!token.is_empty()).then(|| IdToken::new(token)))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[tokio::test]
    async fn reads_trimmed_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "abc123\n").unwrap();
        let token = TokenFileIdentity::new(&path).id_token().await.unwrap();
        assert_eq!(token, Some(IdToken::new("abc123")));
    }

    #[tokio::test]
    async fn missing_file_means_signed_out() {
        let dir = tempdir().unwrap();
        let identity = TokenFileIdentity::new(dir.path().join("absent"));
        assert_eq!(identity.id_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_file_means_signed_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        let token = TokenFileIdentity::new(&path).id_token().await.unwrap();
        assert_eq!(token, None);
    }

    #[tokio::test]
    async fn unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();
        // A directory cannot be read as a string.
        let identity = TokenFileIdentity::new(dir.path());
        assert!(matches!(
            identity.id_token().await,
            Err(ServiceError::Io(_))
        ));
    }
}
