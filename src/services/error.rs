use std::path::PathBuf;

/// Errors raised by the external collaborators the workflow talks to.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// An I/O error occurred while reading a local file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP request could not be sent or its response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body was not the JSON shape we expected.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A backend answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        /// Which collaborator answered.
        service: &'static str,
        /// The HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The picked file does not look like an image.
    #[error("not an image file: {}", .0.display())]
    NotAnImage(PathBuf),
}

/// Turns a non-success response into [`ServiceError::Status`].
pub(crate) async fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ServiceError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message() {
        let err = ServiceError::Status {
            service: "event service",
            status: 401,
            body: "expired".into(),
        };
        assert_eq!(err.to_string(), "event service returned HTTP 401: expired");
    }

    #[test]
    fn io_error_converts() {
        let err: ServiceError = std::io::Error::other("disk").into();
        assert!(matches!(err, ServiceError::Io(_)));
    }
}
