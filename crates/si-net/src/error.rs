//! ---
//! si_section: "04-request-gateway"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "Gateway error taxonomy."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
use std::path::PathBuf;

/// Failure of a single backend call. Never retried by the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Non-2xx response. `detail` holds the server message when the body carried one.
    #[error("backend responded with HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from a structured error body.
        detail: Option<String>,
    },
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The backend answered 2xx but with no record.
    #[error("record not found: {0}")]
    NotFound(String),
    /// A selected upload could not be read; no request was sent.
    #[error("unable to read upload {}: {source}", path.display())]
    Upload {
        /// Local file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The call was rejected before sending because the input was incomplete.
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),
}

impl GatewayError {
    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, when the error body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_detail() {
        let err = GatewayError::Status {
            status: 400,
            detail: Some("Aadhar number already exists!".into()),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("Aadhar number already exists!"));
        assert_eq!(err.to_string(), "backend responded with HTTP 400");
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = GatewayError::Transport("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.detail(), None);
        assert!(err.to_string().contains("connection refused"));
    }
}
