use reqwest::StatusCode;

use crate::manifest::ManifestError;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid commit SHA: \"{value}\", expected 40 hexadecimal characters")]
    InvalidCommitSha { value: String },

    #[error("Invalid branch name: \"{value}\", expected between 1 and 255 characters")]
    InvalidBranch { value: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to package the Storybook build")]
    PackagingFailed {
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid upload request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Failed to reach the Vizdiff API")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("Upload rejected: {message}")]
    UploadRejected { status: StatusCode, message: String },

    #[error("Upload failed: {message}")]
    UploadFailed { message: String },
}

impl UploadError {
    /// HTTP status of a rejected upload
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UploadError::UploadRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The token or the commit was refused
    pub fn is_authentication_error(&self) -> bool {
        self.status()
            .is_some_and(|status| status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
    }

    /// The project ran out of quota or has a billing problem
    pub fn is_quota_error(&self) -> bool {
        self.status() == Some(StatusCode::PAYMENT_REQUIRED)
    }
}
