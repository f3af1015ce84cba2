use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const COMMIT_SHA_HEADER: &str = "X-Vizdiff-Commit-Sha";
pub const BRANCH_HEADER: &str = "X-Vizdiff-Branch";
pub const BASE_COMMIT_SHA_HEADER: &str = "X-Vizdiff-Base-Commit-Sha";
pub const BASE_BRANCH_HEADER: &str = "X-Vizdiff-Base-Branch";
pub const PR_NUMBER_HEADER: &str = "X-Vizdiff-PR-Number";

/// What the caller knows before git metadata resolution
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub storybook_dir: PathBuf,
    pub project_token: String,
    pub commit_sha: Option<String>,
    pub branch: Option<String>,
    pub base_commit_sha: Option<String>,
    pub base_branch: Option<String>,
    pub pr_number: Option<u64>,
}

/// A complete upload, commit and branch are validated by [`super::UploadClient::upload`]
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub storybook_dir: PathBuf,
    pub commit_sha: String,
    pub branch: String,
    pub project_token: String,
    pub base_commit_sha: Option<String>,
    pub base_branch: Option<String>,
    pub pr_number: Option<u64>,
}

impl UploadRequest {
    /// The baseline pair, only when both sides are known
    pub fn baseline(&self) -> Option<(&str, &str)> {
        match (self.base_commit_sha.as_deref(), self.base_branch.as_deref()) {
            (Some(base_commit_sha), Some(base_branch))
                if !base_commit_sha.is_empty() && !base_branch.is_empty() =>
            {
                Some((base_commit_sha, base_branch))
            }
            _ => None,
        }
    }

    pub fn pr_number(&self) -> Option<u64> {
        self.pr_number.filter(|pr_number| *pr_number > 0)
    }
}

/// Acknowledgment returned by the upload endpoint
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub test_id: Option<String>,
    pub upload_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadResult {
    pub test_id: Option<String>,
    pub upload_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    pub error: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `error` field, only when it is a string
    pub fn message(self) -> Option<String> {
        match self.error {
            Some(serde_json::Value::String(message)) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UploadRequest {
        UploadRequest {
            storybook_dir: PathBuf::from("storybook-static"),
            commit_sha: "a".repeat(40),
            branch: "main".into(),
            project_token: "token".into(),
            base_commit_sha: None,
            base_branch: None,
            pr_number: None,
        }
    }

    #[test]
    fn test_baseline_requires_both_values() {
        let mut request = request();
        assert_eq!(request.baseline(), None);

        request.base_branch = Some("main".into());
        assert_eq!(request.baseline(), None);

        request.base_commit_sha = Some(String::new());
        assert_eq!(request.baseline(), None);

        let base_commit_sha = "b".repeat(40);
        request.base_commit_sha = Some(base_commit_sha.clone());
        assert_eq!(request.baseline(), Some((base_commit_sha.as_str(), "main")));
    }

    #[test]
    fn test_pr_number_must_be_positive() {
        let mut request = request();
        request.pr_number = Some(0);
        assert_eq!(request.pr_number(), None);
        request.pr_number = Some(42);
        assert_eq!(request.pr_number(), Some(42));
    }

    #[test]
    fn test_deserialize_response() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success": true, "testId": "t1", "uploadId": "u1"}"#)
                .unwrap();
        assert_eq!(
            response,
            UploadResponse {
                success: true,
                test_id: Some("t1".into()),
                upload_id: Some("u1".into()),
                error: None,
            }
        );
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "Invalid token"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Invalid token"));

        let body: ErrorBody = serde_json::from_str(r#"{"error": {"code": 1}}"#).unwrap();
        assert_eq!(body.message(), None);
    }
}
