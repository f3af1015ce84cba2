use std::env;
use std::path::PathBuf;

use console::style;
use log::{debug, info};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tokio::fs::File;

use crate::archive::{ArchiveArtifact, create_archive};
use crate::config::ApiConfig;
use crate::manifest::validate_build_dir;
use crate::request_client::REQUEST_CLIENT;

use super::error::UploadError;
use super::interfaces::*;
use super::validation::validate_request;

const ARCHIVE_CONTENT_TYPE: &str = "application/gzip";

fn bytes_to_kib(bytes: u64) -> u64 {
    bytes / 1024
}

/// Sends Storybook builds to the Vizdiff API
#[derive(Debug, Clone)]
pub struct UploadClient {
    api_config: ApiConfig,
    temp_dir: PathBuf,
}

impl UploadClient {
    pub fn new(api_config: ApiConfig) -> Self {
        Self {
            api_config,
            temp_dir: env::temp_dir(),
        }
    }

    /// Directory where archives are written before being sent
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// Validate, package and send a Storybook build.
    ///
    /// Every failure is terminal, nothing is retried. The archive never outlives this call.
    pub async fn upload(&self, request: &UploadRequest) -> Result<UploadResult, UploadError> {
        validate_request(request)?;
        validate_build_dir(&request.storybook_dir).await?;

        let artifact = ArchiveArtifact::new_in(&self.temp_dir);
        info!("Packaging Storybook build...");
        create_archive(&request.storybook_dir, artifact.path())
            .await
            .map_err(|source| UploadError::PackagingFailed { source })?;

        info!("Uploading Storybook build...");
        self.submit(request, &artifact).await
    }

    async fn submit(
        &self,
        request: &UploadRequest,
        artifact: &ArchiveArtifact,
    ) -> Result<UploadResult, UploadError> {
        let archive_size = artifact
            .size()
            .await
            .map_err(|source| UploadError::PackagingFailed { source })?;
        debug!(
            "Sending {} ({} KiB) to {}",
            artifact.path().display(),
            bytes_to_kib(archive_size),
            self.api_config.upload_url()
        );

        let file = File::open(artifact.path())
            .await
            .map_err(|source| UploadError::PackagingFailed { source })?;
        let body = reqwest::Body::wrap_stream(tokio_util::io::ReaderStream::new(file));

        let mut http_request = REQUEST_CLIENT
            .post(self.api_config.upload_url())
            .query(&[("token", request.project_token.as_str())])
            .header(CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
            .header(CONTENT_LENGTH, archive_size)
            .header(COMMIT_SHA_HEADER, request.commit_sha.as_str())
            .header(BRANCH_HEADER, request.branch.as_str());
        if let Some((base_commit_sha, base_branch)) = request.baseline() {
            http_request = http_request
                .header(BASE_COMMIT_SHA_HEADER, base_commit_sha)
                .header(BASE_BRANCH_HEADER, base_branch);
        } else {
            debug!("No comparison baseline, base headers omitted");
        }
        if let Some(pr_number) = request.pr_number() {
            http_request = http_request.header(PR_NUMBER_HEADER, pr_number);
        }

        let response = http_request
            .body(body)
            .send()
            .await
            .map_err(request_error)?;
        interpret_response(response).await
    }
}

/// The request URL carries the project token, it never reaches the error message
fn request_error(err: reqwest::Error) -> UploadError {
    let err = err.without_url();
    if err.is_builder() {
        return UploadError::InvalidRequest {
            reason: format!("{:#}", anyhow::Error::from(err)),
        };
    }
    UploadError::Transport { source: err }
}

async fn interpret_response(response: reqwest::Response) -> Result<UploadResult, UploadError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::message)
            .unwrap_or_else(|| {
                format!(
                    "{} ({})",
                    status.canonical_reason().unwrap_or("Unknown Status"),
                    status.as_u16()
                )
            });
        debug!("Upload rejected with {status}: {text}");
        return Err(UploadError::UploadRejected { status, message });
    }

    let text = response.text().await.map_err(request_error)?;

    let body = serde_json::from_str::<UploadResponse>(&text).map_err(|e| {
        debug!("Unexpected upload response: {e}, body: {text}");
        UploadError::UploadFailed {
            message: "Unexpected response from the Vizdiff API".into(),
        }
    })?;
    if !body.success {
        return Err(UploadError::UploadFailed {
            message: body
                .error
                .unwrap_or_else(|| "Upload failed for an unknown reason".into()),
        });
    }

    info!("{}", style("Storybook uploaded").bold());
    Ok(UploadResult {
        test_id: body.test_id,
        upload_id: body.upload_id,
    })
}
