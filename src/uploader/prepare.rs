use crate::git_metadata::{GitMetadataError, GitMetadataOverrides, resolve_git_metadata};

use super::interfaces::{UploadOptions, UploadRequest};

/// Complete the caller's options with git metadata resolved from the Storybook directory
pub fn prepare_upload_request(options: UploadOptions) -> Result<UploadRequest, GitMetadataError> {
    let identity = resolve_git_metadata(
        &options.storybook_dir,
        GitMetadataOverrides {
            commit_sha: options.commit_sha,
            branch: options.branch,
            base_commit_sha: options.base_commit_sha,
            base_branch: options.base_branch,
        },
    )?;

    Ok(UploadRequest {
        storybook_dir: options.storybook_dir,
        commit_sha: identity.commit_sha,
        branch: identity.branch,
        project_token: options.project_token,
        base_commit_sha: identity.base_commit_sha,
        base_branch: identity.base_branch,
        pr_number: options.pr_number,
    })
}
