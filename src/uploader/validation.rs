use lazy_static::lazy_static;
use regex::Regex;

use super::error::UploadError;
use super::interfaces::UploadRequest;

pub const MAX_BRANCH_LENGTH: usize = 255;

lazy_static! {
    static ref COMMIT_SHA_REGEX: Regex = Regex::new(r"(?i)^[0-9a-f]{40}$").unwrap();
}

pub fn validate_commit_sha(commit_sha: &str) -> Result<(), UploadError> {
    if !COMMIT_SHA_REGEX.is_match(commit_sha) {
        return Err(UploadError::InvalidCommitSha {
            value: commit_sha.to_string(),
        });
    }
    Ok(())
}

pub fn validate_branch(branch: &str) -> Result<(), UploadError> {
    let length = branch.chars().count();
    if length == 0 || length > MAX_BRANCH_LENGTH {
        return Err(UploadError::InvalidBranch {
            value: branch.to_string(),
        });
    }
    Ok(())
}

/// Checks done before touching the filesystem
pub fn validate_request(request: &UploadRequest) -> Result<(), UploadError> {
    validate_commit_sha(&request.commit_sha)?;
    validate_branch(&request.branch)
}
