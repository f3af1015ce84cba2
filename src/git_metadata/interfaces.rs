use std::path::PathBuf;

use crate::prelude::*;

/// Name of the remote treated as the canonical upstream
pub const UPSTREAM_REMOTE: &str = "origin";

/// The queries the metadata resolver needs from a version-control repository
pub trait VersionControl {
    /// Hash of the commit currently checked out
    fn head_commit(&self) -> Result<String>;

    /// Short name of the checked out branch, fails when HEAD is detached
    fn current_branch(&self) -> Result<String>;

    fn remotes(&self) -> Result<Vec<String>>;

    /// Target of a symbolic reference, `None` when the reference does not exist
    fn symbolic_ref(&self, name: &str) -> Result<Option<String>>;

    /// Best common ancestor of two revisions
    fn merge_base(&self, left: &str, right: &str) -> Result<String>;

    /// Commit hash a revision expression such as `<sha>~1` points to
    fn resolve_revision(&self, revision: &str) -> Result<String>;
}

/// Values supplied by the caller, any missing one is resolved from git
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GitMetadataOverrides {
    pub commit_sha: Option<String>,
    pub branch: Option<String>,
    pub base_commit_sha: Option<String>,
    pub base_branch: Option<String>,
}

/// The four-way identity of the change being compared
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGitIdentity {
    pub commit_sha: String,
    pub branch: String,
    pub base_branch: Option<String>,
    pub base_commit_sha: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GitMetadataError {
    #[error(
        "Could not find a git repository above {}, pass the commit and branch explicitly",
        .path.display()
    )]
    RepositoryNotFound { path: PathBuf },

    #[error("Could not determine the current commit: {reason}")]
    NoCommitFound { reason: String },

    #[error("Could not determine the current branch: {reason}")]
    NoBranchFound { reason: String },

    #[error("Could not find the parent of commit {commit}: {reason}")]
    ParentCommitNotFound { commit: String, reason: String },

    #[error("Could not find a common ancestor between `{branch}` and `{base_branch}`: {reason}")]
    MergeBaseNotFound {
        branch: String,
        base_branch: String,
        reason: String,
    },
}
