use std::path::Path;

use log::{debug, warn};

use super::interfaces::*;
use super::repository::LocalRepository;
use crate::helpers::find_repository_root;

/// Assumed default branch when the upstream does not advertise one
const FALLBACK_DEFAULT_BRANCH: &str = "main";

/// Use the explicit value when there is one, otherwise ask `fallback`
fn resolve_field<E>(
    explicit: Option<String>,
    fallback: impl FnOnce() -> Result<String, E>,
) -> Result<String, E> {
    match explicit {
        Some(value) => Ok(value),
        None => fallback(),
    }
}

fn open_repository(storybook_dir: &Path) -> Option<LocalRepository> {
    let root = find_repository_root(storybook_dir)?;
    match LocalRepository::open(&root) {
        Ok(repository) => Some(repository),
        Err(e) => {
            warn!("{e:#}");
            None
        }
    }
}

fn is_fully_specified(overrides: &GitMetadataOverrides) -> bool {
    overrides.commit_sha.is_some()
        && overrides.branch.is_some()
        && overrides.base_commit_sha.is_some()
        && overrides.base_branch.is_some()
}

/// Fill the values missing from `overrides` from the repository containing `storybook_dir`
pub fn resolve_git_metadata(
    storybook_dir: &Path,
    overrides: GitMetadataOverrides,
) -> Result<ResolvedGitIdentity, GitMetadataError> {
    if is_fully_specified(&overrides) {
        return resolve_with_repository::<LocalRepository>(storybook_dir, None, overrides);
    }

    let repository = open_repository(storybook_dir);
    resolve_with_repository(storybook_dir, repository.as_ref(), overrides)
}

pub fn resolve_with_repository<R: VersionControl>(
    storybook_dir: &Path,
    repository: Option<&R>,
    overrides: GitMetadataOverrides,
) -> Result<ResolvedGitIdentity, GitMetadataError> {
    let require_repository = || {
        repository.ok_or_else(|| GitMetadataError::RepositoryNotFound {
            path: storybook_dir.to_path_buf(),
        })
    };

    let commit_sha = resolve_field(overrides.commit_sha, || {
        require_repository()?
            .head_commit()
            .map_err(|e| GitMetadataError::NoCommitFound {
                reason: format!("{e:#}"),
            })
    })?;

    let branch = resolve_field(overrides.branch, || {
        require_repository()?
            .current_branch()
            .map_err(|e| GitMetadataError::NoBranchFound {
                reason: format!("{e:#}"),
            })
    })?;

    let (base_branch, base_commit_sha) = match (overrides.base_branch, overrides.base_commit_sha)
    {
        (Some(base_branch), Some(base_commit_sha)) => (Some(base_branch), Some(base_commit_sha)),
        (base_branch, base_commit_sha) => match repository {
            Some(repository) => resolve_base(
                repository,
                &commit_sha,
                &branch,
                base_branch,
                base_commit_sha,
            )?,
            None => {
                debug!("No git repository found, uploading without a comparison baseline");
                (base_branch, base_commit_sha)
            }
        },
    };

    let identity = ResolvedGitIdentity {
        commit_sha,
        branch,
        base_branch,
        base_commit_sha,
    };
    debug!("Resolved git identity: {identity:?}");
    Ok(identity)
}

/// Default branch of the upstream remote, `None` when there is no such remote
fn detect_default_branch<R: VersionControl>(repository: &R) -> Option<String> {
    let remotes = match repository.remotes() {
        Ok(remotes) => remotes,
        Err(e) => {
            debug!("Failed to list remotes: {e:#}");
            return None;
        }
    };
    if !remotes.iter().any(|remote| remote == UPSTREAM_REMOTE) {
        debug!("No `{UPSTREAM_REMOTE}` remote, uploading without a comparison baseline");
        return None;
    }

    let head_ref = format!("refs/remotes/{UPSTREAM_REMOTE}/HEAD");
    let prefix = format!("refs/remotes/{UPSTREAM_REMOTE}/");
    let default_branch = match repository.symbolic_ref(&head_ref) {
        Ok(Some(target)) => target
            .strip_prefix(prefix.as_str())
            .map(str::to_string)
            .unwrap_or(target),
        Ok(None) => {
            debug!("{head_ref} is not set, assuming `{FALLBACK_DEFAULT_BRANCH}`");
            FALLBACK_DEFAULT_BRANCH.to_string()
        }
        Err(e) => {
            debug!("Failed to read {head_ref}: {e:#}, assuming `{FALLBACK_DEFAULT_BRANCH}`");
            FALLBACK_DEFAULT_BRANCH.to_string()
        }
    };
    Some(default_branch)
}

fn resolve_base<R: VersionControl>(
    repository: &R,
    commit_sha: &str,
    branch: &str,
    base_branch: Option<String>,
    base_commit_sha: Option<String>,
) -> Result<(Option<String>, Option<String>), GitMetadataError> {
    let Some(default_branch) = detect_default_branch(repository) else {
        return Ok((base_branch, base_commit_sha));
    };
    let base_branch = base_branch.unwrap_or(default_branch);

    let base_commit_sha = resolve_field(base_commit_sha, || {
        if branch == base_branch {
            // comparing the trunk against itself: the baseline is the previous commit
            repository
                .resolve_revision(&format!("{commit_sha}~1"))
                .map_err(|e| GitMetadataError::ParentCommitNotFound {
                    commit: commit_sha.to_string(),
                    reason: format!("{e:#}"),
                })
        } else {
            repository.merge_base(branch, &base_branch).map_err(|e| {
                GitMetadataError::MergeBaseNotFound {
                    branch: branch.to_string(),
                    base_branch: base_branch.clone(),
                    reason: format!("{e:#}"),
                }
            })
        }
    })?;

    Ok((Some(base_branch), Some(base_commit_sha)))
}
