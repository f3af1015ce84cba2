use std::path::Path;

use git2::{ObjectType, Oid, Repository};

use super::interfaces::{UPSTREAM_REMOTE, VersionControl};
use crate::prelude::*;

/// A git repository on local disk
pub struct LocalRepository {
    repository: Repository,
}

impl LocalRepository {
    pub fn open(root: &Path) -> Result<Self> {
        let repository = Repository::open(root).context(format!(
            "Failed to open repository at path: {}",
            root.display()
        ))?;
        Ok(Self { repository })
    }

    /// Resolve a branch name locally first, then as a remote-tracking branch of the upstream
    fn find_commit_id(&self, revision: &str) -> Result<Oid> {
        let candidates = [
            revision.to_string(),
            format!("{UPSTREAM_REMOTE}/{revision}"),
        ];
        for candidate in &candidates {
            if let Ok(object) = self.repository.revparse_single(candidate) {
                return Ok(object.peel(ObjectType::Commit)?.id());
            }
        }
        bail!("revision `{revision}` not found")
    }
}

impl VersionControl for LocalRepository {
    fn head_commit(&self) -> Result<String> {
        let head = self.repository.head().context("Failed to get HEAD")?;
        let commit = head.peel_to_commit().context("Failed to get HEAD commit")?;
        Ok(commit.id().to_string())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repository.head().context("Failed to get HEAD")?;
        if !head.is_branch() {
            bail!("HEAD is detached");
        }
        let branch = head.shorthand().context("Failed to get HEAD branch name")?;
        Ok(branch.to_string())
    }

    fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repository.remotes()?;
        Ok(remotes.iter().flatten().map(str::to_string).collect())
    }

    fn symbolic_ref(&self, name: &str) -> Result<Option<String>> {
        match self.repository.find_reference(name) {
            Ok(reference) => Ok(reference.symbolic_target().map(str::to_string)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn merge_base(&self, left: &str, right: &str) -> Result<String> {
        let left = self.find_commit_id(left)?;
        let right = self.find_commit_id(right)?;
        Ok(self.repository.merge_base(left, right)?.to_string())
    }

    fn resolve_revision(&self, revision: &str) -> Result<String> {
        let object = self.repository.revparse_single(revision)?;
        Ok(object.peel(ObjectType::Commit)?.id().to_string())
    }
}
