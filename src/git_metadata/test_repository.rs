//! Throwaway git repositories for tests

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

pub struct TestRepository {
    _dir: TempDir,
    root: PathBuf,
    repository: Repository,
}

impl TestRepository {
    /// Empty repository whose unborn HEAD points to `main`
    pub fn init() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap().join("repo");
        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        let repository = Repository::init_opts(&root, &options).unwrap();
        Self {
            _dir: dir,
            root,
            repository,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A Storybook build directory nested inside the working tree
    pub fn storybook_dir(&self) -> PathBuf {
        let dir = self.root.join("storybook-static");
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn signature() -> Signature<'static> {
        Signature::now("Vizdiff Test", "test@vizdiff.io").unwrap()
    }

    fn write_commit(&self, update_ref: Option<&str>, message: &str, parents: &[Oid]) -> String {
        let tree_id = {
            let mut index = self.repository.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = self.repository.find_tree(tree_id).unwrap();
        let parents = parents
            .iter()
            .map(|oid| self.repository.find_commit(*oid).unwrap())
            .collect::<Vec<_>>();
        let parents = parents.iter().collect::<Vec<_>>();
        let signature = Self::signature();
        self.repository
            .commit(update_ref, &signature, &signature, message, &tree, &parents)
            .unwrap()
            .to_string()
    }

    /// Commit on top of HEAD and return the new commit hash
    pub fn commit(&self, message: &str) -> String {
        let parents = match self.repository.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap().id()],
            Err(_) => vec![],
        };
        self.write_commit(Some("HEAD"), message, &parents)
    }

    /// Root commit on `branch`, sharing no history with anything else
    pub fn orphan_commit(&self, branch: &str, message: &str) -> String {
        self.write_commit(Some(&format!("refs/heads/{branch}")), message, &[])
    }

    pub fn checkout_new_branch(&self, branch: &str) {
        let head = self.repository.head().unwrap().peel_to_commit().unwrap();
        self.repository.branch(branch, &head, false).unwrap();
        self.checkout_branch(branch);
    }

    pub fn checkout_branch(&self, branch: &str) {
        self.repository
            .set_head(&format!("refs/heads/{branch}"))
            .unwrap();
    }

    pub fn detach_head(&self, commit: &str) {
        self.repository
            .set_head_detached(Oid::from_str(commit).unwrap())
            .unwrap();
    }

    pub fn delete_local_branch(&self, branch: &str) {
        self.repository
            .find_branch(branch, git2::BranchType::Local)
            .unwrap()
            .delete()
            .unwrap();
    }

    /// Add an `origin` remote, optionally with `origin/HEAD` pointing to `default_branch`
    pub fn add_origin(&self, default_branch: Option<&str>) {
        self.repository
            .remote("origin", "https://github.com/vizdiff/storybook-demo.git")
            .unwrap();
        if let Some(default_branch) = default_branch {
            self.repository
                .reference_symbolic(
                    "refs/remotes/origin/HEAD",
                    &format!("refs/remotes/origin/{default_branch}"),
                    true,
                    "set origin/HEAD",
                )
                .unwrap();
        }
    }

    /// Create the remote-tracking branch for a local branch
    pub fn publish_branch(&self, branch: &str) {
        let commit = self
            .repository
            .find_branch(branch, git2::BranchType::Local)
            .unwrap()
            .get()
            .peel_to_commit()
            .unwrap();
        self.repository
            .reference(
                &format!("refs/remotes/origin/{branch}"),
                commit.id(),
                true,
                "publish",
            )
            .unwrap();
    }
}
