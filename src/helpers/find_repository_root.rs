use std::path::{Path, PathBuf};

/// Walk up from `base_dir` until a directory holding a `.git` entry is found
pub fn find_repository_root(base_dir: &Path) -> Option<PathBuf> {
    let current_dir = match base_dir.canonicalize() {
        Ok(dir) => dir,
        Err(e) => {
            log::debug!("Could not resolve {}: {e}", base_dir.display());
            return None;
        }
    };

    // `.git` is a file for worktrees and submodules, hence `exists` rather than `is_dir`
    let root = current_dir
        .ancestors()
        .find(|ancestor| ancestor.join(".git").exists())
        .map(Path::to_path_buf);

    if root.is_none() {
        log::debug!(
            "Could not find repository root above {}",
            current_dir.display()
        );
    }

    root
}
