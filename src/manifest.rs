use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

pub const PROJECT_FILE: &str = "project.json";
pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Could not find {} at {}. Is this a Storybook build directory?", PROJECT_FILE, .path.display())]
    ManifestMissing { path: PathBuf },

    #[error("Failed to parse {}", .path.display())]
    ManifestParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid Storybook manifest at {}: {reason}", .path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Failed to read story index at {}: {reason}", .path.display())]
    IndexParseError { path: PathBuf, reason: String },

    #[error("No stories found in {}", .path.display())]
    NoStoriesFound { path: PathBuf },
}

/// What a valid Storybook build directory tells us about itself
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub storybook_version: String,
    pub story_count: usize,
}

fn resolve_path(storybook_dir: &Path, file_name: &str) -> PathBuf {
    let path = storybook_dir.join(file_name);
    std::path::absolute(&path).unwrap_or(path)
}

/// Check that `storybook_dir` holds a Storybook build with at least one story.
///
/// Only reads `project.json` and `index.json`.
pub async fn validate_build_dir(storybook_dir: &Path) -> Result<BuildSummary, ManifestError> {
    let project_path = resolve_path(storybook_dir, PROJECT_FILE);
    let project_content = tokio::fs::read(&project_path)
        .await
        .map_err(|e| {
            debug!("Failed to read {}: {e}", project_path.display());
            ManifestError::ManifestMissing {
                path: project_path.clone(),
            }
        })?;
    let storybook_version = parse_project(&project_path, &project_content)?;
    debug!("Storybook version: {storybook_version}");

    let index_path = resolve_path(storybook_dir, INDEX_FILE);
    let index_content = tokio::fs::read(&index_path)
        .await
        .map_err(|e| ManifestError::IndexParseError {
            path: index_path.clone(),
            reason: e.to_string(),
        })?;
    let story_count = count_stories(&index_path, &index_content)?;
    info!("Found {story_count} stories");

    Ok(BuildSummary {
        storybook_version,
        story_count,
    })
}

fn parse_project(path: &Path, content: &[u8]) -> Result<String, ManifestError> {
    let project: Value =
        serde_json::from_slice(content).map_err(|source| ManifestError::ManifestParseError {
            path: path.to_path_buf(),
            source,
        })?;

    let invalid = |reason: &str| ManifestError::ManifestInvalid {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let project = project
        .as_object()
        .ok_or_else(|| invalid("expected a JSON object"))?;
    match project.get("storybookVersion") {
        Some(Value::String(version)) => Ok(version.clone()),
        Some(_) => Err(invalid("`storybookVersion` must be a string")),
        None => Err(invalid("missing `storybookVersion`")),
    }
}

fn count_stories(path: &Path, content: &[u8]) -> Result<usize, ManifestError> {
    let index: Value =
        serde_json::from_slice(content).map_err(|e| ManifestError::IndexParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    // a missing or non-mapping `entries` counts as an empty index
    let story_count = index
        .get("entries")
        .and_then(Value::as_object)
        .map_or(0, |entries| entries.len());

    if story_count == 0 {
        return Err(ManifestError::NoStoriesFound {
            path: path.to_path_buf(),
        });
    }
    Ok(story_count)
}
