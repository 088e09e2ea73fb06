//! Versioned artifact store.
//!
//! Artifacts are named, versioned blobs referenced as `name:version`. The
//! pipeline only ever fetches one file per table per run and publishes the
//! cleaner's output as a new version; retry policy, if any, belongs to the
//! store implementation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown artifact: '{0}'")]
    UnknownArtifact(String),

    #[error("artifact reference '{0}' must be of the form 'name:version'")]
    MalformedReference(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait ArtifactStore {
    /// Resolve a `name:version` reference to a local file path.
    ///
    /// The version tag `latest` resolves to the most recently published
    /// version. Fails when the name or version is unknown.
    fn fetch(&self, reference: &str) -> Result<PathBuf, StoreError>;

    /// Register a local file as a new version of `name`.
    ///
    /// Returns the version tag assigned to the new artifact.
    fn publish(
        &self,
        local: &Path,
        name: &str,
        type_tag: &str,
        description: &str,
    ) -> Result<String, StoreError>;
}

/// Directory-backed artifact store.
///
/// Layout: `root/<name>/v<N>` holds version N of the artifact, with a
/// sidecar `v<N>.meta` carrying the type tag and description.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Published version numbers for an artifact name, unsorted.
    fn versions(&self, name: &str) -> Result<Vec<u32>, StoreError> {
        let dir = self.root.join(name);
        let mut versions = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(version) = parse_version(file_name) {
                versions.push(version);
            }
        }
        Ok(versions)
    }
}

/// Version numbers only exist as `v<N>` tags; anything else (including the
/// `.meta` sidecars living next to the data files) is not a version.
fn parse_version(tag: &str) -> Option<u32> {
    tag.strip_prefix('v')?.parse().ok()
}

impl ArtifactStore for LocalStore {
    fn fetch(&self, reference: &str) -> Result<PathBuf, StoreError> {
        let Some((name, tag)) = reference.split_once(':') else {
            return Err(StoreError::MalformedReference(reference.to_string()));
        };

        let tag = if tag == "latest" {
            let latest = self
                .versions(name)
                .map_err(|_| StoreError::UnknownArtifact(reference.to_string()))?
                .into_iter()
                .max()
                .ok_or_else(|| StoreError::UnknownArtifact(reference.to_string()))?;
            format!("v{latest}")
        } else if parse_version(tag).is_some() {
            tag.to_string()
        } else {
            return Err(StoreError::MalformedReference(reference.to_string()));
        };

        let path = self.root.join(name).join(&tag);
        if !path.is_file() {
            return Err(StoreError::UnknownArtifact(reference.to_string()));
        }
        tracing::info!(reference, path = %path.display(), "fetched artifact");
        Ok(path)
    }

    fn publish(
        &self,
        local: &Path,
        name: &str,
        type_tag: &str,
        description: &str,
    ) -> Result<String, StoreError> {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir)?;

        let next = self.versions(name)?.into_iter().max().unwrap_or(0) + 1;
        let version = format!("v{next}");
        fs::copy(local, dir.join(&version))?;
        fs::write(
            dir.join(format!("{version}.meta")),
            format!("type={type_tag}\ndescription={description}\n"),
        )?;

        tracing::info!(name, version = version.as_str(), type_tag, "published artifact");
        Ok(version)
    }
}
