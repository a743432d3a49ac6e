//! Upload sink: saves attached scan files into the upload directory under
//! their original names.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::PortalConfig;
use crate::error::{PortalError, Result};
use crate::types::{DuplicatePolicy, UploadKind};

/// An uploaded file: its original name and contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk; the original name is the path's last component
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                PortalError::upload_rejected(format!("{:?} has no usable file name", path))
            })?
            .to_string();
        let bytes = fs::read(path)?;
        debug!(file = %file_name, size = bytes.len(), "Read upload from disk");
        Ok(Self { file_name, bytes })
    }

    /// Check the name is a bare file name with an accepted extension
    pub fn validate(&self) -> Result<UploadKind> {
        let name = self.file_name.as_str();
        let bare = Path::new(name).file_name().and_then(|n| n.to_str());
        if name.is_empty() || bare != Some(name) || name.contains(['/', '\\']) {
            return Err(PortalError::upload_rejected(format!(
                "'{}' is not a plain file name",
                name
            )));
        }

        UploadKind::from_file_name(name).ok_or_else(|| {
            PortalError::upload_rejected(format!(
                "'{}' is not an accepted file type ({})",
                name,
                UploadKind::accepted_list()
            ))
        })
    }
}

/// Writes uploads into a single directory
#[derive(Debug, Clone)]
pub struct UploadSink {
    dir: PathBuf,
    policy: DuplicatePolicy,
}

impl UploadSink {
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            dir: config.upload_dir.clone(),
            policy: config.duplicate_uploads,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it is missing
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| PortalError::file_write(&self.dir, e))
    }

    /// Save `upload` and return the path it was written to
    pub fn save(&self, upload: &Upload) -> Result<PathBuf> {
        if let Err(e) = upload.validate() {
            warn!("Refusing upload: {}", e);
            return Err(e);
        }

        let target = self.target_path(&upload.file_name)?;
        fs::write(&target, &upload.bytes).map_err(|e| PortalError::file_write(&target, e))?;
        info!(path = %target.display(), size = upload.bytes.len(), "Upload saved");
        Ok(target)
    }

    /// Where `file_name` lands under the duplicate policy
    fn target_path(&self, file_name: &str) -> Result<PathBuf> {
        let target = self.dir.join(file_name);
        if !target.exists() {
            return Ok(target);
        }

        match self.policy {
            DuplicatePolicy::Overwrite => {
                debug!(path = %target.display(), "Overwriting existing upload");
                Ok(target)
            }
            DuplicatePolicy::Reject => Err(PortalError::upload_rejected(format!(
                "a file named '{}' already exists",
                file_name
            ))),
            DuplicatePolicy::Rename => {
                let path = Path::new(file_name);
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(file_name);
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                let mut n = 1u32;
                loop {
                    let candidate = self.dir.join(format!("{stem}-{n}.{ext}"));
                    if !candidate.exists() {
                        return Ok(candidate);
                    }
                    n += 1;
                }
            }
        }
    }
}
