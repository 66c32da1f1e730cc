//! Local copies of exported report pages and downloaded artifacts.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} unusable: {source}")]
    OutputDir { path: PathBuf, source: io::Error },
    #[error("output path {0:?} exists and is not a directory")]
    NotADirectory(PathBuf),
    #[error("refusing to write {0:?}: file name must be a single path component")]
    InvalidFileName(String),
    #[error("writing {path:?} failed: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Creates `dir` (and parents) unless it already exists as a directory.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::NotADirectory(dir.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|source| PersistError::OutputDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        Err(source) => Err(PersistError::OutputDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

/// Writes files into one output directory through a sibling temp file and a rename,
/// so a reader never observes a half-written report.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replaces `{dir}/{file_name}` with `content` and returns the final path.
    pub fn write(
        &self,
        file_name: &str,
        content: impl AsRef<[u8]>,
    ) -> Result<PathBuf, PersistError> {
        if !is_plain_file_name(file_name) {
            return Err(PersistError::InvalidFileName(file_name.to_string()));
        }
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(file_name);
        let wrap = |source: io::Error| PersistError::Write {
            path: target.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(wrap)?;
        tmp.write_all(content.as_ref()).map_err(wrap)?;
        tmp.as_file_mut().sync_all().map_err(wrap)?;
        tmp.persist(&target).map_err(|err| wrap(err.error))?;
        Ok(target)
    }
}

// Artifact names come from server paths; never let one climb out of the output dir.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some()
}
