use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory {path:?} is unusable: {reason}")]
    OutputDir { path: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("every candidate file name is already taken")]
    NoFreeName,
}

/// Creates `dir` (and parents) if needed and checks that files can be made in it.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::OutputDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => return Err(unusable("not a directory".into())),
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
        }
        Err(err) => return Err(unusable(err.to_string())),
    }
    // Writability check; the temp file is removed on drop.
    NamedTempFile::new_in(dir).map_err(|e| unusable(e.to_string()))?;
    Ok(())
}

/// Streams bytes into a temp file in `dir` and renames it into place on commit.
///
/// Dropping the writer without committing removes the temp file, so a failed
/// download never leaves a partial artifact behind.
pub struct AtomicFileWriter {
    dir: PathBuf,
    tmp: NamedTempFile,
    written: u64,
}

impl AtomicFileWriter {
    pub fn create(dir: &Path) -> Result<Self, PersistError> {
        ensure_output_dir(dir)?;
        let tmp = NamedTempFile::new_in(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            tmp,
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), PersistError> {
        self.tmp.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Moves the finished file to `{dir}/{filename}`, refusing to overwrite.
    pub fn commit(self, filename: &str) -> Result<PathBuf, PersistError> {
        self.commit_unique([filename.to_string()])
    }

    /// Moves the finished file to the first name in `candidates` not already taken.
    ///
    /// Each attempt is a no-clobber rename, so a file created concurrently under
    /// the same name is skipped rather than replaced.
    pub fn commit_unique(
        mut self,
        candidates: impl IntoIterator<Item = String>,
    ) -> Result<PathBuf, PersistError> {
        self.tmp.flush()?;
        self.tmp.as_file_mut().sync_all()?;
        let mut tmp = self.tmp;
        for name in candidates {
            let target = self.dir.join(&name);
            match tmp.persist_noclobber(&target) {
                Ok(_) => return Ok(target),
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => tmp = err.file,
                Err(err) => return Err(PersistError::Io(err.error)),
            }
        }
        Err(PersistError::NoFreeName)
    }
}
