//! Active/archive file vault implementation
//!
//! This module provides [`FileVault`], which owns the two store directories and implements
//! the four operations the front-ends call: ingest, delete, recover and list.
//!
//! # Operations
//!
//! | Operation | Active store | Archive store | Recovery map |
//! |-----------|--------------|---------------|--------------|
//! | ingest    | write        | copy of active | new entry   |
//! | delete    | remove       | untouched     | untouched    |
//! | recover   | copy from archive | read     | read         |
//! | list      | read         | untouched     | untouched    |
//!
//! # Consistency
//!
//! There is no locking and no transaction boundary. Two sessions writing the same filename
//! race and the last writer wins. An ingest that fails between the active write and the
//! archive copy leaves the active file in place without rolling it back.
//!
//! # Implementation Notes
//!
//! - The vault holds only two paths; every call opens what it needs and drops it on return
//! - Filenames are validated by [`FileName`] to stay inside the flat store directories
//! - Delete and recover outcomes the user can cause (absent file, unknown code, missing
//!   backup) are returned as values, not errors

use crate::constants::MAX_CODE_ATTEMPTS;
use crate::{FileName, RecoveryCode, RecoveryMap, VaultConfig, VaultError, VaultResult};
use rand::Rng;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A file currently present in the active store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name of the file within the active store
    pub name: FileName,

    /// Size of the file in bytes
    pub size_bytes: u64,

    /// Detected media type (MIME type), if available
    ///
    /// Best-effort detection from the leading bytes; uploads are never checked against it.
    pub media_type: Option<String>,
}

/// Result of [`FileVault::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file was removed from the active store
    Deleted,
    /// No file of that name was in the active store
    NotFound,
}

/// Result of [`FileVault::recover`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverOutcome {
    /// The archived copy was copied back into the active store
    Recovered(FileName),
    /// The code was never issued in this session
    InvalidCode,
    /// The code is known but the archive holds no file of that name
    ArchiveMissing(FileName),
}

/// Manages the active and archive store directories
///
/// # Design
///
/// - Stateless apart from the two directory paths, so it is cheap to clone and share
/// - Does not own any recovery map; callers pass their session's map in
/// - Never deletes from the archive store
#[derive(Debug, Clone)]
pub struct FileVault {
    /// Directory holding the live files
    active_dir: PathBuf,

    /// Directory holding the copies made at upload time
    archive_dir: PathBuf,
}

impl FileVault {
    /// Creates a vault for the directories described by `config`
    ///
    /// No I/O is performed; call [`FileVault::ensure_storage`] (or use [`FileVault::open`])
    /// before the first operation.
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            active_dir: config.active_dir(),
            archive_dir: config.archive_dir(),
        }
    }

    /// Creates a vault and makes sure both store directories exist
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::StorageDirCreation`] if either directory cannot be created.
    pub fn open(config: &VaultConfig) -> VaultResult<Self> {
        let vault = Self::new(config);
        vault.ensure_storage()?;
        Ok(vault)
    }

    /// Creates the active and archive directories if they are absent
    ///
    /// Idempotent: directories that already exist are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::StorageDirCreation`] if the operating system refuses to create a
    /// directory (for example, a regular file is in the way or permissions are missing).
    pub fn ensure_storage(&self) -> VaultResult<()> {
        for dir in [&self.active_dir, &self.archive_dir] {
            fs::create_dir_all(dir).map_err(|source| VaultError::StorageDirCreation {
                path: dir.clone(),
                source,
            })?;
        }
        tracing::debug!(
            "storage ready: active={}, archive={}",
            self.active_dir.display(),
            self.archive_dir.display()
        );
        Ok(())
    }

    /// Stores an upload and issues a recovery code for it
    ///
    /// Draws a code unused in `map`, writes `content` to the active store, then copies that file
    /// into the archive store. Existing files of the same name are overwritten in both stores.
    /// The code is recorded in `map` once both writes succeed.
    ///
    /// # Arguments
    ///
    /// * `map` - The session's recovery map; receives the new `code → filename` entry
    /// * `filename` - Name to store the file under, used verbatim
    /// * `content` - Complete file content
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`VaultError::FileWrite`] if the active file cannot be written
    /// - [`VaultError::FileCopy`] if the archive copy fails (the active file is kept)
    /// - [`VaultError::CodeSpaceExhausted`] if no unused code could be generated; nothing is written
    pub fn ingest(
        &self,
        map: &mut RecoveryMap,
        filename: &FileName,
        content: &[u8],
    ) -> VaultResult<RecoveryCode> {
        self.ingest_with_rng(map, filename, content, &mut rand::thread_rng())
    }

    /// Same as [`FileVault::ingest`], drawing the recovery code from `rng`
    pub fn ingest_with_rng<R: Rng + ?Sized>(
        &self,
        map: &mut RecoveryMap,
        filename: &FileName,
        content: &[u8],
        rng: &mut R,
    ) -> VaultResult<RecoveryCode> {
        let code = allocate_code(map, rng)?;
        let active_path = self.active_path(filename);
        let archive_path = self.archive_path(filename);

        fs::write(&active_path, content).map_err(|source| VaultError::FileWrite {
            path: active_path.clone(),
            source,
        })?;

        fs::copy(&active_path, &archive_path).map_err(|source| VaultError::FileCopy {
            from: active_path.clone(),
            to: archive_path.clone(),
            source,
        })?;

        map.insert(code.clone(), filename.clone())?;

        tracing::info!(
            "ingested {} ({} bytes) and archived a copy",
            filename,
            content.len()
        );
        Ok(code)
    }

    /// Removes a file from the active store
    ///
    /// The archive copy and the recovery map are left untouched.
    ///
    /// # Returns
    ///
    /// [`DeleteOutcome::Deleted`] if the file was removed, [`DeleteOutcome::NotFound`] if there
    /// was no such file.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::FileRemove`] if the file exists but cannot be removed.
    pub fn delete(&self, filename: &FileName) -> VaultResult<DeleteOutcome> {
        let path = self.active_path(filename);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("deleted {} from active store", filename);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("delete: {} not in active store", filename);
                Ok(DeleteOutcome::NotFound)
            }
            Err(source) => Err(VaultError::FileRemove { path, source }),
        }
    }

    /// Restores the file a recovery code points at
    ///
    /// Copies `archive/<filename>` over `active/<filename>`. Calling it again with the same code
    /// re-copies the same bytes.
    ///
    /// # Arguments
    ///
    /// * `map` - The session's recovery map
    /// * `code` - Code as typed by the user, matched exactly
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::FileCopy`] if the archived file exists but cannot be copied.
    pub fn recover(&self, map: &RecoveryMap, code: &str) -> VaultResult<RecoverOutcome> {
        let Some(filename) = map.resolve(code) else {
            tracing::debug!("recover: unknown code");
            return Ok(RecoverOutcome::InvalidCode);
        };

        let archive_path = self.archive_path(filename);
        if !archive_path.is_file() {
            tracing::warn!(
                "recover: code maps to {} but {} is missing",
                filename,
                archive_path.display()
            );
            return Ok(RecoverOutcome::ArchiveMissing(filename.clone()));
        }

        let active_path = self.active_path(filename);
        fs::copy(&archive_path, &active_path).map_err(|source| VaultError::FileCopy {
            from: archive_path.clone(),
            to: active_path.clone(),
            source,
        })?;

        tracing::info!("recovered {} from archive", filename);
        Ok(RecoverOutcome::Recovered(filename.clone()))
    }

    /// Enumerates the files currently in the active store
    ///
    /// The directory is opened on each call and read lazily as the iterator advances. Order is
    /// whatever the filesystem returns.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::ReadDir`] if the active directory cannot be opened. Errors on
    /// individual entries are yielded by the iterator.
    pub fn list_active(&self) -> VaultResult<ActiveFiles> {
        let entries = fs::read_dir(&self.active_dir).map_err(|source| VaultError::ReadDir {
            path: self.active_dir.clone(),
            source,
        })?;
        Ok(ActiveFiles {
            dir: self.active_dir.clone(),
            entries,
        })
    }

    /// Reads a file from the active store
    ///
    /// Used by front-ends to render a listed file.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::FileNotFound`] if the file is absent, or [`VaultError::FileRead`]
    /// for other I/O failures.
    pub fn read_active(&self, filename: &FileName) -> VaultResult<Vec<u8>> {
        let path = self.active_path(filename);
        fs::read(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                VaultError::FileNotFound(filename.clone())
            } else {
                VaultError::FileRead { path, source }
            }
        })
    }

    pub fn active_dir(&self) -> &Path {
        &self.active_dir
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Path of `filename` in the active store (may not exist)
    #[must_use]
    pub fn active_path(&self, filename: &FileName) -> PathBuf {
        self.active_dir.join(filename.as_str())
    }

    /// Path of `filename` in the archive store (may not exist)
    #[must_use]
    pub fn archive_path(&self, filename: &FileName) -> PathBuf {
        self.archive_dir.join(filename.as_str())
    }
}

/// Best-effort media type of `content`, detected from its leading bytes.
pub fn media_type(content: &[u8]) -> Option<String> {
    infer::get(content).map(|kind| kind.mime_type().to_string())
}

/// Draws codes until one is not already mapped in this session.
fn allocate_code<R: Rng + ?Sized>(map: &RecoveryMap, rng: &mut R) -> VaultResult<RecoveryCode> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = RecoveryCode::generate_with(rng);
        if !map.contains(code.as_str()) {
            return Ok(code);
        }
        tracing::debug!("recovery code collision, drawing again");
    }
    Err(VaultError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS))
}

/// Lazy listing of the active store, returned by [`FileVault::list_active`]
#[derive(Debug)]
pub struct ActiveFiles {
    dir: PathBuf,
    entries: fs::ReadDir,
}

impl Iterator for ActiveFiles {
    type Item = VaultResult<StoredFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(VaultError::ReadDir {
                        path: self.dir.clone(),
                        source,
                    }))
                }
            };

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(source) => return Some(Err(VaultError::FileRead { path, source })),
            };
            if !metadata.is_file() {
                continue;
            }

            let Some(name) = entry
                .file_name()
                .to_str()
                .and_then(|n| FileName::new(n).ok())
            else {
                tracing::warn!("skipping non UTF-8 entry: {}", path.display());
                continue;
            };

            let media_type = infer::get_from_path(&path)
                .ok()
                .flatten()
                .map(|kind| kind.mime_type().to_string());

            return Some(Ok(StoredFile {
                name,
                size_bytes: metadata.len(),
                media_type,
            }));
        }
    }
}
