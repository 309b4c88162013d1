//! Safekeep Vault
//!
//! Keeps uploaded files in two flat directories and hands out recovery codes that can
//! restore a file after it has been deleted.
//!
//! ## Storage Model
//!
//! ```text
//! <data_dir>/
//! ├── uploads/      # active store, what the user sees and deletes
//! │   └── photo.jpg
//! └── backup/       # archive store, written once per upload, never pruned
//!     └── photo.jpg
//! ```
//!
//! - Ingest writes the bytes to `uploads/` and copies that file to `backup/`
//! - Delete only ever touches `uploads/`
//! - Recover copies `backup/<name>` back over `uploads/<name>`
//! - Filenames are used verbatim; a later upload of the same name replaces both copies
//!
//! The code → filename mapping ([`RecoveryMap`]) is not owned by the vault. The hosting layer
//! keeps one map per user session and passes it into [`FileVault::ingest`] and
//! [`FileVault::recover`].
//!
//! ## Example Usage
//!
//! ```no_run
//! use safekeep_vault::{FileName, FileVault, RecoverOutcome, RecoveryMap, VaultConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vault = FileVault::open(&VaultConfig::new("data"))?;
//! let mut session = RecoveryMap::new();
//!
//! let name = FileName::new("photo.jpg")?;
//! let code = vault.ingest(&mut session, &name, b"IMGDATA")?;
//! vault.delete(&name)?;
//!
//! let outcome = vault.recover(&session, code.as_str())?;
//! assert_eq!(outcome, RecoverOutcome::Recovered(name));
//! # Ok(())
//! # }
//! ```

mod code;
mod config;
mod constants;
mod recovery;
mod vault;

pub use code::{generate_code, RecoveryCode};
pub use config::VaultConfig;
pub use constants::{
    ACTIVE_DIR_NAME, ARCHIVE_DIR_NAME, DEFAULT_DATA_DIR, IMAGE_EXTENSIONS, MAX_CODE_ATTEMPTS,
    RECOVERY_CODE_ALPHABET, RECOVERY_CODE_LENGTH,
};
pub use recovery::RecoveryMap;
pub use safekeep_types::{FileName, TextError};
pub use vault::{media_type, ActiveFiles, DeleteOutcome, FileVault, RecoverOutcome, StoredFile};

use std::path::PathBuf;

/// Errors that can occur during vault operations
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    /// The active or archive directory could not be created
    #[error("failed to create storage directory {}: {source}", path.display())]
    StorageDirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing uploaded bytes into the active store failed
    #[error("failed to write file {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying between the active and archive stores failed
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing a file from the active store failed for a reason other than absence
    #[error("failed to remove file {}: {source}", path.display())]
    FileRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a stored file failed
    #[error("failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Enumerating a store directory failed
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested file is not in the active store
    #[error("file not found: {0}")]
    FileNotFound(FileName),

    /// Filename cannot be used as a flat store entry
    #[error("invalid file name: {0}")]
    InvalidFileName(#[from] TextError),

    /// Recovery code is already mapped in this session
    #[error("recovery code already issued: {0}")]
    DuplicateCode(RecoveryCode),

    /// Every generated recovery code collided with an existing one
    #[error("no unused recovery code found after {0} attempts")]
    CodeSpaceExhausted(usize),
}

impl VaultError {
    /// Returns true for failures reported by the operating system while touching the stores.
    pub fn is_storage_io(&self) -> bool {
        matches!(
            self,
            Self::StorageDirCreation { .. }
                | Self::FileWrite { .. }
                | Self::FileCopy { .. }
                | Self::FileRemove { .. }
                | Self::FileRead { .. }
                | Self::ReadDir { .. }
        )
    }
}

pub type VaultResult<T> = std::result::Result<T, VaultError>;
