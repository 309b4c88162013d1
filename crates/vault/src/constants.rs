//! Path names and limits used by the vault.

/// Directory name of the active store, relative to the data directory.
pub const ACTIVE_DIR_NAME: &str = "uploads";

/// Directory name of the archive store, relative to the data directory.
pub const ARCHIVE_DIR_NAME: &str = "backup";

/// Data directory used when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = ".";

/// Length of a generated recovery code.
pub const RECOVERY_CODE_LENGTH: usize = 8;

/// Symbols a recovery code is drawn from.
pub const RECOVERY_CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How many fresh codes ingest tries before giving up on an in-session collision.
pub const MAX_CODE_ATTEMPTS: usize = 16;

/// Extensions accepted by the upload form. Advisory only: the vault itself stores any bytes.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
