//! One-line notices shown to the user after each interaction.
//!
//! Every vault outcome, expected or not, ends up as exactly one of these (ingest yields two:
//! the confirmation and the code to keep).

use safekeep_vault::{DeleteOutcome, FileName, RecoverOutcome, RecoveryCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    /// Confirmation plus the code the user has to keep.
    pub fn ingested(code: &RecoveryCode) -> Vec<Self> {
        vec![
            Self::success("File uploaded and backed up successfully!"),
            Self::info(format!("Recovery Code: {code} (Save this code!)")),
        ]
    }

    pub fn delete(filename: &FileName, outcome: DeleteOutcome) -> Self {
        match outcome {
            DeleteOutcome::Deleted => Self::warning(format!("{filename} deleted from uploads/")),
            DeleteOutcome::NotFound => Self::error("File not found."),
        }
    }

    pub fn recover(outcome: &RecoverOutcome) -> Self {
        match outcome {
            RecoverOutcome::Recovered(filename) => Self::success(format!("Recovered: {filename}")),
            RecoverOutcome::ArchiveMissing(_) => Self::error("Backup missing."),
            RecoverOutcome::InvalidCode => Self::error("Invalid recovery code."),
        }
    }

    pub fn no_files() -> Self {
        Self::info("No images found.")
    }

    /// Generic notice for failures the user can only retry.
    pub fn storage_failure() -> Self {
        Self::error("Storage error, please try again.")
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
