//! # API Shared
//!
//! Shared definitions for the Safekeep front-ends.
//!
//! Contains:
//! - Request/response types with OpenAPI schemas
//! - One-line user notices rendered from vault outcomes (`notice` module)
//! - `HealthService`
//!
//! Used by `api-rest` and the `safekeep` CLI.

pub mod health;
pub mod notice;

pub use health::HealthService;
pub use notice::{Notice, NoticeLevel};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Header carrying the session id that scopes a recovery map.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Result of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngestRes {
    pub filename: String,
    /// Code that restores this upload; only valid within `session_id`.
    pub recovery_code: String,
    pub session_id: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteReq {
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteStatus {
    Deleted,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteRes {
    pub outcome: DeleteStatus,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecoverReq {
    pub recovery_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecoverStatus {
    Recovered,
    InvalidCode,
    ArchiveMissing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecoverRes {
    pub outcome: RecoverStatus,
    /// Set when the code resolved to a file, whether or not it could be restored.
    pub filename: Option<String>,
    pub notice: Notice,
}

/// One file in the active store, as shown in the file viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub media_type: Option<String>,
    /// Where the file's bytes can be fetched for a thumbnail.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListFilesRes {
    pub files: Vec<FileEntry>,
    /// Present when there is nothing to show.
    pub notice: Option<Notice>,
}

impl From<safekeep_vault::DeleteOutcome> for DeleteStatus {
    fn from(outcome: safekeep_vault::DeleteOutcome) -> Self {
        match outcome {
            safekeep_vault::DeleteOutcome::Deleted => Self::Deleted,
            safekeep_vault::DeleteOutcome::NotFound => Self::NotFound,
        }
    }
}

impl From<&safekeep_vault::RecoverOutcome> for RecoverStatus {
    fn from(outcome: &safekeep_vault::RecoverOutcome) -> Self {
        match outcome {
            safekeep_vault::RecoverOutcome::Recovered(_) => Self::Recovered,
            safekeep_vault::RecoverOutcome::InvalidCode => Self::InvalidCode,
            safekeep_vault::RecoverOutcome::ArchiveMissing(_) => Self::ArchiveMissing,
        }
    }
}

impl From<safekeep_vault::RecoverOutcome> for RecoverRes {
    fn from(outcome: safekeep_vault::RecoverOutcome) -> Self {
        let notice = Notice::recover(&outcome);
        let status = RecoverStatus::from(&outcome);
        let filename = match outcome {
            safekeep_vault::RecoverOutcome::Recovered(name)
            | safekeep_vault::RecoverOutcome::ArchiveMissing(name) => Some(name.into_inner()),
            safekeep_vault::RecoverOutcome::InvalidCode => None,
        };
        Self {
            outcome: status,
            filename,
            notice,
        }
    }
}
