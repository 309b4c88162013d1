//! File-backed recovery map for the CLI.
//!
//! Each CLI invocation is its own process, so the recovery codes of a "session" are kept in a
//! JSON file under the data directory instead of in memory.

use safekeep_vault::RecoveryMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the CLI session, relative to the data directory.
pub const SESSION_FILE_NAME: &str = ".safekeep-session.json";

pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Loads the session map; a missing file is an empty session.
pub fn load(path: &Path) -> Result<RecoveryMap, Box<dyn std::error::Error>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(RecoveryMap::new()),
        Err(e) => Err(Box::new(e)),
    }
}

/// Writes the session map via a temp file and rename, so a crash never leaves half a file.
pub fn save(path: &Path, map: &RecoveryMap) -> Result<(), Box<dyn std::error::Error>> {
    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, serde_json::to_vec_pretty(map)?)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Box::new(e));
    }
    Ok(())
}
