//! Session-scoped mapping from recovery code to filename.

use crate::{FileName, RecoveryCode, VaultError, VaultResult};
use std::collections::HashMap;

/// Recovery codes issued during one session and the filenames they restore.
///
/// The map is append-only: entries are added by ingest and never replaced or removed, so a
/// re-upload of the same name gets a new code while older codes keep resolving to that name.
/// It is plain data owned by whoever hosts the session; the vault only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RecoveryMap {
    entries: HashMap<RecoveryCode, FileName>,
}

impl RecoveryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `code → filename`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::DuplicateCode`] if `code` is already mapped; the existing entry is
    /// left untouched.
    pub fn insert(&mut self, code: RecoveryCode, filename: FileName) -> VaultResult<()> {
        if self.entries.contains_key(&code) {
            return Err(VaultError::DuplicateCode(code));
        }
        self.entries.insert(code, filename);
        Ok(())
    }

    /// Looks up the filename for `code` by exact string match.
    pub fn resolve(&self, code: &str) -> Option<&FileName> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecoveryCode, &FileName)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn name(s: &str) -> FileName {
        FileName::new(s).unwrap()
    }

    #[test]
    fn test_insert_and_resolve() {
        let mut map = RecoveryMap::new();
        let code = RecoveryCode::generate();
        map.insert(code.clone(), name("a.png")).unwrap();

        assert_eq!(map.resolve(code.as_str()), Some(&name("a.png")));
        assert!(map.contains(code.as_str()));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_resolve_is_exact_match() {
        let mut map = RecoveryMap::new();
        let code = RecoveryCode::generate_with(&mut StdRng::seed_from_u64(3));
        map.insert(code.clone(), name("a.png")).unwrap();

        let lowered = code.as_str().to_lowercase();
        if lowered != code.as_str() {
            assert_eq!(map.resolve(&lowered), None);
        }
        assert_eq!(map.resolve(&format!(" {code}")), None);
        assert_eq!(map.resolve(&code.as_str()[..7]), None);
        assert_eq!(map.resolve("ZZZZZZZZ"), None);
    }

    #[test]
    fn test_insert_duplicate_keeps_original() {
        let mut map = RecoveryMap::new();
        let code = RecoveryCode::generate();
        map.insert(code.clone(), name("first.png")).unwrap();

        let err = map.insert(code.clone(), name("second.png")).unwrap_err();
        assert!(matches!(err, VaultError::DuplicateCode(c) if c == code));
        assert_eq!(map.resolve(code.as_str()), Some(&name("first.png")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_many_codes_same_file() {
        let mut map = RecoveryMap::new();
        let mut rng = StdRng::seed_from_u64(9);
        let a = RecoveryCode::generate_with(&mut rng);
        let b = RecoveryCode::generate_with(&mut rng);
        map.insert(a.clone(), name("same.png")).unwrap();
        map.insert(b.clone(), name("same.png")).unwrap();

        assert_eq!(map.resolve(a.as_str()), map.resolve(b.as_str()));
        assert_eq!(map.iter().count(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut map = RecoveryMap::new();
        assert!(map.is_empty());
        let code = RecoveryCode::generate();
        map.insert(code.clone(), name("a.png")).unwrap();

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json[code.as_str()], "a.png");

        let back: RecoveryMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
