//! Validated text types shared by the Safekeep crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty
    #[error("Text cannot be empty")]
    Empty,

    /// The input names a directory entry that is not a plain file name
    #[error("Reserved file name: {0}")]
    Reserved(String),

    /// The input contains a character that would address another directory
    #[error("File name contains a forbidden character: {0:?}")]
    ForbiddenCharacter(char),
}

/// Characters that would let a file name escape a flat store directory.
const FORBIDDEN_CHARS: [char; 3] = ['/', '\\', '\0'];

/// The name of a stored file, exactly as it was uploaded.
///
/// Names are kept verbatim: no trimming, case folding or renaming happens here. The only
/// guarantee is that the name addresses a single entry inside a flat directory, so it can
/// be joined onto the active or archive store path without leaving it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileName(String);

impl FileName {
    /// Validates `input` as a flat file name.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] for an empty string, [`TextError::Reserved`] for `.` and
    /// `..`, and [`TextError::ForbiddenCharacter`] if the name contains a path separator or NUL.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let name = input.into();
        if name.is_empty() {
            return Err(TextError::Empty);
        }
        if name == "." || name == ".." {
            return Err(TextError::Reserved(name));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(TextError::ForbiddenCharacter(c));
        }
        Ok(Self(name))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lowercased extension, if the name has one.
    ///
    /// A leading dot does not start an extension (`.png` has none).
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.0.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Consumes the name, returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for FileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for FileName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl std::str::FromStr for FileName {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for FileName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FileName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FileName::new(s).map_err(serde::de::Error::custom)
    }
}
