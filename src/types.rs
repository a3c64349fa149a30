//! Core, format-agnostic types for langswitch.
//! Codecs decode into these; tables consume and produce them.

use std::borrow::Cow;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single key/value record exchanged with a codec.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TextRecord {
    pub key: String,
    pub value: String,
}

impl TextRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        TextRecord {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for TextRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

/// Where a native table comes from.
///
/// The source doubles as the table's logical identity: path derivation for
/// translation files runs on the string form returned by [`identity`].
///
/// [`identity`]: ResourceSource::identity
#[derive(Debug, Clone)]
pub enum ResourceSource {
    /// A native table stored as a file on disk.
    File(PathBuf),

    /// A native table compiled into the binary (`include_bytes!`), identified
    /// by a logical component path such as
    /// `/myapp;component/settings.general.xml`.
    Embedded {
        identity: String,
        bytes: Cow<'static, [u8]>,
    },
}

impl ResourceSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ResourceSource::File(path.into())
    }

    pub fn embedded(identity: impl Into<String>, bytes: impl Into<Cow<'static, [u8]>>) -> Self {
        ResourceSource::Embedded {
            identity: identity.into(),
            bytes: bytes.into(),
        }
    }

    /// The logical path string used for translation path derivation.
    pub fn identity(&self) -> String {
        match self {
            ResourceSource::File(path) => path.to_string_lossy().into_owned(),
            ResourceSource::Embedded { identity, .. } => identity.clone(),
        }
    }

    /// The on-disk path, for file-backed sources.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            ResourceSource::File(path) => Some(path),
            ResourceSource::Embedded { .. } => None,
        }
    }
}
