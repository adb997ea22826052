//! Locally-addressable resource references.

use std::fmt;

/// Reference to a locally-addressable resource, such as a file handed back
/// by a chooser dialog.
///
/// The remote runtime speaks in opaque path strings; the native side wants
/// addressable references. This is the conversion target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceUri {
    uri: String,
}

impl ResourceUri {
    /// Builds a `file`-scheme reference from a local path.
    pub fn from_file_path(path: &str) -> Self {
        Self {
            uri: format!("file://{path}"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for ResourceUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}
