//! Core types for the decode pipeline
//!
//! This module defines the fundamental types used throughout the system:
//! - [`SourceArtifact`]: a compressed file classified by its name suffix
//! - [`ArchiveEntry`]: one entry read from a tar container
//! - [`AssembledContent`]: text or bytes produced from a source
//! - [`ViewId`]: unique identifier for a materialized view

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// URI scheme of materialized views
pub const VIEW_SCHEME: &str = "xz-view";

/// Marker appended to the source path to form a view URI
pub const VIEW_SUFFIX: &str = ".xz-view";

/// Unique identifier for a materialized view
///
/// A fresh ViewId is allocated every time a decode pipeline registers a
/// binding, so two successive views of the same source never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    /// Create a new random ViewId using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use xzlog_core::ViewId;
    ///
    /// let id1 = ViewId::new();
    /// let id2 = ViewId::new();
    /// assert_ne!(id1, id2);
    /// ```
    pub fn new() -> Self {
        ViewId(Uuid::new_v4())
    }

    /// Get raw bytes representation
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compression codec of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// LZMA2 in the `.xz` container format
    Xz,
    /// Zstandard frames
    Zstd,
}

impl Codec {
    /// All recognised codecs
    pub const ALL: [Codec; 2] = [Codec::Xz, Codec::Zstd];

    /// File name suffix of a bare compressed stream
    pub fn suffix(self) -> &'static str {
        match self {
            Codec::Xz => ".xz",
            Codec::Zstd => ".zst",
        }
    }

    /// File name suffix of a compressed tar container
    pub fn container_suffix(self) -> &'static str {
        match self {
            Codec::Xz => ".tar.xz",
            Codec::Zstd => ".tar.zst",
        }
    }
}

/// Layout of the decompressed bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// One compressed stream, no internal structure
    SingleStream,
    /// A tar archive with zero or more entries
    Container,
}

/// A compressed source file, classified by its name suffix
///
/// Classification is case-sensitive and the container suffix wins over the
/// bare stream suffix (`a.tar.xz` is a container, `a.xz` is a stream).
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceArtifact {
    path: PathBuf,
    codec: Codec,
    kind: SourceKind,
}

impl SourceArtifact {
    /// Classify `path` by its file name suffix
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSource`] when the file name is not valid
    /// UTF-8, carries no recognised suffix, or consists of the suffix alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use xzlog_core::{Codec, SourceArtifact, SourceKind};
    ///
    /// let src = SourceArtifact::classify("/var/log/app.tar.xz").unwrap();
    /// assert_eq!(src.kind(), SourceKind::Container);
    /// assert_eq!(src.codec(), Codec::Xz);
    /// ```
    pub fn classify(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::unsupported(path, "file name is missing or not UTF-8"))?;

        for codec in Codec::ALL {
            if let Some(stem) = name.strip_suffix(codec.container_suffix()) {
                if stem.is_empty() {
                    return Err(Error::unsupported(path, "file name is only a suffix"));
                }
                return Ok(Self::new(path, codec, SourceKind::Container));
            }
        }
        for codec in Codec::ALL {
            if name.ends_with(codec.suffix()) && name.len() > codec.suffix().len() {
                return Ok(Self::new(path, codec, SourceKind::SingleStream));
            }
        }

        Err(Error::unsupported(path, "no recognised compression suffix"))
    }

    fn new(path: &Path, codec: Codec, kind: SourceKind) -> Self {
        Self {
            path: path.to_path_buf(),
            codec,
            kind,
        }
    }

    /// Path of the compressed file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compression codec
    pub fn codec(&self) -> Codec {
        self.codec
    }

    /// Single stream or container
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Upper-cased suffix used in user-facing messages (`XZ`, `TAR.XZ`, ...)
    pub fn label(&self) -> String {
        let suffix = match self.kind {
            SourceKind::SingleStream => self.codec.suffix(),
            SourceKind::Container => self.codec.container_suffix(),
        };
        suffix.trim_start_matches('.').to_ascii_uppercase()
    }

    /// Sibling path with exactly the compression suffix removed
    ///
    /// `app.log.xz` maps to `app.log` and `bundle.tar.xz` to `bundle.tar`.
    pub fn output_path(&self) -> PathBuf {
        // classify() guarantees a UTF-8 file name ending in the codec suffix
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let stem = name.strip_suffix(self.codec.suffix()).unwrap_or(name);
        self.path.with_file_name(stem)
    }

    /// URI of the view materialized for this source
    ///
    /// ```
    /// use xzlog_core::SourceArtifact;
    ///
    /// let src = SourceArtifact::classify("/var/log/app.log.xz").unwrap();
    /// assert_eq!(src.view_uri(), "xz-view:/var/log/app.log.xz.xz-view");
    /// ```
    pub fn view_uri(&self) -> String {
        format!("{}:{}{}", VIEW_SCHEME, self.path.display(), VIEW_SUFFIX)
    }
}

impl std::fmt::Display for SourceArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Recover the source path from a view URI
///
/// Returns `None` when `uri` does not use the view scheme.
pub fn source_path_for_view(uri: &str) -> Option<PathBuf> {
    let rest = uri.strip_prefix(VIEW_SCHEME)?.strip_prefix(':')?;
    let path = rest.strip_suffix(VIEW_SUFFIX).unwrap_or(rest);
    Some(PathBuf::from(path))
}

/// One entry of a tar container
///
/// Entries keep the order in which they appear in the container stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Entry path as recorded in the header
    pub name: String,
    /// Ordinal position in the container, starting at 0
    pub index: usize,
    /// Raw entry content
    pub content: Vec<u8>,
}

/// Result of assembling a decoded source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembledContent {
    /// Container entries concatenated in order, decoded as UTF-8
    Text(String),
    /// Decoded single-stream bytes
    Bytes(Vec<u8>),
}

impl AssembledContent {
    /// Size in bytes
    pub fn len(&self) -> usize {
        match self {
            AssembledContent::Text(s) => s.len(),
            AssembledContent::Bytes(b) => b.len(),
        }
    }

    /// Check if there is no content
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the content as bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AssembledContent::Text(s) => s.as_bytes(),
            AssembledContent::Bytes(b) => b,
        }
    }

    /// Convert into displayable text
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD. Valid input
    /// is moved without copying.
    pub fn into_text(self) -> String {
        match self {
            AssembledContent::Text(s) => s,
            AssembledContent::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => s,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            },
        }
    }
}
