//! Content assembly
//!
//! Classifies a source, decompresses it and, for containers, flattens the
//! entries into one text blob. Entries are joined in container order with no
//! separator and no file name header. Non-UTF-8 entry bytes are carried into
//! the blob and decoded with replacement characters, so a container mixing
//! binary and text entries produces lossy output. Entry bodies are read
//! straight into the blob, so only the decoded stream and the blob are held.

use crate::decompress::StreamDecompressor;
use crate::reader::ArchiveReader;
use std::path::Path;
use xzlog_core::{ArchiveEntry, AssembledContent, Result, SourceArtifact, SourceKind};

/// A source decoded and assembled for display or offload
#[derive(Debug)]
pub struct Assembled {
    content: AssembledContent,
    /// Decompressed tar stream, kept for containers only
    stream: Option<Vec<u8>>,
}

impl Assembled {
    /// Assembled content size in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the assembled content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Assembled content
    pub fn content(&self) -> &AssembledContent {
        &self.content
    }

    /// Bytes to persist when the content is offloaded to disk
    ///
    /// For a container this is the decompressed tar stream, so the offload
    /// target is itself a valid archive. For a single stream it is the
    /// decoded bytes.
    pub fn offload_bytes(&self) -> &[u8] {
        match &self.stream {
            Some(stream) => stream,
            None => self.content.as_bytes(),
        }
    }

    /// Convert into displayable text
    pub fn into_text(self) -> String {
        self.content.into_text()
    }
}

/// Composes decompression and tar extraction
pub struct ContentAssembler;

impl ContentAssembler {
    /// Classify `path`, decompress `compressed` and assemble the result
    ///
    /// Containers produce [`AssembledContent::Text`], single streams
    /// [`AssembledContent::Bytes`]. Errors from classification,
    /// decompression and extraction are returned unchanged.
    pub fn assemble(path: &Path, compressed: &[u8]) -> Result<AssembledContent> {
        let source = SourceArtifact::classify(path)?;
        Ok(Self::assemble_source(&source, compressed)?.content)
    }

    /// Assemble an already classified source
    pub fn assemble_source(source: &SourceArtifact, compressed: &[u8]) -> Result<Assembled> {
        let decoded = StreamDecompressor::decompress(source.codec(), compressed)?;

        match source.kind() {
            SourceKind::SingleStream => Ok(Assembled {
                content: AssembledContent::Bytes(decoded),
                stream: None,
            }),
            SourceKind::Container => {
                let blob = ArchiveReader::concat_contents(&decoded)?;
                Ok(Assembled {
                    content: AssembledContent::Text(AssembledContent::Bytes(blob).into_text()),
                    stream: Some(decoded),
                })
            }
        }
    }

    /// Join entry contents in order into one string
    pub fn concatenate(entries: &[ArchiveEntry]) -> String {
        let total = entries.iter().map(|e| e.content.len()).sum();
        let mut blob = Vec::with_capacity(total);
        for entry in entries {
            blob.extend_from_slice(&entry.content);
        }
        AssembledContent::Bytes(blob).into_text()
    }
}
