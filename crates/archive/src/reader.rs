//! Tar container reader
//!
//! Reads the entries of an already decompressed tar archive in stream order.
//! Entries are produced lazily by [`Entries`], but each entry's content is
//! read to completion before the next header is parsed: the tar cursor only
//! moves forward.

use std::io::Read;
use tar::{Archive, EntryType};
use tracing::debug;
use xzlog_core::{ArchiveEntry, Error, Result};

/// Reader over decoded tar bytes
///
/// ```
/// use xzlog_archive::ArchiveReader;
///
/// // Two zero blocks: a valid archive with no entries
/// let empty = vec![0u8; 1024];
/// assert!(ArchiveReader::extract_entries(&empty).unwrap().is_empty());
/// ```
pub struct ArchiveReader<'a> {
    archive: Archive<&'a [u8]>,
}

impl<'a> ArchiveReader<'a> {
    /// Create a reader over `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            archive: Archive::new(data),
        }
    }

    /// Iterate over entries in container order
    ///
    /// Metadata records (pax global headers, volume labels) are consumed
    /// and never yielded. The iterator yields at most one error and then
    /// stops.
    pub fn entries(&mut self) -> Result<Entries<'_, 'a>> {
        let inner = self
            .archive
            .entries()
            .map_err(|e| Error::extraction(e.to_string()))?;
        Ok(Entries {
            inner,
            next_index: 0,
            done: false,
        })
    }

    /// Read every entry of `data` in order
    ///
    /// # Errors
    ///
    /// [`Error::Extraction`] on a malformed entry header, a truncated entry
    /// body, or an unexpected end of stream. No entries are returned on
    /// failure.
    pub fn extract_entries(data: &[u8]) -> Result<Vec<ArchiveEntry>> {
        let mut reader = ArchiveReader::new(data);
        let entries = reader.entries()?.collect::<Result<Vec<_>>>()?;
        debug!("Extracted {} entries from {} tar bytes", entries.len(), data.len());
        Ok(entries)
    }

    /// Concatenate the content of every entry of `data` in order
    ///
    /// Each body is read straight into the returned buffer, so no entry is
    /// held separately. Fails like [`ArchiveReader::extract_entries`].
    pub fn concat_contents(data: &[u8]) -> Result<Vec<u8>> {
        let mut reader = ArchiveReader::new(data);
        let mut entries = reader.entries()?;
        let mut blob = Vec::new();
        while let Some(name) = entries.next_into(&mut blob) {
            name?;
        }
        debug!(
            "Concatenated {} entries into {} bytes",
            entries.next_index,
            blob.len()
        );
        Ok(blob)
    }
}

/// Lazy, fused iterator over the entries of an [`ArchiveReader`]
pub struct Entries<'r, 'a: 'r> {
    inner: tar::Entries<'r, &'a [u8]>,
    next_index: usize,
    done: bool,
}

impl<'r, 'a> Entries<'r, 'a> {
    /// Append the next entry's content to `out` and return its name
    ///
    /// Shares position and fused state with the iterator. On error `out`
    /// is left as it was before the call.
    pub fn next_into(&mut self, out: &mut Vec<u8>) -> Option<Result<String>> {
        let result = match self.next_content_entry()? {
            Ok(entry) => read_body(entry, out),
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => self.next_index += 1,
            Err(_) => self.done = true,
        }
        Some(result)
    }

    fn next_content_entry(&mut self) -> Option<Result<tar::Entry<'r, &'a [u8]>>> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.next()? {
                Ok(entry) if is_metadata(entry.header().entry_type()) => {
                    debug!("Skipping {:?} record", entry.header().entry_type());
                }
                Ok(entry) => return Some(Ok(entry)),
                Err(e) => return Some(Err(Error::extraction(e.to_string()))),
            }
        }
    }
}

impl<'r, 'a> Iterator for Entries<'r, 'a> {
    type Item = Result<ArchiveEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index;
        let mut content = Vec::new();
        let name = self.next_into(&mut content)?;
        Some(name.map(|name| ArchiveEntry {
            name,
            index,
            content,
        }))
    }
}

/// Records that describe the archive rather than carry file content
fn is_metadata(kind: EntryType) -> bool {
    // 'V' is a GNU volume label
    matches!(kind, EntryType::XGlobalHeader) || kind.as_byte() == b'V'
}

fn read_body<R: Read>(mut entry: tar::Entry<'_, R>, out: &mut Vec<u8>) -> Result<String> {
    let name = entry
        .path()
        .map_err(|e| Error::extraction(e.to_string()))?
        .to_string_lossy()
        .into_owned();

    // Header sizes are untrusted: don't preallocate from them
    let expected = entry.size();
    let start = out.len();
    if let Err(e) = entry.read_to_end(out) {
        out.truncate(start);
        return Err(Error::extraction(format!("read {}: {}", name, e)));
    }

    let read = out.len() - start;
    if (read as u64) < expected {
        out.truncate(start);
        return Err(Error::extraction(format!(
            "truncated entry {}: expected {} bytes, got {}",
            name, expected, read
        )));
    }
    Ok(name)
}
