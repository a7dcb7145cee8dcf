//! Single-stream decompression
//!
//! Decodes one fully buffered compressed input into raw bytes. There is no
//! output cap here: size gating is applied by the materialization policy to
//! the decoded length, not to the input.

use std::io::Read;
use tracing::debug;
use xzlog_core::{Codec, Error, Result};

/// Decoder for a self-contained compressed byte stream
pub struct StreamDecompressor;

impl StreamDecompressor {
    /// Decompress `data` with `codec`
    ///
    /// Concatenated xz streams and multi-frame zstd input are decoded in
    /// order into one output buffer.
    ///
    /// # Errors
    ///
    /// [`Error::Decompression`] when the input is empty, has a corrupt header,
    /// is truncated, or fails its integrity check. The partially decoded
    /// output is discarded.
    pub fn decompress(codec: Codec, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(Error::decompression(format!(
                "{} decode: empty input",
                codec_name(codec)
            )));
        }

        let mut out = Vec::new();
        let decoded = match codec {
            Codec::Xz => xz2::bufread::XzDecoder::new_multi_decoder(data).read_to_end(&mut out),
            Codec::Zstd => zstd::stream::read::Decoder::with_buffer(data)
                .and_then(|mut decoder| decoder.read_to_end(&mut out)),
        };

        match decoded {
            Ok(n) => {
                debug!(
                    "Decompressed {} {} bytes into {} bytes",
                    data.len(),
                    codec_name(codec),
                    n
                );
                Ok(out)
            }
            Err(e) => Err(Error::decompression(format!(
                "{} decode: {}",
                codec_name(codec),
                e
            ))),
        }
    }
}

fn codec_name(codec: Codec) -> &'static str {
    match codec {
        Codec::Xz => "xz",
        Codec::Zstd => "zstd",
    }
}
