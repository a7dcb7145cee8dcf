//! Decoding layer for xzlog
//!
//! Turns the raw bytes of a compressed source into content:
//!
//! ```text
//! compressed bytes ──► StreamDecompressor ──► decoded bytes
//!                                                 │
//!                         SingleStream ◄──────────┤
//!                                                 ▼ Container
//!                                           ArchiveReader ──► entries (in order)
//!                                                 │
//!                                                 ▼
//!                                      ContentAssembler ──► AssembledContent
//! ```
//!
//! Everything here is synchronous and operates on fully buffered input. The
//! engine crate moves these calls off the async executor.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod assemble;
mod decompress;
mod reader;

pub use assemble::{Assembled, ContentAssembler};
pub use decompress::StreamDecompressor;
pub use reader::{ArchiveReader, Entries};
