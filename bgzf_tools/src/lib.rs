//! Walks the block structure of BGZF files without inflating them.
//!
//! A BGZF file is a series of gzip members, each carrying a "BC" extra
//! subfield with the size of the compressed block, closed by an empty
//! EOF marker member:
//!
//! ```text
//! | header (12) | BC subfield (6) | deflate payload | CRC32 (4) | ISIZE (4) |
//! ```
//!
//! ```no_run
//! use bgzf_tools::{BlockWalker, SeekSource};
//! use std::fs::File;
//!
//! let source = SeekSource::new(File::open("sample.bam")?)?;
//! let mut walker = BlockWalker::new(source);
//! for report in walker.walk() {
//!     let report = report?;
//!     println!("{} {}", report.offset, report.compressed_payload_length);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod gz;
mod member;
mod sink;
mod source;
mod walker;

pub use error::{BgzfError, Result, Stage};
pub use member::{
    compressed_payload_length, BgzfExtraSubfield, GzipMemberHeader, GzipMemberTrailer,
    MemberReport,
};
pub use sink::{MemberSink, WalkSummary};
pub use source::{ByteSource, SeekSource, StreamSource};
pub use walker::{BlockWalker, Members, WalkerOptions};
