//! Errors produced while walking a BGZF stream.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for block walking.
pub type Result<T> = std::result::Result<T, BgzfError>;

/// Part of a member that was being read when the input ran out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Header,
    Subfield,
    Payload,
    Trailer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Header => "header",
            Stage::Subfield => "extra subfield",
            Stage::Payload => "compressed payload",
            Stage::Trailer => "trailer",
        };
        f.write_str(s)
    }
}

/// Every variant records `offset`, the position of the member the error belongs to.
#[derive(Debug, Error)]
pub enum BgzfError {
    #[error("I/O error at offset {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The stream is not gzip at all.
    #[error("invalid BGZF header magic at offset {offset}: expected 1f 8b, got {found:02x?}")]
    InvalidMagic { offset: u64, found: [u8; 2] },

    /// Gzip, but not shaped the way BGZF members are.
    #[error("gzip member at offset {offset} is not BGZF: {reason}")]
    UnsupportedGzipVariant { offset: u64, reason: String },

    /// BSIZE is too small to hold the header, extra field and trailer.
    #[error("malformed block size at offset {offset}: BSIZE {bsize} cannot hold XLEN {xlen}")]
    MalformedBlockSize { offset: u64, bsize: u16, xlen: u16 },

    #[error("truncated member at offset {offset}: {stage} needs {expected} bytes, only {available} available")]
    TruncatedMember {
        offset: u64,
        stage: Stage,
        expected: u64,
        available: u64,
    },

    /// The input ended between two members without an EOF marker block.
    #[error("file ended at offset {offset} after {members} members without an explicit EOF marker")]
    MissingEofMarker { offset: u64, members: usize },
}

impl BgzfError {
    pub fn offset(&self) -> u64 {
        match *self {
            BgzfError::Io { offset, .. }
            | BgzfError::InvalidMagic { offset, .. }
            | BgzfError::UnsupportedGzipVariant { offset, .. }
            | BgzfError::MalformedBlockSize { offset, .. }
            | BgzfError::TruncatedMember { offset, .. }
            | BgzfError::MissingEofMarker { offset, .. } => offset,
        }
    }

    /// A missing EOF marker leaves every member intact; everything else is fatal.
    pub fn is_warning(&self) -> bool {
        matches!(self, BgzfError::MissingEofMarker { .. })
    }

    pub(crate) fn unsupported(offset: u64, reason: impl Into<String>) -> Self {
        BgzfError::UnsupportedGzipVariant {
            offset,
            reason: reason.into(),
        }
    }
}
