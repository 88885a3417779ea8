use crate::member::MemberReport;
use serde::Serialize;
use std::io;

/// Totals for a finished (or abandoned) walk.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkSummary {
    pub members: usize,
    /// Sum of the compressed payload lengths, headers and trailers excluded.
    pub compressed_bytes: u64,
    /// Bytes consumed by whole members.
    pub bytes_consumed: u64,
    pub end_offset: u64,
    pub eof_marker: bool,
    /// Bytes left in the input after the last member, when the input length is known.
    pub trailing_bytes: Option<u64>,
}

/// Receives members as they are decoded.
pub trait MemberSink {
    /// `index` counts members from 1, in stream order.
    fn member(&mut self, index: usize, report: &MemberReport) -> io::Result<()>;

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        Ok(())
    }
}

impl MemberSink for Vec<MemberReport> {
    fn member(&mut self, _index: usize, report: &MemberReport) -> io::Result<()> {
        self.push(*report);
        Ok(())
    }
}
