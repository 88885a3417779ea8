use crate::error::{BgzfError, Result, Stage};
use crate::gz::{
    CompressionMethod, BGZF_SUBFIELD_LEN, BGZF_XLEN, FLAG_FEXTRA, HEADER_SIZE, MAGIC_NUMBER,
    SUBFIELD_SIZE, TRAILER_SIZE,
};
use crate::member::{
    compressed_payload_length, BgzfExtraSubfield, GzipMemberHeader, GzipMemberTrailer,
    MemberReport,
};
use crate::sink::{MemberSink, WalkSummary};
use crate::source::ByteSource;
use log::{debug, trace};
use std::io;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct WalkerOptions {
    /// Also require the "BC" identifier, SLEN == 2 and XLEN == 6.
    pub strict: bool,
}

impl WalkerOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Walks a BGZF stream member by member without inflating anything.
///
/// The cursor lives in the byte source; the walker only adds the counters
/// that make up a [`WalkSummary`].
pub struct BlockWalker<S> {
    source: S,
    options: WalkerOptions,
    start: u64,
    members: usize,
    compressed_bytes: u64,
    seen_terminal: bool,
}

impl<S: ByteSource> BlockWalker<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, WalkerOptions::default())
    }

    pub fn with_options(source: S, options: WalkerOptions) -> Self {
        let start = source.tell();
        Self {
            source,
            options,
            start,
            members: 0,
            compressed_bytes: 0,
            seen_terminal: false,
        }
    }

    /// Decodes the member under the cursor and moves the cursor to the next one.
    ///
    /// Returns `Ok(None)` if the input ends exactly here. On error the cursor
    /// position is unspecified; there is no resynchronisation.
    pub fn decode_next_member(&mut self) -> Result<Option<MemberReport>> {
        let offset = self.source.tell();

        let mut buf = [0; HEADER_SIZE];
        if self.read_stage(offset, Stage::Header, &mut buf)? == 0 {
            return Ok(None);
        }
        trace!("header at {}: {:02x?}", offset, buf);
        let header = GzipMemberHeader::from_bytes(&buf);
        check_header(offset, &header)?;

        let mut buf = [0; SUBFIELD_SIZE];
        self.read_stage(offset, Stage::Subfield, &mut buf)?;
        let subfield = BgzfExtraSubfield::from_bytes(&buf);
        if self.options.strict {
            check_subfield(offset, &header, &subfield)?;
        }

        let payload_len = compressed_payload_length(subfield.bsize, header.xlen).ok_or(
            BgzfError::MalformedBlockSize {
                offset,
                bsize: subfield.bsize,
                xlen: header.xlen,
            },
        )?;

        // Extra field bytes past the BGZF subfield are skipped along with the payload.
        let to_skip = u64::from(payload_len) + u64::from(header.xlen) - SUBFIELD_SIZE as u64;
        let skipped = self.source.skip(to_skip).map_err(|e| io_error(offset, e))?;
        if skipped < to_skip {
            return Err(BgzfError::TruncatedMember {
                offset,
                stage: Stage::Payload,
                expected: to_skip,
                available: skipped,
            });
        }

        let mut buf = [0; TRAILER_SIZE];
        self.read_stage(offset, Stage::Trailer, &mut buf)?;
        let trailer = GzipMemberTrailer::from_bytes(&buf);

        let is_terminal = trailer.crc32 == 0 && trailer.isize == 0;
        self.members += 1;
        self.compressed_bytes += u64::from(payload_len);
        self.seen_terminal |= is_terminal;

        debug!(
            "member {} at {}: bsize {}, cdata {}, crc32 {:08x}, isize {}{}",
            self.members,
            offset,
            subfield.bsize,
            payload_len,
            trailer.crc32,
            trailer.isize,
            if is_terminal { " (EOF marker)" } else { "" }
        );

        Ok(Some(MemberReport {
            offset,
            header,
            subfield,
            compressed_payload_length: payload_len,
            trailer,
            is_terminal,
        }))
    }

    /// Iterator over the remaining members, up to and including the EOF marker.
    pub fn walk(&mut self) -> Members<'_, S> {
        Members::new(self)
    }

    /// Feeds every member to `sink`, stopping early after `limit` members if given.
    ///
    /// A missing EOF marker is not an error here; it shows up as
    /// `eof_marker == false` in the returned summary.
    pub fn walk_into<K>(&mut self, sink: &mut K, limit: Option<usize>) -> Result<WalkSummary>
    where
        K: MemberSink + ?Sized,
    {
        let mut index = 0;
        let mut members = self.walk();
        while limit.map_or(true, |limit| index < limit) {
            let report = match members.next() {
                Some(Ok(report)) => report,
                Some(Err(ref e)) if e.is_warning() => break,
                Some(Err(e)) => return Err(e),
                None => break,
            };
            index += 1;
            sink.member(index, &report)
                .map_err(|e| io_error(report.offset, e))?;
        }

        let summary = self.summary();
        sink.finish(&summary)
            .map_err(|e| io_error(summary.end_offset, e))?;
        Ok(summary)
    }

    pub fn summary(&self) -> WalkSummary {
        let end_offset = self.source.tell();
        WalkSummary {
            members: self.members,
            compressed_bytes: self.compressed_bytes,
            bytes_consumed: end_offset - self.start,
            end_offset,
            eof_marker: self.seen_terminal,
            trailing_bytes: self
                .source
                .total_len()
                .map(|len| len.saturating_sub(end_offset)),
        }
    }

    /// Compressed payload bytes seen so far.
    pub fn compressed_bytes(&self) -> u64 {
        self.compressed_bytes
    }

    pub fn members(&self) -> usize {
        self.members
    }

    pub fn position(&self) -> u64 {
        self.source.tell()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    // Short reads are only allowed at the very start of a header.
    fn read_stage(&mut self, offset: u64, stage: Stage, buf: &mut [u8]) -> Result<usize> {
        let n = self.source.read(buf).map_err(|e| io_error(offset, e))?;
        if n == buf.len() || (n == 0 && stage == Stage::Header) {
            Ok(n)
        } else {
            Err(BgzfError::TruncatedMember {
                offset,
                stage,
                expected: buf.len() as u64,
                available: n as u64,
            })
        }
    }
}

fn check_header(offset: u64, header: &GzipMemberHeader) -> Result<()> {
    if header.magic != MAGIC_NUMBER {
        return Err(BgzfError::InvalidMagic {
            offset,
            found: header.magic,
        });
    }
    if CompressionMethod::from_u8(header.method).is_none() {
        return Err(BgzfError::unsupported(
            offset,
            format!("compression method {:#04x}, expected 0x08 (deflate)", header.method),
        ));
    }
    if header.flags != FLAG_FEXTRA {
        return Err(BgzfError::unsupported(
            offset,
            format!("flags {:#04x}, expected 0x04 (FEXTRA only)", header.flags),
        ));
    }
    // Only a single BGZF subfield is understood; it has to fit at least.
    if header.xlen < BGZF_XLEN {
        return Err(BgzfError::unsupported(
            offset,
            format!("XLEN {} is too short for the BGZF subfield", header.xlen),
        ));
    }
    Ok(())
}

fn check_subfield(offset: u64, header: &GzipMemberHeader, subfield: &BgzfExtraSubfield) -> Result<()> {
    if !subfield.is_bgzf() {
        return Err(BgzfError::unsupported(
            offset,
            format!(
                "subfield identifier {:02x} {:02x}, expected 42 43 (\"BC\")",
                subfield.si1, subfield.si2
            ),
        ));
    }
    if subfield.slen != BGZF_SUBFIELD_LEN {
        return Err(BgzfError::unsupported(
            offset,
            format!("SLEN {}, expected {}", subfield.slen, BGZF_SUBFIELD_LEN),
        ));
    }
    if header.xlen != BGZF_XLEN {
        return Err(BgzfError::unsupported(
            offset,
            format!("XLEN {}, expected {} (multiple subfields)", header.xlen, BGZF_XLEN),
        ));
    }
    Ok(())
}

fn io_error(offset: u64, source: io::Error) -> BgzfError {
    BgzfError::Io { offset, source }
}

/// An iterator over the members of a BGZF stream.
///
/// This is created by calling [`BlockWalker::walk`]. It ends after the EOF
/// marker or after the first error. If the input runs out before an EOF
/// marker was seen, the last item is [`BgzfError::MissingEofMarker`].
pub struct Members<'a, S> {
    walker: &'a mut BlockWalker<S>,
    done: bool,
}

impl<'a, S: ByteSource> Members<'a, S> {
    pub(crate) fn new(walker: &'a mut BlockWalker<S>) -> Members<'a, S> {
        Self {
            walker,
            done: false,
        }
    }
}

impl<'a, S: ByteSource> Iterator for Members<'a, S> {
    type Item = Result<MemberReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.walker.decode_next_member() {
            Ok(Some(report)) => {
                self.done = report.is_terminal;
                Some(Ok(report))
            }
            Ok(None) => {
                self.done = true;
                if self.walker.seen_terminal {
                    None
                } else {
                    Some(Err(BgzfError::MissingEofMarker {
                        offset: self.walker.position(),
                        members: self.walker.members,
                    }))
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
