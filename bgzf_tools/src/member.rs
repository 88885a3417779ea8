use crate::gz::{
    OperatingSystem, BGZF_SUBFIELD_ID, HEADER_SIZE, SUBFIELD_SIZE, TRAILER_SIZE,
};
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

// Header and trailer, less the one byte BSIZE leaves out.
const BSIZE_BIAS: u32 = (HEADER_SIZE + TRAILER_SIZE - 1) as u32;

/// Fixed part of a gzip member header, XLEN included.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct GzipMemberHeader {
    pub magic: [u8; 2],
    pub method: u8,
    pub flags: u8,
    pub mtime: u32,
    pub extra_flags: u8,
    pub os: u8,
    pub xlen: u16,
}

impl GzipMemberHeader {
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Self {
        Self {
            magic: [buf[0], buf[1]],
            method: buf[2],
            flags: buf[3],
            mtime: LittleEndian::read_u32(&buf[4..8]),
            extra_flags: buf[8],
            os: buf[9],
            xlen: LittleEndian::read_u16(&buf[10..12]),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0; HEADER_SIZE];
        buf[..2].copy_from_slice(&self.magic);
        buf[2] = self.method;
        buf[3] = self.flags;
        LittleEndian::write_u32(&mut buf[4..8], self.mtime);
        buf[8] = self.extra_flags;
        buf[9] = self.os;
        LittleEndian::write_u16(&mut buf[10..12], self.xlen);
        buf
    }

    pub fn operating_system(&self) -> OperatingSystem {
        OperatingSystem::from(self.os)
    }
}

/// The BGZF "BC" extra subfield.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct BgzfExtraSubfield {
    pub si1: u8,
    pub si2: u8,
    pub slen: u16,
    /// Total block size minus 1.
    pub bsize: u16,
}

impl BgzfExtraSubfield {
    pub fn from_bytes(buf: &[u8; SUBFIELD_SIZE]) -> Self {
        Self {
            si1: buf[0],
            si2: buf[1],
            slen: LittleEndian::read_u16(&buf[2..4]),
            bsize: LittleEndian::read_u16(&buf[4..6]),
        }
    }

    pub fn is_bgzf(&self) -> bool {
        [self.si1, self.si2] == BGZF_SUBFIELD_ID
    }

    /// On-disk size of the whole member.
    pub fn block_size(&self) -> u64 {
        u64::from(self.bsize) + 1
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct GzipMemberTrailer {
    pub crc32: u32,
    /// Uncompressed payload length mod 2^32.
    pub isize: u32,
}

impl GzipMemberTrailer {
    pub fn from_bytes(buf: &[u8; TRAILER_SIZE]) -> Self {
        Self {
            crc32: LittleEndian::read_u32(&buf[0..4]),
            isize: LittleEndian::read_u32(&buf[4..8]),
        }
    }
}

/// Everything learned about one member, handed out once it has been fully consumed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    /// Offset of the first header byte.
    pub offset: u64,
    pub header: GzipMemberHeader,
    pub subfield: BgzfExtraSubfield,
    pub compressed_payload_length: u32,
    pub trailer: GzipMemberTrailer,
    /// The empty block that closes a BGZF file.
    pub is_terminal: bool,
}

impl MemberReport {
    /// Number of bytes this member occupies in the stream.
    pub fn block_size(&self) -> u64 {
        self.subfield.block_size()
    }

    /// Offset of the byte right after the trailer.
    pub fn end_offset(&self) -> u64 {
        self.offset + self.block_size()
    }
}

/// Length of the deflate payload of a member with the given BSIZE and XLEN.
///
/// The member spans `BSIZE + 1` bytes: the 12-byte header, `XLEN` bytes of
/// extra field, the payload and the 8-byte trailer. Returns `None` when BSIZE
/// is too small to hold all of that.
pub fn compressed_payload_length(bsize: u16, xlen: u16) -> Option<u32> {
    u32::from(bsize).checked_sub(u32::from(xlen) + BSIZE_BIAS)
}
