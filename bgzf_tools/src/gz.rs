// RFC 1952 § 2.3.1
pub const MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

// FLG.FEXTRA. BGZF members carry no other flag.
pub const FLAG_FEXTRA: u8 = 0x04;

// ID1 (1) + ID2 (1) + CM (1) + FLG (1) + MTIME (4) + XLF (1) + OS (1) + XLEN (2)
pub const HEADER_SIZE: usize = 12;

// SI1 (1) + SI2 (1) + SLEN (2) + BSIZE (2)
pub const SUBFIELD_SIZE: usize = 6;

// CRC32 (4) + ISIZE (4)
pub const TRAILER_SIZE: usize = 8;

/// Bytes of a standard BGZF member that are not compressed payload.
pub const MEMBER_OVERHEAD: usize = HEADER_SIZE + SUBFIELD_SIZE + TRAILER_SIZE;

// SAM/BAM specification § 4.1
pub const BGZF_SUBFIELD_ID: [u8; 2] = [b'B', b'C'];
pub const BGZF_SUBFIELD_LEN: u16 = 2;
pub const BGZF_XLEN: u16 = SUBFIELD_SIZE as u16;

/// The empty block every BGZF writer appends to mark the end of the file.
pub const BGZF_EOF: [u8; 28] = [
    0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x06, 0x00, 0x42, 0x43, 0x02, 0x00,
    0x1b, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[non_exhaustive]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompressionMethod {
    Deflate = 8,
}

impl CompressionMethod {
    pub fn from_u8(n: u8) -> Option<Self> {
        match n {
            8 => Some(CompressionMethod::Deflate),
            _ => None,
        }
    }
}

/// Value of the OS header byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
pub enum OperatingSystem {
    Fat,
    Amiga,
    Vms,
    Unix,
    VmCms,
    AtariTos,
    Hpfs,
    Macintosh,
    ZSystem,
    CpM,
    Tops20,
    Ntfs,
    Qdos,
    AcornRiscos,
    Unknown,
    Other(u8),
}

impl From<u8> for OperatingSystem {
    fn from(n: u8) -> Self {
        match n {
            0 => Self::Fat,
            1 => Self::Amiga,
            2 => Self::Vms,
            3 => Self::Unix,
            4 => Self::VmCms,
            5 => Self::AtariTos,
            6 => Self::Hpfs,
            7 => Self::Macintosh,
            8 => Self::ZSystem,
            9 => Self::CpM,
            10 => Self::Tops20,
            11 => Self::Ntfs,
            12 => Self::Qdos,
            13 => Self::AcornRiscos,
            255 => Self::Unknown,
            n => Self::Other(n),
        }
    }
}
