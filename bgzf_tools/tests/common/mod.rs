#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};
use bgzf_tools::gz::BGZF_EOF;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

/// Compresses `data` into one BGZF member. Empty `data` gives an EOF marker.
pub fn bgzf_block(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    let cdata = encoder.finish().unwrap();

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    let crc32 = hasher.finalize();

    raw_member(6, (cdata.len() + 25) as u16, &cdata, crc32, data.len() as u32)
}

/// Assembles a member from its parts without checking that they agree.
pub fn raw_member(xlen: u16, bsize: u16, payload: &[u8], crc32: u32, isize: u32) -> Vec<u8> {
    let mut buf = vec![0x1f, 0x8b, 0x08, 0x04, 0, 0, 0, 0, 0, 0xff];
    buf.write_u16::<LittleEndian>(xlen).unwrap();
    buf.extend_from_slice(b"BC");
    buf.write_u16::<LittleEndian>(2).unwrap();
    buf.write_u16::<LittleEndian>(bsize).unwrap();
    buf.extend_from_slice(payload);
    buf.write_u32::<LittleEndian>(crc32).unwrap();
    buf.write_u32::<LittleEndian>(isize).unwrap();
    buf
}

/// A complete BGZF file holding `chunks`, one block each.
pub fn bgzf_file(chunks: &[&[u8]]) -> Vec<u8> {
    let mut file = Vec::new();
    for chunk in chunks {
        file.extend(bgzf_block(chunk));
    }
    file.extend_from_slice(&BGZF_EOF);
    file
}
