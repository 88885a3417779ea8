//! Property tests over synthetic member headers.

mod common;

use bgzf_tools::gz::MEMBER_OVERHEAD;
use bgzf_tools::{compressed_payload_length, BgzfError, BlockWalker, SeekSource};
use common::{bgzf_file, raw_member};
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    #[test]
    fn payload_length_never_underflows_for_valid_sizes(xlen in 6u16..64, extra in 0u16..1000) {
        let bsize = xlen + 19 + extra;
        prop_assert_eq!(compressed_payload_length(bsize, xlen), Some(u32::from(extra)));
    }

    #[test]
    fn payload_length_rejects_short_blocks(xlen in 6u16..u16::MAX, bsize in 0u16..25) {
        prop_assert_eq!(compressed_payload_length(bsize, xlen), None);
    }

    #[test]
    fn inconsistent_bsize_is_malformed(bsize in 0u16..25) {
        let data = raw_member(6, bsize, &[], 0, 0);
        let mut walker = BlockWalker::new(SeekSource::new(Cursor::new(data)).unwrap());
        let is_malformed = matches!(
            walker.decode_next_member(),
            Err(BgzfError::MalformedBlockSize { .. })
        );
        prop_assert!(is_malformed);
    }

    #[test]
    fn member_advances_by_overhead_plus_payload(
        payload in prop::collection::vec(any::<u8>(), 0..2048),
        crc32 in 1u32..,
        isize in any::<u32>(),
    ) {
        let bsize = (payload.len() + MEMBER_OVERHEAD - 1) as u16;
        let data = raw_member(6, bsize, &payload, crc32, isize);
        let mut walker = BlockWalker::new(SeekSource::new(Cursor::new(data)).unwrap());

        let report = walker.decode_next_member().unwrap().unwrap();
        prop_assert_eq!(report.compressed_payload_length as usize, payload.len());
        prop_assert_eq!(walker.position() as usize, MEMBER_OVERHEAD + payload.len());
        prop_assert_eq!(report.trailer.crc32, crc32);
        prop_assert_eq!(report.trailer.isize, isize);
        prop_assert!(!report.is_terminal);
    }

    #[test]
    fn well_formed_files_end_on_the_marker(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..512), 0..8)
    ) {
        let refs: Vec<&[u8]> = chunks.iter().map(|c| &c[..]).collect();
        let file = bgzf_file(&refs);
        let mut walker = BlockWalker::new(SeekSource::new(Cursor::new(&file)).unwrap());

        let reports = walker.walk().collect::<Result<Vec<_>, _>>().unwrap();
        prop_assert!(reports.last().unwrap().is_terminal);
        prop_assert_eq!(walker.summary().bytes_consumed as usize, file.len());
    }
}
