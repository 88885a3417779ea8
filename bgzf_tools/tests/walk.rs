mod common;

use bgzf_tools::gz::{BGZF_EOF, MEMBER_OVERHEAD};
use bgzf_tools::{BgzfError, BlockWalker, MemberReport, SeekSource, Stage, StreamSource};
use common::{bgzf_block, bgzf_file};
use flate2::read::MultiGzDecoder;
use std::io::{Cursor, Read};

fn walk(data: &[u8]) -> (Vec<MemberReport>, Option<BgzfError>) {
    let mut walker = BlockWalker::new(SeekSource::new(Cursor::new(data)).unwrap());
    let mut reports = Vec::new();
    for item in walker.walk() {
        match item {
            Ok(report) => reports.push(report),
            Err(e) => return (reports, Some(e)),
        }
    }
    (reports, None)
}

#[test]
fn test_real_block_and_eof_marker() {
    let text = b"@HD\tVN:1.6\tSO:coordinate\n@SQ\tSN:chr1\tLN:248956422\n";
    let file = bgzf_file(&[&text[..]]);

    // The fixture is a valid gzip stream as far as flate2 is concerned.
    let mut decoded = Vec::new();
    MultiGzDecoder::new(&file[..]).read_to_end(&mut decoded).unwrap();
    assert_eq!(&decoded[..], &text[..]);

    let (reports, err) = walk(&file);
    assert!(err.is_none());
    assert_eq!(reports.len(), 2);

    let block = &reports[0];
    assert!(!block.is_terminal);
    assert_eq!(block.trailer.isize as usize, text.len());
    assert_eq!(
        block.compressed_payload_length as usize,
        file.len() - BGZF_EOF.len() - MEMBER_OVERHEAD
    );

    let eof = &reports[1];
    assert!(eof.is_terminal);
    assert_eq!(eof.offset, block.end_offset());
    assert_eq!(eof.compressed_payload_length, 2);
    assert_eq!(eof.end_offset() as usize, file.len());
}

#[test]
fn test_advancement_covers_whole_file() {
    let chunks: Vec<Vec<u8>> = (0..20u8)
        .map(|i| (0..=(i as usize * 97)).map(|j| (j % 251) as u8 ^ i).collect())
        .collect();
    let refs: Vec<&[u8]> = chunks.iter().map(|c| &c[..]).collect();
    let file = bgzf_file(&refs);

    let mut walker = BlockWalker::new(SeekSource::new(Cursor::new(&file)).unwrap());
    let mut expected_offset = 0;
    let mut advanced = 0;
    let mut payload = 0;
    for report in walker.walk() {
        let report = report.unwrap();
        assert_eq!(report.offset, expected_offset);
        assert_eq!(
            report.block_size(),
            MEMBER_OVERHEAD as u64 + u64::from(report.compressed_payload_length)
        );
        expected_offset = report.end_offset();
        advanced += report.block_size();
        payload += u64::from(report.compressed_payload_length);
    }

    let summary = walker.summary();
    assert_eq!(summary.members, 21);
    assert!(summary.eof_marker);
    assert_eq!(advanced, file.len() as u64);
    assert_eq!(summary.bytes_consumed, file.len() as u64);
    assert_eq!(summary.compressed_bytes, payload);
}

#[test]
fn test_truncated_real_block() {
    let block = bgzf_block(&[b'A'; 4096]);
    let cut = &block[..block.len() - 5];
    let (reports, err) = walk(cut);
    assert!(reports.is_empty());
    match err {
        Some(BgzfError::TruncatedMember { stage: Stage::Trailer, expected: 8, available: 3, .. }) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_plain_gzip_is_rejected() {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    std::io::Write::write_all(&mut encoder, b"not blocked").unwrap();
    let gz = encoder.finish().unwrap();

    let (reports, err) = walk(&gz);
    assert!(reports.is_empty());
    assert!(matches!(err, Some(BgzfError::UnsupportedGzipVariant { offset: 0, .. })));
}

#[test]
fn test_stream_and_seek_sources_agree() {
    let file = bgzf_file(&[&b"first"[..], &b"second block"[..], &[0u8; 1000][..]]);
    let (expected, err) = walk(&file);
    assert!(err.is_none());

    let mut walker = BlockWalker::new(StreamSource::new(&file[..]));
    let reports: Vec<_> = walker.walk().map(|r| r.unwrap()).collect();
    assert_eq!(reports, expected);
    assert_eq!(walker.position(), file.len() as u64);
}
