use bgzf_tools::{MemberReport, MemberSink, WalkSummary};
use serde::Serialize;
use std::io::{self, Write};

/// Human readable narration, one section per member.
pub struct TextReport<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }
}

impl<W: Write> MemberSink for TextReport<W> {
    fn member(&mut self, index: usize, report: &MemberReport) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let out = &mut self.out;
        let header = &report.header;
        let subfield = &report.subfield;
        let mtime = header.mtime.to_le_bytes();

        writeln!(out)?;
        writeln!(out, "######")?;
        writeln!(out, "### BGZF Block {} (offset {})", index, report.offset)?;
        writeln!(out, "######")?;
        writeln!(out)?;
        writeln!(out, "  [*] Header: {}", hex(&header.to_bytes()))?;
        writeln!(
            out,
            "    - Modified time    => {}:{}:{}:{} ({})",
            mtime[3], mtime[2], mtime[1], mtime[0], header.mtime
        )?;
        writeln!(out, "    - Extra flags      => {:x}", header.extra_flags)?;
        writeln!(
            out,
            "    - Operating system => {:x} ({:?})",
            header.os,
            header.operating_system()
        )?;
        writeln!(out, "    - Extra length     => {} bytes", header.xlen)?;
        writeln!(out)?;
        writeln!(out, "  [*] Block info:")?;
        writeln!(out, "    - Subfield identifier 1 => {:x}", subfield.si1)?;
        writeln!(out, "    - Subfield identifier 2 => {:x}", subfield.si2)?;
        writeln!(out, "    - Subfield length       => {}", subfield.slen)?;
        writeln!(out, "    - Block size (minus 1)  => {}", subfield.bsize)?;
        writeln!(out)?;
        writeln!(out, "  [*] Data:")?;
        writeln!(
            out,
            "    - Compressed # of bytes => {}",
            report.compressed_payload_length
        )?;
        writeln!(out, "    - CRC32                 => {:08x}", report.trailer.crc32)?;
        writeln!(out, "    - Raw input length      => {}", report.trailer.isize)?;
        if report.is_terminal {
            writeln!(out, "    - EOF marker")?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &WalkSummary) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out)?;
        writeln!(
            out,
            "Counted {} compressed data bytes in total.",
            summary.compressed_bytes
        )?;
        writeln!(
            out,
            "{} blocks, {} bytes consumed, EOF marker {}.",
            summary.members,
            summary.bytes_consumed,
            if summary.eof_marker { "present" } else { "missing" }
        )?;
        if let Some(n) = summary.trailing_bytes.filter(|&n| n > 0) {
            writeln!(out, "{} bytes follow the last block.", n)?;
        }
        out.flush()
    }
}

/// One JSON object per line: members, then a summary.
pub struct JsonReport<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)
    }
}

#[derive(Serialize)]
struct MemberLine<'a> {
    index: usize,
    #[serde(flatten)]
    report: &'a MemberReport,
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a WalkSummary,
}

impl<W: Write> MemberSink for JsonReport<W> {
    fn member(&mut self, index: usize, report: &MemberReport) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_line(&MemberLine { index, report })
    }

    fn finish(&mut self, summary: &WalkSummary) -> io::Result<()> {
        self.write_line(&SummaryLine { summary })?;
        self.out.flush()
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
