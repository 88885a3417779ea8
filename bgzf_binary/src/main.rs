mod report;

use anyhow::Context;
use bgzf_tools::{BlockWalker, ByteSource, MemberSink, SeekSource, StreamSource, WalkerOptions};
use log::{error, info, warn};
use report::{JsonReport, TextReport};

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Cli {
    /// The path to the BGZF file to walk ("-" reads standard input)
    #[structopt(parse(from_os_str))]
    in_path: PathBuf,
    /// Output format: text or json
    #[structopt(long, default_value = "text")]
    format: Format,
    /// Reject members whose extra field is anything but a single "BC" subfield.
    #[structopt(long)]
    strict: bool,
    /// Print only the summary.
    #[structopt(short, long)]
    quiet: bool,
    /// Stop after this many blocks.
    #[structopt(long)]
    max_members: Option<usize>,
}

#[derive(Debug, Copy, Clone)]
enum Format {
    Text,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Walks the blocks of a BGZF file (BAM, bgzipped VCF, ...) and narrates
/// each one without decompressing it.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::from_args();
    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &Cli) -> anyhow::Result<()> {
    let options = WalkerOptions::default().with_strict(args.strict);
    let out = BufWriter::new(io::stdout());
    let mut sink: Box<dyn MemberSink> = match args.format {
        Format::Text => Box::new(TextReport::new(out, args.quiet)),
        Format::Json => Box::new(JsonReport::new(out, args.quiet)),
    };

    if args.in_path.as_os_str() == "-" {
        let stdin = io::stdin();
        let source = StreamSource::new(stdin.lock());
        walk(source, options, sink.as_mut(), args.max_members)
    } else {
        let file = File::open(&args.in_path)
            .with_context(|| format!("Couldn't open {}", args.in_path.display()))?;
        let source = SeekSource::new(BufReader::new(file))?;
        if let Some(len) = source.total_len() {
            info!("File size: {} bytes", len);
        }
        walk(source, options, sink.as_mut(), args.max_members)
    }
}

fn walk<S: ByteSource>(
    source: S,
    options: WalkerOptions,
    sink: &mut dyn MemberSink,
    max_members: Option<usize>,
) -> anyhow::Result<()> {
    let mut walker = BlockWalker::with_options(source, options);
    let summary = walker.walk_into(sink, max_members)?;

    let stopped_early = max_members.map_or(false, |max| summary.members >= max);
    if !summary.eof_marker && !stopped_early {
        warn!(
            "File ended at offset {} without an explicit EOF marker.",
            summary.end_offset
        );
    }
    if let Some(n) = summary.trailing_bytes.filter(|&n| n > 0 && summary.eof_marker) {
        warn!("{} bytes follow the EOF marker.", n);
    }
    Ok(())
}
