use anyhow::{bail, Context, Result};
use clap::Parser;
use device_profile_data::build_marker;
use log::debug;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Print a raw LLVM profile the way instrumented firmware does")]
struct Args {
    /// Raw profile file (.profraw) to wrap
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Log prefix put in front of every emitted line, e.g. "[00:00:01] "
    #[arg(long, default_value = "")]
    prefix: String,

    /// Wrap the marker every N characters (0 keeps it on one line)
    #[arg(long, default_value_t = 0)]
    wrap: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let payload = fs::read(&args.input).with_context(|| format!("open {:?}", args.input))?;
    if payload.is_empty() {
        bail!("{:?} is empty; an empty profile cannot be encoded", args.input);
    }
    let marker = build_marker(&payload);
    debug!("marker is {} characters", marker.len());

    let mut out = io::stdout().lock();
    if args.wrap == 0 {
        writeln!(out, "{}{}", args.prefix, marker)?;
    } else {
        // The marker is ASCII, so byte chunks are character chunks.
        for line in marker.as_bytes().chunks(args.wrap) {
            out.write_all(args.prefix.as_bytes())?;
            out.write_all(line)?;
            out.write_all(b"\r\n")?;
        }
    }
    out.flush()?;
    Ok(())
}
