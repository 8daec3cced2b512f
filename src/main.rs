use anyhow::{Context, Result};
use clap::Parser;
use device_profile_data::decode::{decode_capture, DecodePolicy};
use device_profile_data::extract;
use dotenvy::dotenv;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(version, about = "Extract LLVM profile data from device output")]
struct Args {
    /// Output file for the raw LLVM profile data (`-` for stdout)
    output_file: PathBuf,

    /// Device output to parse; defaults to stdin (`-` also reads stdin)
    #[arg(long = "input_file", env = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Handling of non-ASCII bytes in the capture
    #[arg(long, env = "DECODE_POLICY", value_enum, default_value_t = DecodePolicy::Drop)]
    decode_policy: DecodePolicy,
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_capture(input: Option<&Path>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match input {
        Some(path) if !is_stdio(path) => {
            File::open(path)
                .with_context(|| format!("open {:?}", path))?
                .read_to_end(&mut buf)
                .with_context(|| format!("read {:?}", path))?;
        }
        _ => {
            io::stdin().lock().read_to_end(&mut buf).context("read stdin")?;
        }
    }
    Ok(buf)
}

fn write_payload(out: &Path, payload: &[u8]) -> Result<()> {
    if is_stdio(out) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(payload)?;
        stdout.flush()?;
        return Ok(());
    }
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {:?}", parent))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out)
        .with_context(|| format!("open {:?}", out))?;
    let mut w = BufWriter::new(file);
    w.write_all(payload)?;
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();
    env_logger::init();
    let args = Args::parse();

    let raw = read_capture(args.input_file.as_deref())?;
    debug!("read {} bytes of device output", raw.len());
    let text = decode_capture(&raw, args.decode_policy);

    // Nothing is written unless the payload passed validation.
    let payload = extract(&text).context("extract LLVM profile data")?;
    write_payload(&args.output_file, &payload)?;
    info!("wrote {} bytes to {:?}", payload.len(), args.output_file);
    Ok(())
}
