use std::fs::File;
use std::io::{self, Read, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::process::exit;

use castagnoli::coding::get_fixed32;
use castagnoli::mask::check_with;
use castagnoli::{ChecksumError, Crc32c, Engine};
use log::*;

// Library and binary log under different targets.
const DEFAULT_LOG_FILTER: &str = concat!(env!("CARGO_PKG_NAME"), "=info,crc32c=info");

fn setup_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
    }
    env_logger::init();
}

fn print_help() {
    println!("crc32c v{}", env!("CARGO_PKG_VERSION"));
    println!("Compute or check masked CRC32C checksums of files\n");
    println!("USAGE:");
    println!("    crc32c [OPTIONS] FILE...\n");
    println!("OPTIONS:");
    println!("    -e, --engine NAME   bitwise | table | slicing8 (default: slicing8)");
    println!("    -s, --seed HEX      Initial CRC to extend (default: 0)");
    println!("    -t, --trailer       Last 4 bytes of each file hold the masked CRC of the rest");
    println!("    -h, --help          Show this help message\n");
    println!("OUTPUT:");
    println!("    <raw> <masked> <path>          one line per file");
    println!("    <stored> <computed> ok|CORRUPT <path>   with --trailer");
}

#[derive(Debug)]
struct Args {
    help: bool,
    engine: Engine,
    seed: u32,
    trailer: bool,
    files: Vec<PathBuf>,
}

fn parse_seed(s: &str) -> Result<u32, ParseIntError> {
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(hex, 16)
}

fn parse_args<I>(mut it: I) -> Result<Args, Box<dyn std::error::Error>>
where
    I: Iterator<Item = String>,
{
    let mut args = Args {
        help: false,
        engine: Engine::default(),
        seed: 0,
        trailer: false,
        files: Vec::new(),
    };
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                args.help = true;
                return Ok(args);
            }
            "-e" | "--engine" => {
                let name = it.next().ok_or("--engine needs a value")?;
                args.engine = name.parse()?;
            }
            "-s" | "--seed" => {
                let hex = it.next().ok_or("--seed needs a value")?;
                args.seed = parse_seed(&hex).map_err(|e| format!("bad seed {:?}: {}", hex, e))?;
            }
            "-t" | "--trailer" => args.trailer = true,
            _ => args.files.push(PathBuf::from(arg)),
        }
    }
    if args.files.is_empty() {
        return Err("no input files (see --help)".into());
    }
    Ok(args)
}

fn checksum_file(args: &Args, path: &Path) -> io::Result<(u32, u32)> {
    let mut f = File::open(path)?;
    let mut h = Crc32c::with_seed(args.seed).with_engine(args.engine);
    let n = io::copy(&mut f, &mut h)?;
    debug!("{}: {} bytes via {}", path.display(), n, args.engine);
    Ok((h.value(), h.masked()))
}

/// Splits `body` into data and its 4-byte trailer and checks one against the other.
/// Returns the stored masked checksum.
fn verify_trailer(args: &Args, body: &[u8]) -> Result<u32, ChecksumError> {
    if body.len() < 4 {
        return Err(ChecksumError::StoredLength(body.len()));
    }
    let (data, trailer) = body.split_at(body.len() - 4);
    check_with(args.engine, args.seed, trailer, Some(data))?;
    get_fixed32(trailer)
}

/// One output line for `path`. `Ok(false)` means the file was read but is corrupt.
fn process_file<W: Write>(
    args: &Args,
    path: &Path,
    out: &mut W,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !args.trailer {
        let (raw, masked) = checksum_file(args, path)?;
        writeln!(out, "{:08x} {:08x} {}", raw, masked, path.display())?;
        return Ok(true);
    }

    let mut body = Vec::new();
    File::open(path)?.read_to_end(&mut body)?;
    match verify_trailer(args, &body) {
        Ok(stored) => {
            writeln!(out, "{:08x} {:08x} ok {}", stored, stored, path.display())?;
            Ok(true)
        }
        Err(ChecksumError::Mismatch { stored, computed }) => {
            warn!(
                "{}: {}",
                path.display(),
                ChecksumError::Mismatch { stored, computed }
            );
            writeln!(out, "{:08x} {:08x} CORRUPT {}", stored, computed, path.display())?;
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Processes every file, logging failures as it goes. Returns how many failed.
fn run<W: Write>(args: &Args, out: &mut W) -> usize {
    let mut failed = 0usize;
    for path in &args.files {
        match process_file(args, path, out) {
            Ok(true) => {}
            Ok(false) => failed += 1,
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }
    failed
}

fn main() {
    setup_logger();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("crc32c: {}", e);
            exit(2);
        }
    };
    if args.help {
        print_help();
        return;
    }

    let failed = run(&args, &mut io::stdout().lock());
    if failed > 0 {
        warn!("{} of {} files failed", failed, args.files.len());
        exit(1);
    }
}
