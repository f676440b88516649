use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, error};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

mod convert;
mod error;
mod gray;
mod raw;
mod record;

#[cfg(test)]
mod scratch;

const USAGE: &str = "Usage: gray2bin <image_path> <output_bin_path>";

/// Bad arguments or an input that could not be decoded.
const EXIT_INVALID: i32 = -1;
const EXIT_WRITE_FAILED: i32 = 1;

/// Convert a grayscale image into a raw float32 record.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to read, decoded as 8-bit grayscale
    input: PathBuf,
    /// Where to write the record
    output: PathBuf,
    /// Read the record back after writing and compare it with the image
    #[arg(long)]
    verify: bool,
    /// Ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<OsString>,
}

/// Runs the converter, writing the user-facing messages to `out`.
fn run<I, T, W>(args: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = write!(out, "{}", e.render());
                return 0;
            }
            _ => {
                debug!("{}", e);
                let _ = writeln!(out, "{}", USAGE);
                return EXIT_INVALID;
            }
        },
    };

    if !args.rest.is_empty() {
        debug!("ignoring extra arguments {:?}", args.rest);
    }

    let result = convert::convert(&args.input, &args.output, args.verify, |width, height| {
        let _ = writeln!(out, "Width={}; Height={}", width, height);
    });

    match result {
        Ok(()) => {
            let _ = writeln!(out, "OK!");
            0
        }
        Err(e) if e.is_decode() => {
            error!("{}", e);
            let _ = writeln!(out, "Could not open or find the image");
            EXIT_INVALID
        }
        Err(e) => {
            error!("Error while writing raw image: {}", e);
            let _ = writeln!(out, "Error while writing raw image: {}", e);
            let _ = writeln!(out, "Error!");
            EXIT_WRITE_FAILED
        }
    }
}

/// -1 surfaces as 255, like a C exit(-1).
fn exit_status(code: i32) -> u8 {
    code as u8
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let code = run(std::env::args_os(), &mut std::io::stdout().lock());
    ExitCode::from(exit_status(code))
}
