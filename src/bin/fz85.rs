use std::io::{self, Write};
use std::path::Path;
use std::process;

use clap::Parser;

use z85_rs::common::io::{read_file, read_stdin};
use z85_rs::common::io_error_msg;
use z85_rs::z85::stream as z85;

const TOOL_NAME: &str = "z85";

#[derive(Parser)]
#[command(
    name = "z85",
    about = "Convert FILE, or standard input, to or from Z85 text on standard output.",
    after_help = "FILE may be omitted or given as - to read standard input.\n\n\
        Every 4 input bytes become 5 characters of the ZeroMQ RFC 32 alphabet.\n\
        Z85 has no padding: encoding fails unless the input length is a multiple\n\
        of 4, and decoding fails unless the text is a multiple of 5 characters.\n\
        Line breaks in encoded text are skipped; --ignore-garbage also skips every\n\
        other byte outside the alphabet.",
    version
)]
struct Cli {
    /// Decode Z85 text back to bytes
    #[arg(short = 'd', long = "decode")]
    decode: bool,

    /// Skip bytes outside the Z85 alphabet when decoding
    #[arg(short = 'i', long = "ignore-garbage")]
    ignore_garbage: bool,

    /// Break encoded output into lines of at most COLS characters; 0 keeps it on one line
    #[arg(short = 'w', long = "wrap", value_name = "COLS", default_value = "76")]
    wrap: usize,

    /// Input file; standard input when absent or -
    file: Option<String>,
}

/// Grow the stdin/stdout pipe buffers to 8MB (Linux only). Failures are
/// ignored: fcntl leaves the old size in place.
#[cfg(target_os = "linux")]
fn enlarge_pipes() {
    const PIPE_BYTES: i32 = 8 * 1024 * 1024;
    for fd in [libc::STDIN_FILENO, libc::STDOUT_FILENO] {
        unsafe {
            libc::fcntl(fd, libc::F_SETPIPE_SZ, PIPE_BYTES);
        }
    }
}

fn main() {
    z85_rs::common::reset_sigpipe();

    #[cfg(target_os = "linux")]
    enlarge_pipes();

    let cli = Cli::parse();

    let filename = cli.file.as_deref().unwrap_or("-");

    let stdout = io::stdout();
    let mut out = io::BufWriter::with_capacity(1024 * 1024, stdout.lock());

    let result = if filename == "-" {
        process_stdin(&cli, &mut out)
    } else {
        process_file(filename, &cli, &mut out)
    };

    if let Err(e) = result {
        if e.kind() == io::ErrorKind::BrokenPipe {
            process::exit(0);
        }
        // Codec errors name the input problem, not the file.
        if filename != "-" && e.kind() != io::ErrorKind::InvalidData {
            eprintln!("{}: {}: {}", TOOL_NAME, filename, io_error_msg(&e));
        } else {
            eprintln!("{}: {}", TOOL_NAME, io_error_msg(&e));
        }
        process::exit(1);
    }

    if let Err(e) = out.flush()
        && e.kind() != io::ErrorKind::BrokenPipe
    {
        eprintln!("{}: write error: {}", TOOL_NAME, io_error_msg(&e));
        process::exit(1);
    }
}

fn process_stdin(cli: &Cli, out: &mut impl Write) -> io::Result<()> {
    let data = read_stdin()?;
    process_data(&data, cli, out)
}

fn process_file(filename: &str, cli: &Cli, out: &mut impl Write) -> io::Result<()> {
    let data = read_file(Path::new(filename))?;
    process_data(&data, cli, out)
}

fn process_data(data: &[u8], cli: &Cli, out: &mut impl Write) -> io::Result<()> {
    if cli.decode {
        z85::decode_to_writer(data, cli.ignore_garbage, out)
    } else {
        z85::encode_to_writer(data, cli.wrap, out)
    }
}
