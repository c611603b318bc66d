//! Command line front end of the converter
//!
//! Anything not given on the command line is asked for interactively, the way the
//! simulator's post-processing scripts always did.

use clap::Parser;
use dat2vtk::FileType;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert simulator `.dat` output into legacy VTK files, one per timestep.
///
/// Output is written to `converted<name>/` below the output root, where `<name>` is the
/// input file name without its extension.
#[derive(Parser, Debug)]
#[command(name = "dat2vtk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// simulator output file to convert (asked for when missing)
    input: Option<PathBuf>,

    /// kind of output file: c (CRACK), d (DAMAGE) or v (VON MISES)
    #[arg(short = 't', long)]
    file_type: Option<FileType>,

    /// directory in which the `converted<name>` directory is created
    #[arg(short, long, default_value = ".")]
    output_root: PathBuf,

    /// log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let path = match cli.input {
        Some(path) => path,
        None => match prompt_path(&mut input) {
            Ok(path) => path,
            Err(e) => return fail(e),
        },
    };

    let file_type = match cli.file_type {
        Some(file_type) => file_type,
        None => match prompt_file_type(&mut input) {
            Ok(file_type) => file_type,
            Err(e) => return fail(e),
        },
    };

    match dat2vtk::convert_file(&path, file_type, &cli.output_root) {
        Ok(report) => {
            println!(
                "Conversion done! {} timestep(s) written. Exiting...",
                report.timesteps()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

fn fail<E: std::fmt::Display>(e: E) -> ExitCode {
    eprintln!("Error: {e}");
    ExitCode::FAILURE
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    io::stdout().flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "standard input closed before an answer was given",
        ));
    }

    Ok(answer.trim().to_string())
}

fn prompt_path<R: BufRead>(input: &mut R) -> io::Result<PathBuf> {
    println!("Specify input file path:");
    read_answer(input).map(PathBuf::from)
}

fn prompt_file_type<R: BufRead>(input: &mut R) -> io::Result<FileType> {
    loop {
        println!("Specify type of file (d for DAMAGE, c for CRACK, v for VON MISES [d/c/v]:");
        let answer = read_answer(input)?;

        // only the lowercase single letter selectors are accepted here
        let selected = [FileType::Damage, FileType::Crack, FileType::VonMises]
            .into_iter()
            .find(|file_type| answer.len() == 1 && answer.starts_with(file_type.selector()));

        if let Some(file_type) = selected {
            return Ok(file_type);
        }

        println!("Wrong type selected!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reprompts_until_valid_selector() {
        let mut answers = "x\ncrack\n\nv\n".as_bytes();
        assert_eq!(prompt_file_type(&mut answers).unwrap(), FileType::VonMises);
    }

    #[test]
    fn uppercase_selector_is_rejected() {
        let mut answers = "D\nC\nd\n".as_bytes();
        assert_eq!(prompt_file_type(&mut answers).unwrap(), FileType::Damage);

        let mut answers = "V\n".as_bytes();
        assert!(prompt_file_type(&mut answers).is_err());
    }

    #[test]
    fn prompt_fails_on_closed_input() {
        let mut answers = "q\n".as_bytes();
        assert!(prompt_file_type(&mut answers).is_err());
    }

    #[test]
    fn command_line_arguments() {
        let cli = Cli::parse_from(["dat2vtk", "run.dat", "-t", "c", "-o", "out", "-vv"]);
        assert_eq!(cli.input, Some(PathBuf::from("run.dat")));
        assert_eq!(cli.file_type, Some(FileType::Crack));
        assert_eq!(cli.output_root, PathBuf::from("out"));
        assert_eq!(cli.verbose, 2);
    }
}
