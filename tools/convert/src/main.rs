use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use log::info;

use trsconv::ConvertMode;
use trsconv::ConvertOptions;
use trsconv::convert;
use trsconv_tools::VerbosityFlag;
use trsconv_tools::Version;
use trsconv_tools::VersionFlag;
use trsconv_trs::ReaderOptions;
use trsconv_trs::TrsError;
use trsconv_trs::read_trs;
use trsconv_utilities::Timing;
use trsconv_utilities::TrsconvError;

#[derive(clap::Parser, Debug)]
#[command(
    about = "A command line tool to convert term rewriting systems from the XML format to the MSTRS format",
    arg_required_else_help = true
)]
struct Cli {
    #[command(flatten)]
    version: VersionFlag,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Option<Commands>,

    #[arg(long, global = true, help = "Print the time spent in every phase")]
    timings: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Convert(ConvertArgs),
    Info(InfoArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Convert .xml term rewriting system files into .mstrs files")]
struct ConvertArgs {
    #[arg(help = "Whether the input and output are directories or files")]
    mode: ConvertMode,

    #[arg(help = "The input file or directory")]
    input: PathBuf,

    #[arg(help = "The output file or directory, existing files are never overwritten")]
    output: PathBuf,

    #[arg(long, help = "Reject duplicate symbols and applications with the wrong number of arguments")]
    strict: bool,

    #[arg(long, help = "Convert the files of a directory in parallel")]
    parallel: bool,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints the signature and rules of an .xml term rewriting system")]
struct InfoArgs {
    input: PathBuf,

    #[arg(long, help = "Reject duplicate symbols and applications with the wrong number of arguments")]
    strict: bool,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(exit_code) => exit_code,
        Err(error) => {
            eprintln!("{}", diagnostic(&error));
            ExitCode::FAILURE
        }
    }
}

/// Returns the message printed for an error that ends the tool. Conversion
/// errors are expected outcomes and only show their message, any other error
/// also shows the backtrace when one was captured.
fn diagnostic(error: &TrsconvError) -> String {
    match error.downcast_ref::<TrsError>() {
        Some(error) => format!("ERROR: {error}"),
        None => format!("ERROR: {error:?}"),
    }
}

fn run(cli: Cli) -> Result<ExitCode, TrsconvError> {
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    if cli.version.into() {
        eprintln!("{}", Version);
        return Ok(ExitCode::SUCCESS);
    }

    let mut timing = Timing::new();
    let mut exit_code = ExitCode::SUCCESS;

    if let Some(command) = cli.commands {
        match command {
            Commands::Convert(args) => {
                exit_code = handle_convert(args, &mut timing);
            }
            Commands::Info(args) => {
                let mut timer = timing.start("read");
                let trs = read_trs(&args.input, ReaderOptions { strict: args.strict })?;
                timer.finish();

                print!("{trs}");
            }
        }
    }

    if cli.timings {
        timing.print();
    }

    Ok(exit_code)
}

/// Runs the conversion and prints a diagnostic for every failure. Only a
/// failure of the whole conversion results in a failing exit code, failures
/// of individual files in directory mode do not.
fn handle_convert(args: ConvertArgs, timing: &mut Timing) -> ExitCode {
    let options = ConvertOptions {
        reader: ReaderOptions { strict: args.strict },
        parallel: args.parallel,
    };

    let mut timer = timing.start("convert");
    let result = convert(&args.input, &args.output, args.mode, &options);
    timer.finish();

    match result {
        Ok(report) => {
            for failure in &report.failures {
                eprintln!("ERROR: {failure}");
            }

            if args.mode == ConvertMode::Dir {
                info!(
                    "Wrote {} files to {}",
                    report.converted.len(),
                    args.output.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("ERROR: {}: {error}", args.input.display());
            ExitCode::FAILURE
        }
    }
}
