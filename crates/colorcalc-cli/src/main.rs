//! colorcalc - colorspace conversion for record streams
//!
//! Reads CSV or binary records on stdin, converts three channel fields
//! between rgb, ycbcr and ypbpr, and writes the records to stdout.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "colorcalc")]
#[command(author, version, about = "Colorspace conversion for CSV and binary record streams")]
#[command(long_about = "
Converts color triplets in record streams between rgb, ycbcr and ypbpr.
Fields other than the three channels pass through unchanged.

Ranges:
  ub  0 to 255, 8-bit integer
  uw  0 to 65535, 16-bit integer
  ui  0 to 4294967295, 32-bit integer
  f   0 to 1, single precision
  d   0 to 1, double precision

Output is double precision in the destination range unless a range or
storage is given with --to:
  --to rgb         0.0 to 255.0, doubles, unclamped
  --to rgb,uw      rounded and clamped, 0 to 65535
  --to rgb,uw,d    0.0 to 65535.0, doubles, unclamped

Examples:
  echo 1,2,3 | colorcalc convert --from rgb,ub --to ycbcr
  echo 1,0.2,0.3 | colorcalc convert --from rgb,f --to ycbcr,uw
  echo value,128,128,128,20170101T000000 \\
      | colorcalc convert --fields name,r,g,b,t --input-type ub --to ycbcr
  colorcalc convert --fields name,y,cb,cr,t --binary s[10],3f,t --input-type uw --to rgb,ub
  colorcalc convert --list
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output; repeat for more detail
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert channel triplets between colorspaces
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    /// Source colorspace and optional range, e.g. rgb,ub
    #[arg(long)]
    from: Option<String>,

    /// Destination colorspace, optional range and storage, e.g. ycbcr,uw,d
    #[arg(long)]
    to: Option<String>,

    /// Input range; alternative to the --from suffix
    #[arg(long)]
    input_type: Option<String>,

    /// Output range; alternative to the --to suffix
    #[arg(long)]
    output_type: Option<String>,

    /// Input field names, separated by commas or the CSV delimiter
    #[arg(short, long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Binary record format, e.g. s[10],3f,t
    #[arg(short, long)]
    binary: Option<String>,

    /// CSV field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Flush output after every record
    #[arg(long)]
    flush: bool,

    /// List supported conversions and exit
    #[arg(long, visible_alias = "list-conversions")]
    list: bool,

    /// Print input channel field names and exit
    #[arg(long)]
    input_fields: bool,

    /// Print output channel field names and exit
    #[arg(long)]
    output_fields: bool,

    /// Print the binary output record format and exit
    #[arg(long, requires = "binary")]
    output_format: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("colorcalc={level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("colorcalc: {e:#}");
            ExitCode::FAILURE
        }
    }
}
