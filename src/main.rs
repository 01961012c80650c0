//! mafkit: MAF multiple alignment toolkit
//!
//! Usage: mafkit <COMMAND> [OPTIONS]

use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use mafkit::buffers::{input_buffer_size, output_buffer_size};
use mafkit::commands::{CatCommand, CoordsCommand, StatsCommand};
use mafkit::config;
use mafkit::maf::{MafError, MafReader};
use mafkit::output::{MafWriter, TsvWriter};

#[derive(Parser)]
#[command(name = "mafkit")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "mafkit: read, rewrite and summarize MAF multiple alignment files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Read numeric fields of sequence lines like C's strtoul: use the
    /// leading digits and ignore the rest instead of failing.
    #[arg(long, global = true)]
    lenient_numbers: bool,

    /// Use smaller I/O buffers
    #[arg(long, global = true)]
    low_memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a MAF file with normalized block delimiters
    Cat {
        /// Input MAF file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Skip malformed alignment blocks instead of stopping
        #[arg(long)]
        skip_invalid: bool,

        /// Drop alignment blocks with fewer sequence lines
        #[arg(short = 'm', long, default_value = "0")]
        min_sequences: usize,

        /// Print block counts to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Summarize blocks, sequence lines and aligned bases per species
    Stats {
        /// Input MAF file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print per-sequence coordinates, including forward-strand positions
    Coords {
        /// Input MAF file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write a column header line
        #[arg(long)]
        header: bool,
    },
}

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .quiet(false)
        .verbosity(log_max_level)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
    {
        eprintln!("Warning: could not initialize logging: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();

    // Warnings are always shown; each -v adds a level.
    init_log(1 + cli.verbose as usize);
    config::set_lenient_numbers(cli.lenient_numbers);

    let low_memory = cli.low_memory;
    let result = match cli.command {
        Commands::Cat {
            input,
            skip_invalid,
            min_sequences,
            stats,
        } => run_cat(input, skip_invalid, min_sequences, stats, low_memory),
        Commands::Stats { input } => run_stats(input, low_memory),
        Commands::Coords { input, header } => run_coords(input, header, low_memory),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn open_input(
    input: Option<PathBuf>,
    low_memory: bool,
) -> Result<MafReader<Box<dyn Read>>, MafError> {
    let source: Box<dyn Read> = match input {
        Some(path) if path.to_string_lossy() != "-" => Box::new(File::open(&path)?),
        _ => Box::new(io::stdin()),
    };
    Ok(MafReader::with_capacity(
        source,
        input_buffer_size(low_memory),
    ))
}

fn run_cat(
    input: Option<PathBuf>,
    skip_invalid: bool,
    min_sequences: usize,
    stats: bool,
    low_memory: bool,
) -> Result<(), MafError> {
    let reader = open_input(input, low_memory)?;
    let stdout = io::stdout();
    let writer = MafWriter::with_capacity(output_buffer_size(low_memory), stdout.lock());

    let cmd = CatCommand::new()
        .with_skip_invalid(skip_invalid)
        .with_min_sequences(min_sequences);
    let result = cmd.run(reader, writer)?;

    if stats {
        eprintln!("Cat stats: {}", result);
    }
    Ok(())
}

fn run_stats(input: Option<PathBuf>, low_memory: bool) -> Result<(), MafError> {
    let reader = open_input(input, low_memory)?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    StatsCommand::new().run(reader, &mut handle)?;
    Ok(())
}

fn run_coords(input: Option<PathBuf>, header: bool, low_memory: bool) -> Result<(), MafError> {
    let reader = open_input(input, low_memory)?;
    let stdout = io::stdout();
    let mut writer = TsvWriter::with_capacity(output_buffer_size(low_memory), stdout.lock());
    CoordsCommand::new().with_header(header).run(reader, &mut writer)?;
    Ok(())
}
