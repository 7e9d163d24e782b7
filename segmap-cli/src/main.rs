//! segmap - curate and generate the display firmware's code table.
//!
//! Usage:
//!   segmap map                      # Prompt for every unmapped code in codes-in.list
//!   segmap map --input capture.list # Curate a different capture
//!   segmap gen                      # Compile codes-mapped.list into segmapgen.c
//!
//! `map` expects both the capture list and the mapping log to exist; create
//! an empty codes-mapped.list for a first session. `gen` only needs the log.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use segmap_core::{read_code_list, run_session, Console, MappingStore, SegmapResult};

/// Segment mapping curator CLI
#[derive(Parser, Debug)]
#[command(name = "segmap")]
#[command(about = "Curate and generate 14-segment code tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (reserved)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactively map the codes captured from the display bus
    Map {
        /// Captured device codes, one hex literal per line
        #[arg(long, default_value = "codes-in.list")]
        input: PathBuf,

        /// Append-only mapping log
        #[arg(long, default_value = "codes-mapped.list")]
        mapped: PathBuf,
    },

    /// Compile the mapping log into the firmware lookup table
    Gen {
        /// Append-only mapping log
        #[arg(long, default_value = "codes-mapped.list")]
        mapped: PathBuf,

        /// Generated C source file
        #[arg(long, default_value = "segmapgen.c")]
        output: PathBuf,
    },
}

/// Blocking stdin/stdout console for a live curation session.
struct StdConsole;

impl Console for StdConsole {
    fn show(&mut self, text: &str) {
        print!("{text}");
        let _ = io::stdout().flush();
    }

    fn prompt(&mut self, text: &str) -> SegmapResult<Option<String>> {
        print!("{text}");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose is reserved; diagnostics are controlled through RUST_LOG.
    let _ = cli.verbose;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> SegmapResult<()> {
    match cli.command {
        Commands::Map { input, mapped } => {
            let codes = read_code_list(&input)?;
            let mut store = MappingStore::load(mapped)?;
            run_session(&codes, &mut store, &mut StdConsole)?;
            Ok(())
        }
        Commands::Gen { mapped, output } => {
            let store = MappingStore::load(mapped)?;
            segmap_core::generate(&store, &output)
        }
    }
}
