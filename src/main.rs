use std::fs;
use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tinyc::driver::{self, DriverError};
use tinyc::{EmitSet, PipelineOptions};

/// Compile and run a toy-language program.
#[derive(Debug, Parser)]
#[command(name = "tinyc", version, about)]
struct Cli {
    /// Source file. Without it, source is read from stdin up to a `#` line.
    file: Option<PathBuf>,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the parse tree
    #[arg(long)]
    tree: bool,

    /// Print the semantic analysis report even when it is clean
    #[arg(long)]
    check: bool,

    /// Print the generated intermediate code
    #[arg(long)]
    ir: bool,

    /// Print the optimized intermediate code
    #[arg(long)]
    optimized: bool,

    /// Print the pseudo-assembly listing
    #[arg(long)]
    asm: bool,

    /// Print every stage
    #[arg(long)]
    all: bool,

    /// Skip constant folding and propagation
    #[arg(long)]
    no_optimize: bool,

    /// Debug-level logging on stderr (overrides TINYC_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> PipelineOptions {
        let emit = if self.all {
            EmitSet::all()
        } else {
            EmitSet {
                tokens: self.tokens,
                tree: self.tree,
                diagnostics: self.check,
                ir: self.ir,
                optimized: self.optimized,
                asm: self.asm,
            }
        };
        PipelineOptions {
            optimize: !self.no_optimize,
            emit,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TINYC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), DriverError> {
    let (source, label) = match &cli.file {
        Some(path) => (fs::read_to_string(path)?, path.display().to_string()),
        None => (driver::read_stdin()?, "<stdin>".to_string()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver::run_source(&source, &label, &cli.options(), &mut out)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => {}
        // Already reported on stdout by the driver.
        Err(DriverError::Compile(err)) => {
            tracing::debug!(
                error = %err,
                diagnostics = err.diagnostics().len(),
                "compilation failed"
            );
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
