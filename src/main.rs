use std::{fs::read_to_string, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use frontend::{
    ast::printer::print_tree,
    check_source,
    config::{FrontendConfig, DEFAULT_LOG_LEVEL},
    diagnostics::Level,
    display_error,
};

/// Checks a source file: tokenizes, parses and analyzes it, then reports
/// every error found.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// Source file to check
    file: PathBuf,

    /// Minimum level of diagnostics to emit (debug, info, warning, error)
    #[arg(short, long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: Level,

    /// Disable diagnostics entirely
    #[arg(short, long)]
    quiet: bool,

    /// Print the syntax tree after parsing
    #[arg(long)]
    dump_tree: bool,

    /// Print every scope and its symbols after analysis
    #[arg(long)]
    dump_scopes: bool,
}

impl From<&Args> for FrontendConfig {
    fn from(args: &Args) -> Self {
        FrontendConfig {
            log_level: args.log_level,
            logging_enabled: !args.quiet,
            dump_tree: args.dump_tree,
            dump_scopes: args.dump_scopes,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = FrontendConfig::from(&args);

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let source = read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args.file.to_string_lossy();

    let logger = config.logger();
    let output = check_source(&source, &logger);

    if config.dump_tree {
        if let Some(program) = &output.program {
            print!("{}", print_tree(program));
        }
    }

    if config.dump_scopes {
        if let Some(analysis) = &output.analysis {
            print!("{}", analysis.dump_scopes());
        }
    }

    for error in output.errors.iter() {
        display_error(error, &source, &file_name);
    }

    if output.succeeded() {
        tracing::info!("{} checked without errors", file_name);
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("{} error(s) in {}", output.errors.len(), file_name);
        Ok(ExitCode::FAILURE)
    }
}
