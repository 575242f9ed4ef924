//! ddr-stats - Compare DDR flower score progression between players
//!
//! Usage:
//!   ddr-stats [OPTIONS] [PLAYER1] [PLAYER2]
//!   ddr-stats --help

use std::fs::File;

use tracing_subscriber::EnvFilter;

mod chart;
mod cli;
mod event;
mod theme;
mod tui;

use cli::Output;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match cli::parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            cli::print_help();
            std::process::exit(1);
        }
    };

    if options.help {
        cli::print_help();
        return Ok(());
    }

    init_logging(options.output == Output::Chart);

    if let Err(e) = cli::run(&options) {
        tracing::error!(error = %e, "Comparison failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // The chart owns the terminal, so log to a file while it is shown
    if to_file {
        match File::create("ddr-stats.log") {
            Ok(log_file) => {
                let _ = builder.with_ansi(false).with_writer(log_file).try_init();
                return;
            }
            Err(e) => eprintln!("Warning: cannot create ddr-stats.log ({}), logging to stderr", e),
        }
    }

    let _ = builder.with_writer(std::io::stderr).try_init();
}
