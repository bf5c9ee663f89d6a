//! `t201` command-line entry point.
//!
//! ```bash
//! t201 generate --files 5 --rows 100
//! t201 fetch -f Stock '>' 500 -s "Unit Price" -r -c "Product ID" -c Stock
//! t201 delete
//! ```
//!
//! Set `RUST_LOG=debug` to see per-source read logs.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use t201_script::prompt::PREFIX;

fn main() -> ExitCode {
    env_logger::init();
    if let Err(err) = cli::install_interrupt_handler() {
        log::warn!("failed to set Ctrl-C handler: {err}");
    }

    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if cli::is_cancelled(&err) => {
            println!("\n{PREFIX} {}", cli::CANCELLED);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{PREFIX} Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
