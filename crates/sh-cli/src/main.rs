//! Synthetic Home command line
//!
//! Compiles a home description against a device type catalog and prints the
//! resulting entities, a validation summary, or the catalog itself.

mod args;
mod commands;

use anyhow::Result;
use args::{Args, Command};
use sh_config::Settings;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {err}");
            args::print_usage();
            std::process::exit(2);
        }
    };
    if args.command == Command::Help {
        args::print_usage();
        return Ok(());
    }

    let settings = commands::apply_args(Settings::load(".")?, &args);

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!(
        "Starting Synthetic Home v{}",
        env!("CARGO_PKG_VERSION")
    );
    debug!("Settings: {:?}", settings);

    let output = match args.command {
        Command::Compile => commands::compile(&settings, &args.presets)?,
        Command::Check => commands::check(&settings, &args.presets)?,
        Command::Dump => commands::dump(&settings)?,
        Command::Help => return Ok(()),
    };
    println!("{output}");

    Ok(())
}
