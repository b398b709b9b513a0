use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

mod cli;
mod output;
mod poll;
mod serve;

use cli::{Args, CliError, Command};

fn main() {
    match navtexd() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn navtexd() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    match args.command {
        Command::Parse {
            sources,
            config,
            out,
        } => {
            let sources = output::load_sources(&sources, config.as_deref())?;
            output::run_parse(&sources, &out)?;
        }
        Command::Serve {
            sources,
            config,
            listen,
        } => {
            let sources = output::load_sources(&sources, config.as_deref())?;
            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| CliError::from(anyhow::Error::from(e)))?;
            runtime.block_on(serve::run(listen, sources))?;
        }
        Command::Poll { url, interval, out } => {
            poll::run(&url, Duration::from_secs(interval), &out)?;
        }
    }

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // errors only
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Error)
            .init();
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("navtexgeo", log_filter)
            .filter_module("navtexd", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}
