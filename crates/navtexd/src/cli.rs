use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};

const USAGE_LONG: &str = r#"
navtexd turns NAVTEX maritime safety bulletins into GeoJSON overlay files.

Sources are given as positional arguments and/or one per line in a --config file ('#' starts a comment line). A source is either a directory of receiver .TXT dumps or an http(s) URL of a bulletin board whose <pre> block carries the messages.

One-shot conversion:

    navtexd parse /media/WIB2/NATIONAL --out ./overlays

Serve collections on demand ("/" lists sources, "/read/0" parses the first):

    navtexd serve /media/WIB2/NATIONAL https://example.org/navtex.html

Mirror a running server into overlay files every 15 minutes:

    navtexd poll --url http://localhost:8000 --out ./overlays

NAVTEX bulletins are advisory material. ALWAYS rely on official charts and broadcasts for navigation.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, global = true, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print nothing but errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// Parse every source once and write overlay files
    Parse {
        /// Source directories or URLs
        sources: Vec<String>,

        /// File listing additional sources, one per line
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for <name>.geojson files
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Serve feature collections over HTTP, computed on demand
    Serve {
        /// Source directories or URLs
        sources: Vec<String>,

        /// File listing additional sources, one per line
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Listen address
        #[arg(short, long, default_value = "0.0.0.0:8000")]
        listen: SocketAddr,
    },

    /// Periodically mirror a running server into overlay files
    Poll {
        /// Base URL of a navtexd serve instance
        #[arg(short, long)]
        url: String,

        /// Query interval, seconds
        #[arg(short, long, default_value_t = 900)]
        interval: u64,

        /// Output directory for <name>.geojson files
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommand() {
        let args = Args::try_parse_from([
            "navtexd", "parse", "/data/NATIONAL", "--out", "/tmp/overlays",
        ])
        .unwrap();
        match args.command {
            Command::Parse { sources, out, .. } => {
                assert_eq!(vec!["/data/NATIONAL".to_owned()], sources);
                assert_eq!(PathBuf::from("/tmp/overlays"), out);
            }
            _ => unreachable!(),
        }
    }
}
