//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate architecture docs from module-organized PHP codebases
#[derive(Parser, Debug)]
#[command(name = "archdoc")]
#[command(about = "Generate architecture docs from module-organized PHP codebases")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a source tree and export the architecture document
    Export {
        /// Root source directory ({root}/{Context}/{Module}/{Layer}/...)
        path: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Serve the architecture document with a regeneration endpoint
    Serve {
        /// Root source directory to regenerate from
        path: PathBuf,

        /// Output file path of the served document
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Port to serve on
        #[arg(long, default_value = "8080")]
        port: u16,
    },

    /// Print version information
    Version,
}
