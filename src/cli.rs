use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filetype")]
#[command(author, version, about = "Identify file formats by their magic numbers", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify one or more files
    Identify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Validate against the whole catalog instead of narrowing by extension
        #[arg(long)]
        exhaustive: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List catalog signatures
    List {
        /// Only show signatures advertising this extension
        #[arg(short, long)]
        extension: Option<String>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// JSON catalog to use instead of the built-in one
    #[arg(short, long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Drop wildcard pattern bytes instead of matching any byte there
    #[arg(long)]
    pub drop_wildcards: bool,
}
