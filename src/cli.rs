use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a pagebook.toml config file
    Config,
    /// Paginates every book and writes the book catalog
    Build,
    /// Scans the generated pages for codex shortcodes and writes the reference index
    Refs,
    /// Paginates a single manuscript and prints a summary of its pages without writing anything
    Paginate {
        /// Path to the manuscript text file
        manuscript: PathBuf,
        /// Override the configured target characters per page
        #[clap(long)]
        target_chars: Option<usize>,
        /// Override the configured minimum characters before a heading
        #[clap(long)]
        min_chars: Option<usize>,
    },
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Configuration file to use
    #[clap(long, global = true, env = "PAGEBOOK_CONFIG", default_value = "pagebook.toml")]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Commands,
}
