//! Root CLI structure for quake-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quake-rs")]
#[command(about = "Command-line tools for Quake II model files", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// MD2 model operations
    Md2 {
        #[command(subcommand)]
        command: crate::commands::md2::Md2Commands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
