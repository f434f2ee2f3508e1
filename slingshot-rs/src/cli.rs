//! Root CLI structure for slingshot-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slingshot-rs")]
#[command(about = "Command-line tools for the slingshot scene", long_about = None)]
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
    /// Spline file operations
    Spline {
        #[command(subcommand)]
        command: crate::commands::spline::SplineCommands,
    },

    /// Run a launch through the frame loop without a window
    Simulate(crate::commands::simulate::SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
