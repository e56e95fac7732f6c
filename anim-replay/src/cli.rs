//! Root CLI structure for anim-replay

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "anim-replay")]
#[command(about = "Replay and inspect actor animation scenes", long_about = None)]
#[command(version)]
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

impl Cli {
    /// Log level selected by `--quiet` and repeated `-v`
    pub fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Error,
            (false, 0) => LevelFilter::Warn,
            (false, 1) => LevelFilter::Info,
            (false, 2) => LevelFilter::Debug,
            (false, _) => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scene and print joint transforms after every update
    Run {
        /// Path to the scene JSON file
        scene: PathBuf,

        /// Only print these joints (repeatable; default is every joint)
        #[arg(short, long = "joint")]
        joints: Vec<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the skeleton, clips and script of a scene
    Inspect {
        /// Path to the scene JSON file
        scene: PathBuf,

        /// Only list clips matching this pattern ('?' matches any character)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Replay a scene and print a digest of every solved transform
    Digest {
        /// Path to the scene JSON file
        scene: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
