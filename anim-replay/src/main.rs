//! anim-replay: replay actor animation scenes from the command line

mod cli;
mod commands;
mod utils;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use env_logger::Env;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the verbosity flags
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .init();

    match cli.command {
        Commands::Run {
            scene,
            joints,
            format,
        } => commands::run::execute(&scene, &joints, format),
        Commands::Inspect {
            scene,
            pattern,
            no_color,
        } => commands::inspect::execute(&scene, pattern.as_deref(), no_color),
        Commands::Digest { scene } => commands::digest::execute(&scene),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            Ok(())
        }
    }
}
