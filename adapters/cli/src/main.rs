#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and prints Rogue Board levels.

mod config;
mod level_export;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use rogue_board_rendering::{Presentation, RenderingBackend, TerminalBackend, TextFrame};
use rogue_board_system_layout::BoardGenerator;
use rogue_board_world::{query, Board};

use crate::{config::FileConfig, level_export::LevelExport};

/// Output formats supported by the command-line interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Draw every level as a character grid.
    Ascii,
    /// Emit every level as a JSON document.
    Json,
}

/// Command-line arguments for the Rogue Board generator.
#[derive(Debug, Parser)]
#[command(name = "rogue-board", version, about = "Generate Rogue Board levels")]
struct CliArgs {
    /// Board configuration file; built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Global seed; a random seed is chosen and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// First level to generate.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Number of consecutive levels to generate.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    levels: u32,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
}

/// Entry point for the Rogue Board command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => FileConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating {} level(s) from seed {seed}", args.levels);

    let mut generator =
        BoardGenerator::new(config.board.clone()).context("board configuration is invalid")?;
    let dimensions = generator.dimensions();
    let last_level = args
        .level
        .checked_add(args.levels - 1)
        .context("level range overflows")?;

    let stdout = io::stdout();
    let mut backend = TerminalBackend::new(stdout.lock());
    let mut exports = Vec::new();

    for level in args.level..=last_level {
        let mut board = Board::new();
        let summary = generator
            .generate_seeded(level, seed, &mut board)
            .with_context(|| format!("failed to generate level {level}"))?;

        match args.format {
            OutputFormat::Ascii => {
                let frame =
                    TextFrame::compose(dimensions, query::placements(&board), &config.glyphs)
                        .with_context(|| format!("failed to draw level {level}"))?;
                backend.present(&Presentation::new(
                    format!("Day {level} (seed {seed})"),
                    frame,
                ))?;
            }
            OutputFormat::Json => exports.push(LevelExport::capture(
                &summary,
                seed,
                dimensions,
                &board,
                &config.board.variants,
            )),
        }
    }

    if args.format == OutputFormat::Json {
        let mut writer = backend.into_inner();
        serde_json::to_writer_pretty(&mut writer, &exports)
            .context("failed to write level export")?;
        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_generate_a_single_ascii_level() {
        let args = CliArgs::try_parse_from(["rogue-board"]).expect("defaults parse");

        assert_eq!(args.level, 1);
        assert_eq!(args.levels, 1);
        assert_eq!(args.format, OutputFormat::Ascii);
        assert!(args.seed.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn zero_levels_is_rejected() {
        assert!(CliArgs::try_parse_from(["rogue-board", "--levels", "0"]).is_err());
    }

    #[test]
    fn explicit_arguments_are_parsed() {
        let args = CliArgs::try_parse_from([
            "rogue-board",
            "--seed",
            "42",
            "--level",
            "3",
            "--levels",
            "2",
            "--format",
            "json",
            "--config",
            "config/board.toml",
        ])
        .expect("arguments parse");

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.level, 3);
        assert_eq!(args.levels, 2);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.config, Some(PathBuf::from("config/board.toml")));
    }
}
