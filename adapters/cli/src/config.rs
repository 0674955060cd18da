use std::{fs, path::Path};

use anyhow::{Context, Result};
use rogue_board_core::BoardConfig;
use rogue_board_rendering::Glyphs;
use serde::Deserialize;

/// Contents of a board configuration file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    /// Board layout parameters handed to the generator.
    pub(crate) board: BoardConfig,
    /// Characters used by the ASCII output.
    pub(crate) glyphs: Glyphs,
}

/// Reads and parses the configuration file at `path`.
pub(crate) fn load(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read board config {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid board config {}", path.display()))
}

fn parse(contents: &str) -> Result<FileConfig> {
    toml::from_str(contents).context("failed to parse board config toml contents")
}
