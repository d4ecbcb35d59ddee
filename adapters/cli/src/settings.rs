//! Loads simulation overrides from TOML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_chase_world::SimulationConfig;

/// Reads `path` when provided, falling back to the reference configuration.
pub(crate) fn load(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration at {}", path.display()))?;
    parse(&contents)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

fn parse(contents: &str) -> Result<SimulationConfig> {
    toml::from_str(contents).context("failed to parse simulation configuration toml contents")
}

/// Renders the effective configuration so it can be saved and edited.
pub(crate) fn render(config: &SimulationConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to render simulation configuration as toml")
}
