pub mod permissions;

use clap::ValueEnum;
use core_permission::PermissionSet;
use std::fs;
use std::path::Path;

/// On-disk encoding of a permission set
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Picks the format from the file extension, defaulting to TOML
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Reads and parses a permission file
pub fn load(path: &str) -> anyhow::Result<(PermissionSet, Format)> {
    let content =
        fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read file: {}", e))?;

    let format = Format::from_path(path);
    tracing::debug!(path, ?format, bytes = content.len(), "loading permission file");

    let set = match format {
        Format::Toml => PermissionSet::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("TOML parsing error: {}", e))?,
        Format::Json => PermissionSet::from_json(&content)
            .map_err(|e| anyhow::anyhow!("JSON parsing error: {}", e))?,
    };

    Ok((set, format))
}
