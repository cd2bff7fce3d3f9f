//! `krishimitra config init|show`

use std::path::Path;

use anyhow::{bail, Context, Result};
use krishimitra_config::{
    apply_all_defaults, collect_redacted_paths, collect_referenced_vars, load_config, prepare,
    redact, write_config, KrishiConfig,
};

use crate::terminal_output::{note_info, note_success};

/// Write a config file holding every default.
pub async fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    write_config(&apply_all_defaults(KrishiConfig::default()), path).await?;
    note_success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Print the effective config as YAML with secrets masked.
pub async fn show(path: &Path) -> Result<()> {
    let raw = load_config(path).await?;
    let raw_value = serde_json::to_value(&raw).context("Failed to serialize config")?;
    let referenced = collect_referenced_vars(&raw_value);

    let effective = serde_json::to_value(prepare(raw)?).context("Failed to serialize config")?;
    let masked = collect_redacted_paths(&effective);

    note_info(&format!("Config file: {}", path.display()));
    if !referenced.is_empty() {
        note_info(&format!("Environment references: {}", referenced.join(", ")));
    }
    if !masked.is_empty() {
        note_info(&format!("Masked: {}", masked.join(", ")));
    }
    print!("{}", serde_yaml::to_string(&redact(&effective))?);
    Ok(())
}
