use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use loan_calc_core::config::CalculatorConfig;

/// Read a JSON file into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = read_text(&canonical)?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Load calculator settings. `.yaml` / `.yml` files are parsed as YAML,
/// anything else as JSON.
pub fn read_config(path: &str) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = read_text(&canonical)?;

    let is_yaml = canonical
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let config = if is_yaml {
        CalculatorConfig::from_yaml_str(&contents)
    } else {
        CalculatorConfig::from_json_str(&contents)
    }
    .map_err(|e| format!("Invalid config '{}': {}", canonical.display(), e))?;

    tracing::debug!(path = %canonical.display(), yaml = is_yaml, "loaded calculator config");
    Ok(config)
}

fn read_text(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?)
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }
    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
