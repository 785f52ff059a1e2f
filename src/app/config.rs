use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    dirs: Option<Vec<String>>,
    suffixes: Option<Vec<String>>,
    ignore_dirs: Option<Vec<String>>,
    create_year_dir: Option<bool>,
    create_month_dir: Option<bool>,
    sibling_dir: Option<bool>,
    skip_date_dir: Option<bool>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("mediastamp").join("presets.toml"))
}

fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content =
        fs::read_to_string(path).context(format!("Failed to read config at {:?}", path))?;

    parse_presets(&content)
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content).context("Failed to parse presets.toml")?;
    Ok(parsed.presets)
}

/// Concatenates preset and CLI lists, dropping blanks and duplicates while keeping order.
fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = std::collections::HashSet::new();
    combined
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn normalize_suffix(suffix: String) -> String {
    suffix.trim_start_matches('.').to_lowercase()
}

pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let presets = match presets_path() {
        Some(path) => load_presets_file(&path)?,
        None => {
            log::debug!("No home directory, presets unavailable");
            HashMap::new()
        }
    };
    merge_config(cli, &presets)
}

fn merge_config(cli: Cli, presets: &HashMap<String, PresetConfig>) -> Result<RuntimeConfig> {
    let preset = match cli.preset.as_deref() {
        Some(key) => presets
            .get(key)
            .cloned()
            .context(format!("Unknown preset `{}`", key))?,
        None => PresetConfig::default(),
    };

    let to_paths = |v: Vec<String>| -> Vec<PathBuf> { v.into_iter().map(PathBuf::from).collect() };

    let config = RuntimeConfig {
        dirs: to_paths(merge_vecs(preset.dirs, cli.dirs)),
        suffixes: merge_vecs(preset.suffixes, cli.suffixes)
            .into_iter()
            .map(normalize_suffix)
            .collect(),
        create_year_dir: cli.create_year_dir.or(preset.create_year_dir).unwrap_or(false),
        create_month_dir: cli
            .create_month_dir
            .or(preset.create_month_dir)
            .unwrap_or(false),
        sibling_dir: cli.sibling_dir.or(preset.sibling_dir).unwrap_or(false),
        skip_date_dir: cli.skip_date_dir.or(preset.skip_date_dir).unwrap_or(true),
        ignore_dirs: to_paths(merge_vecs(preset.ignore_dirs, cli.ignore_dirs)),
        dry_run: cli.dry_run,
    };

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const PRESETS: &str = r#"
[phone]
dirs = ["/media/phone"]
suffixes = [".JPG", "mp4"]
create_year_dir = true
skip_date_dir = false

[camera]
ignore_dirs = ["/media/camera/raw"]
"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mediastamp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_without_preset() {
        let config = merge_config(cli(&["--dirs", "a,,b, a"]), &HashMap::new()).unwrap();
        assert_eq!(config.dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert!(config.suffixes.is_empty());
        assert!(!config.create_year_dir);
        assert!(!config.create_month_dir);
        assert!(!config.sibling_dir);
        assert!(config.skip_date_dir);
        assert!(!config.dry_run);
    }

    #[test]
    fn preset_values_merge_with_cli() {
        let presets = parse_presets(PRESETS).unwrap();
        let config = merge_config(
            cli(&["--preset", "phone", "--dirs", "/extra", "--suffixes", "mov"]),
            &presets,
        )
        .unwrap();
        assert_eq!(
            config.dirs,
            vec![PathBuf::from("/media/phone"), PathBuf::from("/extra")]
        );
        assert_eq!(config.suffixes, vec!["jpg", "mp4", "mov"]);
        assert!(config.create_year_dir);
        assert!(!config.skip_date_dir);
    }

    #[test]
    fn cli_booleans_override_preset() {
        let presets = parse_presets(PRESETS).unwrap();
        let config = merge_config(
            cli(&["--preset=phone", "--create-year-dir=false", "--skip-date-dir"]),
            &presets,
        )
        .unwrap();
        assert!(!config.create_year_dir);
        assert!(config.skip_date_dir);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let presets = parse_presets(PRESETS).unwrap();
        assert!(merge_config(cli(&["--preset", "tablet"]), &presets).is_err());
    }

    #[test]
    fn malformed_presets_are_rejected() {
        assert!(parse_presets("[phone]\ndirs = \"not a list\"").is_err());
    }

    #[test]
    fn missing_presets_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let presets = load_presets_file(&dir.path().join("presets.toml")).unwrap();
        assert!(presets.is_empty());
    }
}
