use anyhow::{Context, Result};
use std::path::Path;
use wsef_core::PatchConfig;
use wsefdata::{files, LoadOrder, ModKey};

/// Reads a JSON config file, or returns the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<PatchConfig> {
    let Some(path) = path else {
        return Ok(PatchConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Loads the active overlays listed in `load_order_path` from `data_dir`.
///
/// A previous copy of the output overlay is left out so a rerun starts from
/// the installed overlays only.
pub fn load_overlays(data_dir: &Path, load_order_path: &Path, output: &ModKey) -> Result<LoadOrder> {
    if !data_dir.is_dir() {
        anyhow::bail!("Data directory not found: {}", data_dir.display());
    }

    let mut mod_keys = files::read_load_order(load_order_path)
        .with_context(|| format!("Failed to read load order {}", load_order_path.display()))?;
    let listed = mod_keys.len();
    mod_keys.retain(|key| key != output);
    if mod_keys.len() != listed {
        log::warn!("Ignoring previous output overlay {} in load order", output);
    }
    log::info!("Load order has {} active overlays", mod_keys.len());

    let load_order = files::load_from_dir(data_dir, &mod_keys)
        .with_context(|| format!("Failed to load overlays from {}", data_dir.display()))?;
    Ok(load_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), PatchConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "ignore_unit_magnitude": false }"#).unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.ignore_unit_magnitude);
        assert_eq!(config.output_name, PatchConfig::default().output_name);
    }

    #[test]
    fn test_previous_output_excluded() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("A.esp.json"),
            r#"{ "name": "A.esp", "masters": [] }"#,
        )
        .unwrap();
        let load_order_path = dir.path().join("plugins.txt");
        fs::write(&load_order_path, "*A.esp\n*WeaponSpeedEffectsFix.esp\n").unwrap();

        let output: ModKey = "WeaponSpeedEffectsFix.esp".parse().unwrap();
        let load_order = load_overlays(dir.path(), &load_order_path, &output).unwrap();
        assert_eq!(load_order.len(), 1);
        assert!(!load_order.contains(&output));
    }

    #[test]
    fn test_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let output: ModKey = "Out.esp".parse().unwrap();
        let err = load_overlays(&missing, &missing.join("plugins.txt"), &output).unwrap_err();
        assert!(err.to_string().contains("Data directory not found"));
    }
}
