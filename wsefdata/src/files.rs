//! On-disk overlays and load order files.
//!
//! Each overlay lives in the data directory as `<overlay name>.json`
//! (`Skyrim.esm.json`). The load order is a `plugins.txt` style list:
//!
//! ```text
//! # comment
//! *Skyrim.esm
//! *WeaponSpeedMultFix.esp
//! SomeDisabledMod.esp
//! ```

use crate::error::LoadError;
use crate::keys::ModKey;
use crate::load_order::LoadOrder;
use crate::overlay::Overlay;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Parses load order text into overlay keys.
///
/// Blank lines and `#` comments are skipped. If any line carries the `*`
/// active marker, only starred lines are kept; otherwise every line is.
pub fn parse_load_order(text: &str) -> Result<Vec<ModKey>, LoadError> {
    let mut entries = Vec::new();
    let mut any_starred = false;

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_start_matches('\u{feff}');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (active, name) = match line.strip_prefix('*') {
            Some(rest) => (true, rest.trim()),
            None => (false, line),
        };
        any_starred |= active;
        let key = ModKey::from_file_name(name).map_err(|source| LoadError::LoadOrderEntry {
            line: line_no + 1,
            source,
        })?;
        entries.push((active, key));
    }

    Ok(entries
        .into_iter()
        .filter(|(active, _)| *active || !any_starred)
        .map(|(_, key)| key)
        .collect())
}

pub fn read_load_order(path: &Path) -> Result<Vec<ModKey>, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_load_order(&text)
}

/// Path of an overlay's file inside a data directory.
pub fn overlay_path(data_dir: &Path, mod_key: &ModKey) -> PathBuf {
    data_dir.join(format!("{}.json", mod_key.file_name()))
}

/// Reads one overlay file and checks it declares the expected name.
pub fn load_overlay(data_dir: &Path, mod_key: &ModKey) -> Result<Overlay, LoadError> {
    let path = overlay_path(data_dir, mod_key);
    if !path.exists() {
        return Err(LoadError::OverlayNotFound(path));
    }
    let text = fs::read_to_string(&path)?;
    let overlay: Overlay = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.clone(),
        source,
    })?;
    if &overlay.mod_key != mod_key {
        return Err(LoadError::NameMismatch {
            path,
            expected: mod_key.clone(),
            found: overlay.mod_key,
        });
    }
    log::debug!(
        "Loaded {} ({} records, {} masters)",
        overlay.mod_key,
        overlay.record_count(),
        overlay.masters.len()
    );
    Ok(overlay)
}

/// Loads every listed overlay from `data_dir` and assembles the load order.
///
/// Files are parsed in parallel; the resulting order follows `mod_keys`.
pub fn load_from_dir(data_dir: &Path, mod_keys: &[ModKey]) -> Result<LoadOrder, LoadError> {
    let overlays = mod_keys
        .par_iter()
        .map(|mod_key| load_overlay(data_dir, mod_key))
        .collect::<Result<Vec<_>, _>>()?;

    let records: usize = overlays.iter().map(Overlay::record_count).sum();
    log::info!(
        "Loaded {} overlays ({} records) from {:?}",
        overlays.len(),
        records,
        data_dir
    );

    LoadOrder::new(overlays)
}

/// Writes an overlay as pretty JSON into `dir`, returning the file path.
pub fn write_overlay(dir: &Path, overlay: &Overlay) -> Result<PathBuf, LoadError> {
    fs::create_dir_all(dir)?;
    let path = overlay_path(dir, &overlay.mod_key);
    let json = serde_json::to_string_pretty(overlay)?;
    fs::write(&path, json)?;
    Ok(path)
}
