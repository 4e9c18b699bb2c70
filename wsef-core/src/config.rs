use serde::{Deserialize, Serialize};

/// Patch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// File name of the output overlay.
    pub output_name: String,

    /// Leave magnitudes that are already exactly 1.0 alone.
    ///
    /// When disabled, a magnitude of 1.0 is corrected to 0.0 like any other
    /// in-range value.
    pub ignore_unit_magnitude: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            output_name: "WeaponSpeedEffectsFix.esp".to_string(),
            ignore_unit_magnitude: true,
        }
    }
}
