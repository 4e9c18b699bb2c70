//! Values resolved once at the start of a run and passed to every pass.

use crate::config::PatchConfig;
use crate::store::OverlayStore;
use wsefdata::ModKey;

/// Compatibility overlay that resets the weapon speed value through a script.
pub const COMPAT_OVERLAY: &str = "WeaponSpeedMultFix.esp";

/// Framework overlay whose dependents handle weapon speed on their own.
pub const RIVAL_OVERLAY: &str = "Attack Speed Framework.esp";

/// Script the compatibility overlay provides for in-scope effects.
pub const RESET_SCRIPT: &str = "WeSpFiAVScript";

#[derive(Debug, Clone)]
pub struct PatchContext {
    /// Compatibility overlay, when installed.
    pub compat: Option<ModKey>,
    /// Rival framework overlay, when installed.
    pub rival: Option<ModKey>,
    pub ignore_unit_magnitude: bool,
}

impl PatchContext {
    pub fn resolve<S: OverlayStore>(store: &S, config: &PatchConfig) -> Self {
        let compat = store.resolve_overlay(COMPAT_OVERLAY);
        let rival = store.resolve_overlay(RIVAL_OVERLAY);

        match &compat {
            Some(key) => log::info!("Compatibility overlay {} is installed", key),
            None => log::info!("{} not installed, scripts will not be attached", COMPAT_OVERLAY),
        }
        if let Some(key) = &rival {
            log::info!("Framework overlay {} is installed", key);
        }

        Self {
            compat,
            rival,
            ignore_unit_magnitude: config.ignore_unit_magnitude,
        }
    }

    /// True if `masters` include the compatibility overlay.
    pub fn masters_include_compat(&self, masters: &[ModKey]) -> bool {
        self.compat
            .as_ref()
            .is_some_and(|compat| masters.contains(compat))
    }

    /// True if `masters` include the compatibility or the framework overlay.
    pub fn masters_include_handler(&self, masters: &[ModKey]) -> bool {
        self.masters_include_compat(masters)
            || self
                .rival
                .as_ref()
                .is_some_and(|rival| masters.contains(rival))
    }
}
