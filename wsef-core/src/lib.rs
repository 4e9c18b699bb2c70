//! # Weapon Speed Effects Fix
//!
//! Finds magic effects that drive a weapon speed multiplier and repairs the
//! spells, scrolls and enchantments that use them.
//!
//! The stored magnitude of such an effect is added on top of a base
//! multiplier of 1.0, so an author who writes `2.0` meaning "twice as fast"
//! actually gets three times. The patch writes corrected copies into a new
//! output overlay and never touches the installed overlays.
//!
//! ## Passes
//!
//! | Pass | Module | Output |
//! |------|--------|--------|
//! | Classify effects | [`scope`] | [`InScopeEffects`] |
//! | Attach reset script | [`script`] | magic effect overrides |
//! | Scan referencing records | [`scan`] | candidate spells, scrolls, enchantments |
//! | Conflict guard | [`guard`] | candidates left to correct |
//! | Correct magnitudes | [`correct`] | record overrides |
//!
//! [`run_patch`] runs them in that order against any [`OverlayStore`].

pub mod config;
pub mod context;
pub mod correct;
pub mod error;
pub mod guard;
pub mod patch;
pub mod scan;
pub mod scope;
pub mod script;
pub mod store;

/// Test fixtures, also usable by downstream crates' tests.
pub mod testing;

pub use config::PatchConfig;
pub use context::{PatchContext, COMPAT_OVERLAY, RESET_SCRIPT, RIVAL_OVERLAY};
pub use error::PatchError;
pub use patch::{run_patch, run_patch_with_summary, KindSummary, PatchSummary};
pub use scope::InScopeEffects;
pub use store::{OverlayStore, StoreError};
