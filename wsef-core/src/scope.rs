//! Effect scope classification.
//!
//! An effect definition is in scope when either of its actor values is one of
//! the weapon speed channels. The resulting set is computed once per run and
//! only read afterwards.

use crate::store::{OverlayStore, StoreError};
use std::collections::HashSet;
use wsefdata::{ActorValue, FormKey, MagicEffect};

/// Actor values that carry the weapon speed multiplier, main hand then off hand.
pub const WEAPON_SPEED_CHANNELS: [ActorValue; 2] =
    [ActorValue::WeaponSpeedMult, ActorValue::LeftWeaponSpeedMultiply];

pub fn is_weapon_speed_channel(value: &ActorValue) -> bool {
    WEAPON_SPEED_CHANNELS.contains(value)
}

pub fn is_in_scope(effect: &MagicEffect) -> bool {
    effect
        .actor_values()
        .into_iter()
        .any(is_weapon_speed_channel)
}

/// Identifiers of every in-scope effect definition.
#[derive(Debug, Clone, Default)]
pub struct InScopeEffects {
    keys: HashSet<FormKey>,
}

impl InScopeEffects {
    pub fn contains(&self, form_key: &FormKey) -> bool {
        self.keys.contains(form_key)
    }

    /// True if any of the given links is in scope.
    pub fn references_any<'a>(&self, mut links: impl Iterator<Item = &'a FormKey>) -> bool {
        links.any(|link| self.keys.contains(link))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormKey> {
        self.keys.iter()
    }
}

impl FromIterator<FormKey> for InScopeEffects {
    fn from_iter<I: IntoIterator<Item = FormKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Scans the winning version of every magic effect.
pub fn classify_effects<S: OverlayStore>(store: &S) -> Result<InScopeEffects, StoreError> {
    let effects = store.winning_overrides::<MagicEffect>()?;
    let in_scope: InScopeEffects = effects
        .iter()
        .filter(|effect| is_in_scope(effect))
        .map(|effect| effect.form_key.clone())
        .collect();

    log::info!(
        "{} of {} magic effects modify weapon speed",
        in_scope.len(),
        effects.len()
    );
    Ok(in_scope)
}
