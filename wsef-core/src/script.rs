//! Script presence normalization for in-scope magic effects.
//!
//! With the compatibility overlay installed, every in-scope effect needs
//! [`RESET_SCRIPT`] so the engine resets the weapon speed value when the
//! effect starts. Effects defined by an overlay that already masters the
//! compatibility overlay inherit the script and are left alone.

use crate::context::{PatchContext, RESET_SCRIPT};
use crate::scope::InScopeEffects;
use crate::store::{masters_of_origin, OverlayStore, StoreError};
use wsefdata::{MagicEffect, Overlay, ScriptEntry, VirtualMachineAdapter};

fn has_reset_script(effect: &MagicEffect) -> bool {
    effect
        .virtual_machine_adapter
        .as_ref()
        .is_some_and(|vmad| vmad.has_script(RESET_SCRIPT))
}

/// Attaches the reset script where missing. Returns how many effects changed.
pub fn attach_reset_scripts<S: OverlayStore>(
    store: &S,
    ctx: &PatchContext,
    in_scope: &InScopeEffects,
    patch: &mut Overlay,
) -> Result<usize, StoreError> {
    if ctx.compat.is_none() {
        return Ok(0);
    }

    let mut attached = 0;
    for effect in store.winning_overrides::<MagicEffect>()? {
        if !in_scope.contains(&effect.form_key) {
            continue;
        }

        let Some(masters) = masters_of_origin(store, &effect.form_key)? else {
            log::debug!("{}: defining overlay not installed, skipping", effect.form_key);
            continue;
        };
        if ctx.masters_include_compat(masters) || has_reset_script(effect) {
            continue;
        }

        let copy = patch.get_or_add_override(effect);
        copy.virtual_machine_adapter
            .get_or_insert_with(VirtualMachineAdapter::default)
            .scripts
            .push(ScriptEntry::new(RESET_SCRIPT));
        attached += 1;
        log::debug!("{}: attached {}", effect.form_key, RESET_SCRIPT);
    }

    log::info!("Attached {} to {} magic effects", RESET_SCRIPT, attached);
    Ok(attached)
}
