//! Scenario tests for the full patch run.
use super::*;
use crate::context::RESET_SCRIPT;
use crate::testing::{mod_key, spell, LoadOrderBuilder};
use wsefdata::{ActorValue, FormKey, LoadOrder, MagicEffect};

fn fk(s: &str) -> FormKey {
    s.parse().unwrap()
}

fn spell_magnitudes(patch: &Overlay, form_key: &str) -> Option<Vec<f32>> {
    patch.get::<Spell>(&fk(form_key)).map(|spell| {
        spell
            .effects
            .iter()
            .filter_map(|e| e.data.map(|d| d.magnitude))
            .collect()
    })
}

#[test]
fn test_spell_corrected_and_effect_scripted() {
    // A defines E, B (no compat master) defines S referencing E at 2.0
    let load_order = LoadOrderBuilder::new()
        .overlay("Skyrim.esm", &[])
        .overlay("WeaponSpeedMultFix.esp", &["Skyrim.esm"])
        .overlay("A.esp", &["Skyrim.esm"])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .overlay("B.esp", &["A.esp"])
        .spell("000900:B.esp", &[("000800:A.esp", 2.0)])
        .build();

    let (patch, summary) = run_patch_with_summary(&load_order, &PatchConfig::default()).unwrap();

    assert_eq!(patch.mod_key, mod_key("WeaponSpeedEffectsFix.esp"));
    assert_eq!(spell_magnitudes(&patch, "000900:B.esp"), Some(vec![1.0]));

    let effect = patch.get::<MagicEffect>(&fk("000800:A.esp")).unwrap();
    assert!(effect
        .virtual_machine_adapter
        .as_ref()
        .unwrap()
        .has_script(RESET_SCRIPT));

    assert_eq!(summary.in_scope_effects, 1);
    assert_eq!(summary.scripts_attached, 1);
    assert_eq!(summary.corrected(), 1);
    assert_eq!(patch.masters, vec![mod_key("A.esp"), mod_key("B.esp")]);
}

#[test]
fn test_spell_corrected_without_compat_overlay() {
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .overlay("B.esp", &["A.esp"])
        .spell("000900:B.esp", &[("000800:A.esp", 2.0)])
        .build();

    let patch = run_patch(&load_order, &PatchConfig::default()).unwrap();

    assert_eq!(spell_magnitudes(&patch, "000900:B.esp"), Some(vec![1.0]));
    assert!(patch.magic_effects.is_empty());
}

#[test]
fn test_compat_built_overlay_never_rewritten() {
    // C masters the compat overlay and defines T referencing E at 2.0
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .overlay("WeaponSpeedMultFix.esp", &[])
        .overlay("C.esp", &["A.esp", "WeaponSpeedMultFix.esp"])
        .spell("000901:C.esp", &[("000800:A.esp", 2.0)])
        .build();

    let patch = run_patch(&load_order, &PatchConfig::default()).unwrap();
    assert_eq!(spell_magnitudes(&patch, "000901:C.esp"), None);
}

#[test]
fn test_framework_built_overlay_never_rewritten() {
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::LeftWeaponSpeedMultiply, ActorValue::None)
        .overlay("Attack Speed Framework.esp", &[])
        .overlay("D.esp", &["A.esp", "Attack Speed Framework.esp"])
        .spell("000902:D.esp", &[("000800:A.esp", 2.0)])
        .scroll("000903:D.esp", &[("000800:A.esp", 2.0)])
        .object_effect("000904:D.esp", &[("000800:A.esp", 2.0)])
        .build();

    let (patch, summary) = run_patch_with_summary(&load_order, &PatchConfig::default()).unwrap();
    assert!(patch.is_empty());
    for kind in &summary.kinds {
        assert_eq!(kind.candidates, 1, "{}", kind.kind);
        assert_eq!(kind.guarded, 1, "{}", kind.kind);
    }
}

#[test]
fn test_guard_checks_defining_overlay_of_winning_override() {
    // B defines S; C (built against the compat overlay) overrides it.
    // The defining overlay is B, so the winning copy from C is corrected.
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .overlay("B.esp", &["A.esp"])
        .spell("000900:B.esp", &[("000800:A.esp", 2.0)])
        .overlay("WeaponSpeedMultFix.esp", &[])
        .overlay("C.esp", &["B.esp", "WeaponSpeedMultFix.esp"])
        .with_spell(spell("000900:B.esp", &[("000800:A.esp", 3.0)]))
        .build();

    let patch = run_patch(&load_order, &PatchConfig::default()).unwrap();
    assert_eq!(spell_magnitudes(&patch, "000900:B.esp"), Some(vec![2.0]));
}

#[test]
fn test_all_three_kinds_corrected_once() {
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .magic_effect("000801:A.esp", ActorValue::None, ActorValue::LeftWeaponSpeedMultiply)
        .overlay("B.esp", &["A.esp"])
        .spell("000900:B.esp", &[("000800:A.esp", 2.0), ("000801:A.esp", 1.5)])
        .scroll("000A00:B.esp", &[("000801:A.esp", 4.0)])
        .object_effect("000B00:B.esp", &[("000800:A.esp", 1.25), ("000800:A.esp", 11.0)])
        .build();

    let (patch, summary) = run_patch_with_summary(&load_order, &PatchConfig::default()).unwrap();

    assert_eq!(patch.spells.len(), 1);
    assert_eq!(patch.scrolls.len(), 1);
    assert_eq!(patch.object_effects.len(), 1);
    assert_eq!(spell_magnitudes(&patch, "000900:B.esp"), Some(vec![1.0, 0.5]));
    assert_eq!(patch.scrolls[0].effects[0].data.unwrap().magnitude, 3.0);

    let enchantment = &patch.object_effects[0];
    assert_eq!(enchantment.effects[0].data.unwrap().magnitude, 0.25);
    assert_eq!(enchantment.effects[1].data.unwrap().magnitude, 11.0);

    let spells = summary.kinds.iter().find(|k| k.kind == RecordKind::Spell).unwrap();
    assert_eq!(spells.overridden, 1);
    assert_eq!(spells.corrected, 2);
    assert_eq!(summary.corrected(), 4);
}

#[test]
fn test_process_unit_magnitudes_when_configured() {
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .spell("000900:A.esp", &[("000800:A.esp", 1.0)])
        .build();

    let default_patch = run_patch(&load_order, &PatchConfig::default()).unwrap();
    assert!(default_patch.spells.is_empty());

    let config = PatchConfig {
        ignore_unit_magnitude: false,
        ..Default::default()
    };
    let patch = run_patch(&load_order, &config).unwrap();
    assert_eq!(spell_magnitudes(&patch, "000900:A.esp"), Some(vec![0.0]));
}

#[test]
fn test_rerun_with_output_in_load_order_changes_nothing() {
    let load_order = LoadOrderBuilder::new()
        .overlay("A.esp", &[])
        .magic_effect("000800:A.esp", ActorValue::WeaponSpeedMult, ActorValue::None)
        .overlay("B.esp", &["A.esp"])
        .spell("000900:B.esp", &[("000800:A.esp", 2.0), ("000800:A.esp", 1.5)])
        .build();

    let config = PatchConfig::default();
    let first = run_patch(&load_order, &config).unwrap();

    let mut overlays = load_order.overlays().to_vec();
    overlays.push(first);
    let stacked = LoadOrder::new(overlays).unwrap();

    let second = run_patch(&stacked, &config).unwrap();
    assert!(second.spells.is_empty());
}

#[test]
fn test_invalid_output_name() {
    let load_order = LoadOrderBuilder::new().build();
    let config = PatchConfig {
        output_name: "NoExtension".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        run_patch(&load_order, &config),
        Err(PatchError::OutputName(_))
    ));
}

/// Store whose reads always fail.
struct FailingStore;

impl OverlayStore for FailingStore {
    fn winning_overrides<R: MajorRecord>(&self) -> Result<Vec<&R>, StoreError> {
        Err(StoreError::Read("disk went away".to_string()))
    }

    fn supplying_overlay(&self, _: &FormKey) -> Result<Option<&ModKey>, StoreError> {
        Err(StoreError::Read("disk went away".to_string()))
    }

    fn prerequisites(&self, _: &ModKey) -> Result<Option<&[ModKey]>, StoreError> {
        Err(StoreError::Read("disk went away".to_string()))
    }

    fn resolve_overlay(&self, _: &str) -> Option<ModKey> {
        None
    }

    fn load_index(&self, _: &ModKey) -> Option<usize> {
        None
    }
}

#[test]
fn test_store_failure_is_fatal() {
    let err = run_patch(&FailingStore, &PatchConfig::default()).unwrap_err();
    assert!(matches!(err, PatchError::Store(StoreError::Read(_))));
}
