//! A single overlay (plugin) and its record groups.

use crate::keys::{FormKey, ModKey};
use crate::records::{MagicEffect, MajorRecord, ObjectEffect, Scroll, Spell};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One authored unit in the load order.
///
/// Groups keep records in file order. Records whose [`FormKey`] belongs to
/// another overlay are overrides of that overlay's records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    #[serde(rename = "name")]
    pub mod_key: ModKey,
    #[serde(default)]
    pub masters: Vec<ModKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub magic_effects: Vec<MagicEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spells: Vec<Spell>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scrolls: Vec<Scroll>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_effects: Vec<ObjectEffect>,
}

impl Overlay {
    pub fn new(mod_key: ModKey) -> Self {
        Self {
            mod_key,
            masters: Vec::new(),
            magic_effects: Vec::new(),
            spells: Vec::new(),
            scrolls: Vec::new(),
            object_effects: Vec::new(),
        }
    }

    pub fn has_master(&self, master: &ModKey) -> bool {
        self.masters.contains(master)
    }

    /// Looks up a record of kind `R` by key.
    pub fn get<R: MajorRecord>(&self, form_key: &FormKey) -> Option<&R> {
        R::group(self)
            .iter()
            .find(|record| record.form_key() == form_key)
    }

    /// Returns this overlay's copy of `record`, copying it in on first use.
    ///
    /// Later calls for the same key return the existing copy untouched, so a
    /// record is overridden at most once no matter how many edits target it.
    pub fn get_or_add_override<R: MajorRecord>(&mut self, record: &R) -> &mut R {
        let group = R::group_mut(self);
        let index = match group
            .iter()
            .position(|existing| existing.form_key() == record.form_key())
        {
            Some(index) => index,
            None => {
                group.push(record.clone());
                group.len() - 1
            }
        };
        &mut group[index]
    }

    /// Total records across all groups.
    pub fn record_count(&self) -> usize {
        self.magic_effects.len() + self.spells.len() + self.scrolls.len() + self.object_effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Overlays referenced by this overlay's records, excluding itself.
    ///
    /// Includes the origin of every record and of every link the records carry.
    pub fn referenced_overlays(&self) -> HashSet<&ModKey> {
        let mut referenced = HashSet::new();
        collect_references(&self.magic_effects, &mut referenced);
        collect_references(&self.spells, &mut referenced);
        collect_references(&self.scrolls, &mut referenced);
        collect_references(&self.object_effects, &mut referenced);
        referenced.remove(&self.mod_key);
        referenced
    }
}

fn collect_references<'a, R: MajorRecord>(records: &'a [R], out: &mut HashSet<&'a ModKey>) {
    for record in records {
        out.insert(&record.form_key().mod_key);
        for link in record.form_links() {
            out.insert(&link.mod_key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Effect, EffectData};

    fn key(s: &str) -> ModKey {
        s.parse().unwrap()
    }

    fn spell(form_key: &str, base: &str, magnitude: f32) -> Spell {
        Spell {
            form_key: form_key.parse().unwrap(),
            editor_id: None,
            name: None,
            spell_type: Default::default(),
            keywords: Vec::new(),
            equipment_type: None,
            half_cost_perk: None,
            effects: vec![Effect {
                base_effect: Some(base.parse().unwrap()),
                data: Some(EffectData {
                    magnitude,
                    ..Default::default()
                }),
            }],
        }
    }

    #[test]
    fn test_get_or_add_override_is_idempotent() {
        let mut patch = Overlay::new(key("Patch.esp"));
        let original = spell("000900:B.esp", "000800:A.esp", 2.0);

        let copy = patch.get_or_add_override(&original);
        copy.effects[0].data.as_mut().unwrap().magnitude = 1.0;

        // Second request returns the edited copy, not a fresh one
        let again = patch.get_or_add_override(&original);
        assert_eq!(again.effects[0].data.unwrap().magnitude, 1.0);
        assert_eq!(patch.spells.len(), 1);
        assert_eq!(patch.record_count(), 1);
    }

    #[test]
    fn test_get_by_form_key() {
        let mut overlay = Overlay::new(key("B.esp"));
        overlay.spells.push(spell("000900:B.esp", "000800:A.esp", 2.0));

        let form_key: FormKey = "000900:B.esp".parse().unwrap();
        assert!(overlay.get::<Spell>(&form_key).is_some());
        assert!(overlay.get::<Scroll>(&form_key).is_none());
    }

    #[test]
    fn test_referenced_overlays_excludes_self() {
        let mut patch = Overlay::new(key("Patch.esp"));
        patch.spells.push(spell("000900:B.esp", "000800:A.esp", 2.0));

        let referenced = patch.referenced_overlays();
        assert_eq!(referenced.len(), 2);
        assert!(referenced.contains(&key("A.esp")));
        assert!(referenced.contains(&key("B.esp")));
        assert!(!referenced.contains(&key("Patch.esp")));
    }

    #[test]
    fn test_overlay_json_shape() {
        let json = r#"{
            "name": "A.esp",
            "masters": ["Skyrim.esm"],
            "magic_effects": [
                { "form_key": "000800:A.esp", "archetype": { "actor_value": "WeaponSpeedMult" } }
            ]
        }"#;
        let overlay: Overlay = serde_json::from_str(json).unwrap();
        assert_eq!(overlay.mod_key, key("A.esp"));
        assert!(overlay.has_master(&key("Skyrim.esm")));
        assert_eq!(overlay.magic_effects.len(), 1);
        assert!(overlay.spells.is_empty());
    }
}
