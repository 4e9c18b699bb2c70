use wsefdata::{
    ActorValue, Archetype, Effect, EffectData, LoadError, LoadOrder, MagicEffect, ModKey,
    ObjectEffect, Overlay, Scroll, Spell, VirtualMachineAdapter,
};

/// Fluent fixture builder for load orders.
///
/// Record helpers add to the most recently declared overlay.
pub struct LoadOrderBuilder {
    overlays: Vec<Overlay>,
}

impl LoadOrderBuilder {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
        }
    }

    pub fn overlay(mut self, name: &str, masters: &[&str]) -> Self {
        let mut overlay = Overlay::new(mod_key(name));
        overlay.masters = masters.iter().map(|m| mod_key(m)).collect();
        self.overlays.push(overlay);
        self
    }

    pub fn magic_effect(self, form_key: &str, primary: ActorValue, secondary: ActorValue) -> Self {
        self.with_magic_effect(magic_effect(form_key, primary, secondary))
    }

    pub fn with_magic_effect(mut self, effect: MagicEffect) -> Self {
        self.current().magic_effects.push(effect);
        self
    }

    /// Adds a spell whose effects are `(base effect, magnitude)` pairs.
    pub fn spell(mut self, form_key: &str, effects: &[(&str, f32)]) -> Self {
        self.current().spells.push(spell(form_key, effects));
        self
    }

    pub fn with_spell(mut self, spell: Spell) -> Self {
        self.current().spells.push(spell);
        self
    }

    pub fn scroll(mut self, form_key: &str, effects: &[(&str, f32)]) -> Self {
        self.current().scrolls.push(Scroll {
            form_key: form_key.parse().expect("fixture form key"),
            editor_id: None,
            name: None,
            keywords: Vec::new(),
            menu_display_object: None,
            equipment_type: None,
            effects: effect_list(effects),
        });
        self
    }

    pub fn object_effect(mut self, form_key: &str, effects: &[(&str, f32)]) -> Self {
        self.current().object_effects.push(ObjectEffect {
            form_key: form_key.parse().expect("fixture form key"),
            editor_id: None,
            name: None,
            base_enchantment: None,
            worn_restrictions: None,
            effects: effect_list(effects),
        });
        self
    }

    pub fn try_build(self) -> Result<LoadOrder, LoadError> {
        LoadOrder::new(self.overlays)
    }

    pub fn build(self) -> LoadOrder {
        self.try_build().expect("fixture load order must be valid")
    }

    fn current(&mut self) -> &mut Overlay {
        self.overlays
            .last_mut()
            .expect("declare an overlay before adding records")
    }
}

impl Default for LoadOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mod_key(name: &str) -> ModKey {
    name.parse().expect("fixture overlay name")
}

pub fn magic_effect(form_key: &str, primary: ActorValue, secondary: ActorValue) -> MagicEffect {
    MagicEffect {
        form_key: form_key.parse().expect("fixture form key"),
        editor_id: None,
        archetype: Archetype {
            archetype_type: Default::default(),
            actor_value: primary,
        },
        second_actor_value: secondary,
        keywords: Vec::new(),
        virtual_machine_adapter: None,
    }
}

/// Magic effect that already carries the given scripts.
pub fn scripted_magic_effect(form_key: &str, primary: ActorValue, scripts: &[&str]) -> MagicEffect {
    let mut effect = magic_effect(form_key, primary, ActorValue::None);
    effect.virtual_machine_adapter = Some(VirtualMachineAdapter {
        scripts: scripts
            .iter()
            .map(|name| wsefdata::ScriptEntry::new(*name))
            .collect(),
        ..Default::default()
    });
    effect
}

pub fn spell(form_key: &str, effects: &[(&str, f32)]) -> Spell {
    Spell {
        form_key: form_key.parse().expect("fixture form key"),
        editor_id: None,
        name: None,
        spell_type: Default::default(),
        keywords: Vec::new(),
        equipment_type: None,
        half_cost_perk: None,
        effects: effect_list(effects),
    }
}

pub fn effect(base: &str, magnitude: f32) -> Effect {
    Effect {
        base_effect: Some(base.parse().expect("fixture form key")),
        data: Some(EffectData {
            magnitude,
            area: 0,
            duration: 0,
        }),
    }
}

fn effect_list(effects: &[(&str, f32)]) -> Vec<Effect> {
    effects
        .iter()
        .map(|(base, magnitude)| effect(base, *magnitude))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let load_order = LoadOrderBuilder::default()
            .overlay("Skyrim.esm", &[])
            .magic_effect("000800:Skyrim.esm", ActorValue::WeaponSpeedMult, ActorValue::None)
            .overlay("A.esp", &["Skyrim.esm"])
            .spell("000900:A.esp", &[("000800:Skyrim.esm", 2.0)])
            .build();

        assert_eq!(load_order.len(), 2);
        assert_eq!(load_order.overlays()[0].magic_effects.len(), 1);
        assert_eq!(load_order.overlays()[1].spells.len(), 1);
    }

    #[test]
    fn test_try_build_reports_missing_master() {
        let result = LoadOrderBuilder::new()
            .overlay("A.esp", &["Skyrim.esm"])
            .try_build();
        assert!(result.is_err());
    }
}
