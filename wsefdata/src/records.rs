//! Record definitions for the record kinds the patch touches.
//!
//! Only the fields needed to classify and correct weapon speed effects are
//! modelled. Every record carries its [`FormKey`]; cross-references to other
//! records are stored as `FormKey` links and exposed through
//! [`MajorRecord::form_links`].

use crate::keys::FormKey;
use crate::overlay::Overlay;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a major record, used for logging and grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    MagicEffect,
    Spell,
    Scroll,
    ObjectEffect,
}

impl RecordKind {
    /// Four-letter record signature.
    pub fn signature(self) -> &'static str {
        match self {
            RecordKind::MagicEffect => "MGEF",
            RecordKind::Spell => "SPEL",
            RecordKind::Scroll => "SCRL",
            RecordKind::ObjectEffect => "ENCH",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// Common surface of every record stored in an overlay group.
pub trait MajorRecord: Clone + fmt::Debug {
    const KIND: RecordKind;

    fn form_key(&self) -> &FormKey;

    fn editor_id(&self) -> Option<&str>;

    /// Every record this one links to, in field order.
    fn form_links(&self) -> Vec<&FormKey>;

    /// The group of this kind inside an overlay.
    fn group(overlay: &Overlay) -> &[Self];

    fn group_mut(overlay: &mut Overlay) -> &mut Vec<Self>;
}

/// Records that embed an ordered list of effect instances.
pub trait HasEffects {
    fn effects(&self) -> &[Effect];

    fn effects_mut(&mut self) -> &mut Vec<Effect>;
}

/// Game statistic an effect manipulates.
///
/// Names that are not listed here are kept verbatim in [`ActorValue::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActorValue {
    #[default]
    None,
    Health,
    Magicka,
    Stamina,
    HealRate,
    MagickaRate,
    StaminaRate,
    SpeedMult,
    CarryWeight,
    DamageResist,
    CriticalChance,
    MeleeDamage,
    UnarmedDamage,
    OneHanded,
    TwoHanded,
    Archery,
    Block,
    Sneak,
    Invisibility,
    Paralysis,
    WeaponSpeedMult,
    LeftWeaponSpeedMultiply,
    AttackDamageMult,
    Other(String),
}

impl ActorValue {
    pub fn as_str(&self) -> &str {
        match self {
            ActorValue::None => "None",
            ActorValue::Health => "Health",
            ActorValue::Magicka => "Magicka",
            ActorValue::Stamina => "Stamina",
            ActorValue::HealRate => "HealRate",
            ActorValue::MagickaRate => "MagickaRate",
            ActorValue::StaminaRate => "StaminaRate",
            ActorValue::SpeedMult => "SpeedMult",
            ActorValue::CarryWeight => "CarryWeight",
            ActorValue::DamageResist => "DamageResist",
            ActorValue::CriticalChance => "CriticalChance",
            ActorValue::MeleeDamage => "MeleeDamage",
            ActorValue::UnarmedDamage => "UnarmedDamage",
            ActorValue::OneHanded => "OneHanded",
            ActorValue::TwoHanded => "TwoHanded",
            ActorValue::Archery => "Archery",
            ActorValue::Block => "Block",
            ActorValue::Sneak => "Sneak",
            ActorValue::Invisibility => "Invisibility",
            ActorValue::Paralysis => "Paralysis",
            ActorValue::WeaponSpeedMult => "WeaponSpeedMult",
            ActorValue::LeftWeaponSpeedMultiply => "LeftWeaponSpeedMultiply",
            ActorValue::AttackDamageMult => "AttackDamageMult",
            ActorValue::Other(name) => name,
        }
    }
}

impl From<String> for ActorValue {
    fn from(name: String) -> Self {
        match name.as_str() {
            "None" => ActorValue::None,
            "Health" => ActorValue::Health,
            "Magicka" => ActorValue::Magicka,
            "Stamina" => ActorValue::Stamina,
            "HealRate" => ActorValue::HealRate,
            "MagickaRate" => ActorValue::MagickaRate,
            "StaminaRate" => ActorValue::StaminaRate,
            "SpeedMult" => ActorValue::SpeedMult,
            "CarryWeight" => ActorValue::CarryWeight,
            "DamageResist" => ActorValue::DamageResist,
            "CriticalChance" => ActorValue::CriticalChance,
            "MeleeDamage" => ActorValue::MeleeDamage,
            "UnarmedDamage" => ActorValue::UnarmedDamage,
            "OneHanded" => ActorValue::OneHanded,
            "TwoHanded" => ActorValue::TwoHanded,
            "Archery" => ActorValue::Archery,
            "Block" => ActorValue::Block,
            "Sneak" => ActorValue::Sneak,
            "Invisibility" => ActorValue::Invisibility,
            "Paralysis" => ActorValue::Paralysis,
            "WeaponSpeedMult" => ActorValue::WeaponSpeedMult,
            "LeftWeaponSpeedMultiply" => ActorValue::LeftWeaponSpeedMultiply,
            "AttackDamageMult" => ActorValue::AttackDamageMult,
            _ => ActorValue::Other(name),
        }
    }
}

impl From<ActorValue> for String {
    fn from(value: ActorValue) -> Self {
        match value {
            ActorValue::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour of a magic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArchetypeType {
    #[default]
    ValueModifier,
    Script,
    Dispel,
    CureDisease,
    Absorb,
    DualValueModifier,
    Calm,
    Demoralize,
    Frenzy,
    Disarm,
    CommandSummoned,
    Invisibility,
    Light,
    Darkness,
    NightEye,
    Lock,
    Open,
    BoundWeapon,
    SummonCreature,
    DetectLife,
    Telekinesis,
    Paralysis,
    Reanimate,
    SoulTrap,
    TurnUndead,
    Guide,
    WerewolfFeed,
    CureParalysis,
    CureAddiction,
    CurePoison,
    Concussion,
    ValueAndParts,
    AccumulateMagnitude,
    Stagger,
    PeakValueModifier,
    Cloak,
    Werewolf,
    SlowTime,
    Rally,
    EnhanceWeapon,
    SpawnHazard,
    Etherealize,
    Banish,
    SpawnScriptedRef,
    Disguise,
    GrabActor,
    VampireLord,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Archetype {
    #[serde(rename = "type", default)]
    pub archetype_type: ArchetypeType,
    #[serde(default)]
    pub actor_value: ActorValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScriptFlags {
    #[default]
    Local,
    Inherited,
    Removed,
    InheritedAndRemoved,
}

/// One script attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub name: String,
    #[serde(default)]
    pub flags: ScriptFlags,
}

impl ScriptEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flags: ScriptFlags::Local,
        }
    }
}

/// Script container of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualMachineAdapter {
    #[serde(default = "VirtualMachineAdapter::default_version")]
    pub version: i16,
    #[serde(default = "VirtualMachineAdapter::default_object_format")]
    pub object_format: u16,
    #[serde(default)]
    pub scripts: Vec<ScriptEntry>,
}

impl VirtualMachineAdapter {
    fn default_version() -> i16 {
        5
    }

    fn default_object_format() -> u16 {
        2
    }

    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.iter().any(|script| script.name == name)
    }
}

impl Default for VirtualMachineAdapter {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            object_format: Self::default_object_format(),
            scripts: Vec::new(),
        }
    }
}

/// Effect definition (MGEF).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicEffect {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default)]
    pub archetype: Archetype,
    #[serde(default)]
    pub second_actor_value: ActorValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<FormKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_machine_adapter: Option<VirtualMachineAdapter>,
}

impl MagicEffect {
    /// Primary and secondary actor values.
    pub fn actor_values(&self) -> [&ActorValue; 2] {
        [&self.archetype.actor_value, &self.second_actor_value]
    }
}

/// Magnitude, area and duration of one effect instance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectData {
    pub magnitude: f32,
    #[serde(default)]
    pub area: u32,
    #[serde(default)]
    pub duration: u32,
}

/// One effect instance embedded in a spell, scroll or enchantment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Effect {
    #[serde(default)]
    pub base_effect: Option<FormKey>,
    #[serde(default)]
    pub data: Option<EffectData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpellType {
    #[default]
    Spell,
    Disease,
    Power,
    LesserPower,
    Ability,
    Poison,
    Addiction,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub spell_type: SpellType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<FormKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<FormKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_cost_perk: Option<FormKey>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<FormKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_display_object: Option<FormKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<FormKey>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

/// Enchantment (ENCH).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEffect {
    pub form_key: FormKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_enchantment: Option<FormKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worn_restrictions: Option<FormKey>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

fn effect_links(effects: &[Effect]) -> impl Iterator<Item = &FormKey> {
    effects.iter().filter_map(|effect| effect.base_effect.as_ref())
}

impl MajorRecord for MagicEffect {
    const KIND: RecordKind = RecordKind::MagicEffect;

    fn form_key(&self) -> &FormKey {
        &self.form_key
    }

    fn editor_id(&self) -> Option<&str> {
        self.editor_id.as_deref()
    }

    fn form_links(&self) -> Vec<&FormKey> {
        self.keywords.iter().collect()
    }

    fn group(overlay: &Overlay) -> &[Self] {
        &overlay.magic_effects
    }

    fn group_mut(overlay: &mut Overlay) -> &mut Vec<Self> {
        &mut overlay.magic_effects
    }
}

impl MajorRecord for Spell {
    const KIND: RecordKind = RecordKind::Spell;

    fn form_key(&self) -> &FormKey {
        &self.form_key
    }

    fn editor_id(&self) -> Option<&str> {
        self.editor_id.as_deref()
    }

    fn form_links(&self) -> Vec<&FormKey> {
        self.keywords
            .iter()
            .chain(self.equipment_type.as_ref())
            .chain(self.half_cost_perk.as_ref())
            .chain(effect_links(&self.effects))
            .collect()
    }

    fn group(overlay: &Overlay) -> &[Self] {
        &overlay.spells
    }

    fn group_mut(overlay: &mut Overlay) -> &mut Vec<Self> {
        &mut overlay.spells
    }
}

impl MajorRecord for Scroll {
    const KIND: RecordKind = RecordKind::Scroll;

    fn form_key(&self) -> &FormKey {
        &self.form_key
    }

    fn editor_id(&self) -> Option<&str> {
        self.editor_id.as_deref()
    }

    fn form_links(&self) -> Vec<&FormKey> {
        self.keywords
            .iter()
            .chain(self.menu_display_object.as_ref())
            .chain(self.equipment_type.as_ref())
            .chain(effect_links(&self.effects))
            .collect()
    }

    fn group(overlay: &Overlay) -> &[Self] {
        &overlay.scrolls
    }

    fn group_mut(overlay: &mut Overlay) -> &mut Vec<Self> {
        &mut overlay.scrolls
    }
}

impl MajorRecord for ObjectEffect {
    const KIND: RecordKind = RecordKind::ObjectEffect;

    fn form_key(&self) -> &FormKey {
        &self.form_key
    }

    fn editor_id(&self) -> Option<&str> {
        self.editor_id.as_deref()
    }

    fn form_links(&self) -> Vec<&FormKey> {
        self.base_enchantment
            .iter()
            .chain(self.worn_restrictions.as_ref())
            .chain(effect_links(&self.effects))
            .collect()
    }

    fn group(overlay: &Overlay) -> &[Self] {
        &overlay.object_effects
    }

    fn group_mut(overlay: &mut Overlay) -> &mut Vec<Self> {
        &mut overlay.object_effects
    }
}

impl HasEffects for Spell {
    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut Vec<Effect> {
        &mut self.effects
    }
}

impl HasEffects for Scroll {
    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut Vec<Effect> {
        &mut self.effects
    }
}

impl HasEffects for ObjectEffect {
    fn effects(&self) -> &[Effect] {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut Vec<Effect> {
        &mut self.effects
    }
}
