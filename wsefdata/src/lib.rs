//! Record model and load order handling for the weapon speed effects fix.
//!
//! Overlays are stored as JSON files; [`files`] loads them into a
//! [`LoadOrder`], which resolves winning overrides across the stack.

pub mod error;
pub mod files;
pub mod keys;
pub mod load_order;
pub mod overlay;
pub mod records;

pub use error::LoadError;
pub use keys::{FormKey, KeyError, ModKey, ModType};
pub use load_order::LoadOrder;
pub use overlay::Overlay;
pub use records::{
    ActorValue, Archetype, ArchetypeType, Effect, EffectData, HasEffects, MagicEffect,
    MajorRecord, ObjectEffect, RecordKind, ScriptEntry, ScriptFlags, Scroll, Spell, SpellType,
    VirtualMachineAdapter,
};
