//! Ordered set of overlays and override resolution.

use crate::error::LoadError;
use crate::keys::{FormKey, ModKey};
use crate::overlay::Overlay;
use crate::records::MajorRecord;
use std::collections::{HashMap, HashSet};

/// Overlays in load order: index 0 loads first, the last overlay wins.
#[derive(Debug, Clone, Default)]
pub struct LoadOrder {
    overlays: Vec<Overlay>,
    index: HashMap<ModKey, usize>,
}

impl LoadOrder {
    /// Builds a load order, checking that every overlay appears once and that
    /// each master loads before the overlays that depend on it.
    pub fn new(overlays: Vec<Overlay>) -> Result<Self, LoadError> {
        let mut index = HashMap::with_capacity(overlays.len());
        for (position, overlay) in overlays.iter().enumerate() {
            for master in &overlay.masters {
                if !index.contains_key(master) {
                    return Err(LoadError::MissingMaster {
                        overlay: overlay.mod_key.clone(),
                        master: master.clone(),
                    });
                }
            }
            if index.insert(overlay.mod_key.clone(), position).is_some() {
                return Err(LoadError::DuplicateOverlay(overlay.mod_key.clone()));
            }
        }
        Ok(Self { overlays, index })
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Overlays in load order (lowest priority first).
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Overlays from highest to lowest priority.
    pub fn priority_order(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().rev()
    }

    pub fn contains(&self, mod_key: &ModKey) -> bool {
        self.index.contains_key(mod_key)
    }

    pub fn index_of(&self, mod_key: &ModKey) -> Option<usize> {
        self.index.get(mod_key).copied()
    }

    pub fn get(&self, mod_key: &ModKey) -> Option<&Overlay> {
        self.index_of(mod_key).map(|i| &self.overlays[i])
    }

    /// Overlay that originally defined the record.
    pub fn origin_of(&self, form_key: &FormKey) -> Option<&Overlay> {
        self.get(&form_key.mod_key)
    }

    /// Highest-priority version of every record of kind `R`.
    ///
    /// Records are yielded in priority order: everything the last overlay
    /// touches first, then what only earlier overlays touch.
    pub fn winning_overrides<R: MajorRecord>(&self) -> Vec<&R> {
        let mut seen: HashSet<&FormKey> = HashSet::new();
        let mut winners = Vec::new();
        for overlay in self.priority_order() {
            for record in R::group(overlay) {
                if seen.insert(record.form_key()) {
                    winners.push(record);
                }
            }
        }
        winners
    }
}
