//! Read interface the patch passes need from the layered record store.
//!
//! [`LoadOrder`] is the in-memory implementation. Other backends only have to
//! answer these lookups; any failure they report aborts the run.

use thiserror::Error;
use wsefdata::{FormKey, LoadOrder, MajorRecord, ModKey};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record store read failed: {0}")]
    Read(String),
    #[error("Record store is inconsistent: {0}")]
    Corrupted(String),
}

pub trait OverlayStore {
    /// Highest-priority version of every record of kind `R`.
    fn winning_overrides<R: MajorRecord>(&self) -> Result<Vec<&R>, StoreError>;

    /// Overlay that defines the record, if it is installed.
    fn supplying_overlay(&self, form_key: &FormKey) -> Result<Option<&ModKey>, StoreError>;

    /// Declared masters of an installed overlay.
    fn prerequisites(&self, overlay: &ModKey) -> Result<Option<&[ModKey]>, StoreError>;

    /// Identity of an installed overlay by file name.
    fn resolve_overlay(&self, name: &str) -> Option<ModKey>;

    /// Position of an installed overlay in the load order.
    fn load_index(&self, overlay: &ModKey) -> Option<usize>;
}

/// Masters of the overlay that defines `form_key`.
///
/// `None` when the defining overlay is not installed.
pub fn masters_of_origin<'s, S: OverlayStore>(
    store: &'s S,
    form_key: &FormKey,
) -> Result<Option<&'s [ModKey]>, StoreError> {
    match store.supplying_overlay(form_key)? {
        Some(origin) => store.prerequisites(origin),
        None => Ok(None),
    }
}

impl OverlayStore for LoadOrder {
    fn winning_overrides<R: MajorRecord>(&self) -> Result<Vec<&R>, StoreError> {
        Ok(LoadOrder::winning_overrides(self))
    }

    fn supplying_overlay(&self, form_key: &FormKey) -> Result<Option<&ModKey>, StoreError> {
        Ok(self.origin_of(form_key).map(|overlay| &overlay.mod_key))
    }

    fn prerequisites(&self, overlay: &ModKey) -> Result<Option<&[ModKey]>, StoreError> {
        Ok(self.get(overlay).map(|overlay| overlay.masters.as_slice()))
    }

    fn resolve_overlay(&self, name: &str) -> Option<ModKey> {
        let key = ModKey::from_file_name(name).ok()?;
        self.get(&key).map(|overlay| overlay.mod_key.clone())
    }

    fn load_index(&self, overlay: &ModKey) -> Option<usize> {
        self.index_of(overlay)
    }
}
