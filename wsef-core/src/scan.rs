//! Finds records that link to an in-scope effect.

use crate::scope::InScopeEffects;
use crate::store::{OverlayStore, StoreError};
use wsefdata::MajorRecord;

/// Winning records of kind `R` with at least one in-scope link.
pub fn scan_candidates<'s, S: OverlayStore, R: MajorRecord>(
    store: &'s S,
    in_scope: &InScopeEffects,
) -> Result<Vec<&'s R>, StoreError> {
    let candidates: Vec<&R> = store
        .winning_overrides::<R>()?
        .into_iter()
        .filter(|record| in_scope.references_any(record.form_links().into_iter()))
        .collect();

    log::debug!("{} {} records reference weapon speed effects", candidates.len(), R::KIND);
    Ok(candidates)
}
