//! Conflict guard.
//!
//! A record defined by an overlay that masters the compatibility overlay or
//! the framework overlay was authored against them and already accounts for
//! the multiplier. Correcting it again would double-correct.

use crate::context::PatchContext;
use crate::store::{masters_of_origin, OverlayStore, StoreError};
use wsefdata::MajorRecord;

/// Why a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardReason {
    /// Defining overlay masters the compatibility or framework overlay.
    HandledUpstream,
    /// Defining overlay is not installed.
    UnresolvedOrigin,
}

/// Decides whether a candidate must be left untouched.
pub fn guard_reason<S: OverlayStore, R: MajorRecord>(
    store: &S,
    ctx: &PatchContext,
    record: &R,
) -> Result<Option<GuardReason>, StoreError> {
    match masters_of_origin(store, record.form_key())? {
        None => Ok(Some(GuardReason::UnresolvedOrigin)),
        Some(masters) if ctx.masters_include_handler(masters) => {
            Ok(Some(GuardReason::HandledUpstream))
        }
        Some(_) => Ok(None),
    }
}

/// Keeps the candidates that pass the guard, preserving order.
pub fn filter_guarded<'r, S: OverlayStore, R: MajorRecord>(
    store: &S,
    ctx: &PatchContext,
    candidates: Vec<&'r R>,
) -> Result<Vec<&'r R>, StoreError> {
    let mut kept = Vec::with_capacity(candidates.len());
    for record in candidates {
        match guard_reason(store, ctx, record)? {
            None => kept.push(record),
            Some(reason) => {
                log::debug!("{} {}: skipped ({:?})", R::KIND, record.form_key(), reason);
            }
        }
    }
    Ok(kept)
}
