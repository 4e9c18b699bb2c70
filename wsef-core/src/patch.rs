//! Patch entry point.
//!
//! ```text
//! classify MGEF ──▶ in-scope set ──┬──▶ attach reset scripts (MGEF)
//!                                  │
//!                                  └──▶ for SPEL, SCRL, ENCH:
//!                                         scan ──▶ guard ──▶ correct
//! ```
//!
//! Every write lands in one output overlay, which the caller persists.

use crate::config::PatchConfig;
use crate::context::PatchContext;
use crate::correct::correct_record;
use crate::error::PatchError;
use crate::guard::filter_guarded;
use crate::scan::scan_candidates;
use crate::scope::{classify_effects, InScopeEffects};
use crate::script::attach_reset_scripts;
use crate::store::{OverlayStore, StoreError};
use wsefdata::{HasEffects, MajorRecord, ModKey, ObjectEffect, Overlay, RecordKind, Scroll, Spell};

/// Per-kind counts for one referencing record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSummary {
    pub kind: RecordKind,
    /// Records that link to an in-scope effect.
    pub candidates: usize,
    /// Candidates dropped by the conflict guard.
    pub guarded: usize,
    /// Records copied into the output overlay.
    pub overridden: usize,
    /// Effect instances whose magnitude changed.
    pub corrected: usize,
}

/// Counts gathered over one run, reported through the log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatchSummary {
    pub in_scope_effects: usize,
    pub scripts_attached: usize,
    pub kinds: Vec<KindSummary>,
}

impl PatchSummary {
    pub fn corrected(&self) -> usize {
        self.kinds.iter().map(|k| k.corrected).sum()
    }

    fn log(&self) {
        log::info!(
            "{} in-scope effects, {} scripts attached",
            self.in_scope_effects,
            self.scripts_attached
        );
        for kind in &self.kinds {
            log::info!(
                "{}: {} candidates, {} guarded, {} overridden, {} effects corrected",
                kind.kind,
                kind.candidates,
                kind.guarded,
                kind.overridden,
                kind.corrected
            );
        }
    }
}

/// Runs every pass against `store` and returns the populated output overlay.
pub fn run_patch<S: OverlayStore>(store: &S, config: &PatchConfig) -> Result<Overlay, PatchError> {
    let (patch, _) = run_patch_with_summary(store, config)?;
    Ok(patch)
}

/// Same as [`run_patch`], also returning the run's counts.
pub fn run_patch_with_summary<S: OverlayStore>(
    store: &S,
    config: &PatchConfig,
) -> Result<(Overlay, PatchSummary), PatchError> {
    let output_key = ModKey::from_file_name(&config.output_name)?;
    let ctx = PatchContext::resolve(store, config);
    let mut patch = Overlay::new(output_key);

    let in_scope = classify_effects(store)?;
    let scripts_attached = attach_reset_scripts(store, &ctx, &in_scope, &mut patch)?;

    let kinds = vec![
        patch_kind::<S, Spell>(store, &ctx, &in_scope, &mut patch)?,
        patch_kind::<S, Scroll>(store, &ctx, &in_scope, &mut patch)?,
        patch_kind::<S, ObjectEffect>(store, &ctx, &in_scope, &mut patch)?,
    ];

    patch.masters = required_masters(store, &patch);

    let summary = PatchSummary {
        in_scope_effects: in_scope.len(),
        scripts_attached,
        kinds,
    };
    summary.log();
    Ok((patch, summary))
}

fn patch_kind<S: OverlayStore, R: MajorRecord + HasEffects>(
    store: &S,
    ctx: &PatchContext,
    in_scope: &InScopeEffects,
    patch: &mut Overlay,
) -> Result<KindSummary, StoreError> {
    let candidates = scan_candidates::<S, R>(store, in_scope)?;
    let candidate_count = candidates.len();
    let survivors = filter_guarded(store, ctx, candidates)?;

    let before = R::group(patch).len();
    let corrected: usize = survivors
        .iter()
        .map(|record| correct_record(*record, in_scope, ctx.ignore_unit_magnitude, patch))
        .sum();

    Ok(KindSummary {
        kind: R::KIND,
        candidates: candidate_count,
        guarded: candidate_count - survivors.len(),
        overridden: R::group(patch).len() - before,
        corrected,
    })
}

/// Masters for the output overlay, in load order.
fn required_masters<S: OverlayStore>(store: &S, patch: &Overlay) -> Vec<ModKey> {
    let mut masters: Vec<(Option<usize>, ModKey)> = patch
        .referenced_overlays()
        .into_iter()
        .map(|key| (store.load_index(key), key.clone()))
        .collect();
    // Installed overlays by position; anything else after them, by name
    masters.sort_by(|(a_index, a_key), (b_index, b_key)| match (a_index, b_index) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a_key.file_name().cmp(&b_key.file_name()),
    });
    masters.into_iter().map(|(_, key)| key).collect()
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
