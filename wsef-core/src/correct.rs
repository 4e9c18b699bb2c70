//! Magnitude correction.
//!
//! In-scope effect instances with a magnitude in `[1.0, 10.0]` encode
//! "add this to the base multiplier" with the base already counted once, so
//! the stored value is reduced by 1.0. Everything outside that window is left
//! as authored.

use crate::scope::InScopeEffects;
use wsefdata::{HasEffects, MajorRecord, Overlay};

/// Tolerance for every magnitude comparison.
pub const FLOAT_EPSILON: f32 = 0.000001;

/// Magnitudes above this are unrelated large effects and never corrected.
pub const MAGNITUDE_CEILING: f32 = 10.0;

/// Corrected value for `magnitude`, or `None` if it must stay unchanged.
pub fn corrected_magnitude(magnitude: f32, ignore_unit_magnitude: bool) -> Option<f32> {
    if !magnitude.is_finite() {
        return None;
    }
    let delta = magnitude - 1.0;
    if delta < -FLOAT_EPSILON || magnitude > MAGNITUDE_CEILING {
        return None;
    }
    if delta.abs() < FLOAT_EPSILON && ignore_unit_magnitude {
        return None;
    }
    Some(delta)
}

/// Indices and new magnitudes of the effects in `record` that need a change.
pub fn planned_corrections<R: HasEffects>(
    record: &R,
    in_scope: &InScopeEffects,
    ignore_unit_magnitude: bool,
) -> Vec<(usize, f32)> {
    record
        .effects()
        .iter()
        .enumerate()
        .filter_map(|(index, effect)| {
            let base = effect.base_effect.as_ref()?;
            if !in_scope.contains(base) {
                return None;
            }
            let data = effect.data.as_ref()?;
            corrected_magnitude(data.magnitude, ignore_unit_magnitude).map(|value| (index, value))
        })
        .collect()
}

/// Writes the corrections for one record into `patch`.
///
/// The record is copied into `patch` only when at least one effect changes,
/// and at most once. Returns the number of effects corrected.
pub fn correct_record<R: MajorRecord + HasEffects>(
    record: &R,
    in_scope: &InScopeEffects,
    ignore_unit_magnitude: bool,
    patch: &mut Overlay,
) -> usize {
    let plan = planned_corrections(record, in_scope, ignore_unit_magnitude);
    if plan.is_empty() {
        return 0;
    }

    let copy = patch.get_or_add_override(record);
    let mut corrected = 0;
    for (index, value) in plan {
        let Some(data) = copy
            .effects_mut()
            .get_mut(index)
            .and_then(|effect| effect.data.as_mut())
        else {
            continue;
        };
        log::debug!(
            "{} {} effect #{}: magnitude {} -> {}",
            R::KIND,
            record.form_key(),
            index,
            data.magnitude,
            value
        );
        data.magnitude = value;
        corrected += 1;
    }
    corrected
}
