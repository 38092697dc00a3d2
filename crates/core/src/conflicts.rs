// Copyright (C) 2026 Shala Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store-backed conflict checking for a proposed slot.
//!
//! Fetches the context rows the pure analyzer needs, then delegates. Runs
//! twice per adhoc creation: as advisory form feedback while the operator
//! edits, and as the final gate before the insert. The advisory
//! future-weekly lookup fails open (a broken lookup should not spuriously
//! warn); the same-day overlap scan fails closed, since blocking depends on
//! the fetched rows.

use crate::error::CoreError;
use shala_domain::{
    Conflict, ProposedSlot, Resolution, analyze_slot, future_weekly_conflict, resolve,
};
use shala_store::StoreClient;
use tracing::warn;
use uuid::Uuid;

/// Collects all conflicts for a proposed slot.
///
/// # Errors
///
/// Returns an error when the same-day assignment or template lookups fail;
/// without those rows the blocking overlap scan cannot run.
pub async fn check_slot<S: StoreClient>(
    store: &S,
    proposed: &ProposedSlot,
    class_type_id: Option<Uuid>,
) -> Result<Vec<Conflict>, CoreError> {
    let mut conflicts = Vec::new();

    // Advisory: future weekly-type rows at the exact start time.
    match store
        .future_weekly_assignments(
            proposed.instructor_id,
            class_type_id,
            proposed.start,
            proposed.date,
        )
        .await
    {
        Ok(rows) => {
            if let Some(conflict) = future_weekly_conflict(&rows) {
                conflicts.push(conflict);
            }
        }
        Err(err) => {
            warn!(error = %err, "future weekly lookup failed; skipping advisory check");
        }
    }

    let existing = store
        .assignments_on(proposed.instructor_id, proposed.date)
        .await?;
    let templates = store
        .active_weekly_schedules(proposed.instructor_id)
        .await?;

    conflicts.extend(analyze_slot(proposed, &existing, &templates));
    Ok(conflicts)
}

/// Weighs all conflicts for a proposed slot into a single resolution.
///
/// # Errors
///
/// Returns an error when the blocking scan's context rows cannot be
/// fetched.
pub async fn gate<S: StoreClient>(
    store: &S,
    proposed: &ProposedSlot,
    class_type_id: Option<Uuid>,
) -> Result<Resolution, CoreError> {
    let conflicts = check_slot(store, proposed, class_type_id).await?;
    Ok(resolve(conflicts))
}
