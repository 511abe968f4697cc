use std::collections::BTreeSet;

use rotator_logging::rotator_warn;

use crate::{QueueState, UsedSlot};

/// Moves every opened site to the back of the queue, in run order.
///
/// Each `queue_index` refers to the queue as it was during selection. Earlier
/// removals shift later entries left, so every removal position is reduced by
/// the number of already-processed indices below it.
pub fn rotate(mut state: QueueState, used: &[UsedSlot]) -> QueueState {
    let mut processed = BTreeSet::new();

    for slot in used {
        let adjustment = processed.range(..slot.queue_index).count();
        let position = slot.queue_index - adjustment;

        if state.get(position) == Some(slot.id) {
            state.remove(position);
        } else if let Some(actual) = state.position(slot.id) {
            rotator_warn!(
                "Queue entry {} expected at {} but found at {}",
                slot.id,
                position,
                actual
            );
            state.remove(actual);
        }
        processed.insert(slot.queue_index);
        state.push(slot.id);
    }

    state
}
