use log::{debug, warn};
use std::collections::HashSet;

use super::{Placement, Timetable};
use crate::data::{PreAssignedSlot, Slot};
use crate::roster::Roster;

/// Stamps school-wide activities into every class before the greedy pass.
///
/// Teachers are handed out round-robin by class position, so with teachers
/// `[a, b]` classes 0, 1, 2 get `a, b, a`. Returns the subjects locked for
/// each class; the task factory skips them.
pub(crate) fn lock_pre_assigned(
    roster: &Roster,
    entries: &[PreAssignedSlot],
    timetable: &mut Timetable,
) -> Vec<HashSet<usize>> {
    let mut locked = vec![HashSet::new(); roster.classes.len()];

    for entry in entries {
        let Some(subject) = roster.subject(&entry.subject_id) else {
            warn!(
                "Pre-assigned subject '{}' is not in the catalog; skipping it.",
                entry.subject_id
            );
            continue;
        };
        let slot = Slot::new(entry.day, entry.period);
        if entry.day >= roster.days() || entry.period >= roster.periods() {
            warn!(
                "Pre-assigned '{}' at {slot} is outside the week; skipping it.",
                entry.subject_id
            );
            continue;
        }
        debug!(
            "Locking '{}' at {slot} (domain {:?}, visibility {:?})",
            entry.subject_id, entry.domain, entry.visibility
        );

        for class in 0..roster.classes.len() {
            if !timetable.classes[class].is_free(slot) {
                warn!(
                    "{} already has a locked activity at {slot}; '{}' is skipped for it.",
                    roster.classes[class].key, entry.subject_id
                );
                continue;
            }
            let eligible = roster.eligible_teachers(class, subject);
            let teacher = (!eligible.is_empty()).then(|| eligible[class % eligible.len()]);
            if teacher.is_none() {
                warn!(
                    "No teacher can lead '{}' for {}; locking it without one.",
                    entry.subject_id, roster.classes[class].key
                );
            }
            timetable.lock(
                roster,
                slot,
                Placement {
                    class,
                    subject,
                    teacher,
                    is_filler: subject == roster.filler,
                    is_pre_assigned: true,
                },
            );
            locked[class].insert(subject);
        }
    }
    locked
}
