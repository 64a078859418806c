use itertools::iproduct;
use log::info;
use std::rc::Rc;

use super::validator::can_assign;
use super::{Placement, Timetable};
use crate::data::Slot;
use crate::roster::Roster;

/// Fills every empty usable class cell with the least-loaded filler teacher
/// that passes validation. Cells nobody can take stay empty.
///
/// Returns the number of cells filled.
pub(crate) fn fill_gaps(roster: &Roster, timetable: &mut Timetable) -> usize {
    let filler = roster.filler;
    let candidates = Rc::clone(&roster.subjects[filler].teachers);
    let mut filled = 0;

    let cells = iproduct!(0..roster.classes.len(), 0..roster.days(), 0..roster.periods());
    for (class, day, period) in cells {
        let slot = Slot::new(day, period);
        if roster.structure.is_reserved(period) || !timetable.classes[class].is_free(slot) {
            continue;
        }
        let best = candidates
            .iter()
            .copied()
            .filter(|&teacher| can_assign(roster, timetable, class, filler, slot, teacher).is_ok())
            .min_by_key(|&teacher| timetable.teacher_load(teacher));
        if let Some(teacher) = best {
            timetable.assign(
                roster,
                slot,
                Placement {
                    class,
                    subject: filler,
                    teacher: Some(teacher),
                    is_filler: true,
                    is_pre_assigned: false,
                },
            );
            filled += 1;
        }
    }
    info!("Gap fill placed {filled} filler period(s).");
    filled
}
