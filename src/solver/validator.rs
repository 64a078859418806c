use std::fmt;

use super::{Placement, Timetable};
use crate::data::Slot;
use crate::grid::Grid;
use crate::roster::Roster;

/// Why a (class, subject, slot, teacher) combination is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rejection {
    ReservedPeriod,
    ClassBusy,
    TeacherBusy,
    TeacherUnavailable,
    DailyCap,
    WeeklyCap,
    RoomBusy,
    ConsecutiveLimit,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::ReservedPeriod => "lunch or final period",
            Rejection::ClassBusy => "class already booked",
            Rejection::TeacherBusy => "teacher already booked",
            Rejection::TeacherUnavailable => "teacher unavailable",
            Rejection::DailyCap => "teacher daily cap reached",
            Rejection::WeeklyCap => "teacher weekly cap reached",
            Rejection::RoomBusy => "special room already booked",
            Rejection::ConsecutiveLimit => "too many consecutive periods",
        };
        f.write_str(reason)
    }
}

/// The single authority on whether `teacher` may deliver `subject` to
/// `class` at `slot` given the current grids.
pub(crate) fn can_assign(
    roster: &Roster,
    timetable: &Timetable,
    class: usize,
    subject: usize,
    slot: Slot,
    teacher: usize,
) -> Result<(), Rejection> {
    if roster.structure.is_reserved(slot.period) {
        return Err(Rejection::ReservedPeriod);
    }
    if !timetable.classes[class].is_free(slot) {
        return Err(Rejection::ClassBusy);
    }

    let booked = &timetable.teachers[teacher];
    let info = &roster.teachers[teacher];
    if !booked.is_free(slot) {
        return Err(Rejection::TeacherBusy);
    }
    if info.blocked.get(slot).is_some() {
        return Err(Rejection::TeacherUnavailable);
    }
    if booked.count_in_day(slot.day) + 1 > info.max_per_day {
        return Err(Rejection::DailyCap);
    }
    if booked.count_filled() + 1 > info.max_per_week {
        return Err(Rejection::WeeklyCap);
    }

    if let Some(room) = roster.subjects[subject].room {
        if !timetable.rooms[room].is_free(slot) {
            return Err(Rejection::RoomBusy);
        }
    }

    let run = adjacent_run(&timetable.classes[class], slot, subject) + 1;
    if run > roster.max_consecutive {
        return Err(Rejection::ConsecutiveLimit);
    }
    Ok(())
}

/// Periods of `subject` directly before and after `slot` in the class's day.
fn adjacent_run(grid: &Grid<Placement>, slot: Slot, subject: usize) -> usize {
    let row = grid.row(slot.day);
    let same = |cell: &&Option<Placement>| matches!(cell, Some(p) if p.subject == subject);
    let before = row[..slot.period].iter().rev().take_while(same).count();
    let after = row[slot.period + 1..].iter().take_while(same).count();
    before + after
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimetableInput;
    use serde_json::json;

    // usable periods per day: 0, 1, 2 | lunch 3 | 4, 5 | final 6
    fn roster() -> Roster {
        let input: TimetableInput = serde_json::from_value(json!({
            "scheduleStructure": { "daysPerWeek": 2, "periodsPerDay": 7, "lunchPeriod": 3 },
            "classes": [
                { "level": "M1", "section": "1" },
                { "level": "M1", "section": "2" }
            ],
            "teachers": [
                { "id": "a", "canTeachSubjectIds": ["math", "lab"], "maxPeriodsPerDay": 2, "maxPeriodsPerWeek": 3,
                  "unavailableSlots": [{ "day": 1, "periods": [4] }] },
                { "id": "b", "canTeachSubjectIds": ["math", "lab"], "maxPeriodsPerDay": 4, "maxPeriodsPerWeek": 8 }
            ],
            "subjects": [
                { "id": "math" },
                { "id": "lab", "requiresSpecialRoom": true }
            ],
            "constraints": { "maxConsecutivePeriodsPerSubject": 2 }
        }))
        .unwrap();
        Roster::build(&input).unwrap()
    }

    fn place(
        roster: &Roster,
        timetable: &mut Timetable,
        class: usize,
        subject: &str,
        slot: Slot,
        teacher: usize,
    ) {
        let subject = roster.subject(subject).unwrap();
        let placement = Placement {
            class,
            subject,
            teacher: Some(teacher),
            is_filler: false,
            is_pre_assigned: false,
        };
        timetable.assign(roster, slot, placement);
    }

    #[test]
    fn rejects_reserved_periods() {
        let roster = roster();
        let timetable = Timetable::new(&roster);
        let math = roster.subject("math").unwrap();
        let check = |slot| can_assign(&roster, &timetable, 0, math, slot, 1);
        assert_eq!(check(Slot::new(0, 3)), Err(Rejection::ReservedPeriod));
        assert_eq!(check(Slot::new(0, 6)), Err(Rejection::ReservedPeriod));
        assert_eq!(check(Slot::new(0, 0)), Ok(()));
    }

    #[test]
    fn rejects_double_booking() {
        let roster = roster();
        let mut timetable = Timetable::new(&roster);
        let math = roster.subject("math").unwrap();
        let slot = Slot::new(0, 0);
        place(&roster, &mut timetable, 0, "math", slot, 1);
        assert_eq!(can_assign(&roster, &timetable, 0, math, slot, 0), Err(Rejection::ClassBusy));
        assert_eq!(can_assign(&roster, &timetable, 1, math, slot, 1), Err(Rejection::TeacherBusy));
        assert_eq!(can_assign(&roster, &timetable, 1, math, slot, 0), Ok(()));
    }

    #[test]
    fn rejects_unavailable_teacher() {
        let roster = roster();
        let timetable = Timetable::new(&roster);
        let math = roster.subject("math").unwrap();
        assert_eq!(
            can_assign(&roster, &timetable, 0, math, Slot::new(1, 4), 0),
            Err(Rejection::TeacherUnavailable)
        );
        assert_eq!(can_assign(&roster, &timetable, 0, math, Slot::new(1, 4), 1), Ok(()));
    }

    #[test]
    fn rejects_over_daily_and_weekly_caps() {
        let roster = roster();
        let mut timetable = Timetable::new(&roster);
        let math = roster.subject("math").unwrap();
        place(&roster, &mut timetable, 0, "math", Slot::new(0, 0), 0);
        place(&roster, &mut timetable, 1, "math", Slot::new(0, 1), 0);
        assert_eq!(
            can_assign(&roster, &timetable, 0, math, Slot::new(0, 4), 0),
            Err(Rejection::DailyCap)
        );

        place(&roster, &mut timetable, 0, "math", Slot::new(1, 0), 0);
        assert_eq!(
            can_assign(&roster, &timetable, 1, math, Slot::new(1, 1), 0),
            Err(Rejection::WeeklyCap)
        );
    }

    #[test]
    fn rejects_busy_special_room() {
        let roster = roster();
        let mut timetable = Timetable::new(&roster);
        let lab = roster.subject("lab").unwrap();
        place(&roster, &mut timetable, 0, "lab", Slot::new(0, 0), 0);
        assert_eq!(
            can_assign(&roster, &timetable, 1, lab, Slot::new(0, 0), 1),
            Err(Rejection::RoomBusy)
        );
        assert_eq!(can_assign(&roster, &timetable, 1, lab, Slot::new(0, 1), 1), Ok(()));
    }

    #[test]
    fn rejects_runs_longer_than_the_limit() {
        let roster = roster();
        let mut timetable = Timetable::new(&roster);
        let math = roster.subject("math").unwrap();

        // gap between two periods: run would span both sides
        place(&roster, &mut timetable, 0, "math", Slot::new(0, 0), 1);
        place(&roster, &mut timetable, 0, "math", Slot::new(0, 2), 1);
        assert_eq!(
            can_assign(&roster, &timetable, 0, math, Slot::new(0, 1), 1),
            Err(Rejection::ConsecutiveLimit)
        );
        // lunch breaks the run
        assert_eq!(can_assign(&roster, &timetable, 0, math, Slot::new(0, 4), 1), Ok(()));

        place(&roster, &mut timetable, 0, "math", Slot::new(1, 0), 1);
        place(&roster, &mut timetable, 0, "math", Slot::new(1, 1), 1);
        assert_eq!(
            can_assign(&roster, &timetable, 0, math, Slot::new(1, 2), 1),
            Err(Rejection::ConsecutiveLimit)
        );
        let lab = roster.subject("lab").unwrap();
        assert_eq!(can_assign(&roster, &timetable, 0, lab, Slot::new(1, 2), 1), Ok(()));
    }
}
