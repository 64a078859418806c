use log::{debug, warn};
use std::collections::HashSet;
use std::rc::Rc;

use super::Timetable;
use crate::roster::Roster;

/// One period of one subject for one class.
#[derive(Debug, Clone)]
pub(crate) struct Task {
    pub class: usize,
    pub subject: usize,
    /// Shared by every task of the same (class, subject).
    pub eligible: Rc<[usize]>,
    pub sequence: usize,
    pub total_periods: usize,
    pub is_filler: bool,
    pub priority: i32,
}

/// Expands weekly requirements into one-period tasks.
///
/// Subjects locked for a class are skipped. Whatever the named subjects and
/// locked activities leave of the class target is covered by filler tasks.
pub(crate) fn build_tasks(
    roster: &Roster,
    timetable: &Timetable,
    locked: &[HashSet<usize>],
) -> Vec<Task> {
    let target = roster.structure.target_periods();
    let filler = &roster.subjects[roster.filler];
    let mut tasks = Vec::new();

    for (class_idx, class) in roster.classes.iter().enumerate() {
        let mut named = 0;
        for (subject_idx, subject) in roster.subjects.iter().enumerate() {
            if locked[class_idx].contains(&subject_idx) {
                continue;
            }
            let requested = subject.periods_per_week.get(&class.level).copied().unwrap_or(0);
            if requested == 0 {
                continue;
            }
            let needed = requested.min(target);
            if needed < requested {
                warn!(
                    "'{}' asks for {requested} period(s) for {}; only {target} are usable.",
                    subject.id, class.key
                );
            }
            let eligible = roster.eligible_teachers(class_idx, subject_idx);
            if eligible.is_empty() {
                warn!(
                    "No teacher can deliver '{}' to {}; {needed} period(s) will stay empty.",
                    subject.id, class.key
                );
            }
            tasks.extend((0..needed).map(|sequence| Task {
                class: class_idx,
                subject: subject_idx,
                eligible: Rc::clone(&eligible),
                sequence,
                total_periods: needed,
                is_filler: subject_idx == roster.filler,
                priority: subject.priority,
            }));
            named += needed;
        }

        let locked_usable = timetable.classes[class_idx]
            .iter()
            .filter(|(slot, _)| !roster.structure.is_reserved(slot.period))
            .count();
        let shortfall = target.saturating_sub(named + locked_usable);
        debug!(
            "{}: {named} named period(s), {locked_usable} locked, {shortfall} filler",
            class.key
        );
        tasks.extend((0..shortfall).map(|sequence| Task {
            class: class_idx,
            subject: roster.filler,
            eligible: Rc::clone(&filler.teachers),
            sequence,
            total_periods: shortfall,
            is_filler: true,
            priority: filler.priority,
        }));
    }
    tasks
}

/// Orders tasks so the hardest, most important work is placed first:
/// named subjects before filler, then higher priority, then fewer eligible
/// teachers, then subjects with more weekly periods. Stable.
pub(crate) fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.is_filler
            .cmp(&b.is_filler)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.eligible.len().cmp(&b.eligible.len()))
            .then_with(|| b.total_periods.cmp(&a.total_periods))
    });
}
