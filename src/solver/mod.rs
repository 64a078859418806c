//! Greedy weekly timetable generator.
//!
//! Phases, in order:
//! 1. Lock school-wide pre-assigned activities into every grid.
//! 2. Expand subject requirements into one-period tasks, plus filler tasks
//!    covering each class's shortfall.
//! 3. Sort tasks so scarce, important work is placed while the grid is emptiest.
//! 4. For each task, try shuffled candidate slots against teachers in
//!    ascending load order; commit the first legal pair.
//! 5. Sweep remaining empty cells with the least-loaded filler teacher.
//!
//! Infeasible requirements are left unplaced and reported through the
//! statistics; they are never an error.

mod candidates;
mod gap_fill;
mod locker;
mod tasks;
mod validator;

use itertools::Itertools;
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::data::{Assignment, Slot, TimetableInput, TimetableOutput, UnplacedRequirement};
use crate::error::TimetableError;
use crate::grid::Grid;
use crate::roster::Roster;
use crate::stats;
use tasks::Task;

/// Run-level knobs.
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    /// Fixes the random source for reproducible runs.
    pub seed: Option<u64>,
}

/// One grid cell, by interned index. Mirrored into the class, teacher and
/// room grids at the same coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placement {
    pub class: usize,
    pub subject: usize,
    pub teacher: Option<usize>,
    pub is_filler: bool,
    pub is_pre_assigned: bool,
}

/// All grids of one run.
#[derive(Debug, Clone)]
pub(crate) struct Timetable {
    pub classes: Vec<Grid<Placement>>,
    pub teachers: Vec<Grid<Placement>>,
    pub rooms: Vec<Grid<Placement>>,
}

impl Timetable {
    pub fn new(roster: &Roster) -> Self {
        let grid = || Grid::new(roster.days(), roster.periods());
        Self {
            classes: roster.classes.iter().map(|_| grid()).collect(),
            teachers: roster.teachers.iter().map(|_| grid()).collect(),
            rooms: roster.rooms.iter().map(|_| grid()).collect(),
        }
    }

    /// Periods the teacher is booked for across the week.
    pub fn teacher_load(&self, teacher: usize) -> usize {
        self.teachers[teacher].count_filled()
    }

    /// Commits a validated placement into every grid it touches.
    pub fn assign(&mut self, roster: &Roster, slot: Slot, placement: Placement) {
        debug_assert!(self.classes[placement.class].is_free(slot));
        self.classes[placement.class].set(slot, placement);
        if let Some(teacher) = placement.teacher {
            debug_assert!(self.teachers[teacher].is_free(slot));
            self.teachers[teacher].set(slot, placement);
        }
        if let Some(room) = roster.subjects[placement.subject].room {
            debug_assert!(self.rooms[room].is_free(slot));
            self.rooms[room].set(slot, placement);
        }
    }

    /// Writes a locked activity. A teacher or room already holding a locked
    /// activity at `slot` keeps its first entry; the session is joint.
    pub fn lock(&mut self, roster: &Roster, slot: Slot, placement: Placement) {
        self.classes[placement.class].set(slot, placement);
        if let Some(teacher) = placement.teacher {
            if self.teachers[teacher].is_free(slot) {
                self.teachers[teacher].set(slot, placement);
            }
        }
        if let Some(room) = roster.subjects[placement.subject].room {
            if self.rooms[room].is_free(slot) {
                self.rooms[room].set(slot, placement);
            }
        }
    }
}

/// Generates a timetable, seeding the random source from `options` or from
/// the thread RNG.
pub fn generate(
    input: &TimetableInput,
    options: &SolverOptions,
) -> Result<TimetableOutput, TimetableError> {
    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    info!("Generating timetable with seed {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut output = generate_with_rng(input, &mut rng)?;
    output.seed = Some(seed);
    Ok(output)
}

/// Generates a timetable drawing slot order from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(
    input: &TimetableInput,
    rng: &mut R,
) -> Result<TimetableOutput, TimetableError> {
    let start_time = Instant::now();
    let roster = Roster::build(input)?;
    info!(
        "Scheduling {} classes with {} teachers and {} subjects over {} days x {} periods...",
        roster.classes.len(),
        roster.teachers.len(),
        roster.subjects.len(),
        roster.days(),
        roster.periods()
    );

    let mut timetable = Timetable::new(&roster);
    let locked = locker::lock_pre_assigned(&roster, &input.pre_assigned_slots, &mut timetable);

    let mut tasks = tasks::build_tasks(&roster, &timetable, &locked);
    tasks::sort_tasks(&mut tasks);
    info!("Placing {} tasks...", tasks.len());

    let mut unplaced: Vec<&Task> = Vec::new();
    for task in &tasks {
        match place_task(&roster, &mut timetable, task, rng) {
            Some((slot, teacher)) => trace!(
                "{} {} #{} -> {} ({slot})",
                roster.classes[task.class].key,
                roster.subjects[task.subject].id,
                task.sequence,
                roster.teachers[teacher].id
            ),
            None => {
                debug!(
                    "Could not place {} #{} for {}",
                    roster.subjects[task.subject].id,
                    task.sequence,
                    roster.classes[task.class].key
                );
                unplaced.push(task);
            }
        }
    }
    info!(
        "Greedy pass placed {} of {} tasks.",
        tasks.len() - unplaced.len(),
        tasks.len()
    );

    gap_fill::fill_gaps(&roster, &mut timetable);

    let to_assignment = |p: &Placement| Assignment {
        subject_id: roster.subjects[p.subject].id.clone(),
        teacher_id: p.teacher.map(|t| roster.teachers[t].id.clone()),
        class_key: roster.classes[p.class].key.clone(),
        is_filler: p.is_filler,
        is_pre_assigned: p.is_pre_assigned,
    };
    let class_schedules: BTreeMap<_, _> = roster
        .classes
        .iter()
        .zip(&timetable.classes)
        .map(|(class, grid)| (class.key.clone(), grid.map(to_assignment)))
        .collect();
    let teacher_schedules: BTreeMap<_, _> = roster
        .teachers
        .iter()
        .zip(&timetable.teachers)
        .map(|(teacher, grid)| (teacher.id.clone(), grid.map(to_assignment)))
        .collect();
    let room_schedules: BTreeMap<_, _> = roster
        .rooms
        .iter()
        .zip(&timetable.rooms)
        .map(|(room, grid)| (room.clone(), grid.map(to_assignment)))
        .collect();

    let statistics = stats::calculate(input, &class_schedules, &teacher_schedules);
    let unplaced = summarize_unplaced(&roster, &unplaced);
    let success = statistics.filled_slots >= statistics.total_slots;
    let message = if success {
        format!(
            "Timetable complete: {}/{} slots filled.",
            statistics.filled_slots, statistics.total_slots
        )
    } else {
        format!(
            "Timetable {:.1}% complete: {}/{} slots filled, {} requirement(s) unplaced.",
            statistics.completion_rate,
            statistics.filled_slots,
            statistics.total_slots,
            unplaced.len()
        )
    };
    info!("{message} Finished in {:.2?}", start_time.elapsed());

    Ok(TimetableOutput {
        success,
        class_schedules,
        teacher_schedules,
        room_schedules,
        statistics,
        unplaced,
        message,
        seed: None,
    })
}

/// Tries every candidate slot against eligible teachers, least loaded first,
/// and commits the first legal pair.
fn place_task<R: Rng + ?Sized>(
    roster: &Roster,
    timetable: &mut Timetable,
    task: &Task,
    rng: &mut R,
) -> Option<(Slot, usize)> {
    if task.eligible.is_empty() {
        return None;
    }
    let teachers = task
        .eligible
        .iter()
        .copied()
        .sorted_by_key(|&t| timetable.teacher_load(t))
        .collect_vec();
    let preferred = roster.subjects[task.subject].preferred_time;

    for slot in candidates::candidate_slots(roster, preferred, rng) {
        for &teacher in &teachers {
            match validator::can_assign(roster, timetable, task.class, task.subject, slot, teacher)
            {
                Ok(()) => {
                    timetable.assign(
                        roster,
                        slot,
                        Placement {
                            class: task.class,
                            subject: task.subject,
                            teacher: Some(teacher),
                            is_filler: task.is_filler,
                            is_pre_assigned: false,
                        },
                    );
                    return Some((slot, teacher));
                }
                Err(rejection) => trace!(
                    "{} {} at {slot} with {}: {rejection}",
                    roster.classes[task.class].key,
                    roster.subjects[task.subject].id,
                    roster.teachers[teacher].id
                ),
            }
        }
    }
    None
}

/// Collapses unplaced named-subject tasks into one entry per (class, subject).
/// Filler shortfall is reported through the statistics instead.
fn summarize_unplaced(roster: &Roster, unplaced: &[&Task]) -> Vec<UnplacedRequirement> {
    unplaced
        .iter()
        .filter(|task| !task.is_filler)
        .map(|task| (task.class, task.subject))
        .counts()
        .into_iter()
        .map(|((class, subject), missing_periods)| UnplacedRequirement {
            class_key: roster.classes[class].key.clone(),
            subject_id: roster.subjects[subject].id.clone(),
            missing_periods,
        })
        .sorted_by(|a, b| {
            a.class_key
                .cmp(&b.class_key)
                .then_with(|| a.subject_id.cmp(&b.subject_id))
        })
        .collect()
}
