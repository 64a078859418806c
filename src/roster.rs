//! Interned view of a `TimetableInput`.
//!
//! Every string identifier is resolved to a dense index once, before any
//! grid is touched. The solver phases only ever see indices.

use itertools::Itertools;
use log::warn;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::data::{
    ClassKey, PreferredTime, RoomId, ScheduleStructure, Slot, Subject, SubjectCategory,
    TimetableInput,
};
use crate::error::TimetableError;
use crate::grid::Grid;

#[derive(Debug, Clone)]
pub struct ClassInfo {
    pub key: ClassKey,
    pub level: String,
    pub homeroom_teacher: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct TeacherInfo {
    pub id: String,
    pub max_per_day: usize,
    pub max_per_week: usize,
    /// `Some(())` marks a slot the teacher has declared unavailable.
    pub blocked: Grid<()>,
}

#[derive(Debug, Clone)]
pub struct SubjectInfo {
    pub id: String,
    pub periods_per_week: HashMap<String, usize>,
    pub preferred_time: Option<PreferredTime>,
    pub priority: i32,
    pub room: Option<usize>,
    /// Teachers able to deliver the subject, in input order.
    pub teachers: Rc<[usize]>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    pub structure: ScheduleStructure,
    pub classes: Vec<ClassInfo>,
    pub teachers: Vec<TeacherInfo>,
    pub subjects: Vec<SubjectInfo>,
    pub rooms: Vec<RoomId>,
    pub subject_index: HashMap<String, usize>,
    pub filler: usize,
    pub homeroom_subject: Option<usize>,
    pub max_consecutive: usize,
}

impl Roster {
    pub fn build(input: &TimetableInput) -> Result<Self, TimetableError> {
        let structure = input.schedule_structure.clone();
        validate_structure(&structure)?;
        let (days, periods) = (structure.days_per_week, structure.periods_per_day);
        let constraints = &input.constraints;

        if let Some(id) = input.classes.iter().map(|c| c.key()).duplicates().next() {
            return Err(TimetableError::DuplicateClass(id));
        }
        if let Some(id) = input.teachers.iter().map(|t| &t.id).duplicates().next() {
            return Err(TimetableError::DuplicateTeacher(id.clone()));
        }
        if let Some(id) = input.subjects.iter().map(|s| &s.id).duplicates().next() {
            return Err(TimetableError::DuplicateSubject(id.clone()));
        }

        let teachers: Vec<TeacherInfo> = input
            .teachers
            .iter()
            .map(|t| {
                let mut blocked = Grid::new(days, periods);
                for unavailable in &t.unavailable_slots {
                    for &period in &unavailable.periods {
                        blocked.set(Slot::new(unavailable.day, period), ());
                    }
                }
                TeacherInfo {
                    id: t.id.clone(),
                    max_per_day: t.max_periods_per_day,
                    max_per_week: t.max_periods_per_week,
                    blocked,
                }
            })
            .collect();

        // homeroom label -> first teacher carrying it
        let mut homerooms: HashMap<&str, usize> = HashMap::new();
        for (idx, teacher) in input.teachers.iter().enumerate() {
            if let Some(label) = &teacher.homeroom_class_label {
                homerooms.entry(label.as_str()).or_insert(idx);
            }
        }
        let classes: Vec<ClassInfo> = input
            .classes
            .iter()
            .map(|c| {
                let key = c.key();
                ClassInfo {
                    homeroom_teacher: homerooms.get(key.as_str()).copied(),
                    level: c.level.clone(),
                    key,
                }
            })
            .collect();
        let class_keys: HashSet<&str> = classes.iter().map(|c| c.key.as_str()).collect();
        for label in homerooms.keys().filter(|label| !class_keys.contains(*label)) {
            warn!("Homeroom label '{label}' does not match any class; ignoring it.");
        }

        let mut catalog: Vec<Subject> = input.subjects.clone();
        if !catalog.iter().any(|s| s.id == constraints.filler_subject_id) {
            warn!(
                "Filler subject '{}' is not in the catalog; using a default definition.",
                constraints.filler_subject_id
            );
            catalog.push(default_filler(&constraints.filler_subject_id));
        }

        let mut rooms: Vec<RoomId> = constraints.special_rooms.iter().map(|r| r.id.clone()).collect();
        let mut subjects = Vec::with_capacity(catalog.len());
        for subject in &catalog {
            let room = if subject.requires_special_room {
                let listed = constraints
                    .special_rooms
                    .iter()
                    .position(|r| r.subject_ids.contains(&subject.id));
                Some(listed.unwrap_or_else(|| {
                    rooms.push(subject.id.clone());
                    rooms.len() - 1
                }))
            } else {
                None
            };
            let priority = constraints
                .subject_priority
                .get(&subject.id)
                .copied()
                .or(subject.priority_weight)
                .unwrap_or_else(|| subject.category.default_priority());
            let teachers: Rc<[usize]> = input
                .teachers
                .iter()
                .positions(|t| t.can_teach(&subject.id))
                .collect();

            subjects.push(SubjectInfo {
                id: subject.id.clone(),
                periods_per_week: subject.periods_per_week.clone(),
                preferred_time: subject.preferred_time,
                priority,
                room,
                teachers,
            });
        }

        let subject_index: HashMap<String, usize> = subjects
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.id.clone(), idx))
            .collect();
        let filler = subject_index[&constraints.filler_subject_id];
        let homeroom_subject = subject_index.get(&constraints.homeroom_subject_id).copied();

        Ok(Self {
            structure,
            classes,
            teachers,
            subjects,
            rooms,
            subject_index,
            filler,
            homeroom_subject,
            max_consecutive: constraints.max_consecutive_periods_per_subject,
        })
    }

    pub fn days(&self) -> usize {
        self.structure.days_per_week
    }

    pub fn periods(&self) -> usize {
        self.structure.periods_per_day
    }

    pub fn subject(&self, id: &str) -> Option<usize> {
        self.subject_index.get(id).copied()
    }

    /// Teachers allowed to deliver `subject` to `class`.
    ///
    /// The homeroom subject belongs to the class's homeroom teacher alone.
    pub fn eligible_teachers(&self, class: usize, subject: usize) -> Rc<[usize]> {
        if Some(subject) == self.homeroom_subject {
            return self.classes[class].homeroom_teacher.into_iter().collect();
        }
        Rc::clone(&self.subjects[subject].teachers)
    }
}

/// Upper bound on `days x periods` for one weekly grid.
pub const MAX_SLOTS_PER_WEEK: usize = 7 * 24;

fn validate_structure(structure: &ScheduleStructure) -> Result<(), TimetableError> {
    if structure.days_per_week == 0 {
        return Err(TimetableError::NoDays);
    }
    if structure.periods_per_day < 3 {
        return Err(TimetableError::TooFewPeriods {
            periods: structure.periods_per_day,
        });
    }
    let slots = structure
        .days_per_week
        .checked_mul(structure.periods_per_day)
        .filter(|&slots| slots <= MAX_SLOTS_PER_WEEK);
    if slots.is_none() {
        return Err(TimetableError::TooManySlots {
            days: structure.days_per_week,
            periods: structure.periods_per_day,
            max: MAX_SLOTS_PER_WEEK,
        });
    }
    if structure.lunch_period >= structure.last_period() {
        return Err(TimetableError::LunchOutOfRange {
            lunch: structure.lunch_period,
            last: structure.last_period(),
        });
    }
    Ok(())
}

fn default_filler(id: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: Some("Activity".to_string()),
        periods_per_week: HashMap::new(),
        requires_special_room: false,
        preferred_time: None,
        priority_weight: None,
        category: SubjectCategory::Activity,
    }
}
