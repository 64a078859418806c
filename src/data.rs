use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::grid::Grid;

// Type aliases for clarity
pub type TeacherId = String;
pub type SubjectId = String;
pub type ClassKey = String;
pub type RoomId = String;
pub type Day = usize;
pub type Period = usize;

/// Shape of the teaching week. Day and period indices are 0-based.
///
/// The final period of every day is reserved for pre-assigned activities.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStructure {
    pub days_per_week: usize,
    pub periods_per_day: usize,
    pub lunch_period: Period,
}

impl ScheduleStructure {
    pub fn last_period(&self) -> Period {
        self.periods_per_day.saturating_sub(1)
    }

    /// Lunch and the final period are never available to regular tasks.
    pub fn is_reserved(&self, period: Period) -> bool {
        period == self.lunch_period || period == self.last_period()
    }

    /// Periods per class per week that regular tasks may occupy.
    pub fn target_periods(&self) -> usize {
        self.periods_per_day
            .saturating_sub(2)
            .saturating_mul(self.days_per_week)
    }
}

/// A class (homeroom group) to be timetabled.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassUnit {
    pub level: String,
    pub section: String,
    #[serde(default)]
    pub grade: Option<String>,
}

impl ClassUnit {
    pub fn key(&self) -> ClassKey {
        format!("{}-{}", self.level, self.section)
    }
}

/// Periods within one day a teacher cannot teach.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnavailableSlot {
    pub day: Day,
    pub periods: Vec<Period>,
}

/// A teacher with their subjects and workload limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    #[serde(default)]
    pub can_teach_subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub homeroom_class_label: Option<ClassKey>,
    pub max_periods_per_day: usize,
    pub max_periods_per_week: usize,
    #[serde(default)]
    pub unavailable_slots: Vec<UnavailableSlot>,
}

impl Teacher {
    pub fn can_teach(&self, subject_id: &str) -> bool {
        self.can_teach_subject_ids.iter().any(|s| s == subject_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredTime {
    Morning,
    Afternoon,
}

/// Broad subject type. Drives the default priority when none is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectCategory {
    #[default]
    Core,
    Elective,
    Activity,
}

impl SubjectCategory {
    pub fn default_priority(self) -> i32 {
        match self {
            SubjectCategory::Core => 3,
            SubjectCategory::Elective => 2,
            SubjectCategory::Activity => 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    #[serde(default)]
    pub name: Option<String>,
    /// Weekly periods keyed by class level.
    #[serde(default)]
    pub periods_per_week: HashMap<String, usize>,
    #[serde(default)]
    pub requires_special_room: bool,
    #[serde(default)]
    pub preferred_time: Option<PreferredTime>,
    #[serde(default)]
    pub priority_weight: Option<i32>,
    #[serde(default)]
    pub category: SubjectCategory,
}

/// A room shared by every class, reserved for the listed subjects.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialRoom {
    pub id: RoomId,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
}

fn default_max_consecutive() -> usize {
    2
}

fn default_filler_subject() -> SubjectId {
    "activity".to_string()
}

fn default_homeroom_subject() -> SubjectId {
    "homeroom".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default)]
    pub subject_priority: HashMap<SubjectId, i32>,
    #[serde(default)]
    pub special_rooms: Vec<SpecialRoom>,
    #[serde(default = "default_max_consecutive")]
    pub max_consecutive_periods_per_subject: usize,
    #[serde(default = "default_filler_subject")]
    pub filler_subject_id: SubjectId,
    #[serde(default = "default_homeroom_subject")]
    pub homeroom_subject_id: SubjectId,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            subject_priority: HashMap::new(),
            special_rooms: Vec::new(),
            max_consecutive_periods_per_subject: default_max_consecutive(),
            filler_subject_id: default_filler_subject(),
            homeroom_subject_id: default_homeroom_subject(),
        }
    }
}

/// A school-wide activity locked into the same slot for every class.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreAssignedSlot {
    pub subject_id: SubjectId,
    pub day: Day,
    pub period: Period,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// The complete input for the timetabling problem.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableInput {
    pub schedule_structure: ScheduleStructure,
    pub classes: Vec<ClassUnit>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub pre_assigned_slots: Vec<PreAssignedSlot>,
}

/// A (day, period) coordinate in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Slot {
    pub day: Day,
    pub period: Period,
}

impl Slot {
    pub fn new(day: Day, period: Period) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} period {}", self.day, self.period)
    }
}

/// The content of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub subject_id: SubjectId,
    pub teacher_id: Option<TeacherId>,
    pub class_key: ClassKey,
    pub is_filler: bool,
    pub is_pre_assigned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub filled: usize,
    pub target: usize,
    pub fill_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStats {
    pub assigned: usize,
    pub max_periods_per_week: usize,
    pub utilization: f64,
    pub periods_per_day: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_slots: usize,
    pub filled_slots: usize,
    pub empty_slots: usize,
    /// Percentage in `0.0..=100.0`.
    pub completion_rate: f64,
    pub class_stats: BTreeMap<ClassKey, ClassStats>,
    pub teacher_stats: BTreeMap<TeacherId, TeacherStats>,
}

/// A requirement the greedy pass could not fully place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedRequirement {
    pub class_key: ClassKey,
    pub subject_id: SubjectId,
    pub missing_periods: usize,
}

impl fmt::Display for UnplacedRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} is missing {} period(s)",
            self.class_key, self.subject_id, self.missing_periods
        )
    }
}

/// The final output of the generator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableOutput {
    pub success: bool,
    pub class_schedules: BTreeMap<ClassKey, Grid<Assignment>>,
    pub teacher_schedules: BTreeMap<TeacherId, Grid<Assignment>>,
    pub room_schedules: BTreeMap<RoomId, Grid<Assignment>>,
    pub statistics: Statistics,
    pub unplaced: Vec<UnplacedRequirement>,
    pub message: String,
    /// Seed of the run, when the generator seeded its own random source.
    /// Replaying it with the same input reproduces the grids.
    pub seed: Option<u64>,
}
