//! Schedule completion metrics.
//!
//! Computed purely from the output grids, so recomputing on an unmodified
//! timetable always yields the same numbers.

use std::collections::BTreeMap;

use crate::data::{ClassKey, ClassStats, Statistics, TeacherId, TeacherStats, TimetableInput};
use crate::grid::Grid;

pub fn calculate<T>(
    input: &TimetableInput,
    class_schedules: &BTreeMap<ClassKey, Grid<T>>,
    teacher_schedules: &BTreeMap<TeacherId, Grid<T>>,
) -> Statistics {
    let structure = &input.schedule_structure;
    let target = structure.target_periods();

    let class_stats: BTreeMap<ClassKey, ClassStats> = input
        .classes
        .iter()
        .map(|class| {
            let key = class.key();
            let filled = class_schedules.get(&key).map_or(0, |grid| {
                grid.iter()
                    .filter(|(slot, _)| !structure.is_reserved(slot.period))
                    .count()
            });
            let stats = ClassStats {
                filled,
                target,
                fill_rate: ratio(filled, target),
            };
            (key, stats)
        })
        .collect();

    let teacher_stats: BTreeMap<TeacherId, TeacherStats> = input
        .teachers
        .iter()
        .map(|teacher| {
            let grid = teacher_schedules.get(&teacher.id);
            let assigned = grid.map_or(0, Grid::count_filled);
            let periods_per_day = (0..structure.days_per_week)
                .map(|day| grid.map_or(0, |g| g.count_in_day(day)))
                .collect();
            let stats = TeacherStats {
                assigned,
                max_periods_per_week: teacher.max_periods_per_week,
                utilization: ratio(assigned, teacher.max_periods_per_week),
                periods_per_day,
            };
            (teacher.id.clone(), stats)
        })
        .collect();

    let total_slots: usize = class_stats.values().map(|s| s.target).sum();
    let filled_slots: usize = class_stats.values().map(|s| s.filled).sum();
    let completion_rate = if total_slots == 0 {
        100.0
    } else {
        filled_slots as f64 * 100.0 / total_slots as f64
    };

    Statistics {
        total_slots,
        filled_slots,
        empty_slots: total_slots.saturating_sub(filled_slots),
        completion_rate,
        class_stats,
        teacher_stats,
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Slot;
    use serde_json::json;

    fn input() -> TimetableInput {
        serde_json::from_value(json!({
            "scheduleStructure": { "daysPerWeek": 2, "periodsPerDay": 5, "lunchPeriod": 2 },
            "classes": [
                { "level": "M1", "section": "1" },
                { "level": "M1", "section": "2" }
            ],
            "teachers": [
                { "id": "a", "maxPeriodsPerDay": 3, "maxPeriodsPerWeek": 4 },
                { "id": "b", "maxPeriodsPerDay": 3, "maxPeriodsPerWeek": 0 }
            ],
            "subjects": []
        }))
        .unwrap()
    }

    #[test]
    fn reports_class_and_teacher_rates() {
        let input = input();
        let mut m1 = Grid::new(2, 5);
        m1.set(Slot::new(0, 0), ());
        m1.set(Slot::new(0, 1), ());
        m1.set(Slot::new(1, 3), ());
        // the final period is reserved and does not count towards the target
        m1.set(Slot::new(1, 4), ());
        let mut a = Grid::new(2, 5);
        a.set(Slot::new(0, 0), ());
        a.set(Slot::new(1, 3), ());

        let classes = BTreeMap::from([("M1-1".to_string(), m1)]);
        let teachers = BTreeMap::from([("a".to_string(), a)]);
        let stats = calculate(&input, &classes, &teachers);

        assert_eq!(stats.total_slots, 12);
        assert_eq!(stats.filled_slots, 3);
        assert_eq!(stats.empty_slots, 9);
        assert!((stats.completion_rate - 25.0).abs() < 1e-9);
        assert_eq!(stats.class_stats["M1-1"].filled, 3);
        assert_eq!(stats.class_stats["M1-2"].filled, 0);
        assert!((stats.class_stats["M1-1"].fill_rate - 0.5).abs() < 1e-9);

        let a = &stats.teacher_stats["a"];
        assert_eq!(a.assigned, 2);
        assert_eq!(a.periods_per_day, vec![1, 1]);
        assert!((a.utilization - 0.5).abs() < 1e-9);
        assert_eq!(stats.teacher_stats["b"].utilization, 0.0);
    }

    #[test]
    fn recomputation_is_stable() {
        let input = input();
        let classes: BTreeMap<String, Grid<()>> = BTreeMap::new();
        let teachers = BTreeMap::new();
        assert_eq!(
            calculate(&input, &classes, &teachers),
            calculate(&input, &classes, &teachers)
        );
    }
}
