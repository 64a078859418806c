//! Fixed-size weekly tables.
//!
//! One `Grid` exists per class, per teacher and per special room. Cells are
//! stored row-major (`day * periods + period`) in a single allocation and
//! serialize as a nested `[[cell; periods]; days]` array.

use serde::{Serialize, Serializer};

use crate::data::{Day, Slot};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    days: usize,
    periods: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    pub fn new(days: usize, periods: usize) -> Self {
        Self {
            days,
            periods,
            cells: (0..days * periods).map(|_| None).collect(),
        }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    fn index(&self, slot: Slot) -> Option<usize> {
        (slot.day < self.days && slot.period < self.periods)
            .then(|| slot.day * self.periods + slot.period)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.index(slot).is_some()
    }

    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.index(slot).and_then(|i| self.cells[i].as_ref())
    }

    /// Out-of-range slots are never free.
    pub fn is_free(&self, slot: Slot) -> bool {
        self.index(slot).is_some_and(|i| self.cells[i].is_none())
    }

    /// Writes `value` into `slot`, returning the previous occupant.
    ///
    /// Writes outside the grid are dropped.
    pub fn set(&mut self, slot: Slot, value: T) -> Option<T> {
        match self.index(slot) {
            Some(i) => self.cells[i].replace(value),
            None => None,
        }
    }

    pub fn row(&self, day: Day) -> &[Option<T>] {
        let start = (day * self.periods).min(self.cells.len());
        let end = (start + self.periods).min(self.cells.len());
        &self.cells[start..end]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<T>]> {
        (0..self.days).map(move |day| self.row(day))
    }

    /// Occupied cells with their coordinates, in day-then-period order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        let periods = self.periods;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref()
                .map(|value| (Slot::new(i / periods, i % periods), value))
        })
    }

    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn count_in_day(&self, day: Day) -> usize {
        self.row(day).iter().filter(|cell| cell.is_some()).count()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            days: self.days,
            periods: self.periods,
            cells: self
                .cells
                .iter()
                .map(|cell| cell.as_ref().map(&mut f))
                .collect(),
        }
    }
}

impl<T: Serialize> Serialize for Grid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_trip_by_coordinate() {
        let mut grid = Grid::new(5, 6);
        assert!(grid.is_free(Slot::new(4, 5)));
        assert_eq!(grid.set(Slot::new(4, 5), "pe"), None);
        assert_eq!(grid.get(Slot::new(4, 5)), Some(&"pe"));
        assert!(!grid.is_free(Slot::new(4, 5)));
        assert_eq!(grid.set(Slot::new(4, 5), "art"), Some("pe"));
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let mut grid: Grid<u8> = Grid::new(2, 3);
        assert!(!grid.contains(Slot::new(2, 0)));
        assert!(!grid.is_free(Slot::new(0, 3)));
        assert_eq!(grid.set(Slot::new(0, 3), 1), None);
        assert_eq!(grid.count_filled(), 0);
    }

    #[test]
    fn counts_per_day_and_week() {
        let mut grid = Grid::new(3, 4);
        grid.set(Slot::new(1, 0), 'a');
        grid.set(Slot::new(1, 3), 'b');
        grid.set(Slot::new(2, 2), 'c');
        assert_eq!(grid.count_in_day(0), 0);
        assert_eq!(grid.count_in_day(1), 2);
        assert_eq!(grid.count_filled(), 3);

        let slots: Vec<Slot> = grid.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![Slot::new(1, 0), Slot::new(1, 3), Slot::new(2, 2)]);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let mut grid = Grid::new(2, 2);
        grid.set(Slot::new(0, 1), 7);
        let json = serde_json::to_value(grid.map(|v| v * 2)).unwrap();
        assert_eq!(json, serde_json::json!([[null, 14], [null, null]]));
    }
}
