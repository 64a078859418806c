//! Weekly class-timetable generator.
//!
//! Assigns every (class, subject, periods-per-week) requirement to a
//! (day, period, teacher) slot with a greedy, priority-ordered search,
//! honoring teacher availability and workload caps, special-room
//! exclusivity, homeroom-only subjects and school-wide locked activities.
//! A final gap-fill pass tops classes up with a filler activity.
//!
//! The whole problem is passed in as one [`data::TimetableInput`]; the result
//! is a [`data::TimetableOutput`] with per-class, per-teacher and per-room
//! grids plus completion statistics. Infeasible requirements are never an
//! error: they stay empty and show up in the statistics.

pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod roster;
pub mod server;
pub mod solver;
pub mod stats;

pub use error::{ConfigError, TimetableError};
pub use solver::{SolverOptions, generate, generate_with_rng};
