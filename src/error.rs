use thiserror::Error;

/// Structural problems with a timetable request.
///
/// Infeasible requirements are not errors: they surface as empty cells and
/// in the run statistics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimetableError {
    #[error("a week needs at least one day")]
    NoDays,

    #[error("{periods} periods per day leaves no teachable period (need at least 3)")]
    TooFewPeriods { periods: usize },

    #[error("{days} days x {periods} periods exceeds the limit of {max} slots per week")]
    TooManySlots {
        days: usize,
        periods: usize,
        max: usize,
    },

    #[error("lunch period {lunch} must come before the final period {last}")]
    LunchOutOfRange { lunch: usize, last: usize },

    #[error("duplicate class key: {0}")]
    DuplicateClass(String),

    #[error("duplicate teacher id: {0}")]
    DuplicateTeacher(String),

    #[error("duplicate subject id: {0}")]
    DuplicateSubject(String),
}

/// Invalid server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddress {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid seed {value:?}: {source}")]
    Seed {
        value: String,
        source: std::num::ParseIntError,
    },
}
