use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Shape mismatch for {what}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Pressure must vary along the vertical axis; a scalar pressure was supplied")]
    ScalarPressure,

    #[error("A profile needs at least two pressure levels, found {levels}")]
    InsufficientLevels { levels: usize },

    #[error("Pressure at level {index} is not finite: {p}")]
    NonFinitePressure { index: usize, p: f64 },

    #[error("Pressure decreases at level {index}: {p} dbar after {prev} dbar")]
    UnsortedPressure { index: usize, p: f64, prev: f64 },

    #[error("Pressure {p} dbar lies outside the interpolation bracket [{p0}, {p1}]")]
    DegenerateBracket { p: f64, p0: f64, p1: f64 },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Equation of state rejected SA={sa} g/kg, CT={ct} °C, p={p} dbar")]
    Evaluator { sa: f64, ct: f64, p: f64 },
}

pub type Result<T> = core::result::Result<T, AppError>;
