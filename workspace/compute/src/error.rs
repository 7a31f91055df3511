use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Year outside the supported range
    #[error("Year {0} is out of range (1970..=3000)")]
    InvalidYear(i32),

    /// Month outside the calendar range
    #[error("Month {0} is out of range (1..=12)")]
    InvalidMonth(u32),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
