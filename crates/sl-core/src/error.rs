use thiserror::Error;

pub type SlResult<T> = Result<T, SlError>;

/// Errors raised by the shared numeric helpers.
///
/// The engine crates carry their own domain errors; what lives here is the
/// vocabulary of the lookup-table and finite-math layer they are built on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlError {
    #[error("{what} is not a finite number (got {value})")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Lookup table for {what} has no rows")]
    EmptyTable { what: &'static str },

    #[error("Lookup table for {what} is not sorted by ascending x at row {index}")]
    UnsortedTable { what: &'static str, index: usize },
}
