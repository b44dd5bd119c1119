use std::path::PathBuf;

use thiserror::Error;

/// Ошибки изменения сетки мест.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("row {row} / seat {seat} is outside the seating chart")]
    InvalidSeat { row: u32, seat: u32 },
    #[error("row {row} / seat {seat} is already booked")]
    AlreadyBooked { row: u32, seat: u32 },
}

/// Failures of the bookings file itself (never of a single malformed line).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read bookings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("could not write bookings file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Outcome of a rejected booking. `Display` is the message shown to the patron.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Name must not be empty.")]
    InvalidName,
    #[error("Row {row} / seat {seat} is out of range. Please choose a seat on the chart.")]
    InvalidSeat { row: u32, seat: u32 },
    #[error("Sorry, row {row} / seat {seat} is already booked. Choose another.")]
    SeatUnavailable { row: u32, seat: u32 },
    #[error("Booking could not be saved: {0}")]
    Store(#[from] StoreError),
}

impl From<GridError> for BookingError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::InvalidSeat { row, seat } => BookingError::InvalidSeat { row, seat },
            GridError::AlreadyBooked { row, seat } => BookingError::SeatUnavailable { row, seat },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}
