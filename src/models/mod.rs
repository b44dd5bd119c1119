pub mod seat;
pub mod booking;

pub use seat::{SeatGrid, SeatState};
pub use booking::{BookingRecord, BookingRequest};
