use chrono::{NaiveDateTime, Timelike};
use validator::Validate;

/// Формат времени в файле бронирований и на билете.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A confirmed booking. Created once, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub name: String,
    pub row: u32,
    pub seat: u32,
    pub is_student: bool,
    pub price: u32,
    pub timestamp: NaiveDateTime,
}

impl BookingRecord {
    pub fn student_label(&self) -> &'static str {
        if self.is_student {
            "yes"
        } else {
            "no"
        }
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Drops sub-second precision; records carry whole seconds only.
pub fn truncate_to_seconds(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

// Входные данные на бронирование
#[derive(Debug, Clone, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub row: u32,
    #[validate(range(min = 1))]
    pub seat: u32,
    pub is_student: bool,
}

impl BookingRequest {
    pub fn new(name: impl Into<String>, row: u32, seat: u32, is_student: bool) -> Self {
        Self {
            name: name.into().trim().to_string(),
            row,
            seat,
            is_student,
        }
    }
}
