//! store.rs
//!
//! Append-only CSV log of confirmed bookings.
//!
//! File layout: a `name,row,seat,is_student,price,timestamp` header followed by one
//! line per booking in confirmation order, CRLF terminated. Fields are quoted only
//! when they contain a delimiter, quote or line break. Existing lines are never
//! rewritten.
//!
//! Loading is tolerant: every line is parsed on its own and a line that does not
//! parse is skipped. Rebuilding the seating chart needs only `row` and `seat`, so
//! [`BookingStore::load_seats`] keeps lines whose other fields are off. Only failing
//! to open or read the file as a whole is an error.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::booking::{BookingRecord, TIMESTAMP_FORMAT};

pub const HEADER: [&str; 6] = ["name", "row", "seat", "is_student", "price", "timestamp"];

// Строка CSV как она лежит на диске
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    name: String,
    row: u32,
    seat: u32,
    is_student: String,
    price: u32,
    timestamp: String,
}

// Для восстановления сетки достаточно ряда и места
#[derive(Debug, Deserialize)]
struct SeatRow {
    row: u32,
    seat: u32,
}

impl From<&BookingRecord> for CsvRow {
    fn from(record: &BookingRecord) -> Self {
        Self {
            name: record.name.clone(),
            row: record.row,
            seat: record.seat,
            is_student: record.student_label().to_string(),
            price: record.price,
            timestamp: record.formatted_timestamp(),
        }
    }
}

impl TryFrom<CsvRow> for BookingRecord {
    type Error = String;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let is_student = match row.is_student.as_str() {
            "yes" => true,
            "no" => false,
            other => return Err(format!("is_student must be yes or no, got {other:?}")),
        };
        let timestamp = NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| format!("bad timestamp {:?}: {e}", row.timestamp))?;
        Ok(BookingRecord {
            name: row.name,
            row: row.row,
            seat: row.seat,
            is_student,
            price: row.price,
            timestamp,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BookingStore {
    path: PathBuf,
}

impl BookingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every well-formed record. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<BookingRecord>, StoreError> {
        let rows = self.read_rows::<CsvRow>()?;
        let mut records = Vec::with_capacity(rows.len());
        for (line, row) in rows {
            match BookingRecord::try_from(row) {
                Ok(record) => records.push(record),
                Err(reason) => debug!("Skipping malformed booking line {}: {}", line, reason),
            }
        }
        Ok(records)
    }

    /// Seat addresses of every stored booking.
    ///
    /// Only `row` and `seat` have to parse: a line with an odd `is_student`, `price`
    /// or `timestamp` still holds its seat.
    pub fn load_seats(&self) -> Result<Vec<(u32, u32)>, StoreError> {
        let rows = self.read_rows::<SeatRow>()?;
        Ok(rows.into_iter().map(|(_, r)| (r.row, r.seat)).collect())
    }

    /// Same as [`load_seats`](Self::load_seats), but a read failure becomes one
    /// warning and an empty result.
    pub fn load_seats_or_warn(&self) -> Vec<(u32, u32)> {
        self.load_seats().unwrap_or_else(|e| {
            warn!("⚠️ {}; starting with an empty seating chart", e);
            Vec::new()
        })
    }

    // Строки, которые не разобрались в T, пропускаются; номер строки для логов
    fn read_rows<T: DeserializeOwned>(&self) -> Result<Vec<(usize, T)>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.read_error(e.into())),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        // Без корректного заголовка строки не сопоставить с полями
        reader.headers().map_err(|e| self.read_error(e))?;

        let mut rows = Vec::new();
        for (i, result) in reader.deserialize::<T>().enumerate() {
            let line = i + 2;
            match result {
                Ok(row) => rows.push((line, row)),
                Err(e) if e.is_io_error() => return Err(self.read_error(e)),
                Err(e) => debug!("Skipping malformed booking line {}: {}", line, e),
            }
        }
        Ok(rows)
    }

    /// Appends one record, writing the header first if the file is new or empty.
    /// The file handle is closed before this returns, on success and on error.
    pub fn append(&self, record: &BookingRecord) -> Result<(), StoreError> {
        self.try_append(record).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn try_append(&self, record: &BookingRecord) -> Result<(), csv::Error> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::CRLF)
            .from_writer(file);

        if needs_header {
            writer.write_record(HEADER)?;
        }
        writer.serialize(CsvRow::from(record))?;
        writer.flush()?;
        Ok(())
    }

    fn read_error(&self, source: csv::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }
}
