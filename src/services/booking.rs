//! booking.rs
//!
//! Сервис бронирования: единственная точка, через которую меняется состояние зала.
//!
//! `BookingService` owns the seating chart, the pricing policy and the bookings
//! file. At startup the chart is rebuilt by replaying the file; afterwards every
//! successful `book_seat` marks exactly one seat and appends exactly one line.
//!
//! Validation and marking happen in one call: there is no public way to mark a seat
//! without going through the checks.
//!
//! If the append fails, the seat is reopened before the error is returned, so the
//! in-memory chart never shows a seat that the file does not.

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};
use validator::Validate;

use crate::{
    config::Config,
    error::BookingError,
    models::{booking::truncate_to_seconds, BookingRecord, BookingRequest, SeatGrid},
    services::pricing::PricingPolicy,
    store::BookingStore,
};

#[derive(Debug)]
pub struct BookingService {
    grid: SeatGrid,
    pricing: PricingPolicy,
    store: BookingStore,
}

impl BookingService {
    /// Builds the chart from config and replays the bookings file into it.
    pub fn open(config: &Config) -> Self {
        let grid = SeatGrid::new(config.theater.rows, config.theater.seats_per_row);
        let pricing = PricingPolicy::new(&config.pricing);
        let store = BookingStore::new(config.app.bookings_file.clone());
        Self::with_parts(grid, pricing, store)
    }

    pub fn with_parts(mut grid: SeatGrid, pricing: PricingPolicy, store: BookingStore) -> Self {
        let seats = store.load_seats_or_warn();
        let replayed = replay(&mut grid, &seats);
        info!(
            "🎭 Seating chart {}x{} ready, {} of {} booking records replayed from {}",
            grid.rows(),
            grid.cols(),
            replayed,
            seats.len(),
            store.path().display()
        );
        Self { grid, pricing, store }
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    /// Price a seat would cost right now, after the same address and availability
    /// checks `book_seat` performs. Nothing is reserved.
    pub fn quote(&self, row: u32, seat: u32, is_student: bool) -> Result<u32, BookingError> {
        self.check_seat(row, seat)?;
        Ok(self.pricing.price(row, is_student))
    }

    /// Books one seat, stamped with the local wall clock.
    pub fn book_seat(&mut self, request: BookingRequest) -> Result<BookingRecord, BookingError> {
        let now = Local::now().naive_local();
        self.book_seat_at(request, now)
    }

    pub fn book_seat_at(
        &mut self,
        request: BookingRequest,
        now: NaiveDateTime,
    ) -> Result<BookingRecord, BookingError> {
        if let Err(errors) = request.validate() {
            if errors.field_errors().contains_key("name") {
                return Err(BookingError::InvalidName);
            }
            return Err(BookingError::InvalidSeat {
                row: request.row,
                seat: request.seat,
            });
        }
        let BookingRequest { name, row, seat, is_student } = request;

        self.check_seat(row, seat)?;
        self.grid.mark_booked(row, seat)?;

        let record = BookingRecord {
            name,
            row,
            seat,
            is_student,
            price: self.pricing.price(row, is_student),
            timestamp: truncate_to_seconds(now),
        };

        if let Err(e) = self.store.append(&record) {
            // Откатываем место, чтобы память совпадала с файлом
            self.grid.release(row, seat);
            warn!("💾 Booking for row {} seat {} not saved: {}", row, seat, e);
            return Err(e.into());
        }

        info!(
            "🎫 Booked row {} seat {} for {} at {}",
            record.row, record.seat, record.name, record.price
        );
        Ok(record)
    }

    fn check_seat(&self, row: u32, seat: u32) -> Result<(), BookingError> {
        if !self.grid.is_valid_address(row, seat) {
            return Err(BookingError::InvalidSeat { row, seat });
        }
        if !self.grid.is_open(row, seat) {
            return Err(BookingError::SeatUnavailable { row, seat });
        }
        Ok(())
    }
}

/// Marks every stored seat as booked. Records outside the chart and repeated
/// seats are ignored. Returns how many seats were marked.
fn replay(grid: &mut SeatGrid, seats: &[(u32, u32)]) -> usize {
    seats
        .iter()
        .filter(|(row, seat)| grid.mark_booked(*row, *seat).is_ok())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::error::StoreError;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn service(store: BookingStore) -> BookingService {
        BookingService::with_parts(
            SeatGrid::new(5, 10),
            PricingPolicy::new(&PricingConfig::default()),
            store,
        )
    }

    fn service_in(dir: &TempDir) -> BookingService {
        service(BookingStore::new(dir.path().join("bookings.csv")))
    }

    #[test]
    fn books_and_prices_seats() {
        let dir = TempDir::new().unwrap();
        let mut svc = service_in(&dir);

        let first = svc
            .book_seat_at(BookingRequest::new("Asha", 1, 1, false), at(18, 0, 0))
            .unwrap();
        let second = svc
            .book_seat_at(BookingRequest::new("Ben", 2, 1, true), at(18, 1, 0))
            .unwrap();

        assert_eq!(first.price, 150);
        assert_eq!(second.price, 80);
        assert!(!svc.grid().is_open(1, 1));
        assert!(!svc.grid().is_open(2, 1));
        assert_eq!(svc.store().load().unwrap(), vec![first, second]);
    }

    #[test]
    fn second_booking_of_same_seat_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut svc = service_in(&dir);
        svc.book_seat_at(BookingRequest::new("Asha", 1, 1, false), at(18, 0, 0))
            .unwrap();

        let err = svc
            .book_seat_at(BookingRequest::new("Ben", 1, 1, false), at(18, 1, 0))
            .unwrap_err();

        assert!(matches!(err, BookingError::SeatUnavailable { row: 1, seat: 1 }));
        assert_eq!(svc.store().load().unwrap().len(), 1);
    }

    #[test]
    fn out_of_range_seat_is_invalid() {
        let dir = TempDir::new().unwrap();
        let mut svc = service_in(&dir);

        for (row, seat) in [(6, 1), (0, 1), (1, 0), (1, 11)] {
            let err = svc
                .book_seat_at(BookingRequest::new("Asha", row, seat, false), at(18, 0, 0))
                .unwrap_err();
            assert!(
                matches!(err, BookingError::InvalidSeat { .. }),
                "({row}, {seat}) gave {err:?}"
            );
        }
        assert!(!svc.store().path().exists());
    }

    #[test]
    fn blank_name_is_rejected_before_marking() {
        let dir = TempDir::new().unwrap();
        let mut svc = service_in(&dir);

        let err = svc
            .book_seat_at(BookingRequest::new("  ", 3, 3, false), at(18, 0, 0))
            .unwrap_err();

        assert!(matches!(err, BookingError::InvalidName));
        assert!(svc.grid().is_open(3, 3));
    }

    #[test]
    fn quote_checks_without_reserving() {
        let dir = TempDir::new().unwrap();
        let mut svc = service_in(&dir);

        assert_eq!(svc.quote(1, 5, true).unwrap(), 120);
        assert!(svc.grid().is_open(1, 5));

        svc.book_seat_at(BookingRequest::new("Asha", 1, 5, true), at(18, 0, 0))
            .unwrap();
        assert!(matches!(
            svc.quote(1, 5, true),
            Err(BookingError::SeatUnavailable { .. })
        ));
        assert!(matches!(
            svc.quote(9, 9, false),
            Err(BookingError::InvalidSeat { .. })
        ));
    }

    #[test]
    fn failed_append_reopens_seat() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(BookingStore::new(dir.path().join("nope").join("bookings.csv")));

        let err = svc
            .book_seat_at(BookingRequest::new("Asha", 2, 2, false), at(18, 0, 0))
            .unwrap_err();

        assert!(matches!(err, BookingError::Store(StoreError::Write { .. })));
        assert!(svc.grid().is_open(2, 2));
        assert_eq!(svc.grid().booked_count(), 0);
    }

    #[test]
    fn replay_ignores_out_of_range_and_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookings.csv");
        fs::write(
            &path,
            "name,row,seat,is_student,price,timestamp\r\n\
             Asha,1,1,no,150,2024-03-09 18:00:00\r\n\
             Ghost,9,9,no,100,2024-03-09 18:01:00\r\n\
             Twin,1,1,no,150,2024-03-09 18:02:00\r\n\
             Ben,2,1,yes,80,2024-03-09 18:03:00\r\n",
        )
        .unwrap();

        let svc = service(BookingStore::new(path));

        assert_eq!(svc.grid().booked_count(), 2);
        assert!(!svc.grid().is_open(1, 1));
        assert!(!svc.grid().is_open(2, 1));
    }

    #[test]
    fn odd_trailing_fields_still_hold_the_seat() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookings.csv");
        fs::write(
            &path,
            "name,row,seat,is_student,price,timestamp\r\n\
             Asha,3,4,Yes,80,2024-03-09 18:00:00\r\n\
             Ben,3,5,no,80.0,2024-03-09 18:01:00\r\n\
             Cy,3,6,no,100,2024-03-09T18:00:00\r\n",
        )
        .unwrap();

        let mut svc = service(BookingStore::new(path));

        assert_eq!(svc.grid().booked_count(), 3);
        for seat in 4..=6 {
            assert!(!svc.grid().is_open(3, seat), "seat {seat} should be booked");
        }
        let err = svc
            .book_seat_at(BookingRequest::new("Dee", 3, 4, false), at(19, 0, 0))
            .unwrap_err();
        assert!(matches!(err, BookingError::SeatUnavailable { row: 3, seat: 4 }));
    }

    #[test]
    fn timestamp_is_truncated_to_seconds() {
        let dir = TempDir::new().unwrap();
        let mut svc = service_in(&dir);
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(18, 0, 0, 999_999)
            .unwrap();

        let record = svc
            .book_seat_at(BookingRequest::new("Asha", 4, 4, false), now)
            .unwrap();

        assert_eq!(record.timestamp, at(18, 0, 0));
    }
}
