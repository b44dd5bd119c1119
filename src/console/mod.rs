//! Interactive menu on top of [`BookingService`].
//!
//! Reads answers line by line from any `BufRead` and writes prompts to any `Write`,
//! so the loop runs the same against a terminal or an in-memory script. End of
//! input is treated as choosing Exit.

pub mod ticket;

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{
    error::BookingError,
    models::BookingRequest,
    services::BookingService,
};

pub use ticket::render_ticket;

pub struct Console<R, W> {
    input: R,
    output: W,
}

// Результат одного пункта меню
enum Step {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// Booking failures are printed and the menu continues; only terminal I/O
    /// errors end the loop early.
    pub fn run(&mut self, service: &mut BookingService) -> io::Result<()> {
        writeln!(self.output, "Welcome to the Movie Ticket Booking System")?;

        loop {
            writeln!(self.output, "\nChoose an option:")?;
            writeln!(self.output, "1) Show seating chart")?;
            writeln!(self.output, "2) Book a seat")?;
            writeln!(self.output, "3) Exit")?;

            let Some(choice) = self.prompt("Enter choice (1-3): ")? else {
                break;
            };

            let step = match choice.as_str() {
                "1" => {
                    self.show_chart(service)?;
                    Step::Continue
                }
                "2" => self.book(service)?,
                "3" => break,
                _ => {
                    writeln!(self.output, "Invalid option, enter 1, 2 or 3.")?;
                    Step::Continue
                }
            };
            if let Step::Exit = step {
                break;
            }
        }

        writeln!(self.output, "Goodbye, thank you!")?;
        self.output.flush()
    }

    fn show_chart(&mut self, service: &BookingService) -> io::Result<()> {
        let grid = service.grid();
        writeln!(self.output, "\nSeating chart (O = open, X = booked)")?;
        write!(self.output, "{}", grid.render())?;
        writeln!(
            self.output,
            "{} open, {} booked\n",
            grid.open_count(),
            grid.booked_count()
        )
    }

    fn book(&mut self, service: &mut BookingService) -> io::Result<Step> {
        self.show_chart(service)?;
        let (rows, cols) = (service.grid().rows(), service.grid().cols());

        let Some(name) = self.prompt("Enter your name: ")? else {
            return Ok(Step::Exit);
        };
        if name.is_empty() {
            self.report(&BookingError::InvalidName)?;
            return Ok(Step::Continue);
        }

        let Some(row) = self.prompt(&format!("Enter row (1-{rows}): "))? else {
            return Ok(Step::Exit);
        };
        let Ok(row) = row.parse::<u32>() else {
            writeln!(self.output, "Error: row must be a whole number.")?;
            return Ok(Step::Continue);
        };

        let Some(seat) = self.prompt(&format!("Enter seat (1-{cols}): "))? else {
            return Ok(Step::Exit);
        };
        let Ok(seat) = seat.parse::<u32>() else {
            writeln!(self.output, "Error: seat must be a whole number.")?;
            return Ok(Step::Continue);
        };

        let Some(student) = self.prompt("Are you a student? (y/n): ")? else {
            return Ok(Step::Exit);
        };
        let is_student = is_yes(&student);

        let price = match service.quote(row, seat, is_student) {
            Ok(price) => price,
            Err(e) => {
                self.report(&e)?;
                return Ok(Step::Continue);
            }
        };

        let question = format!("Confirm booking Row {row} Seat {seat}, price {price}. Confirm? (y/n): ");
        let Some(confirm) = self.prompt(&question)? else {
            return Ok(Step::Exit);
        };
        if !is_yes(&confirm) {
            writeln!(self.output, "Booking cancelled.")?;
            return Ok(Step::Continue);
        }

        match service.book_seat(BookingRequest::new(name, row, seat, is_student)) {
            Ok(booking) => {
                writeln!(self.output, "\nBooking successful!")?;
                writeln!(self.output, "{}", render_ticket(&booking))?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(Step::Continue)
    }

    fn report(&mut self, err: &BookingError) -> io::Result<()> {
        debug!("Booking rejected: {:?}", err);
        writeln!(self.output, "Error: {err}")
    }

    /// Prints `text` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}
