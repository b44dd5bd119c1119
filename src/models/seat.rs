use std::fmt;

use crate::error::GridError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Open,
    Booked,
}

impl SeatState {
    pub fn marker(self) -> char {
        match self {
            SeatState::Open => 'O',
            SeatState::Booked => 'X',
        }
    }
}

/// Fixed-size seating chart.
///
/// Addresses are 1-based `(row, seat)` pairs at the public boundary; cells are
/// stored row-major in a flat vector. Dimensions never change after `new`.
#[derive(Debug, Clone)]
pub struct SeatGrid {
    rows: u32,
    cols: u32,
    cells: Vec<SeatState>,
}

impl SeatGrid {
    /// Creates an all-open grid. Zero dimensions are rejected by config validation
    /// before this is reached.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            cells: vec![SeatState::Open; rows as usize * cols as usize],
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn is_valid_address(&self, row: u32, seat: u32) -> bool {
        (1..=self.rows).contains(&row) && (1..=self.cols).contains(&seat)
    }

    /// Out-of-range addresses are reported as not available rather than as errors.
    pub fn is_open(&self, row: u32, seat: u32) -> bool {
        self.state(row, seat) == Some(SeatState::Open)
    }

    pub fn state(&self, row: u32, seat: u32) -> Option<SeatState> {
        self.index(row, seat).map(|i| self.cells[i])
    }

    pub fn mark_booked(&mut self, row: u32, seat: u32) -> Result<(), GridError> {
        let i = self.index(row, seat).ok_or(GridError::InvalidSeat { row, seat })?;
        if self.cells[i] == SeatState::Booked {
            return Err(GridError::AlreadyBooked { row, seat });
        }
        self.cells[i] = SeatState::Booked;
        Ok(())
    }

    // Только для отката неудачной записи в файл
    pub(crate) fn release(&mut self, row: u32, seat: u32) {
        if let Some(i) = self.index(row, seat) {
            self.cells[i] = SeatState::Open;
        }
    }

    pub fn booked_count(&self) -> usize {
        self.cells.iter().filter(|s| **s == SeatState::Booked).count()
    }

    pub fn open_count(&self) -> usize {
        self.cells.len() - self.booked_count()
    }

    /// Human-readable chart: a header of seat numbers, a rule, then one line per row.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn index(&self, row: u32, seat: u32) -> Option<usize> {
        if !self.is_valid_address(row, seat) {
            return None;
        }
        Some((row as usize - 1) * self.cols as usize + (seat as usize - 1))
    }
}

impl fmt::Display for SeatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (1..=self.cols).map(|c| format!("{c:>2}")).collect();
        writeln!(f, "    {}", header.join(" "))?;
        writeln!(f, "   {}", "---".repeat(self.cols as usize))?;
        for row in 1..=self.rows {
            let start = (row as usize - 1) * self.cols as usize;
            let cells: Vec<String> = self.cells[start..start + self.cols as usize]
                .iter()
                .map(|s| format!(" {}", s.marker()))
                .collect();
            writeln!(f, "{:<3}|{}", format!("R{row}"), cells.join(" "))?;
        }
        Ok(())
    }
}
