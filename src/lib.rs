pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod services;
pub mod console;

use std::io::{BufRead, Write};

use crate::{console::Console, services::BookingService};

// Всё состояние приложения: создаётся один раз в main и передаётся по ссылке
pub struct AppState {
    pub config: config::Config,
    pub booking: BookingService,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        let booking = BookingService::open(&config);
        Self { config, booking }
    }

    /// Runs the interactive menu against the given input and output.
    pub fn run_console<R: BufRead, W: Write>(&mut self, input: R, output: W) -> std::io::Result<()> {
        Console::new(input, output).run(&mut self.booking)
    }
}
