use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub theater: TheaterConfig,
    pub pricing: PricingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub rust_log: String,
    pub bookings_file: PathBuf,
}

// Размеры зала, фиксируются на старте
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TheaterConfig {
    #[validate(range(min = 1))]
    pub rows: u32,
    #[validate(range(min = 1))]
    pub seats_per_row: u32,
}

// Цены: неизменны на всё время работы процесса
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PricingConfig {
    #[validate(range(min = 1))]
    pub base_price: u32,
    pub front_row_extra: u32,
    #[validate(range(min = 0.0, exclusive_max = 1.0))]
    pub student_discount: f64,
}

impl Default for TheaterConfig {
    fn default() -> Self {
        Self { rows: 5, seats_per_row: 10 }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: 100,
            front_row_extra: 50,
            student_discount: 0.20,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config {
            app: AppConfig {
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "theater_booking=info".to_string()),
                bookings_file: env::var("BOOKINGS_FILE")
                    .unwrap_or_else(|_| "bookings.csv".to_string())
                    .into(),
            },
            theater: TheaterConfig {
                rows: parse_var("THEATER_ROWS", 5)?,
                seats_per_row: parse_var("THEATER_SEATS_PER_ROW", 10)?,
            },
            pricing: PricingConfig {
                base_price: parse_var("BASE_PRICE", 100)?,
                front_row_extra: parse_var("FRONT_ROW_EXTRA", 50)?,
                student_discount: parse_var("STUDENT_DISCOUNT", 0.20)?,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks grid and pricing bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.theater.validate()?;
        self.pricing.validate()?;
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar { name, value: raw }),
        Err(_) => Ok(default),
    }
}
