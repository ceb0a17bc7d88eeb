//! Runtime settings loaded from the environment (and an optional `.env`).
//!
//! | Variable        | Meaning                                | Default |
//! |-----------------|----------------------------------------|---------|
//! | `CURE_LOG`      | tracing filter when `RUST_LOG` is unset | `warn`  |
//! | `CURE_SAMPLES`  | working-curve sample count             | `1000`  |
//! | `CURE_LAYERS`   | layers summed for cumulative exposure  | `1000`  |
//! | `CURE_SERIES`   | `sum` or `closed-form`                 | `sum`   |
//!
//! CLI flags override these values.

use std::str::FromStr;

use clap::ValueEnum;

use crate::domain::{DEFAULT_LAYERS, DEFAULT_SAMPLE_COUNT, Summation};
use crate::error::{AppError, EXIT_USAGE};
use crate::math::SeriesMethod;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_filter: String,
    pub sample_count: usize,
    pub layers: usize,
    pub series: SeriesMethod,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            layers: DEFAULT_LAYERS,
            series: SeriesMethod::Sum,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let log_filter = lookup("CURE_LOG").unwrap_or(defaults.log_filter);
        let sample_count = parse_var(&lookup, "CURE_SAMPLES", defaults.sample_count)?;
        let layers = parse_var(&lookup, "CURE_LAYERS", defaults.layers)?;
        let series = match lookup("CURE_SERIES") {
            Some(raw) => <SeriesMethod as ValueEnum>::from_str(raw.trim(), true)
                .map_err(|_| AppError::new(EXIT_USAGE, format!("CURE_SERIES must be `sum` or `closed-form`, got '{raw}'.")))?,
            None => defaults.series,
        };

        if sample_count == 0 {
            return Err(AppError::new(EXIT_USAGE, "CURE_SAMPLES must be at least 1."));
        }
        if layers == 0 {
            return Err(AppError::new(EXIT_USAGE, "CURE_LAYERS must be at least 1."));
        }

        Ok(Self {
            log_filter,
            sample_count,
            layers,
            series,
        })
    }

    pub fn summation(&self) -> Summation {
        Summation {
            layers: self.layers,
            method: self.series,
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid {key} '{raw}': {e}"))),
        None => Ok(default),
    }
}
