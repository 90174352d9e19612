//! Time of day as two fractions.
//!
//! Vector layout (2): `[hour, minute]`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::component::{Component, check_rate, fires, fixed, record, within};
use crate::error::{DecodeError, DomainError};

/// Largest change applied to either fraction by one mutation.
pub const FRACTION_STEP: f64 = 0.1;

/// Hour-of-day and minute-of-hour, each a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Fraction of the day.
    pub hour: f64,
    /// Fraction of the hour.
    pub minute: f64,
}

impl TimeOfDay {
    /// Create a time of day. No range checks.
    pub const fn new(hour: f64, minute: f64) -> Self {
        Self { hour, minute }
    }

    /// Add the deltas and clamp both fractions to `[0, 1]`.
    pub fn nudge(&mut self, hour_delta: f64, minute_delta: f64) {
        self.hour = (self.hour + hour_delta).clamp(0.0, 1.0);
        self.minute = (self.minute + minute_delta).clamp(0.0, 1.0);
    }

    /// Wall-clock `(hour, minute)`, capped at `(23, 59)`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clock_time(&self) -> (u8, u8) {
        // Clamped to [0, 23] / [0, 59] before the cast.
        let hour = (self.hour * 24.0).floor().clamp(0.0, 23.0) as u8;
        let minute = (self.minute * 60.0).floor().clamp(0.0, 59.0) as u8;
        (hour, minute)
    }

    fn validate(self) -> Result<Self, DecodeError> {
        within(Self::NAME, "hour", self.hour, 0.0, 1.0, "a fraction in [0, 1]")?;
        within(Self::NAME, "minute", self.minute, 0.0, 1.0, "a fraction in [0, 1]")?;
        Ok(self)
    }
}

impl Component for TimeOfDay {
    const NAME: &'static str = "time";
    const VECTOR_LEN: usize = 2;

    fn to_vector(&self) -> Vec<f64> {
        vec![self.hour, self.minute]
    }

    fn from_vector(values: &[f64]) -> Result<Self, DecodeError> {
        let [hour, minute] = fixed(Self::NAME, values)?;
        Self::new(hour, minute).validate()
    }

    fn to_record(&self) -> serde_json::Value {
        serde_json::json!({ "hour": self.hour, "minute": self.minute })
    }

    fn from_record(value: &serde_json::Value) -> Result<Self, DecodeError> {
        record::<Self>(Self::NAME, value)?.validate()
    }

    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError> {
        check_rate(rate)?;
        if fires(rate, rng) {
            let hour_delta = rng.random_range(-FRACTION_STEP..=FRACTION_STEP);
            let minute_delta = rng.random_range(-FRACTION_STEP..=FRACTION_STEP);
            self.nudge(hour_delta, minute_delta);
        }
        Ok(())
    }
}
