//! Ambient weather: nine independent intensity channels.
//!
//! Vector layout (9), in [`CHANNEL_NAMES`] order.
//!
//! Decoding accepts any channel in `[0, 1]`, the range the world itself
//! understands. Mutation keeps channels in the narrower `[0, 0.5]` band so
//! evolved scenarios stay drivable.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::component::{Component, check_rate, fires, fixed, record, within};
use crate::error::{DecodeError, DomainError};

/// Channel names in vector order. These are also the record keys.
pub const CHANNEL_NAMES: [&str; 9] = [
    "rain",
    "road_wetness",
    "snow",
    "road_snow",
    "maple_leaf",
    "road_leaf",
    "dust",
    "fog",
    "wind",
];

/// Largest per-channel change applied by one mutation.
pub const CHANNEL_STEP: f64 = 0.1;

/// Upper clamp applied by mutation.
pub const MUTATION_CEILING: f64 = 0.5;

/// Weather intensities, each nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Weather {
    /// Falling rain.
    pub rain: f64,
    /// Standing water on roads.
    pub road_wetness: f64,
    /// Falling snow.
    pub snow: f64,
    /// Snow cover on roads.
    pub road_snow: f64,
    /// Falling leaves.
    pub maple_leaf: f64,
    /// Leaf cover on roads.
    pub road_leaf: f64,
    /// Airborne dust.
    pub dust: f64,
    /// Fog density.
    pub fog: f64,
    /// Wind strength.
    pub wind: f64,
}

impl Weather {
    /// All channels at zero.
    pub const CALM: Self = Self::uniform(0.0);

    /// Every channel set to the same intensity.
    pub const fn uniform(intensity: f64) -> Self {
        Self::from_channels([intensity; 9])
    }

    /// Build from channels in [`CHANNEL_NAMES`] order. No range checks.
    pub const fn from_channels(channels: [f64; 9]) -> Self {
        let [rain, road_wetness, snow, road_snow, maple_leaf, road_leaf, dust, fog, wind] =
            channels;
        Self {
            rain,
            road_wetness,
            snow,
            road_snow,
            maple_leaf,
            road_leaf,
            dust,
            fog,
            wind,
        }
    }

    /// Channels in [`CHANNEL_NAMES`] order.
    pub const fn channels(&self) -> [f64; 9] {
        [
            self.rain,
            self.road_wetness,
            self.snow,
            self.road_snow,
            self.maple_leaf,
            self.road_leaf,
            self.dust,
            self.fog,
            self.wind,
        ]
    }

    /// Add `delta` channel-wise and clamp each channel to `[0, 0.5]`.
    pub fn nudge(&mut self, delta: [f64; 9]) {
        let mut channels = self.channels();
        for (channel, d) in channels.iter_mut().zip(delta) {
            *channel = (*channel + d).clamp(0.0, MUTATION_CEILING);
        }
        *self = Self::from_channels(channels);
    }

    fn validate(self) -> Result<Self, DecodeError> {
        for (field, value) in CHANNEL_NAMES.into_iter().zip(self.channels()) {
            within(Self::NAME, field, value, 0.0, 1.0, "an intensity in [0, 1]")?;
        }
        Ok(self)
    }
}

impl Component for Weather {
    const NAME: &'static str = "weather";
    const VECTOR_LEN: usize = 9;

    fn to_vector(&self) -> Vec<f64> {
        self.channels().to_vec()
    }

    fn from_vector(values: &[f64]) -> Result<Self, DecodeError> {
        Self::from_channels(fixed(Self::NAME, values)?).validate()
    }

    fn to_record(&self) -> serde_json::Value {
        CHANNEL_NAMES
            .into_iter()
            .zip(self.channels())
            .map(|(name, value)| (name.to_owned(), value.into()))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }

    fn from_record(value: &serde_json::Value) -> Result<Self, DecodeError> {
        record::<Self>(Self::NAME, value)?.validate()
    }

    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError> {
        check_rate(rate)?;
        if fires(rate, rng) {
            let delta = std::array::from_fn(|_| rng.random_range(-CHANNEL_STEP..=CHANNEL_STEP));
            self.nudge(delta);
        }
        Ok(())
    }
}
