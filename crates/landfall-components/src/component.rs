//! The component contract shared by every scenario element.
//!
//! A component has three faces:
//!
//! - a **vector** face: a fixed-length, fixed-order `Vec<f64>` used by
//!   genetic search, with no embedded type or length tag;
//! - a **record** face: a named-key JSON value used for durable storage;
//! - an **operator** face: in-place [`mutate`](Component::mutate) and pure
//!   two-parent [`crossover`](Component::crossover).
//!
//! # Mutation policy
//!
//! Each continuous field group (a position, the weather channels, the time
//! fractions) shares one trigger draw `u ~ U[0, 1)` and mutates when
//! `u <= rate`. Each discrete field (marker id, actor kind, actor mode) has its
//! own independent trigger and, when it fires, is resampled uniformly from its
//! legal set rather than perturbed.
//!
//! # Crossover
//!
//! The default crossover is single-point on the vector encoding, split at
//! `len / 2` (rounded down). See [`split_point_crossover`].

use rand::Rng;

use crate::error::{DecodeError, DomainError};

/// Capability set implemented by every scenario component.
pub trait Component: Sized {
    /// Human-readable component name used in error messages.
    const NAME: &'static str;

    /// Number of reals in the vector encoding. Constant per type.
    const VECTOR_LEN: usize;

    /// Flatten every numeric field in a fixed order.
    fn to_vector(&self) -> Vec<f64>;

    /// Exact inverse of [`to_vector`](Self::to_vector).
    ///
    /// Fails if `values` does not hold exactly [`VECTOR_LEN`](Self::VECTOR_LEN)
    /// reals or if any slot is outside its field's domain.
    fn from_vector(values: &[f64]) -> Result<Self, DecodeError>;

    /// Structured record with stable key names.
    fn to_record(&self) -> serde_json::Value;

    /// Inverse of [`to_record`](Self::to_record).
    fn from_record(record: &serde_json::Value) -> Result<Self, DecodeError>;

    /// Stochastically perturb the component in place.
    ///
    /// `rate` is the per-trigger probability and must lie in `[0, 1]`.
    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError>;

    /// Combine two parents into two children.
    ///
    /// Children are freshly decoded values; neither parent is touched.
    fn crossover(first: &Self, second: &Self) -> Result<(Self, Self), DomainError> {
        let (left, right) =
            split_point_crossover(Self::NAME, &first.to_vector(), &second.to_vector())?;
        let decode = |values: &[f64]| {
            Self::from_vector(values).map_err(|source| DomainError::Recombination {
                component: Self::NAME,
                source,
            })
        };
        Ok((decode(&left)?, decode(&right)?))
    }
}

/// Single-point crossover of two equal-length vectors.
///
/// With `h = len / 2`, returns `(first[..h] ++ second[h..], second[..h] ++ first[h..])`.
pub fn split_point_crossover(
    component: &'static str,
    first: &[f64],
    second: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), DomainError> {
    if first.is_empty() || second.is_empty() {
        return Err(DomainError::EmptyVector { component });
    }
    if first.len() != second.len() {
        return Err(DomainError::LengthMismatch {
            component,
            left: first.len(),
            right: second.len(),
        });
    }

    let half = first.len().checked_div(2).unwrap_or_default();
    let (first_head, first_tail) = first.split_at(half);
    let (second_head, second_tail) = second.split_at(half);

    Ok((
        [first_head, second_tail].concat(),
        [second_head, first_tail].concat(),
    ))
}

/// Reject rates that are not probabilities (including NaN).
pub fn check_rate(rate: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(DomainError::InvalidRate { rate })
    }
}

/// Draw one trigger: `u ~ U[0, 1)` fires when `u <= rate`.
pub fn fires(rate: f64, rng: &mut impl Rng) -> bool {
    rng.random::<f64>() <= rate
}

/// Check a vector's length and move it into a fixed-size array.
pub(crate) fn fixed<const N: usize>(
    component: &'static str,
    values: &[f64],
) -> Result<[f64; N], DecodeError> {
    <[f64; N]>::try_from(values)
        .ok()
        .ok_or(DecodeError::LengthMismatch {
            component,
            expected: N,
            actual: values.len(),
        })
}

/// Require a finite real.
pub(crate) fn finite(
    component: &'static str,
    field: &'static str,
    value: f64,
) -> Result<f64, DecodeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DecodeError::OutOfDomain {
            component,
            field,
            value,
            expected: "a finite number",
        })
    }
}

/// Require a real within `[min, max]`.
pub(crate) fn within(
    component: &'static str,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) -> Result<f64, DecodeError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::OutOfDomain {
            component,
            field,
            value,
            expected,
        })
    }
}

/// Require a whole number in `[0, max]` and convert it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn whole(
    component: &'static str,
    field: &'static str,
    value: f64,
    max: u32,
    expected: &'static str,
) -> Result<u32, DecodeError> {
    let valid = (0.0..=f64::from(max)).contains(&value) && value.fract().abs() <= 0.0;
    if valid {
        // Range and integrality checked above, so the cast is exact.
        Ok(value as u32)
    } else {
        Err(DecodeError::OutOfDomain {
            component,
            field,
            value,
            expected,
        })
    }
}

/// Deserialize a typed record out of a JSON value.
pub(crate) fn record<T: serde::de::DeserializeOwned>(
    component: &'static str,
    value: &serde_json::Value,
) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|source| DecodeError::Record { component, source })
}
