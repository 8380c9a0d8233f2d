//! ==============================================================================
//! source.rs - temperature sources
//! ==============================================================================
//!
//! purpose:
//!     abstracts where a tick's temperature comes from. the dashboard only
//!     ships a simulated source; there is no hardware path.
//!
//! implementations:
//!     - UniformSource: uniform random draw in [min, max] (the simulation)
//!     - FixedSequence: replays a fixed list, for deterministic scenarios
//!
//! ==============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::distr::uniform::{self, Uniform};
use rand::distr::Distribution;

pub const DEFAULT_MIN_TEMPERATURE: f64 = 65.0;
pub const DEFAULT_MAX_TEMPERATURE: f64 = 85.0;

pub trait TemperatureSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// uniform draw over an inclusive range
///
/// the distribution is validated once on construction, so `sample` cannot
/// fail inside the generator loop
#[derive(Debug, Clone, Copy)]
pub struct UniformSource {
    distribution: Uniform<f64>,
}

impl UniformSource {
    /// rejects reversed bounds, non-finite bounds and ranges whose width
    /// overflows `f64`
    pub fn new(min: f64, max: f64) -> Result<Self, uniform::Error> {
        Ok(Self {
            distribution: Uniform::new_inclusive(min, max)?,
        })
    }
}

impl TemperatureSource for UniformSource {
    fn sample(&self) -> f64 {
        self.distribution.sample(&mut rand::rng())
    }
}

/// cycles through a fixed list of temperatures
#[derive(Debug)]
pub struct FixedSequence {
    values: Vec<f64>,
    next: AtomicUsize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            next: AtomicUsize::new(0),
        }
    }
}

impl TemperatureSource for FixedSequence {
    fn sample(&self) -> f64 {
        if self.values.is_empty() {
            return DEFAULT_MIN_TEMPERATURE;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[index]
    }
}
