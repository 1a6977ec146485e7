use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use thiserror::Error;

pub const DEFAULT_CRASH_PROBABILITY: f64 = 0.01;

#[derive(Error, Debug, PartialEq)]
#[error("Crash probability must be within 0 and 1, got {0}")]
pub struct InvalidProbability(pub f64);

/// Decides whether a vehicle crash happened with a fixed probability per trial.
pub struct CrashSimulator {
    probability: f64,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl CrashSimulator {
    pub fn new(probability: f64) -> Result<Self, InvalidProbability> {
        Self::with_rng(probability, StdRng::from_entropy())
    }

    /// Create a simulator drawing from the provided random number generator
    pub fn with_rng<R: RngCore + Send + 'static>(
        probability: f64,
        rng: R,
    ) -> Result<Self, InvalidProbability> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(InvalidProbability(probability));
        }
        Ok(Self {
            probability,
            rng: Mutex::new(Box::new(rng)),
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Run a single trial
    pub fn random_vehicle_crash(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen::<f64>() < self.probability
    }
}

impl Default for CrashSimulator {
    fn default() -> Self {
        Self {
            probability: DEFAULT_CRASH_PROBABILITY,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
        }
    }
}
