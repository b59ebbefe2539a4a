//! Unique names for sections, layouts and components.
//!
//! Every emitted object carries an 8-character `name`. Uniqueness is best
//! effort; callers needing reproducible output can inject [`SequentialIds`]
//! or a seeded [`RandomIds`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Length of every generated id.
pub const ID_LEN: usize = 8;

/// Source of unique names.
pub trait IdSource: Send + Sync {
    /// Produce the next id.
    fn next_id(&self) -> String;
}

/// Random lowercase hex ids.
#[derive(Debug)]
pub struct RandomIds {
    rng: Mutex<fastrand::Rng>,
}

impl RandomIds {
    /// Create a generator seeded from the environment.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Create a generator with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIds {
    fn next_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        std::iter::repeat_with(|| rng.digit(16)).take(ID_LEN).collect()
    }
}

/// Zero-padded hex counter: `00000001`, `00000002`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    /// Create a counter starting at 1.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:08x}", n & 0xffff_ffff)
    }
}
