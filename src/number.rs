use std::sync::{Mutex, PoisonError};

use lazy_static::lazy_static;

lazy_static! {
    static ref ID: IdGenerator = IdGenerator::new();
}

/// Hands out strictly increasing identifiers, starting after the lower bound.
#[derive(Debug, Default)]
pub struct IdGenerator {
    index: Mutex<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_after(0)
    }
    pub fn starting_after(lower_bound: i64) -> Self {
        Self {
            index: Mutex::new(lower_bound),
        }
    }
    pub fn generate(&self) -> i64 {
        let mut index = self.index.lock().unwrap_or_else(PoisonError::into_inner);
        *index += 1;
        *index
    }
    /// The last identifier handed out.
    pub fn current(&self) -> i64 {
        *self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Next identifier from the process-wide generator.
pub fn next_id() -> i64 {
    ID.generate()
}
