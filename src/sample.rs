//! Sample input for code-assistant prompts
//!
//! Small, deliberately simple code used to exercise the explain/review/test
//! operations: a naive and a memoized Fibonacci, and a toy data processor.
//! It has no connection to the client.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Largest `n` whose Fibonacci number fits in a `u64`
pub const MAX_FIBONACCI_INPUT: u32 = 93;

/// Fibonacci number by plain recursion (exponential time)
///
/// `None` when the result does not fit in a `u64` (`n > 93`).
pub fn fibonacci(n: u32) -> Option<u64> {
    if n > MAX_FIBONACCI_INPUT {
        return None;
    }
    if n <= 1 {
        return Some(u64::from(n));
    }
    fibonacci(n - 1)?.checked_add(fibonacci(n - 2)?)
}

/// Fibonacci number with a memo table that lives for this call only
///
/// `None` when the result does not fit in a `u64` (`n > 93`).
pub fn fibonacci_memo(n: u32) -> Option<u64> {
    fn helper(x: u32, memo: &mut HashMap<u32, u64>) -> Option<u64> {
        if let Some(&cached) = memo.get(&x) {
            return Some(cached);
        }
        let result = if x <= 1 {
            u64::from(x)
        } else {
            helper(x - 1, memo)?.checked_add(helper(x - 2, memo)?)?
        };
        memo.insert(x, result);
        Some(result)
    }

    if n > MAX_FIBONACCI_INPUT {
        return None;
    }
    let mut memo = HashMap::new();
    helper(n, &mut memo)
}

/// Errors from [`DataProcessor::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("No data to validate")]
    Empty,
}

/// Holds a collection and pretends to process it
#[derive(Debug, Clone, PartialEq)]
pub struct DataProcessor {
    data: Vec<Value>,
    processed: bool,
}

impl DataProcessor {
    pub fn new(data: Vec<Value>) -> Self {
        Self {
            data,
            processed: false,
        }
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub const fn is_processed(&self) -> bool {
        self.processed
    }

    /// `Err` when empty, `Ok(false)` when any element is not a number
    pub fn validate(&self) -> Result<bool, DataError> {
        if self.data.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(self.data.iter().all(Value::is_number))
    }

    /// Placeholder: counts the elements and marks the data as processed
    // TODO: apply a real transformation once the sample needs one to explain
    pub fn process(&mut self) -> usize {
        self.processed = true;
        self.data.len()
    }
}
