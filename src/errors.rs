/*!
 * Error Types
 *
 * Counter-contract violations surfaced by the fallible wait-group API
 */

use thiserror::Error;

/// Result type for fallible wait-group operations
pub type WaitGroupResult<T> = Result<T, WaitGroupError>;

/// Wait-group usage errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitGroupError {
    /// `done` was called more times than `add` ever accounted for
    #[error("counter underflow: delta {delta} drives count {count} below zero")]
    CounterUnderflow {
        /// Counter value before the offending add
        count: i64,
        /// Delta that would have driven it negative
        delta: i64,
    },
}
