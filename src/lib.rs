/*!
 * WaitGroup Synchronization Primitive
 *
 * A counting primitive that lets one coordinator wait for an arbitrary set
 * of concurrently running tasks to finish, without tracking individual task
 * identities.
 *
 * # Architecture
 *
 * - Lock-free atomic counter on the `add`/`done` hot path
 * - One-shot broadcast gate, lazily created per wait cycle and replaced
 *   (never reset) on each zero crossing
 * - A short-held mutex protects only the gate swap, never the counter and
 *   never a blocking wait
 *
 * # Design
 *
 * Unlike the classic wait-group contract, `add` with a positive delta is
 * valid at any time - including after the counter already reached zero and
 * a previous `wait` returned. Each zero crossing closes and discards the
 * current gate, so waiters from a finished cycle can never be confused with
 * the next one.
 *
 * # Use Cases
 *
 * - **Task fan-out**: spawn N workers, block until all have finished
 * - **Graceful shutdown**: drain outstanding requests before tearing down
 * - **Phased pipelines**: reuse one group across successive batches
 */

mod errors;
mod gate;
mod group;
mod guard;

pub use errors::{WaitGroupError, WaitGroupResult};
pub use group::WaitGroup;
pub use guard::WorkGuard;
