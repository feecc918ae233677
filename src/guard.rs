/*!
 * Work Guard
 *
 * RAII handle that releases one unit of pending work on drop
 */

use crate::group::WaitGroup;
use tracing::error;

/// RAII guard for one unit of pending work
///
/// Created by [`WaitGroup::work`], which increments the counter by one. The
/// matching `done` runs exactly once - either on
/// [`complete`](WorkGuard::complete) or when the guard drops - so the count
/// is released even if the unit of work unwinds.
#[derive(Debug)]
pub struct WorkGuard {
    group: Option<WaitGroup>,
}

impl WorkGuard {
    pub(crate) fn new(group: WaitGroup) -> Self {
        Self { group: Some(group) }
    }

    /// Release the unit of work before the guard goes out of scope
    pub fn complete(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(group) = self.group.take() {
            // Drop must not panic; log the contract violation instead
            if let Err(err) = group.try_done() {
                error!(error = %err, "work guard release drove the counter below zero");
            }
        }
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let wg = WaitGroup::new();

        {
            let _guard = wg.work();
            assert_eq!(wg.count(), 1);
        }

        assert_eq!(wg.count(), 0);
        wg.wait();
    }

    #[test]
    fn test_complete_is_single_shot() {
        let wg = WaitGroup::new();

        let guard = wg.work();
        assert_eq!(wg.count(), 1);
        guard.complete();

        assert_eq!(wg.count(), 0);
        wg.wait();
    }

    #[test]
    fn test_guard_releases_on_panic() {
        let wg = WaitGroup::new();
        let guard = wg.work();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = guard;
            panic!("unit of work failed");
        }));

        assert!(result.is_err());
        assert_eq!(wg.count(), 0);
        wg.wait();
    }
}
