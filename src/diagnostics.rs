use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// A process-wide occurrence counter used to throttle a repeated `tracing::warn!` to
/// once every `every` calls, mirroring the source's `static int warnedCount` pattern.
/// Counts may race harmlessly across threads if a host engine ever parallelizes
/// collision passes (spec §5) — the exact count doesn't matter, only that the warning
/// doesn't spam.
pub struct ThrottledCounter {
    count: AtomicU64,
}

impl ThrottledCounter {
    const fn new() -> Self {
        Self { count: AtomicU64::new(0) }
    }

    /// Returns `true` on the calls where the warning should actually be logged.
    pub fn tick(&self, every: u64) -> bool {
        let prev = self.count.fetch_add(1, Ordering::Relaxed);
        every != 0 && prev % every == 0
    }
}

pub static DEGENERATE_FEATURE_WARNINGS: Lazy<ThrottledCounter> = Lazy::new(ThrottledCounter::new);
pub static PENETRATION_WARNINGS: Lazy<ThrottledCounter> = Lazy::new(ThrottledCounter::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_on_first_and_every_nth_call() {
        let counter = ThrottledCounter::new();
        let fired: Vec<bool> = (0..7).map(|_| counter.tick(3)).collect();
        assert_eq!(fired, vec![true, false, false, true, false, false, true]);
    }
}
