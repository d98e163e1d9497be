use std::cmp;
use std::time::Duration;

use rand::Rng;

/// Returns false once the exponential backoff window (`min * tries^2`,
/// capped at `max`) has elapsed — the caller should stop retrying.
#[inline]
#[must_use]
pub fn continue_exponential_backoff_secs(min: u64, max: u64, elapsed: Duration, tries: u32) -> bool {
	continue_exponential_backoff(Duration::from_secs(min), Duration::from_secs(max), elapsed, tries)
}

#[inline]
#[must_use]
pub fn continue_exponential_backoff(min: Duration, max: Duration, elapsed: Duration, tries: u32) -> bool {
	let window = min.saturating_mul(tries).saturating_mul(tries);
	let window = cmp::min(window, max);
	elapsed < window
}

/// Jittered delay before the next poller retry: the exponential window
/// capped at `max`, plus up to 20% random jitter so many pollers woken by
/// the same upstream outage don't retry in lockstep.
#[must_use]
pub fn next_retry_delay(min: Duration, max: Duration, tries: u32) -> Duration {
	let window = min.saturating_mul(tries.max(1)).saturating_mul(tries.max(1));
	let window = cmp::min(window, max);
	let jitter_ms = rand::thread_rng().gen_range(0..=(window.as_millis() as u64 / 5).max(1));
	window.saturating_add(Duration::from_millis(jitter_ms))
}
