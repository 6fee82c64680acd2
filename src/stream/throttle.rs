//! Latest-wins stream throttling
//!
//! Subscriptions at coarse refresh rates sit on top of a faster source; the
//! combinator here gates emission on a timer and drops every stale item in
//! between. A schedule view polling every ten seconds wants the freshest
//! classification at each tick, not a backlog of nine identical ones.

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Extension trait to add throttling to any Stream
pub trait ThrottleExt: Stream {
    /// Throttle the stream to emit at most once per interval
    ///
    /// Latest-wins semantics: when several items arrive within one interval,
    /// only the most recent one is emitted.
    fn throttle(self, min_gap: Duration) -> Throttle<Self>
    where
        Self: Sized,
    {
        Throttle::new(self, min_gap)
    }
}

impl<T: Stream> ThrottleExt for T {}

pin_project! {
    /// A stream combinator that caps emission rate, keeping the latest item
    pub struct Throttle<S: Stream> {
        #[pin]
        inner: S,
        gate: Interval,
        held: Option<S::Item>,
    }
}

impl<S: Stream> Throttle<S> {
    /// Create a new throttled stream
    pub fn new(inner: S, min_gap: Duration) -> Self {
        let mut gate = interval(min_gap);
        // A stalled consumer should not be repaid with a burst of ticks.
        gate.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self { inner, gate, held: None }
    }
}

impl<S: Stream> Stream for Throttle<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        ready!(this.gate.poll_tick(cx));

        // Drain whatever queued up during the gap; only the newest survives.
        loop {
            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => *this.held = Some(item),
                Poll::Ready(None) => return Poll::Ready(this.held.take()),
                Poll::Pending => return Poll::Ready(this.held.take()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn throttle_keeps_only_the_latest_item() {
        let source = futures::stream::iter(1..=100);
        let mut throttled = source.throttle(Duration::from_millis(1));

        // All 100 items are immediately ready, so the first gated poll drains
        // them and yields the newest.
        assert_eq!(throttled.next().await, Some(100));
        assert_eq!(throttled.next().await, None);
    }

    #[tokio::test]
    async fn throttle_passes_through_end_of_stream() {
        let source = futures::stream::iter(std::iter::empty::<u32>());
        let mut throttled = source.throttle(Duration::from_millis(1));
        assert_eq!(throttled.next().await, None);
    }
}
