//! Delivery of trial results from the background loop to the host.
//!
//! Delivery is fire-and-forget: the loop never waits on an observer and never
//! learns whether anyone was listening.

use tokio::sync::mpsc;

use crusher_types::{Draw, TrialEvent, WeekCount};

/// Receives the loop's notifications on the loop's own thread.
pub trait TrialObserver: Send + 'static {
    /// A week was played.
    fn on_tick(&mut self, weeks: WeekCount, draw: &Draw, matches: usize);

    /// The ticket came up in full. Last call of the run.
    fn on_win(&mut self, weeks: WeekCount, matches: usize);

    /// The run was cancelled. Last call of the run.
    fn on_stop(&mut self, weeks: WeekCount);
}

/// Observer assembled from three closures.
pub struct CallbackObserver<T, W, S> {
    on_tick: T,
    on_win: W,
    on_stop: S,
}

impl<T, W, S> CallbackObserver<T, W, S>
where
    T: FnMut(WeekCount, &Draw, usize) + Send + 'static,
    W: FnMut(WeekCount, usize) + Send + 'static,
    S: FnMut(WeekCount) + Send + 'static,
{
    pub fn new(on_tick: T, on_win: W, on_stop: S) -> Self {
        Self {
            on_tick,
            on_win,
            on_stop,
        }
    }
}

impl<T, W, S> TrialObserver for CallbackObserver<T, W, S>
where
    T: FnMut(WeekCount, &Draw, usize) + Send + 'static,
    W: FnMut(WeekCount, usize) + Send + 'static,
    S: FnMut(WeekCount) + Send + 'static,
{
    fn on_tick(&mut self, weeks: WeekCount, draw: &Draw, matches: usize) {
        (self.on_tick)(weeks, draw, matches);
    }

    fn on_win(&mut self, weeks: WeekCount, matches: usize) {
        (self.on_win)(weeks, matches);
    }

    fn on_stop(&mut self, weeks: WeekCount) {
        (self.on_stop)(weeks);
    }
}

/// Forwards every notification as a [`TrialEvent`] over an unbounded channel.
///
/// The UI drains the receiver once per frame. A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<TrialEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<TrialEvent>) -> Self {
        Self { tx }
    }

    /// Observer plus the receiving end it feeds.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TrialEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: TrialEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Trial event dropped: receiver closed");
        }
    }
}

impl TrialObserver for ChannelObserver {
    fn on_tick(&mut self, weeks: WeekCount, draw: &Draw, matches: usize) {
        self.send(TrialEvent::Tick {
            weeks,
            draw: draw.clone(),
            matches,
        });
    }

    fn on_win(&mut self, weeks: WeekCount, matches: usize) {
        self.send(TrialEvent::Won { weeks, matches });
    }

    fn on_stop(&mut self, weeks: WeekCount) {
        self.send(TrialEvent::Stopped { weeks });
    }
}
