//! Global busy-indicator state machine.
//!
//! DESIGN
//! ======
//! Three independent inputs are OR-ed into one derived `visible` boolean
//! published on a watch channel: an explicit "show me" flag set by the
//! navigation guard, an in-flight request counter maintained by the request
//! layer, and a minimum-visible-duration flag driven by a cancellable
//! timer. The timer is the debounce: once the indicator shows, it stays up
//! for at least the configured window even if the work finished instantly,
//! so fast responses never flicker it.
//!
//! ORDERING
//! ========
//! All flag mutation happens under one mutex and `visible` is recomputed
//! before the lock is released, so observers never see a torn intermediate
//! state. The mutex is leaf-level and never held across an await. A pending
//! disarm timer is both aborted and epoch-checked: abort alone is not
//! enough, because a task whose sleep already expired can run its tail
//! despite the abort.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;

struct State {
    explicit: bool,
    in_flight: u32,
    counting: bool,
    /// Pending disarm task, if any. At most one per signal.
    timer: Option<AbortHandle>,
    /// Bumped on every arm/disarm; a disarm task only applies its clear if
    /// the epoch still matches the one it was spawned with.
    timer_epoch: u64,
}

impl State {
    fn visible(&self) -> bool {
        self.explicit || self.in_flight > 0 || self.counting
    }
}

struct Inner {
    state: Mutex<State>,
    visible_tx: watch::Sender<bool>,
}

impl Inner {
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Recompute and publish `visible`. Call with the lock held so the
    /// publish order matches the mutation order.
    fn publish(&self, state: &State) {
        let visible = state.visible();
        self.visible_tx.send_if_modified(|v| {
            if *v == visible {
                false
            } else {
                *v = visible;
                true
            }
        });
    }
}

/// Process-wide busy indicator. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct LoadingSignal {
    inner: Arc<Inner>,
}

impl LoadingSignal {
    #[must_use]
    pub fn new() -> Self {
        let (visible_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State { explicit: false, in_flight: 0, counting: false, timer: None, timer_epoch: 0 }),
                visible_tx,
            }),
        }
    }

    /// Set the explicit "indicator requested" flag. Clearing it is refused
    /// while requests are in flight or the minimum-duration timer is armed;
    /// the eventual timer expiry performs the deferred clear.
    pub fn set_explicit(&self, visible: bool) {
        let mut state = self.inner.lock();
        if visible {
            state.explicit = true;
        } else if state.in_flight == 0 && !state.counting {
            state.explicit = false;
        }
        self.inner.publish(&state);
    }

    /// Record the start of an outbound async operation.
    pub fn begin_in_flight(&self) {
        let mut state = self.inner.lock();
        state.in_flight += 1;
        self.inner.publish(&state);
    }

    /// Record the settlement of an outbound async operation. Unmatched
    /// calls clamp at zero: a superseded navigation's late settlement must
    /// not underflow or panic.
    pub fn end_in_flight(&self) {
        let mut state = self.inner.lock();
        if state.in_flight == 0 {
            debug!("end_in_flight with no operation in flight; clamping");
        }
        state.in_flight = state.in_flight.saturating_sub(1);
        self.inner.publish(&state);
    }

    /// Arm the minimum-visible-duration flag immediately, cancelling any
    /// pending disarm so the window extends from now.
    pub fn arm_minimum_duration(&self) {
        let mut state = self.inner.lock();
        state.timer_epoch += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.counting = true;
        self.inner.publish(&state);
    }

    /// Schedule the minimum-duration flag to clear after `delay`. Calling
    /// again before expiry restarts the countdown from now; there is never
    /// more than one pending disarm per signal. On expiry the explicit flag
    /// is also force-cleared if no requests remain in flight.
    pub fn disarm_after_delay(&self, delay: Duration) {
        let mut state = self.inner.lock();
        state.timer_epoch += 1;
        let epoch = state.timer_epoch;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = inner.lock();
            if state.timer_epoch != epoch {
                return;
            }
            state.timer = None;
            state.counting = false;
            if state.in_flight == 0 {
                state.explicit = false;
            }
            inner.publish(&state);
        });
        state.timer = Some(handle.abort_handle());
        self.inner.publish(&state);
    }

    /// Fault path: zero every input and cancel the timer, bypassing the
    /// debounce. The indicator must never stay stuck up after a crash.
    pub fn hard_reset(&self) {
        let mut state = self.inner.lock();
        state.timer_epoch += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.explicit = false;
        state.in_flight = 0;
        state.counting = false;
        self.inner.publish(&state);
    }

    /// Current derived visibility.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        *self.inner.visible_tx.borrow()
    }

    /// Watch receiver for the derived visibility; this is the one boolean
    /// the UI observes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.visible_tx.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn in_flight_count(&self) -> u32 {
        self.inner.lock().in_flight
    }
}

impl Default for LoadingSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;
