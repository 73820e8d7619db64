use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// Callback wrapper that only fires after `duration` of quiet
///
/// The event loop is the timer: `call` schedules, `poll` runs the callback
/// once the deadline has passed, and `deadline` tells the loop when to wake.
/// The callback borrows its context `C` only while it runs, so the owner of
/// the context can keep mutating it between calls.
pub struct Debounced<C, T, F>
where
    F: FnMut(&mut C, T),
{
    callback: F,
    duration: Duration,
    pending: Option<(Instant, T)>,
    _context: PhantomData<fn(&mut C)>,
}

/// Wrap `callback` so bursts of calls collapse into one, `duration` after the
/// last call, carrying the last call's event
pub fn debounce<C, T, F>(callback: F, duration: Duration) -> Debounced<C, T, F>
where
    F: FnMut(&mut C, T),
{
    Debounced {
        callback,
        duration,
        pending: None,
        _context: PhantomData,
    }
}

impl<C, T, F> Debounced<C, T, F>
where
    F: FnMut(&mut C, T),
{
    /// Replace any pending call with `event`, due `duration` from now
    pub fn call(&mut self, event: T) {
        self.call_at(event, Instant::now());
    }

    /// Replace any pending call with `event`, due `duration` after `now`
    pub fn call_at(&mut self, event: T, now: Instant) {
        self.pending = Some((now + self.duration, event));
    }

    /// Fire the pending call if its deadline has passed; returns whether it fired
    pub fn poll(&mut self, now: Instant, context: &mut C) -> bool {
        match self.pending.take() {
            Some((deadline, event)) if now >= deadline => {
                (self.callback)(context, event);
                true
            }
            pending => {
                self.pending = pending;
                false
            }
        }
    }

    /// When the pending call is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
