//! Leading/trailing rate limiting for high-frequency editor events.
//!
//! Some host events arrive in bursts (selection drags, scrolling) and some arrive in pairs where
//! only the last one carries correct data (switching tabs reports the previous visible range
//! first). [`RateLimiter`] offers both behaviours over a single registered callback:
//!
//! - [`RateLimiter::lead`] fires immediately, then ignores calls until a cooldown elapses;
//! - [`RateLimiter::tail`] (re)schedules a deferred fire, so only the last call in a burst runs.
//!
//! The limiter performs no I/O and owns no timer. Callers pass the current [`Instant`] in and
//! drive deferred fires with [`RateLimiter::poll`], using [`RateLimiter::next_deadline`] to know
//! when to wake up.

use crate::error::RateLimitError;
use std::fmt;
use std::time::{Duration, Instant};

/// Default cooldown after a leading fire, in milliseconds.
pub const DEFAULT_LEAD_MS: u64 = 100;

/// Default delay before a trailing fire, in milliseconds.
pub const DEFAULT_TAIL_MS: u64 = 100;

struct PendingTail<A> {
    due: Instant,
    arg: A,
}

/// Leading/trailing throttle around one callback.
///
/// `A` is the argument handed to the callback; a trailing fire receives the argument of the
/// last [`tail`](Self::tail) call.
pub struct RateLimiter<A = ()> {
    lead_window: Duration,
    tail_window: Duration,
    callback: Option<Box<dyn FnMut(A)>>,
    cooldown_until: Option<Instant>,
    pending_tail: Option<PendingTail<A>>,
}

impl<A> RateLimiter<A> {
    /// Create a limiter with the given leading cooldown and trailing delay.
    pub fn new(lead_window: Duration, tail_window: Duration) -> Self {
        Self {
            lead_window,
            tail_window,
            callback: None,
            cooldown_until: None,
            pending_tail: None,
        }
    }

    /// Create a limiter with the default 100ms windows.
    pub fn with_defaults() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_LEAD_MS),
            Duration::from_millis(DEFAULT_TAIL_MS),
        )
    }

    /// Bind the callback, replacing any previous one.
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(A) + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Returns `true` once a callback has been registered.
    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }

    /// Fire now unless a previous leading fire is still cooling down.
    ///
    /// Returns whether the callback ran. The cooldown starts at the fire and is not extended by
    /// suppressed calls.
    pub fn lead(&mut self, arg: A, now: Instant) -> Result<bool, RateLimitError> {
        if self.in_cooldown(now) {
            return Ok(false);
        }

        let Some(callback) = self.callback.as_mut() else {
            return Err(RateLimitError::Unregistered);
        };
        self.cooldown_until = Some(now + self.lead_window);
        callback(arg);
        Ok(true)
    }

    /// Schedule a deferred fire, replacing any fire that is still pending.
    pub fn tail(&mut self, arg: A, now: Instant) -> Result<(), RateLimitError> {
        if self.callback.is_none() {
            return Err(RateLimitError::Unregistered);
        }

        self.pending_tail = Some(PendingTail {
            due: now + self.tail_window,
            arg,
        });
        Ok(())
    }

    /// Run the pending trailing fire if its deadline has passed. Returns whether it ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self
            .pending_tail
            .as_ref()
            .is_some_and(|pending| pending.due <= now)
        {
            return false;
        }

        let (Some(pending), Some(callback)) = (self.pending_tail.take(), self.callback.as_mut())
        else {
            return false;
        };
        callback(pending.arg);
        true
    }

    /// When the pending trailing fire is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending_tail.as_ref().map(|pending| pending.due)
    }

    /// Returns `true` if a trailing fire is scheduled.
    pub fn has_pending_tail(&self) -> bool {
        self.pending_tail.is_some()
    }

    /// Returns `true` if a [`lead`](Self::lead) at `now` would be suppressed.
    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }
}

impl<A> fmt::Debug for RateLimiter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateLimiter")
            .field("lead_window", &self.lead_window)
            .field("tail_window", &self.tail_window)
            .field("registered", &self.callback.is_some())
            .field("cooldown_until", &self.cooldown_until)
            .field("tail_due", &self.next_deadline())
            .finish()
    }
}
